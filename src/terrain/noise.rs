//! Seeded value-noise height field
//!
//! A lattice hash, a 3x3 smoothing kernel, bilinear interpolation and
//! octave summation. Every function here is pure in (x, z, seed).

use ::noise::{NoiseFn, ScalePoint};

/// Hash a lattice point into a pseudo-random value in (-1, 1]
pub fn lattice_noise(x: i32, z: i32, seed: u32) -> f64 {
    let mut n = x
        .wrapping_add(z.wrapping_mul(57))
        .wrapping_add((seed as i32).wrapping_mul(131));
    n = n.wrapping_shl(13) ^ n;
    let mixed = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(789_221))
        .wrapping_add(1_376_312_589);
    1.0 - f64::from(mixed & 0x7fff_ffff) / 1_073_741_824.0
}

/// 3x3 weighted average: diagonals 1/16, sides 1/8, center 1/4
pub fn smooth_noise(x: i32, z: i32, seed: u32) -> f64 {
    let n = |dx: i32, dz: i32| lattice_noise(x.wrapping_add(dx), z.wrapping_add(dz), seed);
    let corners = (n(-1, -1) + n(1, -1) + n(-1, 1) + n(1, 1)) / 16.0;
    let sides = (n(-1, 0) + n(1, 0) + n(0, -1) + n(0, 1)) / 8.0;
    let center = n(0, 0) / 4.0;
    corners + sides + center
}

/// Bilinear interpolation of [`smooth_noise`] between the surrounding lattice points
pub fn interpolated_noise(x: f64, z: f64, seed: u32) -> f64 {
    let (fx, fz) = (x.floor(), z.floor());
    let (ix, iz) = (fx as i32, fz as i32);
    let (tx, tz) = (x - fx, z - fz);

    let v1 = smooth_noise(ix, iz, seed);
    let v2 = smooth_noise(ix.wrapping_add(1), iz, seed);
    let v3 = smooth_noise(ix, iz.wrapping_add(1), seed);
    let v4 = smooth_noise(ix.wrapping_add(1), iz.wrapping_add(1), seed);

    let i1 = lerp(v1, v2, tx);
    let i2 = lerp(v3, v4, tx);
    lerp(i1, i2, tz)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Multi-octave sum of [`interpolated_noise`]; octave `i` samples at
/// frequency `2^i` with amplitude `persistence^i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalNoise {
    pub seed: u32,
    pub octaves: u32,
    pub persistence: f64,
}

impl FractalNoise {
    pub const DEFAULT_OCTAVES: u32 = 4;
    pub const DEFAULT_PERSISTENCE: f64 = 0.5;

    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            octaves: Self::DEFAULT_OCTAVES,
            persistence: Self::DEFAULT_PERSISTENCE,
        }
    }

    pub fn set_octaves(self, octaves: u32) -> Self {
        Self { octaves, ..self }
    }

    pub fn set_persistence(self, persistence: f64) -> Self {
        Self { persistence, ..self }
    }

    /// Largest magnitude the sum can reach
    pub fn amplitude_bound(&self) -> f64 {
        (0..self.octaves).map(|i| self.persistence.powi(i as i32)).sum()
    }

    /// Wrap in a sampler that scales input coordinates by `frequency`
    pub fn scaled(self, frequency: f64) -> ScalePoint<Self> {
        ScalePoint::new(self).set_scale(frequency)
    }
}

impl NoiseFn<f64, 2> for FractalNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        for _ in 0..self.octaves {
            total += interpolated_noise(point[0] * frequency, point[1] * frequency, self.seed) * amplitude;
            frequency *= 2.0;
            amplitude *= self.persistence;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_noise_range() {
        for seed in [0, 1, 12345, u32::MAX] {
            for x in -50..50 {
                for z in -50..50 {
                    let n = lattice_noise(x * 37, z * 11, seed);
                    assert!(n > -1.0 && n <= 1.0, "noise({x}, {z}, {seed}) = {n}");
                }
            }
        }
    }

    #[test]
    fn test_lattice_noise_deterministic() {
        assert_eq!(lattice_noise(7, -3, 99), lattice_noise(7, -3, 99));
        assert_ne!(lattice_noise(7, -3, 99), lattice_noise(7, -3, 100));
    }

    #[test]
    fn test_lattice_noise_known_value() {
        // n = 0 hashes to 1376312589 & 0x7fffffff
        let expected = 1.0 - 1_376_312_589.0 / 1_073_741_824.0;
        assert!((lattice_noise(0, 0, 0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_smooth_noise_bounded() {
        // Kernel weights sum to 1
        for x in -10..10 {
            let v = smooth_noise(x, -x, 5);
            assert!(v.abs() <= 1.0);
        }
    }

    #[test]
    fn test_interpolated_matches_lattice_at_integers() {
        for (x, z) in [(0, 0), (3, -4), (-7, 12)] {
            let a = interpolated_noise(x as f64, z as f64, 42);
            let b = smooth_noise(x, z, 42);
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_interpolated_is_continuous() {
        let a = interpolated_noise(2.0 - 1e-9, 0.5, 42);
        let b = interpolated_noise(2.0, 0.5, 42);
        assert!((a - b).abs() < 1e-6);
        let c = interpolated_noise(-1e-9, -0.25, 42);
        let d = interpolated_noise(0.0, -0.25, 42);
        assert!((c - d).abs() < 1e-6);
    }

    #[test]
    fn test_fractal_bounded_and_deterministic() {
        let fractal = FractalNoise::new(12345);
        assert!((fractal.amplitude_bound() - 1.875).abs() < 1e-12);
        for i in 0..200 {
            let p = [i as f64 * 0.37 - 40.0, i as f64 * -0.91 + 13.0];
            let v = fractal.get(p);
            assert!(v.abs() <= fractal.amplitude_bound());
            assert_eq!(v, fractal.get(p));
        }
    }

    #[test]
    fn test_single_octave_is_interpolated_noise() {
        let fractal = FractalNoise::new(9).set_octaves(1);
        assert_eq!(fractal.get([1.25, -3.5]), interpolated_noise(1.25, -3.5, 9));
    }

    #[test]
    fn test_scaled_sampler() {
        let fractal = FractalNoise::new(77);
        let scaled = fractal.scaled(0.01);
        let direct = fractal.get([1.23, -4.56]);
        assert!((scaled.get([123.0, -456.0]) - direct).abs() < 1e-9);
    }
}
