//! Biome table driven by a low-frequency noise sample

use std::fmt;

use ::noise::{NoiseFn, ScalePoint};
use serde::{Deserialize, Serialize};

use super::config::GenerationConfig;
use super::noise::FractalNoise;
use crate::voxel::voxel::Material;

/// Biome types, in table order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Plains,
    Mountains,
    Desert,
    Forest,
}

impl Biome {
    /// The biome table; selection indexes into this order
    pub const ALL: [Biome; 4] = [Biome::Plains, Biome::Mountains, Biome::Desert, Biome::Forest];

    pub fn name(&self) -> &'static str {
        match self {
            Biome::Plains => "Plains",
            Biome::Mountains => "Mountains",
            Biome::Desert => "Desert",
            Biome::Forest => "Forest",
        }
    }

    /// Top voxel of a column
    pub fn surface(&self) -> Material {
        match self {
            Biome::Plains | Biome::Forest => Material::Grass,
            Biome::Mountains => Material::Snow,
            Biome::Desert => Material::Sand,
        }
    }

    /// The four voxels beneath the surface
    pub fn subsurface(&self) -> Material {
        match self {
            Biome::Plains | Biome::Forest => Material::Dirt,
            Biome::Mountains => Material::Grass,
            Biome::Desert => Material::Sand,
        }
    }

    /// Everything below the subsurface
    pub fn filler(&self) -> Material {
        Material::Stone
    }

    /// Column height at zero noise
    pub fn base_height(&self) -> f64 {
        match self {
            Biome::Plains => 20.0,
            Biome::Mountains => 32.0,
            Biome::Desert => 18.0,
            Biome::Forest => 22.0,
        }
    }

    /// Height noise amplitude
    pub fn height_variation(&self) -> f64 {
        match self {
            Biome::Plains => 4.0,
            Biome::Mountains => 18.0,
            Biome::Desert => 2.0,
            Biome::Forest => 5.0,
        }
    }

    /// Whether this biome can grow trees
    pub fn has_vegetation(&self) -> bool {
        matches!(self, Biome::Mountains | Biome::Forest)
    }

    /// Map a noise sample nominally in [-1, 1] onto the table.
    /// Fractal sums can leave that range, so the index wraps euclidean.
    pub fn from_noise(n: f64) -> Biome {
        let count = Self::ALL.len() as i64;
        let index = ((n + 1.0) * 0.5 * count as f64).floor() as i64;
        Self::ALL[index.rem_euclid(count) as usize]
    }
}

/// Biome map generator
#[derive(Clone)]
pub struct BiomeMap {
    sampler: ScalePoint<FractalNoise>,
}

// `ScalePoint` has no Debug impl
impl fmt::Debug for BiomeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiomeMap")
            .field("noise", &self.sampler.source)
            .field("frequency", &self.sampler.x_scale)
            .finish()
    }
}

impl BiomeMap {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            sampler: config.fractal().scaled(config.biome_frequency),
        }
    }

    /// Raw biome noise at a world column
    pub fn noise_at(&self, x: i32, z: i32) -> f64 {
        self.sampler.get([x as f64, z as f64])
    }

    /// Get biome at world column (x, z)
    pub fn biome_at(&self, x: i32, z: i32) -> Biome {
        Biome::from_noise(self.noise_at(x, z))
    }
}

/// One-off biome lookup for callers without a [`BiomeMap`]
pub fn select_biome(x: i32, z: i32, config: &GenerationConfig) -> Biome {
    BiomeMap::new(config).biome_at(x, z)
}
