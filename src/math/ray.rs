//! Ray type and voxel grid traversal

use crate::core::types::{IVec3, Vec3};

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// First solid voxel found along a ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelHit {
    /// Integer coordinates of the hit voxel
    pub voxel: IVec3,
    /// Unit normal of the face the ray entered through, zero if the ray
    /// started inside the voxel
    pub normal: IVec3,
    /// Distance along the ray to the entry point
    pub distance: f32,
}

impl Ray {
    /// Create a new ray; the direction is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Walk the unit voxel grid cell by cell (Amanatides & Woo DDA) and
    /// return the first cell for which `is_solid` holds.
    ///
    /// Every cell the ray passes through is visited exactly once and in
    /// order, so thin features cannot be skipped at glancing angles.
    pub fn cast_voxels<F>(&self, max_distance: f32, mut is_solid: F) -> Option<VoxelHit>
    where
        F: FnMut(IVec3) -> bool,
    {
        let mut voxel = self.origin.floor().as_ivec3();
        if is_solid(voxel) {
            return Some(VoxelHit {
                voxel,
                normal: IVec3::ZERO,
                distance: 0.0,
            });
        }

        let dir = self.direction;
        let step = IVec3::new(step_sign(dir.x), step_sign(dir.y), step_sign(dir.z));

        let mut t_max = Vec3::splat(f32::INFINITY);
        let mut t_delta = Vec3::splat(f32::INFINITY);
        for axis in 0..3 {
            if step[axis] == 0 {
                continue;
            }
            let boundary = if step[axis] > 0 {
                (voxel[axis] + 1) as f32
            } else {
                voxel[axis] as f32
            };
            t_max[axis] = (boundary - self.origin[axis]) / dir[axis];
            t_delta[axis] = (1.0 / dir[axis]).abs();
        }

        loop {
            let axis = if t_max.x < t_max.y {
                if t_max.x < t_max.z { 0 } else { 2 }
            } else if t_max.y < t_max.z {
                1
            } else {
                2
            };

            let t = t_max[axis];
            if !(t <= max_distance) {
                return None;
            }

            voxel[axis] += step[axis];
            t_max[axis] += t_delta[axis];

            if is_solid(voxel) {
                let mut normal = IVec3::ZERO;
                normal[axis] = -step[axis];
                return Some(VoxelHit {
                    voxel,
                    normal,
                    distance: t,
                });
            }
        }
    }
}

fn step_sign(d: f32) -> i32 {
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X * 3.0);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_cast_straight_down() {
        let ray = Ray::new(Vec3::new(0.5, 10.5, 0.5), -Vec3::Y);
        let hit = ray.cast_voxels(20.0, |v| v.y < 5).unwrap();
        assert_eq!(hit.voxel, IVec3::new(0, 4, 0));
        assert_eq!(hit.normal, IVec3::Y);
        assert!((hit.distance - 5.5).abs() < 1e-4);
    }

    #[test]
    fn test_cast_negative_coordinates() {
        let ray = Ray::new(Vec3::new(-0.5, 0.5, -0.5), -Vec3::X);
        let hit = ray.cast_voxels(10.0, |v| v.x == -4).unwrap();
        assert_eq!(hit.voxel, IVec3::new(-4, 0, -1));
        assert_eq!(hit.normal, IVec3::X);
        assert!((hit.distance - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_cast_beyond_reach() {
        let ray = Ray::new(Vec3::new(0.5, 10.5, 0.5), -Vec3::Y);
        assert!(ray.cast_voxels(3.0, |v| v.y < 5).is_none());
    }

    #[test]
    fn test_cast_starting_inside() {
        let ray = Ray::new(Vec3::new(0.5, 0.5, 0.5), Vec3::X);
        let hit = ray.cast_voxels(5.0, |_| true).unwrap();
        assert_eq!(hit.voxel, IVec3::ZERO);
        assert_eq!(hit.normal, IVec3::ZERO);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_cast_zero_direction_terminates() {
        let ray = Ray::new(Vec3::splat(0.5), Vec3::ZERO);
        assert!(ray.cast_voxels(5.0, |v| v != IVec3::ZERO).is_none());
    }

    #[test]
    fn test_glancing_ray_visits_face_connected_cells() {
        let ray = Ray::new(Vec3::new(0.2, 0.9, 0.5), Vec3::new(1.0, 0.07, 0.03));
        let mut visited = Vec::new();
        let hit = ray.cast_voxels(12.0, |v| {
            visited.push(v);
            false
        });
        assert!(hit.is_none());
        assert!(visited.len() > 12);
        for pair in visited.windows(2) {
            let d = pair[1] - pair[0];
            assert_eq!(d.abs().element_sum(), 1, "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_glancing_ray_hits_thin_wall() {
        // A one-voxel-thick slab at y == 1 must not be tunnelled through
        let ray = Ray::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(1.0, 0.02, 0.0));
        let hit = ray.cast_voxels(50.0, |v| v.y == 1).unwrap();
        assert_eq!(hit.normal, -IVec3::Y);
        assert!(hit.voxel.x >= 24 && hit.voxel.x <= 25);
    }
}
