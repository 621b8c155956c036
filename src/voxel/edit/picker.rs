//! Ray picking against the resident world

use crate::core::types::Vec3;
use crate::math::{Ray, VoxelHit};
use crate::voxel::world::World;

/// Default reach of the viewer, in voxels
pub const DEFAULT_PICK_DISTANCE: f32 = 6.0;

/// First solid voxel along the ray from `origin` in `direction`, within
/// `max_distance`. Water, air and unloaded chunks are passed through.
pub fn pick_voxel(world: &World, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<VoxelHit> {
    Ray::new(origin, direction).cast_voxels(max_distance, |v| world.is_voxel_solid_at(v.x, v.y, v.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IVec3;
    use crate::streaming::StreamingConfig;
    use crate::terrain::GenerationConfig;
    use crate::voxel::voxel::Material;

    fn flat_world() -> World {
        let mut world = World::new(
            GenerationConfig::default(),
            StreamingConfig { render_distance: 0, unload_margin: 0 },
        );
        world.update(Vec3::ZERO);
        // Clear the column above y = 10 so the tests control what's there
        for x in 0..16 {
            for z in 0..16 {
                for y in 10..64 {
                    world.set_voxel(x, y, z, Material::Empty);
                }
                world.set_voxel(x, 9, z, Material::Stone);
            }
        }
        world
    }

    #[test]
    fn test_pick_ground() {
        let world = flat_world();
        let hit = pick_voxel(&world, Vec3::new(4.5, 14.5, 4.5), -Vec3::Y, DEFAULT_PICK_DISTANCE).unwrap();
        assert_eq!(hit.voxel, IVec3::new(4, 9, 4));
        assert_eq!(hit.normal, IVec3::Y);
        assert!((hit.distance - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_pick_out_of_reach() {
        let world = flat_world();
        assert!(pick_voxel(&world, Vec3::new(4.5, 30.5, 4.5), -Vec3::Y, DEFAULT_PICK_DISTANCE).is_none());
    }

    #[test]
    fn test_pick_passes_through_water() {
        let mut world = flat_world();
        world.set_voxel(4, 11, 4, Material::Water);
        world.set_voxel(4, 10, 4, Material::Water);
        let hit = pick_voxel(&world, Vec3::new(4.5, 12.5, 4.5), -Vec3::Y, DEFAULT_PICK_DISTANCE).unwrap();
        assert_eq!(hit.voxel, IVec3::new(4, 9, 4));
    }

    #[test]
    fn test_pick_side_face() {
        let mut world = flat_world();
        world.set_voxel(8, 10, 4, Material::Log);
        let hit = pick_voxel(&world, Vec3::new(4.5, 10.5, 4.5), Vec3::X, DEFAULT_PICK_DISTANCE).unwrap();
        assert_eq!(hit.voxel, IVec3::new(8, 10, 4));
        assert_eq!(hit.normal, -IVec3::X);
    }
}
