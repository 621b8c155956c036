//! Break and place actions driven by a picked voxel

use serde::{Deserialize, Serialize};

use super::picker::pick_voxel;
use crate::core::types::{IVec3, Vec3};
use crate::voxel::voxel::Material;
use crate::voxel::world::World;

/// What the viewer wants to do to the voxel under the cursor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditAction {
    /// Clear the picked voxel
    Break,
    /// Fill the empty cell in front of the picked face
    Place(Material),
}

/// A change that was applied to the world
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Broken { at: IVec3, previous: Material },
    Placed { at: IVec3, material: Material },
}

/// Pick along the view ray and apply `action`. Returns `None` when nothing
/// was hit or the action was refused.
///
/// Placing needs an entry face (a ray starting inside a solid voxel has
/// none) and only fills empty cells; water and solids are left alone.
pub fn apply_edit(
    world: &mut World,
    origin: Vec3,
    direction: Vec3,
    reach: f32,
    action: EditAction,
) -> Option<EditOutcome> {
    let hit = pick_voxel(world, origin, direction, reach)?;

    match action {
        EditAction::Break => {
            let at = hit.voxel;
            let previous = world.voxel_type_at(at.x, at.y, at.z);
            world.set_voxel(at.x, at.y, at.z, Material::Empty);
            Some(EditOutcome::Broken { at, previous })
        }
        EditAction::Place(material) => {
            if hit.normal == IVec3::ZERO || material.is_empty() {
                return None;
            }
            let at = hit.voxel + hit.normal;
            if !world.contains_voxel(at.x, at.y, at.z) || world.voxel_type_at(at.x, at.y, at.z) != Material::Empty {
                return None;
            }
            world.set_voxel(at.x, at.y, at.z, material);
            Some(EditOutcome::Placed { at, material })
        }
    }
}

/// Turns a held button into one event per press
#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonEdge {
    was_down: bool,
}

impl ButtonEdge {
    /// Feed the current button state; true only on the frame it goes down
    pub fn pressed(&mut self, down: bool) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed
    }
}
