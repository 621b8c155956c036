//! Voxel data type

use bytemuck::NoUninit;
use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;

/// Material tag stored in every voxel cell
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, NoUninit, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    #[default]
    Empty = 0,
    Stone = 1,
    Grass = 2,
    Dirt = 3,
    Sand = 4,
    Water = 5,
    Snow = 6,
    Log = 7,
    Leaves = 8,
}

impl Material {
    /// Every material, in tag order
    pub const ALL: [Material; 9] = [
        Material::Empty,
        Material::Stone,
        Material::Grass,
        Material::Dirt,
        Material::Sand,
        Material::Water,
        Material::Snow,
        Material::Log,
        Material::Leaves,
    ];

    /// True for air
    pub fn is_empty(self) -> bool {
        self == Material::Empty
    }

    /// Solid materials occlude neighbouring faces and are meshed.
    /// Water is present but not solid.
    pub fn is_solid(self) -> bool {
        !matches!(self, Material::Empty | Material::Water)
    }

    /// Base RGB color used by the mesher before face shading
    pub fn color(self) -> Vec3 {
        match self {
            Material::Empty => Vec3::ZERO,
            Material::Stone => Vec3::new(0.5, 0.5, 0.5),
            Material::Grass => Vec3::new(0.0, 0.8, 0.0),
            Material::Dirt => Vec3::new(0.6, 0.4, 0.2),
            Material::Sand => Vec3::new(0.9, 0.8, 0.5),
            Material::Water => Vec3::new(0.2, 0.4, 0.8),
            Material::Snow => Vec3::new(0.95, 0.98, 1.0),
            Material::Log => Vec3::new(0.55, 0.27, 0.07),
            Material::Leaves => Vec3::new(0.13, 0.55, 0.13),
        }
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            Material::Empty => "empty",
            Material::Stone => "stone",
            Material::Grass => "grass",
            Material::Dirt => "dirt",
            Material::Sand => "sand",
            Material::Water => "water",
            Material::Snow => "snow",
            Material::Log => "log",
            Material::Leaves => "leaves",
        }
    }
}

/// Single voxel - exactly 1 byte
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, NoUninit)]
pub struct Voxel {
    pub material: Material,
}

impl Voxel {
    /// Empty/air voxel
    pub const EMPTY: Voxel = Voxel {
        material: Material::Empty,
    };

    pub const fn new(material: Material) -> Self {
        Self { material }
    }

    /// Check if voxel holds anything (water included)
    pub fn is_active(&self) -> bool {
        !self.material.is_empty()
    }

    /// Check if voxel occludes and gets meshed
    pub fn is_solid(&self) -> bool {
        self.material.is_solid()
    }
}

impl From<Material> for Voxel {
    fn from(material: Material) -> Self {
        Self { material }
    }
}
