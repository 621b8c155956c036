//! Voxterra - chunked, streamed voxel terrain with greedy meshing

pub mod core;
pub mod math;
pub mod voxel;
pub mod terrain;
pub mod mesh;
pub mod streaming;
pub mod render;
pub mod scene;

pub use crate::core::error::Error;
pub use crate::core::types::Result;
pub use crate::render::{RenderBackend, RenderStats};
pub use crate::scene::{App, SceneConfig};
pub use crate::voxel::{Chunk, ChunkCoord, Material, World};
