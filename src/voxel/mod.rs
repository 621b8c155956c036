//! Voxel data structures and operations

pub mod voxel;
pub mod chunk;
pub mod world;
pub mod edit;

pub use chunk::{Chunk, ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE};
pub use voxel::{Material, Voxel};
pub use world::{StreamingReport, World};
