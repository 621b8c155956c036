//! Chunk surface extraction

pub mod vertex;
pub mod greedy;

pub use vertex::{Face, Vertex};
pub use greedy::{mesh_chunk, GreedyMesher, NoNeighbors, VoxelLookup};
