//! Rendering boundary: the backend trait and renderer-side chunk resources

pub mod backend;
pub mod resources;

pub use backend::{RecordedMesh, RecordingBackend, RenderBackend, RenderStats};
pub use resources::ChunkResourceTable;
