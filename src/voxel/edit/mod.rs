//! Voxel picking and break/place editing

pub mod picker;
pub mod interaction;

pub use picker::{pick_voxel, DEFAULT_PICK_DISTANCE};
pub use interaction::{apply_edit, ButtonEdge, EditAction, EditOutcome};
