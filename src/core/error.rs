//! Error types for voxterra
//!
//! Only the configuration surface is fallible. World queries and edits that
//! miss a resident chunk are not errors; see [`crate::voxel::World`].

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
