//! Scene configuration and the application context

pub mod config;
pub mod app;

pub use app::{App, DebugInfo, FrameInput, FrameStats};
pub use config::{CameraConfig, SceneConfig};
