//! Scene configuration: world generation, streaming and camera settings

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;
use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::streaming::StreamingConfig;
use crate::terrain::GenerationConfig;
use crate::voxel::edit::DEFAULT_PICK_DISTANCE;

/// Initial camera placement and tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Units per second
    pub move_speed: f32,
    /// Degrees per unit of mouse movement
    pub mouse_sensitivity: f32,
    /// Reach of break/place picking
    pub pick_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 50.0, 0.0),
            fov_y_degrees: 70.0,
            near: 0.1,
            far: 1000.0,
            move_speed: 15.0,
            mouse_sensitivity: 0.1,
            pick_distance: DEFAULT_PICK_DISTANCE,
        }
    }
}

impl CameraConfig {
    /// Build a camera with this configuration
    pub fn build(&self, aspect: f32) -> Camera {
        let mut camera = Camera::new(self.position, self.fov_y_degrees, aspect);
        camera.near = self.near;
        camera.far = self.far;
        camera.move_speed = self.move_speed;
        camera.mouse_sensitivity = self.mouse_sensitivity;
        camera
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(Error::InvalidConfig(format!(
                "fov_y_degrees must be in (0, 180), got {}",
                self.fov_y_degrees
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(Error::InvalidConfig(format!(
                "clip planes must satisfy 0 < near < far, got near {} far {}",
                self.near, self.far
            )));
        }
        if !self.position.is_finite() {
            return Err(Error::InvalidConfig("camera position must be finite".into()));
        }
        if self.pick_distance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "pick_distance must not be negative, got {}",
                self.pick_distance
            )));
        }
        Ok(())
    }
}

/// Configuration for a scene
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub generation: GenerationConfig,
    pub streaming: StreamingConfig,
    pub camera: CameraConfig,
}

impl SceneConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: SceneConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.generation.validate()?;
        self.streaming.validate()?;
        self.camera.validate()
    }
}
