//! World generation context: seed plus terrain tunables

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::terrain::noise::FractalNoise;
use crate::voxel::chunk::CHUNK_HEIGHT;

/// Configuration for the terrain generation pipeline.
///
/// Passed by reference into every terrain and biome query; nothing reads a
/// global seed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for terrain, biome and vegetation noise.
    pub seed: u32,
    /// Fractal octave count.
    pub octaves: u32,
    /// Amplitude falloff per octave.
    pub persistence: f64,
    /// Columns below this height fill with water (unless the surface is sand).
    pub water_level: i32,
    /// Sampling frequency of the biome field.
    pub biome_frequency: f64,
    /// Sampling frequency of the height field.
    pub height_frequency: f64,
    /// Sampling frequency of the vegetation field.
    pub tree_frequency: f64,
    /// Vegetation noise above this places a tree.
    pub tree_threshold: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            octaves: FractalNoise::DEFAULT_OCTAVES,
            persistence: FractalNoise::DEFAULT_PERSISTENCE,
            water_level: 15,
            biome_frequency: 0.001,
            height_frequency: 0.01,
            tree_frequency: 0.1,
            tree_threshold: 0.6,
        }
    }
}

impl GenerationConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Unscaled fractal field shared by all samplers
    pub fn fractal(&self) -> FractalNoise {
        FractalNoise::new(self.seed)
            .set_octaves(self.octaves)
            .set_persistence(self.persistence)
    }

    /// Reject values that would produce a degenerate world
    pub fn validate(&self) -> Result<()> {
        if self.octaves == 0 || self.octaves > 16 {
            return Err(Error::InvalidConfig(format!(
                "octaves must be in 1..=16, got {}",
                self.octaves
            )));
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "persistence must be in (0, 1], got {}",
                self.persistence
            )));
        }
        if !(0..=CHUNK_HEIGHT).contains(&self.water_level) {
            return Err(Error::InvalidConfig(format!(
                "water_level must be in 0..={}, got {}",
                CHUNK_HEIGHT, self.water_level
            )));
        }
        for (name, freq) in [
            ("biome_frequency", self.biome_frequency),
            ("height_frequency", self.height_frequency),
            ("tree_frequency", self.tree_frequency),
        ] {
            if !(freq.is_finite() && freq > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be positive, got {freq}"
                )));
            }
        }
        Ok(())
    }
}
