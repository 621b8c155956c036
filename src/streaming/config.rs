//! Streaming radius configuration

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Radii are capped so a typo can't ask for millions of chunks
pub const MAX_RENDER_DISTANCE: i32 = 64;

/// How far around the viewer chunks are kept resident
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Chebyshev radius, in chunks, that must be resident around the viewer
    pub render_distance: i32,
    /// Extra rings kept before eviction so boundary crossings don't thrash
    pub unload_margin: i32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            render_distance: 4,
            unload_margin: 2,
        }
    }
}

impl StreamingConfig {
    /// Chunks strictly farther than this are evicted
    pub fn unload_distance(&self) -> i32 {
        self.render_distance + self.unload_margin
    }

    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_RENDER_DISTANCE).contains(&self.render_distance) {
            return Err(Error::InvalidConfig(format!(
                "render_distance must be in 0..={}, got {}",
                MAX_RENDER_DISTANCE, self.render_distance
            )));
        }
        if self.unload_margin < 0 {
            return Err(Error::InvalidConfig(format!(
                "unload_margin must not be negative, got {}",
                self.unload_margin
            )));
        }
        Ok(())
    }
}
