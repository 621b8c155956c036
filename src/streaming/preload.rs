//! Bulk terrain generation for the initial loading phase

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::Serialize;

use crate::terrain::TerrainGenerator;
use crate::voxel::chunk::{Chunk, ChunkCoord};

/// Loading phase progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

impl LoadProgress {
    /// Completed fraction in [0, 1]; an empty batch counts as complete
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.loaded as f32 / self.total as f32
        }
    }

    pub fn is_complete(&self) -> bool {
        self.loaded >= self.total
    }
}

/// Generate terrain for every coordinate on the rayon pool.
///
/// Generation is a pure function of coordinate and config, so chunks are
/// built independently. `progress` is called once per finished chunk, from
/// whichever worker finished it. The result keeps the input order.
pub fn generate_parallel<F>(generator: &TerrainGenerator, coords: &[ChunkCoord], progress: F) -> Vec<Chunk>
where
    F: Fn(LoadProgress) + Sync,
{
    let total = coords.len();
    let generated = AtomicUsize::new(0);

    coords
        .par_iter()
        .map(|&coord| {
            let chunk = generator.generate(coord);
            let loaded = generated.fetch_add(1, Ordering::Relaxed) + 1;
            progress(LoadProgress { loaded, total });
            chunk
        })
        .collect()
}
