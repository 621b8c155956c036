//! Renderer-side resources keyed by chunk coordinate
//!
//! The core never owns graphics handles. A backend keeps them here, creates
//! them the first time a chunk is uploaded and drops them when the world
//! reports the chunk evicted.

use std::collections::HashMap;

use crate::voxel::chunk::ChunkCoord;

/// Per-chunk resource table
#[derive(Debug)]
pub struct ChunkResourceTable<H> {
    entries: HashMap<ChunkCoord, H>,
}

impl<H> ChunkResourceTable<H> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Resource for `coord`, created with `create` if missing
    pub fn get_or_create<F>(&mut self, coord: ChunkCoord, create: F) -> &mut H
    where
        F: FnOnce() -> H,
    {
        self.entries.entry(coord).or_insert_with(create)
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&H> {
        self.entries.get(&coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    /// Remove and return the resource so the caller can free it
    pub fn release(&mut self, coord: ChunkCoord) -> Option<H> {
        self.entries.remove(&coord)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> Default for ChunkResourceTable<H> {
    fn default() -> Self {
        Self::new()
    }
}
