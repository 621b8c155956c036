//! World container: streams chunks around the viewer, resolves voxel
//! queries across chunk borders and selects what gets drawn

use std::collections::HashMap;

use crate::core::types::{Mat4, Vec3};
use crate::math::Frustum;
use crate::mesh::{GreedyMesher, VoxelLookup};
use crate::render::{RenderBackend, RenderStats};
use crate::streaming::{self, LoadProgress, StreamingConfig};
use crate::terrain::{Biome, GenerationConfig, TerrainGenerator};
use super::chunk::{Chunk, ChunkCoord, CHUNK_HEIGHT};
use super::voxel::{Material, Voxel};

/// Chunks created and dropped by one [`World::update`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamingReport {
    /// Newly generated, closest first
    pub loaded: Vec<ChunkCoord>,
    /// Evicted, sorted by coordinate
    pub evicted: Vec<ChunkCoord>,
}

impl StreamingReport {
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty() && self.evicted.is_empty()
    }
}

/// Read-only view of the chunk map, used by the mesher for border lookups
struct ResidentChunks<'a>(&'a HashMap<ChunkCoord, Chunk>);

impl ResidentChunks<'_> {
    fn voxel(&self, x: i32, y: i32, z: i32) -> Voxel {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return Voxel::EMPTY;
        }
        let (coord, lx, lz) = ChunkCoord::locate(x, z);
        self.0
            .get(&coord)
            .map_or(Voxel::EMPTY, |chunk| chunk.get(lx, y, lz))
    }
}

impl VoxelLookup for ResidentChunks<'_> {
    fn is_solid_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.voxel(x, y, z).is_solid()
    }
}

/// Container for managing an unbounded world of streamed chunks.
///
/// A coordinate present in the map always holds a fully generated chunk.
pub struct World {
    chunks: HashMap<ChunkCoord, Chunk>,
    generator: TerrainGenerator,
    streaming: StreamingConfig,
    frustum: Frustum,
    last_viewer_chunk: Option<ChunkCoord>,
    mesher: GreedyMesher,
}

impl World {
    /// Create a new empty world
    pub fn new(generation: GenerationConfig, streaming: StreamingConfig) -> Self {
        log::info!(
            "Created world (seed {}, render distance {}, unload margin {})",
            generation.seed,
            streaming.render_distance,
            streaming.unload_margin
        );
        Self {
            chunks: HashMap::new(),
            generator: TerrainGenerator::new(generation),
            streaming,
            frustum: Frustum::default(),
            last_viewer_chunk: None,
            mesher: GreedyMesher::new(),
        }
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    pub fn streaming_config(&self) -> &StreamingConfig {
        &self.streaming
    }

    /// Frustum from the most recent render call
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Chunk the viewer was in at the last update or preload
    pub fn last_viewer_chunk(&self) -> Option<ChunkCoord> {
        self.last_viewer_chunk
    }

    /// Get immutable reference to a chunk by coordinate
    pub fn get_chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Get the number of loaded chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Loaded chunk coordinates, sorted
    pub fn loaded_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort();
        coords
    }

    pub fn biome_at(&self, x: i32, z: i32) -> Biome {
        self.generator.biome_at(x, z)
    }

    /// Generate `coord` if it isn't resident. Returns true if it was created.
    pub fn ensure_loaded(&mut self, coord: ChunkCoord) -> bool {
        if self.chunks.contains_key(&coord) {
            return false;
        }
        let chunk = self.generator.generate(coord);
        self.insert_generated(chunk);
        true
    }

    /// Insert a freshly generated chunk. Its lateral neighbours may now
    /// hide (or no longer hide) border faces, so they get remeshed.
    fn insert_generated(&mut self, chunk: Chunk) {
        let coord = chunk.coord;
        log::debug!("Loaded chunk {}", coord);
        self.chunks.insert(coord, chunk);
        for neighbor in coord.neighbors() {
            if let Some(chunk) = self.chunks.get_mut(&neighbor) {
                chunk.mark_dirty();
            }
        }
    }

    /// Drop a chunk. Returns it if it was resident.
    pub fn unload(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        let chunk = self.chunks.remove(&coord);
        if chunk.is_some() {
            log::debug!("Evicted chunk {}", coord);
        }
        chunk
    }

    /// Stream chunks around the viewer. Does nothing unless the viewer has
    /// crossed into a different chunk since the last call.
    pub fn update(&mut self, viewer: Vec3) -> StreamingReport {
        self.update_center(ChunkCoord::from_world_pos(viewer))
    }

    /// [`World::update`] with the viewer chunk already known
    pub fn update_center(&mut self, center: ChunkCoord) -> StreamingReport {
        if self.last_viewer_chunk == Some(center) {
            return StreamingReport::default();
        }
        log::debug!("Viewer entered chunk {}", center);
        self.last_viewer_chunk = Some(center);

        let mut report = StreamingReport::default();
        for coord in streaming::load_order(center, self.streaming.render_distance) {
            if self.ensure_loaded(coord) {
                report.loaded.push(coord);
            }
        }

        let mut stale: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .copied()
            .filter(|&coord| streaming::should_evict(center, coord, &self.streaming))
            .collect();
        stale.sort();
        for coord in stale {
            self.unload(coord);
            report.evicted.push(coord);
        }

        report
    }

    /// Loading phase: generate every missing chunk within render distance of
    /// `center` on the rayon pool, then insert them in load order.
    /// Returns how many chunks were generated.
    pub fn preload<F>(&mut self, center: ChunkCoord, progress: F) -> usize
    where
        F: Fn(LoadProgress) + Sync,
    {
        let missing: Vec<ChunkCoord> = streaming::load_order(center, self.streaming.render_distance)
            .into_iter()
            .filter(|coord| !self.chunks.contains_key(coord))
            .collect();

        log::info!("Loading {} chunks around {}", missing.len(), center);
        let chunks = streaming::generate_parallel(&self.generator, &missing, progress);
        let count = chunks.len();
        for chunk in chunks {
            self.insert_generated(chunk);
        }
        self.last_viewer_chunk = Some(center);
        log::info!("Loaded {} chunks", count);
        count
    }

    /// Cull resident chunks against `view_projection`, rebuild stale meshes
    /// of the visible ones and hand them to `backend`.
    pub fn render<B: RenderBackend + ?Sized>(&mut self, view_projection: &Mat4, backend: &mut B) -> RenderStats {
        self.frustum.update(view_projection);

        let mut stats = RenderStats::default();
        let mut visible: Vec<ChunkCoord> = Vec::with_capacity(self.chunks.len());
        for (coord, chunk) in &self.chunks {
            if self.frustum.intersects_aabb(&chunk.bounds()) {
                visible.push(*coord);
            } else {
                stats.culled += 1;
            }
        }
        visible.sort();
        stats.visible = visible.len();

        for coord in visible {
            let Some(chunk) = self.chunks.get(&coord) else {
                continue;
            };
            if chunk.needs_mesh() {
                let vertices = self.mesher.mesh(chunk, &ResidentChunks(&self.chunks));
                if let Some(chunk) = self.chunks.get_mut(&coord) {
                    chunk.set_mesh(vertices);
                    backend.upload_chunk(coord, chunk.vertex_floats());
                }
                stats.remeshed += 1;
            }

            if let Some(chunk) = self.chunks.get(&coord) {
                if !chunk.vertices().is_empty() {
                    backend.draw_chunk(coord, chunk.vertex_floats());
                    stats.drawn += 1;
                    stats.vertices += chunk.vertices().len();
                }
            }
        }

        stats
    }

    /// Material at a world voxel; empty outside the world height or in
    /// chunks that aren't resident
    pub fn voxel_type_at(&self, x: i32, y: i32, z: i32) -> Material {
        ResidentChunks(&self.chunks).voxel(x, y, z).material
    }

    /// Whether a world voxel is solid (water and unloaded space are not)
    pub fn is_voxel_solid_at(&self, x: i32, y: i32, z: i32) -> bool {
        ResidentChunks(&self.chunks).is_solid_at(x, y, z)
    }

    /// Whether a world voxel lies inside the height range of a resident chunk
    pub fn contains_voxel(&self, x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_HEIGHT).contains(&y) && self.chunks.contains_key(&ChunkCoord::from_voxel(x, z))
    }

    /// Write a world voxel. Writes outside the world height or into
    /// non-resident chunks are dropped. A write dirties the owning chunk
    /// and its four lateral neighbours.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, material: Material) {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return;
        }
        let (coord, lx, lz) = ChunkCoord::locate(x, z);
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            log::trace!("Dropped write at ({}, {}, {}): chunk {} not loaded", x, y, z, coord);
            return;
        };
        chunk.set(lx, y, lz, Voxel::new(material));
        chunk.mark_dirty();
        for neighbor in coord.neighbors() {
            if let Some(chunk) = self.chunks.get_mut(&neighbor) {
                chunk.mark_dirty();
            }
        }
    }
}

impl VoxelLookup for World {
    fn is_solid_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.is_voxel_solid_at(x, y, z)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(GenerationConfig::default(), StreamingConfig::default())
    }
}
