//! Noise-based procedural terrain generation

use std::fmt;

use ::noise::{NoiseFn, ScalePoint};

use super::biome::{Biome, BiomeMap};
use super::config::GenerationConfig;
use super::noise::FractalNoise;
use crate::voxel::chunk::{Chunk, ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::voxel::voxel::{Material, Voxel};

/// Logs stacked above the surface, the top one is replaced by canopy
const TRUNK_HEIGHT: i32 = 4;

/// Trees are only planted where the whole canopy fits under the ceiling
const TREE_CLEARANCE: i32 = 6;

/// Procedural terrain generator. Pure function of (coordinate, config).
#[derive(Clone)]
pub struct TerrainGenerator {
    config: GenerationConfig,
    biomes: BiomeMap,
    height: ScalePoint<FractalNoise>,
    trees: ScalePoint<FractalNoise>,
}

impl TerrainGenerator {
    /// Create a new terrain generator with the given parameters
    pub fn new(config: GenerationConfig) -> Self {
        let fractal = config.fractal();
        Self {
            biomes: BiomeMap::new(&config),
            height: fractal.scaled(config.height_frequency),
            trees: fractal.scaled(config.tree_frequency),
            config,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn biome_at(&self, x: i32, z: i32) -> Biome {
        self.biomes.biome_at(x, z)
    }

    /// Terrain height of a world column for the given biome, in [1, CHUNK_HEIGHT - 1]
    pub fn height_for(&self, biome: Biome, x: i32, z: i32) -> i32 {
        let n = self.height.get([x as f64, z as f64]);
        let height = (biome.base_height() + biome.height_variation() * n) as i32;
        height.clamp(1, CHUNK_HEIGHT - 1)
    }

    /// Terrain height of a world column
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        self.height_for(self.biome_at(x, z), x, z)
    }

    /// Material at height `y` of a column with the given biome and surface height
    pub fn column_material(&self, biome: Biome, height: i32, y: i32) -> Material {
        if y < height - 5 {
            biome.filler()
        } else if y < height - 1 {
            biome.subsurface()
        } else if y < height {
            biome.surface()
        } else if y < self.config.water_level && biome.surface() != Material::Sand {
            Material::Water
        } else {
            Material::Empty
        }
    }

    /// Whether a tree grows on this column
    pub fn has_tree(&self, biome: Biome, height: i32, x: i32, z: i32) -> bool {
        biome.has_vegetation()
            && height < CHUNK_HEIGHT - TREE_CLEARANCE
            && self.trees.get([x as f64, z as f64]) > self.config.tree_threshold
    }

    /// Build and fill a chunk
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::empty(coord);
        self.fill(&mut chunk);
        chunk
    }

    /// Overwrite every voxel of `chunk` with generated terrain.
    ///
    /// Columns are visited in x-major order and each tree is stamped right
    /// after its own column, so later columns overwrite earlier canopy.
    pub fn fill(&self, chunk: &mut Chunk) {
        let origin = chunk.coord.voxel_origin();
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let (wx, wz) = (origin.x + x, origin.z + z);
                let biome = self.biome_at(wx, wz);
                let height = self.height_for(biome, wx, wz);

                for y in 0..CHUNK_HEIGHT {
                    chunk.set(x, y, z, Voxel::new(self.column_material(biome, height, y)));
                }

                if self.has_tree(biome, height, wx, wz) {
                    stamp_tree(chunk, x, height, z);
                }
            }
        }
    }
}

/// Trunk of logs from `base`, then a diamond canopy three layers deep
/// starting at the trunk's top log. Canopy is clipped to the chunk.
pub fn stamp_tree(chunk: &mut Chunk, x: i32, base: i32, z: i32) {
    let log = Voxel::new(Material::Log);
    let leaves = Voxel::new(Material::Leaves);

    for t in 0..TRUNK_HEIGHT {
        chunk.set(x, base + t, z, log);
    }

    for dx in -2..=2i32 {
        for dz in -2..=2i32 {
            for dy in 3..=5 {
                let (lx, lz) = (x + dx, z + dz);
                let inside = (0..CHUNK_SIZE).contains(&lx) && (0..CHUNK_SIZE).contains(&lz);
                if inside && dx.abs() + dz.abs() + (dy - 3) < 5 {
                    chunk.set(lx, base + dy, lz, leaves);
                }
            }
        }
    }
}

impl fmt::Debug for TerrainGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerrainGenerator")
            .field("config", &self.config)
            .field("biomes", &self.biomes)
            .finish_non_exhaustive()
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(GenerationConfig::default())
    }
}
