//! Chunk system for managing column-shaped regions of voxel space

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, Vec3};
use crate::math::Aabb;
use crate::mesh::Vertex;
use crate::voxel::voxel::{Material, Voxel};

/// Number of voxels along a chunk's X and Z sides
pub const CHUNK_SIZE: i32 = 16;

/// Number of voxels in a chunk column; also the world height
pub const CHUNK_HEIGHT: i32 = 64;

/// Voxels stored per chunk
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_HEIGHT * CHUNK_SIZE) as usize;

/// Integer coordinate identifying a chunk column in the world grid.
/// Ordered by x, then z.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert world position to chunk coordinate
    pub fn from_world_pos(pos: Vec3) -> Self {
        Self {
            x: (pos.x / CHUNK_SIZE as f32).floor() as i32,
            z: (pos.z / CHUNK_SIZE as f32).floor() as i32,
        }
    }

    /// Chunk containing the world voxel column (x, z)
    pub fn from_voxel(x: i32, z: i32) -> Self {
        Self {
            x: x.div_euclid(CHUNK_SIZE),
            z: z.div_euclid(CHUNK_SIZE),
        }
    }

    /// Split a world voxel column into its chunk and the local offset inside it
    pub fn locate(x: i32, z: i32) -> (Self, i32, i32) {
        (
            Self::from_voxel(x, z),
            x.rem_euclid(CHUNK_SIZE),
            z.rem_euclid(CHUNK_SIZE),
        )
    }

    /// World voxel coordinate of the chunk's minimum corner (y = 0)
    pub fn voxel_origin(&self) -> IVec3 {
        IVec3::new(self.x * CHUNK_SIZE, 0, self.z * CHUNK_SIZE)
    }

    /// Get the world-space origin (minimum corner) of this chunk
    pub fn world_origin(&self) -> Vec3 {
        self.voxel_origin().as_vec3()
    }

    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// The four laterally adjacent chunk coordinates (+X, -X, +Z, -Z)
    pub fn neighbors(&self) -> [ChunkCoord; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }

    /// Chessboard distance in chunk units
    pub fn chebyshev_distance(&self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A single 16x64x16 column of voxels plus its derived mesh
pub struct Chunk {
    /// Coordinate of this chunk in the world grid
    pub coord: ChunkCoord,
    voxels: Box<[Voxel]>,
    vertices: Vec<Vertex>,
    mesh_built: bool,
    mesh_dirty: bool,
}

impl Chunk {
    /// Create a new all-air chunk at the given coordinate
    pub fn empty(coord: ChunkCoord) -> Self {
        Self {
            coord,
            voxels: vec![Voxel::EMPTY; CHUNK_VOLUME].into_boxed_slice(),
            vertices: Vec::new(),
            mesh_built: false,
            mesh_dirty: false,
        }
    }

    /// Check local coordinates against the chunk dimensions
    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_HEIGHT).contains(&y) && (0..CHUNK_SIZE).contains(&z)
    }

    #[inline]
    fn index(x: i32, y: i32, z: i32) -> usize {
        ((y * CHUNK_SIZE + z) * CHUNK_SIZE + x) as usize
    }

    /// Voxel at local coordinates; out of bounds reads as empty
    pub fn get(&self, x: i32, y: i32, z: i32) -> Voxel {
        if Self::in_bounds(x, y, z) {
            self.voxels[Self::index(x, y, z)]
        } else {
            Voxel::EMPTY
        }
    }

    pub fn material(&self, x: i32, y: i32, z: i32) -> Material {
        self.get(x, y, z).material
    }

    /// Store a voxel at local coordinates. Returns false (and does nothing)
    /// when out of bounds. Does not touch the dirty flag.
    pub fn set(&mut self, x: i32, y: i32, z: i32, voxel: Voxel) -> bool {
        if !Self::in_bounds(x, y, z) {
            return false;
        }
        self.voxels[Self::index(x, y, z)] = voxel;
        true
    }

    /// Raw voxel tags, one byte per voxel
    pub fn voxel_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.voxels[..])
    }

    /// Number of solid (meshable) voxels
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_solid()).count()
    }

    pub fn world_origin(&self) -> Vec3 {
        self.coord.world_origin()
    }

    /// World-space bounds spanning the full column height
    pub fn bounds(&self) -> Aabb {
        let min = self.world_origin();
        Aabb::new(
            min,
            min + Vec3::new(CHUNK_SIZE as f32, CHUNK_HEIGHT as f32, CHUNK_SIZE as f32),
        )
    }

    /// Current mesh (empty until first built)
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Current mesh as a flat float stream: position, normal, color per vertex
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices[..])
    }

    /// Replace the mesh; clears the dirty flag
    pub fn set_mesh(&mut self, vertices: Vec<Vertex>) {
        self.vertices = vertices;
        self.mesh_built = true;
        self.mesh_dirty = false;
    }

    pub fn mark_dirty(&mut self) {
        self.mesh_dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.mesh_dirty
    }

    pub fn is_mesh_built(&self) -> bool {
        self.mesh_built
    }

    /// True when the mesh must be (re)built before drawing
    pub fn needs_mesh(&self) -> bool {
        !self.mesh_built || self.mesh_dirty
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("coord", &self.coord)
            .field("vertices", &self.vertices.len())
            .field("mesh_built", &self.mesh_built)
            .field("mesh_dirty", &self.mesh_dirty)
            .finish()
    }
}
