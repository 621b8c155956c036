//! Boundary between the voxel core and whatever draws its meshes

use super::resources::ChunkResourceTable;
use crate::mesh::Vertex;
use crate::voxel::chunk::ChunkCoord;

/// Receives chunk meshes from the world.
///
/// Meshes arrive as flat triangle lists of [`Vertex::FLOATS`] floats per
/// vertex (position, normal, color). The world calls `upload_chunk`
/// whenever a chunk's mesh is rebuilt (the slice may be empty),
/// `draw_chunk` for every visible chunk with a non-empty mesh each frame,
/// and `release_chunk` once a chunk is evicted.
pub trait RenderBackend {
    fn upload_chunk(&mut self, coord: ChunkCoord, vertices: &[f32]);
    fn draw_chunk(&mut self, coord: ChunkCoord, vertices: &[f32]);
    fn release_chunk(&mut self, coord: ChunkCoord);
}

/// Per-frame render selection counts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Chunks whose bounds passed the frustum test
    pub visible: usize,
    /// Chunks rejected by the frustum test
    pub culled: usize,
    /// Visible chunks whose mesh was rebuilt this frame
    pub remeshed: usize,
    /// Draw calls issued
    pub drawn: usize,
    /// Vertices submitted across all draw calls
    pub vertices: usize,
}

/// What the recording backend keeps per uploaded chunk
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordedMesh {
    pub vertex_count: usize,
    pub uploads: usize,
}

/// Headless backend that records what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingBackend {
    meshes: ChunkResourceTable<RecordedMesh>,
    draw_calls: usize,
    release_count: usize,
    drawn_this_frame: Vec<ChunkCoord>,
    released_this_frame: Vec<ChunkCoord>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget which chunks were drawn and released last frame
    pub fn begin_frame(&mut self) {
        self.drawn_this_frame.clear();
        self.released_this_frame.clear();
    }

    pub fn mesh(&self, coord: ChunkCoord) -> Option<&RecordedMesh> {
        self.meshes.get(coord)
    }

    /// Chunks that currently hold an uploaded mesh
    pub fn resident_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Total draw calls since creation
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    /// Total releases since creation
    pub fn release_count(&self) -> usize {
        self.release_count
    }

    pub fn drawn_this_frame(&self) -> &[ChunkCoord] {
        &self.drawn_this_frame
    }

    /// Chunks released since the last `begin_frame`, in order
    pub fn released(&self) -> &[ChunkCoord] {
        &self.released_this_frame
    }
}

impl RenderBackend for RecordingBackend {
    fn upload_chunk(&mut self, coord: ChunkCoord, vertices: &[f32]) {
        let mesh = self.meshes.get_or_create(coord, RecordedMesh::default);
        mesh.vertex_count = vertices.len() / Vertex::FLOATS;
        mesh.uploads += 1;
    }

    fn draw_chunk(&mut self, coord: ChunkCoord, vertices: &[f32]) {
        debug_assert!(!vertices.is_empty());
        self.draw_calls += 1;
        self.drawn_this_frame.push(coord);
    }

    fn release_chunk(&mut self, coord: ChunkCoord) {
        self.meshes.release(coord);
        self.release_count += 1;
        self.released_this_frame.push(coord);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;

    fn triangle() -> Vec<f32> {
        let vertices = vec![Vertex::new(Vec3::ZERO, Vec3::Y, Vec3::ONE); 3];
        bytemuck::cast_slice(&vertices[..]).to_vec()
    }

    #[test]
    fn test_recording_backend() {
        let mut backend = RecordingBackend::new();
        let coord = ChunkCoord::new(0, 1);

        backend.upload_chunk(coord, &triangle());
        backend.upload_chunk(coord, &triangle());
        backend.draw_chunk(coord, &triangle());

        assert_eq!(backend.mesh(coord), Some(&RecordedMesh { vertex_count: 3, uploads: 2 }));
        assert_eq!(backend.draw_calls(), 1);
        assert_eq!(backend.drawn_this_frame(), &[coord]);

        backend.begin_frame();
        assert!(backend.drawn_this_frame().is_empty());

        backend.release_chunk(coord);
        assert_eq!(backend.resident_meshes(), 0);
        assert_eq!(backend.released(), &[coord]);
    }

    #[test]
    fn test_release_log_is_per_frame() {
        let mut backend = RecordingBackend::new();
        for frame in 0..100 {
            backend.begin_frame();
            backend.upload_chunk(ChunkCoord::new(frame, 0), &triangle());
            backend.release_chunk(ChunkCoord::new(frame, 0));
            assert_eq!(backend.released(), &[ChunkCoord::new(frame, 0)]);
        }
        assert_eq!(backend.release_count(), 100);

        backend.begin_frame();
        assert!(backend.released().is_empty());
        assert_eq!(backend.release_count(), 100);
        assert_eq!(backend.resident_meshes(), 0);
    }
}
