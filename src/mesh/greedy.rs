//! Greedy meshing: merge coplanar exposed faces of equal material into
//! rectangles.
//!
//! For each of the six face orientations the chunk is swept slice by slice.
//! Each slice yields a 2D mask of exposed faces, and the mask is covered
//! greedily: grow along the first in-plane axis, then along the second while
//! the whole row still matches, emit, clear, continue.

use super::vertex::{Face, Vertex};
use crate::core::types::{IVec3, Vec3};
use crate::voxel::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::voxel::voxel::Material;

/// Chunk extent along X, Y, Z
const DIMS: [i32; 3] = [CHUNK_SIZE, CHUNK_HEIGHT, CHUNK_SIZE];

/// Largest slice the mask has to hold (an X or Z slice)
const MAX_SLICE: usize = (CHUNK_SIZE * CHUNK_HEIGHT) as usize;

/// Solidity of voxels outside the chunk being meshed, in world coordinates
pub trait VoxelLookup {
    fn is_solid_at(&self, x: i32, y: i32, z: i32) -> bool;
}

/// Treats everything outside the chunk as air
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNeighbors;

impl VoxelLookup for NoNeighbors {
    fn is_solid_at(&self, _x: i32, _y: i32, _z: i32) -> bool {
        false
    }
}

/// In-plane (u, v) axes for a face axis; u is the axis rectangles grow along first
fn plane_axes(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Greedy meshing engine with a reusable slice mask
pub struct GreedyMesher {
    mask: Vec<Material>,
    quads: usize,
}

impl GreedyMesher {
    pub fn new() -> Self {
        Self {
            mask: vec![Material::Empty; MAX_SLICE],
            quads: 0,
        }
    }

    /// Quads emitted by the most recent [`GreedyMesher::mesh`] call
    pub fn last_quad_count(&self) -> usize {
        self.quads
    }

    /// Build the triangle list for `chunk`. Faces on the chunk border ask
    /// `neighbors` whether the adjacent voxel is solid.
    pub fn mesh<L: VoxelLookup + ?Sized>(&mut self, chunk: &Chunk, neighbors: &L) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        self.quads = 0;
        for face in Face::ALL {
            self.mesh_face(chunk, neighbors, face, &mut vertices);
        }
        log::trace!(
            "Meshed chunk {}: {} quads, {} vertices",
            chunk.coord,
            self.quads,
            vertices.len()
        );
        vertices
    }

    fn mesh_face<L: VoxelLookup + ?Sized>(
        &mut self,
        chunk: &Chunk,
        neighbors: &L,
        face: Face,
        out: &mut Vec<Vertex>,
    ) {
        let axis = face.axis;
        let (u, v) = plane_axes(axis);
        let (du, dv) = (DIMS[u], DIMS[v]);
        let width_of = du as usize;

        for w in 0..DIMS[axis] {
            // Build the exposure mask for this slice
            for j in 0..dv {
                for i in 0..du {
                    let mut p = IVec3::ZERO;
                    p[axis] = w;
                    p[u] = i;
                    p[v] = j;
                    let material = chunk.material(p.x, p.y, p.z);
                    let exposed = material.is_solid() && !self.occluded(chunk, neighbors, p, face);
                    self.mask[i as usize + j as usize * width_of] =
                        if exposed { material } else { Material::Empty };
                }
            }

            // Cover the mask with rectangles
            for j in 0..dv {
                let mut i = 0;
                while i < du {
                    let material = self.mask[i as usize + j as usize * width_of];
                    if material.is_empty() {
                        i += 1;
                        continue;
                    }

                    let mut width = 1;
                    while i + width < du
                        && self.mask[(i + width) as usize + j as usize * width_of] == material
                    {
                        width += 1;
                    }

                    let mut height = 1;
                    'grow: while j + height < dv {
                        for k in 0..width {
                            if self.mask[(i + k) as usize + (j + height) as usize * width_of] != material {
                                break 'grow;
                            }
                        }
                        height += 1;
                    }

                    let mut base = IVec3::ZERO;
                    base[axis] = if face.direction > 0 { w + 1 } else { w };
                    base[u] = i;
                    base[v] = j;
                    let mut extent_u = IVec3::ZERO;
                    extent_u[u] = width;
                    let mut extent_v = IVec3::ZERO;
                    extent_v[v] = height;

                    let origin = chunk.world_origin() + base.as_vec3();
                    emit_quad(out, face, origin, extent_u.as_vec3(), extent_v.as_vec3(), material);
                    self.quads += 1;

                    for dj in 0..height {
                        for di in 0..width {
                            self.mask[(i + di) as usize + (j + dj) as usize * width_of] = Material::Empty;
                        }
                    }

                    i += width;
                }
            }
        }
    }

    /// Whether the voxel one step past `p` along `face` hides that face
    fn occluded<L: VoxelLookup + ?Sized>(&self, chunk: &Chunk, neighbors: &L, p: IVec3, face: Face) -> bool {
        let mut q = p;
        q[face.axis] += face.direction;

        if q.y < 0 {
            // Nothing renders a face pointing into the void under the world
            return true;
        }
        if q.y >= CHUNK_HEIGHT {
            return false;
        }
        if Chunk::in_bounds(q.x, q.y, q.z) {
            return chunk.get(q.x, q.y, q.z).is_solid();
        }
        let world = chunk.coord.voxel_origin() + q;
        neighbors.is_solid_at(world.x, world.y, world.z)
    }
}

impl Default for GreedyMesher {
    fn default() -> Self {
        Self::new()
    }
}

/// Two triangles for the rectangle `origin + [0, du] x [0, dv]`, wound so
/// that their geometric normal points along the face normal.
fn emit_quad(out: &mut Vec<Vertex>, face: Face, origin: Vec3, du: Vec3, dv: Vec3, material: Material) {
    let corners = [origin, origin + du, origin + du + dv, origin + dv];
    let normal = face.normal().as_vec3();
    let color = face.shaded_color(material);

    // (u, v) is right-handed about +X and +Z but left-handed about +Y
    let flip = (face.direction < 0) != (face.axis == 1);
    let order: [usize; 6] = if flip {
        [0, 3, 2, 0, 2, 1]
    } else {
        [0, 1, 2, 0, 2, 3]
    };

    out.extend(order.iter().map(|&c| Vertex::new(corners[c], normal, color)));
}

/// Mesh a chunk with a throwaway mesher
pub fn mesh_chunk<L: VoxelLookup + ?Sized>(chunk: &Chunk, neighbors: &L) -> Vec<Vertex> {
    GreedyMesher::new().mesh(chunk, neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainGenerator;
    use crate::voxel::chunk::ChunkCoord;
    use crate::voxel::voxel::Voxel;

    /// (normal xyz, solid voxel xyz) for one unit face
    type FaceKey = [i32; 6];

    fn chunk_with(coord: ChunkCoord, cells: &[(i32, i32, i32, Material)]) -> Chunk {
        let mut chunk = Chunk::empty(coord);
        for &(x, y, z, m) in cells {
            chunk.set(x, y, z, Voxel::new(m));
        }
        chunk
    }

    fn quad_count(vertices: &[Vertex]) -> usize {
        assert_eq!(vertices.len() % 6, 0);
        vertices.len() / 6
    }

    fn triangle_area(vertices: &[Vertex]) -> f32 {
        vertices
            .chunks_exact(3)
            .map(|t| {
                let (a, b, c) = (t[0].position(), t[1].position(), t[2].position());
                (b - a).cross(c - a).length() * 0.5
            })
            .sum()
    }

    /// Unit faces covered by the greedy quads, expanded back to voxel faces
    fn covered_faces(vertices: &[Vertex]) -> Vec<FaceKey> {
        let mut keys = Vec::new();
        for quad in vertices.chunks_exact(6) {
            let normal = quad[0].normal().as_ivec3();
            let axis = (0..3).find(|&a| normal[a] != 0).unwrap();
            let (u, v) = plane_axes(axis);
            let min = quad.iter().fold(Vec3::splat(f32::MAX), |m, q| m.min(q.position()));
            let max = quad.iter().fold(Vec3::splat(f32::MIN), |m, q| m.max(q.position()));
            let plane = min[axis] as i32;
            let w = if normal[axis] > 0 { plane - 1 } else { plane };
            for a in min[u] as i32..max[u] as i32 {
                for b in min[v] as i32..max[v] as i32 {
                    let mut cell = IVec3::ZERO;
                    cell[axis] = w;
                    cell[u] = a;
                    cell[v] = b;
                    keys.push([normal.x, normal.y, normal.z, cell.x, cell.y, cell.z]);
                }
            }
        }
        keys.sort();
        keys
    }

    /// One entry per exposed voxel face, computed voxel by voxel
    fn naive_faces<L: VoxelLookup>(chunk: &Chunk, neighbors: &L) -> Vec<FaceKey> {
        let origin = chunk.coord.voxel_origin();
        let mut keys = Vec::new();
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_HEIGHT {
                for z in 0..CHUNK_SIZE {
                    if !chunk.get(x, y, z).is_solid() {
                        continue;
                    }
                    for face in Face::ALL {
                        let n = face.normal();
                        let q = IVec3::new(x, y, z) + n;
                        let hidden = if q.y < 0 {
                            true
                        } else if q.y >= CHUNK_HEIGHT {
                            false
                        } else if Chunk::in_bounds(q.x, q.y, q.z) {
                            chunk.get(q.x, q.y, q.z).is_solid()
                        } else {
                            let wq = origin + q;
                            neighbors.is_solid_at(wq.x, wq.y, wq.z)
                        };
                        if !hidden {
                            let p = origin + IVec3::new(x, y, z);
                            keys.push([n.x, n.y, n.z, p.x, p.y, p.z]);
                        }
                    }
                }
            }
        }
        keys.sort();
        keys
    }

    fn assert_outward_winding(vertices: &[Vertex]) {
        for t in vertices.chunks_exact(3) {
            let (a, b, c) = (t[0].position(), t[1].position(), t[2].position());
            let geometric = (b - a).cross(c - a);
            assert!(
                geometric.dot(t[0].normal()) > 0.0,
                "triangle {:?} {:?} {:?} faces away from {:?}",
                a,
                b,
                c,
                t[0].normal()
            );
        }
    }

    #[test]
    fn test_single_voxel() {
        let chunk = chunk_with(ChunkCoord::new(0, 0), &[(8, 30, 8, Material::Stone)]);
        let vertices = mesh_chunk(&chunk, &NoNeighbors);
        assert_eq!(quad_count(&vertices), 6);
        assert!((triangle_area(&vertices) - 6.0).abs() < 1e-4);
        assert_eq!(covered_faces(&vertices), naive_faces(&chunk, &NoNeighbors));
        assert_outward_winding(&vertices);
    }

    #[test]
    fn test_slab_merges_faces() {
        let chunk = chunk_with(
            ChunkCoord::new(0, 0),
            &[(3, 10, 3, Material::Dirt), (4, 10, 3, Material::Dirt)],
        );
        let naive = naive_faces(&chunk, &NoNeighbors);
        assert_eq!(naive.len(), 10);

        let vertices = mesh_chunk(&chunk, &NoNeighbors);
        assert_eq!(quad_count(&vertices), 6);
        assert!((triangle_area(&vertices) - 10.0).abs() < 1e-4);
        assert_eq!(covered_faces(&vertices), naive);
    }

    #[test]
    fn test_materials_do_not_merge() {
        let chunk = chunk_with(
            ChunkCoord::new(0, 0),
            &[(3, 10, 3, Material::Dirt), (4, 10, 3, Material::Grass)],
        );
        let vertices = mesh_chunk(&chunk, &NoNeighbors);
        assert_eq!(quad_count(&vertices), 10);
        assert_eq!(covered_faces(&vertices), naive_faces(&chunk, &NoNeighbors));
    }

    #[test]
    fn test_flat_layer_is_five_quads() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                for y in 0..4 {
                    chunk.set(x, y, z, Voxel::new(Material::Stone));
                }
            }
        }
        let mut mesher = GreedyMesher::new();
        let vertices = mesher.mesh(&chunk, &NoNeighbors);
        // One top quad, four sides, bottom suppressed at the floor
        assert_eq!(mesher.last_quad_count(), 5);
        assert_eq!(quad_count(&vertices), 5);
        assert!((triangle_area(&vertices) - (256.0 + 4.0 * 64.0)).abs() < 1e-3);
        assert_outward_winding(&vertices);
    }

    #[test]
    fn test_floor_faces_suppressed() {
        let chunk = chunk_with(ChunkCoord::new(0, 0), &[(5, 0, 5, Material::Stone)]);
        let vertices = mesh_chunk(&chunk, &NoNeighbors);
        assert_eq!(quad_count(&vertices), 5);
        assert!(vertices.iter().all(|v| v.normal() != -Vec3::Y));
    }

    #[test]
    fn test_top_of_world_is_exposed() {
        let chunk = chunk_with(ChunkCoord::new(0, 0), &[(5, CHUNK_HEIGHT - 1, 5, Material::Snow)]);
        let vertices = mesh_chunk(&chunk, &NoNeighbors);
        assert_eq!(quad_count(&vertices), 6);
        assert!(vertices.iter().any(|v| v.normal() == Vec3::Y));
    }

    struct SolidPlaneAtX(i32);

    impl VoxelLookup for SolidPlaneAtX {
        fn is_solid_at(&self, x: i32, _y: i32, _z: i32) -> bool {
            x == self.0
        }
    }

    #[test]
    fn test_border_faces_query_neighbors() {
        let coord = ChunkCoord::new(-1, 2);
        let chunk = chunk_with(coord, &[(15, 20, 0, Material::Stone)]);
        // Voxel (15, 20, 0) of chunk (-1, 2) is world (-1, 20, 32); its +X
        // neighbour is world x = 0
        let vertices = mesh_chunk(&chunk, &SolidPlaneAtX(0));
        assert_eq!(quad_count(&vertices), 5);
        assert!(vertices.iter().all(|v| v.normal() != Vec3::X));

        let open = mesh_chunk(&chunk, &NoNeighbors);
        assert_eq!(quad_count(&open), 6);
    }

    #[test]
    fn test_vertices_in_world_space() {
        let coord = ChunkCoord::new(-1, 2);
        let chunk = chunk_with(coord, &[(0, 5, 0, Material::Stone)]);
        let vertices = mesh_chunk(&chunk, &NoNeighbors);
        let min = vertices.iter().fold(Vec3::splat(f32::MAX), |m, v| m.min(v.position()));
        let max = vertices.iter().fold(Vec3::splat(f32::MIN), |m, v| m.max(v.position()));
        assert_eq!(min, Vec3::new(-16.0, 5.0, 32.0));
        assert_eq!(max, Vec3::new(-15.0, 6.0, 33.0));
    }

    #[test]
    fn test_water_neither_meshed_nor_occluding() {
        let chunk = chunk_with(
            ChunkCoord::new(0, 0),
            &[(2, 5, 2, Material::Sand), (2, 6, 2, Material::Water)],
        );
        let vertices = mesh_chunk(&chunk, &NoNeighbors);
        assert_eq!(quad_count(&vertices), 6);
        let top: Vec<_> = vertices.iter().filter(|v| v.normal() == Vec3::Y).collect();
        assert_eq!(top.len(), 6);
        assert!(top.iter().all(|v| v.position[1] == 6.0));
        assert_eq!(top[0].color, [0.9, 0.8, 0.5]);
    }

    #[test]
    fn test_side_and_bottom_shading() {
        let chunk = chunk_with(ChunkCoord::new(0, 0), &[(2, 5, 2, Material::Stone)]);
        let vertices = mesh_chunk(&chunk, &NoNeighbors);
        for v in &vertices {
            let expected = if v.normal() == Vec3::Y {
                0.5
            } else if v.normal() == -Vec3::Y {
                0.5 * 0.7
            } else {
                0.5 * 0.85
            };
            assert!((v.color[0] - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_chunk_has_no_vertices() {
        let chunk = Chunk::empty(ChunkCoord::new(3, 3));
        assert!(mesh_chunk(&chunk, &NoNeighbors).is_empty());
    }

    #[test]
    fn test_generated_terrain_coverage_matches_naive() {
        let generator = TerrainGenerator::default();
        for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(-5, 3)] {
            let chunk = generator.generate(coord);
            let vertices = mesh_chunk(&chunk, &NoNeighbors);
            let naive = naive_faces(&chunk, &NoNeighbors);
            assert!(quad_count(&vertices) < naive.len());
            assert_eq!(covered_faces(&vertices), naive);
            assert_outward_winding(&vertices);
        }
    }

    #[test]
    fn test_mesher_reuse_is_stable() {
        let chunk = TerrainGenerator::default().generate(ChunkCoord::new(1, 1));
        let mut mesher = GreedyMesher::new();
        let a = mesher.mesh(&chunk, &NoNeighbors);
        let b = mesher.mesh(&chunk, &NoNeighbors);
        assert_eq!(a, b);
    }
}
