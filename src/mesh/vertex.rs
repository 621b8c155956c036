//! Vertex stream types handed to the rendering backend

use bytemuck::{Pod, Zeroable};

use crate::core::types::{IVec3, Vec3};
use crate::voxel::voxel::Material;

/// One mesh vertex in world space. Nine tightly packed floats.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    /// Floats per vertex in the flat stream
    pub const FLOATS: usize = 9;

    pub fn new(position: Vec3, normal: Vec3, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color: color.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// One of the six axis-aligned face orientations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Face {
    /// 0 = X, 1 = Y, 2 = Z
    pub axis: usize,
    /// +1 or -1
    pub direction: i32,
}

impl Face {
    /// Meshing pass order: +X, -X, +Y, -Y, +Z, -Z
    pub const ALL: [Face; 6] = [
        Face { axis: 0, direction: 1 },
        Face { axis: 0, direction: -1 },
        Face { axis: 1, direction: 1 },
        Face { axis: 1, direction: -1 },
        Face { axis: 2, direction: 1 },
        Face { axis: 2, direction: -1 },
    ];

    /// Outward unit normal
    pub fn normal(&self) -> IVec3 {
        let mut n = IVec3::ZERO;
        n[self.axis] = self.direction;
        n
    }

    /// Brightness multiplier: full on top, darkest underneath
    pub fn shade(&self) -> f32 {
        match (self.axis, self.direction > 0) {
            (1, true) => 1.0,
            (1, false) => 0.7,
            _ => 0.85,
        }
    }

    /// Material color as seen on this face
    pub fn shaded_color(&self, material: Material) -> Vec3 {
        material.color() * self.shade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), Vertex::FLOATS * 4);
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, Vec3::new(0.5, 0.6, 0.7));
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.5, 0.6, 0.7]);
    }

    #[test]
    fn test_face_normals() {
        let normals: Vec<IVec3> = Face::ALL.iter().map(Face::normal).collect();
        assert_eq!(
            normals,
            vec![IVec3::X, -IVec3::X, IVec3::Y, -IVec3::Y, IVec3::Z, -IVec3::Z]
        );
    }

    #[test]
    fn test_face_shading() {
        assert_eq!(Face::ALL[2].shade(), 1.0);
        assert_eq!(Face::ALL[3].shade(), 0.7);
        for i in [0, 1, 4, 5] {
            assert_eq!(Face::ALL[i].shade(), 0.85);
        }
        let top = Face::ALL[2].shaded_color(Material::Grass);
        assert_eq!(top, Vec3::new(0.0, 0.8, 0.0));
    }
}
