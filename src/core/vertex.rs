//! GPU-facing face geometry.
//!
//! Faces are stored in chunk-local integer coordinates so the per-vertex
//! position fits in a byte; the renderer applies the owning chunk's origin
//! as a translation at draw time.

use bytemuck::{Pod, Zeroable};

use crate::core::block::FaceDir;

/// One vertex of an emitted quad. Tightly packed for direct buffer upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct FaceVertex {
    /// Chunk-local position, each component in `0..=16`.
    pub position: [u8; 3],
    /// Unit normal of the face.
    pub normal: [i8; 3],
    pub uv: [u8; 2],
    /// Packed block value with the resolved face-direction bits, used by the
    /// shading stage to pick a texture sub-region.
    pub data: u16,
}

/// A voxel face as two triangles (6 vertices, no index buffer).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct FaceQuad {
    pub vertices: [FaceVertex; 6],
}

impl FaceQuad {
    pub const VERTEX_COUNT: usize = 6;

    /// Build the quad for `face` of the voxel at chunk-local `(x, y, z)`.
    pub fn emit(face: FaceDir, x: u8, y: u8, z: u8, data: u16) -> Self {
        let (x1, y1, z1) = (x + 1, y + 1, z + 1);
        match face {
            FaceDir::Top => {
                Self::from_corners([[x, y1, z1], [x1, y1, z1], [x1, y1, z], [x, y1, z]], [0, 1, 0], data)
            }
            FaceDir::Bottom => {
                Self::from_corners([[x, y, z], [x1, y, z], [x1, y, z1], [x, y, z1]], [0, -1, 0], data)
            }
            FaceDir::Front => {
                Self::from_corners([[x, y, z1], [x1, y, z1], [x1, y1, z1], [x, y1, z1]], [0, 0, 1], data)
            }
            FaceDir::Back => {
                Self::from_corners([[x1, y, z], [x, y, z], [x, y1, z], [x1, y1, z]], [0, 0, -1], data)
            }
            FaceDir::Left => {
                Self::from_corners([[x, y, z], [x, y, z1], [x, y1, z1], [x, y1, z]], [-1, 0, 0], data)
            }
            FaceDir::Right => {
                Self::from_corners([[x1, y, z1], [x1, y, z], [x1, y1, z], [x1, y1, z1]], [1, 0, 0], data)
            }
        }
    }

    /// Two counter-clockwise triangles over the corner ring `c0 c1 c2 c3`.
    fn from_corners(corners: [[u8; 3]; 4], normal: [i8; 3], data: u16) -> Self {
        const UVS: [[u8; 2]; 4] = [[1, 1], [0, 1], [0, 0], [1, 0]];
        let v = |i: usize| FaceVertex {
            position: corners[i],
            normal,
            uv: UVS[i],
            data,
        };
        FaceQuad {
            vertices: [v(0), v(1), v(2), v(2), v(3), v(0)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::Block;

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<FaceVertex>(), 10);
        assert_eq!(std::mem::size_of::<FaceQuad>(), 60);
    }

    #[test]
    fn normals_match_face_direction() {
        for face in FaceDir::ALL {
            let quad = FaceQuad::emit(face, 3, 7, 11, 0);
            let d = face.delta();
            for v in quad.vertices {
                assert_eq!([d.x as i8, d.y as i8, d.z as i8], v.normal);
            }
        }
    }

    #[test]
    fn data_word_reaches_every_vertex() {
        let data = Block::STONE_SNOW.with_face(FaceDir::Right);
        let quad = FaceQuad::emit(FaceDir::Right, 0, 0, 0, data);
        assert!(quad.vertices.iter().all(|v| v.data == data));
    }

    #[test]
    fn top_face_lies_in_upper_plane() {
        let quad = FaceQuad::emit(FaceDir::Top, 2, 5, 9, 0);
        assert!(quad.vertices.iter().all(|v| v.position[1] == 6));
    }
}
