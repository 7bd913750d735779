//! Cube geometry for the lit-cube scenes
//!
//! A cube is six independent quads so that every face can carry its own flat
//! normal and a full `[0, 1]` texture square. That gives 24 vertices and 36
//! indices (two counter-clockwise triangles per face).
//!
//! # Coordinate System
//! Right-handed, Y-up. Geometry is generated centered at the origin; world
//! placement is applied only through the model matrix at draw time.
//!
//! # Vertex Layout
//! `CubeVertex` is `#[repr(C)]` and maps to attribute locations:
//!
//! | location | field       | components |
//! |----------|-------------|------------|
//! | 0        | `position`  | 3          |
//! | 1        | `color`     | 3          |
//! | 2        | `normal`    | 3          |
//! | 3        | `tex_coord` | 2          |

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Rgb, Vec3};

/// Vertices per cube (4 per face)
pub const CUBE_VERTEX_COUNT: usize = 24;
/// Indices per cube (6 per face)
pub const CUBE_INDEX_COUNT: usize = 36;

/// Interleaved cube vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    /// Object-space position
    pub position: [f32; 3],
    /// Per-vertex base color
    pub color: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl CubeVertex {
    /// Attribute locations and component counts, in field order
    pub const ATTRIBUTES: [(u32, i32, usize); 4] = [
        (0, 3, std::mem::offset_of!(CubeVertex, position)),
        (1, 3, std::mem::offset_of!(CubeVertex, color)),
        (2, 3, std::mem::offset_of!(CubeVertex, normal)),
        (3, 2, std::mem::offset_of!(CubeVertex, tex_coord)),
    ];

    /// Byte stride between consecutive vertices
    pub const STRIDE: i32 = std::mem::size_of::<CubeVertex>() as i32;
}

/// Cube face identifiers in generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    /// +Z
    Front,
    /// -Z
    Back,
    /// -X
    Left,
    /// +X
    Right,
    /// +Y
    Top,
    /// -Y
    Bottom,
}

impl CubeFace {
    /// All faces in vertex-buffer order
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Right,
        CubeFace::Top,
        CubeFace::Bottom,
    ];

    /// Outward unit normal
    pub const fn normal(self) -> [f32; 3] {
        match self {
            CubeFace::Front => [0.0, 0.0, 1.0],
            CubeFace::Back => [0.0, 0.0, -1.0],
            CubeFace::Left => [-1.0, 0.0, 0.0],
            CubeFace::Right => [1.0, 0.0, 0.0],
            CubeFace::Top => [0.0, 1.0, 0.0],
            CubeFace::Bottom => [0.0, -1.0, 0.0],
        }
    }

    // Corner indices into the 8 box corners, counter-clockwise seen from outside.
    const fn corners(self) -> [usize; 4] {
        match self {
            CubeFace::Front => [0, 1, 2, 3],
            CubeFace::Back => [5, 4, 7, 6],
            CubeFace::Left => [4, 0, 3, 7],
            CubeFace::Right => [1, 5, 6, 2],
            CubeFace::Top => [3, 2, 6, 7],
            CubeFace::Bottom => [4, 5, 1, 0],
        }
    }
}

const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// CPU-side cube geometry ready for upload
#[derive(Debug, Clone)]
pub struct CubeGeometry {
    /// 24 interleaved vertices
    pub vertices: Vec<CubeVertex>,
    /// 36 triangle indices
    pub indices: Vec<u32>,
}

impl CubeGeometry {
    /// Generate an origin-centered box with extents `size` and a uniform color
    pub fn new(size: Vec3, color: Rgb) -> Self {
        let h = size * 0.5;
        let corners = [
            [-h.x, -h.y, h.z],
            [h.x, -h.y, h.z],
            [h.x, h.y, h.z],
            [-h.x, h.y, h.z],
            [-h.x, -h.y, -h.z],
            [h.x, -h.y, -h.z],
            [h.x, h.y, -h.z],
            [-h.x, h.y, -h.z],
        ];

        let vertices = CubeFace::ALL
            .iter()
            .flat_map(|face| {
                let normal = face.normal();
                face.corners()
                    .into_iter()
                    .zip(FACE_UVS)
                    .map(move |(corner, tex_coord)| CubeVertex {
                        position: corners[corner],
                        color,
                        normal,
                        tex_coord,
                    })
            })
            .collect();

        Self {
            vertices,
            indices: Self::indices(),
        }
    }

    /// Two triangles per face: `(0, 1, 2)` and `(2, 3, 0)` offset by `4 * face`
    pub fn indices() -> Vec<u32> {
        (0..6u32)
            .flat_map(|face| {
                let base = face * 4;
                [base, base + 1, base + 2, base + 2, base + 3, base]
            })
            .collect()
    }

    /// The four vertices belonging to `face`
    pub fn face(&self, face: CubeFace) -> &[CubeVertex] {
        let start = face as usize * 4;
        &self.vertices[start..start + 4]
    }
}

impl Default for CubeGeometry {
    fn default() -> Self {
        Self::new(Vec3::new(1.0, 1.0, 1.0), [1.0, 1.0, 1.0])
    }
}
