//! Core primitive types for rendering
//!
//! The first-person camera and the cube geometry every renderable is built from.

pub mod camera;
pub mod mesh;

pub use camera::{Camera, CameraMovement, MAX_FOV, MIN_FOV};
pub use mesh::{CubeFace, CubeGeometry, CubeVertex, CUBE_INDEX_COUNT, CUBE_VERTEX_COUNT};
