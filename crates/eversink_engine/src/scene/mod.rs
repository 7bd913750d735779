//! Scene management
//!
//! A scene is a flat list of cubes plus the lighting environment that shades
//! them. Each cube owns its GPU buffers and refers to programs and textures in
//! an [`AssetRegistry`](crate::assets::AssetRegistry) by key.

mod cube;
mod gpu_mesh;
mod scene_renderer;

pub use cube::{Cube, FrameContext};
pub use gpu_mesh::GpuMesh;
pub use scene_renderer::Scene;
