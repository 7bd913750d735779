//! # Rendering System
//!
//! Camera, lights, materials and the per-draw uniform contract, driven
//! through a small [`RenderBackend`] trait.
//!
//! ## Architecture
//!
//! - **Backends**: `GlBackend` issues real OpenGL calls through `glow`;
//!   `RecordingBackend` records calls for tests.
//! - **Resources**: `ShaderProgram` and `Texture` own one GPU object each and
//!   release it on drop.
//! - **Primitives**: the FPS camera and cube geometry.
//! - **Lighting / materials**: descriptors that flatten into uniform sets.
//! - **Render queue**: opaque pass first, blended transparent pass second.

pub mod backend;
pub mod backends;
pub mod lighting;
pub mod material;
pub mod primitives;
pub mod render_queue;
pub mod shader;
pub mod shading;
pub mod texture;
pub mod uniforms;
pub mod window;

pub use backend::{
    BackendError, BackendResult, MeshBuffers, ProgramHandle, RenderBackend, SamplerParams,
    TextureFilter, TextureHandle, TextureWrap,
};
pub use lighting::{
    Attenuation, Light, LightColors, LightKind, LightingEnvironment, SpotCone, MAX_LIGHTS,
};
pub use material::{
    pbr, phong, Material, MaterialModel, PbrMaterial, PhongMaterial, TRANSPARENCY_THRESHOLD,
};
pub use primitives::{Camera, CameraMovement, CubeGeometry, CubeVertex};
pub use render_queue::{DrawPass, RenderQueue, Translucent};
pub use shader::ShaderProgram;
pub use texture::Texture;
pub use uniforms::{UniformSet, UniformValue};
pub use window::{Window, WindowError, WindowResult};
