//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that rendering backends must implement so
//! that cubes, shader programs and textures can be driven without knowing
//! which graphics API sits underneath.
//!
//! # Ownership
//! Handles returned by a backend are plain ids. Whoever receives a handle from
//! a `create_*` call owns it and must return it through the matching `delete_*`
//! call exactly once (see `GpuMesh`, `ShaderProgram` and `Texture`, which do
//! this in `Drop`).
//!
//! # Threading
//! Every method takes `&self`: the backend is shared as `Rc<dyn RenderBackend>`
//! on the single frame thread that owns the GL context.

use thiserror::Error;

use crate::assets::ImageData;
use crate::render::primitives::CubeVertex;
use crate::render::uniforms::UniformValue;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Backend failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// A shader stage failed to compile; carries the driver info log
    #[error("{stage} shader compilation failed: {log}")]
    ShaderCompile {
        /// `"vertex"` or `"fragment"`
        stage: &'static str,
        /// Driver info log
        log: String,
    },

    /// Program linking failed; carries the driver info log
    #[error("Program linking failed: {0}")]
    ProgramLink(String),

    /// A GPU object could not be allocated
    #[error("Failed to create {what}: {reason}")]
    ResourceCreation {
        /// Kind of object, e.g. `"vertex array"`
        what: &'static str,
        /// Backend-provided reason
        reason: String,
    },
}

/// Shader program id; `0` is the null program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

impl ProgramHandle {
    /// The null program; every operation on it is a no-op
    pub const NULL: Self = Self(0);

    /// True for the null program
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Texture object id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Vertex array plus its vertex and index buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshBuffers {
    /// Vertex array object
    pub vao: u32,
    /// Vertex buffer object
    pub vbo: u32,
    /// Element (index) buffer object
    pub ebo: u32,
}

/// Texture wrap mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    /// Tile the image
    Repeat,
    /// Tile with mirroring
    MirroredRepeat,
    /// Stretch edge texels
    ClampToEdge,
}

/// Texture filter mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    /// Nearest texel
    Nearest,
    /// Bilinear
    Linear,
}

/// Sampler state applied when a texture is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerParams {
    /// Wrap mode for S and T
    pub wrap: TextureWrap,
    /// Min and mag filter
    pub filter: TextureFilter,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            wrap: TextureWrap::Repeat,
            filter: TextureFilter::Linear,
        }
    }
}

/// Main rendering backend trait
///
/// Implemented by the OpenGL backend and by the recording backend used in
/// tests. Methods mirror the small slice of GL the demos use.
pub trait RenderBackend {
    /// Compile both stages and link them into a program
    fn create_program(&self, vertex_src: &str, fragment_src: &str) -> BackendResult<ProgramHandle>;

    /// Release a program; the null program is ignored
    fn delete_program(&self, program: ProgramHandle);

    /// Make `program` current
    fn use_program(&self, program: ProgramHandle);

    /// Set a uniform on `program` by name. Unknown names are ignored.
    fn set_uniform(&self, program: ProgramHandle, name: &str, value: &UniformValue);

    /// Allocate a texture object with the given sampler state
    fn create_texture(&self, sampler: SamplerParams) -> BackendResult<TextureHandle>;

    /// Upload pixels to level 0 and generate mipmaps
    fn upload_texture(&self, texture: TextureHandle, image: &ImageData);

    /// Release a texture
    fn delete_texture(&self, texture: TextureHandle);

    /// Bind `texture` to texture unit `unit`
    fn bind_texture(&self, unit: u32, texture: TextureHandle);

    /// Upload interleaved cube vertices and indices
    fn create_mesh(&self, vertices: &[CubeVertex], indices: &[u32]) -> BackendResult<MeshBuffers>;

    /// Release the vertex array and both buffers
    fn delete_mesh(&self, mesh: MeshBuffers);

    /// Issue one indexed triangle draw
    fn draw_indexed(&self, mesh: MeshBuffers, index_count: u32);

    /// Toggle `SRC_ALPHA, ONE_MINUS_SRC_ALPHA` blending
    fn set_blending(&self, enabled: bool);

    /// Toggle depth testing
    fn set_depth_test(&self, enabled: bool);

    /// Clear color and depth
    fn clear(&self, color: [f32; 4]);

    /// Resize the viewport
    fn set_viewport(&self, width: i32, height: i32);
}
