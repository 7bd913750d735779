//! Asset loading and ownership
//!
//! Shader programs and textures are owned here and referenced from renderables
//! through `ProgramId`/`TextureId` keys. The registry is created before any
//! renderable and dropped after all of them, so a renderable never holds a key
//! whose GPU object is gone.

pub mod image_loader;

use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

use crate::render::shader::ShaderProgram;
use crate::render::texture::Texture;

pub use image_loader::{ImageData, PixelFormat};

new_key_type! {
    /// Non-owning handle to a shader program in an [`AssetRegistry`]
    pub struct ProgramId;

    /// Non-owning handle to a texture in an [`AssetRegistry`]
    pub struct TextureId;
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The asset file could not be read or decoded
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// The asset file does not exist
    #[error("Asset not found: {0}")]
    NotFound(String),
}

/// Owner of every shader program and texture used by a scene
#[derive(Default)]
pub struct AssetRegistry {
    programs: SlotMap<ProgramId, ShaderProgram>,
    textures: SlotMap<TextureId, Texture>,
}

impl AssetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a shader program
    pub fn add_program(&mut self, program: ShaderProgram) -> ProgramId {
        self.programs.insert(program)
    }

    /// Take ownership of a texture
    pub fn add_texture(&mut self, texture: Texture) -> TextureId {
        self.textures.insert(texture)
    }

    /// Look up a program
    pub fn program(&self, id: ProgramId) -> Option<&ShaderProgram> {
        self.programs.get(id)
    }

    /// Look up a texture
    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id)
    }

    /// Number of programs held
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Number of textures held
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
