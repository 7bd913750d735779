//! 2D textures
//!
//! A texture object is always created, even when its image fails to decode;
//! it then samples as the driver's default (black) and a message is logged.

use std::path::Path;
use std::rc::Rc;

use crate::assets::ImageData;
use crate::render::backend::{BackendResult, RenderBackend, SamplerParams, TextureHandle};

/// Owned 2D texture
///
/// Releases its GPU object on drop.
pub struct Texture {
    backend: Rc<dyn RenderBackend>,
    handle: TextureHandle,
    size: Option<(u32, u32)>,
}

impl Texture {
    /// Create a texture from an image file.
    ///
    /// Decode failures are logged and leave the texture without image data.
    pub fn from_file(
        backend: Rc<dyn RenderBackend>,
        path: impl AsRef<Path>,
        sampler: SamplerParams,
    ) -> BackendResult<Self> {
        let path = path.as_ref();
        let mut texture = Self::empty(backend, sampler)?;

        match ImageData::from_file(path) {
            Ok(image) => {
                texture.upload(&image);
                log::info!(
                    "Loaded texture: {} ({}x{}, {} channels)",
                    path.display(),
                    image.width,
                    image.height,
                    image.channels
                );
            }
            Err(e) => log::error!("Failed to load texture {}: {}", path.display(), e),
        }

        Ok(texture)
    }

    /// Create a texture from decoded pixels
    pub fn from_image(
        backend: Rc<dyn RenderBackend>,
        image: &ImageData,
        sampler: SamplerParams,
    ) -> BackendResult<Self> {
        let mut texture = Self::empty(backend, sampler)?;
        texture.upload(image);
        Ok(texture)
    }

    fn empty(backend: Rc<dyn RenderBackend>, sampler: SamplerParams) -> BackendResult<Self> {
        let handle = backend.create_texture(sampler)?;
        Ok(Self {
            backend,
            handle,
            size: None,
        })
    }

    fn upload(&mut self, image: &ImageData) {
        self.backend.upload_texture(self.handle, image);
        self.size = Some((image.width, image.height));
    }

    /// Bind to texture unit `unit`
    pub fn bind(&self, unit: u32) {
        self.backend.bind_texture(unit, self.handle);
    }

    /// Backend texture id
    pub const fn handle(&self) -> TextureHandle {
        self.handle
    }

    /// True once pixel data has been uploaded
    pub const fn has_image(&self) -> bool {
        self.size.is_some()
    }

    /// Uploaded dimensions
    pub const fn size(&self) -> Option<(u32, u32)> {
        self.size
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.backend.delete_texture(self.handle);
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("handle", &self.handle)
            .field("size", &self.size)
            .finish()
    }
}
