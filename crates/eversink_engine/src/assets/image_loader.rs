//! Image loading utilities for texture data
//!
//! Decodes PNG and JPEG files with the `image` crate into tightly packed 8-bit
//! pixels, flipped so the first row is the bottom of the image (OpenGL's
//! texture origin).

use std::path::Path;

use crate::assets::AssetError;

/// Upload layout derived from the decoded channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Single channel, uploaded as RED
    Red,
    /// Three channels
    Rgb,
    /// Four channels
    Rgba,
}

impl PixelFormat {
    /// Map a channel count to an upload format.
    ///
    /// 1/3/4 map to RED/RGB/RGBA; anything else falls back to RGB.
    pub const fn from_channels(channels: u8) -> Self {
        match channels {
            1 => Self::Red,
            4 => Self::Rgba,
            _ => Self::Rgb,
        }
    }

    /// Bytes per pixel
    pub const fn channels(self) -> u8 {
        match self {
            Self::Red => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw pixel data, rows bottom to top
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels in `data`
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        log::debug!("Loading image from: {:?}", path_ref);

        if !path_ref.is_file() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path_ref.display(), e)))?;

        Ok(Self::from_dynamic(img.flipv()))
    }

    /// Decode an in-memory image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("in-memory image: {}", e)))?;

        Ok(Self::from_dynamic(img.flipv()))
    }

    fn from_dynamic(img: image::DynamicImage) -> Self {
        use image::DynamicImage;

        let (width, height) = (img.width(), img.height());
        let (data, channels) = match img {
            DynamicImage::ImageLuma8(buf) => (buf.into_raw(), 1),
            DynamicImage::ImageRgb8(buf) => (buf.into_raw(), 3),
            DynamicImage::ImageRgba8(buf) => (buf.into_raw(), 4),
            other if other.color().has_alpha() => (other.to_rgba8().into_raw(), 4),
            other => (other.to_rgb8().into_raw(), 3),
        };

        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// Create a solid color RGBA image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        Self {
            data: color.repeat(pixel_count),
            width,
            height,
            channels: 4,
        }
    }

    /// Upload format for this image
    pub const fn format(&self) -> PixelFormat {
        PixelFormat::from_channels(self.channels)
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
        assert_eq!(img.format(), PixelFormat::Rgba);
    }

    #[test]
    fn test_channel_mapping() {
        assert_eq!(PixelFormat::from_channels(1), PixelFormat::Red);
        assert_eq!(PixelFormat::from_channels(3), PixelFormat::Rgb);
        assert_eq!(PixelFormat::from_channels(4), PixelFormat::Rgba);
        assert_eq!(PixelFormat::from_channels(2), PixelFormat::Rgb);
    }

    #[test]
    fn test_grayscale_png_keeps_one_channel() {
        let mut png = Vec::new();
        let gray = image::GrayImage::from_raw(2, 1, vec![10, 200]).unwrap();
        image::DynamicImage::ImageLuma8(gray)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let img = ImageData::from_bytes(&png).unwrap();
        assert_eq!(img.channels, 1);
        assert_eq!(img.format(), PixelFormat::Red);
        assert_eq!(img.data, vec![10, 200]);
    }

    #[test]
    fn test_rows_are_flipped() {
        let mut png = Vec::new();
        let rgb = image::RgbImage::from_raw(1, 2, vec![255, 0, 0, 0, 0, 255]).unwrap();
        image::DynamicImage::ImageRgb8(rgb)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let img = ImageData::from_bytes(&png).unwrap();
        assert_eq!(img.channels, 3);
        assert_eq!(img.data, vec![0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ImageData::from_file("./res/definitely-missing.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(ref p) if p.ends_with("definitely-missing.png")));
    }

    #[test]
    fn test_undecodable_file_is_load_failure() {
        let path = std::env::temp_dir().join(format!("eversink_not_an_image_{}.png", std::process::id()));
        std::fs::write(&path, b"plain text").unwrap();

        let err = ImageData::from_file(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, AssetError::LoadFailed(_)));
    }
}
