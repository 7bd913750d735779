//! # Engine Configuration
//!
//! Every tunable the demos used to hard-code lives here: window size and title,
//! camera defaults, shader and texture paths, and the optional frame cap.
//!
//! All sections use `#[serde(default)]`, so a config file only needs to name
//! the values it changes.

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// Default config file looked up next to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "eversink.toml";

/// Window and frame-loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in screen coordinates
    pub width: u32,
    /// Window height in screen coordinates
    pub height: u32,
    /// Window title
    pub title: String,
    /// Optional frame cap; the loop sleeps at the end of each frame to hold it
    pub frame_cap_fps: Option<u32>,
    /// Clear color (RGBA)
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Eversink".to_string(),
            frame_cap_fps: None,
            clear_color: [0.1, 0.1, 0.12, 1.0],
        }
    }
}

/// Initial camera pose and input response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position
    pub position: [f32; 3],
    /// Starting yaw in degrees (-90 looks down -Z)
    pub yaw: f32,
    /// Starting pitch in degrees
    pub pitch: f32,
    /// Starting vertical field of view in degrees
    pub fov: f32,
    /// Movement speed in world units per second
    pub speed: f32,
    /// Degrees of rotation per pixel of mouse movement
    pub sensitivity: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]`
    pub pitch_limit: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 3.0],
            yaw: -90.0,
            pitch: 0.0,
            fov: 45.0,
            speed: 2.5,
            sensitivity: 0.1,
            pitch_limit: 89.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Shader source paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Vertex shader source
    pub vertex_path: String,
    /// Fragment shader source
    pub fragment_path: String,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_path: vertex_path.into(),
            fragment_path: fragment_path.into(),
        }
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::new("./shaders/vertex/lit.vs", "./shaders/fragment/multi_light.fs")
    }
}

/// Texture image paths, bound to texture units in list order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Image files under `./res`
    pub paths: Vec<String>,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            paths: vec!["./res/container.jpg".to_string(), "./res/awesomeface.png".to_string()],
        }
    }
}

/// Top-level configuration for the demo binary
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Camera defaults
    pub camera: CameraConfig,
    /// Shader paths
    pub shaders: ShaderConfig,
    /// Texture paths
    pub textures: TextureConfig,
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("eversink-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_toml_round_trip() {
        let path = scratch_path("roundtrip.toml");
        let mut config = EngineConfig::default();
        config.window.title = "Lit cubes".to_string();
        config.window.frame_cap_fps = Some(60);
        config.camera.pitch_limit = 80.0;

        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let path = scratch_path("roundtrip.ron");
        let mut config = EngineConfig::default();
        config.textures.paths = vec!["./res/wall.jpg".to_string()];

        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: EngineConfig = toml::from_str("[camera]\nspeed = 5.0\n").unwrap();
        assert_eq!(config.camera.speed, 5.0);
        assert_eq!(config.camera.yaw, -90.0);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = EngineConfig::default().save_to_file(scratch_path("config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = EngineConfig::load_or_default(scratch_path("does-not-exist.toml"));
        assert_eq!(config, EngineConfig::default());
    }
}
