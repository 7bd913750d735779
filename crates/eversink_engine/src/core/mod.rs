//! Core engine types shared by the library and the demo binary

pub mod config;

pub use config::{CameraConfig, EngineConfig, ShaderConfig, TextureConfig, WindowConfig};
