//! Backend implementations for the render module
//!
//! `opengl` drives a real GL 3.3 core context through `glow`; `recording`
//! captures calls in memory so scenes can be verified without a GPU.

pub mod opengl;
pub mod recording;

pub use opengl::GlBackend;
pub use recording::{DrawRecord, RecordedCall, RecordingBackend};
