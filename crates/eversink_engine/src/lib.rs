//! # Eversink Engine
//!
//! Camera, lighting and material core for small OpenGL lit-scene demos.
//!
//! ## Features
//!
//! - **FPS camera**: yaw/pitch mouse look, scroll zoom, frame-time movement
//! - **Lights**: directional, point and spot lights flattened to shader uniforms
//! - **Materials**: PBR and Phong preset catalogs with alpha-driven draw order
//! - **Backends**: OpenGL 3.3 core through `glow`, plus a recording backend
//!   for GPU-less tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use eversink_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let config = EngineConfig::default();
//!     let mut window = Window::new(&config.window)?;
//!     let backend: Rc<dyn RenderBackend> = Rc::new(GlBackend::new(window.load_gl()?));
//!
//!     let mut registry = AssetRegistry::new();
//!     let program = registry.add_program(ShaderProgram::from_files(
//!         backend.clone(),
//!         &config.shaders.vertex_path,
//!         &config.shaders.fragment_path,
//!     ));
//!
//!     let mut scene = Scene::new();
//!     scene.lighting.add_light(Light::default_directional());
//!     scene.add_cube(
//!         Cube::new(backend.clone(), Vec3::zeros(), Vec3::repeat(1.0), [1.0; 3], program)?
//!             .with_material(pbr::GOLD),
//!     );
//!
//!     let camera = Camera::from_config(&config.camera, window.aspect_ratio());
//!     let mut app = AppState::new(camera, scene);
//!     let mut sampler = InputSampler::new();
//!     let mut timer = FrameTimer::new();
//!
//!     while app.running && !window.should_close() {
//!         let dt = timer.tick();
//!         let input = sampler.sample(&window.sample());
//!         app.handle_input(&input, dt);
//!         app.update();
//!         app.render(backend.as_ref(), &registry);
//!         window.swap_buffers();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod assets;
pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;

mod application;
mod engine;

pub use application::AppState;
pub use crate::core::config::EngineConfig;
pub use engine::EngineError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetRegistry, ImageData, ProgramId, TextureId},
        config::Config,
        foundation::{
            math::{Mat4, Mat4Ext, Vec3},
            time::FrameTimer,
        },
        input::{FrameInput, InputSampler},
        render::{
            backends::GlBackend, pbr, phong, Attenuation, Camera, Light, LightColors,
            LightingEnvironment, Material, RenderBackend, SamplerParams, ShaderProgram, SpotCone,
            Texture, Window,
        },
        scene::{Cube, Scene},
        AppState, EngineConfig, EngineError,
    };
}
