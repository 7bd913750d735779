//! Scene - the cubes and lights drawn each frame
//!
//! Rendering builds a [`RenderQueue`] over the cubes every frame, so changing
//! a cube's material moves it between passes immediately.

use crate::assets::AssetRegistry;
use crate::render::backend::RenderBackend;
use crate::render::lighting::LightingEnvironment;
use crate::render::material::MaterialModel;
use crate::render::render_queue::{RenderQueue, Translucent};

use super::cube::{Cube, FrameContext};

/// Renderables plus the lights shading them
#[derive(Debug, Default)]
pub struct Scene {
    /// Cubes in submission order
    pub cubes: Vec<Cube>,
    /// Lights applied to every cube
    pub lighting: LightingEnvironment,
}

impl Scene {
    /// Empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cube, returning its index
    pub fn add_cube(&mut self, cube: Cube) -> usize {
        self.cubes.push(cube);
        self.cubes.len() - 1
    }

    /// Material parameterization shared by every cube, `None` when mixed or empty
    pub fn material_model(&self) -> Option<MaterialModel> {
        let mut models = self.cubes.iter().map(|c| c.material().model());
        let first = models.next()?;
        models.all(|m| m == first).then_some(first)
    }

    /// Draw order for the current materials
    pub fn render_queue(&self) -> RenderQueue {
        RenderQueue::from_items(&self.cubes)
    }

    /// Number of cubes drawn in the blended pass
    pub fn transparent_count(&self) -> usize {
        self.cubes.iter().filter(|c| c.is_transparent()).count()
    }

    /// Flip the texture toggle on every cube
    pub fn toggle_textures(&mut self) {
        for cube in &mut self.cubes {
            cube.toggle_textures();
        }
    }

    /// Draw every cube: opaque pass first, then the blended transparent pass
    pub fn render(&self, backend: &dyn RenderBackend, registry: &AssetRegistry, frame: &FrameContext) {
        if self.cubes.len() > 1 && self.material_model().is_none() {
            log::warn!("Scene mixes PBR and Phong materials; one shader cannot shade both");
        }

        self.render_queue().execute(backend, |index| {
            self.cubes[index].draw(registry, frame, &self.lighting);
        });
    }
}
