//! Textured, lit cube renderable

use std::rc::Rc;

use crate::assets::{AssetRegistry, ProgramId, TextureId};
use crate::foundation::math::{Mat4, Mat4Ext, Rgb, Vec3};
use crate::render::backend::{BackendResult, RenderBackend};
use crate::render::lighting::LightingEnvironment;
use crate::render::material::Material;
use crate::render::primitives::CubeGeometry;
use crate::render::render_queue::Translucent;
use crate::render::uniforms::UniformValue;

use super::gpu_mesh::GpuMesh;

/// Camera matrices shared by every draw in a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// World to view
    pub view: Mat4,
    /// View to clip
    pub projection: Mat4,
    /// Camera position for specular terms
    pub view_pos: Vec3,
}

/// Axis-aligned box drawn with one program, optional textures and a material
///
/// Geometry is generated once around the origin and uploaded at
/// construction. `position` is applied as the model translation each draw.
#[derive(Debug)]
pub struct Cube {
    /// World-space center
    pub position: Vec3,
    size: Vec3,
    program: ProgramId,
    textures: Vec<TextureId>,
    material: Material,
    show_textures: bool,
    mesh: GpuMesh,
}

impl Cube {
    /// Generate and upload a cube of `size` with a uniform vertex color
    pub fn new(
        backend: Rc<dyn RenderBackend>,
        position: Vec3,
        size: Vec3,
        color: Rgb,
        program: ProgramId,
    ) -> BackendResult<Self> {
        let geometry = CubeGeometry::new(size, color);
        let mesh = GpuMesh::upload(backend, &geometry.vertices, &geometry.indices)?;
        Ok(Self {
            position,
            size,
            program,
            textures: Vec::new(),
            material: Material::default(),
            show_textures: true,
            mesh,
        })
    }

    /// Sample these textures, bound to units 0, 1, ... in order
    pub fn with_textures(mut self, textures: Vec<TextureId>) -> Self {
        self.textures = textures;
        self
    }

    /// Use `material` instead of the default
    pub fn with_material(mut self, material: impl Into<Material>) -> Self {
        self.material = material.into();
        self
    }

    /// Initial state of the texture toggle
    pub fn with_show_textures(mut self, show: bool) -> Self {
        self.show_textures = show;
        self
    }

    /// Flip between textured and vertex-colored shading
    pub fn toggle_textures(&mut self) {
        self.show_textures = !self.show_textures;
    }

    /// Current material
    pub const fn material(&self) -> &Material {
        &self.material
    }

    /// Replace the material
    pub fn set_material(&mut self, material: impl Into<Material>) {
        self.material = material.into();
    }

    /// Edge lengths
    pub const fn size(&self) -> Vec3 {
        self.size
    }

    /// Program used to draw
    pub const fn program(&self) -> ProgramId {
        self.program
    }

    /// Whether textures are currently sampled
    pub fn uses_textures(&self) -> bool {
        !self.textures.is_empty() && self.show_textures
    }

    /// Model matrix for the current position
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    /// GPU geometry
    pub const fn mesh(&self) -> &GpuMesh {
        &self.mesh
    }

    /// Bind program, upload the full uniform contract and issue one draw
    ///
    /// A missing or failed program skips the draw entirely.
    pub fn draw(&self, registry: &AssetRegistry, frame: &FrameContext, lighting: &LightingEnvironment) {
        let Some(program) = registry.program(self.program).filter(|p| p.is_valid()) else {
            log::trace!("Skipping cube at {:?}: no usable program", self.position);
            return;
        };

        program.bind();
        program.set("model", UniformValue::Mat4(self.model_matrix()));
        program.set("view", UniformValue::Mat4(frame.view));
        program.set("projection", UniformValue::Mat4(frame.projection));
        program.set("viewPos", UniformValue::Vec3(frame.view_pos));

        program.apply(&lighting.uniforms());
        program.apply(&self.material.uniforms());

        let textured = self.uses_textures();
        program.set("useTextures", UniformValue::Bool(textured));
        for (unit, id) in self.textures.iter().enumerate() {
            match registry.texture(*id) {
                Some(texture) => texture.bind(unit as u32),
                None => log::warn!("Cube texture slot {} refers to a released texture", unit),
            }
            program.set(&format!("texture{unit}"), UniformValue::Int(unit as i32));
        }
        program.set("colorAlpha", UniformValue::Float(if textured { 0.0 } else { 1.0 }));

        self.mesh.draw();
    }
}

impl Translucent for Cube {
    fn is_transparent(&self) -> bool {
        self.material.is_transparent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::{RecordedCall, RecordingBackend};
    use crate::render::material::pbr;
    use crate::assets::ImageData;
    use crate::render::primitives::{CUBE_INDEX_COUNT, CUBE_VERTEX_COUNT};
    use crate::render::shader::ShaderProgram;
    use crate::render::texture::Texture;

    fn frame() -> FrameContext {
        FrameContext {
            view: Mat4::identity(),
            projection: Mat4::identity(),
            view_pos: Vec3::new(0.0, 0.0, 3.0),
        }
    }

    fn setup() -> (Rc<RecordingBackend>, AssetRegistry, ProgramId) {
        let backend = Rc::new(RecordingBackend::new());
        let mut registry = AssetRegistry::new();
        let program = registry.add_program(ShaderProgram::from_source(backend.clone(), "vs", "fs", "test"));
        (backend, registry, program)
    }

    #[test]
    fn test_construction_uploads_full_cube() {
        let (backend, _registry, program) = setup();
        let _cube = Cube::new(backend.clone(), Vec3::zeros(), Vec3::repeat(1.0), [1.0; 3], program).unwrap();

        let uploads = backend.count(|c| {
            matches!(c, RecordedCall::CreateMesh { vertex_count, index_count, .. }
                if *vertex_count == CUBE_VERTEX_COUNT && *index_count == CUBE_INDEX_COUNT)
        });
        assert_eq!(uploads, 1);
    }

    #[test]
    fn test_untextured_draw_uses_vertex_color() {
        let (backend, registry, program) = setup();
        let cube = Cube::new(backend.clone(), Vec3::new(1.0, 2.0, 3.0), Vec3::repeat(1.0), [1.0; 3], program)
            .unwrap()
            .with_material(pbr::GOLD);

        cube.draw(&registry, &frame(), &LightingEnvironment::new());

        assert_eq!(backend.last_uniform("useTextures"), Some(UniformValue::Bool(false)));
        assert_eq!(backend.last_uniform("colorAlpha"), Some(UniformValue::Float(1.0)));
        assert_eq!(
            backend.last_uniform("model"),
            Some(UniformValue::Mat4(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))))
        );
        let draws = backend.draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].index_count, 36);
    }

    #[test]
    fn test_toggle_textures_flips_contract() {
        let (backend, mut registry, program) = setup();
        let texture = Texture::from_image(
            backend.clone(),
            &ImageData::solid_color(2, 2, [255, 0, 0, 255]),
            Default::default(),
        )
        .unwrap();
        let texture = registry.add_texture(texture);

        let mut cube = Cube::new(backend.clone(), Vec3::zeros(), Vec3::repeat(1.0), [1.0; 3], program)
            .unwrap()
            .with_textures(vec![texture]);

        cube.draw(&registry, &frame(), &LightingEnvironment::new());
        assert_eq!(backend.last_uniform("useTextures"), Some(UniformValue::Bool(true)));
        assert_eq!(backend.last_uniform("colorAlpha"), Some(UniformValue::Float(0.0)));
        assert_eq!(backend.last_uniform("texture0"), Some(UniformValue::Int(0)));

        cube.toggle_textures();
        cube.draw(&registry, &frame(), &LightingEnvironment::new());
        assert_eq!(backend.last_uniform("useTextures"), Some(UniformValue::Bool(false)));
        assert_eq!(backend.last_uniform("colorAlpha"), Some(UniformValue::Float(1.0)));
    }

    #[test]
    fn test_transparency_follows_material() {
        let (backend, _registry, program) = setup();
        let cube = Cube::new(backend, Vec3::zeros(), Vec3::repeat(1.0), [1.0; 3], program)
            .unwrap()
            .with_material(pbr::GLASS);
        assert!(cube.is_transparent());
    }
}
