//! Recording backend for tests (no GPU required)
//!
//! Every backend call is appended to an in-memory log instead of reaching a
//! graphics API, so the draw contract and resource lifetimes can be asserted
//! on directly. Handles are handed out from a single counter starting at 1,
//! which keeps them distinct across object kinds.

use std::cell::{Cell, RefCell};

use crate::assets::ImageData;
use crate::render::backend::{
    BackendError, BackendResult, MeshBuffers, ProgramHandle, RenderBackend, SamplerParams,
    TextureHandle,
};
use crate::render::primitives::CubeVertex;
use crate::render::uniforms::UniformValue;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// Program created
    CreateProgram(ProgramHandle),
    /// Program released
    DeleteProgram(ProgramHandle),
    /// Program made current
    UseProgram(ProgramHandle),
    /// Uniform written
    SetUniform {
        /// Target program
        program: ProgramHandle,
        /// Uniform name
        name: String,
        /// Value written
        value: UniformValue,
    },
    /// Texture created
    CreateTexture(TextureHandle, SamplerParams),
    /// Pixels uploaded
    UploadTexture {
        /// Target texture
        texture: TextureHandle,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
        /// Channel count
        channels: u8,
    },
    /// Texture released
    DeleteTexture(TextureHandle),
    /// Texture bound to a unit
    BindTexture {
        /// Texture unit index
        unit: u32,
        /// Bound texture
        texture: TextureHandle,
    },
    /// Mesh uploaded
    CreateMesh {
        /// Buffers allocated
        mesh: MeshBuffers,
        /// Vertices uploaded
        vertex_count: usize,
        /// Indices uploaded
        index_count: usize,
    },
    /// Mesh released
    DeleteMesh(MeshBuffers),
    /// Indexed draw issued
    Draw {
        /// Mesh drawn
        mesh: MeshBuffers,
        /// Index count
        index_count: u32,
        /// Program current at draw time
        program: ProgramHandle,
        /// Whether blending was enabled at draw time
        blending: bool,
    },
    /// Blending toggled
    SetBlending(bool),
    /// Depth test toggled
    SetDepthTest(bool),
    /// Framebuffer cleared
    Clear([f32; 4]),
    /// Viewport resized
    SetViewport(i32, i32),
}

/// A draw with the state that was current when it was issued
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRecord {
    /// Mesh drawn
    pub mesh: MeshBuffers,
    /// Index count
    pub index_count: u32,
    /// Program current at draw time
    pub program: ProgramHandle,
    /// Whether blending was enabled at draw time
    pub blending: bool,
}

/// Backend that records calls instead of rendering
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: RefCell<Vec<RecordedCall>>,
    next_id: Cell<u32>,
    current_program: Cell<Option<ProgramHandle>>,
    blending: Cell<bool>,
    fail_programs: Cell<bool>,
    fail_meshes: Cell<bool>,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `create_program` fail with a compile error
    pub fn fail_program_creation(&self, fail: bool) {
        self.fail_programs.set(fail);
    }

    /// Make every subsequent `create_mesh` fail without creating buffers
    pub fn fail_mesh_creation(&self, fail: bool) {
        self.fail_meshes.set(fail);
    }

    fn next_id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn record(&self, call: RecordedCall) {
        self.calls.borrow_mut().push(call);
    }

    /// Snapshot of every call so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Forget recorded calls, keeping handle counters and state
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Every indexed draw in issue order
    pub fn draws(&self) -> Vec<DrawRecord> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Draw {
                    mesh,
                    index_count,
                    program,
                    blending,
                } => Some(DrawRecord {
                    mesh: *mesh,
                    index_count: *index_count,
                    program: *program,
                    blending: *blending,
                }),
                _ => None,
            })
            .collect()
    }

    /// Last value written to uniform `name` on any program
    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            RecordedCall::SetUniform { name: n, value, .. } if n == name => Some(*value),
            _ => None,
        })
    }

    /// Names of all uniforms written, in order, duplicates included
    pub fn uniform_names(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::SetUniform { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Meshes passed to `delete_mesh`, duplicates included
    pub fn deleted_meshes(&self) -> Vec<MeshBuffers> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::DeleteMesh(mesh) => Some(*mesh),
                _ => None,
            })
            .collect()
    }

    /// Count calls matching a predicate
    pub fn count(&self, predicate: impl Fn(&RecordedCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(*call)).count()
    }
}

impl RenderBackend for RecordingBackend {
    fn create_program(&self, vertex_src: &str, fragment_src: &str) -> BackendResult<ProgramHandle> {
        if self.fail_programs.get() {
            return Err(BackendError::ShaderCompile {
                stage: "vertex",
                log: format!("recording backend rejected {} bytes of source", vertex_src.len() + fragment_src.len()),
            });
        }
        let handle = ProgramHandle(self.next_id());
        self.record(RecordedCall::CreateProgram(handle));
        Ok(handle)
    }

    fn delete_program(&self, program: ProgramHandle) {
        if !program.is_null() {
            self.record(RecordedCall::DeleteProgram(program));
        }
    }

    fn use_program(&self, program: ProgramHandle) {
        self.current_program.set(Some(program));
        self.record(RecordedCall::UseProgram(program));
    }

    fn set_uniform(&self, program: ProgramHandle, name: &str, value: &UniformValue) {
        if program.is_null() {
            return;
        }
        self.record(RecordedCall::SetUniform {
            program,
            name: name.to_string(),
            value: *value,
        });
    }

    fn create_texture(&self, sampler: SamplerParams) -> BackendResult<TextureHandle> {
        let handle = TextureHandle(self.next_id());
        self.record(RecordedCall::CreateTexture(handle, sampler));
        Ok(handle)
    }

    fn upload_texture(&self, texture: TextureHandle, image: &ImageData) {
        self.record(RecordedCall::UploadTexture {
            texture,
            width: image.width,
            height: image.height,
            channels: image.channels,
        });
    }

    fn delete_texture(&self, texture: TextureHandle) {
        self.record(RecordedCall::DeleteTexture(texture));
    }

    fn bind_texture(&self, unit: u32, texture: TextureHandle) {
        self.record(RecordedCall::BindTexture { unit, texture });
    }

    fn create_mesh(&self, vertices: &[CubeVertex], indices: &[u32]) -> BackendResult<MeshBuffers> {
        if self.fail_meshes.get() {
            return Err(BackendError::ResourceCreation {
                what: "vertex array",
                reason: "recording backend rejected mesh".to_string(),
            });
        }
        let mesh = MeshBuffers {
            vao: self.next_id(),
            vbo: self.next_id(),
            ebo: self.next_id(),
        };
        self.record(RecordedCall::CreateMesh {
            mesh,
            vertex_count: vertices.len(),
            index_count: indices.len(),
        });
        Ok(mesh)
    }

    fn delete_mesh(&self, mesh: MeshBuffers) {
        self.record(RecordedCall::DeleteMesh(mesh));
    }

    fn draw_indexed(&self, mesh: MeshBuffers, index_count: u32) {
        self.record(RecordedCall::Draw {
            mesh,
            index_count,
            program: self.current_program.get().unwrap_or(ProgramHandle::NULL),
            blending: self.blending.get(),
        });
    }

    fn set_blending(&self, enabled: bool) {
        self.blending.set(enabled);
        self.record(RecordedCall::SetBlending(enabled));
    }

    fn set_depth_test(&self, enabled: bool) {
        self.record(RecordedCall::SetDepthTest(enabled));
    }

    fn clear(&self, color: [f32; 4]) {
        self.record(RecordedCall::Clear(color));
    }

    fn set_viewport(&self, width: i32, height: i32) {
        self.record(RecordedCall::SetViewport(width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique_across_kinds() {
        let backend = RecordingBackend::new();
        let program = backend.create_program("", "").unwrap();
        let texture = backend.create_texture(SamplerParams::default()).unwrap();
        let mesh = backend.create_mesh(&[], &[]).unwrap();

        let mut ids = vec![program.0, texture.0, mesh.vao, mesh.vbo, mesh.ebo];
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_draw_captures_current_state() {
        let backend = RecordingBackend::new();
        let program = backend.create_program("", "").unwrap();
        let mesh = backend.create_mesh(&[], &[]).unwrap();

        backend.use_program(program);
        backend.draw_indexed(mesh, 36);
        backend.set_blending(true);
        backend.draw_indexed(mesh, 36);

        let draws = backend.draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].program, program);
        assert!(!draws[0].blending);
        assert!(draws[1].blending);
    }

    #[test]
    fn test_uniforms_on_null_program_are_dropped() {
        let backend = RecordingBackend::new();
        backend.set_uniform(ProgramHandle::NULL, "model", &UniformValue::Int(1));
        assert!(backend.calls().is_empty());
        assert_eq!(backend.last_uniform("model"), None);
    }

    #[test]
    fn test_failing_programs() {
        let backend = RecordingBackend::new();
        backend.fail_program_creation(true);
        assert!(matches!(
            backend.create_program("x", "y"),
            Err(BackendError::ShaderCompile { .. })
        ));
    }
}
