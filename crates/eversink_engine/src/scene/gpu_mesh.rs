//! GPU-resident geometry with single-owner release

use std::rc::Rc;

use crate::render::backend::{BackendResult, MeshBuffers, RenderBackend};
use crate::render::primitives::CubeVertex;

/// Vertex array plus vertex and index buffers, deleted on drop
///
/// Not `Clone`: exactly one owner releases the buffer triple.
pub struct GpuMesh {
    backend: Rc<dyn RenderBackend>,
    buffers: MeshBuffers,
    index_count: u32,
}

impl GpuMesh {
    /// Upload vertices and indices
    pub fn upload(
        backend: Rc<dyn RenderBackend>,
        vertices: &[CubeVertex],
        indices: &[u32],
    ) -> BackendResult<Self> {
        let buffers = backend.create_mesh(vertices, indices)?;
        log::trace!(
            "Uploaded mesh vao={} ({} vertices, {} indices)",
            buffers.vao,
            vertices.len(),
            indices.len()
        );
        Ok(Self {
            backend,
            buffers,
            index_count: indices.len() as u32,
        })
    }

    /// One indexed draw of every index
    pub fn draw(&self) {
        self.backend.draw_indexed(self.buffers, self.index_count);
    }

    /// Backend buffer ids
    pub const fn buffers(&self) -> MeshBuffers {
        self.buffers
    }

    /// Number of indices drawn per call
    pub const fn index_count(&self) -> u32 {
        self.index_count
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        log::trace!("Releasing mesh vao={}", self.buffers.vao);
        self.backend.delete_mesh(self.buffers);
    }
}

impl std::fmt::Debug for GpuMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuMesh")
            .field("buffers", &self.buffers)
            .field("index_count", &self.index_count)
            .finish()
    }
}
