//! Shader program loading
//!
//! Sources are read whole from disk and handed to the backend. Failures never
//! abort: an unreadable file compiles as an empty string, and a compile or
//! link failure leaves the program holding the null handle so later draws
//! with it become no-ops. Both cases are logged with the underlying text.

use std::path::Path;
use std::rc::Rc;

use crate::render::backend::{ProgramHandle, RenderBackend};
use crate::render::uniforms::{UniformSet, UniformValue};

/// Owned, linked shader program
///
/// Releases its GPU program on drop.
pub struct ShaderProgram {
    backend: Rc<dyn RenderBackend>,
    handle: ProgramHandle,
    label: String,
}

impl ShaderProgram {
    /// Read, compile and link a vertex/fragment pair from files
    pub fn from_files(
        backend: Rc<dyn RenderBackend>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Self {
        let (vertex_path, fragment_path) = (vertex_path.as_ref(), fragment_path.as_ref());
        let label = format!("{} + {}", vertex_path.display(), fragment_path.display());
        let vertex_src = read_source(vertex_path);
        let fragment_src = read_source(fragment_path);
        Self::from_source(backend, &vertex_src, &fragment_src, label)
    }

    /// Compile and link from in-memory sources
    pub fn from_source(
        backend: Rc<dyn RenderBackend>,
        vertex_src: &str,
        fragment_src: &str,
        label: impl Into<String>,
    ) -> Self {
        let label = label.into();
        let handle = match backend.create_program(vertex_src, fragment_src) {
            Ok(handle) => {
                log::info!("Shader program '{}' linked (id {})", label, handle.0);
                handle
            }
            Err(e) => {
                log::error!("Shader program '{}' unusable: {}", label, e);
                ProgramHandle::NULL
            }
        };

        Self {
            backend,
            handle,
            label,
        }
    }

    /// Backend program id (null if building failed)
    pub const fn handle(&self) -> ProgramHandle {
        self.handle
    }

    /// False when compilation or linking failed
    pub const fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }

    /// Source paths or caller label used in log messages
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Make this program current
    pub fn bind(&self) {
        self.backend.use_program(self.handle);
    }

    /// Set one uniform
    pub fn set(&self, name: &str, value: UniformValue) {
        self.backend.set_uniform(self.handle, name, &value);
    }

    /// Set every uniform of `set` in order
    pub fn apply(&self, set: &UniformSet) {
        for (name, value) in set.iter() {
            self.backend.set_uniform(self.handle, name, value);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        if self.is_valid() {
            log::debug!("Releasing shader program '{}'", self.label);
            self.backend.delete_program(self.handle);
        }
    }
}

impl std::fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("handle", &self.handle)
            .field("label", &self.label)
            .finish()
    }
}

fn read_source(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            log::error!("Failed to read shader file {}: {}", path.display(), e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::{RecordedCall, RecordingBackend};

    #[test]
    fn test_program_released_once_on_drop() {
        let recorder = Rc::new(RecordingBackend::new());
        let program = ShaderProgram::from_source(recorder.clone(), "v", "f", "test");
        let handle = program.handle();
        assert!(program.is_valid());

        drop(program);
        assert_eq!(
            recorder.count(|c| *c == RecordedCall::DeleteProgram(handle)),
            1
        );
    }

    #[test]
    fn test_compile_failure_yields_null_program() {
        let recorder = Rc::new(RecordingBackend::new());
        recorder.fail_program_creation(true);

        let program = ShaderProgram::from_source(recorder.clone(), "bad", "bad", "broken");
        assert!(!program.is_valid());
        assert!(program.handle().is_null());

        program.set("model", UniformValue::Int(3));
        drop(program);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_missing_files_compile_as_empty_source() {
        let recorder = Rc::new(RecordingBackend::new());
        let program = ShaderProgram::from_files(
            recorder.clone(),
            "./shaders/vertex/does-not-exist.vs",
            "./shaders/fragment/does-not-exist.fs",
        );
        // The recording backend accepts anything, so the empty sources still link.
        assert!(program.is_valid());
        assert!(program.label().contains("does-not-exist.vs"));
    }
}
