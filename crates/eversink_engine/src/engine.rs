//! Top-level error type

use thiserror::Error;

use crate::render::backend::BackendError;
use crate::render::window::WindowError;

/// Any failure the demo binary can hit before or during the frame loop
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window, context or GL function table setup failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// A GPU object could not be created
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl EngineError {
    /// Process exit code for this failure.
    ///
    /// Startup failures before the frame loop use the `-1` sentinel.
    pub const fn exit_code(&self) -> i32 {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_failures_exit_with_sentinel() {
        let window: EngineError = WindowError::CreationFailed.into();
        assert_eq!(window.exit_code(), -1);
        assert!(window.to_string().starts_with("Window error"));

        let backend: EngineError = BackendError::ProgramLink("bad".into()).into();
        assert_eq!(backend.exit_code(), -1);
    }
}
