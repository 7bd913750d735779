//! GLFW window with an OpenGL 3.3 core context
//!
//! Owns the GLFW instance, the window and its event receiver. Device state is
//! exposed once per frame as a [`RawSnapshot`]; turning that into discrete
//! signals is the job of [`crate::input::InputSampler`].

use glfw::{Action, Context as _, Key, WindowEvent};
use thiserror::Error;

use crate::core::config::WindowConfig;
use crate::input::{MovementKeys, RawSnapshot};

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// `glfwInit` failed
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// Window or context creation failed
    #[error("Window creation failed")]
    CreationFailed,

    /// OpenGL entry points could not be resolved
    #[error("Failed to load OpenGL function pointers: {0} unavailable")]
    GlLoader(&'static str),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window wrapper with proper resource management
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    framebuffer_size: (u32, u32),
    resized: bool,
}

impl Window {
    /// Create the window, make its context current and capture the cursor
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        #[cfg(target_os = "macos")]
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        window.set_framebuffer_size_polling(true);
        window.set_scroll_polling(true);
        window.set_cursor_mode(glfw::CursorMode::Disabled);

        let (width, height) = window.get_framebuffer_size();
        log::info!("Created {}x{} window '{}'", width, height, config.title);

        Ok(Self {
            glfw,
            window,
            events,
            framebuffer_size: (width.max(0) as u32, height.max(0) as u32),
            resized: false,
        })
    }

    /// Resolve the OpenGL function table through the current context
    pub fn load_gl(&mut self) -> WindowResult<glow::Context> {
        if self.window.get_proc_address("glGetString").is_null() {
            return Err(WindowError::GlLoader("glGetString"));
        }

        // SAFETY: the context created in `new` is current on this thread and
        // outlives every use of the returned function table.
        let gl = unsafe {
            glow::Context::from_loader_function(|name| self.window.get_proc_address(name) as *const _)
        };
        Ok(gl)
    }

    /// Poll events and read the device state for this frame
    pub fn sample(&mut self) -> RawSnapshot {
        self.glfw.poll_events();

        let mut scroll = 0.0;
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                WindowEvent::Scroll(_, dy) => scroll += dy,
                WindowEvent::FramebufferSize(width, height) => {
                    self.framebuffer_size = (width.max(0) as u32, height.max(0) as u32);
                    self.resized = true;
                }
                _ => {}
            }
        }

        let mut movement = MovementKeys::empty();
        for (key, flag) in [
            (Key::W, MovementKeys::FORWARD),
            (Key::S, MovementKeys::BACKWARD),
            (Key::A, MovementKeys::LEFT),
            (Key::D, MovementKeys::RIGHT),
        ] {
            movement.set(flag, self.is_down(key));
        }

        RawSnapshot {
            movement,
            escape: self.is_down(Key::Escape),
            toggle_textures: self.is_down(Key::T),
            toggle_flashlight: self.is_down(Key::F),
            cursor: self.window.get_cursor_pos(),
            scroll,
        }
    }

    fn is_down(&self, key: Key) -> bool {
        self.window.get_key(key) == Action::Press
    }

    /// New framebuffer size if it changed since the last call
    pub fn take_resize(&mut self) -> Option<(u32, u32)> {
        std::mem::take(&mut self.resized).then_some(self.framebuffer_size)
    }

    /// Framebuffer size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.framebuffer_size
    }

    /// Width over height of the framebuffer, 1.0 while minimized
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.framebuffer_size;
        if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Check if the window should close
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Set whether the window should close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }
}
