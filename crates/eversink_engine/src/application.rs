//! Application state and per-frame lifecycle
//!
//! Everything the frame loop mutates lives in [`AppState`] and is passed
//! explicitly: input handling, then update, then render.

use crate::assets::AssetRegistry;
use crate::input::FrameInput;
use crate::render::backend::RenderBackend;
use crate::render::primitives::Camera;
use crate::scene::{FrameContext, Scene};

/// Mutable state of a running demo
#[derive(Debug)]
pub struct AppState {
    /// Viewer
    pub camera: Camera,
    /// Cubes and lights
    pub scene: Scene,
    /// Index of the camera-bound spot light, if any
    pub flashlight: Option<usize>,
    /// Cleared when quit is requested
    pub running: bool,
    /// Background color
    pub clear_color: [f32; 4],
}

impl AppState {
    /// Start running with `camera` looking at `scene`
    pub fn new(camera: Camera, scene: Scene) -> Self {
        Self {
            camera,
            scene,
            flashlight: None,
            running: true,
            clear_color: [0.1, 0.1, 0.1, 1.0],
        }
    }

    /// Bind light `index` to the camera and drive it with the flashlight key
    pub fn with_flashlight(mut self, index: usize) -> Self {
        if self.scene.lighting.bind_to_camera(index) {
            self.flashlight = Some(index);
        } else {
            log::warn!("Light {} cannot follow the camera", index);
        }
        self
    }

    /// Background color
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Apply one frame of input scaled by `delta_time` seconds
    pub fn handle_input(&mut self, input: &FrameInput, delta_time: f32) {
        if input.quit {
            log::info!("Quit requested");
            self.running = false;
        }

        for movement in input.movement.movements() {
            self.camera.process_movement(movement, delta_time);
        }
        if input.mouse_delta.x != 0.0 || input.mouse_delta.y != 0.0 {
            self.camera.process_mouse(input.mouse_delta.x, input.mouse_delta.y);
        }
        if input.scroll != 0.0 {
            self.camera.process_scroll(input.scroll);
        }

        if input.toggle_textures {
            self.scene.toggle_textures();
            log::debug!("Toggled textures");
        }
        if input.toggle_flashlight {
            if let Some(enabled) = self.flashlight.and_then(|i| self.scene.lighting.toggle(i)) {
                log::debug!("Flashlight {}", if enabled { "on" } else { "off" });
            }
        }
    }

    /// Move camera-bound lights to the camera
    pub fn update(&mut self) {
        self.scene.lighting.follow_camera(&self.camera);
    }

    /// Resize the viewport and keep the projection in step
    pub fn resize(&mut self, backend: &dyn RenderBackend, width: u32, height: u32) {
        backend.set_viewport(width as i32, height as i32);
        if height > 0 {
            self.camera.set_aspect_ratio(width as f32 / height as f32);
        }
    }

    /// Camera matrices for this frame
    pub fn frame_context(&self) -> FrameContext {
        FrameContext {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(self.camera.aspect_ratio()),
            view_pos: self.camera.position,
        }
    }

    /// Clear and draw the scene
    pub fn render(&self, backend: &dyn RenderBackend, registry: &AssetRegistry) {
        backend.clear(self.clear_color);
        self.scene.render(backend, registry, &self.frame_context());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::input::MovementKeys;
    use crate::render::backends::{RecordedCall, RecordingBackend};
    use crate::render::lighting::Light;
    use approx::assert_relative_eq;

    fn app_with_flashlight() -> AppState {
        let mut scene = Scene::new();
        scene.lighting.add_light(Light::default_directional());
        let spot = scene
            .lighting
            .add_light(Light::default_spot(Vec3::zeros(), -Vec3::z()))
            .unwrap();
        AppState::new(Camera::new(Vec3::new(0.0, 0.0, 3.0), 4.0 / 3.0), scene).with_flashlight(spot)
    }

    #[test]
    fn test_quit_stops_running() {
        let mut app = app_with_flashlight();
        app.handle_input(&FrameInput { quit: true, ..FrameInput::default() }, 0.016);
        assert!(!app.running);
    }

    #[test]
    fn test_forward_movement_scales_with_delta_time() {
        let mut app = app_with_flashlight();
        let input = FrameInput {
            movement: MovementKeys::FORWARD,
            ..FrameInput::default()
        };
        let start = app.camera.position;
        app.handle_input(&input, 0.5);
        let travelled = (app.camera.position - start).norm();
        assert!(travelled > 0.0);

        let mid = app.camera.position;
        app.handle_input(&input, 1.0);
        assert_relative_eq!((app.camera.position - mid).norm(), travelled * 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_flashlight_toggle_and_follow() {
        let mut app = app_with_flashlight();
        let index = app.flashlight.unwrap();

        app.camera.position = Vec3::new(4.0, 5.0, 6.0);
        app.update();
        assert_eq!(app.scene.lighting.get(index).unwrap().position, Vec3::new(4.0, 5.0, 6.0));

        app.handle_input(&FrameInput { toggle_flashlight: true, ..FrameInput::default() }, 0.0);
        assert!(!app.scene.lighting.get(index).unwrap().enabled);
    }

    #[test]
    fn test_render_clears_before_drawing() {
        let backend = RecordingBackend::new();
        let app = app_with_flashlight();
        app.render(&backend, &AssetRegistry::new());
        assert!(matches!(backend.calls().first(), Some(RecordedCall::Clear(_))));
    }
}
