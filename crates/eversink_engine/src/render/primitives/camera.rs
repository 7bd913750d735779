//! # First-Person Camera
//!
//! Yaw/pitch driven camera for the OpenGL demos.
//!
//! ## Orientation Model
//! The camera stores only yaw and pitch (degrees). The view basis is derived
//! from them on every change:
//!
//! ```text
//! front = normalize(cos(yaw)·cos(pitch), sin(pitch), sin(yaw)·cos(pitch))
//! right = normalize(front × world_up)
//! up    = right × front
//! ```
//!
//! Pitch is clamped before `front` is recomputed so the basis never degenerates
//! at the poles. Because `right` and `up` are never written independently of
//! this derivation, the basis is orthonormal by construction.
//!
//! ## Coordinate System
//! Right-handed, Y-up, OpenGL clip conventions (depth in [-1, 1]).

use crate::core::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Smallest field of view reachable through scrolling, in degrees
pub const MIN_FOV: f32 = 1.0;
/// Largest field of view reachable through scrolling, in degrees
pub const MAX_FOV: f32 = 45.0;

/// Movement directions relative to the current view basis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    /// Along `front`
    Forward,
    /// Against `front`
    Backward,
    /// Against `right`
    Left,
    /// Along `right`
    Right,
}

/// First-person camera with a derived orthonormal basis
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,

    yaw: f32,
    pitch: f32,
    fov: f32,

    pitch_limit: f32,
    speed: f32,
    sensitivity: f32,

    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    /// Create a camera from configuration values.
    ///
    /// The configured pitch is clamped and the configured fov is clamped to
    /// `[MIN_FOV, MAX_FOV]` so the invariants hold from the first frame.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let pitch_limit = config.pitch_limit.abs().min(89.0);
        let (near, far) = Self::clip_planes(config);
        let mut camera = Self {
            position: Vec3::from(config.position),
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::y(),
            right: Vec3::x(),
            world_up: Vec3::y(),
            yaw: config.yaw,
            pitch: config.pitch.clamp(-pitch_limit, pitch_limit),
            fov: config.fov.clamp(MIN_FOV, MAX_FOV),
            pitch_limit,
            speed: config.speed,
            sensitivity: config.sensitivity,
            aspect,
            near,
            far,
        };
        camera.update_vectors();
        camera
    }

    /// Configured clip planes, or the defaults unless `0 < near < far`
    fn clip_planes(config: &CameraConfig) -> (f32, f32) {
        let (near, far) = (config.near, config.far);
        if near.is_finite() && far.is_finite() && near > 0.0 && far > near {
            return (near, far);
        }
        let fallback = CameraConfig::default();
        log::warn!(
            "Invalid camera clip planes near={near} far={far}; using {} / {}",
            fallback.near,
            fallback.far
        );
        (fallback.near, fallback.far)
    }

    /// Camera at `position` with default yaw, pitch and input response
    pub fn new(position: Vec3, aspect: f32) -> Self {
        let mut camera = Self::from_config(&CameraConfig::default(), aspect);
        camera.position = position;
        camera
    }

    /// Rotate by a mouse delta in pixels.
    ///
    /// `dy` is positive when the mouse moves up.
    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-self.pitch_limit, self.pitch_limit);
        self.update_vectors();
    }

    /// Zoom by a scroll delta; fov is hard-clamped to `[MIN_FOV, MAX_FOV]`
    pub fn process_scroll(&mut self, dy: f32) {
        self.fov = (self.fov - dy).clamp(MIN_FOV, MAX_FOV);
    }

    /// Move for `delta_time` seconds in `direction`
    pub fn process_movement(&mut self, direction: CameraMovement, delta_time: f32) {
        self.translate(direction, self.speed * delta_time);
    }

    /// Move one fixed step of `speed` units regardless of frame time.
    ///
    /// Movement speed then depends on frame rate.
    #[deprecated(note = "frame-rate dependent; use `process_movement` with the frame delta")]
    pub fn step_fixed(&mut self, direction: CameraMovement) {
        self.translate(direction, self.speed);
    }

    fn translate(&mut self, direction: CameraMovement, distance: f32) {
        let strafe = self.front.cross(&self.up).normalize();
        match direction {
            CameraMovement::Forward => self.position += self.front * distance,
            CameraMovement::Backward => self.position -= self.front * distance,
            CameraMovement::Left => self.position -= strafe * distance,
            CameraMovement::Right => self.position += strafe * distance,
        }
    }

    fn update_vectors(&mut self) {
        self.front = utils::direction_from_euler(self.yaw, self.pitch);
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front);
        log::trace!(
            "Camera basis updated: yaw={:.2} pitch={:.2} front={:?}",
            self.yaw,
            self.pitch,
            self.front
        );
    }

    /// Update the aspect ratio after a framebuffer resize
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// World-to-view transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_gl(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection for the current fov at `aspect`
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_gl(utils::deg_to_rad(self.fov), aspect, self.near, self.far)
    }

    /// Unit view direction
    pub const fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit camera up
    pub const fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit camera right
    pub const fn right(&self) -> Vec3 {
        self.right
    }

    /// Yaw in degrees
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Field of view in degrees
    pub const fn fov(&self) -> f32 {
        self.fov
    }

    /// Current aspect ratio
    pub const fn aspect_ratio(&self) -> f32 {
        self.aspect
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 800.0 / 600.0)
    }
}
