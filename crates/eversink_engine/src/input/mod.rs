//! Input management system
//!
//! The window produces a [`RawSnapshot`] of the polled device state once per
//! frame. [`InputSampler`] turns consecutive snapshots into the discrete
//! per-frame signals the application acts on: held movement keys, quit,
//! mouse delta, scroll delta and toggle edges.

use bitflags::bitflags;

use crate::foundation::math::Vec2;
use crate::render::primitives::CameraMovement;

bitflags! {
    /// Movement keys held during a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MovementKeys: u8 {
        /// W
        const FORWARD = 1 << 0;
        /// S
        const BACKWARD = 1 << 1;
        /// A
        const LEFT = 1 << 2;
        /// D
        const RIGHT = 1 << 3;
    }
}

impl MovementKeys {
    /// Camera movements implied by the held keys, in W/S/A/D order
    pub fn movements(self) -> impl Iterator<Item = CameraMovement> {
        [
            (Self::FORWARD, CameraMovement::Forward),
            (Self::BACKWARD, CameraMovement::Backward),
            (Self::LEFT, CameraMovement::Left),
            (Self::RIGHT, CameraMovement::Right),
        ]
        .into_iter()
        .filter(move |(key, _)| self.contains(*key))
        .map(|(_, movement)| movement)
    }
}

/// Device state polled from the window in one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawSnapshot {
    /// Movement keys currently down
    pub movement: MovementKeys,
    /// Escape is down
    pub escape: bool,
    /// Texture toggle key (T) is down
    pub toggle_textures: bool,
    /// Flashlight toggle key (F) is down
    pub toggle_flashlight: bool,
    /// Cursor position in screen coordinates
    pub cursor: (f64, f64),
    /// Scroll accumulated since the previous snapshot
    pub scroll: f64,
}

/// Fires once on the frame a key goes down
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleLatch {
    was_down: bool,
}

impl ToggleLatch {
    /// Feed the current key state; true only on a released-to-pressed edge
    pub fn update(&mut self, down: bool) -> bool {
        let fired = down && !self.was_down;
        self.was_down = down;
        fired
    }
}

/// Converts absolute cursor positions into per-frame deltas
///
/// The first observed position only seeds the tracker so the camera does not
/// jump when the cursor is captured. Y is inverted because screen coordinates
/// grow downward while pitch grows upward.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseTracker {
    last: Option<(f64, f64)>,
}

impl MouseTracker {
    /// Delta since the previous position; zero on the first call
    pub fn update(&mut self, x: f64, y: f64) -> Vec2 {
        let delta = match self.last {
            Some((last_x, last_y)) => Vec2::new((x - last_x) as f32, (last_y - y) as f32),
            None => Vec2::zeros(),
        };
        self.last = Some((x, y));
        delta
    }

    /// Forget the last position so the next update is suppressed again
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Discrete input signals for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Movement keys held this frame
    pub movement: MovementKeys,
    /// Close requested
    pub quit: bool,
    /// Mouse offset (x right, y up)
    pub mouse_delta: Vec2,
    /// Scroll offset
    pub scroll: f32,
    /// Texture toggle pressed this frame
    pub toggle_textures: bool,
    /// Flashlight toggle pressed this frame
    pub toggle_flashlight: bool,
}

/// Stateful conversion from snapshots to [`FrameInput`]
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    mouse: MouseTracker,
    textures: ToggleLatch,
    flashlight: ToggleLatch,
}

impl InputSampler {
    /// Create a sampler with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive this frame's signals
    pub fn sample(&mut self, snapshot: &RawSnapshot) -> FrameInput {
        let (x, y) = snapshot.cursor;
        FrameInput {
            movement: snapshot.movement,
            quit: snapshot.escape,
            mouse_delta: self.mouse.update(x, y),
            scroll: snapshot.scroll as f32,
            toggle_textures: self.textures.update(snapshot.toggle_textures),
            toggle_flashlight: self.flashlight.update(snapshot.toggle_flashlight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_latch_fires_on_press_edge_only() {
        let mut latch = ToggleLatch::default();
        let fired: Vec<bool> = [false, true, true, true, false, true]
            .into_iter()
            .map(|down| latch.update(down))
            .collect();
        assert_eq!(fired, vec![false, true, false, false, false, true]);
    }

    #[test]
    fn test_first_mouse_is_suppressed() {
        let mut tracker = MouseTracker::default();
        assert_eq!(tracker.update(400.0, 300.0), Vec2::zeros());
        assert_eq!(tracker.update(410.0, 290.0), Vec2::new(10.0, 10.0));

        tracker.reset();
        assert_eq!(tracker.update(0.0, 0.0), Vec2::zeros());
    }

    #[test]
    fn test_movement_keys_map_to_camera_movements() {
        let keys = MovementKeys::FORWARD | MovementKeys::RIGHT;
        let moves: Vec<CameraMovement> = keys.movements().collect();
        assert_eq!(moves, vec![CameraMovement::Forward, CameraMovement::Right]);
        assert_eq!(MovementKeys::empty().movements().count(), 0);
    }

    #[test]
    fn test_sampler_holding_toggle_fires_once() {
        let mut sampler = InputSampler::new();
        let snapshot = RawSnapshot {
            toggle_flashlight: true,
            escape: true,
            scroll: 2.0,
            ..RawSnapshot::default()
        };

        let first = sampler.sample(&snapshot);
        assert!(first.toggle_flashlight);
        assert!(first.quit);
        assert_eq!(first.scroll, 2.0);

        let second = sampler.sample(&snapshot);
        assert!(!second.toggle_flashlight);
        assert!(!second.toggle_textures);
    }
}
