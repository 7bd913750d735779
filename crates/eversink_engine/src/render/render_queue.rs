//! # Render Queue System
//!
//! Splits a frame's renderables into an opaque pass and a transparent pass.
//!
//! ## Ordering
//!
//! - Every opaque draw is issued before any transparent draw.
//! - Within a pass, input order is preserved.
//! - The transparent pass runs with `SRC_ALPHA, ONE_MINUS_SRC_ALPHA` blending.
//!   Depth writes stay on.
//!
//! Transparent objects are not sorted back-to-front, so overlapping
//! transparent objects can blend in the wrong order depending on the view.

use crate::render::backend::RenderBackend;
use crate::render::material::Material;

/// Which pass a renderable is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPass {
    /// Depth-tested, no blending
    Opaque,
    /// Drawn after all opaque geometry with alpha blending
    Transparent,
}

/// Anything that can report whether it needs blending
pub trait Translucent {
    /// True when the object belongs in the transparent pass
    fn is_transparent(&self) -> bool;

    /// Pass this object is drawn in
    fn draw_pass(&self) -> DrawPass {
        if self.is_transparent() {
            DrawPass::Transparent
        } else {
            DrawPass::Opaque
        }
    }
}

impl Translucent for Material {
    fn is_transparent(&self) -> bool {
        Material::is_transparent(self)
    }
}

/// Per-frame draw order as indices into the caller's renderable list
#[derive(Debug, Clone, Default)]
pub struct RenderQueue {
    opaque_commands: Vec<usize>,
    transparent_commands: Vec<usize>,
}

impl RenderQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue sized for `capacity` renderables
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            opaque_commands: Vec::with_capacity(capacity),
            transparent_commands: Vec::with_capacity(capacity / 4),
        }
    }

    /// Classify every item of `items` in order
    pub fn from_items<T: Translucent>(items: &[T]) -> Self {
        let mut queue = Self::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            queue.add_command(index, item.draw_pass());
        }
        queue
    }

    /// Append renderable `index` to `pass`
    pub fn add_command(&mut self, index: usize, pass: DrawPass) {
        match pass {
            DrawPass::Opaque => self.opaque_commands.push(index),
            DrawPass::Transparent => self.transparent_commands.push(index),
        }
    }

    /// Opaque indices in submission order
    pub fn opaque_commands(&self) -> &[usize] {
        &self.opaque_commands
    }

    /// Transparent indices in submission order
    pub fn transparent_commands(&self) -> &[usize] {
        &self.transparent_commands
    }

    /// Full draw order: opaque pass, then transparent pass
    pub fn passes(&self) -> impl Iterator<Item = (DrawPass, usize)> + '_ {
        self.opaque_commands
            .iter()
            .map(|&i| (DrawPass::Opaque, i))
            .chain(self.transparent_commands.iter().map(|&i| (DrawPass::Transparent, i)))
    }

    /// Total number of queued renderables
    pub fn command_count(&self) -> usize {
        self.opaque_commands.len() + self.transparent_commands.len()
    }

    /// Remove all commands, keeping allocations
    pub fn clear(&mut self) {
        self.opaque_commands.clear();
        self.transparent_commands.clear();
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.opaque_commands.is_empty() && self.transparent_commands.is_empty()
    }

    /// Run both passes with depth testing on, toggling blending around the
    /// transparent one
    pub fn execute(&self, backend: &dyn RenderBackend, mut draw: impl FnMut(usize)) {
        backend.set_depth_test(true);
        backend.set_blending(false);
        for &index in &self.opaque_commands {
            draw(index);
        }

        if self.transparent_commands.is_empty() {
            return;
        }

        backend.set_blending(true);
        for &index in &self.transparent_commands {
            draw(index);
        }
        backend.set_blending(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::{RecordedCall, RecordingBackend};

    struct Item(bool);

    impl Translucent for Item {
        fn is_transparent(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_render_queue_creation() {
        let queue = RenderQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.command_count(), 0);
    }

    #[test]
    fn test_partition_preserves_order_within_pass() {
        let items = [Item(true), Item(false), Item(true), Item(false)];
        let queue = RenderQueue::from_items(&items);

        assert_eq!(queue.opaque_commands(), &[1, 3]);
        assert_eq!(queue.transparent_commands(), &[0, 2]);

        let order: Vec<usize> = queue.passes().map(|(_, i)| i).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_execute_blends_only_transparent_pass() {
        let backend = RecordingBackend::new();
        let queue = RenderQueue::from_items(&[Item(true), Item(false)]);

        let mut drawn = Vec::new();
        queue.execute(&backend, |i| drawn.push(i));
        assert_eq!(drawn, vec![1, 0]);

        let toggles: Vec<RecordedCall> = backend
            .calls()
            .into_iter()
            .filter(|c| matches!(c, RecordedCall::SetBlending(_)))
            .collect();
        assert_eq!(
            toggles,
            vec![
                RecordedCall::SetBlending(false),
                RecordedCall::SetBlending(true),
                RecordedCall::SetBlending(false)
            ]
        );
    }

    #[test]
    fn test_depth_test_enabled_before_any_pass() {
        let backend = RecordingBackend::new();
        let queue = RenderQueue::from_items(&[Item(false), Item(true)]);
        queue.execute(&backend, |_| {});

        let calls = backend.calls();
        assert_eq!(calls.first(), Some(&RecordedCall::SetDepthTest(true)));
        assert_eq!(backend.count(|c| *c == RecordedCall::SetDepthTest(false)), 0);
    }

    #[test]
    fn test_all_opaque_never_enables_blending() {
        let backend = RecordingBackend::new();
        RenderQueue::from_items(&[Item(false), Item(false)]).execute(&backend, |_| {});
        assert_eq!(backend.count(|c| *c == RecordedCall::SetBlending(true)), 0);
    }

    #[test]
    fn test_clear_queue() {
        let mut queue = RenderQueue::from_items(&[Item(true)]);
        queue.clear();
        assert!(queue.is_empty());
    }
}
