//! Frame timing
//!
//! Camera movement is scaled by the delta reported here so that speed is
//! independent of frame rate.

use std::time::{Duration, Instant};

/// Per-frame clock for the single-threaded render loop
#[derive(Debug)]
pub struct FrameTimer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a timer starting now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a timer with an explicit start instant
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame: start,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance to the current instant and return the elapsed seconds
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advance to `now` and return the elapsed seconds since the previous tick
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Seconds between the last two ticks
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Seconds accumulated over all ticks
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// How long to sleep at the end of a frame to hold `target_fps`.
    ///
    /// Returns `None` when the frame already took longer than the budget.
    pub fn cap_remaining(&self, target_fps: u32, now: Instant) -> Option<Duration> {
        if target_fps == 0 {
            return None;
        }
        let budget = Duration::from_secs_f64(1.0 / f64::from(target_fps));
        let spent = now.saturating_duration_since(self.last_frame);
        budget.checked_sub(spent).filter(|d| !d.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_reports_elapsed_seconds() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(start);

        let dt = timer.tick_at(start + Duration::from_millis(250));
        assert!((dt - 0.25).abs() < 1e-6);

        timer.tick_at(start + Duration::from_millis(500));
        assert_eq!(timer.frame_count(), 2);
        assert!((timer.total_time() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cap_remaining() {
        let start = Instant::now();
        let timer = FrameTimer::starting_at(start);

        let wait = timer.cap_remaining(10, start + Duration::from_millis(40));
        assert_eq!(wait, Some(Duration::from_millis(60)));

        assert_eq!(timer.cap_remaining(10, start + Duration::from_millis(150)), None);
        assert_eq!(timer.cap_remaining(0, start), None);
    }
}
