//! Frame timing.
//!
//! [`FrameClock`] is advanced once per rendered frame and reports the frame
//! count and a smoothed frame rate.

use std::time::{Duration, Instant};

/// Per-frame timing for the render loop.
#[derive(Debug)]
pub struct FrameClock {
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Mark the start of a frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.frame_count += 1;

        let since_update = now.duration_since(self.fps_update_time);
        if since_update >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since_update.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            log::debug!("{:.1} fps", self.fps);
        }
    }

    /// Ticks so far.
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frame rate averaged over the last update interval.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut clock = FrameClock::new();
        for _ in 0..3 {
            clock.tick();
        }
        assert_eq!(clock.frame(), 3);
        // Too soon for the first fps sample.
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_fps_updates_after_interval() {
        let mut clock = FrameClock::new();
        clock.tick();
        thread::sleep(Duration::from_millis(550));
        clock.tick();
        assert!(clock.fps() > 0.0);
    }
}
