//! # Frame Clock
//!
//! Measures the frame rate once per second and derives the per-frame duration used to
//! scale movement and mouse look.

/// Length of one measurement window, in milliseconds.
pub const SAMPLE_INTERVAL_MS: u64 = 1000;

/// Counts frames between samples and remembers the last measured frame duration.
///
/// Until the first sample completes the frame duration is zero, so the camera does not move
/// during the first second.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameClock {
    last_sample_ms: u64,
    frames: u64,
    frame_time_ms: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration of one frame in milliseconds, as of the last sample.
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    /// Records a frame presented at `now_ms`.
    ///
    /// Returns the measured frames per second when at least [`SAMPLE_INTERVAL_MS`] has
    /// passed since the previous sample, and `None` otherwise. The frame that closes a
    /// window is not counted in it.
    pub fn tick(&mut self, now_ms: u64) -> Option<u32> {
        let delta = now_ms.saturating_sub(self.last_sample_ms);
        if delta < SAMPLE_INTERVAL_MS {
            self.frames += 1;
            return None;
        }

        let frame_rate = (1000 * self.frames / delta) as u32;
        self.last_sample_ms = now_ms;
        self.frames = 0;
        self.frame_time_ms = if frame_rate > 0 {
            1000.0 / frame_rate as f32
        } else {
            delta as f32
        };
        Some(frame_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sample_before_one_second() {
        let mut clock = FrameClock::new();
        for now in (0..1000).step_by(16) {
            assert_eq!(clock.tick(now), None);
        }
        assert_eq!(clock.frame_time_ms(), 0.0);
    }

    #[test]
    fn samples_frame_rate_after_one_second() {
        let mut clock = FrameClock::new();
        for now in (0..1000).step_by(10) {
            clock.tick(now);
        }

        assert_eq!(clock.tick(1000), Some(100));
        assert!((clock.frame_time_ms() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn each_window_restarts_the_count() {
        let mut clock = FrameClock::new();
        for now in (0..1000).step_by(10) {
            clock.tick(now);
        }
        assert_eq!(clock.tick(1000), Some(100));

        for now in (1020..2000).step_by(20) {
            assert_eq!(clock.tick(now), None);
        }
        assert_eq!(clock.tick(2000), Some(49));
    }

    #[test]
    fn stalled_window_falls_back_to_its_length() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(2500), Some(0));
        assert_eq!(clock.frame_time_ms(), 2500.0);
    }
}
