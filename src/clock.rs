use std::time::{Duration, Instant};

/// Frame timing as seen by the run loop
pub trait FrameClock {
    /// Time since the previous call
    fn elapsed_since_last_frame(&mut self) -> Duration;

    /// Blocks until the next frame is due at `target_fps`
    fn sleep_until_next_frame(&mut self, target_fps: u32);
}

/// Wall-clock pacing with `Instant` deadlines
pub struct SystemClock {
    last_frame: Instant,
    next_deadline: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            next_deadline: now,
        }
    }
}

impl FrameClock for SystemClock {
    fn elapsed_since_last_frame(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }

    fn sleep_until_next_frame(&mut self, target_fps: u32) {
        let interval = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        self.next_deadline += interval;

        let now = Instant::now();
        if self.next_deadline > now {
            std::thread::sleep(self.next_deadline - now);
        } else {
            // Fell behind: re-anchor instead of sprinting to catch up
            self.next_deadline = now;
        }
    }
}

/// Never sleeps and reports a fixed frame time. Drives headless runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub frame_time: Duration,
}

impl FrameClock for FixedClock {
    fn elapsed_since_last_frame(&mut self) -> Duration {
        self.frame_time
    }

    fn sleep_until_next_frame(&mut self, _target_fps: u32) {}
}

/// Frames per second for a measured frame time, 0 when nothing was measured
pub fn fps_from(frame_time: Duration) -> u32 {
    let micros = frame_time.as_micros();
    if micros == 0 {
        0
    } else {
        (1_000_000 / micros) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_from() {
        assert_eq!(fps_from(Duration::from_millis(16)), 62);
        assert_eq!(fps_from(Duration::from_millis(100)), 10);
        assert_eq!(fps_from(Duration::ZERO), 0);
    }

    #[test]
    fn test_system_clock_paces_frames() {
        let mut clock = SystemClock::new();
        let start = Instant::now();
        for _ in 0..3 {
            clock.sleep_until_next_frame(100);
        }
        assert!(start.elapsed() >= Duration::from_millis(25));
        assert!(clock.elapsed_since_last_frame() >= Duration::from_millis(25));
    }

    #[test]
    fn test_fixed_clock() {
        let mut clock = FixedClock {
            frame_time: Duration::from_millis(20),
        };
        assert_eq!(clock.elapsed_since_last_frame(), Duration::from_millis(20));
        clock.sleep_until_next_frame(60);
    }
}
