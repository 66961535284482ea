/// Frame-rate governor
///
/// Caps the loop at a fixed rate by sleeping out the rest of each frame and
/// reports the real time elapsed since the previous tick. That delta is the
/// only clock the simulation sees: animation, dialogue reveal, cooldowns and
/// cue timers all advance by it.
use std::thread;
use std::time::{Duration, Instant};

/// Default simulation rate
pub const DEFAULT_FPS: u32 = 30;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 30;

/// Frame timing state
pub struct FrameClock {
    /// Minimum duration of one frame
    frame_budget: Duration,

    /// Time of the previous tick
    last_tick: Instant,

    /// Time when the clock was created
    start_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Number of ticks so far
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl FrameClock {
    /// Create a clock capped at `fps` frames per second (0 disables the cap)
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        let frame_budget = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / fps as f64)
        };
        Self {
            frame_budget,
            last_tick: now,
            start_time: now,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Sleep until the frame budget is spent, then return the milliseconds
    /// elapsed since the previous tick
    pub fn tick(&mut self) -> u32 {
        let busy = self.last_tick.elapsed();
        if busy < self.frame_budget {
            thread::sleep(self.frame_budget - busy);
        }

        let now = Instant::now();
        let frame_time = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        frame_time.as_millis().min(u32::MAX as u128) as u32
    }

    /// Minimum frame duration
    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of ticks
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::default();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_frame_budget() {
        let clock = FrameClock::new(30);
        let budget = clock.frame_budget().as_secs_f64();
        assert!((budget - 1.0 / 30.0).abs() < 0.0001);

        assert_eq!(FrameClock::new(0).frame_budget(), Duration::ZERO);
    }

    #[test]
    fn test_tick_waits_out_the_budget() {
        let mut clock = FrameClock::new(50); // 20ms frames
        let delta = clock.tick();
        assert!(delta >= 20);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_tick_reports_long_frames() {
        let mut clock = FrameClock::new(100);
        thread::sleep(Duration::from_millis(40));
        let delta = clock.tick();
        assert!(delta >= 40);
    }

    #[test]
    fn test_fps_updates_every_ten_frames() {
        let mut clock = FrameClock::new(0);
        for _ in 0..10 {
            thread::sleep(Duration::from_millis(1));
            clock.tick();
        }
        assert!(clock.fps() > 0.0);
    }
}
