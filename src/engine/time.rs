use std::time::{Duration, Instant};

/// Wall-clock frame timer for real-time hosts.
pub struct FrameTimer {
    last: Instant,
    pub dt: f32,
    pub frames: u64,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt: 0.0,
            frames: 0,
        }
    }

    /// Measure the time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.frames += 1;
    }

    /// Sleep off whatever is left of a `target` frame since the last tick.
    pub fn pace(&self, target: Duration) {
        let spent = self.last.elapsed();
        if let Some(rest) = target.checked_sub(spent) {
            std::thread::sleep(rest);
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
