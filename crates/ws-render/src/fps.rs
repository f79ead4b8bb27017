use std::collections::VecDeque;
use std::time::Instant;

/// Sliding-window FPS counter. Zero allocation after init.
///
/// # Example
/// ```
/// use ws_render::fps::FpsCounter;
/// let mut counter = FpsCounter::new(30);
/// counter.tick();
/// assert!(counter.fps() >= 0.0);
/// ```
pub struct FpsCounter {
    timestamps: VecDeque<Instant>,
    window: usize,
    fps: f64,
}

impl FpsCounter {
    /// Create a counter averaging over the given number of frames.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            timestamps: VecDeque::with_capacity(window + 1),
            window,
            fps: 0.0,
        }
    }

    /// Call once per frame, after the draw.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.timestamps.push_back(now);
        if self.timestamps.len() > self.window {
            self.timestamps.pop_front();
        }
        if self.timestamps.len() >= 2 {
            let first = self.timestamps.front().copied().unwrap_or(now);
            let secs = now.duration_since(first).as_secs_f64();
            if secs > 0.0 {
                self.fps = (self.timestamps.len() - 1) as f64 / secs;
            }
        }
    }

    /// Average FPS over the window.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let counter = FpsCounter::new(30);
        assert!(counter.fps().abs() < f64::EPSILON);
    }

    #[test]
    fn window_stays_bounded() {
        let mut counter = FpsCounter::new(4);
        for _ in 0..20 {
            counter.tick();
        }
        assert!(counter.timestamps.len() <= 5);
        assert!(counter.fps() >= 0.0);
    }
}
