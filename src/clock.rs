use std::time::{Duration, Instant};

/// Time between simulation steps.
pub struct FrameClock {
    last_tick: Option<Instant>,
    max_step: Duration,
}

impl FrameClock {
    pub fn new(max_step: Duration) -> Self {
        Self {
            last_tick: None,
            max_step,
        }
    }

    /// Seconds since the previous tick, capped at `max_step` so a stalled
    /// window does not turn into a jump. The first tick has no sample.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let prev = self.last_tick.replace(now)?;
        let dt = now.saturating_duration_since(prev).min(self.max_step);
        Some(dt.as_secs_f64())
    }

    /// Forget the previous sample, e.g. after the window comes back.
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}

/// Counts frames and reports the rate about once a second.
pub struct FpsCounter {
    frames: u32,
    since: Instant,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self { frames: 0, since: now }
    }

    pub fn frame(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.since).as_secs_f32();
        if elapsed < 1.0 {
            return None;
        }
        let fps = self.frames as f32 / elapsed;
        self.frames = 0;
        self.since = now;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_no_delta() {
        let mut clock = FrameClock::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert_eq!(clock.tick(t0), None);
        assert_eq!(clock.tick(t0 + Duration::from_millis(16)), Some(0.016));
    }

    #[test]
    fn long_frames_are_capped() {
        let mut clock = FrameClock::new(Duration::from_millis(100));
        let t0 = Instant::now();
        clock.tick(t0);
        assert_eq!(clock.tick(t0 + Duration::from_secs(5)), Some(0.1));
    }

    #[test]
    fn reset_drops_the_sample() {
        let mut clock = FrameClock::new(Duration::from_millis(100));
        let t0 = Instant::now();
        clock.tick(t0);
        clock.reset();
        assert_eq!(clock.tick(t0 + Duration::from_millis(10)), None);
    }

    #[test]
    fn fps_reported_once_per_second() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);
        for i in 1..60 {
            assert_eq!(fps.frame(t0 + Duration::from_millis(i * 16)), None);
        }
        let rate = fps.frame(t0 + Duration::from_secs(1)).unwrap();
        assert!((rate - 60.0).abs() < 1e-3);
        assert_eq!(fps.frame(t0 + Duration::from_millis(1010)), None);
    }
}
