use std::time::Duration;

use super::FrameTime;

/// Rolling frame-rate counter.
///
/// Feed it every `FrameTime`; once per reporting interval it yields the
/// average frame rate over that interval and restarts.
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: Duration,
    accumulated: f32,
    frames: u32,
}

impl FrameStats {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: 0.0,
            frames: 0,
        }
    }

    /// Records one frame. Returns `Some(fps)` when a full interval has
    /// elapsed, `None` otherwise.
    pub fn record(&mut self, ft: FrameTime) -> Option<f32> {
        self.accumulated += ft.dt;
        self.frames += 1;

        if self.accumulated < self.interval.as_secs_f32() {
            return None;
        }

        let fps = self.frames as f32 / self.accumulated;
        self.accumulated = 0.0;
        self.frames = 0;
        Some(fps)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn ft(dt: f32, frame_index: u64) -> FrameTime {
        FrameTime {
            dt,
            now: Instant::now(),
            frame_index,
        }
    }

    #[test]
    fn silent_before_interval_elapses() {
        let mut stats = FrameStats::new(Duration::from_secs(1));
        for i in 0..9 {
            assert_eq!(stats.record(ft(0.1, i)), None);
        }
    }

    #[test]
    fn reports_average_rate_over_interval() {
        let mut stats = FrameStats::new(Duration::from_secs(1));
        let mut report = None;
        for i in 0..10 {
            report = stats.record(ft(0.1, i));
        }
        let fps = report.unwrap();
        assert!((fps - 10.0).abs() < 0.01, "fps was {fps}");
    }

    #[test]
    fn restarts_after_reporting() {
        let mut stats = FrameStats::new(Duration::from_secs(1));
        for i in 0..10 {
            stats.record(ft(0.1, i));
        }
        // A fresh interval begins: nothing to report yet.
        assert_eq!(stats.record(ft(0.1, 10)), None);
    }
}
