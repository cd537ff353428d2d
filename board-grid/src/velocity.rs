//! Scroll velocity state machine.
//!
//! Entering [`ScrollSpeed::Fast`] needs a sample whose speed against the
//! previous sample exceeds the threshold. Leaving it only needs a quiet
//! period without samples. Time is passed in explicitly as an offset from an
//! arbitrary origin, so the machine is driven the same way by the speed
//! service and by tests.

use std::time::Duration;

use log::debug;

use crate::config::GridConfig;

/// Whether the viewport is scrolling fast enough to degrade rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollSpeed {
    #[default]
    Normal,
    Fast,
}

impl ScrollSpeed {
    pub fn is_fast(self) -> bool {
        self == ScrollSpeed::Fast
    }
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    at: Duration,
    position: f64,
}

/// Two-state velocity monitor.
///
/// Keeps only the most recent sample.
#[derive(Debug, Clone)]
pub struct VelocityMonitor {
    /// Pixels per millisecond.
    threshold: f64,
    quiet: Duration,
    last: Option<Sample>,
    speed: ScrollSpeed,
}

impl VelocityMonitor {
    pub fn new(threshold: f64, quiet: Duration) -> Self {
        Self {
            threshold,
            quiet,
            last: None,
            speed: ScrollSpeed::Normal,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.velocity_threshold, config.quiet_period())
    }

    pub fn speed(&self) -> ScrollSpeed {
        self.speed
    }

    pub fn is_fast(&self) -> bool {
        self.speed.is_fast()
    }

    /// When fast scrolling ends if no further sample arrives.
    pub fn deadline(&self) -> Option<Duration> {
        match (self.speed, self.last) {
            (ScrollSpeed::Fast, Some(last)) => Some(last.at + self.quiet),
            _ => None,
        }
    }

    /// Records a scroll position seen at `at`.
    ///
    /// The first sample is only a baseline. Samples not strictly later than
    /// the previous one are dropped without touching any state. Returns the
    /// new speed when it changed.
    pub fn record(&mut self, at: Duration, position: f64) -> Option<ScrollSpeed> {
        let Some(last) = self.last else {
            self.last = Some(Sample { at, position });
            return None;
        };

        if at <= last.at {
            debug!("Ignoring scroll sample with non-positive elapsed time");
            return None;
        }

        let elapsed_ms = (at - last.at).as_micros() as f64 / 1000.0;
        let velocity = (position - last.position).abs() / elapsed_ms;
        self.last = Some(Sample { at, position });

        if velocity > self.threshold && !self.speed.is_fast() {
            self.speed = ScrollSpeed::Fast;
            return Some(ScrollSpeed::Fast);
        }
        None
    }

    /// Ends fast scrolling once `now` reaches the quiet deadline.
    pub fn settle(&mut self, now: Duration) -> Option<ScrollSpeed> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.speed = ScrollSpeed::Normal;
        Some(ScrollSpeed::Normal)
    }
}

impl Default for VelocityMonitor {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fast_then_settles_after_quiet_period() {
        let mut monitor = VelocityMonitor::default();

        assert_eq!(monitor.record(ms(0), 0.0), None);
        assert_eq!(monitor.record(ms(10), 20.0), Some(ScrollSpeed::Fast));

        assert_eq!(monitor.settle(ms(159)), None);
        assert!(monitor.is_fast());
        assert_eq!(monitor.settle(ms(160)), Some(ScrollSpeed::Normal));
        assert!(!monitor.is_fast());
    }

    #[test]
    fn test_slow_sample_keeps_fast_alive() {
        let mut monitor = VelocityMonitor::default();
        monitor.record(ms(0), 0.0);
        monitor.record(ms(10), 20.0);

        // 1px over 100ms is slow, but still resets the quiet period.
        assert_eq!(monitor.record(ms(110), 21.0), None);
        assert_eq!(monitor.settle(ms(200)), None);
        assert_eq!(monitor.deadline(), Some(ms(260)));
        assert_eq!(monitor.settle(ms(260)), Some(ScrollSpeed::Normal));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut monitor = VelocityMonitor::default();
        monitor.record(ms(0), 0.0);
        assert_eq!(monitor.record(ms(10), 5.0), None);
        assert_eq!(monitor.record(ms(20), 10.1), Some(ScrollSpeed::Fast));
    }

    #[test]
    fn test_direction_does_not_matter() {
        let mut monitor = VelocityMonitor::default();
        monitor.record(ms(0), 1000.0);
        assert_eq!(monitor.record(ms(10), 900.0), Some(ScrollSpeed::Fast));
    }

    #[test]
    fn test_non_positive_elapsed_ignored() {
        let mut monitor = VelocityMonitor::default();
        monitor.record(ms(10), 0.0);

        assert_eq!(monitor.record(ms(10), 500.0), None);
        assert_eq!(monitor.record(ms(5), 500.0), None);
        assert!(!monitor.is_fast());

        // Still measured against the last accepted sample.
        assert_eq!(monitor.record(ms(20), 4.0), None);
    }

    #[test]
    fn test_ignored_sample_does_not_extend_fast() {
        let mut monitor = VelocityMonitor::default();
        monitor.record(ms(0), 0.0);
        monitor.record(ms(10), 20.0);
        monitor.record(ms(10), 40.0);

        assert_eq!(monitor.deadline(), Some(ms(160)));
    }

    #[test]
    fn test_settle_when_normal_is_noop() {
        let mut monitor = VelocityMonitor::default();
        assert_eq!(monitor.settle(ms(1000)), None);
        assert_eq!(monitor.deadline(), None);
    }
}
