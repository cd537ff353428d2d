//! Scroll speed service.
//!
//! A single task owns the [`VelocityMonitor`]. Scroll positions are sent to
//! it through a [`ScrollSpeedHandle`]; the resulting speed is published on a
//! watch channel that any number of [`SpeedSignal`]s read without being able
//! to change it.

use log::debug;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::GridConfig;
use crate::velocity::{ScrollSpeed, VelocityMonitor};

/// Read-only view of the current scroll speed.
#[derive(Debug, Clone)]
pub struct SpeedSignal {
    rx: watch::Receiver<ScrollSpeed>,
}

impl SpeedSignal {
    pub fn from_receiver(rx: watch::Receiver<ScrollSpeed>) -> Self {
        Self { rx }
    }

    /// A signal that never changes.
    pub fn constant(speed: ScrollSpeed) -> Self {
        let (_tx, rx) = watch::channel(speed);
        Self { rx }
    }

    pub fn current(&self) -> ScrollSpeed {
        *self.rx.borrow()
    }

    pub fn is_fast(&self) -> bool {
        self.current().is_fast()
    }

    /// Waits for the next change. Returns `None` once the service stopped.
    pub async fn changed(&mut self) -> Option<ScrollSpeed> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

impl Default for SpeedSignal {
    fn default() -> Self {
        Self::constant(ScrollSpeed::Normal)
    }
}

/// Feeds scroll positions to the speed service.
///
/// Dropping the handle stops the service.
#[derive(Debug)]
pub struct ScrollSpeedHandle {
    samples: mpsc::UnboundedSender<(Instant, f64)>,
    signal: SpeedSignal,
    cancel: CancellationToken,
}

impl ScrollSpeedHandle {
    /// Starts the service on the current tokio runtime.
    pub fn spawn(config: &GridConfig) -> Self {
        let (samples, rx) = mpsc::unbounded_channel();
        let (tx, signal) = watch::channel(ScrollSpeed::Normal);
        let cancel = CancellationToken::new();

        let monitor = VelocityMonitor::from_config(config);
        tokio::spawn(run(monitor, rx, tx, cancel.clone()));

        Self {
            samples,
            signal: SpeedSignal::from_receiver(signal),
            cancel,
        }
    }

    /// Reports the viewport's current scroll offset in pixels.
    pub fn on_scroll(&self, position: f64) {
        let _ = self.samples.send((Instant::now(), position));
    }

    pub fn signal(&self) -> SpeedSignal {
        self.signal.clone()
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ScrollSpeedHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(
    mut monitor: VelocityMonitor,
    mut samples: mpsc::UnboundedReceiver<(Instant, f64)>,
    speed: watch::Sender<ScrollSpeed>,
    cancel: CancellationToken,
) {
    let origin = Instant::now();
    let publish = |change: Option<ScrollSpeed>| {
        if let Some(change) = change {
            debug!("Scroll speed now {change:?}");
            speed.send_replace(change);
        }
    };

    loop {
        let deadline = monitor.deadline().map(|offset| origin + offset);

        tokio::select! {
            _ = cancel.cancelled() => break,
            sample = samples.recv() => match sample {
                Some((at, position)) => {
                    publish(monitor.record(at.saturating_duration_since(origin), position));
                }
                None => break,
            },
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                publish(monitor.settle(origin.elapsed()));
            }
        }
    }

    debug!("Scroll speed service stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_fast_scroll_decays_after_quiet_period() {
        let handle = ScrollSpeedHandle::spawn(&GridConfig::default());
        let mut signal = handle.signal();

        handle.on_scroll(0.0);
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.on_scroll(400.0);

        assert_eq!(signal.changed().await, Some(ScrollSpeed::Fast));
        assert!(handle.signal().is_fast());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(signal.is_fast());

        assert_eq!(signal.changed().await, Some(ScrollSpeed::Normal));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_scroll_stays_normal() {
        let handle = ScrollSpeedHandle::spawn(&GridConfig::default());
        let signal = handle.signal();

        for step in 0..5 {
            handle.on_scroll(step as f64 * 4.0);
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(signal.current(), ScrollSpeed::Normal);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_service() {
        let handle = ScrollSpeedHandle::spawn(&GridConfig::default());
        let mut signal = handle.signal();

        drop(handle);
        assert_eq!(signal.changed().await, None);
    }

    #[test]
    fn test_constant_signal() {
        assert!(SpeedSignal::constant(ScrollSpeed::Fast).is_fast());
        assert!(!SpeedSignal::default().is_fast());
    }
}
