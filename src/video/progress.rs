//! Cosmetic progress labels.
//!
//! The service reports no real progress, so a generation shows a fixed
//! sequence of labels on a timer. The ticker is independent of the job state
//! reported by the driver.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Labels shown while a generation runs, in order.
pub const PROGRESS_LABELS: [&str; 5] = [
    "Initializing Veo 3 model...",
    "Processing inputs...",
    "Generating frames...",
    "Rendering video...",
    "Finalizing output...",
];

/// Time between label changes.
pub const DEFAULT_CADENCE: Duration = Duration::from_secs(4);

/// Label to show `elapsed` after the start. Stays on the last label.
pub fn label_at(elapsed: Duration, cadence: Duration) -> &'static str {
    let last = PROGRESS_LABELS.len() - 1;
    if cadence.is_zero() {
        return PROGRESS_LABELS[last];
    }
    let step = (elapsed.as_nanos() / cadence.as_nanos()).min(last as u128) as usize;
    PROGRESS_LABELS[step]
}

/// Background task advancing the progress label.
///
/// Stops when dropped.
#[derive(Debug)]
pub struct ProgressTicker {
    handle: JoinHandle<()>,
    label: watch::Receiver<&'static str>,
}

impl ProgressTicker {
    /// Starts on the first label and advances every `cadence`.
    ///
    /// Labels are derived from the time since start, so a late tick never
    /// shifts the schedule.
    pub fn spawn(cadence: Duration) -> Self {
        let last = PROGRESS_LABELS[PROGRESS_LABELS.len() - 1];
        let (tx, label) = watch::channel(label_at(Duration::ZERO, cadence));
        let start = Instant::now();
        let handle = tokio::spawn(async move {
            let mut shown = label_at(Duration::ZERO, cadence);
            if shown == last {
                return;
            }
            let mut ticks = tokio::time::interval_at(start + cadence, cadence);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            while shown != last {
                ticks.tick().await;
                let next = label_at(start.elapsed(), cadence);
                if next != shown {
                    if tx.send(next).is_err() {
                        return;
                    }
                    shown = next;
                }
            }
        });
        Self { handle, label }
    }

    /// Current label.
    pub fn current(&self) -> &'static str {
        *self.label.borrow()
    }

    /// Receiver that sees every label change.
    pub fn subscribe(&self) -> watch::Receiver<&'static str> {
        self.label.clone()
    }

    /// Stops advancing.
    pub fn stop(self) {}
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
