//! Progress tracking and cancellation for a running sweep.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Shared progress counters for a sweep.
///
/// Clones share the same atomics, so one clone can be handed to the engine
/// while another is polled (or cancelled) from a different thread.
#[derive(Debug, Clone)]
pub struct SweepProgress {
    /// Completed trials
    completed: Arc<AtomicUsize>,
    /// Total trials in the sweep
    total: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl SweepProgress {
    /// Create a new progress tracker
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(total)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Fraction of trials completed, in `[0, 1]`. An empty sweep counts as done.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            1.0
        } else {
            (self.completed() as f64 / total as f64).min(1.0)
        }
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Reset the completed counter and set a new total.
    ///
    /// The cancellation flag is left alone so a cancel issued before the
    /// sweep starts still takes effect.
    pub fn reset(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    /// Request cancellation; the engine stops before its next trial
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for SweepProgress {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_counts() {
        let progress = SweepProgress::new(4);
        progress.increment();
        progress.increment();

        assert_eq!(progress.completed(), 2);
        assert_eq!(progress.total(), 4);
        assert!((progress.fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clones_share_state() {
        let progress = SweepProgress::new(10);
        let observer = progress.clone();

        progress.increment();
        observer.cancel();

        assert_eq!(observer.completed(), 1);
        assert!(progress.is_cancelled());
    }

    #[test]
    fn test_reset_keeps_cancellation() {
        let progress = SweepProgress::new(3);
        progress.increment();
        progress.cancel();
        progress.reset(8);

        assert_eq!(progress.completed(), 0);
        assert_eq!(progress.total(), 8);
        assert!(progress.is_cancelled());
    }

    #[test]
    fn test_empty_sweep_is_complete() {
        assert_eq!(SweepProgress::default().fraction(), 1.0);
    }
}
