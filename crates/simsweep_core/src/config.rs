//! Sweep configuration: the size range and the repetition count.

use serde::{Deserialize, Serialize};

use crate::error::SweepError;

pub const DEFAULT_START: i64 = 10;
pub const DEFAULT_END: i64 = 100;
pub const DEFAULT_STEP: i64 = 10;
pub const DEFAULT_REPETITIONS: usize = 5;

/// Closed interval `[start, end]` of size parameters, stepped by `step`.
///
/// A range with `start > end` is valid and yields no sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeRange {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
            step: DEFAULT_STEP,
        }
    }
}

impl SizeRange {
    #[must_use]
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        Self { start, end, step }
    }

    /// Reject non-positive steps
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.step <= 0 {
            return Err(SweepError::InvalidStep { step: self.step });
        }
        Ok(())
    }

    /// Iterate over the sizes in increasing order.
    ///
    /// Yields nothing when the step is non-positive; call [`validate`](Self::validate)
    /// first to turn that into an error.
    pub fn sizes(&self) -> Sizes {
        Sizes {
            next: (self.step > 0 && self.start <= self.end).then_some(self.start),
            end: self.end,
            step: self.step,
        }
    }

    /// Number of sizes the range yields
    #[must_use]
    pub fn len(&self) -> usize {
        if self.step <= 0 || self.start > self.end {
            return 0;
        }
        let span = (i128::from(self.end) - i128::from(self.start)) / i128::from(self.step);
        usize::try_from(span + 1).unwrap_or(usize::MAX)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterator over the sizes of a [`SizeRange`]
#[derive(Debug, Clone)]
pub struct Sizes {
    next: Option<i64>,
    end: i64,
    step: i64,
}

impl Iterator for Sizes {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let current = self.next?;
        // Stop instead of wrapping when the next step would overflow
        self.next = current
            .checked_add(self.step)
            .filter(|next| *next <= self.end);
        Some(current)
    }
}

/// Complete numeric configuration of a sweep.
///
/// Every field has a default, so a partial document deserializes into a
/// usable configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub range: SizeRange,
    pub repetitions: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            range: SizeRange::default(),
            repetitions: DEFAULT_REPETITIONS,
        }
    }
}

impl SweepConfig {
    /// Total number of trials a sweep with this configuration performs
    #[must_use]
    pub fn total_trials(&self) -> usize {
        self.range.len().saturating_mul(self.repetitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SweepConfig::default();
        assert_eq!(config.range, SizeRange::new(10, 100, 10));
        assert_eq!(config.repetitions, 5);
        assert_eq!(config.total_trials(), 50);
    }

    #[test]
    fn test_sizes_inclusive_end() {
        let sizes: Vec<i64> = SizeRange::new(10, 30, 10).sizes().collect();
        assert_eq!(sizes, vec![10, 20, 30]);
    }

    #[test]
    fn test_sizes_end_not_on_step() {
        let range = SizeRange::new(1, 10, 4);
        let sizes: Vec<i64> = range.sizes().collect();
        assert_eq!(sizes, vec![1, 5, 9]);
        assert_eq!(range.len(), 3);
    }

    #[test]
    fn test_single_size() {
        let range = SizeRange::new(7, 7, 100);
        assert_eq!(range.sizes().collect::<Vec<_>>(), vec![7]);
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_start_after_end_is_empty() {
        let range = SizeRange::new(50, 10, 10);
        assert!(range.validate().is_ok());
        assert!(range.is_empty());
        assert_eq!(range.sizes().count(), 0);
    }

    #[test]
    fn test_non_positive_step_is_rejected() {
        for step in [0, -5] {
            let range = SizeRange::new(10, 100, step);
            assert_eq!(range.validate(), Err(SweepError::InvalidStep { step }));
            assert_eq!(range.sizes().count(), 0);
        }
    }

    #[test]
    fn test_overflow_stops_iteration() {
        let range = SizeRange::new(i64::MAX - 1, i64::MAX, 5);
        assert_eq!(range.sizes().collect::<Vec<_>>(), vec![i64::MAX - 1]);
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_negative_sizes() {
        let sizes: Vec<i64> = SizeRange::new(-4, 4, 4).sizes().collect();
        assert_eq!(sizes, vec![-4, 0, 4]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SweepConfig =
            serde_json::from_str(r#"{ "range": { "end": 40 }, "repetitions": 2 }"#).unwrap();
        assert_eq!(config.range, SizeRange::new(10, 40, 10));
        assert_eq!(config.repetitions, 2);

        let empty: SweepConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, SweepConfig::default());
    }
}
