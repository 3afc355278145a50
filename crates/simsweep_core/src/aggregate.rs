//! Aggregator strategies that reduce repeated trial measurements to one value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AggregateError;

/// Built-in reductions from a sequence of scalars to a single scalar.
///
/// The set is closed; every variant is a pure function of its input and
/// carries no state, so aggregators are `Copy` and freely shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregator {
    /// Arithmetic mean
    #[default]
    Mean,
    /// Middle value; average of the two central values for even counts
    Median,
    /// Smallest value
    Min,
    /// Largest value
    Max,
}

impl Aggregator {
    /// All built-in aggregators, in declaration order
    pub const ALL: [Aggregator; 4] = [Self::Mean, Self::Median, Self::Min, Self::Max];

    /// Stable identifier, used for logging and parsing only
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Reduce `values` to a single scalar.
    ///
    /// Every strategy requires at least one value.
    pub fn aggregate(self, values: &[f64]) -> Result<f64, AggregateError> {
        if values.is_empty() {
            return Err(AggregateError::Empty);
        }

        let value = match self {
            Self::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Self::Median => median(values),
            Self::Min => values
                .iter()
                .copied()
                .min_by(f64::total_cmp)
                .ok_or(AggregateError::Empty)?,
            Self::Max => values
                .iter()
                .copied()
                .max_by(f64::total_cmp)
                .ok_or(AggregateError::Empty)?,
        };

        Ok(value)
    }
}

/// Median of a non-empty slice. Sorts a copy; the input is untouched.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown aggregator name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown aggregator `{0}` (expected mean, median, min or max)")]
pub struct ParseAggregatorError(pub String);

impl FromStr for Aggregator {
    type Err = ParseAggregatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|agg| agg.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseAggregatorError(s.to_string()))
    }
}
