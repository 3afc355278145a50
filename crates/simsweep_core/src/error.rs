use thiserror::Error;

/// Errors raised by aggregator strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The aggregator was handed an empty sequence
    #[error("cannot aggregate an empty sequence")]
    Empty,
}

/// Errors raised while configuring, running, or summarizing a sweep
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    /// `run()` was called before an input generator was set
    #[error("configuration error: no input generator set")]
    MissingGenerator,

    /// `run()` was called before a simulator was set
    #[error("configuration error: no simulator set")]
    MissingSimulator,

    /// The size range step must be strictly positive
    #[error("configuration error: step must be positive (got {step})")]
    InvalidStep { step: i64 },

    /// A metric with the same name is already registered
    #[error("configuration error: metric `{name}` is already registered")]
    DuplicateMetric { name: String },

    /// A metric/size pair had no trial outputs to aggregate
    #[error("insufficient data: no trials to aggregate for metric `{metric}` at size {size}")]
    InsufficientData { metric: String, size: i64 },

    /// The sweep was cancelled through its progress handle
    #[error("sweep cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, SweepError>;
