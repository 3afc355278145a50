//! Parametric experiment harness
//!
//! This crate runs a caller-supplied procedure over inputs of increasing size,
//! repeats each size a fixed number of times, and reduces the retained outputs
//! into per-size summary statistics. It supports:
//! - Closed size ranges `[start, end]` stepped by a positive integer
//! - Open strategy traits for input generators, simulators and metrics
//! - Built-in aggregators (mean, median, min, max)
//! - Per-metric aggregator bindings or one aggregator for the whole table
//! - Progress reporting and cooperative cancellation
//!
//! # Two-Phase Analysis
//!
//! Trials run once; summaries are computed afterward, as often as needed:
//!
//! ```ignore
//! use simsweep_core::{Aggregator, Sweep};
//!
//! // Phase 1: run every trial (expensive, done once)
//! sweep.run()?;
//!
//! // Phase 2: reduce the retained outputs (cheap, repeatable)
//! let means = sweep.results(Aggregator::Mean)?;
//! let worst = sweep.results(Aggregator::Max)?;
//! let bound = sweep.summary()?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod builder;
pub mod error;
pub mod progress;
pub mod results;
pub mod sweep;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use aggregate::{Aggregator, ParseAggregatorError};
pub use builder::SweepBuilder;
pub use config::{SizeRange, SweepConfig};
pub use error::{AggregateError, SweepError};
pub use model::{FnMetric, InputGenerator, Metric, Simulator, metric};
pub use progress::SweepProgress;
pub use results::{RawResults, SummaryTable};
pub use sweep::Sweep;
