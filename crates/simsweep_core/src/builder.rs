//! Sweep Builder
//!
//! The `SweepBuilder` accumulates configuration and validates it once, in
//! [`build`](SweepBuilder::build).
//!
//! # Example
//!
//! ```
//! use simsweep_core::{Aggregator, FnMetric, Sweep};
//!
//! let mut sweep = Sweep::builder()
//!     .range(10, 30, 10)
//!     .repetitions(3)
//!     .input_generator(|n: i64| (0..n).rev().collect::<Vec<i64>>())
//!     .simulator(|input: &Vec<i64>| input.len() as f64)
//!     .metric(FnMetric::new("length", |out: &f64| *out))
//!     .build()?;
//!
//! sweep.run()?;
//! let table = sweep.results(Aggregator::Max)?;
//! assert_eq!(table.get("length", 20), Some(20.0));
//! # Ok::<(), simsweep_core::SweepError>(())
//! ```

use std::sync::Arc;

use crate::aggregate::Aggregator;
use crate::config::{SizeRange, SweepConfig};
use crate::error::SweepError;
use crate::model::{InputGenerator, Metric, Simulator};
use crate::sweep::Sweep;

/// Fluent configuration for a [`Sweep`].
///
/// Unset fields fall back to the defaults: range 10..=100 step 10,
/// 5 repetitions. A missing generator or simulator is not a build error; it
/// is reported when the sweep runs.
pub struct SweepBuilder<I, O> {
    config: SweepConfig,
    generator: Option<Arc<dyn InputGenerator<I>>>,
    simulator: Option<Arc<dyn Simulator<I, O>>>,
    metrics: Vec<(Arc<dyn Metric<O>>, Aggregator)>,
}

impl<I, O> Default for SweepBuilder<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O> SweepBuilder<I, O> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SweepConfig::default(),
            generator: None,
            simulator: None,
            metrics: Vec::new(),
        }
    }

    /// Replace the range and repetitions with a loaded configuration
    #[must_use]
    pub fn config(mut self, config: SweepConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn range(mut self, start: i64, end: i64, step: i64) -> Self {
        self.config.range = SizeRange::new(start, end, step);
        self
    }

    #[must_use]
    pub fn repetitions(mut self, repetitions: usize) -> Self {
        self.config.repetitions = repetitions;
        self
    }

    #[must_use]
    pub fn input_generator(self, generator: impl InputGenerator<I> + 'static) -> Self {
        self.shared_input_generator(Arc::new(generator))
    }

    /// Use a generator that may also be shared with other sweeps
    #[must_use]
    pub fn shared_input_generator(mut self, generator: Arc<dyn InputGenerator<I>>) -> Self {
        self.generator = Some(generator);
        self
    }

    #[must_use]
    pub fn simulator(self, simulator: impl Simulator<I, O> + 'static) -> Self {
        self.shared_simulator(Arc::new(simulator))
    }

    /// Use a simulator that may also be shared with other sweeps
    #[must_use]
    pub fn shared_simulator(mut self, simulator: Arc<dyn Simulator<I, O>>) -> Self {
        self.simulator = Some(simulator);
        self
    }

    /// Register a metric summarized with the mean
    #[must_use]
    pub fn metric(self, metric: impl Metric<O> + 'static) -> Self {
        self.metric_with(metric, Aggregator::default())
    }

    /// Register a metric bound to `aggregator` for [`Sweep::summary`]
    #[must_use]
    pub fn metric_with(self, metric: impl Metric<O> + 'static, aggregator: Aggregator) -> Self {
        self.shared_metric(Arc::new(metric), aggregator)
    }

    #[must_use]
    pub fn shared_metric(mut self, metric: Arc<dyn Metric<O>>, aggregator: Aggregator) -> Self {
        self.metrics.push((metric, aggregator));
        self
    }

    /// Validate the configuration and produce a sweep.
    ///
    /// Fails on a non-positive step or on two metrics sharing a name.
    pub fn build(self) -> Result<Sweep<I, O>, SweepError> {
        self.config.range.validate()?;

        let mut sweep = Sweep::with_config(self.config);
        if let Some(generator) = self.generator {
            sweep.set_shared_input_generator(generator);
        }
        if let Some(simulator) = self.simulator {
            sweep.set_shared_simulator(simulator);
        }
        for (metric, aggregator) in self.metrics {
            sweep.add_shared_metric(metric, aggregator)?;
        }

        Ok(sweep)
    }
}
