//! The sweep engine: runs trials across the size range and keeps the raw outputs.
//!
//! Running and summarizing are separate phases. `run` performs every trial and
//! retains the outputs; `results` and `summary` reduce those outputs on demand,
//! so different aggregators can be compared without re-running anything.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use crate::aggregate::Aggregator;
use crate::builder::SweepBuilder;
use crate::config::{SizeRange, SweepConfig};
use crate::error::SweepError;
use crate::model::{InputGenerator, Metric, Simulator};
use crate::progress::SweepProgress;
use crate::results::{RawResults, SummaryTable, reduce};

/// Upper bound on the per-size output reservation made before trials run
const MAX_PREALLOCATED_TRIALS: usize = 1024;

/// A registered metric and the aggregator bound to it
struct MetricEntry<O> {
    metric: Arc<dyn Metric<O>>,
    aggregator: Aggregator,
}

/// Parametric sweep over input sizes.
///
/// Configuration stays mutable until `run` is called; each run clears and
/// fully repopulates the raw result table.
pub struct Sweep<I, O> {
    config: SweepConfig,
    generator: Option<Arc<dyn InputGenerator<I>>>,
    simulator: Option<Arc<dyn Simulator<I, O>>>,
    metrics: Vec<MetricEntry<O>>,
    metric_names: FxHashSet<String>,
    raw: RawResults<O>,
}

impl<I, O> Default for Sweep<I, O> {
    fn default() -> Self {
        Self::with_config(SweepConfig::default())
    }
}

impl<I, O> Sweep<I, O> {
    /// Create an unconfigured sweep with the default range and repetitions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fluent configuration
    #[must_use]
    pub fn builder() -> SweepBuilder<I, O> {
        SweepBuilder::new()
    }

    #[must_use]
    pub fn with_config(config: SweepConfig) -> Self {
        Self {
            config,
            generator: None,
            simulator: None,
            metrics: Vec::new(),
            metric_names: FxHashSet::default(),
            raw: RawResults::new(),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Set the size range. The step is validated when the sweep runs.
    pub fn set_range(&mut self, start: i64, end: i64, step: i64) {
        self.config.range = SizeRange::new(start, end, step);
    }

    pub fn set_repetitions(&mut self, repetitions: usize) {
        self.config.repetitions = repetitions;
    }

    pub fn set_input_generator(&mut self, generator: impl InputGenerator<I> + 'static) {
        self.generator = Some(Arc::new(generator));
    }

    pub fn set_simulator(&mut self, simulator: impl Simulator<I, O> + 'static) {
        self.simulator = Some(Arc::new(simulator));
    }

    pub(crate) fn set_shared_input_generator(&mut self, generator: Arc<dyn InputGenerator<I>>) {
        self.generator = Some(generator);
    }

    pub(crate) fn set_shared_simulator(&mut self, simulator: Arc<dyn Simulator<I, O>>) {
        self.simulator = Some(simulator);
    }

    /// Register a metric summarized with the default aggregator (mean)
    pub fn add_metric(&mut self, metric: impl Metric<O> + 'static) -> Result<(), SweepError> {
        self.add_metric_with(metric, Aggregator::default())
    }

    /// Register a metric bound to a specific aggregator.
    ///
    /// The binding is used by [`summary`](Self::summary); [`results`](Self::results)
    /// overrides it with the requested aggregator.
    pub fn add_metric_with(
        &mut self,
        metric: impl Metric<O> + 'static,
        aggregator: Aggregator,
    ) -> Result<(), SweepError> {
        self.add_shared_metric(Arc::new(metric), aggregator)
    }

    pub(crate) fn add_shared_metric(
        &mut self,
        metric: Arc<dyn Metric<O>>,
        aggregator: Aggregator,
    ) -> Result<(), SweepError> {
        if !self.metric_names.insert(metric.name().to_string()) {
            return Err(SweepError::DuplicateMetric {
                name: metric.name().to_string(),
            });
        }
        self.metrics.push(MetricEntry { metric, aggregator });
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    #[must_use]
    pub fn range(&self) -> SizeRange {
        self.config.range
    }

    #[must_use]
    pub fn repetitions(&self) -> usize {
        self.config.repetitions
    }

    /// Registered metric names, in registration order
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|entry| entry.metric.name())
    }

    /// Aggregator bound to a metric at registration
    #[must_use]
    pub fn metric_aggregator(&self, name: &str) -> Option<Aggregator> {
        self.metrics
            .iter()
            .find(|entry| entry.metric.name() == name)
            .map(|entry| entry.aggregator)
    }

    /// Outputs retained by the most recent run
    #[must_use]
    pub fn raw_results(&self) -> &RawResults<O> {
        &self.raw
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Run every trial in the configured range.
    ///
    /// For each size, `repetitions` trials of generate-then-simulate run
    /// sequentially and their outputs replace any earlier entry for that size.
    pub fn run(&mut self) -> Result<(), SweepError> {
        self.run_with_progress(&SweepProgress::default())
    }

    /// Run the sweep, reporting each finished trial to `progress`.
    ///
    /// `progress` is reset to this sweep's trial count before the first trial.
    /// Cancellation is checked before every trial; a cancelled run returns
    /// [`SweepError::Cancelled`] and leaves no raw results behind.
    pub fn run_with_progress(&mut self, progress: &SweepProgress) -> Result<(), SweepError> {
        self.raw.clear();

        let range = self.config.range;
        let repetitions = self.config.repetitions;
        range.validate()?;
        let generator = self
            .generator
            .as_deref()
            .ok_or(SweepError::MissingGenerator)?;
        let simulator = self
            .simulator
            .as_deref()
            .ok_or(SweepError::MissingSimulator)?;

        progress.reset(self.config.total_trials());

        if range.is_empty() {
            debug!(
                start = range.start,
                end = range.end,
                "size range is empty, nothing to run"
            );
        }
        debug!(
            start = range.start,
            end = range.end,
            step = range.step,
            repetitions,
            metrics = self.metrics.len(),
            "starting sweep"
        );

        let mut raw = RawResults::new();
        for size in range.sizes() {
            let mut outputs = Vec::with_capacity(repetitions.min(MAX_PREALLOCATED_TRIALS));

            for _ in 0..repetitions {
                if progress.is_cancelled() {
                    warn!(
                        size,
                        completed = progress.completed(),
                        total = progress.total(),
                        "sweep cancelled"
                    );
                    return Err(SweepError::Cancelled);
                }

                let input = generator.generate(size);
                outputs.push(simulator.invoke(&input));
                progress.increment();
            }

            trace!(size, trials = outputs.len(), "size complete");
            raw.insert(size, outputs);
        }

        debug!(
            sizes = raw.len(),
            trials = raw.trial_count(),
            "sweep complete"
        );
        self.raw = raw;
        Ok(())
    }

    // =========================================================================
    // Summaries
    // =========================================================================

    /// Reduce the raw outputs with one aggregator applied to every metric.
    ///
    /// Reflects whatever the last run retained; an engine that never ran
    /// yields an empty table.
    pub fn results(&self, aggregator: Aggregator) -> Result<SummaryTable, SweepError> {
        debug!(aggregator = %aggregator, "summarizing sweep");
        reduce(
            &self.raw,
            self.metrics
                .iter()
                .map(|entry| (entry.metric.as_ref(), aggregator)),
        )
    }

    /// Reduce the raw outputs using each metric's bound aggregator
    pub fn summary(&self) -> Result<SummaryTable, SweepError> {
        debug!("summarizing sweep with per-metric aggregators");
        reduce(
            &self.raw,
            self.metrics
                .iter()
                .map(|entry| (entry.metric.as_ref(), entry.aggregator)),
        )
    }

    /// One summary table per aggregator, in the order given
    pub fn results_for(&self, aggregators: &[Aggregator]) -> Result<Vec<SummaryTable>, SweepError> {
        aggregators.iter().map(|agg| self.results(*agg)).collect()
    }
}

impl<I, O> fmt::Debug for Sweep<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sweep")
            .field("config", &self.config)
            .field("has_generator", &self.generator.is_some())
            .field("has_simulator", &self.simulator.is_some())
            .field("metrics", &self.metric_names().collect::<Vec<_>>())
            .field("raw_sizes", &self.raw.len())
            .finish()
    }
}
