//! Command-line driver for the sweep engine
//!
//! Runs one of the built-in sorting algorithms over generated inputs across a
//! size range and prints per-size summaries of comparison and swap counts.

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod workload;

use color_eyre::eyre::WrapErr;
use simsweep_core::{Aggregator, Sweep, SweepProgress};

pub use cli::{Args, OutputFormat};
pub use config::RunConfig;
pub use logging::init_logging;
pub use report::{Section, render_json, render_table};

use workload::{InputFactory, comparisons_metric, random_seed, swaps_metric};

/// Run the sweep described by `config` and summarize it.
///
/// Produces one section per configured aggregator, or a single section using
/// each metric's own aggregator (mean for comparisons, median for swaps) when
/// none are configured.
pub fn run_sweep(config: &RunConfig) -> color_eyre::Result<Vec<Section>> {
    let seed = config.seed.unwrap_or_else(random_seed);
    let generator = InputFactory::new(config.input, seed)?;

    let mut sweep = Sweep::builder()
        .config(config.sweep_config())
        .input_generator(generator)
        .simulator(config.algorithm)
        .metric_with(comparisons_metric(), Aggregator::Mean)
        .metric_with(swaps_metric(), Aggregator::Median)
        .build()
        .wrap_err("invalid sweep configuration")?;

    tracing::info!(
        algorithm = ?config.algorithm,
        input = ?config.input,
        seed,
        start = config.range.start,
        end = config.range.end,
        step = config.range.step,
        repetitions = config.repetitions,
        "running sweep"
    );

    let progress = SweepProgress::default();
    sweep.run_with_progress(&progress)?;
    tracing::info!(trials = progress.completed(), "sweep finished");

    if config.aggregators.is_empty() {
        return Ok(vec![Section {
            aggregator: None,
            results: sweep.summary()?,
        }]);
    }

    let tables = sweep.results_for(&config.aggregators)?;
    Ok(config
        .aggregators
        .iter()
        .zip(tables)
        .map(|(agg, results)| Section {
            aggregator: Some(*agg),
            results,
        })
        .collect())
}

/// Run the sweep and render it in the requested format
pub fn execute(config: &RunConfig, format: OutputFormat) -> color_eyre::Result<String> {
    let sections = run_sweep(config)?;
    match format {
        OutputFormat::Table => Ok(render_table(&sections)),
        OutputFormat::Json => Ok(render_json(&sections)?),
    }
}

#[cfg(test)]
mod tests {
    use simsweep_core::{SizeRange, SweepError};

    use super::*;
    use crate::workload::{Algorithm, InputShape};

    fn config(algorithm: Algorithm) -> RunConfig {
        RunConfig {
            range: SizeRange::new(10, 30, 10),
            repetitions: 3,
            algorithm,
            input: InputShape::Reversed,
            seed: Some(1),
            aggregators: Vec::new(),
        }
    }

    #[test]
    fn test_default_section_uses_metric_bindings() {
        let sections = run_sweep(&config(Algorithm::Insertion)).unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].aggregator, None);
        let results = &sections[0].results;
        // Reversed input of n elements: n(n-1)/2 comparisons and swaps
        assert_eq!(results.get("comparisons", 10), Some(45.0));
        assert_eq!(results.get("swaps", 20), Some(190.0));
        assert_eq!(results.sizes().collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn test_one_section_per_aggregator() {
        let mut config = config(Algorithm::Bubble);
        config.input = InputShape::Shuffled;
        config.aggregators = vec![Aggregator::Min, Aggregator::Max];

        let sections = run_sweep(&config).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].aggregator, Some(Aggregator::Min));
        for size in [10, 20, 30] {
            let min = sections[0].results.get("swaps", size).unwrap();
            let max = sections[1].results.get("swaps", size).unwrap();
            assert!(min <= max);
        }
    }

    #[test]
    fn test_invalid_step_is_reported() {
        let mut config = config(Algorithm::Merge);
        config.range.step = 0;

        let err = run_sweep(&config).unwrap_err();
        assert_eq!(
            err.root_cause().downcast_ref::<SweepError>(),
            Some(&SweepError::InvalidStep { step: 0 })
        );
    }

    #[test]
    fn test_zero_repetitions_is_reported() {
        let mut config = config(Algorithm::Selection);
        config.repetitions = 0;

        let err = run_sweep(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SweepError>(),
            Some(SweepError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_unseeded_run_matches_seeded_shape() {
        let mut seeded = config(Algorithm::Insertion);
        seeded.input = InputShape::Shuffled;
        let mut unseeded = seeded.clone();
        unseeded.seed = None;

        let seeded = run_sweep(&seeded).unwrap();
        let unseeded = run_sweep(&unseeded).unwrap();

        assert_eq!(unseeded.len(), 1);
        let (a, b) = (&seeded[0].results, &unseeded[0].results);
        assert_eq!(
            a.metric_names().collect::<Vec<_>>(),
            b.metric_names().collect::<Vec<_>>()
        );
        assert_eq!(a.sizes().collect::<Vec<_>>(), b.sizes().collect::<Vec<_>>());
        assert!(b.get("comparisons", 30).is_some_and(|v| v > 0.0));
    }

    #[test]
    fn test_execute_json() {
        let output = execute(&config(Algorithm::Merge), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value[0]["aggregator"].is_null());
        assert!(value[0]["results"]["comparisons"]["30"].is_number());
    }
}
