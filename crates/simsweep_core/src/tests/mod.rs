//! Scenario tests for the sweep engine
//!
//! Tests are organized by topic:
//! - `sweep` - Running trials and retaining raw outputs
//! - `builder` - Fluent configuration and build-time validation
//! - `summary` - Reducing raw outputs into summary tables


use crate::{FnMetric, Metric, Sweep};

/// Input for the sorting-like fixture procedure
#[derive(Debug, Clone)]
struct Input {
    data: Vec<i64>,
}

/// Operation counts reported by the fixture procedure
#[derive(Debug, Clone, Copy, PartialEq)]
struct Output {
    comparisons: u64,
    swaps: u64,
}

fn generate_input(n: i64) -> Input {
    Input {
        data: (0..n).rev().collect(),
    }
}

/// Counts that scale linearly with the input size
fn count_operations(input: &Input) -> Output {
    let len = input.data.len() as u64;
    Output {
        comparisons: len * 2,
        swaps: len,
    }
}

fn comparisons() -> impl Metric<Output> + 'static {
    FnMetric::new("comparisons", |out: &Output| out.comparisons as f64)
}

fn swaps() -> impl Metric<Output> + 'static {
    FnMetric::new("swaps", |out: &Output| out.swaps as f64)
}

/// A sweep configured directly on the engine, without the builder
fn configured_sweep(start: i64, end: i64, step: i64, repetitions: usize) -> Sweep<Input, Output> {
    let mut sweep = Sweep::new();
    sweep.set_input_generator(generate_input);
    sweep.set_simulator(count_operations);
    sweep.set_range(start, end, step);
    sweep.set_repetitions(repetitions);
    sweep.add_metric(comparisons()).unwrap();
    sweep.add_metric(swaps()).unwrap();
    sweep
}
