use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use simsweep_core::Aggregator;

use crate::workload::{Algorithm, InputShape};

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "simsweep")]
#[command(about = "Sweep sorting algorithms over input sizes and summarize operation counts")]
pub struct Args {
    /// YAML file with range, repetitions, algorithm, input, seed and aggregators
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First input size
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<i64>,

    /// Last input size (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    pub end: Option<i64>,

    /// Distance between consecutive sizes (must be positive)
    #[arg(long, allow_hyphen_values = true)]
    pub step: Option<i64>,

    /// Trials per size
    #[arg(short, long)]
    pub repetitions: Option<usize>,

    #[arg(short, long, value_enum)]
    pub algorithm: Option<Algorithm>,

    /// Arrangement of generated inputs
    #[arg(short, long, value_enum)]
    pub input: Option<InputShape>,

    /// Base seed for input generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Aggregate every metric with this aggregator (repeatable).
    /// Without it, each metric uses its own aggregator.
    #[arg(long = "aggregator", value_name = "NAME")]
    pub aggregators: Vec<Aggregator>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}
