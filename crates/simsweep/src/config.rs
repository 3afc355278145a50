//! Run configuration loaded from YAML and merged with command-line flags.

use std::path::Path;

use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use simsweep_core::{Aggregator, SizeRange, SweepConfig};

use crate::cli::Args;
use crate::workload::{Algorithm, InputShape};

/// Everything needed to run one sweep of the built-in workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub range: SizeRange,
    pub repetitions: usize,
    pub algorithm: Algorithm,
    pub input: InputShape,
    /// Base seed for input generation; drawn at random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Aggregators applied uniformly; empty means per-metric bindings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aggregators: Vec<Aggregator>,
}

impl Default for RunConfig {
    fn default() -> Self {
        let sweep = SweepConfig::default();
        Self {
            range: sweep.range,
            repetitions: sweep.repetitions,
            algorithm: Algorithm::default(),
            input: InputShape::default(),
            seed: None,
            aggregators: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Load from a YAML file
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .wrap_err_with(|| format!("failed to parse config file {}", path.display()))
    }

    /// Resolve the configuration for a command line: the config file (if any)
    /// with every explicitly passed flag taking precedence.
    pub fn from_args(args: &Args) -> color_eyre::Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(args);
        Ok(config)
    }

    fn apply_overrides(&mut self, args: &Args) {
        if let Some(start) = args.start {
            self.range.start = start;
        }
        if let Some(end) = args.end {
            self.range.end = end;
        }
        if let Some(step) = args.step {
            self.range.step = step;
        }
        if let Some(repetitions) = args.repetitions {
            self.repetitions = repetitions;
        }
        if let Some(algorithm) = args.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(input) = args.input {
            self.input = input;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if !args.aggregators.is_empty() {
            self.aggregators = args.aggregators.clone();
        }
    }

    /// The numeric part handed to the sweep builder
    #[must_use]
    pub fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            range: self.range,
            repetitions: self.repetitions,
        }
    }
}
