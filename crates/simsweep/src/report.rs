//! Formatting summary tables for the terminal or as JSON.

use std::fmt::Write;

use serde::Serialize;
use simsweep_core::{Aggregator, SummaryTable};

/// One summary table and how it was aggregated
#[derive(Debug, Serialize)]
pub struct Section {
    /// `None` when each metric used its own aggregator
    pub aggregator: Option<Aggregator>,
    pub results: SummaryTable,
}

impl Section {
    fn title(&self) -> String {
        match self.aggregator {
            Some(agg) => format!("aggregator: {agg}"),
            None => "aggregator: per metric".to_string(),
        }
    }
}

/// Render sections as aligned text tables, one row per size
pub fn render_table(sections: &[Section]) -> String {
    let mut out = String::new();

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", section.title());

        let names: Vec<&str> = section.results.metric_names().collect();
        if names.is_empty() {
            out.push_str("(no results)\n");
            continue;
        }

        let width = names.iter().map(|n| n.len()).max().unwrap_or(0).max(12);
        let _ = write!(out, "{:>8}", "size");
        for name in &names {
            let _ = write!(out, "  {name:>width$}");
        }
        out.push('\n');

        for size in section.results.sizes() {
            let _ = write!(out, "{size:>8}");
            for name in &names {
                match section.results.get(name, size) {
                    Some(value) => {
                        let _ = write!(out, "  {value:>width$.2}");
                    }
                    None => {
                        let _ = write!(out, "  {:>width$}", "-");
                    }
                }
            }
            out.push('\n');
        }
    }

    out
}

pub fn render_json(sections: &[Section]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(sections)
}
