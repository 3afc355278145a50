//! Raw trial outputs and the summary tables reduced from them.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

use crate::aggregate::Aggregator;
use crate::error::SweepError;
use crate::model::Metric;

/// Trial outputs retained per size, in the order the trials ran.
#[derive(Debug, Clone)]
pub struct RawResults<O> {
    by_size: BTreeMap<i64, Vec<O>>,
}

impl<O> Default for RawResults<O> {
    fn default() -> Self {
        Self {
            by_size: BTreeMap::new(),
        }
    }
}

impl<O> RawResults<O> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the outputs for `size`, replacing any previous entry
    pub fn insert(&mut self, size: i64, outputs: Vec<O>) {
        self.by_size.insert(size, outputs);
    }

    pub fn clear(&mut self) {
        self.by_size.clear();
    }

    /// Outputs recorded for `size`
    #[must_use]
    pub fn get(&self, size: i64) -> Option<&[O]> {
        self.by_size.get(&size).map(Vec::as_slice)
    }

    /// Sizes with recorded outputs, ascending
    pub fn sizes(&self) -> impl Iterator<Item = i64> + '_ {
        self.by_size.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &[O])> {
        self.by_size
            .iter()
            .map(|(size, outputs)| (*size, outputs.as_slice()))
    }

    /// Number of sizes with recorded outputs
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_size.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_size.is_empty()
    }

    /// Total number of trial outputs across all sizes
    #[must_use]
    pub fn trial_count(&self) -> usize {
        self.by_size.values().map(Vec::len).sum()
    }
}

/// Aggregated values keyed by metric name, then by size.
///
/// Rebuilt from the raw results on every request; holds no link back to the
/// engine that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SummaryTable {
    metrics: BTreeMap<String, BTreeMap<i64, f64>>,
}

impl SummaryTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, metric: &str, size: i64, value: f64) {
        self.metrics
            .entry(metric.to_string())
            .or_default()
            .insert(size, value);
    }

    /// Aggregated value for one metric at one size
    #[must_use]
    pub fn get(&self, metric: &str, size: i64) -> Option<f64> {
        self.metrics.get(metric)?.get(&size).copied()
    }

    /// All sizes and values for one metric
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<&BTreeMap<i64, f64>> {
        self.metrics.get(name)
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    /// Sizes present in the table. Every metric carries the same sizes.
    pub fn sizes(&self) -> impl Iterator<Item = i64> + '_ {
        self.metrics
            .values()
            .next()
            .into_iter()
            .flat_map(|by_size| by_size.keys().copied())
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeMap<i64, f64>> {
        self.metrics.iter()
    }

    /// Number of metrics in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl<'a> IntoIterator for &'a SummaryTable {
    type Item = (&'a String, &'a BTreeMap<i64, f64>);
    type IntoIter = btree_map::Iter<'a, String, BTreeMap<i64, f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Reduce raw outputs into a summary table.
///
/// Each `(metric, aggregator)` pair is applied to every size independently:
/// the metric is extracted from every retained output at that size, and the
/// resulting scalars are reduced with the paired aggregator. The first
/// metric/size pair without outputs fails the whole request.
pub(crate) fn reduce<'m, O, M>(
    raw: &RawResults<O>,
    metrics: impl IntoIterator<Item = (&'m M, Aggregator)>,
) -> Result<SummaryTable, SweepError>
where
    M: Metric<O> + ?Sized + 'm,
{
    let mut table = SummaryTable::new();
    let mut extracted = Vec::new();

    for (metric, aggregator) in metrics {
        let name = metric.name();

        for (size, outputs) in raw.iter() {
            extracted.clear();
            extracted.extend(outputs.iter().map(|out| metric.extract(out)));

            let value =
                aggregator
                    .aggregate(&extracted)
                    .map_err(|_| SweepError::InsufficientData {
                        metric: name.to_string(),
                        size,
                    })?;

            table.insert(name, size, value);
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FnMetric;

    fn raw_fixture() -> RawResults<(f64, f64)> {
        let mut raw = RawResults::new();
        raw.insert(10, vec![(1.0, 10.0), (3.0, 30.0)]);
        raw.insert(20, vec![(2.0, 20.0), (6.0, 60.0)]);
        raw
    }

    #[test]
    fn test_raw_results_accessors() {
        let raw = raw_fixture();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.trial_count(), 4);
        assert_eq!(raw.sizes().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(raw.get(20).map(<[_]>::len), Some(2));
        assert!(raw.get(30).is_none());
    }

    #[test]
    fn test_insert_replaces_existing_size() {
        let mut raw = raw_fixture();
        raw.insert(10, vec![(9.0, 9.0)]);
        assert_eq!(raw.get(10), Some(&[(9.0, 9.0)][..]));
        assert_eq!(raw.trial_count(), 3);
    }

    #[test]
    fn test_reduce_pairs_each_metric_with_its_aggregator() {
        let raw = raw_fixture();
        let first = FnMetric::new("first", |o: &(f64, f64)| o.0);
        let second = FnMetric::new("second", |o: &(f64, f64)| o.1);

        let table = reduce(
            &raw,
            [
                (&first as &dyn Metric<(f64, f64)>, Aggregator::Mean),
                (&second as &dyn Metric<(f64, f64)>, Aggregator::Max),
            ],
        )
        .unwrap();

        assert_eq!(table.get("first", 10), Some(2.0));
        assert_eq!(table.get("first", 20), Some(4.0));
        assert_eq!(table.get("second", 10), Some(30.0));
        assert_eq!(table.get("second", 20), Some(60.0));
    }

    #[test]
    fn test_reduce_empty_outputs_is_insufficient_data() {
        let mut raw: RawResults<f64> = RawResults::new();
        raw.insert(5, Vec::new());
        let m = FnMetric::new("value", |o: &f64| *o);

        let err = reduce(&raw, [(&m as &dyn Metric<f64>, Aggregator::Median)]).unwrap_err();
        assert_eq!(
            err,
            SweepError::InsufficientData {
                metric: "value".to_string(),
                size: 5
            }
        );
    }

    #[test]
    fn test_summary_table_serializes_as_nested_map() {
        let mut table = SummaryTable::new();
        table.insert("swaps", 10, 4.5);
        table.insert("swaps", 20, 9.0);

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"swaps":{"10":4.5,"20":9.0}}"#);
    }

    #[test]
    fn test_summary_table_sizes_and_names() {
        let mut table = SummaryTable::new();
        table.insert("b", 2, 1.0);
        table.insert("a", 1, 1.0);
        table.insert("a", 2, 1.0);
        table.insert("b", 1, 1.0);

        assert_eq!(table.len(), 2);
        assert_eq!(table.metric_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(table.sizes().collect::<Vec<_>>(), vec![1, 2]);
        assert!(SummaryTable::new().sizes().next().is_none());
    }
}
