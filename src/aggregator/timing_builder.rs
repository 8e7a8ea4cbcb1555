//! Accumulate query timings by `(type, field)`.
//!
//! Keys come from the query type and the field named in the free-text
//! description. Entries keep the order in which each key was first seen,
//! so that equal timings stay in document order after sorting.

use crate::utils::config::UNKNOWN_FIELD;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::metrics::nanos_to_millis;

/// Composite grouping key for timings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimingKey {
    /// Query type as reported by the profiler
    #[serde(rename = "type")]
    pub query_type: String,

    /// Field extracted from the description
    pub field: String,
}

impl TimingKey {
    pub fn new(query_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            query_type: query_type.into(),
            field: field.into(),
        }
    }

    /// Build a key from a node's type and description
    pub fn from_description(query_type: &str, description: &str) -> Self {
        Self::new(query_type, extract_field_name(description))
    }

    /// `type (field)` label used in tables
    pub fn label(&self) -> String {
        format!("{} ({})", self.query_type, self.field)
    }
}

/// Extract the field name targeted by a query description
///
/// Returns the text strictly before the first colon, untrimmed, or
/// `"Unknown Field"` when the description has no colon.
///
/// # Example
/// ```
/// use es_profile_analyzer::aggregator::extract_field_name;
///
/// assert_eq!(extract_field_name("status:active"), "status");
/// assert_eq!(extract_field_name("a:b:c"), "a");
/// assert_eq!(extract_field_name("match"), "Unknown Field");
/// ```
pub fn extract_field_name(description: &str) -> &str {
    match description.split_once(':') {
        Some((field, _)) => field,
        None => UNKNOWN_FIELD,
    }
}

/// Accumulated time for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingEntry {
    pub key: TimingKey,
    pub time_in_nanos: u64,
}

impl TimingEntry {
    pub fn new(key: TimingKey, time_in_nanos: u64) -> Self {
        Self { key, time_in_nanos }
    }

    pub fn time_ms(&self) -> f64 {
        nanos_to_millis(self.time_in_nanos)
    }
}

/// Running sums keyed by `TimingKey`, in first-seen order
#[derive(Debug, Default)]
pub struct TimingAccumulator {
    positions: HashMap<TimingKey, usize>,
    entries: Vec<TimingEntry>,
}

impl TimingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `nanos` to the entry for `(query_type, field of description)`
    pub fn add(&mut self, query_type: &str, description: &str, nanos: u64) {
        let key = TimingKey::from_description(query_type, description);

        match self.positions.get(&key) {
            Some(&pos) => {
                let entry = &mut self.entries[pos];
                entry.time_in_nanos = entry.time_in_nanos.saturating_add(nanos);
            }
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push(TimingEntry::new(key, nanos));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by accumulated time, descending
    ///
    /// The sort is stable: ties keep first-seen order.
    pub fn into_sorted(self) -> Vec<TimingEntry> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.time_in_nanos.cmp(&a.time_in_nanos));

        debug!("Sorted {} timing entries", entries.len());

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_field_name() {
        assert_eq!(extract_field_name("range:age"), "range");
        assert_eq!(extract_field_name("match"), "Unknown Field");
        assert_eq!(extract_field_name("a:b:c"), "a");
    }

    #[test]
    fn test_extract_field_name_keeps_whitespace() {
        assert_eq!(extract_field_name("title: foo"), "title");
        assert_eq!(extract_field_name("title :foo"), "title ");
        assert_eq!(extract_field_name(":leading"), "");
    }

    #[test]
    fn test_accumulator_sums_same_key() {
        let mut acc = TimingAccumulator::new();
        acc.add("TermQuery", "status:active", 100);
        acc.add("TermQuery", "status:inactive", 50);
        acc.add("TermQuery", "user:bob", 10);

        assert_eq!(acc.len(), 2);

        let sorted = acc.into_sorted();
        assert_eq!(sorted[0].key, TimingKey::new("TermQuery", "status"));
        assert_eq!(sorted[0].time_in_nanos, 150);
        assert_eq!(sorted[1].time_in_nanos, 10);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut acc = TimingAccumulator::new();
        acc.add("B", "b:1", 5);
        acc.add("A", "a:1", 5);
        acc.add("C", "c:1", 9);

        let order: Vec<String> = acc
            .into_sorted()
            .iter()
            .map(|e| e.key.query_type.clone())
            .collect();

        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_key_label() {
        assert_eq!(TimingKey::new("term", "status").label(), "term (status)");
    }
}
