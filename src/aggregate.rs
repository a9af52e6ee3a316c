//! Single-pass incident aggregation: per-signature stats plus two global
//! frequency counters (by path, by raw error text).

use std::collections::HashMap;

use crate::signature::signature;
use crate::types::{AuditEvent, IncidentStats};

/// In-memory aggregation state for one run. Fed one event at a time by the
/// consuming pass; drained exactly once at end of stream.
#[derive(Debug, Default)]
pub struct Aggregator {
  incidents: HashMap<String, IncidentStats>,
  path_counts: HashMap<String, u64>,
  error_counts: HashMap<String, u64>,
}

/// Frozen end-of-stream aggregates, ready for reporting.
#[derive(Debug)]
pub struct RunTotals {
  /// Incidents sorted by descending count, ties broken by ascending
  /// signature so equal-count groups render in a reproducible order.
  pub incidents: Vec<IncidentStats>,
  pub path_counts: HashMap<String, u64>,
  pub error_counts: HashMap<String, u64>,
}

impl Aggregator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fold one failure event into the running state.
  pub fn observe(&mut self, event: AuditEvent) {
    // The frequency counters run over every failure event, not once per
    // signature, and count the error text before trimming.
    *self.path_counts.entry(event.path.clone()).or_insert(0) += 1;
    *self.error_counts.entry(event.error.clone()).or_insert(0) += 1;

    let sig = signature(&event.path, &event.error);
    let stats = self
      .incidents
      .entry(sig.clone())
      .or_insert_with(|| IncidentStats::new(sig, &event));

    stats.count += 1;
    if event.timestamp < stats.first_seen {
      stats.first_seen = event.timestamp;
    }
    if event.timestamp > stats.last_seen {
      stats.last_seen = event.timestamp;
    }
    if !event.remote_address.is_empty() {
      stats.sources.insert(event.remote_address);
    }
  }

  /// Freeze the run: materialize and sort the incident list, hand over the
  /// counters untouched.
  pub fn finish(self) -> RunTotals {
    let mut incidents: Vec<IncidentStats> = self.incidents.into_values().collect();
    incidents.sort_by(|a, b| {
      b.count
        .cmp(&a.count)
        .then_with(|| a.signature.cmp(&b.signature))
    });

    RunTotals {
      incidents,
      path_counts: self.path_counts,
      error_counts: self.error_counts,
    }
  }
}

/// Materialize a frequency counter into its top-n entries, count descending,
/// key ascending on ties.
pub fn top_n(counts: &HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
  let mut entries: Vec<(String, u64)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
  entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
  entries.truncate(n);
  entries
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{DateTime, TimeZone, Utc};

  fn ts(min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 10, min, 0).unwrap()
  }

  fn make_event(path: &str, error: &str, addr: &str, timestamp: DateTime<Utc>) -> AuditEvent {
    AuditEvent {
      timestamp,
      error: error.into(),
      path: path.into(),
      remote_address: addr.into(),
      namespace_path: String::new(),
    }
  }

  #[test]
  fn count_matches_number_of_events() {
    let mut agg = Aggregator::new();
    for m in 0..4 {
      agg.observe(make_event("secret/app", "permission denied", "", ts(m)));
    }
    let totals = agg.finish();
    assert_eq!(totals.incidents.len(), 1);
    assert_eq!(totals.incidents[0].count, 4);
  }

  #[test]
  fn trimming_merges_groups_but_counters_stay_raw() {
    let mut agg = Aggregator::new();
    agg.observe(make_event("sys/audit", "permission denied\n", "", ts(0)));
    agg.observe(make_event("sys/audit", "permission denied", "", ts(5)));

    let totals = agg.finish();
    assert_eq!(totals.incidents.len(), 1, "trimmed errors share a signature");
    assert_eq!(totals.incidents[0].count, 2);
    assert_eq!(totals.incidents[0].first_seen, ts(0));
    assert_eq!(totals.incidents[0].last_seen, ts(5));

    // Raw error counter keys are verbatim, so the two spellings stay apart.
    assert_eq!(totals.error_counts.len(), 2);
    assert_eq!(totals.error_counts["permission denied\n"], 1);
    assert_eq!(totals.error_counts["permission denied"], 1);
    assert_eq!(totals.path_counts["sys/audit"], 2);
  }

  #[test]
  fn time_bounds_widen_regardless_of_arrival_order() {
    let mut agg = Aggregator::new();
    agg.observe(make_event("secret/app", "boom", "", ts(30)));
    agg.observe(make_event("secret/app", "boom", "", ts(10)));
    agg.observe(make_event("secret/app", "boom", "", ts(50)));

    let totals = agg.finish();
    assert_eq!(totals.incidents[0].first_seen, ts(10));
    assert_eq!(totals.incidents[0].last_seen, ts(50));
  }

  #[test]
  fn epoch_timestamp_is_a_valid_minimum() {
    let mut agg = Aggregator::new();
    agg.observe(make_event("secret/app", "boom", "", ts(10)));
    agg.observe(make_event("secret/app", "boom", "", DateTime::<Utc>::default()));

    let totals = agg.finish();
    assert_eq!(totals.incidents[0].first_seen, DateTime::<Utc>::default());
    assert_eq!(totals.incidents[0].last_seen, ts(10));
  }

  #[test]
  fn sources_deduplicate_and_drop_empty() {
    let mut agg = Aggregator::new();
    agg.observe(make_event("secret/app", "boom", "10.0.0.1", ts(0)));
    agg.observe(make_event("secret/app", "boom", "10.0.0.1", ts(1)));
    agg.observe(make_event("secret/app", "boom", "", ts(2)));
    agg.observe(make_event("secret/app", "boom", "10.0.0.2", ts(3)));

    let totals = agg.finish();
    let sources: Vec<&str> = totals.incidents[0].sources.iter().map(|s| s.as_str()).collect();
    assert_eq!(sources, vec!["10.0.0.1", "10.0.0.2"]);
  }

  #[test]
  fn first_observation_fixes_path_and_error() {
    let mut agg = Aggregator::new();
    agg.observe(make_event("sys/audit", "  boom  ", "", ts(0)));
    agg.observe(make_event("sys/audit", "boom", "", ts(1)));

    let totals = agg.finish();
    assert_eq!(totals.incidents[0].error_msg, "  boom  ");
    assert_eq!(totals.incidents[0].path, "sys/audit");
  }

  #[test]
  fn incidents_sort_by_count_then_signature() {
    let mut agg = Aggregator::new();
    agg.observe(make_event("b/path", "boom", "", ts(0)));
    agg.observe(make_event("a/path", "boom", "", ts(1)));
    agg.observe(make_event("c/path", "boom", "", ts(2)));
    agg.observe(make_event("c/path", "boom", "", ts(3)));

    let totals = agg.finish();
    let order: Vec<&str> = totals.incidents.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(order, vec!["c/path", "a/path", "b/path"]);
  }

  #[test]
  fn top_n_truncates_and_breaks_ties_by_key() {
    let mut counts = HashMap::new();
    counts.insert("secret/app".to_string(), 3);
    counts.insert("auth/login".to_string(), 5);
    counts.insert("sys/audit".to_string(), 3);
    counts.insert("secret/db".to_string(), 1);

    let top = top_n(&counts, 3);
    assert_eq!(
      top,
      vec![
        ("auth/login".to_string(), 5),
        ("secret/app".to_string(), 3),
        ("sys/audit".to_string(), 3),
      ]
    );
  }
}
