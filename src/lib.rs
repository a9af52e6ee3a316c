//! Vault audit failure triage — deterministic, rule-based.
//!
//! Streams a Vault-style audit log once, extracts failure events from
//! JSON-ish lines (tolerant of non-JSON prefixes and malformed payloads),
//! groups them by path|error signature, and emits a ranked report with
//! remediation advice plus a top-N executive summary.
//!
//! No AI, no DB, no network; pure computation + in-memory state.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod report;
pub mod rules;
pub mod signature;
pub mod types;

pub use aggregate::Aggregator;
pub use config::Config;
pub use error::TriageError;
pub use types::{AuditEvent, IncidentStats};

use std::io::{BufRead, Write};

/// Run the whole pipeline: stream lines from `input`, aggregate failure
/// events, and write the report to `out`.
///
/// Per-line problems (no payload, undecodable payload, empty error) are
/// absorbed; only a read failure on `input` aborts the run.
pub fn run<R: BufRead, W: Write>(
  input: R,
  rules: &[rules::Rule],
  config: &Config,
  out: &mut W,
) -> Result<(), TriageError> {
  let mut agg = Aggregator::new();
  for line in input.lines() {
    let line = line?;
    if let Some(event) = extract::extract(&line) {
      agg.observe(event);
    }
  }
  report::render(out, &agg.finish(), rules, config)
}
