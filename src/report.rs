//! Report rendering: ranked per-incident blocks plus the executive summary.
//!
//! The core pipeline hands over frozen `RunTotals`; everything here is
//! formatting over already-computed aggregates.

use std::io::Write;

use chrono::Duration;

use crate::aggregate::{self, RunTotals};
use crate::config::Config;
use crate::error::TriageError;
use crate::rules::{self, Rule};
use crate::types::{ErrorCountRecord, PathCountRecord};

const RULE_WIDTH: usize = 80;

/// Coarse incident category derived from the request path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
  Sys,
  Auth,
  Data,
}

impl Category {
  pub fn from_path(path: &str) -> Self {
    if path.starts_with("sys/") {
      Self::Sys
    } else if path.starts_with("auth/") {
      Self::Auth
    } else {
      Self::Data
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Sys => "SYS",
      Self::Auth => "AUTH",
      Self::Data => "DATA",
    }
  }
}

/// Collapse newlines, tabs and runs of whitespace so an error renders on one
/// line.
fn flatten(s: &str) -> String {
  s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render an elapsed span as "2h45m10s" / "45m10s" / "10s". Spans are never
/// negative (first_seen <= last_seen).
fn format_duration(d: Duration) -> String {
  let secs = d.num_seconds().max(0);
  let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
  match (h, m) {
    (0, 0) => format!("{}s", s),
    (0, _) => format!("{}m{}s", m, s),
    _ => format!("{}h{}m{}s", h, m, s),
  }
}

/// Write the full report: header, one block per incident in descending-count
/// order, then the executive summary.
pub fn render<W: Write>(
  out: &mut W,
  totals: &RunTotals,
  rules: &[Rule],
  config: &Config,
) -> Result<(), TriageError> {
  writeln!(out, "VAULT AUDIT ANALYSIS REPORT")?;
  writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

  for inc in &totals.incidents {
    let advice = rules::match_advice(&inc.path, &inc.error_msg, rules);
    let sources: Vec<&str> = inc.sources.iter().map(|s| s.as_str()).collect();

    writeln!(out, "{:<12} [{}]", "CATEGORY:", Category::from_path(&inc.path).label())?;
    writeln!(out, "{:<12} {}", "COUNT:", inc.count)?;
    writeln!(out, "{:<12} {}", "PATH:", inc.path)?;
    writeln!(out, "{:<12} {}", "ERROR:", flatten(&inc.error_msg))?;
    writeln!(
      out,
      "{:<12} {} -> {} ({})",
      "TIMEFRAME:",
      inc.first_seen.format("%H:%M:%S"),
      inc.last_seen.format("%H:%M:%S"),
      format_duration(inc.last_seen - inc.first_seen)
    )?;
    writeln!(out, "{:<12} {:?}", "SOURCES:", sources)?;
    writeln!(out, "{:<12} {}", "ANALYSIS:", advice)?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
  }

  render_summary(out, totals, config)
}

/// Executive summary: top failing paths and top raw error texts, each entry
/// as a small pretty-printed JSON record.
fn render_summary<W: Write>(
  out: &mut W,
  totals: &RunTotals,
  config: &Config,
) -> Result<(), TriageError> {
  writeln!(out)?;
  writeln!(out, "EXECUTIVE SUMMARY")?;
  writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

  writeln!(out, "TOP FAILING PATHS (JSON):")?;
  for (path, count) in aggregate::top_n(&totals.path_counts, config.summary_top_paths) {
    let record = PathCountRecord { path, count };
    writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
  }
  writeln!(out)?;

  writeln!(out, "TOP ERROR TYPES (JSON):")?;
  for (errors, count) in aggregate::top_n(&totals.error_counts, config.summary_top_errors) {
    let record = ErrorCountRecord { errors, count };
    writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
  }
  writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
  Ok(())
}
