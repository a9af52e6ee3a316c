//! Core types for the triage pipeline (JSON contracts + internal models).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what an audit log line carries)
// ---------------------------------------------------------------------------

/// One decoded audit payload. Unknown fields are silently ignored; every
/// recognized field is optional so partial payloads still decode.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditRecord {
  #[serde(default)]
  pub time: String,
  #[serde(default)]
  pub error: String,
  #[serde(default)]
  pub request: AuditRequest,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditRequest {
  #[serde(default)]
  pub operation: String,
  #[serde(default)]
  pub path: String,
  #[serde(default)]
  pub remote_address: String,
  #[serde(default)]
  pub namespace: AuditNamespace,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditNamespace {
  #[serde(default)]
  pub path: String,
}

// ---------------------------------------------------------------------------
// Internal event model
// ---------------------------------------------------------------------------

/// Canonical failure event after extraction. One per failure line; consumed
/// by the aggregator immediately, never retained.
#[derive(Debug, Clone)]
pub struct AuditEvent {
  /// Parsed `time` field; the epoch default when the field is absent or not
  /// valid RFC3339.
  pub timestamp: DateTime<Utc>,
  /// Error text verbatim from the log. Non-empty by construction.
  pub error: String,
  pub path: String,
  pub remote_address: String,
  /// Namespace path as recorded by the audit device; carried for parity with
  /// the audit format, not grouped on.
  pub namespace_path: String,
}

// ---------------------------------------------------------------------------
// Aggregation state (per-signature, in-memory)
// ---------------------------------------------------------------------------

/// Aggregated failure group keyed by signature.
#[derive(Debug, Clone)]
pub struct IncidentStats {
  pub signature: String,
  pub path: String,
  /// Error text exactly as first observed for this signature.
  pub error_msg: String,
  pub count: u64,
  pub first_seen: DateTime<Utc>,
  pub last_seen: DateTime<Utc>,
  /// Distinct non-empty remote addresses, kept sorted.
  pub sources: BTreeSet<String>,
}

impl IncidentStats {
  /// Seed a fresh group from its first event. The count starts at zero and is
  /// bumped by the same observe step that runs for every later event.
  pub fn new(signature: String, event: &AuditEvent) -> Self {
    Self {
      signature,
      path: event.path.clone(),
      error_msg: event.error.clone(),
      count: 0,
      first_seen: event.timestamp,
      last_seen: event.timestamp,
      sources: BTreeSet::new(),
    }
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — executive summary records)
// ---------------------------------------------------------------------------

/// Top-N entry under TOP FAILING PATHS.
#[derive(Debug, Clone, Serialize)]
pub struct PathCountRecord {
  #[serde(rename = "Path")]
  pub path: String,
  #[serde(rename = "Count")]
  pub count: u64,
}

/// Top-N entry under TOP ERROR TYPES.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorCountRecord {
  #[serde(rename = "Errors")]
  pub errors: String,
  #[serde(rename = "Count")]
  pub count: u64,
}
