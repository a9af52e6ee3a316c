//! Tolerant extraction of failure events from raw audit log lines.

use chrono::{DateTime, Utc};

use crate::types::{AuditEvent, AuditRecord};

/// Extract a failure event from one raw line, or `None` when the line carries
/// none.
///
/// Skipped (never an error): lines with no `{`, payloads that do not decode,
/// and events whose `error` field is empty. A `time` field that is not valid
/// RFC3339 degrades to the epoch default timestamp; the event is still
/// counted.
pub fn extract(line: &str) -> Option<AuditEvent> {
  let start = line.find('{')?;
  let record: AuditRecord = serde_json::from_str(&line[start..]).ok()?;
  if record.error.is_empty() {
    return None;
  }

  let timestamp = DateTime::parse_from_rfc3339(&record.time)
    .map(|t| t.with_timezone(&Utc))
    .unwrap_or_default();

  Some(AuditEvent {
    timestamp,
    error: record.error,
    path: record.request.path,
    remote_address: record.request.remote_address,
    namespace_path: record.request.namespace.path,
  })
}
