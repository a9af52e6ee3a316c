//! Structured error types for the triage tool.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}
