//! Run configuration with the defaults the CLI ships with.

use std::path::PathBuf;

/// Tunables for one triage run.
#[derive(Debug, Clone)]
pub struct Config {
  /// Rule file consulted before falling back to the embedded defaults.
  pub rules_override: PathBuf,
  /// Entries shown under TOP FAILING PATHS.
  pub summary_top_paths: usize,
  /// Entries shown under TOP ERROR TYPES.
  pub summary_top_errors: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      rules_override: PathBuf::from("rules.json"),
      summary_top_paths: 3,
      summary_top_errors: 5,
    }
  }
}
