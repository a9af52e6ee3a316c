//! Stable grouping signature: request path + trimmed raw error text.

/// Build the grouping key for a failure event.
///
/// The error text is trimmed of leading/trailing whitespace and otherwise used
/// verbatim: no case folding, no punctuation stripping, no collapsing of
/// interior whitespace. The pipe separator does not occur in Vault request
/// paths, so distinct (path, error) pairs cannot collide.
pub fn signature(path: &str, error: &str) -> String {
  format!("{}|{}", path, error.trim())
}
