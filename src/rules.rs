//! Remediation rules: ordered substring patterns with a two-source loading
//! policy (local override file, else compiled-in defaults).

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Advice attached to incidents that no rule claims.
pub const DEFAULT_ADVICE: &str = "Investigate this error pattern.";

/// Compiled-in fallback rule set.
const EMBEDDED_RULES: &str = include_str!("../rules.json");

/// One (pattern, advice) pair. List order is match priority: earlier wins.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
  pub pattern: String,
  pub advice: String,
}

/// Which source `load_rules` ended up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
  Override,
  Embedded,
}

/// Load the rule list. A readable override file wins outright, even when its
/// contents fail to decode (that degrades to an empty list, same as an
/// undecodable embedded set). Loading never aborts a run.
pub fn load_rules(override_path: &Path) -> (Vec<Rule>, RuleSource) {
  if let Ok(data) = fs::read_to_string(override_path) {
    let rules = serde_json::from_str(&data).unwrap_or_default();
    return (rules, RuleSource::Override);
  }
  let rules = serde_json::from_str(EMBEDDED_RULES).unwrap_or_default();
  (rules, RuleSource::Embedded)
}

/// Resolve advice for one incident: the first rule whose pattern occurs
/// anywhere in "path + error" wins, with embedded newlines in the error
/// flattened to spaces so multi-line errors still match single-line patterns.
/// Substring containment only; patterns are not regexes.
pub fn match_advice<'a>(path: &str, error: &str, rules: &'a [Rule]) -> &'a str {
  let search_text = format!("{} {}", path, error.replace('\n', " "));
  rules
    .iter()
    .find(|r| search_text.contains(&r.pattern))
    .map(|r| r.advice.as_str())
    .unwrap_or(DEFAULT_ADVICE)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rule(pattern: &str, advice: &str) -> Rule {
    Rule {
      pattern: pattern.into(),
      advice: advice.into(),
    }
  }

  #[test]
  fn first_match_wins_over_more_specific_later_rule() {
    let rules = vec![rule("x", "A"), rule("xy", "B")];
    assert_eq!(match_advice("secret/app", "xy happened", &rules), "A");
  }

  #[test]
  fn rule_can_match_on_the_path() {
    let rules = vec![rule("sys/audit", "audit device advice")];
    assert_eq!(match_advice("sys/audit", "boom", &rules), "audit device advice");
  }

  #[test]
  fn no_match_falls_back_to_default() {
    let rules = vec![rule("sealed", "unseal it")];
    assert_eq!(match_advice("secret/app", "boom", &rules), DEFAULT_ADVICE);
  }

  #[test]
  fn empty_rule_list_always_yields_default() {
    assert_eq!(match_advice("auth/login", "rate limit hit", &[]), DEFAULT_ADVICE);
  }

  #[test]
  fn multiline_error_matches_single_line_pattern() {
    let rules = vec![rule("permission denied on read", "fix policy")];
    let error = "permission\ndenied on read";
    assert_eq!(match_advice("secret/app", error, &rules), "fix policy");
  }

  #[test]
  fn embedded_rules_decode_and_are_ordered() {
    let rules: Vec<Rule> = serde_json::from_str(EMBEDDED_RULES).unwrap();
    assert!(!rules.is_empty());
    assert_eq!(rules[0].pattern, "permission denied");
  }

  #[test]
  fn missing_override_falls_back_to_embedded() {
    let (rules, source) = load_rules(Path::new("definitely-not-here/rules.json"));
    assert_eq!(source, RuleSource::Embedded);
    assert!(!rules.is_empty());
  }
}
