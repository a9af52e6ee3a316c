//! Binary entrypoint: triage one audit log file and print the report.
//!
//! Usage: vault-triage <logfile>
//!
//! A missing argument exits non-zero with a usage line. An unreadable log
//! file prints a clean message to the report stream and returns without a
//! report (no panic, no partial output).

use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;

use vault_triage::rules::{self, RuleSource};
use vault_triage::Config;

fn main() {
  let args: Vec<String> = env::args().collect();
  if args.len() < 2 {
    eprintln!("Usage: vault-triage <logfile>");
    process::exit(1);
  }

  let config = Config::default();
  let (rule_set, source) = rules::load_rules(&config.rules_override);
  if source == RuleSource::Override {
    println!("Using local '{}' override.", config.rules_override.display());
  }

  let file = match File::open(&args[1]) {
    Ok(f) => f,
    Err(_) => {
      println!("Error: could not open file '{}'", args[1]);
      return;
    }
  };

  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  if let Err(e) = vault_triage::run(BufReader::new(file), &rule_set, &config, &mut out) {
    let _ = writeln!(io::stderr(), "vault-triage: {}", e);
    process::exit(1);
  }
  let _ = out.flush();
}
