//! # History Command
//!
//! Summarizes the status history of a single issue.

use anyhow::Result;
use clap::Args;
use jiracon_core::changelog::{last_actor_into_status, last_transition_date, reopen_count};
use jiracon_core::output::{format_issue_key, format_status, format_timestamp, print_header};
use jiracon_core::{ConnectorConfig, IssueTracker};

use crate::context::connect;
use crate::render::short_date;

/// Command for inspecting an issue's history
#[derive(Args)]
pub struct HistoryArgs {
  /// Issue key, e.g. FE-123
  #[arg(required = true, index = 1)]
  pub key: String,

  /// Status to report on; defaults to the configured resolver status
  #[arg(long, short = 's')]
  pub status: Option<String>,
}

pub(crate) fn handle_history_command(args: &HistoryArgs, config: &ConnectorConfig) -> Result<()> {
  let tracker = connect(config)?;
  let status = args.status.as_deref().unwrap_or(&config.resolver_status);

  let mut issue = tracker.issue_with_changelog(&args.key)?;
  let changelog = issue.changelog.take().unwrap_or_default();

  let actor = last_actor_into_status(&changelog, status);
  let date = last_transition_date(&changelog, status).map_or_else(|| "-".to_string(), short_date);

  print_header(&format!(
    "{} {} ({})",
    format_issue_key(&issue.key),
    issue.fields.summary,
    format_status(issue.status_name())
  ));
  println!(
    "Last moved to {status} by: {}",
    if actor.is_empty() { "-" } else { actor.as_str() }
  );
  println!("Last moved to {status} on: {}", format_timestamp(&date));
  println!("Reopened: {} times", reopen_count(&changelog));
  Ok(())
}
