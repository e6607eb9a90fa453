//! # Transit Command
//!
//! Applies a workflow transition to every issue matching a filter.

use anyhow::Result;
use clap::Args;
use jiracon_core::{ConnectorConfig, print_info, print_success, print_warning, transit_all};

use crate::context::connect;
use crate::render::{outcome_header_row, outcome_row};

/// Command for transitioning issues in bulk
#[derive(Args)]
pub struct TransitArgs {
  /// JQL filter selecting the issues to transition
  #[arg(required = true, index = 1)]
  pub jql: String,

  /// Name of the transition to apply, e.g. 'Resolve'
  #[arg(long, short = 't')]
  pub transition: String,

  /// Status the issues are expected to reach
  #[arg(long, short = 's')]
  pub status: String,

  /// Assign each issue back to whoever last moved it into this status first
  #[arg(long, value_name = "STATUS")]
  pub reassign_from: Option<String>,
}

pub(crate) fn handle_transit_command(args: &TransitArgs, config: &ConnectorConfig) -> Result<()> {
  let tracker = connect(config)?;

  let mut header_printed = false;
  let outcomes = transit_all(
    &tracker,
    &args.jql,
    config.fetch_limits()?,
    &args.transition,
    &args.status,
    args.reassign_from.as_deref(),
    |outcome| {
      if !header_printed {
        println!("{}", outcome_header_row());
        header_printed = true;
      }
      println!("{}", outcome_row(outcome));
      if !outcome.matched {
        print_warning(&format!(
          "{} is '{}', expected '{}'",
          outcome.key, outcome.status, args.status
        ));
      }
    },
  )?;

  if outcomes.is_empty() {
    print_info("No issues match the filter");
    return Ok(());
  }

  let unchanged = outcomes.iter().filter(|outcome| !outcome.matched).count();
  if unchanged == 0 {
    print_success(&format!("{} issues moved to '{}'", outcomes.len(), args.status));
  } else {
    print_warning(&format!(
      "{} of {} issues did not reach '{}'",
      unchanged,
      outcomes.len(),
      args.status
    ));
  }
  Ok(())
}
