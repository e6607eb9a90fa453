//! # List Command
//!
//! Prints one line per issue matching a JQL filter.

use anyhow::Result;
use clap::Args;
use jiracon_core::{BulkIssueFetcher, ConnectorConfig, print_info};

use crate::context::connect;
use crate::render::issue_line;

/// Command for listing issues
#[derive(Args)]
pub struct ListArgs {
  /// JQL filter, e.g. 'project = FE order by key'
  #[arg(required = true, index = 1)]
  pub jql: String,
}

pub(crate) fn handle_list_command(args: &ListArgs, config: &ConnectorConfig) -> Result<()> {
  let tracker = connect(config)?;
  let fetcher = BulkIssueFetcher::new(&tracker, config.fetch_limits()?);

  let issues = fetcher.fetch_all(&args.jql)?;
  if issues.is_empty() {
    print_info("No issues match the filter");
    return Ok(());
  }

  for issue in &issues {
    println!("{}", issue_line(issue));
  }
  Ok(())
}
