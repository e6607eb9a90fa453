//! # Print Command
//!
//! Streams a fixed-width table of the matching issues, one page at a time.

use anyhow::Result;
use clap::Args;
use jiracon_core::{BulkIssueFetcher, ConnectorConfig, print_info};

use crate::context::connect;
use crate::render::{print_header_row, print_row};

/// Command for printing an issue table
#[derive(Args)]
pub struct PrintArgs {
  /// JQL filter
  #[arg(required = true, index = 1)]
  pub jql: String,
}

pub(crate) fn handle_print_command(args: &PrintArgs, config: &ConnectorConfig) -> Result<()> {
  let tracker = connect(config)?;
  let fetcher = BulkIssueFetcher::new(&tracker, config.fetch_limits()?);

  println!("{}", print_header_row());
  let issues = fetcher.fetch_each_page(&args.jql, |page| {
    for issue in page {
      println!("{}", print_row(issue));
    }
    Ok(())
  })?;

  print_info(&format!("{} issues", issues.len()));
  Ok(())
}
