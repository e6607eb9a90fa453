//! # Timing Command
//!
//! Total and average interval between the timestamps of the matching issues.

use anyhow::Result;
use clap::{Args, ValueEnum};
use jiracon_core::dates::{average_duration, total_duration};
use jiracon_core::text::format_duration;
use jiracon_core::{BulkIssueFetcher, ConnectorConfig, JiraIssue};

use crate::context::connect;

/// Issue timestamp to measure
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingField {
  #[default]
  Created,
  Resolutiondate,
}

impl TimingField {
  fn value(self, issue: &JiraIssue) -> Option<&str> {
    match self {
      Self::Created => issue.fields.created.as_deref(),
      Self::Resolutiondate => issue.fields.resolutiondate.as_deref(),
    }
  }
}

/// Command for measuring intervals
#[derive(Args)]
pub struct TimingArgs {
  /// JQL filter; the order it sorts by is the order averaged over
  #[arg(required = true, index = 1)]
  pub jql: String,

  #[arg(long, value_enum, default_value_t = TimingField::Created)]
  pub field: TimingField,
}

pub(crate) fn handle_timing_command(args: &TimingArgs, config: &ConnectorConfig) -> Result<()> {
  let tracker = connect(config)?;
  let fetcher = BulkIssueFetcher::new(&tracker, config.fetch_limits()?);
  let issues = fetcher.fetch_all(&args.jql)?;

  let field = args.field;
  let dates = || issues.iter().map(move |issue| field.value(issue));
  let with_date = dates().flatten().count();

  println!("Issues: {} ({with_date} with a date)", issues.len());
  println!("Total: {}", format_duration(total_duration(dates())?));
  println!("Average: {}", format_duration(average_duration(dates())?));
  Ok(())
}
