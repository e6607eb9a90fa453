//! # Bugs Command
//!
//! Canned release queries (bug lists, critical and reopened bugs, production
//! bugs, bugfixes and tasks) rendered as a table.

use anyhow::Result;
use clap::Args;
use jiracon_core::output::print_header;
use jiracon_core::version::release_date;
use jiracon_core::{ConnectorConfig, IssueTracker, QueryKind, ReportQueries, print_info, print_warning};
use tracing::debug;

use crate::context::connect;
use crate::render::bugs_table;

/// Command for the release reports
#[derive(Args)]
pub struct BugsArgs {
  /// Project key, e.g. FE
  #[arg(required = true, index = 1)]
  pub project: String,

  /// Version string as it appears in the version fields, e.g. 1.4.1
  #[arg(id = "fix_version", value_name = "VERSION", required = true, index = 2)]
  pub version: String,

  /// Which report to run
  #[arg(long, short = 'k', value_enum, default_value_t = QueryKind::Bugs)]
  pub kind: QueryKind,

  /// Release date for the production report; looked up from the project
  /// versions when omitted
  #[arg(long, value_name = "DATE")]
  pub since: Option<String>,
}

/// Release date to use for the production report
fn production_date<T: IssueTracker + ?Sized>(tracker: &T, args: &BugsArgs) -> Result<Option<String>> {
  if let Some(since) = &args.since {
    return Ok(Some(since.clone()));
  }

  let versions = tracker.project_versions(&args.project)?;
  let date = release_date(&versions, &args.version).map(str::to_string);
  debug!(version = %args.version, date = ?date, "Looked up release date");
  Ok(date)
}

pub(crate) fn handle_bugs_command(args: &BugsArgs, config: &ConnectorConfig) -> Result<()> {
  let tracker = connect(config)?;

  let date = if args.kind.needs_date() {
    let date = production_date(&tracker, args)?;
    if date.is_none() {
      print_warning(&format!("{} {} has no release date", args.project, args.version));
    }
    date
  } else {
    None
  };

  let queries = ReportQueries::new(&tracker, config.fetch_limits()?, &config.filters);
  let issues = queries.run(args.kind, &args.project, &args.version, date.as_deref())?;

  print_header(&format!("{} {}: {}", args.project, args.version, args.kind));
  if issues.is_empty() {
    print_info("No issues found");
    return Ok(());
  }

  println!("{}", bugs_table(&issues));
  print_info(&format!("{} issues", issues.len()));
  Ok(())
}
