//! # Versions Command
//!
//! First and last release of a major version line.

use anyhow::Result;
use clap::Args;
use jiracon_core::version::{first_release_version, last_release_version};
use jiracon_core::{ConnectorConfig, IssueTracker, print_warning};

use crate::context::connect;
use crate::render::versions_table;

/// Command for looking up release versions
#[derive(Args)]
pub struct VersionsArgs {
  /// Project key, e.g. FE
  #[arg(required = true, index = 1)]
  pub project: String,

  /// Major version, e.g. 1 matches 1, 1.0 and 1.4.2 but not 10.1
  #[arg(required = true, index = 2)]
  pub major: String,
}

pub(crate) fn handle_versions_command(args: &VersionsArgs, config: &ConnectorConfig) -> Result<()> {
  let tracker = connect(config)?;
  let versions = tracker.project_versions(&args.project)?;

  match (
    first_release_version(&versions, &args.major),
    last_release_version(&versions, &args.major),
  ) {
    (Some(first), Some(last)) => println!("{}", versions_table(first, last)),
    _ => print_warning(&format!(
      "No versions of {} in the {} line",
      args.project, args.major
    )),
  }
  Ok(())
}
