//! # Extract Command
//!
//! Pulls values out of an issue's description, a custom field or its
//! attachment filenames with a user supplied pattern.

use anyhow::Result;
use clap::{Args, ValueEnum};
use jiracon_core::extract::{
  DEFAULT_CUSTOM_FIELD, items_from_attachments, items_from_custom_field, items_from_description,
};
use jiracon_core::{ConnectorConfig, ConnectorError, IssueTracker, print_info};

use crate::context::connect;

/// Where to look for matches
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractSource {
  /// Every match anywhere in the description
  #[default]
  Description,
  /// Attachment filenames, matched from their start
  Attachment,
  /// A custom field, matched from its start
  Field,
}

/// Command for extracting values from an issue
#[derive(Args)]
pub struct ExtractArgs {
  /// Issue key, e.g. FE-123
  #[arg(required = true, index = 1)]
  pub key: String,

  /// Regular expression; capture group 1 is printed
  #[arg(required = true, index = 2)]
  pub pattern: String,

  #[arg(long, value_enum, default_value_t = ExtractSource::Description)]
  pub source: ExtractSource,

  /// Custom field to read with `--source field`
  #[arg(long, default_value = DEFAULT_CUSTOM_FIELD)]
  pub field: String,
}

pub(crate) fn handle_extract_command(args: &ExtractArgs, config: &ConnectorConfig) -> Result<()> {
  let regex = ConnectorError::compile(&args.pattern)?;
  let tracker = connect(config)?;
  let issue = tracker.issue(&args.key)?;

  let items = match args.source {
    ExtractSource::Description => items_from_description(&issue, &regex),
    ExtractSource::Attachment => items_from_attachments(&issue, &regex),
    ExtractSource::Field => items_from_custom_field(&issue, &regex, &args.field),
  };

  if items.is_empty() {
    print_info(&format!("Nothing in {} matches '{}'", args.key, args.pattern));
    return Ok(());
  }

  for item in items {
    println!("{item}");
  }
  Ok(())
}
