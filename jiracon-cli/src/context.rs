//! # Command Context
//!
//! Builds the settings every command runs with, merging the config file, the
//! environment and the global flags, and creates the Jira client from them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use directories::BaseDirs;
use jiracon_core::{ConfigOverrides, ConnectorConfig, get_config_dirs};
use jiracon_jira::{BlockingJiraClient, create_blocking_client};
use tracing::debug;

/// Connection flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
  /// Path to the config file (TOML, or YAML for .yml/.yaml)
  #[arg(long, global = true, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Jira server URL, overrides the config file and $JIRA_HOST
  #[arg(long, global = true, value_name = "URL")]
  pub url: Option<String>,

  /// Maximum number of issues to fetch
  #[arg(long, global = true, value_name = "N")]
  pub limit: Option<usize>,

  /// Number of issues requested per page
  #[arg(long, global = true, value_name = "N")]
  pub count: Option<usize>,
}

impl GlobalArgs {
  fn overrides(&self) -> ConfigOverrides {
    ConfigOverrides {
      url: self.url.clone(),
      limit: self.limit,
      count: self.count,
    }
  }

  fn config_path(&self) -> Result<PathBuf> {
    match &self.config {
      Some(path) => Ok(path.clone()),
      None => Ok(get_config_dirs()?.config_path()),
    }
  }
}

/// Merge defaults, the config file, the environment and the flags, in that
/// order of precedence
pub fn load_config<F>(args: &GlobalArgs, lookup: F) -> Result<ConnectorConfig>
where
  F: Fn(&str) -> Option<String>,
{
  let path = args.config_path()?;
  debug!(path = %path.display(), "Loading configuration");

  let mut config = ConnectorConfig::load_or_default(&path)?;
  config.apply_env(lookup)?;
  config.apply_overrides(&args.overrides());
  config.validate()
}

/// Settings resolved from the real environment
pub fn load_config_from_env(args: &GlobalArgs) -> Result<ConnectorConfig> {
  load_config(args, |name| std::env::var(name).ok())
}

/// Client for the configured server, with `.netrc` looked up in the user's
/// home directory
pub fn connect(config: &ConnectorConfig) -> Result<BlockingJiraClient> {
  let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
  connect_with_home(config, home.as_deref())
}

pub fn connect_with_home(config: &ConnectorConfig, home: Option<&Path>) -> Result<BlockingJiraClient> {
  create_blocking_client(config, home).with_context(|| format!("Failed to connect to {}", config.url))
}
