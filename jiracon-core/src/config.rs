//! # Configuration Management
//!
//! Connection and reporting settings for jiracon, and the directory they
//! are read from.
//!
//! Settings are layered, lowest precedence first: built-in defaults, the
//! config file (TOML, or YAML for `.yml`/`.yaml`), the `JIRA_HOST`
//! environment variable and finally command line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::changelog::DEFAULT_RESOLVER_STATUS;
use crate::creds::{Credentials, netrc, resolve_credentials};
use crate::error::ConnectorError;
use crate::fetcher::FetchLimits;
use crate::queries::QueryTemplates;
use crate::url::{ensure_url_scheme, jira_host_from_env};

/// Server used when nothing else is configured
pub const DEFAULT_JIRA_URL: &str = "https://jira.atlassian.com";

/// Default global limit and page size
pub const DEFAULT_LIMIT: usize = 100;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Represents the configuration directory for jiracon
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "jiracon").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Path of the default config file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Settings for one Jira connection and the reports run over it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
  /// Jira server URL
  pub url: String,
  pub username: Option<String>,
  /// Password or API token
  #[serde(skip_serializing_if = "Option::is_none")]
  pub password: Option<String>,
  /// Global cap on the number of issues fetched per query
  pub limit: usize,
  /// Page size for each search request
  pub count: usize,
  /// Request timeout in seconds
  pub timeout_secs: u64,
  /// Status whose last actor counts as the resolver of an issue
  pub resolver_status: String,
  /// JQL templates for the canned report queries
  pub filters: QueryTemplates,
}

impl Default for ConnectorConfig {
  fn default() -> Self {
    Self {
      url: DEFAULT_JIRA_URL.to_string(),
      username: None,
      password: None,
      limit: DEFAULT_LIMIT,
      count: DEFAULT_LIMIT,
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      resolver_status: DEFAULT_RESOLVER_STATUS.to_string(),
      filters: QueryTemplates::default(),
    }
  }
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
  pub url: Option<String>,
  pub limit: Option<usize>,
  pub count: Option<usize>,
}

fn is_yaml(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
}

impl ConnectorConfig {
  /// Parse a config file. The format follows the file extension.
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;

    let parsed: Result<Self, String> = if is_yaml(path) {
      serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
      toml::from_str(&content).map_err(|e| e.to_string())
    };

    let config = parsed.map_err(|message| ConnectorError::Config {
      path: path.display().to_string(),
      message,
    })?;
    debug!(path = %path.display(), "Loaded config file");
    Ok(config)
  }

  /// Like [`ConnectorConfig::load`], but a missing file yields the defaults
  pub fn load_or_default(path: &Path) -> Result<Self> {
    if path.exists() {
      Self::load(path)
    } else {
      debug!(path = %path.display(), "No config file, using defaults");
      Ok(Self::default())
    }
  }

  /// Apply the `JIRA_HOST` override read through `lookup`
  pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(url) = jira_host_from_env(lookup)? {
      debug!(url, "Using Jira host from environment");
      self.url = url;
    }
    Ok(())
  }

  pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
    if let Some(url) = &overrides.url {
      self.url.clone_from(url);
    }
    if let Some(limit) = overrides.limit {
      self.limit = limit;
    }
    if let Some(count) = overrides.count {
      self.count = count;
    }
  }

  /// Check the merged settings and normalize the server URL
  pub fn validate(mut self) -> Result<Self> {
    self.url = ensure_url_scheme(&self.url).map_err(|e| ConnectorError::InvalidArgument(format!("url: {e}")))?;
    self.fetch_limits()?;
    if self.timeout_secs == 0 {
      return Err(ConnectorError::InvalidArgument("timeout_secs must be greater than zero".to_string()).into());
    }
    Ok(self)
  }

  /// Pagination budget from `limit` and `count`
  pub fn fetch_limits(&self) -> Result<FetchLimits, ConnectorError> {
    FetchLimits::new(self.limit, self.count)
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  /// Host name of the server, as used for `.netrc` lookups
  pub fn host(&self) -> String {
    netrc::normalize_host(&self.url)
  }

  /// Credentials to authenticate with; `None` means anonymous access
  pub fn credentials(&self, home: Option<&Path>) -> Result<Option<Credentials>> {
    resolve_credentials(self.username.as_deref(), self.password.as_deref(), &self.url, home)
  }
}

#[cfg(test)]
mod tests {
  use jiracon_test_utils::{ConfigFileGuard, NetrcGuard};

  use super::*;
  use crate::queries::QueryKind;

  #[test]
  fn test_defaults() {
    let config = ConnectorConfig::default();

    assert_eq!(config.url, "https://jira.atlassian.com");
    assert_eq!(config.limit, 100);
    assert_eq!(config.count, 100);
    assert_eq!(config.resolver_status, "Developed");
    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert_eq!(config.host(), "jira.atlassian.com");
  }

  #[test]
  fn test_load_toml_with_partial_settings() {
    let files = ConfigFileGuard::new();
    let path = files.write(
      "config.toml",
      r#"
url = "jira.example.com"
count = 25

[filters]
tasks = "project = {project} and fixVersion = {version_string}"
"#,
    );

    let config = ConnectorConfig::load(&path).unwrap();

    assert_eq!(config.url, "jira.example.com");
    assert_eq!(config.count, 25);
    assert_eq!(config.limit, 100);
    assert_eq!(
      config.filters.render(QueryKind::Tasks, "FE", "1.0", None),
      "project = FE and fixVersion = 1.0"
    );
    assert_eq!(config.filters.bugs, QueryTemplates::default().bugs);
  }

  #[test]
  fn test_load_yaml() {
    let files = ConfigFileGuard::new();
    let path = files.write("jiracon.yaml", "url: https://jira.example.com\nlimit: 40\nresolver_status: Done\n");

    let config = ConnectorConfig::load(&path).unwrap();

    assert_eq!(config.limit, 40);
    assert_eq!(config.resolver_status, "Done");
  }

  #[test]
  fn test_load_invalid_file_is_config_error() {
    let files = ConfigFileGuard::new();
    let path = files.write("config.toml", "limit = \"many\"\n");

    let error = ConnectorConfig::load(&path).unwrap_err();

    match error.downcast_ref::<ConnectorError>() {
      Some(ConnectorError::Config { path: reported, .. }) => assert!(reported.ends_with("config.toml")),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn test_load_or_default_without_file() {
    let files = ConfigFileGuard::new();

    let config = ConnectorConfig::load_or_default(&files.path("missing.toml")).unwrap();

    assert_eq!(config, ConnectorConfig::default());
  }

  #[test]
  fn test_precedence_env_then_flags() {
    let mut config = ConnectorConfig {
      url: "https://from-file.example.com".to_string(),
      ..ConnectorConfig::default()
    };

    config
      .apply_env(|name| (name == "JIRA_HOST").then(|| "from-env.example.com".to_string()))
      .unwrap();
    assert_eq!(config.url, "https://from-env.example.com");

    config.apply_overrides(&ConfigOverrides {
      url: Some("https://from-flag.example.com".to_string()),
      limit: Some(10),
      count: None,
    });
    assert_eq!(config.url, "https://from-flag.example.com");
    assert_eq!(config.limit, 10);
    assert_eq!(config.count, 100);
  }

  #[test]
  fn test_validate_normalizes_url_and_checks_limits() {
    let config = ConnectorConfig {
      url: "jira.example.com/".to_string(),
      ..ConnectorConfig::default()
    }
    .validate()
    .unwrap();
    assert_eq!(config.url, "https://jira.example.com");

    let zero_limit = ConnectorConfig {
      limit: 0,
      ..ConnectorConfig::default()
    };
    assert!(zero_limit.validate().is_err());

    let zero_timeout = ConnectorConfig {
      timeout_secs: 0,
      ..ConnectorConfig::default()
    };
    assert!(zero_timeout.validate().is_err());
  }

  #[test]
  fn test_page_size_is_clamped_to_limit() {
    let config = ConnectorConfig {
      limit: 30,
      count: 50,
      ..ConnectorConfig::default()
    };

    assert_eq!(config.fetch_limits().unwrap().page_size(), 30);
  }

  #[test]
  fn test_credentials_fall_back_to_netrc() {
    let guard = NetrcGuard::new("machine jira.example.com login bot password token\n");
    let config = ConnectorConfig {
      url: "https://jira.example.com".to_string(),
      ..ConnectorConfig::default()
    };

    let creds = config.credentials(Some(guard.home_dir())).unwrap().unwrap();

    assert_eq!(creds.username, "bot");
  }

  #[test]
  fn test_config_dirs_paths() {
    let dirs = ConfigDirs::new().unwrap();

    assert!(dirs.config_path().ends_with("config.toml"));
    assert!(dirs.config_path().starts_with(dirs.config_dir()));
  }
}
