//! Authentication and client construction.
//!
//! Credentials come from the merged [`ConnectorConfig`]: explicit
//! username/password first, then `~/.netrc` for the server host. With neither
//! the client talks to Jira anonymously.

use std::path::Path;

use anyhow::{Context, Result};
use jiracon_core::ConnectorConfig;
use jiracon_core::creds::Credentials;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::blocking::BlockingJiraClient;
use crate::client::{JiraClient, create_jira_client};
use crate::models::JiraAuth;

/// Basic auth pair for a set of credentials
pub fn jira_auth(credentials: &Credentials) -> JiraAuth {
  JiraAuth {
    username: credentials.username.clone(),
    api_token: credentials.password.clone(),
  }
}

/// Creates a tokio runtime and a Jira client for the configured server.
pub fn create_jira_runtime_and_client(config: &ConnectorConfig, home: Option<&Path>) -> Result<(Runtime, JiraClient)> {
  let credentials = config
    .credentials(home)
    .context("Failed to resolve Jira credentials")?;

  match &credentials {
    Some(creds) => debug!(user = %creds.username, host = %config.host(), "Using Jira credentials"),
    None => info!(host = %config.host(), "No credentials found, connecting anonymously"),
  }

  let rt = Runtime::new().context("Failed to create async runtime")?;
  let client = create_jira_client(&config.url, credentials.as_ref(), config.timeout())?;
  Ok((rt, client))
}

/// Creates a synchronous [`BlockingJiraClient`] for the configured server.
pub fn create_blocking_client(config: &ConnectorConfig, home: Option<&Path>) -> Result<BlockingJiraClient> {
  let (rt, client) = create_jira_runtime_and_client(config, home)?;
  Ok(BlockingJiraClient::new(rt, client))
}

#[cfg(test)]
mod tests {
  use jiracon_test_utils::NetrcGuard;

  use super::*;

  fn config(url: &str) -> ConnectorConfig {
    ConnectorConfig {
      url: url.to_string(),
      ..ConnectorConfig::default()
    }
  }

  #[test]
  fn test_jira_auth_uses_password_as_token() {
    let auth = jira_auth(&Credentials {
      username: "alice".to_string(),
      password: "secret".to_string(),
    });

    assert_eq!(auth.username, "alice");
    assert_eq!(auth.api_token, "secret");
  }

  #[test]
  fn test_client_from_netrc() -> Result<()> {
    let guard = NetrcGuard::new(
      r#"machine jira.example.com
  login net@example.com
  password net-token
"#,
    );

    let client = create_blocking_client(&config("https://jira.example.com"), Some(guard.home_dir()))?;

    assert!(client.client().is_authenticated());
    assert_eq!(client.client().base_url(), "https://jira.example.com");
    Ok(())
  }

  #[test]
  fn test_explicit_credentials_win_over_netrc() -> Result<()> {
    let guard = NetrcGuard::new(
      r#"machine jira.example.com
  login net@example.com
  password net-token
"#,
    );
    let config = ConnectorConfig {
      username: Some("alice".to_string()),
      password: Some("secret".to_string()),
      ..config("https://jira.example.com")
    };

    let (_rt, client) = create_jira_runtime_and_client(&config, Some(guard.home_dir()))?;

    assert_eq!(client.auth.as_ref().map(|auth| auth.username.as_str()), Some("alice"));
    Ok(())
  }

  #[test]
  fn test_anonymous_without_credentials() -> Result<()> {
    let guard = NetrcGuard::empty();

    let client = create_blocking_client(&config("https://jira.example.com"), Some(guard.home_dir()))?;

    assert!(!client.client().is_authenticated());
    Ok(())
  }

  #[test]
  fn test_half_configured_credentials_fail() {
    let config = ConnectorConfig {
      username: Some("alice".to_string()),
      ..config("https://jira.example.com")
    };

    let error = create_blocking_client(&config, None).err().map(|e| format!("{e:#}"));

    assert!(error.is_some_and(|message| message.contains("password")));
  }
}
