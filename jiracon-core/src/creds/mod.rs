//! # Credential Management
//!
//! Resolves the account jiracon authenticates with. Explicitly configured
//! credentials win; otherwise the user's `.netrc` is consulted for the Jira
//! host, and without an entry the connection is anonymous.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::error::ConnectorError;

pub mod netrc;

/// Represents credentials for a Jira server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Pick the credentials for `host`.
///
/// Both `username` and `password` must be given together. When neither is,
/// the `.netrc` under `home` is searched; `Ok(None)` means anonymous access.
pub fn resolve_credentials(
  username: Option<&str>,
  password: Option<&str>,
  host: &str,
  home: Option<&Path>,
) -> Result<Option<Credentials>> {
  match (username, password) {
    (Some(username), Some(password)) => {
      debug!(username, "Using configured credentials");
      return Ok(Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
      }));
    }
    (Some(_), None) => return Err(ConnectorError::MissingCredential("username", "password").into()),
    (None, Some(_)) => return Err(ConnectorError::MissingCredential("password", "username").into()),
    (None, None) => {}
  }

  let Some(home) = home else {
    debug!("No home directory, connecting anonymously");
    return Ok(None);
  };

  let machine = netrc::normalize_host(host);
  let credentials = netrc::read_netrc(&netrc::get_netrc_path(home), &machine)?;
  if credentials.is_none() {
    debug!(machine, "No .netrc entry, connecting anonymously");
  }
  Ok(credentials)
}
