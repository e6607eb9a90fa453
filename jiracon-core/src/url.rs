//! URL helpers for the Jira server address.
//!
//! Users write the server as `jira.example.com`, `https://jira.example.com/`
//! or even `http:/jira.example.com`; everything is normalized to a scheme-ful
//! URL without a trailing slash before it reaches the client.

use anyhow::{Result, anyhow};
use url::{Position, Url};

/// Environment variable overriding the configured Jira server
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";

/// Read the Jira server from `JIRA_HOST` through `lookup`, normalized.
/// Unset or blank values yield `Ok(None)`.
pub fn jira_host_from_env<F>(lookup: F) -> Result<Option<String>>
where
  F: Fn(&str) -> Option<String>,
{
  match lookup(ENV_JIRA_HOST) {
    Some(host) if !host.trim().is_empty() => ensure_url_scheme(&host).map(Some),
    _ => Ok(None),
  }
}

/// Render a parsed URL, dropping a path that is only `/`
fn normalize_url(url: &Url) -> String {
  let mut result = url[..Position::BeforePath].to_string();

  let path = url.path().trim_end_matches('/');
  result.push_str(path);

  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }

  result
}

fn parse_with_scheme(scheme: &str, rest: &str, input: &str) -> Result<Url> {
  let rest = rest.trim_start_matches('/');
  if rest.is_empty() {
    return Err(anyhow!("Failed to parse URL: '{input}'. Host is missing."));
  }
  Url::parse(&format!("{scheme}://{rest}")).map_err(|e| anyhow!("Failed to parse URL: '{input}': {e}"))
}

/// Ensure a server address has an `http` or `https` scheme, assuming
/// `https` when none is given. Malformed schemes such as `http:/host` are
/// repaired.
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow!("Host cannot be empty"));
  }

  let url = match trimmed.split_once(':') {
    Some((scheme, rest)) if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") => {
      parse_with_scheme(&scheme.to_ascii_lowercase(), rest, trimmed)?
    }
    _ => parse_with_scheme("https", trimmed, trimmed)?,
  };

  if url.host_str().is_none_or(str::is_empty) {
    return Err(anyhow!("Failed to parse URL: '{trimmed}'. Host is missing."));
  }

  Ok(normalize_url(&url))
}
