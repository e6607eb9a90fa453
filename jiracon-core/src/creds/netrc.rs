//! Helpers for reading credentials stored in `.netrc` files.
//!
//! Entries may be written on one line (`machine host login user password
//! pass`) or spread over several. Lines starting with `#` are comments. A
//! `default` entry applies when no machine matches.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::creds::Credentials;

/// Returns the path to the `.netrc` file for the provided home directory.
///
/// ```
/// use std::path::Path;
/// use jiracon_core::creds::netrc::get_netrc_path;
///
/// let path = get_netrc_path(Path::new("/home/user"));
/// assert_eq!(path, Path::new("/home/user/.netrc"));
/// ```
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

#[derive(Default)]
struct Entry {
  /// `None` for the `default` entry
  machine: Option<String>,
  login: Option<String>,
  password: Option<String>,
}

impl Entry {
  fn credentials(self) -> Option<Credentials> {
    match (self.login, self.password) {
      (Some(username), Some(password)) => Some(Credentials { username, password }),
      _ => None,
    }
  }
}

fn entries(content: &str) -> Vec<Entry> {
  let tokens = content
    .lines()
    .filter(|line| !line.trim_start().starts_with('#'))
    .flat_map(str::split_whitespace);

  let mut entries: Vec<Entry> = Vec::new();
  let mut tokens = tokens.peekable();

  while let Some(token) = tokens.next() {
    match token {
      "machine" => entries.push(Entry {
        machine: tokens.next().map(str::to_string),
        ..Entry::default()
      }),
      "default" => entries.push(Entry::default()),
      "login" | "password" | "account" => {
        let value = tokens.next().map(str::to_string);
        if let Some(entry) = entries.last_mut() {
          match token {
            "login" => entry.login = value,
            "password" => entry.password = value,
            _ => {}
          }
        }
      }
      _ => {}
    }
  }

  entries
}

/// Credentials for `target_machine` from `.netrc` content.
///
/// Entries missing a login or a password are ignored. The `default` entry
/// is used only when no machine entry matches.
pub fn parse_netrc(content: &str, target_machine: &str) -> Option<Credentials> {
  let mut fallback = None;

  for entry in entries(content) {
    match entry.machine.as_deref() {
      Some(machine) if machine == target_machine => {
        if let Some(credentials) = entry.credentials() {
          return Some(credentials);
        }
      }
      None if fallback.is_none() => fallback = entry.credentials(),
      _ => {}
    }
  }

  fallback
}

/// Read `path` and look up `target_machine`. A missing file yields `Ok(None)`.
pub fn read_netrc(path: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  match fs::read_to_string(path) {
    Ok(content) => Ok(parse_netrc(&content, target_machine)),
    Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
    Err(error) => Err(error).with_context(|| format!("Failed to read {}", path.display())),
  }
}

/// Normalizes a Jira host URL by removing protocol prefixes, paths and
/// trailing slashes.
///
/// ```
/// use jiracon_core::creds::netrc::normalize_host;
///
/// assert_eq!(normalize_host("https://company.atlassian.net/"), "company.atlassian.net");
/// assert_eq!(normalize_host("http://jira.example.com/jira"), "jira.example.com");
/// assert_eq!(normalize_host("my-jira-instance.com"), "my-jira-instance.com");
/// ```
pub fn normalize_host(raw_host: &str) -> String {
  let without_scheme = raw_host
    .trim()
    .trim_start_matches("https://")
    .trim_start_matches("http://");

  without_scheme
    .split('/')
    .next()
    .unwrap_or(without_scheme)
    .to_string()
}
