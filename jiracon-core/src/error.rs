//! # Error Types
//!
//! Typed failures for malformed arguments and configuration. Transport and
//! authentication failures coming from the tracker stay `anyhow::Error` and
//! are propagated unmodified.

use thiserror::Error;

/// Errors raised by jiracon when an argument or setting cannot be used
#[derive(Debug, Error)]
pub enum ConnectorError {
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),
  #[error("Unable to parse date: '{0}'")]
  InvalidDate(String),
  #[error("Missing credential: {0} is set but {1} is not")]
  MissingCredential(&'static str, &'static str),
  #[error("Invalid pattern '{pattern}': {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },
  #[error("Invalid configuration in {path}: {message}")]
  Config { path: String, message: String },
}

impl ConnectorError {
  /// Compile a user supplied regular expression, mapping failures to
  /// [`ConnectorError::InvalidPattern`]
  pub fn compile(pattern: &str) -> Result<regex::Regex, Self> {
    regex::Regex::new(pattern).map_err(|source| Self::InvalidPattern {
      pattern: pattern.to_string(),
      source,
    })
  }
}
