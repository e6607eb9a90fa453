//! # Output Formatting
//!
//! Provides formatted output functions with colors, emojis, and consistent
//! styling for user-facing messages and terminal output.

use owo_colors::{OwoColorize, Stream};
use {clap, emojis};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  #[default]
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply the mode to the global `owo-colors` override
  pub fn apply(self) {
    match self {
      Self::Yes | Self::Always => owo_colors::set_override(true),
      Self::No | Self::Never => owo_colors::set_override(false),
      Self::Auto => owo_colors::unset_override(),
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!(
    "{} {}",
    check.if_supports_color(Stream::Stdout, |s| s.green().bold().to_string()),
    message
  );
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!(
    "{} {}",
    cross.if_supports_color(Stream::Stderr, |s| s.red().bold().to_string()),
    message
  );
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!(
    "{} {}",
    warning.if_supports_color(Stream::Stdout, |s| s.yellow().bold().to_string()),
    message
  );
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!(
    "{} {}",
    info.if_supports_color(Stream::Stdout, |s| s.blue().bold().to_string()),
    message
  );
}

/// Print a section header
pub fn print_header(header: &str) {
  println!(
    "\n{}",
    header.if_supports_color(Stream::Stdout, |s| s.blue().bold().to_string())
  );
}

/// Format an issue key
pub fn format_issue_key(key: &str) -> String {
  key
    .if_supports_color(Stream::Stdout, |s| s.bright_cyan().bold().to_string())
    .to_string()
}

/// Format a timestamp
pub fn format_timestamp(timestamp: &str) -> String {
  timestamp
    .if_supports_color(Stream::Stdout, |s| s.yellow().to_string())
    .to_string()
}

/// Format a workflow status by how far along it is
pub fn format_status(status: &str) -> String {
  let lowered = status.to_ascii_lowercase();
  let styled = |paint: fn(&str) -> String| status.if_supports_color(Stream::Stdout, |s| paint(s)).to_string();

  match lowered.as_str() {
    "done" | "closed" | "resolved" | "developed" => styled(|s| s.green().to_string()),
    "reopened" => styled(|s| s.red().to_string()),
    "in progress" | "in review" => styled(|s| s.yellow().to_string()),
    _ => status.to_string(),
  }
}
