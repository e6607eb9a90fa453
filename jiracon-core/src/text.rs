//! Text formatting helpers for terminal reports.
//!
//! All widths are counted in characters rather than bytes so summaries with
//! non-ASCII text never split a code point.
//!
//! # Examples
//! ```
//! use jiracon_core::text::{fixed_width_row, smart_truncate};
//!
//! assert_eq!(smart_truncate("Crash when saving large files", 20, "..."), "Crash when saving...");
//! assert_eq!(fixed_width_row(&["Bug", "FE-1", "Open"], 6), "Bug   |FE-1  |Open  ");
//! ```

use chrono::TimeDelta;

/// Truncate a string to a maximum number of characters, appending "..." if
/// truncated.
///
/// ```
/// use jiracon_core::text::truncate_string;
///
/// assert_eq!(truncate_string("hello", 10), "hello");
/// assert_eq!(truncate_string("hello world", 5), "hello...");
/// assert_eq!(truncate_string("🎉🎊🎁🎄🎅", 3), "🎉🎊🎁...");
/// ```
pub fn truncate_string(s: &str, max_chars: usize) -> String {
  if s.chars().count() <= max_chars {
    s.to_string()
  } else {
    let truncated: String = s.chars().take(max_chars).collect();
    format!("{truncated}...")
  }
}

/// Shorten `text` to at most `length` characters, `suffix` included, cutting
/// at the last word boundary that fits. A single word longer than the budget
/// is cut mid-word, and a suffix longer than `length` is itself cut to fit.
pub fn smart_truncate(text: &str, length: usize, suffix: &str) -> String {
  let text = text.trim();
  if text.chars().count() <= length {
    return text.to_string();
  }

  let suffix_len = suffix.chars().count();
  if suffix_len >= length {
    return suffix.chars().take(length).collect();
  }

  let budget = length - suffix_len;
  let head: String = text.chars().take(budget).collect();

  // A cut that lands right before a space is already on a word boundary
  let next_is_space = text.chars().nth(budget).is_some_and(char::is_whitespace);
  let cut = if next_is_space {
    head.as_str()
  } else {
    match head.rfind(char::is_whitespace) {
      Some(index) => &head[..index],
      None => head.as_str(),
    }
  };

  format!("{}{suffix}", cut.trim_end())
}

/// Left-align every cell to `width` characters and join them with `|`.
/// Longer cells are kept whole.
pub fn fixed_width_row(cells: &[&str], width: usize) -> String {
  cells
    .iter()
    .map(|cell| format!("{cell:<width$}"))
    .collect::<Vec<_>>()
    .join("|")
}

/// Render a duration in its two most significant units (`2d 3h`, `1h 30m`,
/// `45s`)
pub fn format_duration(duration: TimeDelta) -> String {
  let sign = if duration < TimeDelta::zero() { "-" } else { "" };
  let seconds = duration.num_seconds().unsigned_abs();

  let rendered = if seconds < 60 {
    format!("{seconds}s")
  } else if seconds < 3600 {
    let minutes = seconds / 60;
    match seconds % 60 {
      0 => format!("{minutes}m"),
      rest => format!("{minutes}m {rest}s"),
    }
  } else if seconds < 86400 {
    let hours = seconds / 3600;
    match (seconds % 3600) / 60 {
      0 => format!("{hours}h"),
      rest => format!("{hours}h {rest}m"),
    }
  } else {
    let days = seconds / 86400;
    match (seconds % 86400) / 3600 {
      0 => format!("{days}d"),
      rest => format!("{days}d {rest}h"),
    }
  };

  format!("{sign}{rendered}")
}
