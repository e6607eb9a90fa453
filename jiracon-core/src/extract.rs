//! # Field Extraction
//!
//! Regex based extraction of derived values (build numbers, packet names,
//! versions) from an issue's description, a custom field or its attachment
//! filenames. Absent sources produce empty results.
//!
//! Each helper yields capture group 1 of a match. Patterns without a capture
//! group yield the whole match. A match in which group 1 did not take part
//! (`a(b)?` matching "a") yields nothing.

use regex::{Captures, Regex};

use crate::models::JiraIssue;

/// Custom field holding build references in the default Jira setup
pub const DEFAULT_CUSTOM_FIELD: &str = "customfield_13405";

fn first_group(captures: &Captures<'_>) -> Option<String> {
  let group = if captures.len() > 1 { 1 } else { 0 };
  captures.get(group).map(|m| m.as_str().to_string())
}

/// Match anchored at the start of `text`
fn match_at_start(regex: &Regex, text: &str) -> Option<String> {
  regex
    .captures(text)
    .filter(|captures| captures.get(0).is_some_and(|m| m.start() == 0))
    .and_then(|captures| first_group(&captures))
}

/// Every match of `regex` anywhere in the description
pub fn items_from_description(issue: &JiraIssue, regex: &Regex) -> Vec<String> {
  let Some(description) = issue.fields.description.as_deref() else {
    return Vec::new();
  };

  regex
    .captures_iter(description)
    .filter_map(|captures| first_group(&captures))
    .collect()
}

/// The value of a custom field matched against `regex` from its start
pub fn items_from_custom_field(issue: &JiraIssue, regex: &Regex, field: &str) -> Vec<String> {
  issue
    .custom_field_text(field)
    .and_then(|text| match_at_start(regex, text))
    .into_iter()
    .collect()
}

/// Attachment filenames in the order Jira lists them
pub fn attachment_filenames(issue: &JiraIssue) -> Vec<String> {
  issue
    .fields
    .attachment
    .iter()
    .flatten()
    .map(|attachment| attachment.filename.clone())
    .collect()
}

/// Attachment filenames matched against `regex` from their start
pub fn items_from_attachments(issue: &JiraIssue, regex: &Regex) -> Vec<String> {
  issue
    .fields
    .attachment
    .iter()
    .flatten()
    .filter_map(|attachment| match_at_start(regex, &attachment.filename))
    .collect()
}

/// Issues whose summary mentions `version` as a whole word: preceded by
/// whitespace or the start of the summary, followed by whitespace or its end
/// (`1.4` matches "Release 1.4 notes" but not "Release 1.42" or "Release 21.4")
pub fn issues_by_version<'a>(issues: &'a [JiraIssue], version: &str) -> Vec<&'a JiraIssue> {
  let pattern = format!(r"(?:^|\s){}(?:$|\s)", regex::escape(version));
  let Ok(regex) = Regex::new(&pattern) else {
    return Vec::new();
  };

  issues
    .iter()
    .filter(|issue| regex.is_match(&issue.fields.summary))
    .collect()
}
