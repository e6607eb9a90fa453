//! # Report Rendering
//!
//! Plain-text renderings of issues and report results. Everything here
//! returns a `String` so the command handlers decide where it goes.

use jiracon_core::dates::parse_wall_clock;
use jiracon_core::text::{fixed_width_row, smart_truncate};
use jiracon_core::{JiraIssue, ProjectVersion, TransitionOutcome};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Column width of the streamed `print` and `transit` tables
pub const COLUMN_WIDTH: usize = 15;

/// Summary width in the bug tables
pub const SUMMARY_WIDTH: usize = 40;

const NOT_FIXED: &str = "not fixed";
const MISSING: &str = "-";

/// Date part of a Jira timestamp; unparsable text is shown as is
pub fn short_date(text: &str) -> String {
  parse_wall_clock(text).map_or_else(|_| text.to_string(), |date| date.format("%Y-%m-%d").to_string())
}

/// `KEY - summary | created DATE`
pub fn issue_line(issue: &JiraIssue) -> String {
  let created = issue
    .fields
    .created
    .as_deref()
    .map_or_else(|| MISSING.to_string(), short_date);
  format!("{} - {} | created {}", issue.key, issue.fields.summary, created)
}

pub fn print_header_row() -> String {
  fixed_width_row(&["TYPE", "KEY", "STATUS"], COLUMN_WIDTH)
}

pub fn print_row(issue: &JiraIssue) -> String {
  fixed_width_row(
    &[issue.issue_type_name(), &issue.key, issue.status_name()],
    COLUMN_WIDTH,
  )
}

pub fn outcome_header_row() -> String {
  fixed_width_row(&["TYPE", "KEY", "STATUS", "ASSIGNEE"], COLUMN_WIDTH)
}

pub fn outcome_row(outcome: &TransitionOutcome) -> String {
  fixed_width_row(
    &[&outcome.issue_type, &outcome.key, &outcome.status, &outcome.assignee],
    COLUMN_WIDTH,
  )
}

/// Resolution date of an issue, or `not fixed`
pub fn resolution_label(issue: &JiraIssue) -> String {
  issue
    .fields
    .resolutiondate
    .as_deref()
    .map_or_else(|| NOT_FIXED.to_string(), short_date)
}

#[derive(Tabled)]
struct BugRow {
  #[tabled(rename = "Key")]
  key: String,
  #[tabled(rename = "Summary")]
  summary: String,
  #[tabled(rename = "Resolved")]
  resolved: String,
}

/// Key, truncated summary and resolution date of each issue
pub fn bugs_table(issues: &[JiraIssue]) -> String {
  let rows = issues.iter().map(|issue| BugRow {
    key: issue.key.clone(),
    summary: smart_truncate(&issue.fields.summary, SUMMARY_WIDTH, "..."),
    resolved: resolution_label(issue),
  });

  Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct VersionRow {
  #[tabled(rename = "Release")]
  label: &'static str,
  #[tabled(rename = "Version")]
  name: String,
  #[tabled(rename = "Start")]
  start: String,
  #[tabled(rename = "Released")]
  released: String,
}

impl VersionRow {
  fn new(label: &'static str, version: &ProjectVersion) -> Self {
    Self {
      label,
      name: version.name.clone(),
      start: version.start_date.clone().unwrap_or_else(|| MISSING.to_string()),
      released: version.release_date.clone().unwrap_or_else(|| MISSING.to_string()),
    }
  }
}

/// First and last release of a major line with their dates
pub fn versions_table(first: &ProjectVersion, last: &ProjectVersion) -> String {
  let rows = [VersionRow::new("first", first), VersionRow::new("last", last)];
  Table::new(rows).with(Style::sharp()).to_string()
}

#[cfg(test)]
mod tests {
  use insta::assert_snapshot;
  use jiracon_test_utils::IssueBuilder;
  use serde_json::json;
  use test_case::test_case;

  use super::*;

  fn issue(builder: IssueBuilder) -> JiraIssue {
    serde_json::from_value(builder.build()).unwrap()
  }

  fn version(name: &str, start: Option<&str>, release: Option<&str>) -> ProjectVersion {
    serde_json::from_value(json!({
      "name": name,
      "startDate": start,
      "releaseDate": release,
    }))
    .unwrap()
  }

  #[test_case("2021-03-02T10:00:00.000+0000", "2021-03-02" ; "jira timestamp")]
  #[test_case("2021-03-02T01:00:00.000+0300", "2021-03-02" ; "offset kept")]
  #[test_case("2021-03-02", "2021-03-02" ; "plain date")]
  #[test_case("yesterday", "yesterday" ; "unparsable")]
  fn test_short_date(input: &str, expected: &str) {
    assert_eq!(short_date(input), expected);
  }

  #[test]
  fn test_issue_line() {
    let with_date = issue(
      IssueBuilder::new("FE-7")
        .summary("Broken link")
        .created("2021-01-05T08:00:00.000+0000"),
    );
    let without_date = issue(IssueBuilder::new("FE-8").summary("No date"));

    assert_eq!(issue_line(&with_date), "FE-7 - Broken link | created 2021-01-05");
    assert_eq!(issue_line(&without_date), "FE-8 - No date | created -");
  }

  #[test]
  fn test_print_rows_are_fixed_width() {
    let bug = issue(IssueBuilder::new("FE-1").issue_type("Bug").status("In Progress"));

    assert_eq!(
      print_header_row(),
      "TYPE           |KEY            |STATUS         "
    );
    assert_eq!(
      print_row(&bug),
      "Bug            |FE-1           |In Progress    "
    );
  }

  #[test]
  fn test_outcome_row() {
    let outcome = TransitionOutcome {
      issue_type: "Bug".to_string(),
      key: "FE-1".to_string(),
      status: "Resolved".to_string(),
      assignee: "alice".to_string(),
      matched: true,
    };

    assert_eq!(outcome_header_row().split('|').count(), 4);
    assert_eq!(
      outcome_row(&outcome),
      "Bug            |FE-1           |Resolved       |alice          "
    );
  }

  #[test]
  fn test_bugs_table() {
    let issues = vec![
      issue(
        IssueBuilder::new("FE-1")
          .summary("Crash on login when the session cookie expires")
          .resolution_date("2021-03-02T10:00:00.000+0000"),
      ),
      issue(IssueBuilder::new("FE-12").summary("Typo in footer")),
    ];

    assert_snapshot!(bugs_table(&issues), @r"
    ┌───────┬────────────────────────────────────┬────────────┐
    │ Key   │ Summary                            │ Resolved   │
    ├───────┼────────────────────────────────────┼────────────┤
    │ FE-1  │ Crash on login when the session... │ 2021-03-02 │
    │ FE-12 │ Typo in footer                     │ not fixed  │
    └───────┴────────────────────────────────────┴────────────┘
    ");
  }

  #[test]
  fn test_versions_table() {
    let first = version("1.4.1", Some("2021-02-01"), Some("2021-03-01"));
    let last = version("1.4.10", None, None);

    assert_snapshot!(versions_table(&first, &last), @r"
    ┌─────────┬─────────┬────────────┬────────────┐
    │ Release │ Version │ Start      │ Released   │
    ├─────────┼─────────┼────────────┼────────────┤
    │ first   │ 1.4.1   │ 2021-02-01 │ 2021-03-01 │
    │ last    │ 1.4.10  │ -          │ -          │
    └─────────┴─────────┴────────────┴────────────┘
    ");
  }
}
