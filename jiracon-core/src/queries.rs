//! # Canned Queries
//!
//! JQL templates for the release reports (bugs found in a version, fixes
//! shipped with it, and so on) and a runner that fills them in and pulls
//! every match through the bulk fetcher.

use std::fmt;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dates::{format_jql_date, parse_wall_clock};
use crate::fetcher::{BulkIssueFetcher, FetchLimits};
use crate::models::JiraIssue;
use crate::tracker::IssueTracker;

/// The report queries jiracon knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
  /// Bugs affecting the version
  Bugs,
  /// Bugs above Major priority affecting the version
  Critical,
  /// Bugs affecting the version that were reopened at least once
  Reopened,
  /// Bugs affecting the version reported after its release
  Production,
  /// Bugs fixed in the version
  Bugfixes,
  /// Non-bug issues fixed in the version
  Tasks,
}

impl QueryKind {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Bugs => "bugs",
      Self::Critical => "critical",
      Self::Reopened => "reopened",
      Self::Production => "production",
      Self::Bugfixes => "bugfixes",
      Self::Tasks => "tasks",
    }
  }

  /// Whether the template needs a `{date}`
  pub const fn needs_date(self) -> bool {
    matches!(self, Self::Production)
  }
}

impl fmt::Display for QueryKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// JQL templates with `{project}`, `{version_string}` and `{date}`
/// placeholders. Each one can be overridden in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryTemplates {
  pub bugs: String,
  pub critical: String,
  pub reopened: String,
  pub production: String,
  pub bugfixes: String,
  pub tasks: String,
}

impl Default for QueryTemplates {
  fn default() -> Self {
    Self {
      bugs: r#"project="{project}" and issuetype = Bug and affectedVersion = "{version_string}" order by key desc"#
        .to_string(),
      critical: r#"project="{project}" and issuetype=Bug and affectedVersion="{version_string}" and priority>Major order by key desc"#
        .to_string(),
      reopened: r#"project="{project}" and issuetype=Bug and affectedVersion="{version_string}" and status was Reopened order by key desc"#
        .to_string(),
      production: r#"project="{project}" and issuetype=Bug and affectedVersion="{version_string}" and created>="{date}" order by key desc"#
        .to_string(),
      bugfixes: r#"project="{project}" and issuetype=Bug and fixVersion="{version_string}" order by key desc"#.to_string(),
      tasks: r#"project="{project}" and issuetype!=Bug and fixVersion="{version_string}" order by key desc"#.to_string(),
    }
  }
}

impl QueryTemplates {
  pub fn template(&self, kind: QueryKind) -> &str {
    match kind {
      QueryKind::Bugs => &self.bugs,
      QueryKind::Critical => &self.critical,
      QueryKind::Reopened => &self.reopened,
      QueryKind::Production => &self.production,
      QueryKind::Bugfixes => &self.bugfixes,
      QueryKind::Tasks => &self.tasks,
    }
  }

  /// Fill in the placeholders of the `kind` template. `date` must already be
  /// in JQL form; a missing date leaves the placeholder empty.
  pub fn render(&self, kind: QueryKind, project: &str, version: &str, date: Option<&str>) -> String {
    self
      .template(kind)
      .replace("{project}", project)
      .replace("{version_string}", version)
      .replace("{date}", date.unwrap_or_default())
  }
}

/// Runs the canned queries against a tracker
pub struct ReportQueries<'a, T: IssueTracker + ?Sized> {
  fetcher: BulkIssueFetcher<'a, T>,
  templates: &'a QueryTemplates,
}

impl<'a, T: IssueTracker + ?Sized> ReportQueries<'a, T> {
  pub const fn new(tracker: &'a T, limits: FetchLimits, templates: &'a QueryTemplates) -> Self {
    Self {
      fetcher: BulkIssueFetcher::new(tracker, limits),
      templates,
    }
  }

  /// Run the `kind` query for a project version.
  ///
  /// `date` is only used by [`QueryKind::Production`]; it is parsed and
  /// rendered in JQL form. Without it that query matches nothing and no
  /// request is made.
  pub fn run(&self, kind: QueryKind, project: &str, version: &str, date: Option<&str>) -> Result<Vec<JiraIssue>> {
    let date = match (kind.needs_date(), date) {
      (true, None) => {
        debug!(%kind, project, version, "No release date, skipping query");
        return Ok(Vec::new());
      }
      (true, Some(text)) => Some(format_jql_date(&parse_wall_clock(text)?)),
      (false, _) => None,
    };

    let jql = self.templates.render(kind, project, version, date.as_deref());
    debug!(%kind, jql, "Running canned query");
    self.fetcher.fetch_all(&jql)
  }

  pub fn bug_list(&self, project: &str, version: &str) -> Result<Vec<JiraIssue>> {
    self.run(QueryKind::Bugs, project, version, None)
  }

  pub fn critical_bugs(&self, project: &str, version: &str) -> Result<Vec<JiraIssue>> {
    self.run(QueryKind::Critical, project, version, None)
  }

  pub fn reopened_bugs(&self, project: &str, version: &str) -> Result<Vec<JiraIssue>> {
    self.run(QueryKind::Reopened, project, version, None)
  }

  /// Bugs reported on or after `release_date`
  pub fn production_bugs(&self, project: &str, version: &str, release_date: Option<&str>) -> Result<Vec<JiraIssue>> {
    self.run(QueryKind::Production, project, version, release_date)
  }

  pub fn bugfixes(&self, project: &str, version: &str) -> Result<Vec<JiraIssue>> {
    self.run(QueryKind::Bugfixes, project, version, None)
  }

  pub fn tasks(&self, project: &str, version: &str) -> Result<Vec<JiraIssue>> {
    self.run(QueryKind::Tasks, project, version, None)
  }
}
