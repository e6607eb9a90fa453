//! # Issue Tracker Capability
//!
//! The blocking interface jiracon needs from a Jira client. The REST
//! implementation lives in `jiracon-jira`; tests substitute fakes and mocks.

use anyhow::Result;
use serde_json::{Map, Value};

use crate::models::{JiraIssue, JiraTransition, ProjectVersion};

/// Operations delegated to the issue tracker.
///
/// Calls block until the tracker answers. Failures are returned as they come
/// from the transport, jiracon never retries them.
#[cfg_attr(test, mockall::automock)]
pub trait IssueTracker {
  /// Run a JQL search and return one page of up to `max_results` issues
  /// starting at `start_at`
  fn search(&self, jql: &str, start_at: usize, max_results: usize) -> Result<Vec<JiraIssue>>;

  /// Get a Jira issue by key
  fn issue(&self, key: &str) -> Result<JiraIssue>;

  /// Get a Jira issue with its changelog expanded
  fn issue_with_changelog(&self, key: &str) -> Result<JiraIssue>;

  /// Get available transitions for an issue
  fn transitions(&self, key: &str) -> Result<Vec<JiraTransition>>;

  /// Execute a transition on an issue
  fn transition_issue(&self, key: &str, transition_id: &str) -> Result<()>;

  /// Update issue fields
  fn update_issue(&self, key: &str, fields: Map<String, Value>) -> Result<()>;

  /// List the versions (releases) of a project
  fn project_versions(&self, project: &str) -> Result<Vec<ProjectVersion>>;
}
