//! Synchronous facade over [`JiraClient`].
//!
//! Every call is driven to completion on the owned runtime before the next
//! one starts.

use anyhow::Result;
use jiracon_core::IssueTracker;
use jiracon_core::models::{JiraIssue, JiraTransition, ProjectVersion};
use serde_json::{Map, Value};
use tokio::runtime::Runtime;

use crate::client::JiraClient;

/// A [`JiraClient`] paired with the runtime that drives it
pub struct BlockingJiraClient {
  runtime: Runtime,
  client: JiraClient,
}

impl BlockingJiraClient {
  pub fn new(runtime: Runtime, client: JiraClient) -> Self {
    Self { runtime, client }
  }

  pub fn client(&self) -> &JiraClient {
    &self.client
  }

  /// Check that the server answers and accepts the credentials
  pub fn test_connection(&self) -> Result<bool> {
    self.runtime.block_on(self.client.test_connection())
  }
}

impl IssueTracker for BlockingJiraClient {
  fn search(&self, jql: &str, start_at: usize, max_results: usize) -> Result<Vec<JiraIssue>> {
    self
      .runtime
      .block_on(self.client.search_issues(jql, start_at, max_results))
  }

  fn issue(&self, key: &str) -> Result<JiraIssue> {
    self.runtime.block_on(self.client.get_issue(key))
  }

  fn issue_with_changelog(&self, key: &str) -> Result<JiraIssue> {
    self.runtime.block_on(self.client.get_issue_with_changelog(key))
  }

  fn transitions(&self, key: &str) -> Result<Vec<JiraTransition>> {
    self.runtime.block_on(self.client.get_transitions(key))
  }

  fn transition_issue(&self, key: &str, transition_id: &str) -> Result<()> {
    self.runtime.block_on(self.client.transition_issue(key, transition_id))
  }

  fn update_issue(&self, key: &str, fields: Map<String, Value>) -> Result<()> {
    self.runtime.block_on(self.client.update_issue(key, fields))
  }

  fn project_versions(&self, project: &str) -> Result<Vec<ProjectVersion>> {
    self.runtime.block_on(self.client.get_project_versions(project))
  }
}
