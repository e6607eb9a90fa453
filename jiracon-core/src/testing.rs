//! In-memory tracker used by the unit tests of this crate.

use std::cell::RefCell;

use anyhow::{Result, bail};
use jiracon_test_utils::IssueBuilder;
use serde_json::{Map, Value};

use crate::models::{JiraIssue, JiraTransition, ProjectVersion};
use crate::tracker::IssueTracker;

/// Build a typed issue from a test-utils fixture
pub fn issue(builder: IssueBuilder) -> JiraIssue {
  serde_json::from_value(builder.build()).expect("fixture should deserialize")
}

/// Serves a fixed, ordered list of matches and records every request
#[derive(Default)]
pub struct FakeTracker {
  issues: Vec<JiraIssue>,
  fail_from: Option<usize>,
  transitions: Vec<JiraTransition>,
  searches: RefCell<Vec<(String, usize, usize)>>,
  executed: RefCell<Vec<(String, String)>>,
}

impl FakeTracker {
  /// A tracker whose search matches `count` issues keyed `TEST-1..`
  pub fn with_matches(count: usize) -> Self {
    let issues = (1..=count)
      .map(|n| issue(IssueBuilder::new(&format!("TEST-{n}"))))
      .collect();
    Self::with_issues(issues)
  }

  pub fn with_issues(issues: Vec<JiraIssue>) -> Self {
    Self {
      issues,
      ..Self::default()
    }
  }

  /// Fail every search whose offset is at or beyond `offset`
  pub fn failing_from(mut self, offset: usize) -> Self {
    self.fail_from = Some(offset);
    self
  }

  pub fn with_transitions(mut self, transitions: &[(&str, &str)]) -> Self {
    self.transitions = transitions
      .iter()
      .map(|(id, name)| JiraTransition {
        id: (*id).to_string(),
        name: (*name).to_string(),
      })
      .collect();
    self
  }

  pub fn search_calls(&self) -> Vec<(usize, usize)> {
    self
      .searches
      .borrow()
      .iter()
      .map(|(_, start, max)| (*start, *max))
      .collect()
  }

  pub fn search_offsets(&self) -> Vec<usize> {
    self.searches.borrow().iter().map(|(_, start, _)| *start).collect()
  }

  pub fn search_queries(&self) -> Vec<String> {
    self.searches.borrow().iter().map(|(jql, _, _)| jql.clone()).collect()
  }

  pub fn executed_transitions(&self) -> Vec<(String, String)> {
    self.executed.borrow().clone()
  }

  fn find(&self, key: &str) -> Result<JiraIssue> {
    match self.issues.iter().find(|issue| issue.key == key) {
      Some(issue) => Ok(issue.clone()),
      None => bail!("Issue {key} not found"),
    }
  }
}

impl IssueTracker for FakeTracker {
  fn search(&self, jql: &str, start_at: usize, max_results: usize) -> Result<Vec<JiraIssue>> {
    self
      .searches
      .borrow_mut()
      .push((jql.to_string(), start_at, max_results));

    if self.fail_from.is_some_and(|offset| start_at >= offset) {
      bail!("Failed to search Jira issues: connection reset");
    }

    Ok(self.issues.iter().skip(start_at).take(max_results).cloned().collect())
  }

  fn issue(&self, key: &str) -> Result<JiraIssue> {
    self.find(key)
  }

  fn issue_with_changelog(&self, key: &str) -> Result<JiraIssue> {
    self.find(key)
  }

  fn transitions(&self, _key: &str) -> Result<Vec<JiraTransition>> {
    Ok(self.transitions.clone())
  }

  fn transition_issue(&self, key: &str, transition_id: &str) -> Result<()> {
    self
      .executed
      .borrow_mut()
      .push((key.to_string(), transition_id.to_string()));
    Ok(())
  }

  fn update_issue(&self, _key: &str, _fields: Map<String, Value>) -> Result<()> {
    Ok(())
  }

  fn project_versions(&self, _project: &str) -> Result<Vec<ProjectVersion>> {
    Ok(Vec::new())
  }
}
