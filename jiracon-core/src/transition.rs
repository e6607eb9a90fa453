//! # Transition Execution
//!
//! Moves issues through the workflow by transition name, optionally handing
//! the issue back to whoever last moved it into a given status.

use anyhow::Result;
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::changelog::last_resolver;
use crate::fetcher::{BulkIssueFetcher, FetchLimits};
use crate::models::JiraIssue;
use crate::tracker::IssueTracker;

/// State of an issue after a transition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
  pub issue_type: String,
  pub key: String,
  pub status: String,
  pub assignee: String,
  /// Whether the issue ended up in the expected status. Always `true` for a
  /// single [`transit`]; [`transit_all`] compares against its destination.
  pub matched: bool,
}

impl TransitionOutcome {
  fn from_issue(issue: &JiraIssue) -> Self {
    Self {
      issue_type: issue.issue_type_name().to_string(),
      key: issue.key.clone(),
      status: issue.status_name().to_string(),
      assignee: issue.assignee_name().to_string(),
      matched: true,
    }
  }
}

/// Id of the transition called `name` among those currently available
pub fn find_transition_id<T: IssueTracker + ?Sized>(tracker: &T, key: &str, name: &str) -> Result<Option<String>> {
  let transitions = tracker.transitions(key)?;
  Ok(
    transitions
      .into_iter()
      .find(|transition| transition.name == name)
      .map(|transition| transition.id),
  )
}

/// Execute the transition called `transition_name` on `issue`.
///
/// When `reassign_from` names a status, the issue is first assigned to the
/// last person who moved it into that status (if anyone did). An unavailable
/// transition is not an error: the issue's current state is reported back
/// unchanged.
pub fn transit<T: IssueTracker + ?Sized>(
  tracker: &T,
  issue: &JiraIssue,
  transition_name: &str,
  reassign_from: Option<&str>,
) -> Result<TransitionOutcome> {
  let Some(transition_id) = find_transition_id(tracker, &issue.key, transition_name)? else {
    debug!(key = %issue.key, transition_name, "Transition not available");
    return Ok(TransitionOutcome::from_issue(issue));
  };

  if let Some(status) = reassign_from {
    let resolver = last_resolver(tracker, &issue.key, status)?;
    if resolver.is_empty() {
      debug!(key = %issue.key, status, "Nobody moved the issue into status, keeping assignee");
    } else {
      let mut fields = Map::new();
      fields.insert("assignee".to_string(), json!({ "name": resolver }));
      tracker.update_issue(&issue.key, fields)?;
      info!(key = %issue.key, assignee = %resolver, "Reassigned issue");
    }
  }

  tracker.transition_issue(&issue.key, &transition_id)?;
  info!(key = %issue.key, transition_name, transition_id = %transition_id, "Transitioned issue");

  let refreshed = tracker.issue(&issue.key)?;
  Ok(TransitionOutcome::from_issue(&refreshed))
}

/// Transition every issue matching `jql`, page by page.
///
/// Each outcome is handed to `on_outcome` as soon as it is known, so callers
/// see the work already done even when a later issue fails. Outcomes whose
/// resulting status is not `dest_status` are flagged with `matched == false`
/// and logged as warnings; they do not stop the run.
pub fn transit_all<T, F>(
  tracker: &T,
  jql: &str,
  limits: FetchLimits,
  transition_name: &str,
  dest_status: &str,
  reassign_from: Option<&str>,
  mut on_outcome: F,
) -> Result<Vec<TransitionOutcome>>
where
  T: IssueTracker + ?Sized,
  F: FnMut(&TransitionOutcome),
{
  let fetcher = BulkIssueFetcher::new(tracker, limits);
  let mut outcomes = Vec::new();

  fetcher.fetch_each_page(jql, |page| {
    for issue in page {
      let mut outcome = transit(tracker, issue, transition_name, reassign_from)?;
      outcome.matched = outcome.status == dest_status;
      if !outcome.matched {
        warn!(
          key = %outcome.key,
          expected = dest_status,
          actual = %outcome.status,
          "Status was not changed"
        );
      }
      on_outcome(&outcome);
      outcomes.push(outcome);
    }
    Ok(())
  })?;

  Ok(outcomes)
}
