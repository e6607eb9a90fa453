//! # Changelog Analysis
//!
//! Reductions over an issue's change history. Only `status` items count as
//! transitions; the history is walked in the order Jira returns it (oldest
//! first), so "last" means the latest matching entry.

use anyhow::Result;
use tracing::debug;

use crate::models::{Changelog, ChangelogHistory, ChangelogItem, JiraUser};
use crate::tracker::IssueTracker;

/// Status whose transitions mark a reopened issue
pub const REOPENED_STATUS: &str = "Reopened";

/// Status treated as "resolved by development" when none is configured
pub const DEFAULT_RESOLVER_STATUS: &str = "Developed";

const STATUS_FIELD: &str = "status";

fn is_transition_into(item: &ChangelogItem, status: &str) -> bool {
  item.field == STATUS_FIELD && item.to_text.as_deref() == Some(status)
}

/// Histories containing a transition into `status`, oldest first
fn transitions_into<'a, 's>(
  changelog: &'a Changelog,
  status: &'s str,
) -> impl Iterator<Item = &'a ChangelogHistory> + use<'a, 's> {
  changelog
    .histories
    .iter()
    .filter(move |history| history.items.iter().any(|item| is_transition_into(item, status)))
}

/// Actor of the most recent transition into `status`, empty if there is none
pub fn last_actor_into_status(changelog: &Changelog, status: &str) -> String {
  transitions_into(changelog, status)
    .last()
    .and_then(|history| history.author.as_ref())
    .and_then(JiraUser::identity)
    .unwrap_or_default()
    .to_string()
}

/// Every transition into the `Reopened` status
pub fn reopen_transitions(changelog: &Changelog) -> Vec<&ChangelogItem> {
  changelog
    .histories
    .iter()
    .flat_map(|history| history.items.iter())
    .filter(|item| is_transition_into(item, REOPENED_STATUS))
    .collect()
}

/// Number of transitions into the `Reopened` status
pub fn reopen_count(changelog: &Changelog) -> usize {
  reopen_transitions(changelog).len()
}

/// Timestamp of the last transition into `status`
pub fn last_transition_date<'a>(changelog: &'a Changelog, status: &str) -> Option<&'a str> {
  transitions_into(changelog, status)
    .last()
    .map(|history| history.created.as_str())
}

/// Fetch `key` with its changelog and return whoever last moved it into
/// `status`
pub fn last_resolver<T: IssueTracker + ?Sized>(tracker: &T, key: &str, status: &str) -> Result<String> {
  let issue = tracker.issue_with_changelog(key)?;
  let resolver = issue
    .changelog
    .as_ref()
    .map(|changelog| last_actor_into_status(changelog, status))
    .unwrap_or_default();

  debug!(key, status, resolver = %resolver, "Resolved last actor from changelog");
  Ok(resolver)
}
