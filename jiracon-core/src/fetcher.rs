//! # Bulk Issue Fetcher
//!
//! Walks a JQL search page by page so callers never handle `startAt`
//! themselves.
//!
//! The loop stops once the cursor reaches the global limit or a page comes
//! back empty. Pages are taken whole, so the result can overshoot the global
//! limit by up to `page_size - 1` issues when the limit is not a multiple of
//! the page size. That overshoot is kept as is because existing reports
//! depend on the exact issue counts.

use anyhow::Result;
use tracing::{debug, info};

use crate::error::ConnectorError;
use crate::models::JiraIssue;
use crate::tracker::IssueTracker;

/// Pagination budget for one fetch: the global cap and the page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
  global_limit: usize,
  page_size: usize,
}

impl FetchLimits {
  /// Both values must be positive. A page size above the global limit is
  /// clamped down to it.
  pub fn new(global_limit: usize, page_size: usize) -> Result<Self, ConnectorError> {
    if global_limit == 0 {
      return Err(ConnectorError::InvalidArgument(
        "global limit must be greater than zero".to_string(),
      ));
    }
    if page_size == 0 {
      return Err(ConnectorError::InvalidArgument(
        "page size must be greater than zero".to_string(),
      ));
    }

    Ok(Self {
      global_limit,
      page_size: page_size.min(global_limit),
    })
  }

  pub const fn global_limit(&self) -> usize {
    self.global_limit
  }

  pub const fn page_size(&self) -> usize {
    self.page_size
  }
}

/// Fetches every issue matching a filter through an [`IssueTracker`]
pub struct BulkIssueFetcher<'a, T: IssueTracker + ?Sized> {
  tracker: &'a T,
  limits: FetchLimits,
}

impl<'a, T: IssueTracker + ?Sized> BulkIssueFetcher<'a, T> {
  pub const fn new(tracker: &'a T, limits: FetchLimits) -> Self {
    Self { tracker, limits }
  }

  pub const fn limits(&self) -> FetchLimits {
    self.limits
  }

  pub const fn tracker(&self) -> &'a T {
    self.tracker
  }

  /// Collect all matches of `jql` in tracker order
  pub fn fetch_all(&self, jql: &str) -> Result<Vec<JiraIssue>> {
    self.fetch_each_page(jql, |_| Ok(()))
  }

  /// Collect all matches of `jql`, handing each page to `on_page` as soon as
  /// it arrives.
  ///
  /// A failed search, or an error returned by `on_page`, aborts the whole
  /// fetch. Pages delivered to `on_page` before the failure have already been
  /// processed; the accumulated result is discarded.
  pub fn fetch_each_page<F>(&self, jql: &str, mut on_page: F) -> Result<Vec<JiraIssue>>
  where
    F: FnMut(&[JiraIssue]) -> Result<()>,
  {
    let FetchLimits {
      global_limit,
      page_size,
    } = self.limits;

    let mut all_issues = Vec::new();
    let mut start = 0;
    let mut requests = 0;

    while start < global_limit {
      debug!(jql, start, page_size, "Requesting page of issues");
      let page = self.tracker.search(jql, start, page_size)?;
      requests += 1;
      start += page_size;

      if page.is_empty() {
        debug!(start, "Empty page, no more matches");
        break;
      }

      on_page(&page)?;
      all_issues.extend(page);
    }

    info!(
      total = all_issues.len(),
      requests, global_limit, "Fetched issues for filter"
    );
    Ok(all_issues)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::FakeTracker;

  fn keys(issues: &[JiraIssue]) -> Vec<&str> {
    issues.iter().map(|issue| issue.key.as_str()).collect()
  }

  #[test]
  fn test_limits_reject_zero_values() {
    assert!(matches!(
      FetchLimits::new(0, 10),
      Err(ConnectorError::InvalidArgument(_))
    ));
    assert!(matches!(
      FetchLimits::new(10, 0),
      Err(ConnectorError::InvalidArgument(_))
    ));
  }

  #[test]
  fn test_page_size_is_clamped_to_global_limit() {
    let limits = FetchLimits::new(5, 50).unwrap();
    assert_eq!(limits.global_limit(), 5);
    assert_eq!(limits.page_size(), 5);

    let tracker = FakeTracker::with_matches(12);
    let clamped = BulkIssueFetcher::new(&tracker, limits).fetch_all("project = TEST").unwrap();

    let explicit_tracker = FakeTracker::with_matches(12);
    let explicit = BulkIssueFetcher::new(&explicit_tracker, FetchLimits::new(5, 5).unwrap())
      .fetch_all("project = TEST")
      .unwrap();

    assert_eq!(keys(&clamped), keys(&explicit));
    assert_eq!(tracker.search_calls(), explicit_tracker.search_calls());
    assert_eq!(tracker.search_calls(), vec![(0, 5)]);
  }

  #[test]
  fn test_stops_on_short_final_page() {
    // 9 matches in pages of 4, 4, 1
    let tracker = FakeTracker::with_matches(9);
    let fetcher = BulkIssueFetcher::new(&tracker, FetchLimits::new(10, 4).unwrap());

    let issues = fetcher.fetch_all("project = TEST").unwrap();

    assert_eq!(issues.len(), 9);
    assert_eq!(tracker.search_offsets(), vec![0, 4, 8]);
    assert_eq!(issues[0].key, "TEST-1");
    assert_eq!(issues[8].key, "TEST-9");
  }

  #[test]
  fn test_full_page_overshoot_past_global_limit() {
    let tracker = FakeTracker::with_matches(13);
    let fetcher = BulkIssueFetcher::new(&tracker, FetchLimits::new(10, 4).unwrap());

    let issues = fetcher.fetch_all("project = TEST").unwrap();

    // The third request starts at 8 < 10 and its page is kept whole
    assert_eq!(tracker.search_offsets(), vec![0, 4, 8]);
    assert_eq!(issues.len(), 12);
    assert_eq!(issues.last().map(|issue| issue.key.as_str()), Some("TEST-12"));
  }

  #[test]
  fn test_result_size_is_bounded_by_full_pages() {
    for (matches, global_limit, page_size) in [(0, 10, 3), (7, 10, 3), (25, 10, 3), (25, 9, 3), (100, 1, 1)] {
      let tracker = FakeTracker::with_matches(matches);
      let fetcher = BulkIssueFetcher::new(&tracker, FetchLimits::new(global_limit, page_size).unwrap());

      let issues = fetcher.fetch_all("project = TEST").unwrap();

      let full_pages = global_limit.div_ceil(page_size);
      assert_eq!(
        issues.len(),
        matches.min(full_pages * page_size),
        "matches={matches} limit={global_limit} page={page_size}"
      );
    }
  }

  #[test]
  fn test_empty_first_page_terminates_immediately() {
    let tracker = FakeTracker::with_matches(0);
    let fetcher = BulkIssueFetcher::new(&tracker, FetchLimits::new(100, 10).unwrap());

    let issues = fetcher.fetch_all("project = EMPTY").unwrap();

    assert!(issues.is_empty());
    assert_eq!(tracker.search_offsets(), vec![0]);
  }

  #[test]
  fn test_exact_multiple_issues_one_extra_request() {
    let tracker = FakeTracker::with_matches(8);
    let fetcher = BulkIssueFetcher::new(&tracker, FetchLimits::new(100, 4).unwrap());

    let issues = fetcher.fetch_all("project = TEST").unwrap();

    assert_eq!(issues.len(), 8);
    assert_eq!(tracker.search_offsets(), vec![0, 4, 8]);
  }

  #[test]
  fn test_pages_are_streamed_in_order() {
    let tracker = FakeTracker::with_matches(5);
    let fetcher = BulkIssueFetcher::new(&tracker, FetchLimits::new(10, 2).unwrap());
    let mut seen = Vec::new();

    let issues = fetcher
      .fetch_each_page("project = TEST", |page| {
        seen.push(keys(page).into_iter().map(str::to_string).collect::<Vec<_>>());
        Ok(())
      })
      .unwrap();

    assert_eq!(issues.len(), 5);
    assert_eq!(
      seen,
      vec![
        vec!["TEST-1".to_string(), "TEST-2".to_string()],
        vec!["TEST-3".to_string(), "TEST-4".to_string()],
        vec!["TEST-5".to_string()],
      ]
    );
  }

  #[test]
  fn test_search_failure_propagates_after_earlier_pages_were_streamed() {
    let tracker = FakeTracker::with_matches(10).failing_from(4);
    let fetcher = BulkIssueFetcher::new(&tracker, FetchLimits::new(10, 4).unwrap());
    let mut pages_seen = 0;

    let result = fetcher.fetch_each_page("project = TEST", |_| {
      pages_seen += 1;
      Ok(())
    });

    let error = result.unwrap_err();
    assert!(error.to_string().contains("connection reset"));
    assert_eq!(pages_seen, 1);
    assert_eq!(tracker.search_offsets(), vec![0, 4]);
  }

  #[test]
  fn test_consumer_error_aborts_fetch() {
    let tracker = FakeTracker::with_matches(10);
    let fetcher = BulkIssueFetcher::new(&tracker, FetchLimits::new(10, 4).unwrap());

    let result = fetcher.fetch_each_page("project = TEST", |_| Err(anyhow::anyhow!("consumer failed")));

    assert!(result.unwrap_err().to_string().contains("consumer failed"));
    assert_eq!(tracker.search_offsets(), vec![0]);
  }

  #[test]
  fn test_filter_is_passed_through_verbatim() {
    let tracker = FakeTracker::with_matches(1);
    let fetcher = BulkIssueFetcher::new(&tracker, FetchLimits::new(10, 10).unwrap());
    let jql = r#"project="TRANS" and resolution=Done order by key desc"#;

    fetcher.fetch_all(jql).unwrap();

    assert!(tracker.search_queries().iter().all(|query| query == jql));
  }
}
