//! # Jira Search Endpoint
//!
//! One page of JQL search results. Paging across pages is the job of
//! `jiracon_core::BulkIssueFetcher`.

use anyhow::{Context, Result};
use jiracon_core::models::JiraIssue;
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::client::JiraClient;
use crate::models::JiraSearchResults;

impl JiraClient {
  /// Run a JQL search and return up to `max_results` issues starting at
  /// `start_at`, with all fields
  pub async fn search_issues(&self, jql: &str, start_at: usize, max_results: usize) -> Result<Vec<JiraIssue>> {
    let start_at = start_at.to_string();
    let max_results = max_results.to_string();

    let response = self
      .request(Method::GET, "/search")
      .query(&[
        ("jql", jql),
        ("startAt", start_at.as_str()),
        ("maxResults", max_results.as_str()),
        ("fields", "*all"),
      ])
      .send()
      .await
      .context("Failed to search Jira issues")?;

    match response.status() {
      StatusCode::OK => {
        let results = response
          .json::<JiraSearchResults>()
          .await
          .context("Failed to parse Jira search results")?;
        debug!(
          start_at = results.start_at,
          returned = results.issues.len(),
          total = results.total,
          "Received search page"
        );
        Ok(results.issues)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Invalid JQL query: {}",
        response.text().await.unwrap_or_default()
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use jiracon_test_utils::{IssueBuilder, search_page_json};
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::JiraClient;

  fn anonymous_client(server: &MockServer) -> JiraClient {
    JiraClient::new(&server.uri(), None, Duration::from_secs(5)).unwrap()
  }

  #[tokio::test]
  async fn test_search_issues_sends_paging_parameters() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = anonymous_client(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .and(query_param("jql", "project = FE order by key"))
      .and(query_param("startAt", "4"))
      .and(query_param("maxResults", "2"))
      .and(query_param("fields", "*all"))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_page_json(
        vec![
          IssueBuilder::new("FE-5").build(),
          IssueBuilder::new("FE-6").build(),
        ],
        4,
        2,
        9,
      )))
      .expect(1)
      .mount(&mock_server)
      .await;

    let issues = client.search_issues("project = FE order by key", 4, 2).await?;

    let keys: Vec<&str> = issues.iter().map(|issue| issue.key.as_str()).collect();
    assert_eq!(keys, vec!["FE-5", "FE-6"]);
    Ok(())
  }

  #[tokio::test]
  async fn test_search_issues_past_the_end_is_empty() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = anonymous_client(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_page_json(vec![], 100, 50, 3)))
      .mount(&mock_server)
      .await;

    assert!(client.search_issues("project = FE", 100, 50).await?.is_empty());
    Ok(())
  }

  #[tokio::test]
  async fn test_search_issues_invalid_jql() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = anonymous_client(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
          "errorMessages": ["Error in the JQL Query: Expecting operator but got 'FE'."],
          "errors": {}
      })))
      .mount(&mock_server)
      .await;

    let error = client.search_issues("project FE", 0, 50).await.unwrap_err();
    assert!(error.to_string().contains("Invalid JQL query"));
    assert!(error.to_string().contains("Expecting operator"));
    Ok(())
  }

  #[tokio::test]
  async fn test_search_issues_unauthorized() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = anonymous_client(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .respond_with(ResponseTemplate::new(401))
      .mount(&mock_server)
      .await;

    let error = client.search_issues("project = FE", 0, 50).await.unwrap_err();
    assert!(error.to_string().contains("Authentication failed"));
    Ok(())
  }
}
