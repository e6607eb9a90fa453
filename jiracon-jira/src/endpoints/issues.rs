//! # Jira Issue Endpoints
//!
//! Jira API endpoint implementations for issue operations: fetching an issue,
//! optionally with its changelog, and updating its fields.

use anyhow::{Context, Result};
use jiracon_core::models::JiraIssue;
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};

use crate::client::JiraClient;
use crate::models::UpdateRequest;

impl JiraClient {
  async fn fetch_issue(&self, issue_key: &str, expand: Option<&str>) -> Result<JiraIssue> {
    let mut request = self.request(Method::GET, &format!("/issue/{issue_key}"));
    if let Some(expand) = expand {
      request = request.query(&[("expand", expand)]);
    }

    let response = request.send().await.context("Failed to fetch Jira issue")?;

    match response.status() {
      StatusCode::OK => {
        let issue = response
          .json::<JiraIssue>()
          .await
          .context("Failed to parse Jira issue")?;
        Ok(issue)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Issue {} not found", issue_key)),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Get a Jira issue by key
  pub async fn get_issue(&self, issue_key: &str) -> Result<JiraIssue> {
    self.fetch_issue(issue_key, None).await
  }

  /// Get a Jira issue with its change history
  pub async fn get_issue_with_changelog(&self, issue_key: &str) -> Result<JiraIssue> {
    self.fetch_issue(issue_key, Some("changelog")).await
  }

  /// Set fields on an issue
  pub async fn update_issue(&self, issue_key: &str, fields: Map<String, Value>) -> Result<()> {
    let payload = UpdateRequest { fields };

    let response = self
      .request(Method::PUT, &format!("/issue/{issue_key}"))
      .json(&payload)
      .send()
      .await
      .context("Failed to update Jira issue")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Issue {} not found", issue_key)),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Invalid update for issue {}: {}",
        issue_key,
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
