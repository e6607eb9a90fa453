use anyhow::{Context, Result};
use jiracon_core::models::ProjectVersion;
use reqwest::{Method, StatusCode};

use crate::client::JiraClient;

impl JiraClient {
  /// List every version (release) of a project
  pub async fn get_project_versions(&self, project_key: &str) -> Result<Vec<ProjectVersion>> {
    let response = self
      .request(Method::GET, &format!("/project/{project_key}/versions"))
      .send()
      .await
      .context("Failed to fetch project versions")?;

    match response.status() {
      StatusCode::OK => {
        let versions = response
          .json::<Vec<ProjectVersion>>()
          .await
          .context("Failed to parse project versions")?;
        Ok(versions)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Project {} not found", project_key)),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }
}
