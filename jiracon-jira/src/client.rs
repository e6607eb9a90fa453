use std::time::Duration;

use anyhow::{Context, Result};
use jiracon_core::creds::Credentials;
use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;

use crate::auth::jira_auth;
use crate::consts::{API_PREFIX, USER_AGENT};
use crate::models::JiraAuth;

/// Represents a Jira API client
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: Option<JiraAuth>,
}

impl JiraClient {
  /// Create a new Jira client. Without `auth` every request is anonymous.
  pub fn new(base_url: &str, auth: Option<JiraAuth>, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .timeout(timeout)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn is_authenticated(&self) -> bool {
    self.auth.is_some()
  }

  /// Start a request to a REST v2 resource, authenticated when credentials
  /// are configured
  pub(crate) fn request(&self, method: Method, resource: &str) -> RequestBuilder {
    let url = format!("{}{}{}", self.base_url, API_PREFIX, resource);
    debug!(%method, url = %url, "Jira request");

    let request = self.client.request(method, url);
    match &self.auth {
      Some(auth) => request.basic_auth(&auth.username, Some(&auth.api_token)),
      None => request,
    }
  }

  /// Test the Jira connection by fetching the current user
  pub async fn test_connection(&self) -> Result<bool> {
    let response = self
      .request(Method::GET, "/myself")
      .send()
      .await
      .context("Failed to connect to Jira")?;

    Ok(response.status().is_success())
  }
}

/// Create a Jira client from optional credentials
pub fn create_jira_client(base_url: &str, credentials: Option<&Credentials>, timeout: Duration) -> Result<JiraClient> {
  JiraClient::new(base_url, credentials.map(jira_auth), timeout)
}
