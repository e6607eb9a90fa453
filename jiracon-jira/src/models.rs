//! Wire types for the Jira REST API.
//!
//! Issue, transition and version records are the shared models from
//! `jiracon-core`; this module only adds request bodies and response
//! envelopes.

use jiracon_core::models::{JiraIssue, JiraTransition};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// One page of search results
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraSearchResults {
  #[serde(default)]
  pub start_at: usize,
  #[serde(default)]
  pub max_results: usize,
  #[serde(default)]
  pub total: usize,
  #[serde(default)]
  pub issues: Vec<JiraIssue>,
}

/// Represents a list of Jira transitions
#[derive(Debug, Deserialize)]
pub struct JiraTransitions {
  pub transitions: Vec<JiraTransition>,
}

/// Represents a transition request payload
#[derive(Debug, Serialize)]
pub struct TransitionRequest {
  pub transition: TransitionId,
}

/// Represents a transition ID for the request
#[derive(Debug, Serialize)]
pub struct TransitionId {
  pub id: String,
}

/// Body of an issue update: the fields to set
#[derive(Debug, Serialize)]
pub struct UpdateRequest {
  pub fields: Map<String, Value>,
}
