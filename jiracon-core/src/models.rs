//! # Issue Models
//!
//! Structured views of the Jira records jiracon reads. Every field that Jira
//! may omit or send as `null` is optional here, and the accessor helpers turn
//! absence into an empty value instead of an error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Represents a Jira issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssue {
  #[serde(default)]
  pub id: String,
  pub key: String,
  pub fields: JiraIssueFields,
  /// Present only when the issue was fetched with `expand=changelog`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub changelog: Option<Changelog>,
}

/// Represents Jira issue fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JiraIssueFields {
  #[serde(default)]
  pub summary: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub status: Option<JiraIssueStatus>,
  #[serde(default)]
  pub issuetype: Option<JiraIssueType>,
  #[serde(default)]
  pub assignee: Option<JiraUser>,
  #[serde(default)]
  pub created: Option<String>,
  #[serde(default)]
  pub resolutiondate: Option<String>,
  #[serde(default)]
  pub attachment: Option<Vec<JiraAttachment>>,
  /// Every other field returned by Jira, custom fields included
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Represents a Jira issue status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssueStatus {
  #[serde(default)]
  pub id: Option<String>,
  pub name: String,
}

/// Represents a Jira issue type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssueType {
  #[serde(default)]
  pub id: Option<String>,
  pub name: String,
}

/// Represents a Jira user (assignee, changelog author)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub account_id: Option<String>,
  #[serde(default)]
  pub display_name: Option<String>,
  #[serde(default)]
  pub email_address: Option<String>,
}

impl JiraUser {
  /// The identifier Jira accepts when assigning: the login name on Server,
  /// the account id on Cloud
  pub fn identity(&self) -> Option<&str> {
    self.name.as_deref().or(self.account_id.as_deref())
  }
}

/// Represents an issue attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraAttachment {
  #[serde(default)]
  pub id: Option<String>,
  pub filename: String,
}

/// Represents an issue's change history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Changelog {
  #[serde(default)]
  pub histories: Vec<ChangelogHistory>,
}

/// One change event: who, when, and the fields it touched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogHistory {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub author: Option<JiraUser>,
  pub created: String,
  #[serde(default)]
  pub items: Vec<ChangelogItem>,
}

/// A single field change inside a history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogItem {
  pub field: String,
  #[serde(rename = "fromString", default)]
  pub from_text: Option<String>,
  #[serde(rename = "toString", default)]
  pub to_text: Option<String>,
}

/// Represents a Jira transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraTransition {
  pub id: String,
  pub name: String,
}

/// Represents a project version (release)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectVersion {
  #[serde(default)]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub released: bool,
  #[serde(default)]
  pub archived: bool,
  #[serde(default)]
  pub release_date: Option<String>,
  #[serde(default)]
  pub start_date: Option<String>,
}

impl JiraIssue {
  /// Status name, empty when Jira did not return a status
  pub fn status_name(&self) -> &str {
    self.fields.status.as_ref().map_or("", |status| status.name.as_str())
  }

  /// Issue type name, empty when absent
  pub fn issue_type_name(&self) -> &str {
    self.fields.issuetype.as_ref().map_or("", |kind| kind.name.as_str())
  }

  /// Assignee identity, empty when the issue is unassigned
  pub fn assignee_name(&self) -> &str {
    self.fields.assignee.as_ref().and_then(JiraUser::identity).unwrap_or("")
  }

  /// Raw value of a named field such as `customfield_13405`
  pub fn custom_field(&self, name: &str) -> Option<&Value> {
    self.fields.extra.get(name).filter(|value| !value.is_null())
  }

  /// Textual value of a named field.
  ///
  /// Strings are returned as is. Option and user pickers come back from Jira
  /// as objects, so their `value` or `name` member is used instead.
  pub fn custom_field_text(&self, name: &str) -> Option<&str> {
    match self.custom_field(name)? {
      Value::String(text) => Some(text.as_str()),
      Value::Object(object) => object
        .get("value")
        .or_else(|| object.get("name"))
        .and_then(Value::as_str),
      _ => None,
    }
  }
}
