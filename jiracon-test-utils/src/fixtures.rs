//! Jira payload fixtures
//!
//! Builders for the JSON documents the Jira REST API returns, so tests can
//! describe issues by the fields they care about and leave the rest at
//! sensible defaults.

use serde_json::{Map, Value, json};

/// Builds the JSON form of a Jira issue.
///
/// New issues are open bugs with a summary of `Issue <KEY>` and no other
/// fields. Histories are emitted as an expanded changelog only when at least
/// one was added.
#[derive(Debug, Clone)]
pub struct IssueBuilder {
  key: String,
  fields: Map<String, Value>,
  histories: Vec<Value>,
}

impl IssueBuilder {
  pub fn new(key: &str) -> Self {
    let mut fields = Map::new();
    fields.insert("summary".to_string(), json!(format!("Issue {key}")));
    fields.insert("status".to_string(), json!({ "name": "Open" }));
    fields.insert("issuetype".to_string(), json!({ "name": "Bug" }));

    Self {
      key: key.to_string(),
      fields,
      histories: Vec::new(),
    }
  }

  /// Set any field to a raw JSON value, custom fields included
  pub fn field(mut self, name: &str, value: Value) -> Self {
    self.fields.insert(name.to_string(), value);
    self
  }

  pub fn summary(self, summary: &str) -> Self {
    self.field("summary", json!(summary))
  }

  pub fn description(self, description: &str) -> Self {
    self.field("description", json!(description))
  }

  pub fn status(self, name: &str) -> Self {
    self.field("status", json!({ "name": name }))
  }

  pub fn issue_type(self, name: &str) -> Self {
    self.field("issuetype", json!({ "name": name }))
  }

  pub fn assignee(self, name: &str) -> Self {
    self.field("assignee", json!({ "name": name, "displayName": name }))
  }

  pub fn created(self, timestamp: &str) -> Self {
    self.field("created", json!(timestamp))
  }

  pub fn resolution_date(self, timestamp: &str) -> Self {
    self.field("resolutiondate", json!(timestamp))
  }

  pub fn attachments(self, filenames: &[&str]) -> Self {
    let attachments: Vec<Value> = filenames
      .iter()
      .enumerate()
      .map(|(index, filename)| json!({ "id": (20000 + index).to_string(), "filename": filename }))
      .collect();
    self.field("attachment", Value::Array(attachments))
  }

  /// Append a changelog entry. Each item is `(field, from, to)`.
  pub fn history(mut self, author: &str, created: &str, items: &[(&str, &str, &str)]) -> Self {
    let items: Vec<Value> = items
      .iter()
      .map(|(field, from, to)| json!({ "field": field, "fromString": from, "toString": to }))
      .collect();
    let id = (self.histories.len() + 1).to_string();

    self.histories.push(json!({
      "id": id,
      "author": { "name": author, "displayName": author },
      "created": created,
      "items": items,
    }));
    self
  }

  pub fn build(self) -> Value {
    let mut issue = json!({
      "id": format!("1{:04}", self.key.bytes().map(usize::from).sum::<usize>() % 10_000),
      "key": self.key,
      "fields": Value::Object(self.fields),
    });

    if !self.histories.is_empty() {
      issue["changelog"] = json!({
        "startAt": 0,
        "total": self.histories.len(),
        "histories": self.histories,
      });
    }

    issue
  }
}

/// One page of `/rest/api/2/search` results
pub fn search_page_json(issues: Vec<Value>, start_at: usize, max_results: usize, total: usize) -> Value {
  json!({
    "startAt": start_at,
    "maxResults": max_results,
    "total": total,
    "issues": issues,
  })
}

/// A `/transitions` response listing `(id, name)` pairs
pub fn transitions_json(transitions: &[(&str, &str)]) -> Value {
  let transitions: Vec<Value> = transitions
    .iter()
    .map(|(id, name)| json!({ "id": id, "name": name, "to": { "name": name } }))
    .collect();
  json!({ "transitions": transitions })
}

/// A `/project/{key}/versions` response. Each entry is
/// `(name, release_date, start_date)`.
pub fn versions_json(versions: &[(&str, Option<&str>, Option<&str>)]) -> Value {
  let versions: Vec<Value> = versions
    .iter()
    .enumerate()
    .map(|(index, (name, release, start))| {
      let mut version = json!({
        "id": (30000 + index).to_string(),
        "name": name,
        "released": release.is_some(),
        "archived": false,
      });
      if let Some(release) = release {
        version["releaseDate"] = json!(release);
      }
      if let Some(start) = start {
        version["startDate"] = json!(start);
      }
      version
    })
    .collect();
  Value::Array(versions)
}
