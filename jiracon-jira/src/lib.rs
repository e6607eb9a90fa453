//! # Jira API Client
//!
//! Jira REST v2 integration for jiracon: searching, fetching issues with
//! their changelog, transitions, field updates and project versions.
//!
//! [`JiraClient`] is async. [`BlockingJiraClient`] owns a Tokio runtime and
//! implements [`jiracon_core::IssueTracker`] on top of it for the synchronous
//! reporting code.

pub mod auth;
mod blocking;
mod client;
pub mod consts;
mod endpoints;
pub mod models;

pub use auth::{create_blocking_client, create_jira_runtime_and_client, jira_auth};
pub use blocking::BlockingJiraClient;
pub use client::{JiraClient, create_jira_client};
pub use models::{JiraAuth, JiraSearchResults, JiraTransitions, TransitionId, TransitionRequest, UpdateRequest};
