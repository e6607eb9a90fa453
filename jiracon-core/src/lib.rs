//! # Jiracon Core Library
//!
//! Issue models, the [`IssueTracker`] capability, the paginated bulk fetcher
//! and the pure helpers (changelog reductions, version ordering, date
//! arithmetic, regex extraction) that the reporting commands are built on.
//! Everything that talks to Jira goes through [`IssueTracker`], so the
//! helpers here never perform I/O themselves.

pub mod changelog;
pub mod config;
pub mod creds;
pub mod dates;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod models;
pub mod output;
pub mod queries;
pub mod text;
pub mod tracker;
pub mod transition;
pub mod url;
pub mod version;

#[cfg(test)]
mod testing;

pub use config::{ConfigDirs, ConfigOverrides, ConnectorConfig, DEFAULT_JIRA_URL, get_config_dirs};
pub use creds::Credentials;
pub use error::ConnectorError;
pub use fetcher::{BulkIssueFetcher, FetchLimits};
pub use models::{
  Changelog, ChangelogHistory, ChangelogItem, JiraAttachment, JiraIssue, JiraIssueFields, JiraIssueStatus,
  JiraIssueType, JiraTransition, JiraUser, ProjectVersion,
};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use queries::{QueryKind, QueryTemplates, ReportQueries};
pub use tracker::IssueTracker;
pub use transition::{TransitionOutcome, transit, transit_all};
pub use version::LooseVersion;
