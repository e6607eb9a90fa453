//! # Jira API Endpoints
//!
//! Endpoint implementations grouped by resource: search, issues,
//! transitions and project versions.

pub mod issues;
pub mod projects;
pub mod search;
pub mod transitions;
