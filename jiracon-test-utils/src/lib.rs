//! Test utilities shared across the jiracon workspace
//!
//! This crate provides common testing infrastructure including:
//! - Jira payload fixtures ([`IssueBuilder`], [`search_page_json`])
//! - Temporary `.netrc` files ([`NetrcGuard`])
//! - Temporary config files ([`ConfigFileGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod fixtures;
pub mod netrc;

// Re-export commonly used items
pub use config::ConfigFileGuard;
pub use fixtures::{IssueBuilder, search_page_json, transitions_json, versions_json};
pub use netrc::NetrcGuard;
