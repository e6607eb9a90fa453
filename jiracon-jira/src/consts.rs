//! Constants for the jiracon-jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("jiracon/", env!("CARGO_PKG_VERSION"));

/// Prefix of every REST v2 resource
pub const API_PREFIX: &str = "/rest/api/2";
