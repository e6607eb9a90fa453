//! # Jiracon CLI Library
//!
//! Command definitions and handlers for the `jiracon` binary, plus the pure
//! renderers they print with.

pub mod cli;
pub mod context;
pub mod render;
