//! posts-smoke - smoke checks for a JSON blog-post REST collection
//!
//! This library exposes the HTTP client, the check routines and the
//! runner so they can be driven from tests or other binaries.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::{Error, FailureKind, Result};
pub use scenario::{run_check, run_checks, Check, CheckContext, Reporter, RunReport};
