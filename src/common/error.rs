//! Error types for the smoke-test runner
//!
//! Every failure a check can produce lands in one of three categories
//! (assertion, network, unexpected), which decides how the entry point
//! reports it.

use std::fmt;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke-test runner
#[derive(Error, Debug)]
pub enum Error {
    // === Check Errors ===
    #[error("{0}")]
    Assertion(String),

    // === HTTP Errors ===
    #[error("{0}")]
    Transport(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid JSON in response from {url}: {error}")]
    InvalidBody { url: String, error: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

/// How a failure is surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// An expected value or status did not match
    Assertion,
    /// Connection, DNS, timeout or TLS failure
    Network,
    /// Anything else
    Unexpected,
}

impl FailureKind {
    /// Prefix used on the final failure line
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Assertion => "api test failed",
            FailureKind::Network => "network/request error",
            FailureKind::Unexpected => "unexpected error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Error {
    /// Category used when reporting this error
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Assertion(_) => FailureKind::Assertion,
            Error::Transport(_) => FailureKind::Network,
            _ => FailureKind::Unexpected,
        }
    }

    /// Create an assertion error
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    /// Create a transport error carrying the full source chain
    ///
    /// reqwest's own message only says which request failed; the reason
    /// (refused connection, DNS failure, ...) sits further down the chain.
    pub fn transport(error: &reqwest::Error) -> Self {
        let mut message = error.to_string();
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Transport(message)
    }

    /// Create an invalid body error
    pub fn invalid_body(url: &str, error: &serde_json::Error) -> Self {
        Self::InvalidBody {
            url: url.to_string(),
            error: error.to_string(),
        }
    }
}
