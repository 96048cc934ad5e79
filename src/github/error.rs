//! GitHub API error type.
//!
//! Calls are not retried here. A failed call is reported to the webhook
//! handler, which answers 500 so that the delivery shows as failed in the
//! App's delivery log and can be redelivered.

use std::fmt;
use thiserror::Error;

/// A failed GitHub API call.
#[derive(Debug, Error)]
pub struct GitHubApiError {
    /// The HTTP status code, if the API answered at all.
    pub status_code: Option<u16>,

    /// A human-readable description of what was being attempted and why it failed.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for GitHubApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl GitHubApiError {
    /// Wraps an octocrab error with a description of the operation that failed.
    pub fn from_octocrab(operation: impl fmt::Display, err: octocrab::Error) -> Self {
        let status_code = Self::extract_status_code(&err);
        Self {
            status_code,
            message: format!("{operation}: {err}"),
            source: Some(err),
        }
    }

    /// Creates an error without an octocrab source.
    pub fn without_source(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    fn extract_status_code(err: &octocrab::Error) -> Option<u16> {
        match err {
            octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
            _ => None,
        }
    }
}
