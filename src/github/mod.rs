//! GitHub API client and effect interpreter.
//!
//! Executes [`GitHubEffect`](crate::effects::GitHubEffect)s through octocrab.
//! The interpreter is only wired up when a `GITHUB_TOKEN` is configured.

mod client;
mod error;
mod interpreter;

pub use client::OctocrabClient;
pub use error::GitHubApiError;
pub use interpreter::interpret_github_effect;
