//! Effect interpreter trait.
//!
//! The octocrab-backed implementation lives in [`crate::github`]. The trait
//! lets tests substitute a recording interpreter.

use std::future::Future;

use tracing::debug;

use super::github::{GitHubEffect, GitHubResponse};

/// Interprets GitHub effects against the GitHub API.
///
/// Implementations are constructed with a `RepoId`, so all effects executed
/// through a single interpreter instance are scoped to that repository.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct RecordingInterpreter {
///     seen: Mutex<Vec<GitHubEffect>>,
/// }
///
/// impl GitHubInterpreter for RecordingInterpreter {
///     type Error = std::convert::Infallible;
///
///     async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
///         self.seen.lock().unwrap().push(effect);
///         Ok(GitHubResponse::LabelsAdded { labels: vec![] })
///     }
/// }
/// ```
pub trait GitHubInterpreter {
    /// The error type returned by this interpreter.
    type Error;

    /// Execute a GitHub effect and return its response.
    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, Self::Error>> + Send;
}

/// Executes effects in order, stopping at the first failure.
///
/// Responses are returned in the same order as the effects. Effects after a
/// failing one are not attempted.
pub async fn apply_effects<I>(
    interpreter: &I,
    effects: Vec<GitHubEffect>,
) -> Result<Vec<GitHubResponse>, I::Error>
where
    I: GitHubInterpreter + Sync,
{
    let mut responses = Vec::with_capacity(effects.len());
    for effect in effects {
        debug!(effect = effect.name(), "Executing GitHub effect");
        responses.push(interpreter.interpret(effect).await?);
    }
    Ok(responses)
}
