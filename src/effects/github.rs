//! GitHub API effect types.
//!
//! These types describe GitHub API operations as data, without executing them.
//! An interpreter (see [`crate::github`]) executes them against the API.

use serde::{Deserialize, Serialize};

use crate::types::{CommentId, IssueNumber, PrNumber};

/// A GitHub API effect.
///
/// Effects are repo-scoped: the interpreter is constructed with a `RepoId`,
/// so effects don't include it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GitHubEffect {
    // ─── Issues ───────────────────────────────────────────────────────────────
    /// Open a new issue.
    CreateIssue {
        title: String,
        body: String,
        labels: Vec<String>,
    },

    // ─── Pull requests ────────────────────────────────────────────────────────
    /// Post a new comment on a PR.
    PostComment { pr: PrNumber, body: String },

    /// Add labels to a PR. Labels that don't exist yet are created by GitHub.
    AddLabels { pr: PrNumber, labels: Vec<String> },
}

impl GitHubEffect {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            GitHubEffect::CreateIssue { .. } => "create_issue",
            GitHubEffect::PostComment { .. } => "post_comment",
            GitHubEffect::AddLabels { .. } => "add_labels",
        }
    }
}

/// Response from a GitHub effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GitHubResponse {
    /// Response to `CreateIssue`.
    IssueCreated { number: IssueNumber },

    /// Response to `PostComment`.
    CommentPosted { id: CommentId },

    /// Response to `AddLabels`. Contains the PR's full label set afterwards.
    LabelsAdded { labels: Vec<String> },
}
