//! GitHub effect interpreter using octocrab.

use tracing::info;

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::types::{CommentId, IssueNumber, PrNumber};

use super::client::OctocrabClient;
use super::error::GitHubApiError;

impl GitHubInterpreter for OctocrabClient {
    type Error = GitHubApiError;

    async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
        interpret_github_effect(self, effect).await
    }
}

/// Executes a single effect against the GitHub API.
pub async fn interpret_github_effect(
    client: &OctocrabClient,
    effect: GitHubEffect,
) -> Result<GitHubResponse, GitHubApiError> {
    match effect {
        GitHubEffect::CreateIssue {
            title,
            body,
            labels,
        } => create_issue(client, title, body, labels).await,
        GitHubEffect::PostComment { pr, body } => post_comment(client, pr, body).await,
        GitHubEffect::AddLabels { pr, labels } => add_labels(client, pr, labels).await,
    }
}

// ─── Issues ───────────────────────────────────────────────────────────────────

async fn create_issue(
    client: &OctocrabClient,
    title: String,
    body: String,
    labels: Vec<String>,
) -> Result<GitHubResponse, GitHubApiError> {
    let result = client
        .inner()
        .issues(client.owner(), client.repo_name())
        .create(title)
        .body(body)
        .labels(labels)
        .send()
        .await;

    match result {
        Ok(issue) => {
            let number = IssueNumber(issue.number);
            info!(repo = %client.repo(), issue = %number, "Opened carbon impact issue");
            Ok(GitHubResponse::IssueCreated { number })
        }
        Err(e) => Err(GitHubApiError::from_octocrab(
            format!("create issue on {}", client.repo()),
            e,
        )),
    }
}

// ─── Pull requests ────────────────────────────────────────────────────────────

async fn post_comment(
    client: &OctocrabClient,
    pr: PrNumber,
    body: String,
) -> Result<GitHubResponse, GitHubApiError> {
    let result = client
        .inner()
        .issues(client.owner(), client.repo_name())
        .create_comment(pr.0, body)
        .await;

    match result {
        Ok(comment) => {
            let id = CommentId(comment.id.into_inner());
            info!(
                repo = %client.repo(),
                pr = %pr,
                comment = %id,
                "Posted carbon footprint comment"
            );
            Ok(GitHubResponse::CommentPosted { id })
        }
        Err(e) => Err(GitHubApiError::from_octocrab(
            format!("comment on {} PR {}", client.repo(), pr),
            e,
        )),
    }
}

async fn add_labels(
    client: &OctocrabClient,
    pr: PrNumber,
    labels: Vec<String>,
) -> Result<GitHubResponse, GitHubApiError> {
    let result = client
        .inner()
        .issues(client.owner(), client.repo_name())
        .add_labels(pr.0, &labels)
        .await;

    match result {
        Ok(applied) => Ok(GitHubResponse::LabelsAdded {
            labels: applied.into_iter().map(|label| label.name).collect(),
        }),
        Err(e) => Err(GitHubApiError::from_octocrab(
            format!("label {} PR {}", client.repo(), pr),
            e,
        )),
    }
}
