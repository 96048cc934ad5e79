//! GitHub webhook payload parser.
//!
//! Parses raw webhook JSON payloads into typed [`GitHubEvent`] values.
//!
//! # Parsing Strategy
//!
//! 1. The event type comes from the `X-GitHub-Event` header
//! 2. The payload is parsed according to the event type
//! 3. Unknown event types become [`GitHubEvent::Unhandled`] without touching the body
//! 4. Fields that do not influence the decision are optional
//! 5. Malformed payloads for scored events return `Err` with details

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::carbon::LineStats;
use crate::types::{PrNumber, RepoId};

use super::events::{
    GitHubEvent, PingEvent, PrAction, PullRequestChanges, PullRequestEvent, PushEvent,
    WorkflowRunAction, WorkflowRunEvent, WorkflowRunTiming,
};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes wrong field types).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A field required for the event's action is absent.
    #[error("missing field {field} for {event_type} action {action}")]
    MissingField {
        event_type: &'static str,
        action: String,
        field: &'static str,
    },
}

/// Parses a webhook payload into a typed event.
///
/// # Returns
///
/// * `Ok(GitHubEvent::Unhandled { .. })` - Unknown event type (not an error)
/// * `Ok(event)` - Successfully parsed a scored event type
/// * `Err(e)` - Malformed payload or missing required fields
///
/// # Examples
///
/// ```
/// use carbonflow::webhooks::{parse_webhook, GitHubEvent};
///
/// let event = parse_webhook("ping", br#"{"zen": "Design for failure."}"#).unwrap();
/// assert!(matches!(event, GitHubEvent::Ping(_)));
///
/// let event = parse_webhook("issues", b"not even json").unwrap();
/// assert!(matches!(event, GitHubEvent::Unhandled { .. }));
/// ```
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> Result<GitHubEvent, ParseError> {
    match event_type {
        "ping" => parse_ping(payload).map(GitHubEvent::Ping),
        "push" => parse_push(payload).map(GitHubEvent::Push),
        "pull_request" => parse_pull_request(payload).map(GitHubEvent::PullRequest),
        "workflow_run" => parse_workflow_run(payload).map(GitHubEvent::WorkflowRun),
        other => Ok(GitHubEvent::Unhandled {
            event_type: other.to_string(),
        }),
    }
}

// ============================================================================
// Shared raw structures
// ============================================================================

/// Repository info. Organization-level hooks may omit it entirely.
#[derive(Debug, Deserialize)]
struct RawRepository {
    full_name: Option<String>,
    name: Option<String>,
    owner: Option<RawOwner>,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    login: Option<String>,
    name: Option<String>,
}

impl RawRepository {
    fn into_repo_id(self) -> Option<RepoId> {
        let owner = self.owner.and_then(|o| o.login.or(o.name));
        match (owner, self.name) {
            (Some(owner), Some(name)) => Some(RepoId::new(owner, name)),
            _ => self.full_name.as_deref().and_then(RepoId::parse_full_name),
        }
    }
}

fn repo_id(repository: Option<RawRepository>) -> Option<RepoId> {
    repository.and_then(RawRepository::into_repo_id)
}

// ============================================================================
// ping event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPingPayload {
    zen: Option<String>,
    repository: Option<RawRepository>,
}

fn parse_ping(payload: &[u8]) -> Result<PingEvent, ParseError> {
    let raw: RawPingPayload = serde_json::from_slice(payload)?;

    Ok(PingEvent {
        repo: repo_id(raw.repository),
        zen: raw.zen,
    })
}

// ============================================================================
// push event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPushPayload {
    #[serde(rename = "ref")]
    git_ref: Option<String>,
    // null and absent both mean "no commits"; anything but a sequence is an error
    commits: Option<Vec<RawCommit>>,
    pusher: Option<RawOwner>,
    repository: Option<RawRepository>,
}

#[derive(Debug, Deserialize)]
struct RawCommit {
    stats: Option<LineStats>,
}

fn parse_push(payload: &[u8]) -> Result<PushEvent, ParseError> {
    let raw: RawPushPayload = serde_json::from_slice(payload)?;

    let commits = raw
        .commits
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.stats.unwrap_or_default())
        .collect();

    Ok(PushEvent {
        repo: repo_id(raw.repository),
        git_ref: raw.git_ref,
        pusher: raw.pusher.and_then(|p| p.login.or(p.name)),
        commits,
    })
}

// ============================================================================
// pull_request event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPullRequestPayload {
    #[serde(default)]
    action: String,
    // Kept untyped until we know the action is one we score
    pull_request: Option<serde_json::Value>,
    repository: Option<RawRepository>,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: u64,
    title: Option<String>,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
}

fn parse_pull_request(payload: &[u8]) -> Result<PullRequestEvent, ParseError> {
    let raw: RawPullRequestPayload = serde_json::from_slice(payload)?;
    let action = PrAction::parse(&raw.action);

    let pull_request = if action.is_analyzed() {
        let value = raw.pull_request.ok_or_else(|| ParseError::MissingField {
            event_type: "pull_request",
            action: raw.action.clone(),
            field: "pull_request",
        })?;
        let pr: RawPullRequest = serde_json::from_value(value)?;
        Some(PullRequestChanges {
            number: PrNumber(pr.number),
            title: pr.title,
            additions: pr.additions,
            deletions: pr.deletions,
        })
    } else {
        None
    };

    Ok(PullRequestEvent {
        repo: repo_id(raw.repository),
        action,
        pull_request,
    })
}

// ============================================================================
// workflow_run event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawWorkflowRunPayload {
    #[serde(default)]
    action: String,
    workflow_run: Option<serde_json::Value>,
    repository: Option<RawRepository>,
}

#[derive(Debug, Deserialize)]
struct RawWorkflowRun {
    name: Option<String>,
    conclusion: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_workflow_run(payload: &[u8]) -> Result<WorkflowRunEvent, ParseError> {
    let raw: RawWorkflowRunPayload = serde_json::from_slice(payload)?;
    let action = WorkflowRunAction::parse(&raw.action);

    let workflow_run = match action {
        WorkflowRunAction::Completed => {
            let value = raw.workflow_run.ok_or_else(|| ParseError::MissingField {
                event_type: "workflow_run",
                action: raw.action.clone(),
                field: "workflow_run",
            })?;
            let run: RawWorkflowRun = serde_json::from_value(value)?;
            Some(WorkflowRunTiming {
                name: run.name,
                conclusion: run.conclusion,
                created_at: run.created_at,
                updated_at: run.updated_at,
            })
        }
        WorkflowRunAction::Other(_) => None,
    };

    Ok(WorkflowRunEvent {
        repo: repo_id(raw.repository),
        action,
        workflow_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(event_type: &str, body: serde_json::Value) -> Result<GitHubEvent, ParseError> {
        parse_webhook(event_type, &serde_json::to_vec(&body).unwrap())
    }

    fn repository() -> serde_json::Value {
        json!({
            "full_name": "octocat/hello-world",
            "name": "hello-world",
            "owner": { "login": "octocat" }
        })
    }

    // ─── ping ───

    #[test]
    fn ping_extracts_zen() {
        let event = parse("ping", json!({ "zen": "Speak like a human.", "hook_id": 7 })).unwrap();

        let GitHubEvent::Ping(ping) = event else {
            panic!("expected ping, got {event:?}");
        };
        assert_eq!(ping.zen.as_deref(), Some("Speak like a human."));
        assert_eq!(ping.repo, None);
    }

    #[test]
    fn ping_with_invalid_json_is_an_error() {
        let result = parse_webhook("ping", b"{not json");
        assert!(matches!(result, Err(ParseError::JsonError(_))));
    }

    // ─── push ───

    #[test]
    fn push_collects_commit_stats() {
        let event = parse(
            "push",
            json!({
                "ref": "refs/heads/main",
                "pusher": { "name": "octocat" },
                "repository": repository(),
                "commits": [
                    { "id": "a", "stats": { "additions": 10, "deletions": 2 } },
                    { "id": "b" },
                    { "id": "c", "stats": { "additions": 5 } }
                ]
            }),
        )
        .unwrap();

        let GitHubEvent::Push(push) = event else {
            panic!("expected push, got {event:?}");
        };
        assert_eq!(push.git_ref.as_deref(), Some("refs/heads/main"));
        assert_eq!(push.pusher.as_deref(), Some("octocat"));
        assert_eq!(push.repo, Some(RepoId::new("octocat", "hello-world")));
        assert_eq!(
            push.commits,
            vec![
                LineStats::new(10, 2),
                LineStats::new(0, 0),
                LineStats::new(5, 0)
            ]
        );
    }

    #[test]
    fn push_without_commits_is_empty() {
        let GitHubEvent::Push(push) = parse("push", json!({})).unwrap() else {
            panic!("expected push");
        };
        assert!(push.commits.is_empty());

        let GitHubEvent::Push(push) = parse("push", json!({ "commits": null })).unwrap() else {
            panic!("expected push");
        };
        assert!(push.commits.is_empty());
    }

    #[test]
    fn push_with_non_sequence_commits_is_an_error() {
        let result = parse("push", json!({ "commits": "many" }));
        assert!(matches!(result, Err(ParseError::JsonError(_))));
    }

    #[test]
    fn repository_falls_back_to_full_name() {
        let GitHubEvent::Push(push) =
            parse("push", json!({ "repository": { "full_name": "acme/widgets" } })).unwrap()
        else {
            panic!("expected push");
        };
        assert_eq!(push.repo, Some(RepoId::new("acme", "widgets")));
    }

    // ─── pull_request ───

    #[test]
    fn pull_request_opened_extracts_changes() {
        let event = parse(
            "pull_request",
            json!({
                "action": "opened",
                "repository": repository(),
                "pull_request": {
                    "number": 42,
                    "title": "Add caching",
                    "additions": 600,
                    "deletions": 25
                }
            }),
        )
        .unwrap();

        let GitHubEvent::PullRequest(pr) = event else {
            panic!("expected pull_request, got {event:?}");
        };
        assert_eq!(pr.action, PrAction::Opened);
        let changes = pr.pull_request.unwrap();
        assert_eq!(changes.number, PrNumber(42));
        assert_eq!(changes.total_changes(), 625);
    }

    #[test]
    fn pull_request_other_action_ignores_malformed_pull_request() {
        let event = parse(
            "pull_request",
            json!({ "action": "closed", "pull_request": { "unexpected": true } }),
        )
        .unwrap();

        let GitHubEvent::PullRequest(pr) = event else {
            panic!("expected pull_request");
        };
        assert_eq!(pr.action, PrAction::Other("closed".to_string()));
        assert_eq!(pr.pull_request, None);
    }

    #[test]
    fn pull_request_synchronize_requires_pull_request_object() {
        let result = parse("pull_request", json!({ "action": "synchronize" }));
        assert!(matches!(
            result,
            Err(ParseError::MissingField {
                field: "pull_request",
                ..
            })
        ));
    }

    // ─── workflow_run ───

    #[test]
    fn workflow_run_completed_extracts_timing() {
        let event = parse(
            "workflow_run",
            json!({
                "action": "completed",
                "repository": repository(),
                "workflow_run": {
                    "name": "CI",
                    "conclusion": "success",
                    "created_at": "2025-01-15T12:00:00Z",
                    "updated_at": "2025-01-15T12:10:00Z"
                }
            }),
        )
        .unwrap();

        let GitHubEvent::WorkflowRun(run) = event else {
            panic!("expected workflow_run, got {event:?}");
        };
        assert_eq!(run.action, WorkflowRunAction::Completed);
        let timing = run.workflow_run.unwrap();
        assert_eq!(timing.name.as_deref(), Some("CI"));
        assert_eq!(timing.duration_minutes(), 10);
    }

    #[test]
    fn workflow_run_requested_needs_no_timing() {
        let GitHubEvent::WorkflowRun(run) =
            parse("workflow_run", json!({ "action": "requested" })).unwrap()
        else {
            panic!("expected workflow_run");
        };
        assert_eq!(run.workflow_run, None);
    }

    #[test]
    fn workflow_run_bad_timestamp_is_an_error() {
        let result = parse(
            "workflow_run",
            json!({
                "action": "completed",
                "workflow_run": { "created_at": "yesterday", "updated_at": "today" }
            }),
        );
        assert!(matches!(result, Err(ParseError::JsonError(_))));
    }

    // ─── unknown ───

    #[test]
    fn unknown_event_type_is_unhandled() {
        let event = parse_webhook("issues", b"{}").unwrap();
        assert_eq!(
            event,
            GitHubEvent::Unhandled {
                event_type: "issues".to_string()
            }
        );
    }
}
