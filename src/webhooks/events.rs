//! GitHub webhook event types.
//!
//! Typed representations of the webhook events the app scores. Each variant
//! carries only the fields needed to reach a decision, plus some display
//! context for the comments and issues posted back.
//!
//! # Event Types
//!
//! - `ping` - Sent when the App's webhook is first configured
//! - `push` - Commits pushed to a branch (scored by estimated energy)
//! - `pull_request` - PR opened or synchronized (scored by changed lines)
//! - `workflow_run` - CI run completed (scored by runtime)
//!
//! Every other event type is [`GitHubEvent::Unhandled`].

use chrono::{DateTime, Utc};

use crate::carbon::LineStats;
use crate::types::{PrNumber, RepoId};

/// A parsed GitHub webhook event.
#[derive(Debug, Clone, PartialEq)]
pub enum GitHubEvent {
    /// Webhook configuration handshake.
    Ping(PingEvent),

    /// Commits pushed to a ref.
    Push(PushEvent),

    /// Pull request lifecycle event.
    PullRequest(PullRequestEvent),

    /// GitHub Actions workflow run lifecycle event.
    WorkflowRun(WorkflowRunEvent),

    /// Any event type the app does not score. Never an error.
    Unhandled { event_type: String },
}

impl GitHubEvent {
    /// Returns the repository this event belongs to, if the payload named one.
    pub fn repo_id(&self) -> Option<&RepoId> {
        match self {
            GitHubEvent::Ping(e) => e.repo.as_ref(),
            GitHubEvent::Push(e) => e.repo.as_ref(),
            GitHubEvent::PullRequest(e) => e.repo.as_ref(),
            GitHubEvent::WorkflowRun(e) => e.repo.as_ref(),
            GitHubEvent::Unhandled { .. } => None,
        }
    }

    /// Returns the `X-GitHub-Event` name for this event.
    pub fn event_type(&self) -> &str {
        match self {
            GitHubEvent::Ping(_) => "ping",
            GitHubEvent::Push(_) => "push",
            GitHubEvent::PullRequest(_) => "pull_request",
            GitHubEvent::WorkflowRun(_) => "workflow_run",
            GitHubEvent::Unhandled { event_type } => event_type,
        }
    }
}

/// A `ping` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingEvent {
    pub repo: Option<RepoId>,

    /// Random GitHub zen koan included in every ping.
    pub zen: Option<String>,
}

/// A `push` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEvent {
    pub repo: Option<RepoId>,

    /// The full ref that was pushed (e.g. `refs/heads/main`).
    pub git_ref: Option<String>,

    /// Login or name of whoever pushed.
    pub pusher: Option<String>,

    /// Per-commit line counts. Commits without stats count as zero lines.
    pub commits: Vec<LineStats>,
}

/// Action performed on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrAction {
    /// PR was opened.
    Opened,
    /// PR head was updated (new commits pushed).
    Synchronize,
    /// Any other action (closed, labeled, edited, ...).
    Other(String),
}

impl PrAction {
    pub fn parse(action: &str) -> Self {
        match action {
            "opened" => PrAction::Opened,
            "synchronize" => PrAction::Synchronize,
            other => PrAction::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PrAction::Opened => "opened",
            PrAction::Synchronize => "synchronize",
            PrAction::Other(action) => action,
        }
    }

    /// Whether this action triggers a carbon analysis.
    pub fn is_analyzed(&self) -> bool {
        matches!(self, PrAction::Opened | PrAction::Synchronize)
    }
}

/// Line counts reported on the pull request object itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestChanges {
    pub number: PrNumber,
    pub title: Option<String>,
    pub additions: u64,
    pub deletions: u64,
}

impl PullRequestChanges {
    /// Total changed lines, saturating at `u64::MAX`.
    pub fn total_changes(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

/// A `pull_request` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub repo: Option<RepoId>,

    pub action: PrAction,

    /// The pull request's change counts.
    ///
    /// Always present when `action.is_analyzed()`; other actions are not
    /// required to carry a well-formed pull request object.
    pub pull_request: Option<PullRequestChanges>,
}

/// Action performed on a workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WorkflowRunAction {
    Completed,
    Other(String),
}

impl WorkflowRunAction {
    pub fn parse(action: &str) -> Self {
        match action {
            "completed" => WorkflowRunAction::Completed,
            other => WorkflowRunAction::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WorkflowRunAction::Completed => "completed",
            WorkflowRunAction::Other(action) => action,
        }
    }
}

/// Timing of a workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRunTiming {
    pub name: Option<String>,

    /// success, failure, cancelled, ... (only meaningful once completed).
    pub conclusion: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl WorkflowRunTiming {
    /// Wall-clock runtime in whole minutes, rounded to nearest.
    ///
    /// A run whose `updated_at` precedes `created_at` counts as zero minutes.
    pub fn duration_minutes(&self) -> i64 {
        let millis = (self.updated_at - self.created_at).num_milliseconds().max(0);
        (millis as f64 / 60_000.0).round() as i64
    }
}

/// A `workflow_run` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRunEvent {
    pub repo: Option<RepoId>,

    pub action: WorkflowRunAction,

    /// Present whenever `action` is `Completed`.
    pub workflow_run: Option<WorkflowRunTiming>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timing(start_secs: i64, end_secs: i64) -> WorkflowRunTiming {
        WorkflowRunTiming {
            name: None,
            conclusion: None,
            created_at: Utc.timestamp_opt(start_secs, 0).unwrap(),
            updated_at: Utc.timestamp_opt(end_secs, 0).unwrap(),
        }
    }

    #[test]
    fn duration_rounds_to_nearest_minute() {
        assert_eq!(timing(0, 600).duration_minutes(), 10);
        assert_eq!(timing(0, 629).duration_minutes(), 10);
        assert_eq!(timing(0, 630).duration_minutes(), 11);
        assert_eq!(timing(0, 29).duration_minutes(), 0);
    }

    #[test]
    fn reversed_timestamps_count_as_zero_minutes() {
        assert_eq!(timing(630, 600).duration_minutes(), 0);
        assert_eq!(timing(6000, 0).duration_minutes(), 0);
    }

    #[test]
    fn pr_action_parse_roundtrip() {
        for action in ["opened", "synchronize", "closed", "labeled"] {
            assert_eq!(PrAction::parse(action).as_str(), action);
        }
        assert!(PrAction::parse("opened").is_analyzed());
        assert!(PrAction::parse("synchronize").is_analyzed());
        assert!(!PrAction::parse("closed").is_analyzed());
    }

    #[test]
    fn event_type_names() {
        let unhandled = GitHubEvent::Unhandled {
            event_type: "issues".to_string(),
        };
        assert_eq!(unhandled.event_type(), "issues");
        assert_eq!(unhandled.repo_id(), None);
    }
}
