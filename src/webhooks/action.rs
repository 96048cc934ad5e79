//! The decision produced by handling a webhook event.
//!
//! An [`ActionResult`] says what should happen next: post an issue, comment
//! and label a pull request, or just log. It is serialized into the HTTP
//! response body and converted to [`GitHubEffect`]s for execution.

use serde::Serialize;

use crate::carbon::{CarbonAnalysis, CarbonScore, serialize_rounded};
use crate::effects::GitHubEffect;
use crate::types::PrNumber;

/// Decision for a single webhook event.
///
/// Serialized with an `action` tag, e.g. `{"action": "pong", "zen": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionResult {
    /// Reply to a `ping`.
    Pong { zen: Option<String> },

    /// A push below the red threshold; nothing is posted.
    Log {
        analysis: CarbonAnalysis,
        repository: Option<String>,
        #[serde(rename = "ref")]
        git_ref: Option<String>,
    },

    /// A red push; an issue is opened on the repository.
    CreateIssue {
        title: String,
        body: String,
        labels: Vec<String>,
        analysis: CarbonAnalysis,
    },

    /// A scored pull request; a comment and a score label are added.
    CommentAndLabel {
        pull_number: PrNumber,
        label: String,
        comment: String,
        total_changes: u64,
        carbon_score: CarbonScore,
    },

    /// A completed workflow run.
    LogWorkflow {
        workflow_name: Option<String>,
        conclusion: Option<String>,
        /// Runtime in whole minutes.
        duration: i64,
        #[serde(serialize_with = "serialize_rounded")]
        energy_consumption: f64,
        #[serde(serialize_with = "serialize_rounded")]
        carbon_emission: f64,
    },

    /// Nothing to do for this event.
    Ignore { reason: String },
}

impl ActionResult {
    pub fn ignore(reason: impl Into<String>) -> Self {
        ActionResult::Ignore {
            reason: reason.into(),
        }
    }

    /// Returns the `action` tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ActionResult::Pong { .. } => "pong",
            ActionResult::Log { .. } => "log",
            ActionResult::CreateIssue { .. } => "create_issue",
            ActionResult::CommentAndLabel { .. } => "comment_and_label",
            ActionResult::LogWorkflow { .. } => "log_workflow",
            ActionResult::Ignore { .. } => "ignore",
        }
    }

    /// Returns the GitHub API calls this decision calls for, in execution order.
    pub fn effects(&self) -> Vec<GitHubEffect> {
        match self {
            ActionResult::CreateIssue {
                title,
                body,
                labels,
                ..
            } => vec![GitHubEffect::CreateIssue {
                title: title.clone(),
                body: body.clone(),
                labels: labels.clone(),
            }],
            ActionResult::CommentAndLabel {
                pull_number,
                label,
                comment,
                ..
            } => vec![
                GitHubEffect::PostComment {
                    pr: *pull_number,
                    body: comment.clone(),
                },
                GitHubEffect::AddLabels {
                    pr: *pull_number,
                    labels: vec![label.clone()],
                },
            ],
            ActionResult::Pong { .. }
            | ActionResult::Log { .. }
            | ActionResult::LogWorkflow { .. }
            | ActionResult::Ignore { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pong_serializes_with_action_tag() {
        let result = ActionResult::Pong {
            zen: Some("Half measures are as bad as nothing at all.".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "action": "pong", "zen": "Half measures are as bad as nothing at all." })
        );
    }

    #[test]
    fn log_workflow_rounds_at_serialization() {
        let result = ActionResult::LogWorkflow {
            workflow_name: Some("CI".to_string()),
            conclusion: None,
            duration: 10,
            energy_consumption: 10.0 * 0.01,
            carbon_emission: 10.0 * 0.01 * 0.4,
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["action"], "log_workflow");
        assert_eq!(json["duration"], 10);
        assert_eq!(json["energy_consumption"], 0.1);
        assert_eq!(json["carbon_emission"], 0.04);
    }

    #[test]
    fn comment_and_label_produces_comment_then_label() {
        let result = ActionResult::CommentAndLabel {
            pull_number: PrNumber(7),
            label: "carbon-red".to_string(),
            comment: "body".to_string(),
            total_changes: 600,
            carbon_score: CarbonScore::Red,
        };

        assert_eq!(
            result.effects(),
            vec![
                GitHubEffect::PostComment {
                    pr: PrNumber(7),
                    body: "body".to_string()
                },
                GitHubEffect::AddLabels {
                    pr: PrNumber(7),
                    labels: vec!["carbon-red".to_string()]
                },
            ]
        );
    }

    #[test]
    fn create_issue_produces_single_effect() {
        let result = ActionResult::CreateIssue {
            title: "t".to_string(),
            body: "b".to_string(),
            labels: vec!["high-impact".to_string()],
            analysis: crate::carbon::analyze_push(
                &[crate::carbon::LineStats::new(1500, 0)],
                &Default::default(),
            ),
        };

        assert_eq!(
            result.effects(),
            vec![GitHubEffect::CreateIssue {
                title: "t".to_string(),
                body: "b".to_string(),
                labels: vec!["high-impact".to_string()],
            }]
        );
    }

    #[test]
    fn ignore_has_no_effects() {
        let result = ActionResult::ignore("unhandled event type: issues");
        assert!(result.effects().is_empty());
        assert_eq!(result.kind(), "ignore");
    }
}
