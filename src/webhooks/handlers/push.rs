//! Handler for `push` webhook events.
//!
//! Every commit's line counts feed one energy estimate for the whole push.
//! A push over the red threshold opens an issue; anything else is logged.

use crate::carbon::{CarbonScore, EnergyThresholds, PushContext, analyze_push, push_issue_body};
use crate::webhooks::action::ActionResult;
use crate::webhooks::events::PushEvent;

/// Labels applied to issues opened for red pushes.
pub const HIGH_IMPACT_LABELS: [&str; 3] = ["carbon-impact", "high-impact", "sustainability"];

/// Scores a push against the configured energy thresholds.
pub fn handle_push(event: &PushEvent, thresholds: &EnergyThresholds) -> ActionResult {
    let analysis = analyze_push(&event.commits, thresholds);
    let repository = event.repo.as_ref().map(|r| r.to_string());

    if analysis.carbon_score != CarbonScore::Red {
        return ActionResult::Log {
            analysis,
            repository,
            git_ref: event.git_ref.clone(),
        };
    }

    let context = PushContext {
        repository: repository.as_deref(),
        git_ref: event.git_ref.as_deref(),
        pusher: event.pusher.as_deref(),
        commit_count: event.commits.len(),
    };
    let body = push_issue_body(&analysis, &context);

    let title = match event.git_ref.as_deref().and_then(branch_name) {
        Some(branch) => format!("🔴 High carbon impact push to {branch}"),
        None => "🔴 High carbon impact push detected".to_string(),
    };

    ActionResult::CreateIssue {
        title,
        body,
        labels: HIGH_IMPACT_LABELS.iter().map(|s| s.to_string()).collect(),
        analysis,
    }
}

/// Returns the branch name of a `refs/heads/...` ref.
fn branch_name(git_ref: &str) -> Option<&str> {
    git_ref.strip_prefix("refs/heads/")
}
