//! Handler for `pull_request` webhook events.
//!
//! Only `opened` and `synchronize` are scored. The score comes from the
//! pull request's own `additions`/`deletions` totals, classified against
//! [`LineThresholds::PULL_REQUEST`]. This is separate from the energy
//! thresholds used for pushes.
//!
//! | Action | Result |
//! |--------|--------|
//! | `opened` | comment + `carbon-<score>` label |
//! | `synchronize` | comment + `carbon-<score>` label |
//! | anything else | ignore |

use crate::carbon::{LineThresholds, pull_request_comment, recommendations};
use crate::webhooks::action::ActionResult;
use crate::webhooks::events::PullRequestEvent;

/// Scores a pull request by its total changed lines.
pub fn handle_pull_request(event: &PullRequestEvent) -> ActionResult {
    let changes = match (&event.pull_request, event.action.is_analyzed()) {
        (Some(changes), true) => changes,
        _ => {
            return ActionResult::ignore(format!(
                "pull_request action '{}' is not analyzed",
                event.action.as_str()
            ));
        }
    };

    let total_changes = changes.total_changes();
    let carbon_score = LineThresholds::PULL_REQUEST.classify(total_changes);
    let comment = pull_request_comment(
        changes.additions,
        changes.deletions,
        carbon_score,
        &recommendations(carbon_score),
    );

    ActionResult::CommentAndLabel {
        pull_number: changes.number,
        label: carbon_score.label(),
        comment,
        total_changes,
        carbon_score,
    }
}
