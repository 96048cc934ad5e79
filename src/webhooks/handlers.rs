//! Event handlers for GitHub webhook events.
//!
//! Handlers are pure functions: they take a parsed event and return an
//! [`ActionResult`] describing what should happen, without performing any
//! I/O. The server turns that decision into GitHub API calls.
//!
//! # Event Types
//!
//! | Event | Handler |
//! |-------|---------|
//! | `ping` | `handle_ping` - echoes the zen koan |
//! | `push` | `handle_push` - energy estimate; opens an issue when red |
//! | `pull_request` | `handle_pull_request` - line-count score; comment + label |
//! | `workflow_run` | `handle_workflow_run` - runtime-based energy estimate |

mod ping;
mod pull_request;
mod push;
mod workflow_run;

use crate::carbon::EnergyThresholds;

use super::action::ActionResult;
use super::events::GitHubEvent;
use super::parser::{ParseError, parse_webhook};

pub use ping::handle_ping;
pub use pull_request::handle_pull_request;
pub use push::{HIGH_IMPACT_LABELS, handle_push};
pub use workflow_run::handle_workflow_run;

/// Handles a parsed GitHub webhook event.
///
/// `thresholds` applies to the push path only; pull requests are scored
/// against their own fixed line-count breakpoints.
pub fn handle_event(event: &GitHubEvent, thresholds: &EnergyThresholds) -> ActionResult {
    match event {
        GitHubEvent::Ping(e) => handle_ping(e),
        GitHubEvent::Push(e) => handle_push(e, thresholds),
        GitHubEvent::PullRequest(e) => handle_pull_request(e),
        GitHubEvent::WorkflowRun(e) => handle_workflow_run(e),
        GitHubEvent::Unhandled { event_type } => {
            ActionResult::ignore(format!("unhandled event type: {event_type}"))
        }
    }
}

/// Parses and handles a raw webhook delivery in one step.
///
/// Unknown event types resolve to [`ActionResult::Ignore`]; only a malformed
/// payload for a scored event type is an error.
///
/// # Examples
///
/// ```
/// use carbonflow::carbon::EnergyThresholds;
/// use carbonflow::webhooks::{dispatch, ActionResult};
///
/// let result = dispatch("issues", b"{}", &EnergyThresholds::default()).unwrap();
/// assert!(matches!(result, ActionResult::Ignore { .. }));
/// ```
pub fn dispatch(
    event_type: &str,
    payload: &[u8],
    thresholds: &EnergyThresholds,
) -> Result<ActionResult, ParseError> {
    let event = parse_webhook(event_type, payload)?;
    Ok(handle_event(&event, thresholds))
}
