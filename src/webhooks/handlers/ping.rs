//! Handler for `ping` webhook events.

use crate::webhooks::action::ActionResult;
use crate::webhooks::events::PingEvent;

/// Answers a ping with its zen koan.
pub fn handle_ping(event: &PingEvent) -> ActionResult {
    ActionResult::Pong {
        zen: event.zen.clone(),
    }
}
