//! Webhook handling for GitHub events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Event parsing into typed [`GitHubEvent`]s
//! - Pure per-event handlers producing an [`ActionResult`]

pub mod action;
pub mod events;
pub mod handlers;
pub mod parser;
pub mod signature;

pub use action::ActionResult;
pub use events::GitHubEvent;
pub use handlers::{dispatch, handle_event};
pub use parser::{ParseError, parse_webhook};
pub use signature::{compute_signature, format_signature_header, verify_signature};
