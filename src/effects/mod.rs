//! Effects-as-data for GitHub operations.
//!
//! Handlers never call GitHub directly. They return an
//! [`ActionResult`](crate::webhooks::ActionResult), which is converted to
//! [`GitHubEffect`]s and executed by a [`GitHubInterpreter`]. This keeps event
//! handling pure and lets tests run without network access.

pub mod github;
pub mod interpreter;

pub use github::{GitHubEffect, GitHubResponse};
pub use interpreter::{GitHubInterpreter, apply_effects};
