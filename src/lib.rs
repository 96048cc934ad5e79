//! CarbonFlow - A GitHub App that estimates the carbon footprint of code changes.
//!
//! Webhook deliveries are verified, parsed into typed events and scored by
//! pure handlers. The resulting decisions are turned into GitHub API calls
//! (issues, comments, labels) by an effect interpreter.

pub mod carbon;
pub mod config;
pub mod effects;
pub mod github;
pub mod server;
pub mod types;
pub mod webhooks;

#[cfg(test)]
mod test_utils;
