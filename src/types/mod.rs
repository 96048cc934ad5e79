//! Core identifier types shared across the application.

pub mod ids;

pub use ids::{CommentId, DeliveryId, IssueNumber, PrNumber, RepoId};
