//! HTTP server for the CarbonFlow GitHub App.
//!
//! This module implements the HTTP server that:
//! - Accepts webhooks from GitHub, validates signatures, and scores them synchronously
//! - Applies the resulting GitHub effects when a token is configured
//! - Provides health checks for liveness monitoring
//!
//! # Endpoints
//!
//! - `POST /api/webhooks` - Accepts GitHub webhook deliveries (returns 200 with the decision)
//! - `GET /api/webhooks` - Health payload
//! - `GET /health` - Health payload
//!
//! Any other method on `/api/webhooks` gets a 405 JSON error.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use octocrab::Octocrab;

use crate::carbon::EnergyThresholds;
use crate::config::Config;
use crate::github::OctocrabClient;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::webhook_handler;

/// Service name reported in health and webhook responses.
pub const SERVICE_NAME: &str = "carbonflow";

/// Crate version reported in health and webhook responses.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Webhook secret for HMAC-SHA256 signature verification.
    webhook_secret: Vec<u8>,

    /// Energy thresholds for push scoring.
    thresholds: EnergyThresholds,

    /// Authenticated client. `None` means effects are logged and skipped.
    github: Option<Octocrab>,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `webhook_secret` - Secret for verifying webhook signatures
    /// * `thresholds` - Energy thresholds for push scoring
    /// * `github` - Authenticated octocrab instance, if GitHub calls are enabled
    pub fn new(
        webhook_secret: impl Into<Vec<u8>>,
        thresholds: EnergyThresholds,
        github: Option<Octocrab>,
    ) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                webhook_secret: webhook_secret.into(),
                thresholds,
                github,
            }),
        }
    }

    /// Builds state from loaded configuration, authenticating octocrab when a
    /// token is present.
    pub fn from_config(config: &Config) -> Result<Self, octocrab::Error> {
        let github = config
            .github_token
            .as_ref()
            .map(|token| {
                OctocrabClient::build_octocrab(token.clone(), config.github_api_url.as_deref())
            })
            .transpose()?;
        Ok(AppState::new(
            config.webhook_secret.clone(),
            config.thresholds,
            github,
        ))
    }

    /// Returns the webhook secret.
    pub fn webhook_secret(&self) -> &[u8] {
        &self.inner.webhook_secret
    }

    /// Returns the push energy thresholds.
    pub fn thresholds(&self) -> &EnergyThresholds {
        &self.inner.thresholds
    }

    /// Returns the GitHub client, if configured.
    pub fn github(&self) -> Option<&Octocrab> {
        self.inner.github.as_ref()
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::get;

    axum::Router::new()
        .route(
            "/api/webhooks",
            get(health_handler)
                .post(webhook_handler)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health_handler))
        .with_state(app_state)
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Method not allowed" })),
    )
}
