//! Health check endpoint for liveness checks.
//!
//! Served on both `GET /health` and `GET /api/webhooks`, so the webhook URL
//! configured in the GitHub App can be checked directly.

use axum::response::Json;
use chrono::Utc;
use serde::Serialize;

use super::{SERVICE_NAME, VERSION};

/// Body of a health response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Health check handler.
///
/// # Example
///
/// ```ignore
/// GET /health HTTP/1.1
///
/// HTTP/1.1 200 OK
/// Content-Type: application/json
///
/// {
///   "status": "healthy",
///   "service": "carbonflow",
///   "version": "0.1.0",
///   "timestamp": "2025-06-01T09:00:00+00:00"
/// }
/// ```
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: SERVICE_NAME,
        version: VERSION,
        timestamp: Utc::now().to_rfc3339(),
    })
}
