//! Webhook endpoint handler.
//!
//! Accepts GitHub webhook deliveries, validates signatures, scores the event
//! and applies the resulting GitHub effects before answering. Every delivery
//! is handled to completion within its own request.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{AppState, SERVICE_NAME, VERSION};
use crate::effects::apply_effects;
use crate::github::{GitHubApiError, OctocrabClient};
use crate::types::DeliveryId;
use crate::webhooks::{
    ActionResult, GitHubEvent, ParseError, handle_event, parse_webhook, verify_signature,
};

/// Header name for GitHub event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header name for GitHub delivery ID.
const HEADER_DELIVERY: &str = "x-github-delivery";
/// Header name for GitHub signature.
const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing required header.
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    /// Absent or mismatched signature.
    #[error("invalid signature")]
    InvalidSignature,

    /// The payload could not be parsed for its event type.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A GitHub API call failed.
    #[error(transparent)]
    GitHub(#[from] GitHubApiError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            WebhookError::MissingHeader(_) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "Missing required header",
                    "message": self.to_string(),
                }),
            ),
            WebhookError::InvalidSignature => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "error": "Invalid signature" }),
            ),
            WebhookError::Parse(_) | WebhookError::GitHub(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "error": "Webhook processing failed",
                    "message": self.to_string(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Successful webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub event: String,
    pub delivery_id: Option<DeliveryId>,
    pub result: ActionResult,
    pub carbonflow: ServiceInfo,
}

/// Service metadata attached to every successful response.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub version: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

impl ServiceInfo {
    fn now() -> Self {
        ServiceInfo {
            version: VERSION,
            service: SERVICE_NAME,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Headers:
///   - `X-Hub-Signature-256`: HMAC-SHA256 signature of the payload (required)
///   - `X-GitHub-Event`: Event type, e.g. "push" (required)
///   - `X-GitHub-Delivery`: Delivery ID (optional, logged and echoed)
/// - Body: JSON webhook payload
///
/// # Response
///
/// - 200 OK: Decision envelope
/// - 400 Bad Request: Missing event header
/// - 401 Unauthorized: Invalid or missing signature
/// - 500 Internal Server Error: Malformed payload or failed GitHub call
///
/// # Example
///
/// ```ignore
/// POST /api/webhooks HTTP/1.1
/// X-GitHub-Event: pull_request
/// X-GitHub-Delivery: 550e8400-e29b-41d4-a716-446655440000
/// X-Hub-Signature-256: sha256=...
/// Content-Type: application/json
///
/// {"action": "opened", "pull_request": {...}, "repository": {...}}
///
/// HTTP/1.1 200 OK
///
/// {"success": true, "event": "pull_request", "result": {"action": "comment_and_label", ...}, ...}
/// ```
pub async fn webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, WebhookError> {
    let delivery_id = optional_header(&headers, HEADER_DELIVERY).map(DeliveryId::new);
    let delivery = delivery_id.as_ref().map_or("-", DeliveryId::as_str);

    // Verify signature BEFORE any parsing.
    let signature = optional_header(&headers, HEADER_SIGNATURE);
    if !verify_signature(signature, app_state.webhook_secret(), &body) {
        warn!(delivery_id = %delivery, "Invalid webhook signature");
        return Err(WebhookError::InvalidSignature);
    }

    let event_type = get_header(&headers, HEADER_EVENT)?;

    debug!(
        delivery_id = %delivery,
        event_type = %event_type,
        "Received webhook"
    );

    let event = parse_webhook(event_type, &body).map_err(|e| {
        warn!(
            delivery_id = %delivery,
            event_type = %event_type,
            error = %e,
            "Failed to parse webhook"
        );
        e
    })?;

    let result = handle_event(&event, app_state.thresholds());

    info!(
        delivery_id = %delivery,
        event_type = %event_type,
        action = result.kind(),
        carbon_score = carbon_score(&result),
        "Webhook handled"
    );

    execute_effects(&app_state, &event, &result).await?;

    Ok(Json(WebhookResponse {
        success: true,
        event: event.event_type().to_string(),
        delivery_id,
        result,
        carbonflow: ServiceInfo::now(),
    }))
}

/// Performs the GitHub calls a decision asks for.
///
/// Skipped (with a log line) when no token is configured or the payload does
/// not name a repository.
async fn execute_effects(
    app_state: &AppState,
    event: &GitHubEvent,
    result: &ActionResult,
) -> Result<(), GitHubApiError> {
    let effects = result.effects();
    if effects.is_empty() {
        return Ok(());
    }

    let (Some(github), Some(repo)) = (app_state.github(), event.repo_id()) else {
        info!(
            action = result.kind(),
            effects = effects.len(),
            "GitHub client or repository unavailable, skipping effects"
        );
        return Ok(());
    };

    let client = OctocrabClient::new(github.clone(), repo.clone());
    let responses = apply_effects(&client, effects).await.map_err(|e| {
        warn!(repo = %repo, error = %e, "GitHub effect failed");
        e
    })?;
    debug!(repo = %repo, responses = responses.len(), "Applied GitHub effects");
    Ok(())
}

/// Returns the score carried by a decision, for logging.
fn carbon_score(result: &ActionResult) -> Option<&'static str> {
    match result {
        ActionResult::Log { analysis, .. } | ActionResult::CreateIssue { analysis, .. } => {
            Some(analysis.carbon_score.as_str())
        }
        ActionResult::CommentAndLabel { carbon_score, .. } => Some(carbon_score.as_str()),
        _ => None,
    }
}

/// Extracts a required, non-empty header value.
fn get_header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, WebhookError> {
    optional_header(headers, name).ok_or(WebhookError::MissingHeader(name))
}

/// Extracts a header value if present, UTF-8 and non-empty.
fn optional_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
}
