//! Shared test utilities: proptest generators and a mock GitHub API server.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use octocrab::Octocrab;
use proptest::prelude::*;
use serde_json::json;

use crate::carbon::{EnergyThresholds, LineStats};
use crate::github::OctocrabClient;
use crate::types::{PrNumber, RepoId};

pub fn arb_pr_number() -> impl Strategy<Value = PrNumber> {
    (1u64..100_000).prop_map(PrNumber)
}

pub fn arb_repo_id() -> impl Strategy<Value = RepoId> {
    ("[a-z][a-z0-9-]{0,15}", "[a-z][a-z0-9._-]{0,20}").prop_map(|(o, r)| RepoId::new(o, r))
}

pub fn arb_line_stats() -> impl Strategy<Value = LineStats> {
    (0u64..5_000, 0u64..5_000).prop_map(|(a, d)| LineStats::new(a, d))
}

pub fn arb_commits() -> impl Strategy<Value = Vec<LineStats>> {
    prop::collection::vec(arb_line_stats(), 0..20)
}

/// Thresholds with `yellow <= red`, as configuration guarantees.
pub fn arb_energy_thresholds() -> impl Strategy<Value = EnergyThresholds> {
    (0.0f64..5.0, 0.0f64..5.0).prop_map(|(yellow, gap)| EnergyThresholds::new(yellow, yellow + gap))
}

/// Event names the app does not score.
pub fn arb_unhandled_event_type() -> impl Strategy<Value = String> {
    "[a-z_]{1,30}".prop_filter("scored event type", |s| {
        !matches!(s.as_str(), "ping" | "push" | "pull_request" | "workflow_run")
    })
}

// ─── Mock GitHub API ─────────────────────────────────────────────────────────

/// A request received by [`MockGitHub`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: serde_json::Value,
}

/// In-process stand-in for the GitHub REST API.
///
/// Answers the issue, comment and label endpoints with minimal valid payloads
/// (issue #42, comment 1001) and records every request. A failing mock
/// answers everything with `status` and a GitHub error body.
pub struct MockGitHub {
    base_uri: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    failure: Option<StatusCode>,
}

impl MockGitHub {
    /// Starts a mock that accepts every supported call.
    pub async fn start() -> Self {
        Self::spawn(None).await
    }

    /// Starts a mock that rejects every call with `status`.
    pub async fn failing(status: StatusCode) -> Self {
        Self::spawn(Some(status)).await
    }

    async fn spawn(failure: Option<StatusCode>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: Arc::clone(&requests),
            failure,
        };
        let app = axum::Router::new().fallback(mock_api).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockGitHub {
            base_uri: format!("http://{addr}"),
            requests,
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// An octocrab instance pointed at this mock.
    pub fn octocrab(&self) -> Octocrab {
        OctocrabClient::build_octocrab("test-token", Some(self.base_uri())).unwrap()
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn mock_api(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        body: body.clone(),
    });

    if let Some(status) = state.failure {
        return (
            status,
            Json(json!({
                "message": "Validation Failed",
                "documentation_url": "https://docs.github.com/rest"
            })),
        );
    }

    if path.ends_with("/comments") {
        (StatusCode::CREATED, Json(comment_json(&body)))
    } else if path.ends_with("/labels") {
        (StatusCode::OK, Json(labels_json(&body)))
    } else if path.ends_with("/issues") {
        (StatusCode::CREATED, Json(issue_json(&body)))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" })))
    }
}

fn author_json() -> serde_json::Value {
    let user = "https://api.github.com/users/carbonflow";
    json!({
        "login": "carbonflow[bot]",
        "id": 1,
        "node_id": "MDM6Qm90MQ==",
        "avatar_url": "https://avatars.githubusercontent.com/u/1",
        "gravatar_id": "",
        "url": user,
        "html_url": "https://github.com/apps/carbonflow",
        "followers_url": format!("{user}/followers"),
        "following_url": format!("{user}/following"),
        "gists_url": format!("{user}/gists"),
        "starred_url": format!("{user}/starred"),
        "subscriptions_url": format!("{user}/subscriptions"),
        "organizations_url": format!("{user}/orgs"),
        "repos_url": format!("{user}/repos"),
        "events_url": format!("{user}/events"),
        "received_events_url": format!("{user}/received_events"),
        "type": "Bot",
        "site_admin": false
    })
}

fn issue_json(request: &serde_json::Value) -> serde_json::Value {
    let issue = "https://api.github.com/repos/octocat/hello-world/issues/42";
    let labels: Vec<serde_json::Value> = request_labels(request)
        .iter()
        .map(|name| label_json(name))
        .collect();
    json!({
        "id": 4200,
        "node_id": "I_42",
        "url": issue,
        "repository_url": "https://api.github.com/repos/octocat/hello-world",
        "labels_url": format!("{issue}/labels"),
        "comments_url": format!("{issue}/comments"),
        "events_url": format!("{issue}/events"),
        "html_url": "https://github.com/octocat/hello-world/issues/42",
        "number": 42,
        "state": "open",
        "title": request["title"],
        "body": request["body"],
        "user": author_json(),
        "labels": labels,
        "assignees": [],
        "author_association": "NONE",
        "locked": false,
        "comments": 0,
        "created_at": "2025-06-01T09:00:00Z",
        "updated_at": "2025-06-01T09:00:00Z"
    })
}

fn comment_json(request: &serde_json::Value) -> serde_json::Value {
    json!({
        "id": 1001,
        "node_id": "IC_1001",
        "url": "https://api.github.com/repos/octocat/hello-world/issues/comments/1001",
        "html_url": "https://github.com/octocat/hello-world/pull/17#issuecomment-1001",
        "body": request["body"],
        "author_association": "NONE",
        "user": author_json(),
        "created_at": "2025-06-01T09:00:00Z"
    })
}

fn labels_json(request: &serde_json::Value) -> serde_json::Value {
    request_labels(request)
        .iter()
        .map(|name| label_json(name))
        .collect()
}

fn label_json(name: &str) -> serde_json::Value {
    json!({
        "id": 7,
        "node_id": "LA_7",
        "url": format!("https://api.github.com/repos/octocat/hello-world/labels/{name}"),
        "name": name,
        "color": "2ea44f",
        "default": false
    })
}

fn request_labels(request: &serde_json::Value) -> Vec<String> {
    request["labels"]
        .as_array()
        .map(|labels| {
            labels
                .iter()
                .filter_map(|l| l.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
