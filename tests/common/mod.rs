#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vaultclient::ClientConfig;

/// In-process stand-in for the blob storage and verification/account
/// collaborators. Tracks call counts so tests can assert exactly which
/// network calls happened.
pub struct MockBackend {
    pub kyc_status: Mutex<String>,
    pub rejection_reason: Mutex<Option<String>>,
    /// Milliseconds to stall the status endpoint, for racing polls.
    pub status_delay_ms: Mutex<u64>,
    pub status_calls: AtomicUsize,

    pub upload_calls: AtomicUsize,
    /// Fail this many upcoming uploads with HTTP 500.
    pub fail_uploads: Mutex<usize>,

    pub submit_calls: AtomicUsize,
    pub fail_submit: Mutex<bool>,
    pub last_submission: Mutex<Option<Value>>,
    pub last_auth: Mutex<Option<String>>,

    pub tier_status: Mutex<Option<String>>,
    pub tier_level: Mutex<u8>,
    pub tier_status_calls: AtomicUsize,
    pub upgrade_calls: AtomicUsize,
    pub fail_upgrade: Mutex<bool>,
    pub last_upgrade: Mutex<Option<Value>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            kyc_status: Mutex::new("not_submitted".to_string()),
            rejection_reason: Mutex::new(None),
            status_delay_ms: Mutex::new(0),
            status_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
            fail_uploads: Mutex::new(0),
            submit_calls: AtomicUsize::new(0),
            fail_submit: Mutex::new(false),
            last_submission: Mutex::new(None),
            last_auth: Mutex::new(None),
            tier_status: Mutex::new(None),
            tier_level: Mutex::new(1),
            tier_status_calls: AtomicUsize::new(0),
            upgrade_calls: AtomicUsize::new(0),
            fail_upgrade: Mutex::new(false),
            last_upgrade: Mutex::new(None),
        })
    }

    pub fn set_kyc_status(&self, status: &str) {
        *self.kyc_status.lock().unwrap() = status.to_string();
    }

    pub fn set_rejection_reason(&self, reason: &str) {
        *self.rejection_reason.lock().unwrap() = Some(reason.to_string());
    }

    pub fn fail_next_uploads(&self, count: usize) {
        *self.fail_uploads.lock().unwrap() = count;
    }

    pub fn set_fail_submit(&self, fail: bool) {
        *self.fail_submit.lock().unwrap() = fail;
    }

    pub fn set_tier(&self, level: u8, request_status: Option<&str>) {
        *self.tier_level.lock().unwrap() = level;
        *self.tier_status.lock().unwrap() = request_status.map(str::to_string);
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn upgrade_calls(&self) -> usize {
        self.upgrade_calls.load(Ordering::SeqCst)
    }
}

async fn kyc_status(
    State(state): State<Arc<MockBackend>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.status_calls.fetch_add(1, Ordering::SeqCst);
    record_auth(&state, &headers);

    // Snapshot at request arrival; the delay only stalls the response in
    // transit, like a slow network would.
    let status = state.kyc_status.lock().unwrap().clone();
    let reason = state.rejection_reason.lock().unwrap().clone();

    let delay = *state.status_delay_ms.lock().unwrap();
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    (
        StatusCode::OK,
        Json(json!({ "status": status, "rejection_reason": reason })),
    )
}

async fn kyc_upload(
    State(state): State<Arc<MockBackend>>,
    _body: Bytes,
) -> (StatusCode, Json<Value>) {
    let n = state.upload_calls.fetch_add(1, Ordering::SeqCst) + 1;

    let mut failures = state.fail_uploads.lock().unwrap();
    if *failures > 0 {
        *failures -= 1;
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "File upload failed." })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({ "url": format!("https://blob.test/{}", n) })),
    )
}

async fn kyc_submit(
    State(state): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.submit_calls.fetch_add(1, Ordering::SeqCst);
    record_auth(&state, &headers);

    if *state.fail_submit.lock().unwrap() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Failed to submit KYC details." })),
        );
    }

    *state.last_submission.lock().unwrap() = Some(body);
    state.set_kyc_status("pending");
    (
        StatusCode::OK,
        Json(json!({ "message": "KYC details submitted successfully." })),
    )
}

async fn tier_status(
    State(state): State<Arc<MockBackend>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.tier_status_calls.fetch_add(1, Ordering::SeqCst);
    record_auth(&state, &headers);

    let status = state.tier_status.lock().unwrap().clone();
    let level = *state.tier_level.lock().unwrap();
    (
        StatusCode::OK,
        Json(json!({ "status": status, "tierLevel": level })),
    )
}

async fn tier_upgrade(
    State(state): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.upgrade_calls.fetch_add(1, Ordering::SeqCst);
    record_auth(&state, &headers);

    if *state.fail_upgrade.lock().unwrap() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "An error occurred while requesting an upgrade." })),
        );
    }

    *state.last_upgrade.lock().unwrap() = Some(body);
    *state.tier_status.lock().unwrap() = Some("pending".to_string());
    (StatusCode::OK, Json(json!({ "message": "Upgrade request submitted." })))
}

fn record_auth(state: &MockBackend, headers: &HeaderMap) {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    *state.last_auth.lock().unwrap() = auth;
}

/// Serve the mock collaborators on an ephemeral port and return the base URL.
pub async fn spawn_backend(state: Arc<MockBackend>) -> String {
    let app = Router::new()
        .route("/api/kyc/status", get(kyc_status))
        .route("/api/kyc/upload", post(kyc_upload))
        .route("/api/kyc/submit", post(kyc_submit))
        .route("/api/users/tier-upgrade/status", get(tier_status))
        .route("/api/users/tier-upgrade", post(tier_upgrade))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });

    format!("http://{}", addr)
}

/// Client configuration pointing every collaborator at the mock server.
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        api_url: base_url.to_string(),
        blob_url: base_url.to_string(),
        ..ClientConfig::default()
    }
}
