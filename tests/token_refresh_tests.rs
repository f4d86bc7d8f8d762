use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    routing::post,
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::net::TcpListener;
use url::Url;

use tether::config::BasecampResolvedConfig;
use tether::error::AuthError;
use tether::providers::basecamp::TokenManager;

#[derive(Clone, Default)]
struct CaptureState {
    reqs: Arc<Mutex<Vec<Captured>>>,
}

#[derive(Debug, Clone)]
struct Captured {
    query: HashMap<String, String>,
    #[allow(dead_code)]
    headers: HeaderMap,
}

async fn spawn_test_server(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let base = Url::parse(&format!("http://{addr}")).expect("valid base url");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    base
}

fn capture(state: &CaptureState, uri: &Uri, headers: HeaderMap) -> usize {
    let query: HashMap<String, String> = uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let mut reqs = state.reqs.lock().unwrap();
    reqs.push(Captured { query, headers });
    reqs.len()
}

fn resolved_config(base: &Url, refresh_token: &str) -> BasecampResolvedConfig {
    BasecampResolvedConfig {
        token_url: base.join("token").expect("token url"),
        authorization_url: base.join("authorization.json").expect("authorization url"),
        api_url: base.clone(),
        account_id: "99".to_string(),
        bot_key: "bot-key".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        refresh_token: refresh_token.to_string(),
        page_delay: Duration::ZERO,
        http_timeout: Duration::from_secs(5),
    }
}

async fn token_ok_handler(
    State(state): State<CaptureState>,
    uri: Uri,
    headers: HeaderMap,
) -> Json<Value> {
    capture(&state, &uri, headers);
    Json(json!({
        "access_token": "access-1",
        "expires_in": 3600
    }))
}

#[tokio::test]
async fn refresh_sends_required_query_parameters() {
    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_ok_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let manager = TokenManager::new(&resolved_config(&base, "rt-0"), reqwest::Client::new())
        .expect("manager");
    let bearer = manager.bearer().await.expect("bearer");
    assert_eq!(bearer, "access-1");

    let reqs = state.reqs.lock().unwrap();
    assert_eq!(reqs.len(), 1);
    let query = &reqs[0].query;
    assert_eq!(query.get("type").map(String::as_str), Some("refresh"));
    assert_eq!(query.get("client_id").map(String::as_str), Some("client-id"));
    assert_eq!(
        query.get("client_secret").map(String::as_str),
        Some("client-secret")
    );
    assert_eq!(query.get("refresh_token").map(String::as_str), Some("rt-0"));
}

#[tokio::test]
async fn concurrent_callers_share_one_refresh() {
    async fn slow_token_handler(
        State(state): State<CaptureState>,
        uri: Uri,
        headers: HeaderMap,
    ) -> Json<Value> {
        let n = capture(&state, &uri, headers);
        tokio::time::sleep(Duration::from_millis(100)).await;
        Json(json!({
            "access_token": format!("access-{n}"),
            "expires_in": 3600
        }))
    }

    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(slow_token_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let manager = Arc::new(
        TokenManager::new(&resolved_config(&base, "rt-0"), reqwest::Client::new())
            .expect("manager"),
    );

    let mut handles = Vec::new();
    for _ in 0..8 {
        let manager = Arc::clone(&manager);
        handles.push(tokio::spawn(async move { manager.bearer().await }));
    }

    let mut bearers = Vec::new();
    for handle in handles {
        bearers.push(handle.await.expect("join").expect("bearer"));
    }

    assert_eq!(state.reqs.lock().unwrap().len(), 1);
    assert!(bearers.iter().all(|b| b == "access-1"));
}

#[tokio::test]
async fn missing_refresh_token_fails_at_construction() {
    let base = Url::parse("http://127.0.0.1:1/").expect("url");
    let err = TokenManager::new(&resolved_config(&base, ""), reqwest::Client::new())
        .err()
        .expect("constructor error");
    assert!(matches!(err, AuthError::MissingRefreshToken));
}

#[tokio::test]
async fn token_endpoint_error_surfaces_status_and_body() {
    async fn token_denied_handler(
        State(state): State<CaptureState>,
        uri: Uri,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        capture(&state, &uri, headers);
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant"})),
        )
    }

    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_denied_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let manager = TokenManager::new(&resolved_config(&base, "rt-0"), reqwest::Client::new())
        .expect("manager");
    let err = manager.bearer().await.err().expect("refresh error");

    match err {
        AuthError::Status { status, body } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn valid_token_is_reused_across_calls() {
    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_ok_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let manager = TokenManager::new(&resolved_config(&base, "rt-0"), reqwest::Client::new())
        .expect("manager");
    let first = manager.bearer().await.expect("first bearer");
    let second = manager.bearer().await.expect("second bearer");

    assert_eq!(first, second);
    assert_eq!(state.reqs.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn expired_token_reexchanges_with_the_rotated_refresh_token() {
    // First response expires within the validity skew and rotates the
    // refresh token; the second call must exchange again with the new one.
    async fn rotating_token_handler(
        State(state): State<CaptureState>,
        uri: Uri,
        headers: HeaderMap,
    ) -> Json<Value> {
        let n = capture(&state, &uri, headers);
        if n == 1 {
            Json(json!({
                "access_token": "short-lived",
                "refresh_token": "rt-rotated",
                "expires_in": 5
            }))
        } else {
            Json(json!({
                "access_token": "long-lived",
                "expires_in": 3600
            }))
        }
    }

    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(rotating_token_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let manager = TokenManager::new(&resolved_config(&base, "rt-initial"), reqwest::Client::new())
        .expect("manager");
    let first = manager.bearer().await.expect("first bearer");
    let second = manager.bearer().await.expect("second bearer");

    assert_eq!(first, "short-lived");
    assert_eq!(second, "long-lived");

    let reqs = state.reqs.lock().unwrap();
    assert_eq!(reqs.len(), 2);
    assert_eq!(
        reqs[0].query.get("refresh_token").map(String::as_str),
        Some("rt-initial")
    );
    assert_eq!(
        reqs[1].query.get("refresh_token").map(String::as_str),
        Some("rt-rotated")
    );
}
