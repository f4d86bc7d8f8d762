use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::net::TcpListener;
use url::Url;

use tether::BasecampService;
use tether::config::BasecampResolvedConfig;
use tether::error::TetherError;
use tether::providers::basecamp::NewTodo;

#[derive(Clone, Default)]
struct CaptureState {
    reqs: Arc<Mutex<Vec<Captured>>>,
}

#[derive(Debug, Clone)]
struct Captured {
    path: String,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Vec<u8>,
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

fn capture(state: &CaptureState, uri: &Uri, headers: HeaderMap, body: Vec<u8>) -> Captured {
    let query: HashMap<String, String> = uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let captured = Captured {
        path: uri.path().to_string(),
        query,
        headers,
        body,
    };
    state.reqs.lock().unwrap().push(captured.clone());
    captured
}

fn resolved_config(base: &Url) -> BasecampResolvedConfig {
    BasecampResolvedConfig {
        token_url: base.join("token").expect("token url"),
        authorization_url: base.join("authorization.json").expect("authorization url"),
        api_url: base.clone(),
        account_id: "99".to_string(),
        bot_key: "bot-key".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        refresh_token: "rt-0".to_string(),
        page_delay: Duration::ZERO,
        http_timeout: Duration::from_secs(5),
    }
}

async fn token_handler(State(state): State<CaptureState>, uri: Uri, headers: HeaderMap) -> Json<Value> {
    capture(&state, &uri, headers, Vec::new());
    Json(json!({
        "access_token": "test-access",
        "expires_in": 3600
    }))
}

fn api_requests(state: &CaptureState) -> Vec<Captured> {
    state
        .reqs
        .lock()
        .unwrap()
        .iter()
        .filter(|r| r.path != "/token")
        .cloned()
        .collect()
}

const TODOS_PATH: &str = "/99/buckets/7/todolists/3/todos.json";

/// Three pages of three todos each. Pages one and two carry a `Link`
/// header, page three does not.
async fn paged_todos_handler(State(state): State<CaptureState>, uri: Uri, headers: HeaderMap) -> Response {
    let captured = capture(&state, &uri, headers, Vec::new());
    let page: u32 = captured
        .query
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);

    let first_id = i64::from(page - 1) * 3 + 1;
    let items: Vec<Value> = (first_id..first_id + 3)
        .map(|id| json!({"id": id, "title": format!("todo {id}")}))
        .collect();

    if page < 3 {
        let link = format!("<{}?page={}>; rel=\"next\"", uri.path(), page + 1);
        ([(header::LINK, link)], Json(Value::Array(items))).into_response()
    } else {
        Json(Value::Array(items)).into_response()
    }
}

#[tokio::test]
async fn link_header_pagination_drains_all_pages_in_order() {
    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_handler))
        .route(TODOS_PATH, get(paged_todos_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let service = BasecampService::new(&resolved_config(&base)).expect("service");
    let todos = service.todos.all_in_list(7, 3).await.expect("todos");

    let ids: Vec<i64> = todos.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let reqs = api_requests(&state);
    assert_eq!(reqs.len(), 3);
    assert!(reqs[0].query.get("page").is_none());
    assert_eq!(reqs[1].query.get("page").map(String::as_str), Some("2"));
    assert_eq!(reqs[2].query.get("page").map(String::as_str), Some("3"));
    for req in &reqs {
        assert_eq!(
            req.headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer test-access")
        );
    }
}

#[tokio::test]
async fn single_page_listing_makes_one_request() {
    async fn one_page_handler(State(state): State<CaptureState>, uri: Uri, headers: HeaderMap) -> Json<Value> {
        capture(&state, &uri, headers, Vec::new());
        Json(json!([{"id": 1, "title": "only"}]))
    }

    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_handler))
        .route(TODOS_PATH, get(one_page_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let service = BasecampService::new(&resolved_config(&base)).expect("service");
    let todos = service.todos.all_in_list(7, 3).await.expect("todos");

    assert_eq!(todos.len(), 1);
    assert_eq!(api_requests(&state).len(), 1);
}

#[tokio::test]
async fn unauthorized_api_response_is_a_remote_error() {
    async fn denied_handler(State(state): State<CaptureState>, uri: Uri, headers: HeaderMap) -> Response {
        capture(&state, &uri, headers, Vec::new());
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "token revoked"})),
        )
            .into_response()
    }

    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_handler))
        .route(TODOS_PATH, get(denied_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let service = BasecampService::new(&resolved_config(&base)).expect("service");
    let err = service.todos.all_in_list(7, 3).await.err().expect("error");

    match err {
        TetherError::RemoteApi { status, body } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("token revoked"));
        }
        other => panic!("expected remote API error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_page_discards_the_whole_drain() {
    async fn broken_page_handler(State(state): State<CaptureState>, uri: Uri, headers: HeaderMap) -> Response {
        let captured = capture(&state, &uri, headers, Vec::new());
        if captured.query.get("page").is_none() {
            let link = format!("<{}?page=2>; rel=\"next\"", uri.path());
            ([(header::LINK, link)], Json(json!([{"id": 1}]))).into_response()
        } else {
            (StatusCode::OK, "{not json").into_response()
        }
    }

    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_handler))
        .route(TODOS_PATH, get(broken_page_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let service = BasecampService::new(&resolved_config(&base)).expect("service");
    let err = service.todos.all_in_list(7, 3).await.err().expect("error");

    assert!(matches!(err, TetherError::Decode(_)));
    assert_eq!(api_requests(&state).len(), 2);
}

#[tokio::test]
async fn create_todo_posts_the_payload() {
    async fn create_handler(
        State(state): State<CaptureState>,
        uri: Uri,
        headers: HeaderMap,
        body: axum::body::Bytes,
    ) -> (StatusCode, Json<Value>) {
        capture(&state, &uri, headers, body.to_vec());
        (
            StatusCode::CREATED,
            Json(json!({"id": 42, "content": "Pay invoice", "title": "Pay invoice"})),
        )
    }

    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_handler))
        .route(TODOS_PATH, post(create_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let service = BasecampService::new(&resolved_config(&base)).expect("service");
    let created = service
        .todos
        .create(7, 3, &NewTodo::titled("Pay invoice"))
        .await
        .expect("created todo");

    assert_eq!(created.id, 42);

    let reqs = api_requests(&state);
    assert_eq!(reqs.len(), 1);
    let sent: Value = serde_json::from_slice(&reqs[0].body).expect("request body json");
    assert_eq!(sent, json!({"content": "Pay invoice"}));
}

#[tokio::test]
async fn complete_todo_hits_the_completion_endpoint() {
    async fn completion_handler(State(state): State<CaptureState>, uri: Uri, headers: HeaderMap) -> StatusCode {
        capture(&state, &uri, headers, Vec::new());
        StatusCode::NO_CONTENT
    }

    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_handler))
        .route("/99/buckets/7/todos/42/completion.json", post(completion_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let service = BasecampService::new(&resolved_config(&base)).expect("service");
    service.todos.complete(7, 42).await.expect("completion");

    let reqs = api_requests(&state);
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].path, "/99/buckets/7/todos/42/completion.json");
}

#[tokio::test]
async fn bot_campfire_line_posts_under_the_integration_key() {
    async fn lines_handler(
        State(state): State<CaptureState>,
        uri: Uri,
        headers: HeaderMap,
        body: axum::body::Bytes,
    ) -> (StatusCode, Json<Value>) {
        capture(&state, &uri, headers, body.to_vec());
        (StatusCode::CREATED, Json(json!({"id": 1})))
    }

    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_handler))
        .route(
            "/99/integrations/bot-key/buckets/7/chats/5/lines.json",
            post(lines_handler),
        )
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let service = BasecampService::new(&resolved_config(&base)).expect("service");
    service
        .campfires
        .bot_create_line(7, 5, "build finished")
        .await
        .expect("bot line");

    let reqs = api_requests(&state);
    assert_eq!(reqs.len(), 1);
    assert_eq!(
        reqs[0].path,
        "/99/integrations/bot-key/buckets/7/chats/5/lines.json"
    );
    let sent: Value = serde_json::from_slice(&reqs[0].body).expect("request body json");
    assert_eq!(sent, json!({"content": "build finished"}));
}

#[tokio::test]
async fn bot_reply_posts_to_the_callback_without_a_bearer() {
    async fn callback_handler(
        State(state): State<CaptureState>,
        uri: Uri,
        headers: HeaderMap,
        body: axum::body::Bytes,
    ) -> StatusCode {
        capture(&state, &uri, headers, body.to_vec());
        StatusCode::OK
    }

    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_handler))
        .route("/callback", post(callback_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let service = BasecampService::new(&resolved_config(&base)).expect("service");
    let callback = base.join("callback").expect("callback url");
    service
        .campfires
        .bot_reply(callback, "on my way")
        .await
        .expect("bot reply");

    let reqs = api_requests(&state);
    assert_eq!(reqs.len(), 1);
    assert!(reqs[0].headers.get(header::AUTHORIZATION).is_none());
    let sent: Value = serde_json::from_slice(&reqs[0].body).expect("request body json");
    assert_eq!(sent, json!({"content": "on my way"}));
}

#[tokio::test]
async fn recordings_listing_carries_the_type_filter() {
    async fn recordings_handler(State(state): State<CaptureState>, uri: Uri, headers: HeaderMap) -> Json<Value> {
        capture(&state, &uri, headers, Vec::new());
        Json(json!([{"id": 5, "type": "Todo", "status": "active"}]))
    }

    let state = CaptureState::default();
    let app = Router::new()
        .route("/token", post(token_handler))
        .route("/99/projects/recordings.json", get(recordings_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let service = BasecampService::new(&resolved_config(&base)).expect("service");
    let recordings = service
        .recordings
        .all_of_type("Todo")
        .await
        .expect("recordings");

    assert_eq!(recordings.len(), 1);
    assert_eq!(recordings[0].kind, "Todo");

    let reqs = api_requests(&state);
    assert_eq!(reqs[0].query.get("type").map(String::as_str), Some("Todo"));
}
