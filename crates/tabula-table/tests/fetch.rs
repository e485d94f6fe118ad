use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};
use tabula_query::{Offset, QueryPayload, SortSpec};
use tabula_table::*;

async fn list_branches(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let page = body["offset"]["page"].as_u64().unwrap_or(0);
    let count = body["offset"]["count"].as_u64().unwrap_or(0);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer secret");
    Json(json!({
        "count": 237,
        "data": [{ "page": page, "count": count, "authorized": authorized }]
    }))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn garbage() -> &'static str {
    "not json"
}

async fn start_backend() -> String {
    let app = Router::new()
        .route("/api/branches/list", post(list_branches))
        .route("/api/broken/list", post(broken))
        .route("/api/garbage/list", post(garbage));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn payload(page: usize) -> QueryPayload {
    QueryPayload {
        offset: Offset { count: 50, page },
        sorts: SortSpec::new(),
        filter: serde_json::Map::new(),
        period: None,
    }
}

async fn fetch(
    fetcher: HttpFetcher,
    endpoint: &'static str,
    payload: QueryPayload,
) -> Result<tabula_query::ListResponse, FetchError> {
    tokio::task::spawn_blocking(move || fetcher.fetch(endpoint, &payload))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn posts_payload_and_parses_response() {
    let base = start_backend().await;
    let fetcher = HttpFetcher::new(&base, Duration::from_secs(5)).with_token("secret");

    let response = fetch(fetcher, "/branches/list", payload(3)).await.unwrap();

    assert_eq!(response.count, 237);
    assert_eq!(
        response.data,
        vec![json!({ "page": 3, "count": 50, "authorized": true })]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_is_reported_with_status() {
    let base = start_backend().await;
    let fetcher = HttpFetcher::new(&base, Duration::from_secs(5));

    let err = fetch(fetcher, "/broken/list", payload(1)).await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR)
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_is_a_decode_error() {
    let base = start_backend().await;
    let fetcher = HttpFetcher::new(&base, Duration::from_secs(5));

    let err = fetch(fetcher, "/garbage/list", payload(1)).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_backend_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpFetcher::new(&format!("http://{addr}"), Duration::from_secs(2));
    let err = fetch(fetcher, "/branches/list", payload(1)).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn controller_and_fetcher_round_trip() {
    let base = start_backend().await;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let table = TableController::new(
        entity_config("branch").unwrap(),
        ChannelEmitter::new(tx),
    )
    .unwrap();

    table.set_page_size(50).unwrap();
    let query = rx.recv().await.unwrap();
    let endpoint = table.endpoint();
    let fetcher = HttpFetcher::new(&base, Duration::from_secs(5));
    let response = tokio::task::spawn_blocking(move || fetcher.fetch(&endpoint, &query))
        .await
        .unwrap()
        .unwrap();
    table.apply_response(&response).unwrap();

    let view = table.view();
    assert_eq!(view.total_count, Some(237));
    assert_eq!(view.total_pages, Some(5));
    assert_eq!(view.window.len(), 5);
}
