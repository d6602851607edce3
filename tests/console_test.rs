//! End-to-end tests for the console against a mock administration API.
//!
//! Each test spins up a throwaway backend on a loopback port, points the
//! console at it, and drives the console router with `tower::ServiceExt`.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pgdeck::{create_router, ConsoleConfig, ConsoleState};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Mock backend
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockBackend {
    tables: Mutex<Vec<String>>,
    listing_fetches: AtomicUsize,
    last_select: Mutex<Option<Value>>,
    last_insert: Mutex<Option<Value>>,
}

async fn mock_tables(State(mock): State<Arc<MockBackend>>) -> Json<Value> {
    mock.listing_fetches.fetch_add(1, Ordering::SeqCst);
    let tables = mock.tables.lock().unwrap().clone();
    Json(json!({ "tables": tables }))
}

async fn mock_create_table(
    State(mock): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> Response {
    let name = body["table_name"].as_str().unwrap_or_default().to_string();
    if name == "boom" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "relation \"boom\" already exists" })),
        )
            .into_response();
    }
    mock.tables.lock().unwrap().push(name.clone());
    Json(json!({ "message": format!("Table '{}' created successfully", name) })).into_response()
}

async fn mock_table_schema(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("table_name").map(String::as_str) == Some("ghost") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Table 'ghost' not found" })),
        )
            .into_response();
    }
    Json(json!({
        "schema": [
            { "column_name": "id", "column_type": "integer" },
            { "column_name": "name", "column_type": "character varying" }
        ]
    }))
    .into_response()
}

async fn mock_table_data() -> Json<Value> {
    Json(json!({ "data": [{ "id": 1, "name": "John" }] }))
}

async fn mock_insert_row(
    State(mock): State<Arc<MockBackend>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let table = body["table_name"].as_str().unwrap_or_default().to_string();
    *mock.last_insert.lock().unwrap() = Some(body);
    Json(json!({ "message": format!("Row inserted into '{}'", table) }))
}

async fn mock_select_tables() -> Json<Value> {
    Json(json!(["users", "orders"]))
}

async fn mock_select(State(mock): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Json<Value> {
    *mock.last_select.lock().unwrap() = Some(body);
    Json(json!({
        "data": [{ "id": 1, "age": 42 }],
        "query": "SELECT * FROM users WHERE age > '30'"
    }))
}

async fn mock_index_list() -> Json<Value> {
    Json(json!([{
        "indexname": "idx_users_email",
        "tablename": "users",
        "indexdef": "CREATE INDEX idx_users_email ON users USING btree (email)"
    }]))
}

async fn mock_view_list() -> Json<Value> {
    Json(json!([{
        "schemaname": "public",
        "viewname": "active_users",
        "definition": "SELECT id, name FROM users WHERE active"
    }]))
}

async fn mock_view_rows(Path(name): Path<String>) -> Json<Value> {
    Json(json!([{ "id": 1, "name": "Ann", "view": name }]))
}

async fn mock_view_filter(
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let condition = params.get("condition").cloned().unwrap_or_default();
    Json(json!([{ "id": 2, "source": format!("filter:{}:{}", name, condition) }]))
}

async fn mock_sequence_list() -> Json<Value> {
    Json(json!({ "sequences": ["order_id_seq"] }))
}

async fn mock_sequence_next() -> Json<Value> {
    Json(json!({ "next_value": 7 }))
}

async fn mock_txn_begin() -> Json<Value> {
    Json(json!({ "message": "Transaction started" }))
}

async fn mock_txn_savepoint(Json(body): Json<Value>) -> Json<Value> {
    let name = body["savepoint_name"].as_str().unwrap_or_default();
    Json(json!({ "message": format!("Savepoint '{}' created", name) }))
}

async fn spawn_backend() -> (String, Arc<MockBackend>) {
    let mock = Arc::new(MockBackend {
        tables: Mutex::new(vec!["users".to_string(), "orders".to_string()]),
        ..Default::default()
    });

    let router = Router::new()
        .route("/table/tables", get(mock_tables))
        .route("/table/create_table", post(mock_create_table))
        .route("/table/get_table_schema", get(mock_table_schema))
        .route("/table/get_table_data", get(mock_table_data))
        .route("/table/insert_row", post(mock_insert_row))
        .route("/select/tablesview", get(mock_select_tables))
        .route("/select/select", post(mock_select))
        .route("/indexview/index/list", get(mock_index_list))
        .route("/indexview/views", get(mock_view_list))
        .route("/indexview/views/:name", get(mock_view_rows))
        .route("/indexview/views/:name/filter", get(mock_view_filter))
        .route("/sequences/list", get(mock_sequence_list))
        .route("/sequences/:name/next", get(mock_sequence_next))
        .route("/transactions/begin", post(mock_txn_begin))
        .route("/transactions/savepoint", post(mock_txn_savepoint))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), mock)
}

fn console_app(api_url: &str) -> Router {
    let config = ConsoleConfig {
        api_url: api_url.to_string(),
        ..Default::default()
    };
    let state = ConsoleState::new(config).unwrap();
    create_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(app: Router, uri: &str, body: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_tables_page_lists_backend_tables() {
    let (api_url, _mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, html) = get_page(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("users"));
    assert!(html.contains("/tables/orders"));
    assert!(html.contains("Create Table"));
}

#[tokio::test]
async fn test_listing_cached_then_refetched_after_create() {
    let (api_url, mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, _) = get_page(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.listing_fetches.load(Ordering::SeqCst), 1);

    // Within the TTL the second page load is served from the cache.
    let (_, html) = get_page(app.clone(), "/").await;
    assert!(!html.contains("widgets"));
    assert_eq!(mock.listing_fetches.load(Ordering::SeqCst), 1);

    let (status, _) = send_json(
        app.clone(),
        "POST",
        "/api/tables",
        json!({ "table_name": "widgets" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // The mutation invalidates the cache, so the next load re-fetches.
    let (_, html) = get_page(app, "/").await;
    assert!(html.contains("widgets"));
    assert_eq!(mock.listing_fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_backend_detail_surfaces_with_conflict_status() {
    let (api_url, _mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, body) =
        send_json(app, "POST", "/api/tables", json!({ "table_name": "boom" })).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, "API error: relation \"boom\" already exists");
}

#[tokio::test]
async fn test_table_detail_page_renders_schema_and_rows() {
    let (api_url, _mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, html) = get_page(app, "/tables/users").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("character varying"));
    assert!(html.contains("John"));
    assert!(html.contains("DROP TABLE users;"));
}

#[tokio::test]
async fn test_insert_row_forwards_payload_to_backend() {
    let (api_url, mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, body) = send_json(
        app,
        "POST",
        "/api/tables/users/rows",
        json!({ "name": "John", "age": 30 }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["message"], "Row inserted into 'users'");

    let sent = mock.last_insert.lock().unwrap().clone().unwrap();
    assert_eq!(
        sent,
        json!({ "table_name": "users", "row_data": { "name": "John", "age": 30 } })
    );
}

#[tokio::test]
async fn test_insert_row_rejects_non_object_payload() {
    let (api_url, mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, body) =
        send_json(app, "POST", "/api/tables/users/rows", json!(["not", "a", "row"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("JSON object"));
    assert!(mock.last_insert.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_missing_table_shows_not_found_page() {
    let (api_url, _mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, html) = get_page(app, "/tables/ghost").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Not Found"));
    assert!(html.contains("ghost"));
}

#[tokio::test]
async fn test_query_builder_posts_wire_encoding() {
    let (api_url, mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, html) = post_form(
        app,
        "/query",
        "table=users&where_column=age&where_operator=%3E&where_value=30&limit=10",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("SELECT * FROM users WHERE age &gt; &#39;30&#39;"));
    assert!(html.contains("42"));

    let sent = mock.last_select.lock().unwrap().clone().unwrap();
    assert_eq!(sent["table"], "users");
    assert_eq!(sent["where"]["age"], json!([">", "30"]));
    assert_eq!(sent["limit"], 10);
    assert_eq!(sent["columns"], Value::Null);
    assert_eq!(sent["distinct"], false);
}

#[tokio::test]
async fn test_query_builder_equality_sends_bare_value() {
    let (api_url, mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, _) = post_form(
        app,
        "/query",
        "table=users&where_column=name&where_operator=%3D&where_value=John",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = mock.last_select.lock().unwrap().clone().unwrap();
    assert_eq!(sent["where"]["name"], json!("John"));
}

#[tokio::test]
async fn test_query_without_filters_selects_all_rows() {
    let (api_url, mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, html) = post_form(app, "/query", "table=users").await;

    assert_eq!(status, StatusCode::OK);
    // Headers come from the keys of the first result row.
    assert!(html.contains("<th>age</th>"));
    assert!(html.contains("<th>id</th>"));
    assert!(html.contains("42"));

    let sent = mock.last_select.lock().unwrap().clone().unwrap();
    assert_eq!(sent["table"], "users");
    assert_eq!(sent["columns"], Value::Null);
    assert_eq!(sent["where"], Value::Null);
    assert_eq!(sent["limit"], Value::Null);
    assert_eq!(sent["group_by"], Value::Null);
    assert_eq!(sent["distinct"], false);
}

#[tokio::test]
async fn test_query_page_requires_table() {
    let (api_url, mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, html) = post_form(app, "/query", "where_column=age").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Choose a table to query"));
    assert!(mock.last_select.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_indexes_views_page_renders_both_lists() {
    let (api_url, _mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, html) = get_page(app, "/indexes-views").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("idx_users_email"));
    assert!(html.contains("/views/active_users"));
}

#[tokio::test]
async fn test_view_page_passes_filter_condition() {
    let (api_url, _mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, html) = get_page(app, "/views/active_users?condition=age%20%3E%2030").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("filter:active_users:age &gt; 30"));
}

#[tokio::test]
async fn test_view_page_without_params_loads_all_rows() {
    let (api_url, _mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, html) = get_page(app, "/views/active_users").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Ann"));
}

#[tokio::test]
async fn test_sequences_page_and_next_value_proxy() {
    let (api_url, _mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, html) = get_page(app.clone(), "/sequences").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("order_id_seq"));

    let (status, body) = get_page(app, "/api/sequences/order_id_seq/next").await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["next_value"], 7);
}

#[tokio::test]
async fn test_transaction_verb_dispatch() {
    let (api_url, _mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, body) = send_json(app.clone(), "POST", "/api/transactions/begin", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["message"], "Transaction started");

    let (status, body) =
        send_json(app.clone(), "POST", "/api/transactions/savepoint", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("savepoint_name"));

    let (status, body) = send_json(
        app.clone(),
        "POST",
        "/api/transactions/savepoint",
        json!({ "savepoint_name": "sp1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("sp1"));

    let (status, body) =
        send_json(app, "POST", "/api/transactions/teleport", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("unknown transaction verb"));
}

#[tokio::test]
async fn test_transactions_page_is_static() {
    let (api_url, _mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, html) = get_page(app, "/transactions").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("BEGIN"));
    assert!(html.contains("SERIALIZABLE"));
    assert!(html.contains("COMMIT PREPARED"));
}

#[tokio::test]
async fn test_unknown_page_returns_404() {
    let (api_url, _mock) = spawn_backend().await;
    let app = console_app(&api_url);

    let (status, _) = get_page(app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unreachable_backend_renders_error_page() {
    // Nothing listens on this port.
    let app = console_app("http://127.0.0.1:9");

    let (status, html) = get_page(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Failed to load tables"));
}
