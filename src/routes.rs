//! HTTP routes for the console.
//!
//! Two route families share one router: page routes render full HTML through
//! [`Templates`](crate::templates::Templates), and `/api` routes proxy JSON
//! requests from page scripts to the backend, translating [`ClientError`]
//! into meaningful status codes.

use crate::client::{
    AssociateSequenceRequest, ClientError, CreateIndexRequest, CreateSequenceRequest,
    CreateTableRequest, CreateViewRequest, DeleteRowRequest, InsertRowRequest, IsolationLevel,
    ModifyTableRequest, ModifyViewRequest, RenameViewRequest, ResetSequenceRequest,
    RestartSequenceRequest, SetSequenceRequest, UpdateRowRequest, ViewDeleteRequest,
    ViewInsertRequest, ViewKind, ViewUpdateRequest,
};
use crate::query::SelectForm;
use crate::server::ConsoleState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post, put},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

/// Column changes for a table, posted by the modify-schema form.
#[derive(Debug, Deserialize)]
struct ModifyColumnsBody {
    #[serde(default)]
    add_columns: Vec<crate::client::ColumnDef>,
    #[serde(default)]
    drop_columns: Vec<String>,
    #[serde(default)]
    modify_columns: Vec<crate::client::ColumnDef>,
}

#[derive(Debug, Deserialize)]
struct UpdateRowsBody {
    condition: Value,
    new_values: Value,
}

#[derive(Debug, Deserialize)]
struct DeleteRowsBody {
    condition: Value,
}

#[derive(Debug, Deserialize)]
struct DropViewParams {
    view_type: ViewKind,
}

#[derive(Debug, Deserialize)]
struct RenameViewBody {
    new_name: String,
}

#[derive(Debug, Deserialize)]
struct ModifyViewBody {
    select_query: String,
}

/// Optional filter/join parameters on a view page.
#[derive(Debug, Deserialize)]
struct ViewQueryParams {
    condition: Option<String>,
    join_table: Option<String>,
    join_condition: Option<String>,
}

/// Create the console router.
pub fn create_router(state: ConsoleState) -> Router {
    Router::new()
        // Page routes
        .route("/", get(tables_page))
        .route("/tables/:name", get(table_detail_page))
        .route("/query", get(query_page).post(query_submit))
        .route("/indexes-views", get(indexes_views_page))
        .route("/views/:name", get(view_detail_page))
        .route("/sequences", get(sequences_page))
        .route("/sequences/:name", get(sequence_detail_page))
        .route("/transactions", get(transactions_page))
        // Table API
        .route("/api/tables", post(api_create_table))
        .route(
            "/api/tables/:name",
            put(api_modify_table).delete(api_delete_table),
        )
        .route(
            "/api/tables/:name/rows",
            post(api_insert_row)
                .put(api_update_rows)
                .delete(api_delete_rows),
        )
        // Index API
        .route("/api/indexes", post(api_create_index))
        .route("/api/indexes/:name", delete(api_drop_index))
        // View API
        .route("/api/views", post(api_create_view))
        .route("/api/views/:name", delete(api_drop_view))
        .route("/api/views/:name/refresh", post(api_refresh_view))
        .route(
            "/api/views/:name/rows",
            post(api_view_insert)
                .put(api_view_update)
                .delete(api_view_delete),
        )
        .route("/api/views/:name/rename", put(api_rename_view))
        .route("/api/views/:name/definition", put(api_modify_view))
        // Sequence API
        .route("/api/sequences", post(api_create_sequence))
        .route("/api/sequences/reset", post(api_reset_sequence))
        .route("/api/sequences/:name", delete(api_drop_sequence))
        .route("/api/sequences/:name/next", get(api_sequence_next))
        .route("/api/sequences/:name/current", get(api_sequence_current))
        .route("/api/sequences/:name/value", put(api_sequence_set))
        .route("/api/sequences/:name/restart", put(api_sequence_restart))
        .route(
            "/api/sequences/:name/associate",
            post(api_associate_sequence),
        )
        // Transaction API
        .route("/api/transactions/:verb", post(api_transaction_verb))
        .with_state(state)
}

/// Map a client error to the status the browser should see.
fn client_error_status(err: &ClientError) -> StatusCode {
    match err {
        ClientError::ApiError(msg) => {
            if is_not_found(msg) {
                StatusCode::NOT_FOUND
            } else if msg.contains("409") || msg.to_lowercase().contains("already exists") {
                StatusCode::CONFLICT
            } else {
                StatusCode::BAD_REQUEST
            }
        }
        ClientError::Http(_) => StatusCode::BAD_GATEWAY,
        ClientError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn is_not_found(msg: &str) -> bool {
    msg.contains("404") || msg.to_lowercase().contains("not found") || msg.to_lowercase().contains("does not exist")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Log a failed backend call and render the shared error page.
fn backend_error_page(state: &ConsoleState, context: &str, err: &ClientError) -> Html<String> {
    tracing::warn!("{}: {}", context, err);
    Html(state.templates.error_page("Error", &format!("{}: {}", context, err)))
}

// ---------------------------------------------------------------------------
// Page handlers
// ---------------------------------------------------------------------------

async fn tables_page(State(state): State<ConsoleState>) -> impl IntoResponse {
    match state.client.list_tables().await {
        Ok(tables) => Html(state.templates.tables(&tables)),
        Err(e) => backend_error_page(&state, "Failed to load tables", &e),
    }
}

async fn table_detail_page(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let schema = match state.client.table_schema(&name).await {
        Ok(schema) => schema,
        Err(ClientError::ApiError(msg)) if is_not_found(&msg) => {
            let html = state
                .templates
                .error_page("Not Found", &format!("Table '{}' not found", name));
            return Html(html);
        }
        Err(e) => return backend_error_page(&state, "Failed to load table schema", &e),
    };

    match state.client.table_data(&name).await {
        Ok(rows) => Html(state.templates.table_detail(&name, &schema, &rows)),
        Err(e) => backend_error_page(&state, "Failed to load table rows", &e),
    }
}

async fn query_page(State(state): State<ConsoleState>) -> impl IntoResponse {
    match state.client.select_tables().await {
        Ok(tables) => Html(state.templates.query_editor(
            &tables,
            &SelectForm::default(),
            None,
            None,
        )),
        Err(e) => backend_error_page(&state, "Failed to load tables", &e),
    }
}

async fn query_submit(
    State(state): State<ConsoleState>,
    Form(form): Form<SelectForm>,
) -> impl IntoResponse {
    // Keep the form usable even when the listing fetch fails.
    let tables = state.client.select_tables().await.unwrap_or_default();

    if form.table.trim().is_empty() {
        return Html(state.templates.query_editor(
            &tables,
            &form,
            None,
            Some("Choose a table to query"),
        ));
    }

    let spec = form.build();
    match state.client.run_select(&spec).await {
        Ok(result) => Html(state.templates.query_editor(&tables, &form, Some(&result), None)),
        Err(e) => {
            tracing::warn!("Select against '{}' failed: {}", spec.table, e);
            Html(state.templates.query_editor(&tables, &form, None, Some(&e.to_string())))
        }
    }
}

async fn indexes_views_page(State(state): State<ConsoleState>) -> impl IntoResponse {
    let indexes = match state.client.list_indexes().await {
        Ok(indexes) => indexes,
        Err(e) => return backend_error_page(&state, "Failed to load indexes", &e),
    };

    match state.client.list_views().await {
        Ok(views) => Html(state.templates.indexes_views(&indexes, &views)),
        Err(e) => backend_error_page(&state, "Failed to load views", &e),
    }
}

async fn view_detail_page(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Query(params): Query<ViewQueryParams>,
) -> impl IntoResponse {
    let condition = non_empty(&params.condition);
    let join_table = non_empty(&params.join_table);
    let join_condition = non_empty(&params.join_condition);

    let rows = if let Some(join_table) = join_table {
        state
            .client
            .join_view_data(&name, join_table, join_condition.unwrap_or_default())
            .await
    } else if let Some(condition) = condition {
        state.client.filter_view_data(&name, condition).await
    } else {
        state.client.view_data(&name).await
    };

    match rows {
        Ok(rows) => Html(state.templates.view_detail(
            &name,
            &rows,
            condition,
            join_table,
            join_condition,
        )),
        Err(ClientError::ApiError(msg)) if is_not_found(&msg) => {
            let html = state
                .templates
                .error_page("Not Found", &format!("View '{}' not found", name));
            Html(html)
        }
        Err(e) => backend_error_page(&state, "Failed to load view", &e),
    }
}

async fn sequences_page(State(state): State<ConsoleState>) -> impl IntoResponse {
    match state.client.list_sequences().await {
        Ok(sequences) => Html(state.templates.sequences(&sequences)),
        Err(e) => backend_error_page(&state, "Failed to load sequences", &e),
    }
}

async fn sequence_detail_page(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.client.sequence_details(&name).await {
        Ok(details) => Html(state.templates.sequence_detail(&name, &details)),
        Err(ClientError::ApiError(msg)) if is_not_found(&msg) => {
            let html = state
                .templates
                .error_page("Not Found", &format!("Sequence '{}' not found", name));
            Html(html)
        }
        Err(e) => backend_error_page(&state, "Failed to load sequence", &e),
    }
}

async fn transactions_page(State(state): State<ConsoleState>) -> impl IntoResponse {
    Html(state.templates.transactions())
}

// ---------------------------------------------------------------------------
// Table API handlers
// ---------------------------------------------------------------------------

async fn api_create_table(
    State(state): State<ConsoleState>,
    Json(request): Json<CreateTableRequest>,
) -> Response {
    match state.client.create_table(&request).await {
        Ok(resp) => (StatusCode::CREATED, Json(resp)).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_delete_table(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
) -> Response {
    match state.client.delete_table(&name).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_modify_table(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(body): Json<ModifyColumnsBody>,
) -> Response {
    let request = ModifyTableRequest {
        table_name: name,
        add_columns: body.add_columns,
        drop_columns: body.drop_columns,
        modify_columns: body.modify_columns,
    };
    match state.client.modify_table(&request).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_insert_row(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(row_data): Json<Value>,
) -> Response {
    if !row_data.is_object() {
        return (StatusCode::BAD_REQUEST, "row values must be a JSON object".to_string())
            .into_response();
    }
    let request = InsertRowRequest {
        table_name: name,
        row_data,
    };
    match state.client.insert_row(&request).await {
        Ok(resp) => (StatusCode::CREATED, Json(resp)).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_update_rows(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(body): Json<UpdateRowsBody>,
) -> Response {
    let request = UpdateRowRequest {
        table_name: name,
        condition: body.condition,
        new_values: body.new_values,
    };
    match state.client.update_row(&request).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_delete_rows(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(body): Json<DeleteRowsBody>,
) -> Response {
    let request = DeleteRowRequest {
        table_name: name,
        condition: body.condition,
    };
    match state.client.delete_row(&request).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

// ---------------------------------------------------------------------------
// Index API handlers
// ---------------------------------------------------------------------------

async fn api_create_index(
    State(state): State<ConsoleState>,
    Json(request): Json<CreateIndexRequest>,
) -> Response {
    match state.client.create_index(&request).await {
        Ok(resp) => (StatusCode::CREATED, Json(resp)).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_drop_index(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
) -> Response {
    match state.client.drop_index(&name).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

// ---------------------------------------------------------------------------
// View API handlers
// ---------------------------------------------------------------------------

async fn api_create_view(
    State(state): State<ConsoleState>,
    Json(request): Json<CreateViewRequest>,
) -> Response {
    match state.client.create_view(&request).await {
        Ok(resp) => (StatusCode::CREATED, Json(resp)).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_drop_view(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Query(params): Query<DropViewParams>,
) -> Response {
    let request = crate::client::DropViewRequest {
        view_type: params.view_type,
        view_name: name,
    };
    match state.client.drop_view(&request).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_refresh_view(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
) -> Response {
    match state.client.refresh_view(&name).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_view_insert(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(request): Json<ViewInsertRequest>,
) -> Response {
    match state.client.insert_into_view(&name, &request).await {
        Ok(resp) => (StatusCode::CREATED, Json(resp)).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_view_update(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(request): Json<ViewUpdateRequest>,
) -> Response {
    match state.client.update_view(&name, &request).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_view_delete(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(request): Json<ViewDeleteRequest>,
) -> Response {
    match state.client.delete_from_view(&name, &request).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_rename_view(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(body): Json<RenameViewBody>,
) -> Response {
    let request = RenameViewRequest {
        old_name: name,
        new_name: body.new_name,
    };
    match state.client.rename_view(&request).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_modify_view(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(body): Json<ModifyViewBody>,
) -> Response {
    let request = ModifyViewRequest {
        view_name: name,
        select_query: body.select_query,
    };
    match state.client.modify_view(&request).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

// ---------------------------------------------------------------------------
// Sequence API handlers
// ---------------------------------------------------------------------------

async fn api_create_sequence(
    State(state): State<ConsoleState>,
    Json(request): Json<CreateSequenceRequest>,
) -> Response {
    match state.client.create_sequence(&request).await {
        Ok(resp) => (StatusCode::CREATED, Json(resp)).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_sequence_next(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
) -> Response {
    match state.client.next_value(&name).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_sequence_current(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
) -> Response {
    match state.client.current_value(&name).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_sequence_set(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(body): Json<SetSequenceRequest>,
) -> Response {
    match state.client.set_sequence_value(&name, body.value).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_sequence_restart(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(body): Json<RestartSequenceRequest>,
) -> Response {
    match state.client.restart_sequence(&name, body.start_with).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_drop_sequence(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
) -> Response {
    match state.client.drop_sequence(&name).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_associate_sequence(
    State(state): State<ConsoleState>,
    Path(name): Path<String>,
    Json(request): Json<AssociateSequenceRequest>,
) -> Response {
    match state.client.associate_sequence(&name, &request).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

async fn api_reset_sequence(
    State(state): State<ConsoleState>,
    Json(request): Json<ResetSequenceRequest>,
) -> Response {
    match state.client.reset_sequence_for_table(&request).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

// ---------------------------------------------------------------------------
// Transaction API handlers
// ---------------------------------------------------------------------------

fn body_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn missing_field(field: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        format!("missing field: {}", field),
    )
        .into_response()
}

/// Dispatch a transaction verb to the matching client call. Verbs that carry
/// a payload pull it out of the JSON body; an absent body acts like `{}`.
async fn api_transaction_verb(
    State(state): State<ConsoleState>,
    Path(verb): Path<String>,
    body: Option<Json<Value>>,
) -> Response {
    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);
    let client = &state.client;

    let result = match verb.as_str() {
        "begin" => client.begin_transaction().await,
        "commit" => client.commit_transaction().await,
        "rollback" => client.rollback_transaction().await,
        "end" => client.end_transaction().await,
        "abort" => client.abort_transaction().await,
        "export_snapshot" => client.export_snapshot().await,
        "advisory_unlock_all" => client.advisory_unlock_all().await,
        "savepoint" | "rollback_to_savepoint" | "release_savepoint" => {
            let Some(name) = body_str(&body, "savepoint_name") else {
                return missing_field("savepoint_name");
            };
            match verb.as_str() {
                "savepoint" => client.create_savepoint(name).await,
                "rollback_to_savepoint" => client.rollback_to_savepoint(name).await,
                _ => client.release_savepoint(name).await,
            }
        }
        "set_transaction_isolation" | "set_session_isolation" => {
            let Some(raw) = body_str(&body, "isolation_level") else {
                return missing_field("isolation_level");
            };
            let Ok(level) = raw.parse::<IsolationLevel>() else {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("unknown isolation level: {}", raw),
                )
                    .into_response();
            };
            if verb == "set_transaction_isolation" {
                client.set_transaction_isolation(level).await
            } else {
                client.set_session_isolation(level).await
            }
        }
        "lock_table" => {
            let Some(table) = body_str(&body, "table_name") else {
                return missing_field("table_name");
            };
            client.lock_table(table).await
        }
        "set_snapshot" => {
            let Some(snapshot_id) = body_str(&body, "snapshot_id") else {
                return missing_field("snapshot_id");
            };
            client.set_snapshot(snapshot_id).await
        }
        "prepare_transaction" | "commit_prepared" | "rollback_prepared" => {
            let Some(transaction_id) = body_str(&body, "transaction_id") else {
                return missing_field("transaction_id");
            };
            match verb.as_str() {
                "prepare_transaction" => client.prepare_transaction(transaction_id).await,
                "commit_prepared" => client.commit_prepared(transaction_id).await,
                _ => client.rollback_prepared(transaction_id).await,
            }
        }
        "listen" | "unlisten" => {
            let Some(channel) = body_str(&body, "channel_name") else {
                return missing_field("channel_name");
            };
            if verb == "listen" {
                client.listen_channel(channel).await
            } else {
                client.unlisten_channel(channel).await
            }
        }
        "notify" => {
            let Some(channel) = body_str(&body, "channel_name") else {
                return missing_field("channel_name");
            };
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default();
            client.notify_channel(channel, message).await
        }
        "advisory_lock" | "advisory_unlock" | "advisory_xact_lock" => {
            let Some(key) = body.get("key").and_then(Value::as_i64) else {
                return missing_field("key");
            };
            match verb.as_str() {
                "advisory_lock" => client.advisory_lock(key).await,
                "advisory_unlock" => client.advisory_unlock(key).await,
                _ => client.advisory_xact_lock(key).await,
            }
        }
        _ => {
            return (
                StatusCode::NOT_FOUND,
                format!("unknown transaction verb: {}", verb),
            )
                .into_response();
        }
    };

    match result {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => (client_error_status(&e), e.to_string()).into_response(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::ConsoleConfig;
    use serde_json::json;

    fn test_state() -> ConsoleState {
        ConsoleState::new(ConsoleConfig::default()).unwrap()
    }

    #[test]
    fn test_router_builds() {
        let _router = create_router(test_state());
    }

    #[test]
    fn test_client_error_status_mapping() {
        let not_found = ClientError::ApiError("Table 'users' not found".to_string());
        assert_eq!(client_error_status(&not_found), StatusCode::NOT_FOUND);

        let missing = ClientError::ApiError("relation \"users\" does not exist".to_string());
        assert_eq!(client_error_status(&missing), StatusCode::NOT_FOUND);

        let conflict = ClientError::ApiError("relation \"users\" already exists".to_string());
        assert_eq!(client_error_status(&conflict), StatusCode::CONFLICT);

        let bad = ClientError::ApiError("syntax error at or near \"FORM\"".to_string());
        assert_eq!(client_error_status(&bad), StatusCode::BAD_REQUEST);

        let parse = ClientError::Parse("bad payload".to_string());
        assert_eq!(
            client_error_status(&parse),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_modify_columns_body_defaults() {
        let body: ModifyColumnsBody = serde_json::from_value(json!({
            "add_columns": [{"column_name": "email", "column_type": "VARCHAR(255)"}]
        }))
        .unwrap();
        assert_eq!(body.add_columns.len(), 1);
        assert!(body.drop_columns.is_empty());
        assert!(body.modify_columns.is_empty());
    }

    #[test]
    fn test_drop_view_params_parse() {
        let params: DropViewParams =
            serde_urlencoded::from_str("view_type=materialized").unwrap();
        assert_eq!(params.view_type, ViewKind::Materialized);
    }

    #[test]
    fn test_view_query_params_parse() {
        let params: ViewQueryParams =
            serde_urlencoded::from_str("condition=age+%3E+30&join_table=&join_condition=")
                .unwrap();
        assert_eq!(non_empty(&params.condition), Some("age > 30"));
        assert_eq!(non_empty(&params.join_table), None);
        assert_eq!(non_empty(&params.join_condition), None);
    }

    #[test]
    fn test_body_str_rejects_blank() {
        let body = json!({"savepoint_name": "  ", "table_name": "users"});
        assert_eq!(body_str(&body, "savepoint_name"), None);
        assert_eq!(body_str(&body, "table_name"), Some("users"));
        assert_eq!(body_str(&body, "missing"), None);
    }
}
