//! HTTP client for the database administration API.
//!
//! Every page and proxy handler goes through [`BackendClient`]: a thin typed
//! wrapper over the backend's resource groups (tables, select, indexes and
//! views, sequences, transactions). Failures come back as [`ClientError`]
//! with the backend's `detail` message extracted when the response carries
//! one, so call sites can show the error string directly.
//!
//! The client keeps a short-lived cache of the table listing; every table
//! DDL mutation invalidates it so the next page load re-fetches from the
//! backend.

use crate::query::QuerySpec;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub struct BackendClientConfig {
    /// Base URL of the administration API.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// TTL for the table-listing cache in milliseconds.
    pub cache_ttl_ms: u64,
}

impl Default for BackendClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 10_000,
            cache_ttl_ms: 2_000,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from backend API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// The backend reports failures as `{"detail": "..."}` with a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

// ---------------------------------------------------------------------------
// Listing cache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CachedValue<T> {
    value: T,
    fetched_at: Instant,
}

#[derive(Debug, Default)]
struct ListingCache {
    tables: RwLock<Option<CachedValue<Vec<String>>>>,
}

impl ListingCache {
    fn tables(&self, ttl: Duration) -> Option<Vec<String>> {
        let guard = self.tables.read();
        guard
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < ttl)
            .map(|cached| cached.value.clone())
    }

    fn store_tables(&self, tables: &[String]) {
        *self.tables.write() = Some(CachedValue {
            value: tables.to_vec(),
            fetched_at: Instant::now(),
        });
    }

    fn invalidate(&self) {
        *self.tables.write() = None;
    }
}

// ---------------------------------------------------------------------------
// Shared response types
// ---------------------------------------------------------------------------

/// Generic success message returned by every mutation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableDataResponse {
    pub data: Vec<Value>,
}

/// One column in a table schema, both as reported and as requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    pub column_name: String,
    pub column_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSchemaResponse {
    pub schema: Vec<ColumnDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTableRequest {
    pub table_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyTableRequest {
    pub table_name: String,
    #[serde(default)]
    pub add_columns: Vec<ColumnDef>,
    #[serde(default)]
    pub drop_columns: Vec<String>,
    #[serde(default)]
    pub modify_columns: Vec<ColumnDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertRowRequest {
    pub table_name: String,
    pub row_data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRowRequest {
    pub table_name: String,
    pub condition: Value,
    pub new_values: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRowRequest {
    pub table_name: String,
    pub condition: Value,
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

/// Result of a select query: the rows plus the SQL the backend executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectResponse {
    pub data: Vec<Value>,
    pub query: String,
}

// ---------------------------------------------------------------------------
// Indexes and views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIndexRequest {
    pub index_name: String,
    pub table_name: String,
    pub column_name: String,
    /// Index method, e.g. `btree`, `hash`, `gin`, `gist`, `spgist`, `brin`.
    /// Validated by the backend, not here.
    pub index_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropIndexRequest {
    pub index_name: String,
}

/// One row of the index listing. Field names follow `pg_indexes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexInfo {
    pub indexname: String,
    pub tablename: String,
    pub indexdef: String,
}

/// View flavor understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Simple,
    Materialized,
    Updatable,
    Recursive,
}

impl ViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Simple => "simple",
            ViewKind::Materialized => "materialized",
            ViewKind::Updatable => "updatable",
            ViewKind::Recursive => "recursive",
        }
    }

    pub fn is_materialized(&self) -> bool {
        matches!(self, ViewKind::Materialized)
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(ViewKind::Simple),
            "materialized" => Ok(ViewKind::Materialized),
            "updatable" => Ok(ViewKind::Updatable),
            "recursive" => Ok(ViewKind::Recursive),
            other => Err(format!("unknown view type: {}", other)),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateViewRequest {
    pub view_type: ViewKind,
    pub view_name: String,
    /// The defining SELECT, without the `AS` keyword.
    pub definition: String,
    /// Only meaningful for updatable views.
    #[serde(default)]
    pub with_check_option: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropViewRequest {
    pub view_type: ViewKind,
    pub view_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshViewRequest {
    pub view_name: String,
}

/// One row of the view listing. Field names follow `pg_views`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewInfo {
    pub schemaname: String,
    pub viewname: String,
    pub definition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewInsertRequest {
    /// Positional values matching the view's column order.
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewUpdateRequest {
    /// Raw `SET` clause, e.g. `name = 'Ann'`.
    pub set_clause: String,
    /// Raw condition without the `WHERE` keyword.
    pub condition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDeleteRequest {
    pub condition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameViewRequest {
    pub old_name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyViewRequest {
    pub view_name: String,
    pub select_query: String,
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SequencesResponse {
    pub sequences: Vec<String>,
}

fn default_sequence_step() -> Option<i64> {
    Some(1)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSequenceRequest {
    pub name: String,
    #[serde(default = "default_sequence_step")]
    pub start: Option<i64>,
    #[serde(default = "default_sequence_step")]
    pub increment: Option<i64>,
    #[serde(default)]
    pub min_value: Option<i64>,
    #[serde(default)]
    pub max_value: Option<i64>,
    #[serde(default)]
    pub cache: Option<i64>,
    #[serde(default)]
    pub cycle: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSequenceResponse {
    pub sequence: String,
    /// The CREATE SEQUENCE statement the backend actually ran.
    pub query_executed: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextValueResponse {
    pub next_value: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentValueResponse {
    pub current_value: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSequenceRequest {
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSequenceResponse {
    pub new_value: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestartSequenceRequest {
    pub start_with: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociateSequenceRequest {
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetSequenceRequest {
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetSequenceResponse {
    pub new_sequence_value: Option<i64>,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Isolation levels accepted by the backend. The wire names are the SQL
/// keywords, spaces included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsolationLevel {
    #[serde(rename = "READ UNCOMMITTED")]
    ReadUncommitted,
    #[serde(rename = "READ COMMITTED")]
    ReadCommitted,
    #[serde(rename = "REPEATABLE READ")]
    RepeatableRead,
    #[serde(rename = "SERIALIZABLE")]
    Serializable,
}

impl IsolationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            IsolationLevel::ReadUncommitted => "READ UNCOMMITTED",
            IsolationLevel::ReadCommitted => "READ COMMITTED",
            IsolationLevel::RepeatableRead => "REPEATABLE READ",
            IsolationLevel::Serializable => "SERIALIZABLE",
        }
    }
}

impl FromStr for IsolationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "READ UNCOMMITTED" => Ok(IsolationLevel::ReadUncommitted),
            "READ COMMITTED" => Ok(IsolationLevel::ReadCommitted),
            "REPEATABLE READ" => Ok(IsolationLevel::RepeatableRead),
            "SERIALIZABLE" => Ok(IsolationLevel::Serializable),
            other => Err(format!("unknown isolation level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavepointRequest {
    pub savepoint_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationRequest {
    pub isolation_level: IsolationLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockTableRequest {
    pub table_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRequest {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedTransactionRequest {
    pub transaction_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub channel_name: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryLockRequest {
    pub key: i64,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Typed async client for the administration API.
pub struct BackendClient {
    config: BackendClientConfig,
    client: reqwest::Client,
    cache: ListingCache,
}

impl BackendClient {
    /// Create a new client with the given configuration. Trailing slashes
    /// on the base URL are stripped.
    pub fn new(mut config: BackendClientConfig) -> Result<Self, ClientError> {
        let base_len = config.base_url.trim_end_matches('/').len();
        config.base_url.truncate(base_len);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            config,
            client,
            cache: ListingCache::default(),
        })
    }

    /// Base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Drop the cached table listing so the next read hits the backend.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Convert a non-2xx response into a [`ClientError`], preferring the
    /// backend's `detail` message over the raw status line.
    async fn response_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if let Ok(body) = serde_json::from_str::<ErrorDetail>(&text) {
            return ClientError::ApiError(body.detail);
        }
        ClientError::ApiError(format!("HTTP {}: {}", status, text))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        response.json().await.map_err(Into::into)
    }

    // -----------------------------------------------------------------------
    // Tables
    // -----------------------------------------------------------------------

    /// List all user tables. Served from the listing cache when fresh.
    pub async fn list_tables(&self) -> Result<Vec<String>, ClientError> {
        let ttl = Duration::from_millis(self.config.cache_ttl_ms);
        if let Some(tables) = self.cache.tables(ttl) {
            return Ok(tables);
        }
        let response = self.client.get(self.url("/table/tables")).send().await?;
        let body: TablesResponse = Self::read_json(response).await?;
        self.cache.store_tables(&body.tables);
        Ok(body.tables)
    }

    /// Fetch all rows of a table.
    pub async fn table_data(&self, table: &str) -> Result<Vec<Value>, ClientError> {
        let response = self
            .client
            .get(self.url("/table/get_table_data"))
            .query(&[("table_name", table)])
            .send()
            .await?;
        let body: TableDataResponse = Self::read_json(response).await?;
        Ok(body.data)
    }

    /// Fetch the column definitions of a table.
    pub async fn table_schema(&self, table: &str) -> Result<Vec<ColumnDef>, ClientError> {
        let response = self
            .client
            .get(self.url("/table/get_table_schema"))
            .query(&[("table_name", table)])
            .send()
            .await?;
        let body: TableSchemaResponse = Self::read_json(response).await?;
        Ok(body.schema)
    }

    /// Create a table. The backend creates a fixed starter shape
    /// (`id INTEGER PRIMARY KEY, name VARCHAR(255)`).
    pub async fn create_table(
        &self,
        request: &CreateTableRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/table/create_table"))
            .json(request)
            .send()
            .await?;
        let body = Self::read_json(response).await?;
        self.invalidate_cache();
        Ok(body)
    }

    /// Drop a table.
    pub async fn delete_table(&self, table: &str) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .delete(self.url("/table/delete_table"))
            .json(&CreateTableRequest {
                table_name: table.to_string(),
            })
            .send()
            .await?;
        let body = Self::read_json(response).await?;
        self.invalidate_cache();
        Ok(body)
    }

    /// Apply add/drop/alter column changes to a table.
    pub async fn modify_table(
        &self,
        request: &ModifyTableRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .put(self.url("/table/modify_table"))
            .json(request)
            .send()
            .await?;
        let body = Self::read_json(response).await?;
        self.invalidate_cache();
        Ok(body)
    }

    /// Insert one row given as a JSON object.
    pub async fn insert_row(
        &self,
        request: &InsertRowRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/table/insert_row"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Update rows matching the condition object.
    pub async fn update_row(
        &self,
        request: &UpdateRowRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .put(self.url("/table/update_row"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Delete rows matching the condition object.
    pub async fn delete_row(
        &self,
        request: &DeleteRowRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .delete(self.url("/table/delete_row"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    // -----------------------------------------------------------------------
    // Select
    // -----------------------------------------------------------------------

    /// List the tables available to the query builder.
    pub async fn select_tables(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .client
            .get(self.url("/select/tablesview"))
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Execute a select query described by a [`QuerySpec`].
    pub async fn run_select(&self, spec: &QuerySpec) -> Result<SelectResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/select/select"))
            .json(spec)
            .send()
            .await?;
        Self::read_json(response).await
    }

    // -----------------------------------------------------------------------
    // Indexes
    // -----------------------------------------------------------------------

    pub async fn list_indexes(&self) -> Result<Vec<IndexInfo>, ClientError> {
        let response = self
            .client
            .get(self.url("/indexview/index/list"))
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn create_index(
        &self,
        request: &CreateIndexRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/indexview/index/create"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn drop_index(&self, index_name: &str) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/indexview/index/drop"))
            .json(&DropIndexRequest {
                index_name: index_name.to_string(),
            })
            .send()
            .await?;
        Self::read_json(response).await
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    pub async fn list_views(&self) -> Result<Vec<ViewInfo>, ClientError> {
        let response = self.client.get(self.url("/indexview/views")).send().await?;
        Self::read_json(response).await
    }

    pub async fn create_view(
        &self,
        request: &CreateViewRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/indexview/view/create"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn drop_view(
        &self,
        request: &DropViewRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/indexview/view/drop"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Refresh a materialized view.
    pub async fn refresh_view(&self, view_name: &str) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/indexview/view/refresh"))
            .json(&RefreshViewRequest {
                view_name: view_name.to_string(),
            })
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Fetch all rows of a view.
    pub async fn view_data(&self, view_name: &str) -> Result<Vec<Value>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/indexview/views/{}", view_name)))
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Fetch view rows matching a raw condition (without `WHERE`).
    pub async fn filter_view_data(
        &self,
        view_name: &str,
        condition: &str,
    ) -> Result<Vec<Value>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/indexview/views/{}/filter", view_name)))
            .query(&[("condition", condition)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Fetch view rows joined against another table.
    pub async fn join_view_data(
        &self,
        view_name: &str,
        table_name: &str,
        condition: &str,
    ) -> Result<Vec<Value>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/indexview/views/{}/join", view_name)))
            .query(&[("table_name", table_name), ("condition", condition)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Insert positional values through an updatable view.
    pub async fn insert_into_view(
        &self,
        view_name: &str,
        request: &ViewInsertRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/indexview/views/{}/insert", view_name)))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Update rows through an updatable view.
    pub async fn update_view(
        &self,
        view_name: &str,
        request: &ViewUpdateRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/indexview/views/{}/update", view_name)))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Delete rows through an updatable view.
    pub async fn delete_from_view(
        &self,
        view_name: &str,
        request: &ViewDeleteRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/indexview/views/{}/delete", view_name)))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn rename_view(
        &self,
        request: &RenameViewRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .put(self.url("/indexview/views/rename"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Replace a view's defining query (`CREATE OR REPLACE VIEW`).
    pub async fn modify_view(
        &self,
        request: &ModifyViewRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .put(self.url("/indexview/views/modify"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    // -----------------------------------------------------------------------
    // Sequences
    // -----------------------------------------------------------------------

    pub async fn list_sequences(&self) -> Result<Vec<String>, ClientError> {
        let response = self.client.get(self.url("/sequences/list")).send().await?;
        let body: SequencesResponse = Self::read_json(response).await?;
        Ok(body.sequences)
    }

    pub async fn create_sequence(
        &self,
        request: &CreateSequenceRequest,
    ) -> Result<CreateSequenceResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/sequences/create"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Advance the sequence and return the new value.
    pub async fn next_value(&self, sequence: &str) -> Result<NextValueResponse, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/sequences/{}/next", sequence)))
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Read the current value. Fails on the backend if the sequence has not
    /// been advanced in its session yet.
    pub async fn current_value(
        &self,
        sequence: &str,
    ) -> Result<CurrentValueResponse, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/sequences/{}/current", sequence)))
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn set_sequence_value(
        &self,
        sequence: &str,
        value: i64,
    ) -> Result<SetSequenceResponse, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/sequences/{}/set", sequence)))
            .json(&SetSequenceRequest { value })
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn restart_sequence(
        &self,
        sequence: &str,
        start_with: i64,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/sequences/{}/restart", sequence)))
            .json(&RestartSequenceRequest { start_with })
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn drop_sequence(&self, sequence: &str) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/sequences/{}/drop", sequence)))
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Fetch the sequence's state row (`last_value`, `is_called`, ...).
    pub async fn sequence_details(&self, sequence: &str) -> Result<Value, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/sequences/{}/details", sequence)))
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Tie the sequence's lifetime to a table column (`OWNED BY`).
    pub async fn associate_sequence(
        &self,
        sequence: &str,
        request: &AssociateSequenceRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/sequences/{}/associate", sequence)))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Re-align a serial column's sequence with the column's max value.
    pub async fn reset_sequence_for_table(
        &self,
        request: &ResetSequenceRequest,
    ) -> Result<ResetSequenceResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/sequences/reset_table"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    // -----------------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------------

    async fn transaction_verb(&self, verb: &str) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/transactions/{}", verb)))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn transaction_verb_with<B: Serialize>(
        &self,
        verb: &str,
        body: &B,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/transactions/{}", verb)))
            .json(body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn begin_transaction(&self) -> Result<MessageResponse, ClientError> {
        self.transaction_verb("begin").await
    }

    pub async fn commit_transaction(&self) -> Result<MessageResponse, ClientError> {
        self.transaction_verb("commit").await
    }

    pub async fn rollback_transaction(&self) -> Result<MessageResponse, ClientError> {
        self.transaction_verb("rollback").await
    }

    /// `END` — equivalent to commit on the backend.
    pub async fn end_transaction(&self) -> Result<MessageResponse, ClientError> {
        self.transaction_verb("end").await
    }

    /// `ABORT` — equivalent to rollback on the backend.
    pub async fn abort_transaction(&self) -> Result<MessageResponse, ClientError> {
        self.transaction_verb("abort").await
    }

    pub async fn create_savepoint(&self, name: &str) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "savepoint",
            &SavepointRequest {
                savepoint_name: name.to_string(),
            },
        )
        .await
    }

    pub async fn rollback_to_savepoint(
        &self,
        name: &str,
    ) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "rollback_to_savepoint",
            &SavepointRequest {
                savepoint_name: name.to_string(),
            },
        )
        .await
    }

    pub async fn release_savepoint(&self, name: &str) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "release_savepoint",
            &SavepointRequest {
                savepoint_name: name.to_string(),
            },
        )
        .await
    }

    pub async fn set_transaction_isolation(
        &self,
        level: IsolationLevel,
    ) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "set_transaction_isolation",
            &IsolationRequest {
                isolation_level: level,
            },
        )
        .await
    }

    pub async fn set_session_isolation(
        &self,
        level: IsolationLevel,
    ) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "set_session_isolation",
            &IsolationRequest {
                isolation_level: level,
            },
        )
        .await
    }

    pub async fn lock_table(&self, table: &str) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "lock_table",
            &LockTableRequest {
                table_name: table.to_string(),
            },
        )
        .await
    }

    pub async fn set_snapshot(&self, snapshot_id: &str) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "set_snapshot",
            &SnapshotRequest {
                snapshot_id: snapshot_id.to_string(),
            },
        )
        .await
    }

    pub async fn export_snapshot(&self) -> Result<MessageResponse, ClientError> {
        self.transaction_verb("export_snapshot").await
    }

    pub async fn prepare_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "prepare_transaction",
            &PreparedTransactionRequest {
                transaction_id: transaction_id.to_string(),
            },
        )
        .await
    }

    pub async fn commit_prepared(
        &self,
        transaction_id: &str,
    ) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "commit_prepared",
            &PreparedTransactionRequest {
                transaction_id: transaction_id.to_string(),
            },
        )
        .await
    }

    pub async fn rollback_prepared(
        &self,
        transaction_id: &str,
    ) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "rollback_prepared",
            &PreparedTransactionRequest {
                transaction_id: transaction_id.to_string(),
            },
        )
        .await
    }

    pub async fn listen_channel(&self, channel: &str) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "listen",
            &NotifyRequest {
                channel_name: channel.to_string(),
                message: String::new(),
            },
        )
        .await
    }

    pub async fn notify_channel(
        &self,
        channel: &str,
        message: &str,
    ) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "notify",
            &NotifyRequest {
                channel_name: channel.to_string(),
                message: message.to_string(),
            },
        )
        .await
    }

    pub async fn unlisten_channel(&self, channel: &str) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with(
            "unlisten",
            &NotifyRequest {
                channel_name: channel.to_string(),
                message: String::new(),
            },
        )
        .await
    }

    pub async fn advisory_lock(&self, key: i64) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with("advisory_lock", &AdvisoryLockRequest { key })
            .await
    }

    pub async fn advisory_unlock(&self, key: i64) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with("advisory_unlock", &AdvisoryLockRequest { key })
            .await
    }

    pub async fn advisory_xact_lock(&self, key: i64) -> Result<MessageResponse, ClientError> {
        self.transaction_verb_with("advisory_xact_lock", &AdvisoryLockRequest { key })
            .await
    }

    pub async fn advisory_unlock_all(&self) -> Result<MessageResponse, ClientError> {
        self.transaction_verb("advisory_unlock_all").await
    }
}

impl fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
