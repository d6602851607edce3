//! HTML templates for the console pages.
//!
//! Uses embedded templates with simple string interpolation so the binary
//! ships self-contained, without a template engine or static asset files.
//! Page scripts live in per-page constants and talk to the `/api` proxy
//! routes; resource names cross into scripts through `data-*` attributes.

use crate::client::{ColumnDef, IndexInfo, SelectResponse, ViewInfo};
use crate::query::SelectForm;
use crate::sql;
use serde_json::Value;

/// Template renderer.
pub struct Templates;

impl Templates {
    /// Create a new template renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render the base layout with content.
    pub fn layout(&self, title: &str, content: &str, active_page: &str) -> String {
        let nav = self.nav(active_page);
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - pgDeck</title>
    <style>
        {css}
    </style>
</head>
<body>
    <div class="container">
        <nav class="sidebar">
            <div class="logo">
                <h1>pgDeck</h1>
                <span class="subtitle">PostgreSQL Console</span>
            </div>
            {nav}
        </nav>
        <main class="content">
            <header class="header">
                <h2>{title}</h2>
            </header>
            <div class="main-content">
                {content}
            </div>
        </main>
    </div>
    <script>
        {js}
    </script>
</body>
</html>"#,
            title = html_escape(title),
            css = CSS,
            nav = nav,
            content = content,
            js = JS,
        )
    }

    fn nav(&self, active: &str) -> String {
        let items = [
            ("tables", "Tables", "/"),
            ("query", "Query", "/query"),
            ("indexes-views", "Indexes & Views", "/indexes-views"),
            ("sequences", "Sequences", "/sequences"),
            ("transactions", "Transactions", "/transactions"),
        ];

        let links: Vec<String> = items
            .iter()
            .map(|(id, label, href)| {
                let class = if *id == active { "active" } else { "" };
                format!(
                    r#"<a href="{href}" class="nav-link {class}" data-page="{id}">{label}</a>"#,
                    href = href,
                    class = class,
                    id = id,
                    label = label,
                )
            })
            .collect();

        format!(r#"<div class="nav-links">{}</div>"#, links.join("\n"))
    }

    /// Render the table listing page.
    pub fn tables(&self, tables: &[String]) -> String {
        let rows: Vec<String> = tables
            .iter()
            .map(|name| {
                let escaped = html_escape(name);
                format!(
                    r#"<tr>
                        <td><a href="/tables/{name}">{name}</a></td>
                        <td class="actions-cell">
                            <a href="/tables/{name}" class="btn btn-small">Browse</a>
                            <button class="btn btn-small btn-danger" data-table="{name}"
                                    title="{drop_sql}" onclick="dropTable(this.dataset.table)">Drop</button>
                        </td>
                    </tr>"#,
                    name = escaped,
                    drop_sql = html_escape(&sql::drop_table(name)),
                )
            })
            .collect();

        let empty_state = if tables.is_empty() {
            r#"<tr><td colspan="2">
                <div class="empty-state">
                    <div class="empty-state-title">No tables yet</div>
                    <div class="empty-state-desc">Create your first table to get started</div>
                </div>
            </td></tr>"#
        } else {
            ""
        };

        let content = format!(
            r#"
<div class="actions-bar">
    <div class="search-wrapper">
        <input type="text" class="search-input" id="tables-search"
               placeholder="Search tables..." onkeyup="filterTable('tables-table', this.value)">
    </div>
    <button class="btn btn-primary" onclick="showModal('create-table-modal')">Create Table</button>
</div>

<div class="card">
    <table class="data-table">
        <thead>
            <tr>
                <th>Name</th>
                <th>Actions</th>
            </tr>
        </thead>
        <tbody id="tables-table">
            {rows}
            {empty}
        </tbody>
    </table>
</div>

<div id="create-table-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Create Table</h3>
            <button class="close-btn" onclick="hideModal('create-table-modal')">&times;</button>
        </div>
        <form id="create-table-form" onsubmit="createTable(event)">
            <div class="form-group">
                <label for="table-name">Table Name</label>
                <input type="text" id="table-name" name="table_name" required placeholder="my_table">
            </div>
            <div class="sql-hint"><code>{create_sql}</code></div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('create-table-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Create</button>
            </div>
        </form>
    </div>
</div>
<script>{script}</script>
"#,
            rows = rows.join("\n"),
            empty = empty_state,
            create_sql = html_escape(&sql::create_table("table_name")),
            script = TABLES_JS,
        );

        self.layout("Tables", &content, "tables")
    }

    /// Render one table's browse page: schema, rows, and row/schema forms.
    pub fn table_detail(&self, table: &str, schema: &[ColumnDef], rows: &[Value]) -> String {
        let escaped = html_escape(table);

        let schema_rows: Vec<String> = schema
            .iter()
            .map(|col| {
                format!(
                    r#"<tr><td>{name}</td><td><code>{ty}</code></td></tr>"#,
                    name = html_escape(&col.column_name),
                    ty = html_escape(&col.column_type),
                )
            })
            .collect();

        let data_table = result_table(rows, "This table has no rows yet");

        let content = format!(
            r#"
<div id="table-page" data-table="{table}"></div>

<div class="card">
    <div class="card-header">
        <h3>Schema</h3>
        <button class="btn btn-small" onclick="showModal('modify-table-modal')">Modify</button>
    </div>
    <table class="data-table">
        <thead><tr><th>Column</th><th>Type</th></tr></thead>
        <tbody>{schema_rows}</tbody>
    </table>
</div>

<div class="card">
    <div class="card-header">
        <h3>Rows</h3>
        <div>
            <button class="btn btn-small btn-primary" onclick="showModal('insert-row-modal')">Insert Row</button>
            <button class="btn btn-small" onclick="showModal('update-row-modal')">Update Rows</button>
            <button class="btn btn-small btn-danger" onclick="showModal('delete-row-modal')">Delete Rows</button>
        </div>
    </div>
    {data_table}
</div>

<div class="card danger-zone">
    <div class="card-header">
        <h3>Danger Zone</h3>
    </div>
    <p>Dropping removes the table and all of its rows.</p>
    <div class="sql-hint"><code>{drop_sql}</code></div>
    <button class="btn btn-danger" onclick="dropThisTable()">Drop Table</button>
</div>

<div id="insert-row-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Insert Row</h3>
            <button class="close-btn" onclick="hideModal('insert-row-modal')">&times;</button>
        </div>
        <form onsubmit="insertRow(event)">
            <div class="form-group">
                <label for="insert-json">Row values (JSON object)</label>
                <textarea id="insert-json" rows="4" placeholder='{{"name": "John", "age": 30}}' required></textarea>
            </div>
            <div class="sql-hint"><code>{insert_sql}</code></div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('insert-row-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Insert</button>
            </div>
        </form>
    </div>
</div>

<div id="update-row-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Update Rows</h3>
            <button class="close-btn" onclick="hideModal('update-row-modal')">&times;</button>
        </div>
        <form onsubmit="updateRows(event)">
            <div class="form-group">
                <label for="update-condition">Match condition (JSON object)</label>
                <textarea id="update-condition" rows="2" placeholder='{{"id": 1}}' required></textarea>
            </div>
            <div class="form-group">
                <label for="update-values">New values (JSON object)</label>
                <textarea id="update-values" rows="2" placeholder='{{"name": "Ann"}}' required></textarea>
            </div>
            <div class="sql-hint"><code>{update_sql}</code></div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('update-row-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Update</button>
            </div>
        </form>
    </div>
</div>

<div id="delete-row-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Delete Rows</h3>
            <button class="close-btn" onclick="hideModal('delete-row-modal')">&times;</button>
        </div>
        <form onsubmit="deleteRows(event)">
            <div class="form-group">
                <label for="delete-condition">Match condition (JSON object)</label>
                <textarea id="delete-condition" rows="2" placeholder='{{"id": 1}}' required></textarea>
            </div>
            <div class="sql-hint"><code>{delete_sql}</code></div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('delete-row-modal')">Cancel</button>
                <button type="submit" class="btn btn-danger">Delete</button>
            </div>
        </form>
    </div>
</div>

<div id="modify-table-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Modify Schema</h3>
            <button class="close-btn" onclick="hideModal('modify-table-modal')">&times;</button>
        </div>
        <form onsubmit="modifyTable(event)">
            <div class="form-group">
                <label for="add-columns">Add columns (one <code>name type</code> per line)</label>
                <textarea id="add-columns" rows="2" placeholder="email VARCHAR(255)"></textarea>
            </div>
            <div class="form-group">
                <label for="drop-columns">Drop columns (one name per line)</label>
                <textarea id="drop-columns" rows="2" placeholder="legacy_flag"></textarea>
            </div>
            <div class="form-group">
                <label for="alter-columns">Change column types (one <code>name type</code> per line)</label>
                <textarea id="alter-columns" rows="2" placeholder="age BIGINT"></textarea>
            </div>
            <div class="sql-hint"><code>{alter_sql}</code></div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('modify-table-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Apply</button>
            </div>
        </form>
    </div>
</div>
<script>{script}</script>
"#,
            table = escaped,
            schema_rows = schema_rows.join("\n"),
            data_table = data_table,
            drop_sql = html_escape(&sql::drop_table(table)),
            insert_sql = html_escape(&sql::insert_row(
                table,
                &[("column".to_string(), "value".to_string())]
            )),
            update_sql = html_escape(&sql::update_row(
                table,
                &[("column".to_string(), "value".to_string())],
                1
            )),
            delete_sql = html_escape(&sql::delete_row(table, 1)),
            alter_sql = html_escape(&sql::alter_table(
                table,
                &[("column".to_string(), "TYPE".to_string())],
                &[],
                &[]
            )),
            script = TABLE_DETAIL_JS,
        );

        self.layout(&format!("Table: {}", table), &content, "tables")
    }

    /// Render the query builder page, optionally with a result or an error
    /// from the last submission.
    pub fn query_editor(
        &self,
        tables: &[String],
        form: &SelectForm,
        result: Option<&SelectResponse>,
        error: Option<&str>,
    ) -> String {
        let table_options: Vec<String> = tables
            .iter()
            .map(|name| {
                format!(
                    r#"<option value="{name}"{sel}>{name}</option>"#,
                    name = html_escape(name),
                    sel = selected(&form.table, name),
                )
            })
            .collect();

        let operator_options = operator_select(&form.where_operator);
        let join_options = join_select(&form.join_type);
        let aggregate_options = aggregate_select(&form.aggregate_function);

        let error_banner = error
            .map(|msg| {
                format!(
                    r#"<div class="error-banner">{}</div>"#,
                    html_escape(msg)
                )
            })
            .unwrap_or_default();

        let result_section = result
            .map(|res| {
                format!(
                    r#"
<div class="card">
    <div class="card-header"><h3>Result</h3></div>
    <div class="sql-hint"><code>{query}</code></div>
    {table}
</div>"#,
                    query = html_escape(&res.query),
                    table = result_table(&res.data, "The query returned no rows"),
                )
            })
            .unwrap_or_default();

        let content = format!(
            r#"
{error_banner}
<div class="card">
    <form method="post" action="/query">
        <div class="form-row">
            <div class="form-group">
                <label for="q-table">Table</label>
                <select id="q-table" name="table" required onchange="this.form.submit()">
                    <option value="">-- choose --</option>
                    {table_options}
                </select>
            </div>
            <div class="form-group">
                <label for="q-columns">Columns (comma separated, empty for all)</label>
                <input type="text" id="q-columns" name="columns" value="{columns}" placeholder="id, name">
            </div>
            <div class="form-group checkbox-group">
                <label><input type="checkbox" name="distinct" value="on"{distinct}> DISTINCT</label>
            </div>
        </div>
        <fieldset>
            <legend>Where</legend>
            <div class="form-row">
                <div class="form-group">
                    <label for="q-where-column">Column</label>
                    <input type="text" id="q-where-column" name="where_column" value="{where_column}">
                </div>
                <div class="form-group">
                    <label for="q-where-operator">Operator</label>
                    <select id="q-where-operator" name="where_operator">{operator_options}</select>
                </div>
                <div class="form-group">
                    <label for="q-where-value">Value</label>
                    <input type="text" id="q-where-value" name="where_value" value="{where_value}">
                </div>
            </div>
        </fieldset>
        <fieldset>
            <legend>Join</legend>
            <div class="form-row">
                <div class="form-group">
                    <label for="q-join-type">Type</label>
                    <select id="q-join-type" name="join_type">{join_options}</select>
                </div>
                <div class="form-group">
                    <label for="q-join-table">Table</label>
                    <input type="text" id="q-join-table" name="join_table" value="{join_table}">
                </div>
                <div class="form-group">
                    <label for="q-join-condition">On</label>
                    <input type="text" id="q-join-condition" name="join_condition"
                           value="{join_condition}" placeholder="a.id = b.a_id">
                </div>
            </div>
        </fieldset>
        <fieldset>
            <legend>Aggregate</legend>
            <div class="form-row">
                <div class="form-group">
                    <label for="q-aggregate-fn">Function</label>
                    <select id="q-aggregate-fn" name="aggregate_function">{aggregate_options}</select>
                </div>
                <div class="form-group">
                    <label for="q-aggregate-column">Column</label>
                    <input type="text" id="q-aggregate-column" name="aggregate_column" value="{aggregate_column}">
                </div>
                <div class="form-group">
                    <label for="q-group-by">Group by</label>
                    <input type="text" id="q-group-by" name="group_by" value="{group_by}">
                </div>
                <div class="form-group">
                    <label for="q-having">Having</label>
                    <input type="text" id="q-having" name="having" value="{having}">
                </div>
            </div>
        </fieldset>
        <div class="form-row">
            <div class="form-group">
                <label for="q-order-by">Order by</label>
                <input type="text" id="q-order-by" name="order_by" value="{order_by}">
            </div>
            <div class="form-group">
                <label for="q-order">Direction</label>
                <select id="q-order" name="order">
                    <option value=""></option>
                    <option value="ASC"{asc}>ASC</option>
                    <option value="DESC"{desc}>DESC</option>
                </select>
            </div>
            <div class="form-group">
                <label for="q-limit">Limit</label>
                <input type="number" id="q-limit" name="limit" value="{limit}">
            </div>
            <div class="form-group">
                <label for="q-offset">Offset</label>
                <input type="number" id="q-offset" name="offset" value="{offset}">
            </div>
        </div>
        <div class="form-actions">
            <button type="submit" class="btn btn-primary">Run Query</button>
        </div>
    </form>
</div>
{result_section}
"#,
            error_banner = error_banner,
            table_options = table_options.join("\n"),
            columns = html_escape(&form.columns),
            distinct = if form.distinct.is_some() { " checked" } else { "" },
            where_column = html_escape(&form.where_column),
            operator_options = operator_options,
            where_value = html_escape(&form.where_value),
            join_options = join_options,
            join_table = html_escape(&form.join_table),
            join_condition = html_escape(&form.join_condition),
            aggregate_options = aggregate_options,
            aggregate_column = html_escape(&form.aggregate_column),
            group_by = html_escape(&form.group_by),
            having = html_escape(&form.having),
            order_by = html_escape(&form.order_by),
            asc = selected(&form.order, "ASC"),
            desc = selected(&form.order, "DESC"),
            limit = html_escape(&form.limit),
            offset = html_escape(&form.offset),
            result_section = result_section,
        );

        self.layout("Query", &content, "query")
    }

    /// Render the combined indexes and views page.
    pub fn indexes_views(&self, indexes: &[IndexInfo], views: &[ViewInfo]) -> String {
        let index_rows: Vec<String> = indexes
            .iter()
            .map(|idx| {
                format!(
                    r#"<tr>
                        <td>{name}</td>
                        <td>{table}</td>
                        <td><code class="truncate">{def}</code></td>
                        <td class="actions-cell">
                            <button class="btn btn-small btn-danger" data-index="{name}"
                                    title="{drop_sql}" onclick="dropIndex(this.dataset.index)">Drop</button>
                        </td>
                    </tr>"#,
                    name = html_escape(&idx.indexname),
                    table = html_escape(&idx.tablename),
                    def = html_escape(&idx.indexdef),
                    drop_sql = html_escape(&sql::drop_index(&idx.indexname)),
                )
            })
            .collect();

        let index_empty = if indexes.is_empty() {
            r#"<tr><td colspan="4"><div class="empty-state"><div class="empty-state-title">No indexes</div></div></td></tr>"#
        } else {
            ""
        };

        let view_rows: Vec<String> = views
            .iter()
            .map(|view| {
                format!(
                    r#"<tr>
                        <td><a href="/views/{name}">{name}</a></td>
                        <td>{schema}</td>
                        <td><code class="truncate">{def}</code></td>
                        <td class="actions-cell">
                            <button class="btn btn-small" data-view="{name}" onclick="openRenameView(this.dataset.view)">Rename</button>
                            <button class="btn btn-small" data-view="{name}" onclick="openModifyView(this.dataset.view)">Modify</button>
                            <button class="btn btn-small btn-danger" data-view="{name}"
                                    title="{drop_sql}" onclick="openDropView(this.dataset.view)">Drop</button>
                        </td>
                    </tr>"#,
                    name = html_escape(&view.viewname),
                    schema = html_escape(&view.schemaname),
                    def = html_escape(&view.definition),
                    drop_sql = html_escape(&sql::drop_view(&view.viewname, false)),
                )
            })
            .collect();

        let view_empty = if views.is_empty() {
            r#"<tr><td colspan="4"><div class="empty-state"><div class="empty-state-title">No views</div></div></td></tr>"#
        } else {
            ""
        };

        let content = format!(
            r#"
<div class="card">
    <div class="card-header">
        <h3>Indexes</h3>
        <button class="btn btn-small btn-primary" onclick="showModal('create-index-modal')">Create Index</button>
    </div>
    <table class="data-table">
        <thead><tr><th>Name</th><th>Table</th><th>Definition</th><th>Actions</th></tr></thead>
        <tbody>{index_rows}{index_empty}</tbody>
    </table>
</div>

<div class="card">
    <div class="card-header">
        <h3>Views</h3>
        <button class="btn btn-small btn-primary" onclick="showModal('create-view-modal')">Create View</button>
    </div>
    <table class="data-table">
        <thead><tr><th>Name</th><th>Schema</th><th>Definition</th><th>Actions</th></tr></thead>
        <tbody>{view_rows}{view_empty}</tbody>
    </table>
</div>

<div id="create-index-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Create Index</h3>
            <button class="close-btn" onclick="hideModal('create-index-modal')">&times;</button>
        </div>
        <form onsubmit="createIndex(event)">
            <div class="form-row">
                <div class="form-group">
                    <label for="index-name">Index Name</label>
                    <input type="text" id="index-name" required placeholder="idx_users_email">
                </div>
                <div class="form-group">
                    <label for="index-table">Table</label>
                    <input type="text" id="index-table" required>
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="index-column">Column</label>
                    <input type="text" id="index-column" required>
                </div>
                <div class="form-group">
                    <label for="index-type">Method</label>
                    <select id="index-type">
                        <option value="btree">btree</option>
                        <option value="hash">hash</option>
                        <option value="gin">gin</option>
                        <option value="gist">gist</option>
                        <option value="spgist">spgist</option>
                        <option value="brin">brin</option>
                    </select>
                </div>
            </div>
            <div class="sql-hint"><code>{index_sql}</code></div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('create-index-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Create</button>
            </div>
        </form>
    </div>
</div>

<div id="create-view-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Create View</h3>
            <button class="close-btn" onclick="hideModal('create-view-modal')">&times;</button>
        </div>
        <form onsubmit="createView(event)">
            <div class="form-row">
                <div class="form-group">
                    <label for="view-name">View Name</label>
                    <input type="text" id="view-name" required>
                </div>
                <div class="form-group">
                    <label for="view-type">Type</label>
                    <select id="view-type">
                        <option value="simple">simple</option>
                        <option value="materialized">materialized</option>
                        <option value="updatable">updatable</option>
                        <option value="recursive">recursive</option>
                    </select>
                </div>
            </div>
            <div class="form-group">
                <label for="view-definition">Defining query</label>
                <textarea id="view-definition" rows="3" required placeholder="SELECT id, name FROM users WHERE active"></textarea>
            </div>
            <div class="form-group checkbox-group">
                <label><input type="checkbox" id="view-with-check"> WITH CHECK OPTION (updatable only)</label>
            </div>
            <div class="sql-hint"><code>{view_sql}</code></div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('create-view-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Create</button>
            </div>
        </form>
    </div>
</div>

<div id="drop-view-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Drop View</h3>
            <button class="close-btn" onclick="hideModal('drop-view-modal')">&times;</button>
        </div>
        <form onsubmit="dropView(event)">
            <div class="form-row">
                <div class="form-group">
                    <label for="drop-view-name">View Name</label>
                    <input type="text" id="drop-view-name" required>
                </div>
                <div class="form-group">
                    <label for="drop-view-type">Type</label>
                    <select id="drop-view-type">
                        <option value="simple">simple</option>
                        <option value="materialized">materialized</option>
                        <option value="updatable">updatable</option>
                        <option value="recursive">recursive</option>
                    </select>
                </div>
            </div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('drop-view-modal')">Cancel</button>
                <button type="submit" class="btn btn-danger">Drop</button>
            </div>
        </form>
    </div>
</div>

<div id="rename-view-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Rename View</h3>
            <button class="close-btn" onclick="hideModal('rename-view-modal')">&times;</button>
        </div>
        <form onsubmit="renameView(event)">
            <div class="form-row">
                <div class="form-group">
                    <label for="rename-old">Current Name</label>
                    <input type="text" id="rename-old" required>
                </div>
                <div class="form-group">
                    <label for="rename-new">New Name</label>
                    <input type="text" id="rename-new" required>
                </div>
            </div>
            <div class="sql-hint"><code>{rename_sql}</code></div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('rename-view-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Rename</button>
            </div>
        </form>
    </div>
</div>

<div id="modify-view-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Modify View</h3>
            <button class="close-btn" onclick="hideModal('modify-view-modal')">&times;</button>
        </div>
        <form onsubmit="modifyView(event)">
            <div class="form-group">
                <label for="modify-view-name">View Name</label>
                <input type="text" id="modify-view-name" required>
            </div>
            <div class="form-group">
                <label for="modify-view-query">New defining query</label>
                <textarea id="modify-view-query" rows="3" required></textarea>
            </div>
            <div class="sql-hint"><code>{modify_sql}</code></div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('modify-view-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Apply</button>
            </div>
        </form>
    </div>
</div>
<script>{script}</script>
"#,
            index_rows = index_rows.join("\n"),
            index_empty = index_empty,
            view_rows = view_rows.join("\n"),
            view_empty = view_empty,
            index_sql = html_escape(&sql::create_index("index_name", "table_name", "btree", "column")),
            view_sql = html_escape(&sql::create_view("view_name", "SELECT ...", false, false)),
            rename_sql = html_escape(&sql::rename_view("old_name", "new_name")),
            modify_sql = html_escape(&sql::modify_view("view_name", "SELECT ...")),
            script = INDEXES_VIEWS_JS,
        );

        self.layout("Indexes & Views", &content, "indexes-views")
    }

    /// Render one view's browse page with filter and join forms.
    pub fn view_detail(
        &self,
        view: &str,
        rows: &[Value],
        condition: Option<&str>,
        join_table: Option<&str>,
        join_condition: Option<&str>,
    ) -> String {
        let escaped = html_escape(view);
        let data_table = result_table(rows, "The view returned no rows");

        let content = format!(
            r#"
<div id="view-page" data-view="{view}"></div>

<div class="actions-bar">
    <a href="/indexes-views" class="btn btn-small">&larr; All views</a>
    <div>
        <button class="btn btn-small" title="{refresh_sql}" onclick="refreshView()">Refresh Materialized</button>
        <button class="btn btn-small btn-primary" onclick="showModal('view-insert-modal')">Insert</button>
        <button class="btn btn-small" onclick="showModal('view-update-modal')">Update</button>
        <button class="btn btn-small btn-danger" onclick="showModal('view-delete-modal')">Delete</button>
    </div>
</div>

<div class="card">
    <div class="card-header"><h3>Filter</h3></div>
    <form method="get" action="/views/{view}" class="inline-form">
        <div class="form-row">
            <div class="form-group">
                <label for="filter-condition">Condition</label>
                <input type="text" id="filter-condition" name="condition" value="{condition}"
                       placeholder="age &gt; 30">
            </div>
            <div class="form-group">
                <label for="join-table">Join table</label>
                <input type="text" id="join-table" name="join_table" value="{join_table}">
            </div>
            <div class="form-group">
                <label for="join-condition">Join on</label>
                <input type="text" id="join-condition" name="join_condition" value="{join_condition}"
                       placeholder="v.id = t.v_id">
            </div>
        </div>
        <div class="form-actions">
            <button type="submit" class="btn btn-primary">Apply</button>
            <a href="/views/{view}" class="btn">Reset</a>
        </div>
    </form>
</div>

<div class="card">
    <div class="card-header"><h3>Rows</h3></div>
    {data_table}
</div>

<div id="view-insert-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Insert Through View</h3>
            <button class="close-btn" onclick="hideModal('view-insert-modal')">&times;</button>
        </div>
        <form onsubmit="viewInsert(event)">
            <div class="form-group">
                <label for="view-insert-values">Values (JSON array, in column order)</label>
                <textarea id="view-insert-values" rows="2" placeholder='[1, "John"]' required></textarea>
            </div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('view-insert-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Insert</button>
            </div>
        </form>
    </div>
</div>

<div id="view-update-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Update Through View</h3>
            <button class="close-btn" onclick="hideModal('view-update-modal')">&times;</button>
        </div>
        <form onsubmit="viewUpdate(event)">
            <div class="form-group">
                <label for="view-set-clause">Set clause</label>
                <input type="text" id="view-set-clause" placeholder="name = 'Ann'" required>
            </div>
            <div class="form-group">
                <label for="view-update-condition">Condition</label>
                <input type="text" id="view-update-condition" placeholder="id = 1" required>
            </div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('view-update-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Update</button>
            </div>
        </form>
    </div>
</div>

<div id="view-delete-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Delete Through View</h3>
            <button class="close-btn" onclick="hideModal('view-delete-modal')">&times;</button>
        </div>
        <form onsubmit="viewDelete(event)">
            <div class="form-group">
                <label for="view-delete-condition">Condition</label>
                <input type="text" id="view-delete-condition" placeholder="id = 1" required>
            </div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('view-delete-modal')">Cancel</button>
                <button type="submit" class="btn btn-danger">Delete</button>
            </div>
        </form>
    </div>
</div>
<script>{script}</script>
"#,
            view = escaped,
            refresh_sql = html_escape(&sql::refresh_view(view)),
            condition = html_escape(condition.unwrap_or("")),
            join_table = html_escape(join_table.unwrap_or("")),
            join_condition = html_escape(join_condition.unwrap_or("")),
            data_table = data_table,
            script = VIEW_DETAIL_JS,
        );

        self.layout(&format!("View: {}", view), &content, "indexes-views")
    }

    /// Render the sequence listing page.
    pub fn sequences(&self, sequences: &[String]) -> String {
        let rows: Vec<String> = sequences
            .iter()
            .map(|name| {
                let escaped = html_escape(name);
                format!(
                    r#"<tr>
                        <td><a href="/sequences/{name}">{name}</a></td>
                        <td class="actions-cell">
                            <a href="/sequences/{name}" class="btn btn-small">Inspect</a>
                            <button class="btn btn-small btn-danger" data-sequence="{name}"
                                    title="{drop_sql}" onclick="dropSequence(this.dataset.sequence)">Drop</button>
                        </td>
                    </tr>"#,
                    name = escaped,
                    drop_sql = html_escape(&sql::drop_sequence(name)),
                )
            })
            .collect();

        let empty_state = if sequences.is_empty() {
            r#"<tr><td colspan="2"><div class="empty-state"><div class="empty-state-title">No sequences</div></div></td></tr>"#
        } else {
            ""
        };

        let content = format!(
            r#"
<div class="actions-bar">
    <div class="search-wrapper">
        <input type="text" class="search-input" placeholder="Search sequences..."
               onkeyup="filterTable('sequences-table', this.value)">
    </div>
    <div>
        <button class="btn" onclick="showModal('reset-sequence-modal')">Reset From Table</button>
        <button class="btn btn-primary" onclick="showModal('create-sequence-modal')">Create Sequence</button>
    </div>
</div>

<div class="card">
    <table class="data-table">
        <thead><tr><th>Name</th><th>Actions</th></tr></thead>
        <tbody id="sequences-table">{rows}{empty}</tbody>
    </table>
</div>

<div id="create-sequence-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Create Sequence</h3>
            <button class="close-btn" onclick="hideModal('create-sequence-modal')">&times;</button>
        </div>
        <form onsubmit="createSequence(event)">
            <div class="form-group">
                <label for="seq-name">Name</label>
                <input type="text" id="seq-name" required placeholder="order_id_seq">
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="seq-start">Start</label>
                    <input type="number" id="seq-start" value="1">
                </div>
                <div class="form-group">
                    <label for="seq-increment">Increment</label>
                    <input type="number" id="seq-increment" value="1">
                </div>
                <div class="form-group">
                    <label for="seq-min">Min</label>
                    <input type="number" id="seq-min">
                </div>
                <div class="form-group">
                    <label for="seq-max">Max</label>
                    <input type="number" id="seq-max">
                </div>
                <div class="form-group">
                    <label for="seq-cache">Cache</label>
                    <input type="number" id="seq-cache">
                </div>
            </div>
            <div class="form-group checkbox-group">
                <label><input type="checkbox" id="seq-cycle"> CYCLE</label>
            </div>
            <div class="sql-hint"><code>{create_sql}</code></div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('create-sequence-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Create</button>
            </div>
        </form>
    </div>
</div>

<div id="reset-sequence-modal" class="modal hidden">
    <div class="modal-content">
        <div class="modal-header">
            <h3>Reset Sequence From Table</h3>
            <button class="close-btn" onclick="hideModal('reset-sequence-modal')">&times;</button>
        </div>
        <p>Re-aligns a serial column's sequence with the current maximum of the column.</p>
        <form onsubmit="resetSequence(event)">
            <div class="form-row">
                <div class="form-group">
                    <label for="reset-table">Table</label>
                    <input type="text" id="reset-table" required>
                </div>
                <div class="form-group">
                    <label for="reset-column">Column</label>
                    <input type="text" id="reset-column" required>
                </div>
            </div>
            <div class="form-actions">
                <button type="button" class="btn" onclick="hideModal('reset-sequence-modal')">Cancel</button>
                <button type="submit" class="btn btn-primary">Reset</button>
            </div>
        </form>
    </div>
</div>
<script>{script}</script>
"#,
            rows = rows.join("\n"),
            empty = empty_state,
            create_sql = html_escape(&sql::create_sequence(
                "sequence_name",
                Some(1),
                Some(1),
                None,
                None,
                None,
                false
            )),
            script = SEQUENCES_JS,
        );

        self.layout("Sequences", &content, "sequences")
    }

    /// Render one sequence's inspect page with its state row and value forms.
    pub fn sequence_detail(&self, sequence: &str, details: &Value) -> String {
        let escaped = html_escape(sequence);

        let detail_rows: Vec<String> = details
            .as_object()
            .map(|object| {
                object
                    .iter()
                    .map(|(key, value)| {
                        format!(
                            r#"<tr><td>{key}</td><td>{value}</td></tr>"#,
                            key = html_escape(key),
                            value = render_cell(value),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        let content = format!(
            r#"
<div id="sequence-page" data-sequence="{sequence}"></div>

<div class="actions-bar">
    <a href="/sequences" class="btn btn-small">&larr; All sequences</a>
    <div>
        <button class="btn btn-small btn-primary" onclick="nextValue()">Next Value</button>
        <button class="btn btn-small" onclick="currentValue()">Current Value</button>
        <button class="btn btn-small btn-danger" title="{drop_sql}" onclick="dropThisSequence()">Drop</button>
    </div>
</div>

<div class="result-box hidden" id="sequence-result"></div>

<div class="card">
    <div class="card-header"><h3>State</h3></div>
    <table class="data-table">
        <thead><tr><th>Field</th><th>Value</th></tr></thead>
        <tbody>{detail_rows}</tbody>
    </table>
</div>

<div class="card">
    <div class="card-header"><h3>Set Value</h3></div>
    <form onsubmit="setValue(event)" class="inline-form">
        <div class="form-row">
            <div class="form-group">
                <label for="set-value">Value</label>
                <input type="number" id="set-value" required>
            </div>
        </div>
        <div class="form-actions"><button type="submit" class="btn btn-primary">Set</button></div>
    </form>
</div>

<div class="card">
    <div class="card-header"><h3>Restart</h3></div>
    <form onsubmit="restartSequence(event)" class="inline-form">
        <div class="form-row">
            <div class="form-group">
                <label for="restart-with">Restart with</label>
                <input type="number" id="restart-with" required>
            </div>
        </div>
        <div class="form-actions"><button type="submit" class="btn btn-primary">Restart</button></div>
    </form>
</div>

<div class="card">
    <div class="card-header"><h3>Associate With Column</h3></div>
    <p>Ties the sequence's lifetime to a table column (<code>OWNED BY</code>).</p>
    <form onsubmit="associateSequence(event)" class="inline-form">
        <div class="form-row">
            <div class="form-group">
                <label for="assoc-table">Table</label>
                <input type="text" id="assoc-table" required>
            </div>
            <div class="form-group">
                <label for="assoc-column">Column</label>
                <input type="text" id="assoc-column" required>
            </div>
        </div>
        <div class="form-actions"><button type="submit" class="btn btn-primary">Associate</button></div>
    </form>
</div>
<script>{script}</script>
"#,
            sequence = escaped,
            drop_sql = html_escape(&sql::drop_sequence(sequence)),
            detail_rows = detail_rows.join("\n"),
            script = SEQUENCE_DETAIL_JS,
        );

        self.layout(&format!("Sequence: {}", sequence), &content, "sequences")
    }

    /// Render the transaction control page. All actions go through the
    /// `/api/transactions/{verb}` proxy; results land in the result box.
    pub fn transactions(&self) -> String {
        let content = format!("{}<script>{}</script>", TRANSACTIONS_HTML, TRANSACTIONS_JS);
        self.layout("Transactions", &content, "transactions")
    }

    /// Render an error page.
    pub fn error_page(&self, title: &str, message: &str) -> String {
        let content = format!(
            r#"
<div class="error-container">
    <h2>{title}</h2>
    <p>{message}</p>
    <a href="/" class="btn btn-primary">Go to Tables</a>
</div>
"#,
            title = html_escape(title),
            message = html_escape(message),
        );

        self.layout(title, &content, "")
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Shared rendering helpers
// ---------------------------------------------------------------------------

/// Render a row set as a table. Headers come from the keys of the first row
/// object; rows are JSON objects straight from the backend.
fn result_table(rows: &[Value], empty_message: &str) -> String {
    let Some(first) = rows.first().and_then(|row| row.as_object()) else {
        return format!(
            r#"<div class="empty-state"><div class="empty-state-title">{}</div></div>"#,
            html_escape(empty_message)
        );
    };

    let columns: Vec<&String> = first.keys().collect();
    let header: String = columns
        .iter()
        .map(|column| format!("<th>{}</th>", html_escape(column)))
        .collect();

    let body: Vec<String> = rows
        .iter()
        .map(|row| {
            let cells: String = columns
                .iter()
                .map(|column| {
                    let cell = row
                        .get(column.as_str())
                        .map(render_cell)
                        .unwrap_or_else(|| r#"<span class="muted">NULL</span>"#.to_string());
                    format!("<td>{}</td>", cell)
                })
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    format!(
        r#"<table class="data-table"><thead><tr>{header}</tr></thead><tbody>{body}</tbody></table>"#,
        header = header,
        body = body.join("\n"),
    )
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => r#"<span class="muted">NULL</span>"#.to_string(),
        Value::String(s) => html_escape(s),
        other => html_escape(&other.to_string()),
    }
}

fn selected(current: &str, value: &str) -> &'static str {
    if current == value {
        " selected"
    } else {
        ""
    }
}

fn operator_select(current: &str) -> String {
    ["=", ">", "<", ">=", "<=", "LIKE"]
        .iter()
        .map(|op| {
            format!(
                r#"<option value="{op}"{sel}>{op}</option>"#,
                op = html_escape(op),
                sel = selected(current, op),
            )
        })
        .collect()
}

fn join_select(current: &str) -> String {
    let mut options = vec![r#"<option value=""></option>"#.to_string()];
    options.extend(
        ["INNER JOIN", "LEFT JOIN", "RIGHT JOIN", "FULL JOIN", "CROSS JOIN"]
            .iter()
            .map(|join| {
                format!(
                    r#"<option value="{join}"{sel}>{join}</option>"#,
                    join = join,
                    sel = selected(current, join),
                )
            }),
    );
    options.join("")
}

fn aggregate_select(current: &str) -> String {
    let mut options = vec![r#"<option value=""></option>"#.to_string()];
    options.extend(["SUM", "AVG", "MIN", "MAX", "COUNT"].iter().map(|agg| {
        format!(
            r#"<option value="{agg}"{sel}>{agg}</option>"#,
            agg = agg,
            sel = selected(current, agg),
        )
    }));
    options.join("")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ---------------------------------------------------------------------------
// Page scripts
// ---------------------------------------------------------------------------

const TABLES_JS: &str = r#"
function createTable(event) {
    event.preventDefault();
    const name = document.getElementById('table-name').value.trim();
    fetch('/api/tables', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({ table_name: name })
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => { hideModal('create-table-modal'); location.reload(); })
    .catch(err => alert('Error: ' + err.message));
}

function dropTable(name) {
    if (!confirm('Drop table "' + name + '" and all of its rows?')) return;
    fetch('/api/tables/' + encodeURIComponent(name), { method: 'DELETE' })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}
"#;

const TABLE_DETAIL_JS: &str = r#"
const TABLE = document.getElementById('table-page').dataset.table;

function parseJsonField(id, label) {
    const raw = document.getElementById(id).value;
    try {
        return JSON.parse(raw);
    } catch (e) {
        alert(label + ' must be valid JSON');
        return null;
    }
}

function insertRow(event) {
    event.preventDefault();
    const row = parseJsonField('insert-json', 'Row values');
    if (row === null) return;
    fetch('/api/tables/' + encodeURIComponent(TABLE) + '/rows', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify(row)
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function updateRows(event) {
    event.preventDefault();
    const condition = parseJsonField('update-condition', 'Match condition');
    const values = parseJsonField('update-values', 'New values');
    if (condition === null || values === null) return;
    fetch('/api/tables/' + encodeURIComponent(TABLE) + '/rows', {
        method: 'PUT',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({ condition: condition, new_values: values })
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function deleteRows(event) {
    event.preventDefault();
    const condition = parseJsonField('delete-condition', 'Match condition');
    if (condition === null) return;
    fetch('/api/tables/' + encodeURIComponent(TABLE) + '/rows', {
        method: 'DELETE',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({ condition: condition })
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function parseColumnLines(id) {
    return document.getElementById(id).value
        .split('\n')
        .map(line => line.trim())
        .filter(line => line.length > 0)
        .map(line => {
            const space = line.indexOf(' ');
            if (space === -1) return { column_name: line, column_type: '' };
            return {
                column_name: line.slice(0, space).trim(),
                column_type: line.slice(space + 1).trim()
            };
        });
}

function modifyTable(event) {
    event.preventDefault();
    const body = {
        add_columns: parseColumnLines('add-columns'),
        drop_columns: document.getElementById('drop-columns').value
            .split('\n').map(l => l.trim()).filter(l => l.length > 0),
        modify_columns: parseColumnLines('alter-columns')
    };
    fetch('/api/tables/' + encodeURIComponent(TABLE), {
        method: 'PUT',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify(body)
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function dropThisTable() {
    if (!confirm('Drop table "' + TABLE + '" and all of its rows?')) return;
    fetch('/api/tables/' + encodeURIComponent(TABLE), { method: 'DELETE' })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => { window.location.href = '/'; })
    .catch(err => alert('Error: ' + err.message));
}
"#;

const INDEXES_VIEWS_JS: &str = r#"
function createIndex(event) {
    event.preventDefault();
    const body = {
        index_name: document.getElementById('index-name').value.trim(),
        table_name: document.getElementById('index-table').value.trim(),
        column_name: document.getElementById('index-column').value.trim(),
        index_type: document.getElementById('index-type').value
    };
    fetch('/api/indexes', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify(body)
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function dropIndex(name) {
    if (!confirm('Drop index "' + name + '"?')) return;
    fetch('/api/indexes/' + encodeURIComponent(name), { method: 'DELETE' })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function createView(event) {
    event.preventDefault();
    const body = {
        view_type: document.getElementById('view-type').value,
        view_name: document.getElementById('view-name').value.trim(),
        definition: document.getElementById('view-definition').value.trim(),
        with_check_option: document.getElementById('view-with-check').checked
    };
    fetch('/api/views', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify(body)
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function openDropView(name) {
    document.getElementById('drop-view-name').value = name;
    showModal('drop-view-modal');
}

function dropView(event) {
    event.preventDefault();
    const name = document.getElementById('drop-view-name').value.trim();
    const kind = document.getElementById('drop-view-type').value;
    fetch('/api/views/' + encodeURIComponent(name) + '?view_type=' + kind, { method: 'DELETE' })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function openRenameView(name) {
    document.getElementById('rename-old').value = name;
    showModal('rename-view-modal');
}

function renameView(event) {
    event.preventDefault();
    const oldName = document.getElementById('rename-old').value.trim();
    const newName = document.getElementById('rename-new').value.trim();
    fetch('/api/views/' + encodeURIComponent(oldName) + '/rename', {
        method: 'PUT',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({ new_name: newName })
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function openModifyView(name) {
    document.getElementById('modify-view-name').value = name;
    showModal('modify-view-modal');
}

function modifyView(event) {
    event.preventDefault();
    const name = document.getElementById('modify-view-name').value.trim();
    const query = document.getElementById('modify-view-query').value.trim();
    fetch('/api/views/' + encodeURIComponent(name) + '/definition', {
        method: 'PUT',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({ select_query: query })
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}
"#;

const VIEW_DETAIL_JS: &str = r#"
const VIEW = document.getElementById('view-page').dataset.view;

function viewApi(path, options) {
    return fetch('/api/views/' + encodeURIComponent(VIEW) + path, options)
        .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); });
}

function refreshView() {
    viewApi('/refresh', { method: 'POST' })
        .then(() => location.reload())
        .catch(err => alert('Error: ' + err.message));
}

function viewInsert(event) {
    event.preventDefault();
    let values;
    try {
        values = JSON.parse(document.getElementById('view-insert-values').value);
    } catch (e) {
        alert('Values must be a valid JSON array');
        return;
    }
    viewApi('/rows', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({ values: values })
    })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function viewUpdate(event) {
    event.preventDefault();
    viewApi('/rows', {
        method: 'PUT',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({
            set_clause: document.getElementById('view-set-clause').value,
            condition: document.getElementById('view-update-condition').value
        })
    })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function viewDelete(event) {
    event.preventDefault();
    viewApi('/rows', {
        method: 'DELETE',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({ condition: document.getElementById('view-delete-condition').value })
    })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}
"#;

const SEQUENCES_JS: &str = r#"
function createSequence(event) {
    event.preventDefault();
    const intOrNull = id => {
        const raw = document.getElementById(id).value.trim();
        return raw === '' ? null : parseInt(raw, 10);
    };
    const body = {
        name: document.getElementById('seq-name').value.trim(),
        start: intOrNull('seq-start'),
        increment: intOrNull('seq-increment'),
        min_value: intOrNull('seq-min'),
        max_value: intOrNull('seq-max'),
        cache: intOrNull('seq-cache'),
        cycle: document.getElementById('seq-cycle').checked
    };
    fetch('/api/sequences', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify(body)
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function dropSequence(name) {
    if (!confirm('Drop sequence "' + name + '"?')) return;
    fetch('/api/sequences/' + encodeURIComponent(name), { method: 'DELETE' })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(() => location.reload())
    .catch(err => alert('Error: ' + err.message));
}

function resetSequence(event) {
    event.preventDefault();
    fetch('/api/sequences/reset', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({
            table: document.getElementById('reset-table').value.trim(),
            column: document.getElementById('reset-column').value.trim()
        })
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(body => alert('New sequence value: ' + body.new_sequence_value))
    .catch(err => alert('Error: ' + err.message));
}
"#;

const SEQUENCE_DETAIL_JS: &str = r#"
const SEQUENCE = document.getElementById('sequence-page').dataset.sequence;

function sequenceApi(path, options) {
    return fetch('/api/sequences/' + encodeURIComponent(SEQUENCE) + path, options)
        .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); });
}

function showResult(text) {
    const box = document.getElementById('sequence-result');
    box.textContent = text;
    box.classList.remove('hidden');
}

function nextValue() {
    sequenceApi('/next')
        .then(body => showResult('nextval: ' + body.next_value))
        .catch(err => showResult('Error: ' + err.message));
}

function currentValue() {
    sequenceApi('/current')
        .then(body => showResult('currval: ' + body.current_value))
        .catch(err => showResult('Error: ' + err.message));
}

function setValue(event) {
    event.preventDefault();
    const value = parseInt(document.getElementById('set-value').value, 10);
    sequenceApi('/value', {
        method: 'PUT',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({ value: value })
    })
    .then(body => { showResult('setval: ' + body.new_value); setTimeout(() => location.reload(), 600); })
    .catch(err => showResult('Error: ' + err.message));
}

function restartSequence(event) {
    event.preventDefault();
    const startWith = parseInt(document.getElementById('restart-with').value, 10);
    sequenceApi('/restart', {
        method: 'PUT',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({ start_with: startWith })
    })
    .then(body => { showResult(body.message); setTimeout(() => location.reload(), 600); })
    .catch(err => showResult('Error: ' + err.message));
}

function associateSequence(event) {
    event.preventDefault();
    sequenceApi('/associate', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({
            table: document.getElementById('assoc-table').value.trim(),
            column: document.getElementById('assoc-column').value.trim()
        })
    })
    .then(body => showResult(body.message))
    .catch(err => showResult('Error: ' + err.message));
}

function dropThisSequence() {
    if (!confirm('Drop sequence "' + SEQUENCE + '"?')) return;
    sequenceApi('', { method: 'DELETE' })
        .then(() => { window.location.href = '/sequences'; })
        .catch(err => showResult('Error: ' + err.message));
}
"#;

const TRANSACTIONS_HTML: &str = r#"
<pre class="result-box hidden" id="txn-result"></pre>

<div class="card">
    <div class="card-header"><h3>Transaction Control</h3></div>
    <div class="button-row">
        <button class="btn btn-primary" onclick="runVerb('begin')">BEGIN</button>
        <button class="btn" onclick="runVerb('commit')">COMMIT</button>
        <button class="btn" onclick="runVerb('rollback')">ROLLBACK</button>
        <button class="btn" onclick="runVerb('end')">END</button>
        <button class="btn" onclick="runVerb('abort')">ABORT</button>
    </div>
</div>

<div class="card">
    <div class="card-header"><h3>Savepoints</h3></div>
    <div class="form-row">
        <div class="form-group">
            <label for="savepoint-name">Savepoint name</label>
            <input type="text" id="savepoint-name" placeholder="sp1">
        </div>
    </div>
    <div class="button-row">
        <button class="btn btn-primary" onclick="runSavepoint('savepoint')">SAVEPOINT</button>
        <button class="btn" onclick="runSavepoint('rollback_to_savepoint')">ROLLBACK TO</button>
        <button class="btn" onclick="runSavepoint('release_savepoint')">RELEASE</button>
    </div>
</div>

<div class="card">
    <div class="card-header"><h3>Isolation Level</h3></div>
    <div class="form-row">
        <div class="form-group">
            <label for="isolation-level">Level</label>
            <select id="isolation-level">
                <option value="READ UNCOMMITTED">READ UNCOMMITTED</option>
                <option value="READ COMMITTED" selected>READ COMMITTED</option>
                <option value="REPEATABLE READ">REPEATABLE READ</option>
                <option value="SERIALIZABLE">SERIALIZABLE</option>
            </select>
        </div>
    </div>
    <div class="button-row">
        <button class="btn btn-primary" onclick="runIsolation('set_transaction_isolation')">Set For Transaction</button>
        <button class="btn" onclick="runIsolation('set_session_isolation')">Set For Session</button>
    </div>
</div>

<div class="card">
    <div class="card-header"><h3>Locks &amp; Snapshots</h3></div>
    <div class="form-row">
        <div class="form-group">
            <label for="lock-table-name">Table to lock</label>
            <input type="text" id="lock-table-name">
        </div>
        <div class="form-group">
            <label for="snapshot-id">Snapshot id</label>
            <input type="text" id="snapshot-id" placeholder="00000003-0000001B-1">
        </div>
    </div>
    <div class="button-row">
        <button class="btn btn-primary" onclick="runLockTable()">LOCK TABLE</button>
        <button class="btn" onclick="runSetSnapshot()">SET SNAPSHOT</button>
        <button class="btn" onclick="runVerb('export_snapshot')">EXPORT SNAPSHOT</button>
    </div>
</div>

<div class="card">
    <div class="card-header"><h3>Two-Phase Commit</h3></div>
    <div class="form-row">
        <div class="form-group">
            <label for="prepared-id">Transaction id</label>
            <input type="text" id="prepared-id" placeholder="txn_1">
        </div>
    </div>
    <div class="button-row">
        <button class="btn btn-primary" onclick="runPrepared('prepare_transaction')">PREPARE</button>
        <button class="btn" onclick="runPrepared('commit_prepared')">COMMIT PREPARED</button>
        <button class="btn" onclick="runPrepared('rollback_prepared')">ROLLBACK PREPARED</button>
    </div>
</div>

<div class="card">
    <div class="card-header"><h3>Notifications</h3></div>
    <div class="form-row">
        <div class="form-group">
            <label for="channel-name">Channel</label>
            <input type="text" id="channel-name" placeholder="events">
        </div>
        <div class="form-group">
            <label for="notify-message">Message (NOTIFY only)</label>
            <input type="text" id="notify-message">
        </div>
    </div>
    <div class="button-row">
        <button class="btn btn-primary" onclick="runChannel('listen')">LISTEN</button>
        <button class="btn" onclick="runChannel('notify')">NOTIFY</button>
        <button class="btn" onclick="runChannel('unlisten')">UNLISTEN</button>
    </div>
</div>

<div class="card">
    <div class="card-header"><h3>Advisory Locks</h3></div>
    <div class="form-row">
        <div class="form-group">
            <label for="advisory-key">Lock key (integer)</label>
            <input type="number" id="advisory-key" placeholder="42">
        </div>
    </div>
    <div class="button-row">
        <button class="btn btn-primary" onclick="runAdvisory('advisory_lock')">LOCK</button>
        <button class="btn" onclick="runAdvisory('advisory_unlock')">UNLOCK</button>
        <button class="btn" onclick="runAdvisory('advisory_xact_lock')">XACT LOCK</button>
        <button class="btn" onclick="runVerb('advisory_unlock_all')">UNLOCK ALL</button>
    </div>
</div>
"#;

const TRANSACTIONS_JS: &str = r#"
function postVerb(verb, payload) {
    return fetch('/api/transactions/' + verb, {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify(payload || {})
    })
    .then(r => { if (!r.ok) return r.text().then(t => { throw new Error(t); }); return r.json(); })
    .then(body => showTxnResult(body.message))
    .catch(err => showTxnResult('Error: ' + err.message));
}

function showTxnResult(text) {
    const box = document.getElementById('txn-result');
    box.textContent = text;
    box.classList.remove('hidden');
}

function runVerb(verb) {
    postVerb(verb);
}

function runSavepoint(verb) {
    const name = document.getElementById('savepoint-name').value.trim();
    if (!name) { showTxnResult('Error: savepoint name is required'); return; }
    postVerb(verb, { savepoint_name: name });
}

function runIsolation(verb) {
    postVerb(verb, { isolation_level: document.getElementById('isolation-level').value });
}

function runLockTable() {
    const table = document.getElementById('lock-table-name').value.trim();
    if (!table) { showTxnResult('Error: table name is required'); return; }
    postVerb('lock_table', { table_name: table });
}

function runSetSnapshot() {
    const id = document.getElementById('snapshot-id').value.trim();
    if (!id) { showTxnResult('Error: snapshot id is required'); return; }
    postVerb('set_snapshot', { snapshot_id: id });
}

function runPrepared(verb) {
    const id = document.getElementById('prepared-id').value.trim();
    if (!id) { showTxnResult('Error: transaction id is required'); return; }
    postVerb(verb, { transaction_id: id });
}

function runChannel(verb) {
    const channel = document.getElementById('channel-name').value.trim();
    if (!channel) { showTxnResult('Error: channel name is required'); return; }
    const payload = { channel_name: channel };
    if (verb === 'notify') {
        payload.message = document.getElementById('notify-message').value;
    }
    postVerb(verb, payload);
}

function runAdvisory(verb) {
    const key = parseInt(document.getElementById('advisory-key').value, 10);
    if (isNaN(key)) { showTxnResult('Error: lock key must be an integer'); return; }
    postVerb(verb, { key: key });
}
"#;

// ---------------------------------------------------------------------------
// Shared assets
// ---------------------------------------------------------------------------

const CSS: &str = r#"
:root {
    --bg-primary: #0f1419;
    --bg-secondary: #171d24;
    --bg-card: #1c242e;
    --border: #2a3541;
    --text-primary: #e6e9ec;
    --text-secondary: #8b97a4;
    --accent: #3b82f6;
    --accent-hover: #2563eb;
    --danger: #ef4444;
    --danger-hover: #dc2626;
    --success: #22c55e;
}

* { margin: 0; padding: 0; box-sizing: border-box; }

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
    font-size: 14px;
}

.container { display: flex; min-height: 100vh; }

.sidebar {
    width: 220px;
    background: var(--bg-secondary);
    border-right: 1px solid var(--border);
    padding: 20px 0;
    flex-shrink: 0;
}

.logo { padding: 0 20px 20px; border-bottom: 1px solid var(--border); }
.logo h1 { font-size: 20px; color: var(--accent); }
.logo .subtitle { font-size: 11px; color: var(--text-secondary); }

.nav-links { display: flex; flex-direction: column; padding-top: 12px; }
.nav-link {
    padding: 10px 20px;
    color: var(--text-secondary);
    text-decoration: none;
    border-left: 3px solid transparent;
}
.nav-link:hover { color: var(--text-primary); background: var(--bg-card); }
.nav-link.active {
    color: var(--text-primary);
    background: var(--bg-card);
    border-left-color: var(--accent);
}

.content { flex: 1; display: flex; flex-direction: column; min-width: 0; }
.header {
    padding: 16px 24px;
    border-bottom: 1px solid var(--border);
    background: var(--bg-secondary);
}
.main-content { padding: 24px; }

.card {
    background: var(--bg-card);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 16px;
    margin-bottom: 20px;
}
.card-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 12px;
}
.card p { color: var(--text-secondary); margin-bottom: 12px; }
.danger-zone { border-color: var(--danger); }

.actions-bar {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 16px;
    gap: 12px;
}
.actions-cell { white-space: nowrap; }

.search-input {
    background: var(--bg-card);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 8px 12px;
    color: var(--text-primary);
    width: 260px;
}

.data-table { width: 100%; border-collapse: collapse; }
.data-table th {
    text-align: left;
    padding: 8px 12px;
    color: var(--text-secondary);
    font-weight: 500;
    border-bottom: 1px solid var(--border);
}
.data-table td { padding: 8px 12px; border-bottom: 1px solid var(--border); }
.data-table tr:last-child td { border-bottom: none; }
.data-table a { color: var(--accent); text-decoration: none; }
.data-table a:hover { text-decoration: underline; }

.truncate {
    display: inline-block;
    max-width: 420px;
    overflow: hidden;
    text-overflow: ellipsis;
    white-space: nowrap;
    vertical-align: bottom;
}

.btn {
    background: var(--bg-secondary);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 8px 14px;
    color: var(--text-primary);
    cursor: pointer;
    font-size: 13px;
    text-decoration: none;
    display: inline-block;
}
.btn:hover { border-color: var(--accent); }
.btn-primary { background: var(--accent); border-color: var(--accent); }
.btn-primary:hover { background: var(--accent-hover); }
.btn-danger { background: transparent; border-color: var(--danger); color: var(--danger); }
.btn-danger:hover { background: var(--danger); color: #fff; }
.btn-small { padding: 4px 10px; font-size: 12px; }

.modal {
    position: fixed;
    inset: 0;
    background: rgba(0, 0, 0, 0.6);
    display: flex;
    align-items: center;
    justify-content: center;
    z-index: 100;
}
.modal.hidden { display: none; }
.modal-content {
    background: var(--bg-card);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 20px;
    width: 540px;
    max-width: 92vw;
    max-height: 90vh;
    overflow-y: auto;
}
.modal-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 16px;
}
.close-btn {
    background: none;
    border: none;
    color: var(--text-secondary);
    font-size: 20px;
    cursor: pointer;
}

fieldset {
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 12px;
    margin-bottom: 12px;
}
legend { color: var(--text-secondary); padding: 0 6px; font-size: 12px; }

.form-row { display: flex; gap: 12px; flex-wrap: wrap; }
.form-group { margin-bottom: 12px; flex: 1; min-width: 140px; }
.form-group label {
    display: block;
    margin-bottom: 4px;
    color: var(--text-secondary);
    font-size: 12px;
}
.form-group input, .form-group select, .form-group textarea {
    width: 100%;
    background: var(--bg-secondary);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 8px 10px;
    color: var(--text-primary);
    font-family: inherit;
}
.form-group textarea { font-family: ui-monospace, monospace; }
.checkbox-group label { color: var(--text-primary); font-size: 13px; }
.checkbox-group input { width: auto; margin-right: 6px; }
.form-actions {
    display: flex;
    justify-content: flex-end;
    gap: 8px;
    margin-top: 8px;
}

.button-row { display: flex; gap: 8px; flex-wrap: wrap; }

.sql-hint {
    background: var(--bg-primary);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 8px 10px;
    margin-bottom: 12px;
    overflow-x: auto;
}
.sql-hint code { color: var(--success); font-size: 12px; white-space: pre; }

.result-box {
    background: var(--bg-card);
    border: 1px solid var(--success);
    border-radius: 6px;
    padding: 10px 14px;
    margin-bottom: 16px;
    white-space: pre-wrap;
}
.result-box.hidden { display: none; }

.error-banner {
    background: rgba(239, 68, 68, 0.12);
    border: 1px solid var(--danger);
    border-radius: 6px;
    padding: 10px 14px;
    margin-bottom: 16px;
    color: var(--danger);
}

.error-container { text-align: center; padding: 60px 20px; }
.error-container h2 { margin-bottom: 10px; }
.error-container p { color: var(--text-secondary); margin-bottom: 20px; }

.empty-state { text-align: center; padding: 32px 16px; }
.empty-state-title { color: var(--text-primary); font-weight: 500; }
.empty-state-desc { color: var(--text-secondary); font-size: 13px; margin-top: 4px; }

.muted { color: var(--text-secondary); }
code { font-family: ui-monospace, 'SF Mono', Menlo, monospace; }
"#;

const JS: &str = r#"
function showModal(id) {
    const modal = document.getElementById(id);
    if (modal) modal.classList.remove('hidden');
}

function hideModal(id) {
    const modal = document.getElementById(id);
    if (modal) modal.classList.add('hidden');
}

function filterTable(tbodyId, query) {
    const tbody = document.getElementById(tbodyId);
    if (!tbody) return;
    const needle = query.toLowerCase();
    Array.from(tbody.rows).forEach(row => {
        row.style.display = row.textContent.toLowerCase().includes(needle) ? '' : 'none';
    });
}

document.addEventListener('keydown', event => {
    if (event.key === 'Escape') {
        document.querySelectorAll('.modal:not(.hidden)').forEach(m => m.classList.add('hidden'));
    }
});
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_templates_new() {
        let _templates = Templates::new();
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(html_escape(r#"<script>"x"</script>"#), "&lt;script&gt;&quot;x&quot;&lt;/script&gt;");
    }

    #[test]
    fn test_tables_render() {
        let templates = Templates::new();
        let html = templates.tables(&["users".to_string(), "orders".to_string()]);

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("pgDeck"));
        assert!(html.contains("users"));
        assert!(html.contains("/tables/orders"));
        assert!(html.contains("Create Table"));
    }

    #[test]
    fn test_tables_empty_state() {
        let templates = Templates::new();
        let html = templates.tables(&[]);
        assert!(html.contains("No tables yet"));
    }

    #[test]
    fn test_table_detail_render() {
        let templates = Templates::new();
        let schema = vec![ColumnDef {
            column_name: "id".to_string(),
            column_type: "integer".to_string(),
        }];
        let rows = vec![json!({"id": 1, "name": "John"})];
        let html = templates.table_detail("users", &schema, &rows);

        assert!(html.contains("Table: users"));
        assert!(html.contains("integer"));
        assert!(html.contains("John"));
        assert!(html.contains("DROP TABLE users;"));
    }

    #[test]
    fn test_query_editor_render() {
        let templates = Templates::new();
        let form = SelectForm::default();
        let html = templates.query_editor(&["users".to_string()], &form, None, None);

        assert!(html.contains("Run Query"));
        assert!(html.contains(r#"<option value="users">users</option>"#));
        assert!(html.contains("LIKE"));
        assert!(html.contains("CROSS JOIN"));
        assert!(html.contains("COUNT"));
    }

    #[test]
    fn test_query_editor_result_and_error() {
        let templates = Templates::new();
        let mut form = SelectForm::default();
        form.table = "users".to_string();

        let result = SelectResponse {
            data: vec![json!({"id": 1})],
            query: "SELECT * FROM users".to_string(),
        };
        let html = templates.query_editor(&["users".to_string()], &form, Some(&result), None);
        assert!(html.contains("SELECT * FROM users"));
        assert!(html.contains(r#"<option value="users" selected>"#));

        let html = templates.query_editor(&[], &form, None, Some("syntax error"));
        assert!(html.contains("error-banner"));
        assert!(html.contains("syntax error"));
    }

    #[test]
    fn test_indexes_views_render() {
        let templates = Templates::new();
        let indexes = vec![IndexInfo {
            indexname: "idx_users_email".to_string(),
            tablename: "users".to_string(),
            indexdef: "CREATE INDEX idx_users_email ON users USING btree (email)".to_string(),
        }];
        let views = vec![ViewInfo {
            schemaname: "public".to_string(),
            viewname: "active_users".to_string(),
            definition: "SELECT * FROM users WHERE active".to_string(),
        }];
        let html = templates.indexes_views(&indexes, &views);

        assert!(html.contains("idx_users_email"));
        assert!(html.contains("/views/active_users"));
        assert!(html.contains("spgist"));
        assert!(html.contains("materialized"));
    }

    #[test]
    fn test_view_detail_render() {
        let templates = Templates::new();
        let rows = vec![json!({"id": 1, "name": "Ann"})];
        let html = templates.view_detail("active_users", &rows, Some("age > 30"), None, None);

        assert!(html.contains("View: active_users"));
        assert!(html.contains("age &gt; 30"));
        assert!(html.contains("REFRESH MATERIALIZED VIEW active_users;"));
    }

    #[test]
    fn test_sequences_render() {
        let templates = Templates::new();
        let html = templates.sequences(&["order_id_seq".to_string()]);

        assert!(html.contains("/sequences/order_id_seq"));
        assert!(html.contains("Reset From Table"));
        assert!(html.contains("CREATE SEQUENCE sequence_name"));
    }

    #[test]
    fn test_sequence_detail_render() {
        let templates = Templates::new();
        let details = json!({"last_value": 42, "is_called": true});
        let html = templates.sequence_detail("order_id_seq", &details);

        assert!(html.contains("Sequence: order_id_seq"));
        assert!(html.contains("last_value"));
        assert!(html.contains("42"));
        assert!(html.contains("OWNED BY"));
    }

    #[test]
    fn test_transactions_render() {
        let templates = Templates::new();
        let html = templates.transactions();

        assert!(html.contains("BEGIN"));
        assert!(html.contains("SAVEPOINT"));
        assert!(html.contains("SERIALIZABLE"));
        assert!(html.contains("COMMIT PREPARED"));
        assert!(html.contains("advisory_unlock_all"));
    }

    #[test]
    fn test_error_page_render() {
        let templates = Templates::new();
        let html = templates.error_page("Not Found", "The page was not found");

        assert!(html.contains("Not Found"));
        assert!(html.contains("The page was not found"));
    }

    #[test]
    fn test_result_table_headers_from_first_row() {
        let rows = vec![
            json!({"id": 1, "name": "Ann"}),
            json!({"id": 2, "name": null}),
        ];
        let html = result_table(&rows, "nothing");

        assert!(html.contains("<th>id</th>"));
        assert!(html.contains("<th>name</th>"));
        assert!(html.contains("NULL"));
        assert!(!html.contains("nothing"));
    }

    #[test]
    fn test_result_table_empty_state() {
        let html = result_table(&[], "The query returned no rows");
        assert!(html.contains("The query returned no rows"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_result_table_escapes_values() {
        let rows = vec![json!({"payload": "<script>alert(1)</script>"})];
        let html = result_table(&rows, "");
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
