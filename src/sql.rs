//! Display-only SQL previews.
//!
//! The console shows the SQL equivalent of each DDL form submission in a log
//! panel. These strings are cosmetic: they are never sent anywhere and are
//! not validated, escaped, or guaranteed syntactically safe — the backend
//! builds and executes its own statements from the JSON payload.

/// The fixed starter-table preview shown for the create-table form. The
/// backend creates exactly this shape for a bare `{table_name}` request.
pub fn create_table(table: &str) -> String {
    format!(
        "CREATE TABLE {} (id INTEGER PRIMARY KEY, name VARCHAR(255));",
        table
    )
}

pub fn drop_table(table: &str) -> String {
    format!("DROP TABLE {};", table)
}

/// One statement per requested change, joined with `;\n` and terminated.
/// Returns an empty string when no change was requested.
pub fn alter_table(
    table: &str,
    add_columns: &[(String, String)],
    drop_columns: &[String],
    alter_columns: &[(String, String)],
) -> String {
    let mut statements = Vec::new();
    for (name, column_type) in add_columns {
        statements.push(format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            table, name, column_type
        ));
    }
    for name in drop_columns {
        statements.push(format!("ALTER TABLE {} DROP COLUMN {}", table, name));
    }
    for (name, column_type) in alter_columns {
        statements.push(format!(
            "ALTER TABLE {} ALTER COLUMN {} TYPE {} USING {}::{}",
            table, name, column_type, name, column_type
        ));
    }
    if statements.is_empty() {
        String::new()
    } else {
        format!("{};", statements.join(";\n"))
    }
}

/// `INSERT INTO t (a, b) VALUES ('x', 'y');` — every value is quoted the
/// same way regardless of type, as the form panel always displayed it.
pub fn insert_row(table: &str, pairs: &[(String, String)]) -> String {
    let columns: Vec<&str> = pairs.iter().map(|(c, _)| c.as_str()).collect();
    let values: Vec<String> = pairs.iter().map(|(_, v)| format!("'{}'", v)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        table,
        columns.join(", "),
        values.join(", ")
    )
}

pub fn update_row(table: &str, sets: &[(String, String)], id: i64) -> String {
    let assignments: Vec<String> = sets
        .iter()
        .map(|(c, v)| format!("{}='{}'", c, v))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = {};",
        table,
        assignments.join(", "),
        id
    )
}

pub fn delete_row(table: &str, id: i64) -> String {
    format!("DELETE FROM {} WHERE id = {};", table, id)
}

pub fn create_index(name: &str, table: &str, method: &str, column: &str) -> String {
    format!("CREATE INDEX {} ON {} USING {} ({});", name, table, method, column)
}

pub fn drop_index(name: &str) -> String {
    format!("DROP INDEX IF EXISTS {};", name)
}

/// `WITH CHECK OPTION` only applies to regular views; the materialized form
/// ignores the flag.
pub fn create_view(name: &str, definition: &str, materialized: bool, with_check: bool) -> String {
    if materialized {
        format!("CREATE MATERIALIZED VIEW {} AS {};", name, definition)
    } else if with_check {
        format!("CREATE VIEW {} AS {} WITH CHECK OPTION;", name, definition)
    } else {
        format!("CREATE VIEW {} AS {};", name, definition)
    }
}

pub fn drop_view(name: &str, materialized: bool) -> String {
    if materialized {
        format!("DROP MATERIALIZED VIEW IF EXISTS {} CASCADE;", name)
    } else {
        format!("DROP VIEW IF EXISTS {} CASCADE;", name)
    }
}

pub fn refresh_view(name: &str) -> String {
    format!("REFRESH MATERIALIZED VIEW {};", name)
}

pub fn rename_view(old_name: &str, new_name: &str) -> String {
    format!("ALTER VIEW {} RENAME TO {};", old_name, new_name)
}

pub fn modify_view(name: &str, select_query: &str) -> String {
    format!("CREATE OR REPLACE VIEW {} AS {};", name, select_query)
}

/// Optional clauses appear only when the form provided them, in the fixed
/// `START WITH / INCREMENT BY / MINVALUE / MAXVALUE / CACHE / CYCLE` order.
#[allow(clippy::too_many_arguments)]
pub fn create_sequence(
    name: &str,
    start: Option<i64>,
    increment: Option<i64>,
    min_value: Option<i64>,
    max_value: Option<i64>,
    cache: Option<i64>,
    cycle: bool,
) -> String {
    let mut sql = format!("CREATE SEQUENCE {}", name);
    if let Some(start) = start {
        sql.push_str(&format!(" START WITH {}", start));
    }
    if let Some(increment) = increment {
        sql.push_str(&format!(" INCREMENT BY {}", increment));
    }
    if let Some(min) = min_value {
        sql.push_str(&format!(" MINVALUE {}", min));
    }
    if let Some(max) = max_value {
        sql.push_str(&format!(" MAXVALUE {}", max));
    }
    if let Some(cache) = cache {
        sql.push_str(&format!(" CACHE {}", cache));
    }
    if cycle {
        sql.push_str(" CYCLE");
    }
    sql.push(';');
    sql
}

pub fn drop_sequence(name: &str) -> String {
    format!("DROP SEQUENCE {};", name)
}
