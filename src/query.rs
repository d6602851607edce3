//! Select query model and payload builder.
//!
//! The query page collects raw form fields and this module normalizes them
//! into the [`QuerySpec`] JSON payload the backend's select endpoint expects.
//! Building a spec is a pure transformation: no network I/O, no identifier
//! validation, no value escaping. Unparseable numeric fields become `None`
//! and are passed through rather than rejected.
//!
//! Filter conditions are held internally as uniform
//! `{column, operator, value}` structs. The backend wire format predates that
//! shape: it expects a `where` *map* in which an equality condition is a bare
//! value and any other condition is a two-element `[operator, value]` array,
//! and it branches on the shape to disambiguate. The conversion lives in one
//! place, the [`WhereClause`] serializer.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Operators and enums
// ---------------------------------------------------------------------------

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "LIKE")]
    Like,
}

impl Operator {
    /// The symbol the backend expects inside an `[operator, value]` pair.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Like => "LIKE",
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" => Ok(Operator::Eq),
            ">" => Ok(Operator::Gt),
            "<" => Ok(Operator::Lt),
            ">=" => Ok(Operator::Ge),
            "<=" => Ok(Operator::Le),
            "LIKE" | "like" => Ok(Operator::Like),
            other => Err(format!("unknown operator: {}", other)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join type of a join clause. The backend expects the full SQL keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    #[serde(rename = "INNER JOIN")]
    Inner,
    #[serde(rename = "LEFT JOIN")]
    Left,
    #[serde(rename = "RIGHT JOIN")]
    Right,
    #[serde(rename = "FULL JOIN")]
    Full,
    #[serde(rename = "CROSS JOIN")]
    Cross,
}

impl FromStr for JoinType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "INNER JOIN" | "INNER" => Ok(JoinType::Inner),
            "LEFT JOIN" | "LEFT" => Ok(JoinType::Left),
            "RIGHT JOIN" | "RIGHT" => Ok(JoinType::Right),
            "FULL JOIN" | "FULL" => Ok(JoinType::Full),
            "CROSS JOIN" | "CROSS" => Ok(JoinType::Cross),
            other => Err(format!("unknown join type: {}", other)),
        }
    }
}

/// Aggregate function applicable to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateFn {
    #[serde(rename = "SUM")]
    Sum,
    #[serde(rename = "AVG")]
    Avg,
    #[serde(rename = "MIN")]
    Min,
    #[serde(rename = "MAX")]
    Max,
    #[serde(rename = "COUNT")]
    Count,
}

impl FromStr for AggregateFn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUM" => Ok(AggregateFn::Sum),
            "AVG" => Ok(AggregateFn::Avg),
            "MIN" => Ok(AggregateFn::Min),
            "MAX" => Ok(AggregateFn::Max),
            "COUNT" => Ok(AggregateFn::Count),
            other => Err(format!("unknown aggregate function: {}", other)),
        }
    }
}

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Where clause
// ---------------------------------------------------------------------------

/// A single filter condition in its uniform internal shape.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereCondition {
    pub column: String,
    pub operator: Operator,
    pub value: serde_json::Value,
}

impl WhereCondition {
    pub fn new(
        column: impl Into<String>,
        operator: Operator,
        value: serde_json::Value,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            value,
        }
    }
}

/// Ordered list of filter conditions.
///
/// Serializes to the backend's legacy map shape: equality conditions become
/// `"column": value`, everything else becomes `"column": [operator, value]`.
/// A value that is itself a two-element array cannot be expressed as an
/// equality match in this encoding; the uniform [`WhereCondition`] model
/// keeps that overload out of everything above the serializer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhereClause(pub Vec<WhereCondition>);

impl WhereClause {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for WhereClause {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for cond in &self.0 {
            match cond.operator {
                Operator::Eq => map.serialize_entry(&cond.column, &cond.value)?,
                op => map.serialize_entry(&cond.column, &(op.as_str(), &cond.value))?,
            }
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// QuerySpec
// ---------------------------------------------------------------------------

/// One join clause of a select query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub join_table: String,
    pub condition: String,
}

/// The payload sent to the backend's select endpoint.
///
/// Built fresh on every submit or table-selection change, never persisted.
/// Optional fields serialize as explicit `null` rather than being omitted;
/// the backend treats `null` columns as "all columns".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySpec {
    pub table: String,
    pub columns: Option<Vec<String>>,
    #[serde(rename = "where")]
    pub r#where: Option<WhereClause>,
    pub order_by: Option<String>,
    pub order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub group_by: Option<String>,
    pub having: Option<String>,
    pub distinct: bool,
    pub join: Vec<JoinClause>,
    pub aggregate: Option<BTreeMap<String, AggregateFn>>,
}

impl QuerySpec {
    /// A spec that selects everything from one table, no modifiers.
    pub fn all_rows(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            r#where: None,
            order_by: None,
            order: None,
            limit: None,
            offset: None,
            group_by: None,
            having: None,
            distinct: false,
            join: Vec::new(),
            aggregate: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Form state -> QuerySpec
// ---------------------------------------------------------------------------

/// Raw state of the query builder form, exactly as the browser submits it.
///
/// Every field defaults so a partially filled form still deserializes; the
/// `distinct` checkbox arrives as a present-or-absent field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectForm {
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub columns: String,
    #[serde(default)]
    pub where_column: String,
    #[serde(default)]
    pub where_operator: String,
    #[serde(default)]
    pub where_value: String,
    #[serde(default)]
    pub join_type: String,
    #[serde(default)]
    pub join_table: String,
    #[serde(default)]
    pub join_condition: String,
    #[serde(default)]
    pub aggregate_column: String,
    #[serde(default)]
    pub aggregate_function: String,
    #[serde(default)]
    pub group_by: String,
    #[serde(default)]
    pub having: String,
    #[serde(default)]
    pub order_by: String,
    #[serde(default)]
    pub order: String,
    #[serde(default)]
    pub limit: String,
    #[serde(default)]
    pub offset: String,
    #[serde(default)]
    pub distinct: Option<String>,
}

impl SelectForm {
    /// Normalize the raw form fields into a [`QuerySpec`].
    ///
    /// Empty `columns` input yields `None` ("all columns") rather than an
    /// empty list. A filter row without a column, a join row missing its
    /// table or condition, and an aggregate row missing its column or
    /// function are all dropped. An operator or join type the form should
    /// not be able to produce falls back to its default rather than failing
    /// the submit.
    pub fn build(&self) -> QuerySpec {
        let conditions = self.where_conditions();
        QuerySpec {
            table: self.table.trim().to_string(),
            columns: parse_columns(&self.columns),
            r#where: if conditions.is_empty() {
                None
            } else {
                Some(WhereClause(conditions))
            },
            order_by: blank_to_none(&self.order_by),
            order: self.order.parse().ok(),
            limit: parse_int(&self.limit),
            offset: parse_int(&self.offset),
            group_by: blank_to_none(&self.group_by),
            having: blank_to_none(&self.having),
            distinct: self.distinct.is_some(),
            join: self.join_clauses(),
            aggregate: self.aggregates(),
        }
    }

    fn where_conditions(&self) -> Vec<WhereCondition> {
        let column = self.where_column.trim();
        if column.is_empty() {
            return Vec::new();
        }
        let operator = self.where_operator.parse().unwrap_or(Operator::Eq);
        vec![WhereCondition::new(
            column,
            operator,
            serde_json::Value::String(self.where_value.clone()),
        )]
    }

    fn join_clauses(&self) -> Vec<JoinClause> {
        let table = self.join_table.trim();
        let condition = self.join_condition.trim();
        if table.is_empty() || condition.is_empty() {
            return Vec::new();
        }
        vec![JoinClause {
            join_type: self.join_type.parse().unwrap_or(JoinType::Inner),
            join_table: table.to_string(),
            condition: condition.to_string(),
        }]
    }

    fn aggregates(&self) -> Option<BTreeMap<String, AggregateFn>> {
        let column = self.aggregate_column.trim();
        let function: Option<AggregateFn> = self.aggregate_function.parse().ok();
        match (column.is_empty(), function) {
            (false, Some(f)) => {
                let mut map = BTreeMap::new();
                map.insert(column.to_string(), f);
                Some(map)
            }
            _ => None,
        }
    }
}

/// `""` means "all columns" and becomes `None`; otherwise split on commas
/// and trim each entry.
fn parse_columns(input: &str) -> Option<Vec<String>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect(),
    )
}

fn blank_to_none(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Lenient numeric parse: anything that is not an integer becomes `None`
/// and is passed through to the backend as `null`.
fn parse_int(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form_for(table: &str) -> SelectForm {
        SelectForm {
            table: table.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_bare_table_builds_all_nulls() {
        let spec = form_for("users").build();
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["table"], "users");
        assert_eq!(value["columns"], json!(null));
        assert_eq!(value["where"], json!(null));
        assert_eq!(value["order_by"], json!(null));
        assert_eq!(value["limit"], json!(null));
        assert_eq!(value["distinct"], json!(false));
        assert_eq!(value["join"], json!([]));
        assert_eq!(value["aggregate"], json!(null));
    }

    #[test]
    fn test_columns_empty_is_none() {
        assert_eq!(parse_columns(""), None);
        assert_eq!(parse_columns("   "), None);
    }

    #[test]
    fn test_columns_split_and_trimmed() {
        assert_eq!(
            parse_columns("a, b"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            parse_columns(" id ,name,  email "),
            Some(vec![
                "id".to_string(),
                "name".to_string(),
                "email".to_string()
            ])
        );
    }

    #[test]
    fn test_equality_condition_serializes_bare() {
        let mut form = form_for("users");
        form.where_column = "name".to_string();
        form.where_operator = "=".to_string();
        form.where_value = "John".to_string();

        let value = serde_json::to_value(form.build()).unwrap();
        assert_eq!(value["where"], json!({"name": "John"}));
    }

    #[test]
    fn test_non_equality_condition_serializes_pair() {
        let mut form = form_for("users");
        form.where_column = "age".to_string();
        form.where_operator = ">".to_string();
        form.where_value = "30".to_string();

        let value = serde_json::to_value(form.build()).unwrap();
        assert_eq!(value["where"], json!({"age": [">", "30"]}));
    }

    #[test]
    fn test_like_condition_serializes_pair() {
        let clause = WhereClause(vec![WhereCondition::new(
            "name",
            Operator::Like,
            json!("Jo%"),
        )]);
        let value = serde_json::to_value(&clause).unwrap();
        assert_eq!(value, json!({"name": ["LIKE", "Jo%"]}));
    }

    #[test]
    fn test_where_without_column_is_dropped() {
        let mut form = form_for("users");
        form.where_operator = ">".to_string();
        form.where_value = "30".to_string();

        let spec = form.build();
        assert!(spec.r#where.is_none());
    }

    #[test]
    fn test_mixed_conditions_share_one_map() {
        let clause = WhereClause(vec![
            WhereCondition::new("name", Operator::Eq, json!("John")),
            WhereCondition::new("age", Operator::Ge, json!(21)),
        ]);
        let value = serde_json::to_value(&clause).unwrap();
        assert_eq!(value, json!({"name": "John", "age": [">=", 21]}));
    }

    #[test]
    fn test_join_missing_field_is_dropped() {
        let mut form = form_for("users");
        form.join_type = "LEFT JOIN".to_string();
        form.join_table = "orders".to_string();
        // no condition
        assert!(form.build().join.is_empty());

        form.join_table = String::new();
        form.join_condition = "users.id = orders.user_id".to_string();
        assert!(form.build().join.is_empty());
    }

    #[test]
    fn test_complete_join_is_kept() {
        let mut form = form_for("users");
        form.join_type = "LEFT JOIN".to_string();
        form.join_table = "orders".to_string();
        form.join_condition = "users.id = orders.user_id".to_string();

        let value = serde_json::to_value(form.build()).unwrap();
        assert_eq!(
            value["join"],
            json!([{
                "join_type": "LEFT JOIN",
                "join_table": "orders",
                "condition": "users.id = orders.user_id"
            }])
        );
    }

    #[test]
    fn test_aggregate_missing_field_is_dropped() {
        let mut form = form_for("sales");
        form.aggregate_column = "amount".to_string();
        assert!(form.build().aggregate.is_none());

        form.aggregate_column = String::new();
        form.aggregate_function = "SUM".to_string();
        assert!(form.build().aggregate.is_none());
    }

    #[test]
    fn test_complete_aggregate_is_kept() {
        let mut form = form_for("sales");
        form.aggregate_column = "amount".to_string();
        form.aggregate_function = "SUM".to_string();

        let value = serde_json::to_value(form.build()).unwrap();
        assert_eq!(value["aggregate"], json!({"amount": "SUM"}));
    }

    #[test]
    fn test_malformed_numbers_become_null() {
        let mut form = form_for("users");
        form.limit = "ten".to_string();
        form.offset = "1.5".to_string();

        let spec = form.build();
        assert_eq!(spec.limit, None);
        assert_eq!(spec.offset, None);
    }

    #[test]
    fn test_valid_numbers_are_parsed() {
        let mut form = form_for("users");
        form.limit = " 25 ".to_string();
        form.offset = "100".to_string();

        let spec = form.build();
        assert_eq!(spec.limit, Some(25));
        assert_eq!(spec.offset, Some(100));
    }

    #[test]
    fn test_distinct_checkbox() {
        let mut form = form_for("users");
        assert!(!form.build().distinct);
        form.distinct = Some("on".to_string());
        assert!(form.build().distinct);
    }

    #[test]
    fn test_order_fields() {
        let mut form = form_for("users");
        form.order_by = "created_at".to_string();
        form.order = "DESC".to_string();

        let value = serde_json::to_value(form.build()).unwrap();
        assert_eq!(value["order_by"], "created_at");
        assert_eq!(value["order"], "DESC");
    }

    #[test]
    fn test_unknown_operator_falls_back_to_equality() {
        let mut form = form_for("users");
        form.where_column = "name".to_string();
        form.where_operator = "<>".to_string();
        form.where_value = "x".to_string();

        let value = serde_json::to_value(form.build()).unwrap();
        assert_eq!(value["where"], json!({"name": "x"}));
    }

    #[test]
    fn test_operator_round_trip() {
        for op in ["=", ">", "<", ">=", "<=", "LIKE"] {
            let parsed: Operator = op.parse().unwrap();
            assert_eq!(parsed.as_str(), op);
        }
    }

    #[test]
    fn test_join_type_wire_names() {
        let value = serde_json::to_value(JoinType::Full).unwrap();
        assert_eq!(value, json!("FULL JOIN"));
        let parsed: JoinType = "CROSS JOIN".parse().unwrap();
        assert_eq!(parsed, JoinType::Cross);
    }

    #[test]
    fn test_form_deserializes_from_urlencoded_subset() {
        // Browsers omit unchecked checkboxes and untouched fields entirely.
        let form: SelectForm =
            serde_urlencoded::from_str("table=users&columns=a%2C+b&limit=10").unwrap();
        assert_eq!(form.table, "users");
        let spec = form.build();
        assert_eq!(
            spec.columns,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(spec.limit, Some(10));
        assert!(!spec.distinct);
    }
}
