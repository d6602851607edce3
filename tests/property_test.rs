//! Property-based tests for the query builder and its wire encoding.

use pgdeck::query::{Operator, QuerySpec, SelectForm, WhereClause, WhereCondition};
use proptest::prelude::*;
use serde_json::json;

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

fn operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Eq),
        Just(Operator::Gt),
        Just(Operator::Lt),
        Just(Operator::Ge),
        Just(Operator::Le),
        Just(Operator::Like),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every serialized query carries the full field set, nulls included.
    #[test]
    fn prop_spec_always_serializes_all_fields(table in identifier()) {
        let spec = QuerySpec::all_rows(table);
        let value = serde_json::to_value(&spec).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "table", "columns", "where", "order_by", "order", "limit",
            "offset", "group_by", "having", "distinct", "join", "aggregate",
        ] {
            prop_assert!(object.contains_key(key), "missing key {}", key);
        }
    }

    /// Equality encodes as a bare value; every other operator encodes as an
    /// operator/value pair.
    #[test]
    fn prop_where_encoding_shape(
        column in identifier(),
        value in "[a-zA-Z0-9 ]{0,12}",
        op in operator(),
    ) {
        let clause = WhereClause(vec![WhereCondition::new(
            column.clone(),
            op,
            json!(value.clone()),
        )]);
        let encoded = serde_json::to_value(&clause).unwrap();
        let entry = &encoded[&column];
        if op == Operator::Eq {
            prop_assert_eq!(entry, &json!(value));
        } else {
            prop_assert_eq!(entry, &json!([op.as_str(), value]));
        }
    }

    /// Operators survive a round-trip through their wire names.
    #[test]
    fn prop_operator_round_trip(op in operator()) {
        let parsed: Operator = op.as_str().parse().unwrap();
        prop_assert_eq!(parsed, op);
    }

    /// The builder trims the table name, and a where value without a column
    /// never produces a condition.
    #[test]
    fn prop_form_without_where_column_has_no_where(
        table in identifier(),
        value in "[a-z0-9 ]{0,8}",
    ) {
        let form = SelectForm {
            table: format!("  {}  ", table),
            where_value: value,
            ..Default::default()
        };
        let spec = form.build();
        prop_assert_eq!(spec.table, table);
        prop_assert!(spec.r#where.is_none());
    }

    /// Column lists split on commas and drop the surrounding whitespace.
    #[test]
    fn prop_columns_split(columns in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..5)) {
        let form = SelectForm {
            table: "t".to_string(),
            columns: columns.join(" , "),
            ..Default::default()
        };
        let spec = form.build();
        prop_assert_eq!(spec.columns, Some(columns));
    }

    /// Free-text limit input parses to a number or collapses to null,
    /// never panics, never errors the form.
    #[test]
    fn prop_limit_accepts_arbitrary_text(raw in ".{0,12}") {
        let form = SelectForm {
            table: "t".to_string(),
            limit: raw.clone(),
            ..Default::default()
        };
        let spec = form.build();
        match raw.trim().parse::<i64>() {
            Ok(n) => prop_assert_eq!(spec.limit, Some(n)),
            Err(_) => prop_assert!(spec.limit.is_none()),
        }
    }

    /// An unrecognized operator string falls back to equality encoding.
    #[test]
    fn prop_unknown_operator_falls_back_to_eq(
        column in identifier(),
        junk in "[a-z]{1,6}",
    ) {
        prop_assume!(junk != "like");
        let form = SelectForm {
            table: "t".to_string(),
            where_column: column.clone(),
            where_operator: junk,
            where_value: "x".to_string(),
            ..Default::default()
        };
        let spec = form.build();
        let encoded = serde_json::to_value(&spec).unwrap();
        prop_assert_eq!(&encoded["where"][&column], &json!("x"));
    }

    /// Multiple conditions on distinct columns all land in the encoded map.
    #[test]
    fn prop_all_conditions_encoded(
        columns in prop::collection::btree_set("[a-z][a-z0-9_]{0,8}", 1..5),
        op in operator(),
    ) {
        let conditions: Vec<WhereCondition> = columns
            .iter()
            .map(|column| WhereCondition::new(column.clone(), op, json!(1)))
            .collect();
        let clause = WhereClause(conditions);
        let encoded = serde_json::to_value(&clause).unwrap();
        let object = encoded.as_object().unwrap();
        prop_assert_eq!(object.len(), columns.len());
        for column in &columns {
            prop_assert!(object.contains_key(column));
        }
    }
}
