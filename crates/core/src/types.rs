//! Core value types for Entiform
//!
//! Rows are untyped records: a JSON object mapping field names to arbitrary
//! values. This module holds the `Row` alias and the small set of value
//! conversions shared by the filter, sort and display code.

use serde_json::{Map, Value};

/// One entity instance: field name -> value
pub type Row = Map<String, Value>;

/// Build a row from a JSON value. Non-objects yield an empty row.
pub fn row_from_value(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

/// Stringify a value for display and text matching.
///
/// Null and absent values become the empty string, strings are used as-is,
/// whole numbers print without a fractional part, arrays are comma-joined
/// and records are rendered as compact JSON.
pub fn value_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => format_number(n),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| value_to_string(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(obj @ Value::Object(_)) => obj.to_string(),
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(f) = n.as_f64() {
        if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 {
            return format!("{}", f as i64);
        }
    }
    n.to_string()
}

/// Numeric view of a value (numbers only)
pub fn value_as_f64(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

/// Whether a value counts as "nothing entered": absent, null, empty string
/// or empty list
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}

/// Equality used for select-style matching.
///
/// Two numbers compare numerically; anything else compares by its string
/// form, so a select option `2` matches the text `"2"` coming from a control.
pub fn values_match(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => value_to_string(Some(a)) == value_to_string(Some(b)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(None), "");
        assert_eq!(value_to_string(Some(&Value::Null)), "");
        assert_eq!(value_to_string(Some(&json!("Alpha"))), "Alpha");
        assert_eq!(value_to_string(Some(&json!(42))), "42");
        assert_eq!(value_to_string(Some(&json!(2.0))), "2");
        assert_eq!(value_to_string(Some(&json!(2.5))), "2.5");
        assert_eq!(value_to_string(Some(&json!(true))), "true");
        assert_eq!(value_to_string(Some(&json!(["a", 1]))), "a,1");
        assert_eq!(value_to_string(Some(&json!({"a": 1}))), r#"{"a":1}"#);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&json!(""))));
        assert!(is_blank(Some(&json!([]))));
        assert!(!is_blank(Some(&json!(false))));
        assert!(!is_blank(Some(&json!(0))));
    }

    #[test]
    fn test_values_match() {
        assert!(values_match(&json!(2), &json!(2.0)));
        assert!(values_match(&json!("L"), &json!("L")));
        assert!(values_match(&json!(2), &json!("2")));
        assert!(!values_match(&json!("l"), &json!("L")));
    }

    #[test]
    fn test_row_from_value() {
        assert_eq!(row_from_value(json!({"id": 1})).len(), 1);
        assert!(row_from_value(json!([1, 2])).is_empty());
    }
}
