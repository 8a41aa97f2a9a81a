//! Conversions between draft values and what the HTML controls carry.
//!
//! Select controls identify options by their index, so numeric and string
//! option values survive the round trip through the DOM unchanged.

use entiform_core::values_match;
use entiform_schema::SelectOption;
use entiform_schema::datetime::{from_datetime_local, to_datetime_local};
use serde_json::Value;

use crate::components::inputs::ChoiceOption;

/// Options keyed by index
pub fn option_choices(options: &[SelectOption]) -> Vec<ChoiceOption> {
    options
        .iter()
        .enumerate()
        .map(|(i, o)| ChoiceOption::new(i.to_string(), o.label.clone()))
        .collect()
}

/// Index of the option holding `value`, or empty
pub fn selected_index(options: &[SelectOption], value: Option<&Value>) -> String {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return String::new();
    };
    options
        .iter()
        .position(|o| values_match(&o.value.to_json(), value))
        .map(|i| i.to_string())
        .unwrap_or_default()
}

/// Indices of the options contained in an array value
pub fn selected_indices(options: &[SelectOption], value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    options
        .iter()
        .enumerate()
        .filter(|(_, o)| {
            let json = o.value.to_json();
            items.iter().any(|item| values_match(&json, item))
        })
        .map(|(i, _)| i.to_string())
        .collect()
}

/// The option value at an index string
pub fn option_at(options: &[SelectOption], index: &str) -> Option<Value> {
    let i: usize = index.parse().ok()?;
    options.get(i).map(|o| o.value.to_json())
}

/// Option values for a list of index strings
pub fn options_at(options: &[SelectOption], indices: &[String]) -> Vec<Value> {
    indices.iter().filter_map(|i| option_at(options, i)).collect()
}

/// A number as JSON; whole numbers stay integers
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Text for the JSON editor: strings as typed, other values pretty-printed
pub fn json_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}

/// Stored instant as a `datetime-local` input value
pub fn date_input_value(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .and_then(to_datetime_local)
        .unwrap_or_default()
}

/// `datetime-local` input back to a stored value
pub fn date_from_input(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    Value::String(from_datetime_local(raw).unwrap_or_else(|| raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn genres() -> Vec<SelectOption> {
        vec![
            SelectOption::new("Rock", 1),
            SelectOption::new("Jazz", 2),
            SelectOption::new("Pop", 3),
        ]
    }

    #[test]
    fn test_selected_index_matches_numbers() {
        assert_eq!(selected_index(&genres(), Some(&json!(2))), "1");
        assert_eq!(selected_index(&genres(), Some(&json!(9))), "");
        assert_eq!(selected_index(&genres(), None), "");
        assert_eq!(option_at(&genres(), "1"), Some(json!(2)));
        assert_eq!(option_at(&genres(), "x"), None);
    }

    #[test]
    fn test_selected_indices() {
        let value = json!([3, 1]);
        assert_eq!(selected_indices(&genres(), Some(&value)), ["0", "2"]);
        assert_eq!(
            options_at(&genres(), &["0".to_string(), "2".to_string()]),
            [json!(1), json!(3)]
        );
    }

    #[test]
    fn test_number_value() {
        assert_eq!(number_value(20.0), json!(20));
        assert_eq!(number_value(2.5), json!(2.5));
    }

    #[test]
    fn test_json_text() {
        assert_eq!(json_text(Some(&json!("{\"a\":1}"))), "{\"a\":1}");
        assert_eq!(json_text(Some(&json!([1]))), "[\n  1\n]");
        assert_eq!(json_text(None), "");
    }

    #[test]
    fn test_date_from_input_empty() {
        assert_eq!(date_from_input(""), Value::Null);
        assert_eq!(date_from_input("not a date"), json!("not a date"));
    }
}
