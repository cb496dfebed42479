//! Total conversions from arbitrary JSON values to research field shapes.
//!
//! Models routinely return a list where a string was asked for, or objects such
//! as `{"point": "...", "reason": "..."}` inside a list of plain strings. These
//! functions repair the shape instead of rejecting it. None of them can fail.
//!
//! `null` renders as the empty string: `to_text` gives `""`, `to_text_sequence`
//! gives `[""]`, `to_boolean` gives `false` and `to_optional_text` gives `None`.

use serde_json::{Map, Value};

/// Separator placed between the values of a flattened object.
pub const MAPPING_SEPARATOR: &str = " | ";

/// Separator placed between the elements of a list collapsed into one string.
pub const SEQUENCE_SEPARATOR: &str = " ";

/// Coerces a value into a list of strings.
///
/// Lists keep their order; string elements pass through, object elements are
/// flattened, anything else is rendered. A lone value becomes a one-element list.
pub fn to_text_sequence(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => flatten_mapping(map),
                other => render(other),
            })
            .collect(),
        Value::Object(map) => vec![flatten_mapping(map)],
        other => vec![render(other)],
    }
}

/// Coerces a value into a single string.
///
/// Objects are flattened, lists are joined with a space. Empty results are kept;
/// deciding what an empty string means is up to the caller.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Object(map) => flatten_mapping(map),
        Value::Array(items) => items
            .iter()
            .map(render)
            .collect::<Vec<_>>()
            .join(SEQUENCE_SEPARATOR),
        other => render(other),
    }
}

/// Coerces a value into a boolean.
///
/// Strings are true only for `true`, `1` or `yes` (trimmed, any case). Lists and
/// objects are true when non-empty, numbers when non-zero.
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Null => false,
    }
}

/// Coerces a value into a string, mapping the empty string to `None`.
pub fn to_optional_text(value: &Value) -> Option<String> {
    Some(to_text(value)).filter(|s| !s.is_empty())
}

/// Joins an object's values, in key order, dropping the keys.
fn flatten_mapping(map: &Map<String, Value>) -> String {
    map.values()
        .map(render)
        .collect::<Vec<_>>()
        .join(MAPPING_SEPARATOR)
}

/// Generic string form of a single value. Nested containers become compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sequence_passes_strings_through() {
        assert_eq!(
            to_text_sequence(&json!(["first", "second"])),
            vec!["first", "second"]
        );
    }

    #[test]
    fn test_sequence_flattens_object_elements() {
        let raw = json!([{"gap": "X", "why": "Y"}, "plain", 7, true]);
        assert_eq!(to_text_sequence(&raw), vec!["X | Y", "plain", "7", "true"]);
    }

    #[test]
    fn test_sequence_wraps_scalars() {
        assert_eq!(to_text_sequence(&json!("only one")), vec!["only one"]);
        assert_eq!(to_text_sequence(&json!(2.5)), vec!["2.5"]);
        assert_eq!(to_text_sequence(&json!(false)), vec!["false"]);
    }

    #[test]
    fn test_sequence_wraps_flattened_object() {
        assert_eq!(
            to_text_sequence(&json!({"query": "rust serde", "why": "coverage"})),
            vec!["rust serde | coverage"]
        );
    }

    #[test]
    fn test_sequence_wraps_null_as_single_empty_element() {
        assert_eq!(to_text_sequence(&json!(null)), vec![""]);
        assert!(to_text_sequence(&json!([])).is_empty());
    }

    #[test]
    fn test_sequence_renders_nested_lists_as_json() {
        assert_eq!(
            to_text_sequence(&json!([["a", "b"], null])),
            vec![r#"["a","b"]"#, ""]
        );
    }

    #[test]
    fn test_text_passes_string_through_unchanged() {
        assert_eq!(to_text(&json!("  spaced  ")), "  spaced  ");
        assert_eq!(to_text(&json!("")), "");
    }

    #[test]
    fn test_text_flattening_keeps_key_order() {
        assert_eq!(to_text(&json!({"a": "x", "b": "y"})), "x | y");
        assert_eq!(to_text(&json!({"b": "y", "a": "x"})), "y | x");
    }

    #[test]
    fn test_text_joins_lists_with_space() {
        assert_eq!(to_text(&json!(["one", 2, true])), "one 2 true");
        assert_eq!(to_text(&json!([])), "");
    }

    #[test]
    fn test_text_of_scalars() {
        assert_eq!(to_text(&json!(42)), "42");
        assert_eq!(to_text(&json!(true)), "true");
        assert_eq!(to_text(&json!(null)), "");
    }

    #[test]
    fn test_boolean_rules() {
        assert!(to_boolean(&json!(true)));
        assert!(!to_boolean(&json!(false)));
        assert!(to_boolean(&json!("YES")));
        assert!(to_boolean(&json!(" True ")));
        assert!(to_boolean(&json!("1")));
        assert!(!to_boolean(&json!("no")));
        assert!(!to_boolean(&json!("maybe")));
        assert!(!to_boolean(&json!([])));
        assert!(to_boolean(&json!([1])));
        assert!(!to_boolean(&json!(0)));
        assert!(!to_boolean(&json!(0.0)));
        assert!(to_boolean(&json!(-3)));
        assert!(!to_boolean(&json!({})));
        assert!(to_boolean(&json!({"k": false})));
        assert!(!to_boolean(&json!(null)));
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(to_optional_text(&json!("")), None);
        assert_eq!(to_optional_text(&json!(null)), None);
        assert_eq!(to_optional_text(&json!([])), None);
        assert_eq!(
            to_optional_text(&json!("reason: X")),
            Some("reason: X".to_string())
        );
        assert_eq!(
            to_optional_text(&json!({"why": "too few sources"})),
            Some("too few sources".to_string())
        );
    }
}
