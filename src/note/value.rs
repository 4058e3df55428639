//! Typed access over the loosely shaped `serde_json::Value` tree.

use serde_json::{Map, Value};

use crate::app::{Result, XhsnoteError};

/// Truthiness as the page's own scripts see it: `null`, `false`, `0`, `""`,
/// `[]` and `{}` are all empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Require `value` to be an object.
pub fn expect_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| XhsnoteError::UnexpectedShape {
        field: field.to_string(),
        expected: "object",
        found: kind_of(value),
    })
}

/// Like [`expect_object`], but a missing or `null` value is `Ok(None)`.
pub fn optional_object<'a>(
    value: Option<&'a Value>,
    field: &str,
) -> Result<Option<&'a Map<String, Value>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => expect_object(value, field).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        for empty in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&empty), "{empty} should be falsy");
        }
        for full in [json!(true), json!(1), json!("a"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&full), "{full} should be truthy");
        }
    }

    #[test]
    fn test_expect_object_reports_found_kind() {
        let err = expect_object(&json!([1, 2]), "note.noteDetailMap").unwrap_err();
        match err {
            XhsnoteError::UnexpectedShape { field, expected, found } => {
                assert_eq!(field, "note.noteDetailMap");
                assert_eq!(expected, "object");
                assert_eq!(found, "array");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_optional_object_treats_null_as_absent() {
        assert!(optional_object(None, "x").unwrap().is_none());
        assert!(optional_object(Some(&json!(null)), "x").unwrap().is_none());
        assert!(optional_object(Some(&json!({"a": 1})), "x").unwrap().is_some());
        assert!(optional_object(Some(&json!("nope")), "x").is_err());
    }
}
