//! Turning errors into log messages

use std::error::Error as StdError;

use serde_json::Value;

/// Message text of an error, without its source chain
///
/// ```
/// use termkit_core::extract_error_message;
///
/// let err = std::io::Error::other("disk full");
/// assert_eq!(extract_error_message(&err), "disk full");
/// ```
pub fn extract_error_message(error: &(dyn StdError + '_)) -> String {
    error.to_string()
}

/// Message text of an error payload received as JSON, e.g. an API error body
///
/// Strings are returned as-is, objects with a `message` field yield that
/// field, anything else is rendered as compact JSON.
pub fn extract_message(value: &Value) -> String {
    match value {
        Value::String(message) => message.clone(),
        Value::Object(fields) => match fields.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_extracts_from_error() {
        let err = std::io::Error::other("oops");
        assert_eq!(extract_error_message(&err), "oops");

        let err = Error::Config("bad value".into());
        assert_eq!(extract_error_message(&err), "Configuration error: bad value");
    }

    #[test]
    fn test_returns_string_as_is() {
        assert_eq!(extract_message(&json!("plain error")), "plain error");
    }

    #[test]
    fn test_extracts_message_field() {
        assert_eq!(extract_message(&json!({"message": "api error"})), "api error");
        assert_eq!(extract_message(&json!({"message": 404})), "404");
    }

    #[test]
    fn test_converts_other_values() {
        assert_eq!(extract_message(&json!(42)), "42");
        assert_eq!(extract_message(&Value::Null), "null");
        assert_eq!(extract_message(&json!({"code": 7})), r#"{"code":7}"#);
    }
}
