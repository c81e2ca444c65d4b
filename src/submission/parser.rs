use serde_json::{Map, Value};

use crate::error::AppError;

/// Parse a request body into a submission. Only a non-empty JSON object is accepted.
pub fn parse_body(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        Ok(_) => Err(AppError::InvalidPayload),
        Err(e) => {
            tracing::debug!("Invalid JSON: {e}");
            Err(AppError::InvalidPayload)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(body: &str) -> bool {
        matches!(parse_body(body.as_bytes()), Err(AppError::InvalidPayload))
    }

    #[test]
    fn accepts_non_empty_object() {
        let map = parse_body(br#"{"full_names": "Jane", "age": 30}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["age"], 30);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(rejected("not json{"));
        assert!(rejected(""));
        assert!(rejected("{\"a\": }"));
    }

    #[test]
    fn rejects_empty_object() {
        assert!(rejected("{}"));
        assert!(rejected("  { }  "));
    }

    #[test]
    fn rejects_non_objects() {
        assert!(rejected("[1, 2, 3]"));
        assert!(rejected("\"text\""));
        assert!(rejected("42"));
        assert!(rejected("null"));
        assert!(rejected("true"));
    }

    #[test]
    fn keeps_nested_and_unicode_values() {
        let map = parse_body("{\"name\": \"Zoë Ñandú\", \"tags\": [\"a\", {\"b\": null}]}".as_bytes())
            .unwrap();
        assert_eq!(map["name"], "Zoë Ñandú");
        assert!(map["tags"][1]["b"].is_null());
    }
}
