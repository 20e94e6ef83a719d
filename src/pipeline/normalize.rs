//! Request normalisation: decode the double-encoded body and strip whitespace.
//!
//! Clients send the shipped item instance JSON as a JSON *string* literal,
//! so the body is decoded once to recover the payload text. A bare JSON
//! document is accepted too and re-rendered compactly, keys in source order.
//!
//! The payload then loses every `\r\n` pair, tab and space. This is lossy:
//! whitespace inside string values (`"Seed Corn"` → `"SeedCorn"`) goes as
//! well. Existing clients depend on the exact passthrough output, so the
//! behaviour is kept as is.

use crate::error::ConvertError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static RE_STRIPPED_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|[\t ]").unwrap());

/// Decode a request body and return the normalized payload text.
pub fn normalize_body(body: &[u8]) -> Result<String, ConvertError> {
    let value: Value = serde_json::from_slice(body).map_err(ConvertError::InvalidBody)?;
    let payload = match value {
        Value::String(text) => text,
        document @ (Value::Object(_) | Value::Array(_)) => document.to_string(),
        Value::Null => return Err(ConvertError::UnsupportedBody { kind: "null" }),
        Value::Bool(_) => return Err(ConvertError::UnsupportedBody { kind: "boolean" }),
        Value::Number(_) => return Err(ConvertError::UnsupportedBody { kind: "number" }),
    };
    Ok(strip_whitespace(&payload))
}

/// Remove `\r\n` pairs, tabs and spaces. Lone `\r` or `\n` are kept.
pub fn strip_whitespace(text: &str) -> String {
    RE_STRIPPED_WHITESPACE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_literal_is_unwrapped() {
        let body = serde_json::to_vec(r#"{"id":"abc123","quantity":5}"#).unwrap();
        assert_eq!(normalize_body(&body).unwrap(), r#"{"id":"abc123","quantity":5}"#);
    }

    #[test]
    fn whitespace_is_stripped_everywhere() {
        let inner = "{\r\n\t\"id\": \"abc 123\",\r\n\t\"quantity\": 5\r\n}";
        let body = serde_json::to_vec(inner).unwrap();
        assert_eq!(normalize_body(&body).unwrap(), r#"{"id":"abc123","quantity":5}"#);
    }

    #[test]
    fn lone_newlines_survive() {
        assert_eq!(strip_whitespace("a\nb\rc\r\nd"), "a\nb\rcd");
    }

    #[test]
    fn bare_document_is_rendered_compactly() {
        let body = br#"{ "id" : "abc123", "quantity" : 5 }"#;
        assert_eq!(normalize_body(body).unwrap(), r#"{"id":"abc123","quantity":5}"#);
    }

    #[test]
    fn bare_document_keeps_key_order() {
        let body = br#"{ "quantity": 5, "id": "abc123", "item": { "z": 1, "a": 2 } }"#;
        assert_eq!(
            normalize_body(body).unwrap(),
            r#"{"quantity":5,"id":"abc123","item":{"z":1,"a":2}}"#
        );
    }

    #[test]
    fn invalid_json_is_a_client_error() {
        for body in [&b""[..], &b"not json"[..], &b"\"unterminated"[..]] {
            let err = normalize_body(body).unwrap_err();
            assert!(matches!(err, ConvertError::InvalidBody(_)), "{err:?}");
            assert!(err.is_client_error());
        }
    }

    #[test]
    fn scalars_are_unsupported() {
        for (body, kind) in [
            (&b"null"[..], "null"),
            (&b"true"[..], "boolean"),
            (&b"42"[..], "number"),
        ] {
            match normalize_body(body) {
                Err(ConvertError::UnsupportedBody { kind: k }) => assert_eq!(k, kind),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }
}
