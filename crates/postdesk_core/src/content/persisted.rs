//! Normalization of content fields read back from the API.
//!
//! # Responsibility
//! - Accept the current shape (JSON array of blocks) and the legacy shapes
//!   (JSON-encoded string, opaque plain text).
//! - Degrade unparseable strings to a single plain paragraph.
//!
//! # Invariants
//! - String input never yields an error.
//! - A malformed array is reported, not masked: silently replacing it would
//!   overwrite stored content on the next save.

use crate::content::document::Document;
use crate::content::ContentError;
use log::warn;
use serde_json::Value;

/// Turns a persisted content field into a document.
///
/// Returns `Ok(None)` for `null`, empty strings and non-content JSON kinds,
/// which callers treat as "start from an empty editor".
///
/// # Errors
/// - `InvalidData` when an array does not describe a valid document.
pub fn normalize_persisted(value: &Value) -> Result<Option<Document>, ContentError> {
    match value {
        Value::Array(_) => serde_json::from_value::<Document>(value.clone())
            .map(Some)
            .map_err(|err| ContentError::InvalidData(err.to_string())),
        Value::String(raw) => Ok(parse_content_string(raw)),
        Value::Null => Ok(None),
        other => {
            warn!(
                "event=content_normalize module=content status=ignored kind={}",
                json_kind(other)
            );
            Ok(None)
        }
    }
}

/// Parses a JSON-encoded document, falling back to plain text.
pub fn parse_content_string(raw: &str) -> Option<Document> {
    if raw.is_empty() {
        return None;
    }

    match serde_json::from_str::<Document>(raw) {
        Ok(document) => Some(document),
        Err(err) => {
            warn!(
                "event=content_normalize module=content status=fallback chars={} error={}",
                raw.chars().count(),
                err
            );
            Some(Document::plain_text(raw))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
