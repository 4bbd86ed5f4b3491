//! Native editing state: the editor's ordered insert operations.
//!
//! # Responsibility
//! - Mirror the operation-list shape rich-text editors expose (`{ops: [...]}`).
//! - Provide tolerant accessors over free-form attribute maps.
//!
//! # Invariants
//! - Deserialization never fails on unknown attribute keys or value types;
//!   malformed values read as "absent".
//! - An op without `insert` is kept as-is and skipped by the encoder.

use crate::content::document::{MAX_HEADING_LEVEL, MIN_HEADING_LEVEL};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute key for bold text.
pub const ATTR_BOLD: &str = "bold";
/// Attribute key for italic text.
pub const ATTR_ITALIC: &str = "italic";
/// Attribute key for underlined text.
pub const ATTR_UNDERLINE: &str = "underline";
/// Attribute key for struck-through text (native name).
pub const ATTR_STRIKE: &str = "strike";
/// Attribute key for inline code.
pub const ATTR_CODE: &str = "code";
/// Attribute key carrying a heading level.
pub const ATTR_HEADER: &str = "header";

/// Ordered list of insert operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    #[serde(default)]
    pub ops: Vec<DeltaOp>,
}

/// One insert operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaOp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert: Option<Insert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

/// Inserted content: a string run or an embedded object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    Text(String),
    Embed(Embed),
}

/// Embedded object. Only `image` is understood; other keys are carried along.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Free-form attribute map attached to an op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(pub Map<String, Value>);

impl Delta {
    pub fn new(ops: Vec<DeltaOp>) -> Self {
        Self { ops }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Document length in editor positions: one per char, one per embed.
    pub fn length(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match &op.insert {
                Some(Insert::Text(text)) => text.chars().count(),
                Some(Insert::Embed(_)) => 1,
                None => 0,
            })
            .sum()
    }
}

impl DeltaOp {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            insert: Some(Insert::Text(text.into())),
            attributes: None,
        }
    }

    pub fn styled(text: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            insert: Some(Insert::Text(text.into())),
            attributes: Some(attributes),
        }
    }

    pub fn newline() -> Self {
        Self::text("\n")
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self {
            insert: Some(Insert::Embed(Embed {
                image: Some(src.into()),
                other: Map::new(),
            })),
            attributes: None,
        }
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Sets `key` to `true`.
    pub fn with_flag(mut self, key: &str) -> Self {
        self.0.insert(key.to_string(), Value::Bool(true));
        self
    }

    pub fn with_header(mut self, level: u8) -> Self {
        self.0.insert(ATTR_HEADER.to_string(), Value::from(level));
        self
    }

    /// Returns `true` only for a JSON `true` value.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(Value::Bool(true)))
    }

    /// Returns the heading level when `header` holds an integer in `1..=6`.
    pub fn header(&self) -> Option<u8> {
        self.0
            .get(ATTR_HEADER)
            .and_then(Value::as_u64)
            .and_then(|level| u8::try_from(level).ok())
            .filter(|level| (MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(level))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
