//! Persisted document -> native editing state.
//!
//! # Invariants
//! - Blocks are separated by one bare `"\n"` insert; none trails the last.
//! - Unformatted runs carry no attributes map at all.
//! - Documents failing `Document::validate()` are rejected, never guessed.

use crate::content::delta::{
    Attributes, Delta, DeltaOp, ATTR_BOLD, ATTR_CODE, ATTR_ITALIC, ATTR_STRIKE, ATTR_UNDERLINE,
};
use crate::content::document::{Block, Document, InlineNode, TextMarks};
use crate::content::ContentError;

/// Rehydrates the editor operation list for `document`.
///
/// # Errors
/// - Returns the `Document::validate()` error for headings holding images or
///   out-of-range levels.
pub fn decode(document: &Document) -> Result<Delta, ContentError> {
    document.validate()?;

    let mut ops = Vec::new();
    for (index, block) in document.blocks.iter().enumerate() {
        if index > 0 {
            ops.push(DeltaOp::newline());
        }

        match block {
            Block::Paragraph { children } => {
                for child in children {
                    ops.push(match child {
                        InlineNode::Text(node) => {
                            text_op(&node.text, attributes_from_marks(&node.marks))
                        }
                        InlineNode::Image(image) => DeltaOp::image(image.src.as_str()),
                    });
                }
            }
            Block::Heading { level, children } => {
                for child in children {
                    // validate() already rejected non-text heading children.
                    if let InlineNode::Text(node) = child {
                        let attributes = attributes_from_marks(&node.marks)
                            .unwrap_or_default()
                            .with_header(*level);
                        ops.push(DeltaOp::styled(node.text.as_str(), attributes));
                    }
                }
            }
        }
    }

    Ok(Delta::new(ops))
}

/// Builds the native attribute map for `marks`; `None` when no flag is set.
pub fn attributes_from_marks(marks: &TextMarks) -> Option<Attributes> {
    if marks.is_plain() {
        return None;
    }

    let mut attributes = Attributes::new();
    for (enabled, key) in [
        (marks.bold, ATTR_BOLD),
        (marks.italic, ATTR_ITALIC),
        (marks.underline, ATTR_UNDERLINE),
        (marks.strikethrough, ATTR_STRIKE),
        (marks.code, ATTR_CODE),
    ] {
        if enabled {
            attributes = attributes.with_flag(key);
        }
    }
    Some(attributes)
}

fn text_op(text: &str, attributes: Option<Attributes>) -> DeltaOp {
    match attributes {
        Some(attributes) => DeltaOp::styled(text, attributes),
        None => DeltaOp::text(text),
    }
}
