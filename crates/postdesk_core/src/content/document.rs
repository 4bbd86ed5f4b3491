//! Persisted rich-text document model.
//!
//! # Responsibility
//! - Define the storage-format shape of post content (blocks of inline runs).
//! - Own the serde mapping to the JSON array-of-blocks wire format.
//! - Check boundary rules that the native conversion relies on.
//!
//! # Invariants
//! - Text flags are plain `bool`s; `false` is never serialized and a missing
//!   or `null` flag reads back as `false`.
//! - Heading levels are `1..=6`; an absent level reads back as `1`.
//! - `validate()` only accepts documents an editor can hold unchanged: images
//!   alone in their paragraph, text runs without line breaks.
//! - Unknown block types are rejected at deserialization time instead of
//!   being dropped.

use crate::content::ContentError;
use serde::{Deserialize, Deserializer, Serialize};

/// Smallest heading level accepted by the editor toolbar.
pub const MIN_HEADING_LEVEL: u8 = 1;
/// Largest heading level accepted by the editor toolbar.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Ordered sequence of blocks; serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// Top-level structural unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        #[serde(default)]
        children: Vec<InlineNode>,
    },
    Heading {
        #[serde(default = "default_heading_level")]
        level: u8,
        #[serde(default)]
        children: Vec<InlineNode>,
    },
}

/// Inline run nested inside a block.
///
/// Accepts Slate-style leaves that carry `text` without a `type` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", try_from = "RawInlineNode")]
pub enum InlineNode {
    Text(TextNode),
    Image(ImageNode),
}

/// Run of text with orthogonal formatting flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    #[serde(flatten)]
    pub marks: TextMarks,
}

/// Formatting flags of a text run. Any combination may be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextMarks {
    #[serde(default, skip_serializing_if = "is_false", deserialize_with = "null_as_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false", deserialize_with = "null_as_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false", deserialize_with = "null_as_false")]
    pub underline: bool,
    #[serde(
        default,
        skip_serializing_if = "is_false",
        deserialize_with = "null_as_false",
        alias = "strikeThrough"
    )]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "is_false", deserialize_with = "null_as_false")]
    pub code: bool,
}

/// Embedded image. `alt` is always present in the persisted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageNode {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

impl Document {
    /// Single empty paragraph; the content of a fresh editing session.
    pub fn empty() -> Self {
        Self {
            blocks: vec![Block::paragraph(Vec::new())],
        }
    }

    /// One unformatted paragraph per non-empty line of `text`.
    ///
    /// Text without any such line gives `Document::empty()`.
    pub fn plain_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let blocks: Vec<Block> = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| Block::paragraph(vec![InlineNode::text(line)]))
            .collect();
        if blocks.is_empty() {
            return Self::empty();
        }
        Self { blocks }
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Returns whether the document carries no text and no images.
    pub fn is_blank(&self) -> bool {
        self.blocks.iter().all(|block| {
            block.children().iter().all(|child| match child {
                InlineNode::Text(node) => node.text.trim().is_empty(),
                InlineNode::Image(_) => false,
            })
        })
    }

    /// Checks rules that the native representation cannot express.
    ///
    /// # Errors
    /// - `InvalidHeadingLevel` when a heading level is outside `1..=6`.
    /// - `ImageInHeading` when a heading holds an image run.
    /// - `ImageWithSiblings` when an image is not alone in its paragraph.
    /// - `NewlineInText` when a text run holds `'\n'`.
    pub fn validate(&self) -> Result<(), ContentError> {
        for (index, block) in self.blocks.iter().enumerate() {
            let children = block.children();
            if let Block::Heading { level, .. } = block {
                if !(MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(level) {
                    return Err(ContentError::InvalidHeadingLevel {
                        block: index,
                        level: *level,
                    });
                }
            }

            let has_image = children
                .iter()
                .any(|child| matches!(child, InlineNode::Image(_)));
            match block {
                Block::Heading { .. } if has_image => {
                    return Err(ContentError::ImageInHeading { block: index });
                }
                Block::Paragraph { .. } if has_image && children.len() > 1 => {
                    return Err(ContentError::ImageWithSiblings { block: index });
                }
                _ => {}
            }

            let breaks_line = children.iter().any(|child| match child {
                InlineNode::Text(node) => node.text.contains('\n'),
                InlineNode::Image(_) => false,
            });
            if breaks_line {
                return Err(ContentError::NewlineInText { block: index });
            }
        }
        Ok(())
    }
}

impl Block {
    pub fn paragraph(children: Vec<InlineNode>) -> Self {
        Self::Paragraph { children }
    }

    pub fn heading(level: u8, children: Vec<InlineNode>) -> Self {
        Self::Heading { level, children }
    }

    pub fn children(&self) -> &[InlineNode] {
        match self {
            Self::Paragraph { children } | Self::Heading { children, .. } => children,
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<InlineNode> {
        match self {
            Self::Paragraph { children } | Self::Heading { children, .. } => children,
        }
    }
}

impl InlineNode {
    /// Unformatted text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextNode {
            text: text.into(),
            marks: TextMarks::default(),
        })
    }

    pub fn styled(text: impl Into<String>, marks: TextMarks) -> Self {
        Self::Text(TextNode {
            text: text.into(),
            marks,
        })
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self::Image(ImageNode {
            src: src.into(),
            alt: String::new(),
        })
    }
}

impl TextMarks {
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Deserialize)]
struct RawInlineNode {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    src: Option<String>,
    #[serde(default)]
    alt: Option<String>,
    #[serde(flatten)]
    marks: TextMarks,
}

impl TryFrom<RawInlineNode> for InlineNode {
    type Error = String;

    fn try_from(raw: RawInlineNode) -> Result<Self, Self::Error> {
        match raw.kind.as_deref() {
            Some("text") | None => {
                let text = raw
                    .text
                    .ok_or_else(|| "text node is missing `text`".to_string())?;
                Ok(Self::Text(TextNode {
                    text,
                    marks: raw.marks,
                }))
            }
            Some("image") => {
                let src = raw
                    .src
                    .ok_or_else(|| "image node is missing `src`".to_string())?;
                Ok(Self::Image(ImageNode {
                    src,
                    alt: raw.alt.unwrap_or_default(),
                }))
            }
            Some(other) => Err(format!("unsupported inline node type `{other}`")),
        }
    }
}

fn default_heading_level() -> u8 {
    MIN_HEADING_LEVEL
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
