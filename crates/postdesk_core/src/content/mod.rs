//! Rich-text content model and its native conversions.
//!
//! # Responsibility
//! - Define the persisted document shape used by post content.
//! - Convert between that shape and the editor's operation list.
//! - Normalize content fields read back from the API.
//!
//! # Invariants
//! - `encode(decode(d))` equals `d` for every valid document, modulo
//!   dropped empty blocks.
//! - Conversions are pure; only normalization fallbacks emit log events.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod decode;
pub mod delta;
pub mod document;
pub mod encode;
pub mod persisted;

/// Error for content that cannot cross the editor/storage boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// A heading block holds an image run at block index `block`.
    ImageInHeading { block: usize },
    /// A heading level outside `1..=6`.
    InvalidHeadingLevel { block: usize, level: u8 },
    /// An image shares its paragraph with other runs.
    ImageWithSiblings { block: usize },
    /// A text run holds a line break; lines are separate blocks.
    NewlineInText { block: usize },
    /// Persisted data does not describe a document.
    InvalidData(String),
}

impl Display for ContentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageInHeading { block } => {
                write!(f, "heading block {block} cannot contain an image")
            }
            Self::InvalidHeadingLevel { block, level } => write!(
                f,
                "heading block {block} has level {level}; expected 1..=6"
            ),
            Self::ImageWithSiblings { block } => {
                write!(f, "image in block {block} must be the only run of its paragraph")
            }
            Self::NewlineInText { block } => {
                write!(f, "text in block {block} contains a line break")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted content: {message}"),
        }
    }
}

impl Error for ContentError {}
