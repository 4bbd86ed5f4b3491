//! Native editing state -> persisted document.
//!
//! # Invariants
//! - Total: every `Delta` encodes to a document with at least one block.
//! - A bare terminator with nothing accumulated emits no block.
//! - Image embeds always become their own single-child paragraph.
//! - Output always passes `Document::validate()`.

use crate::content::delta::{
    Attributes, Delta, Insert, ATTR_BOLD, ATTR_CODE, ATTR_HEADER, ATTR_ITALIC, ATTR_STRIKE,
    ATTR_UNDERLINE,
};
use crate::content::document::{Block, Document, InlineNode, TextMarks};
use log::warn;
use serde_json::Value;

/// Line formats the document model cannot hold yet; their text is kept as
/// plain paragraphs.
const UNSUPPORTED_LINE_FORMATS: [&str; 5] = ["list", "blockquote", "code-block", "align", "indent"];

/// Folds an operation list into a document.
pub fn encode(delta: &Delta) -> Document {
    let mut encoder = Encoder::default();
    for op in &delta.ops {
        match &op.insert {
            Some(Insert::Text(text)) => encoder.push_text(text, op.attributes.as_ref()),
            Some(Insert::Embed(embed)) => {
                if let Some(src) = embed.image.as_deref() {
                    encoder.push_image(src);
                }
            }
            None => {}
        }
    }
    encoder.finish()
}

/// Maps native attribute keys onto text flags (`strike` -> `strikethrough`).
pub fn marks_from_attributes(attributes: Option<&Attributes>) -> TextMarks {
    let Some(attributes) = attributes else {
        return TextMarks::default();
    };
    TextMarks {
        bold: attributes.flag(ATTR_BOLD),
        italic: attributes.flag(ATTR_ITALIC),
        underline: attributes.flag(ATTR_UNDERLINE),
        strikethrough: attributes.flag(ATTR_STRIKE),
        code: attributes.flag(ATTR_CODE),
    }
}

#[derive(Default)]
struct Encoder {
    blocks: Vec<Block>,
    current: Option<Block>,
}

impl Encoder {
    fn push_text(&mut self, text: &str, attributes: Option<&Attributes>) {
        let header = attributes.and_then(Attributes::header);
        if header.is_none() {
            warn_unsupported_header(attributes);
        }
        if text == "\n" {
            warn_unsupported_line_format(attributes);
            self.terminate(header);
            return;
        }

        // Native editors merge runs such as "Hello\n"; every newline inside
        // a run still terminates the block it closes.
        let mut segments = text.split('\n').peekable();
        while let Some(segment) = segments.next() {
            if !segment.is_empty() {
                self.append_run(segment, attributes, header);
            }
            if segments.peek().is_some() {
                self.terminate(header);
            }
        }
    }

    fn append_run(&mut self, text: &str, attributes: Option<&Attributes>, header: Option<u8>) {
        let block = self
            .current
            .get_or_insert_with(|| Block::paragraph(Vec::new()));
        if let Some(level) = header {
            promote_to_heading(block, level);
        }
        block.children_mut().push(InlineNode::styled(
            text,
            marks_from_attributes(attributes),
        ));
    }

    fn push_image(&mut self, src: &str) {
        self.blocks
            .push(Block::paragraph(vec![InlineNode::image(src)]));
    }

    fn terminate(&mut self, header: Option<u8>) {
        if let Some(mut block) = self.current.take() {
            if let Some(level) = header {
                promote_to_heading(&mut block, level);
            }
            self.blocks.push(block);
        }
    }

    fn finish(mut self) -> Document {
        if let Some(block) = self.current.take() {
            self.blocks.push(block);
        }
        if self.blocks.is_empty() {
            return Document::empty();
        }
        Document::from_blocks(self.blocks)
    }
}

fn warn_unsupported_line_format(attributes: Option<&Attributes>) {
    let Some(attributes) = attributes else {
        return;
    };
    for key in UNSUPPORTED_LINE_FORMATS {
        if attributes.0.contains_key(key) {
            warn!(
                "event=content_encode module=content status=degraded line_format={}",
                key
            );
        }
    }
}

fn warn_unsupported_header(attributes: Option<&Attributes>) {
    let Some(raw) = attributes.and_then(|attributes| attributes.0.get(ATTR_HEADER)) else {
        return;
    };
    if raw.is_null() || *raw == Value::Bool(false) {
        return;
    }
    warn!(
        "event=content_encode module=content status=degraded header={}",
        raw
    );
}

fn promote_to_heading(block: &mut Block, level: u8) {
    match block {
        Block::Heading { level: current, .. } => *current = level,
        Block::Paragraph { children } => {
            let children = std::mem::take(children);
            *block = Block::heading(level, children);
        }
    }
}
