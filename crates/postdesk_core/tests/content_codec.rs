use postdesk_core::content::delta::{ATTR_BOLD, ATTR_CODE, ATTR_ITALIC, ATTR_STRIKE, ATTR_UNDERLINE};
use postdesk_core::{
    decode, encode, Attributes, Block, ContentError, Delta, DeltaOp, Document, InlineNode,
    TextMarks,
};
use serde_json::json;

fn delta_from(value: serde_json::Value) -> Delta {
    serde_json::from_value(json!({ "ops": value })).unwrap()
}

fn sample_document() -> Document {
    Document::from_blocks(vec![
        Block::heading(
            2,
            vec![InlineNode::styled(
                "Title",
                TextMarks {
                    bold: true,
                    ..TextMarks::default()
                },
            )],
        ),
        Block::paragraph(vec![
            InlineNode::text("plain "),
            InlineNode::styled(
                "styled",
                TextMarks {
                    italic: true,
                    underline: true,
                    ..TextMarks::default()
                },
            ),
            InlineNode::styled(
                " code",
                TextMarks {
                    strikethrough: true,
                    code: true,
                    ..TextMarks::default()
                },
            ),
        ]),
        Block::paragraph(vec![InlineNode::image("https://cdn.example.com/a.png")]),
        Block::paragraph(vec![InlineNode::text("end")]),
    ])
}

#[test]
fn documents_survive_decode_then_encode() {
    let document = sample_document();
    let delta = decode(&document).unwrap();
    assert_eq!(encode(&delta), document);
}

#[test]
fn text_and_image_runs_encode_to_expected_blocks() {
    let delta = delta_from(json!([
        { "insert": "Hi " },
        { "insert": "there", "attributes": { "bold": true } },
        { "insert": "\n" },
        { "insert": { "image": "http://x/y.png" } }
    ]));

    let document = encode(&delta);
    assert_eq!(
        serde_json::to_value(&document).unwrap(),
        json!([
            {
                "type": "paragraph",
                "children": [
                    { "type": "text", "text": "Hi " },
                    { "type": "text", "text": "there", "bold": true }
                ]
            },
            {
                "type": "paragraph",
                "children": [ { "type": "image", "src": "http://x/y.png", "alt": "" } ]
            }
        ])
    );
}

#[test]
fn flags_are_independent_of_each_other() {
    let marks = TextMarks {
        bold: true,
        code: true,
        ..TextMarks::default()
    };
    let document =
        Document::from_blocks(vec![Block::paragraph(vec![InlineNode::styled("x", marks)])]);

    let delta = decode(&document).unwrap();
    let attributes = delta.ops[0].attributes.as_ref().unwrap();
    assert!(attributes.flag(ATTR_BOLD));
    assert!(attributes.flag(ATTR_CODE));
    assert!(!attributes.flag(ATTR_ITALIC));
    assert!(!attributes.flag(ATTR_UNDERLINE));
    assert!(!attributes.flag(ATTR_STRIKE));

    assert_eq!(encode(&delta), document);
}

#[test]
fn images_sharing_a_paragraph_are_rejected() {
    let document = Document::from_blocks(vec![Block::paragraph(vec![
        InlineNode::text("before"),
        InlineNode::image("a.png"),
        InlineNode::text("after"),
    ])]);

    assert_eq!(
        decode(&document),
        Err(ContentError::ImageWithSiblings { block: 0 })
    );
}

#[test]
fn text_with_line_breaks_is_rejected_not_split() {
    let document = Document::from_blocks(vec![Block::paragraph(vec![InlineNode::text("a\nb")])]);
    assert_eq!(
        decode(&document),
        Err(ContentError::NewlineInText { block: 0 })
    );

    let lines = Document::plain_text("a\nb");
    assert_eq!(encode(&decode(&lines).unwrap()), lines);
}

#[test]
fn encoded_documents_always_decode_again() {
    let delta = delta_from(json!([
        { "insert": "x" },
        { "insert": { "image": "a.png" } },
        { "insert": "y\nz" },
        { "insert": "\n", "attributes": { "header": 12 } }
    ]));

    let document = encode(&delta);
    assert!(document.validate().is_ok());
    assert_eq!(encode(&decode(&document).unwrap()), document);
}

#[test]
fn bare_terminators_emit_no_blocks() {
    let delta = delta_from(json!([
        { "insert": "\n" },
        { "insert": "\n" },
        { "insert": "hello" },
        { "insert": "\n" }
    ]));
    assert_eq!(encode(&delta), Document::plain_text("hello"));
}

#[test]
fn merged_runs_split_on_embedded_newlines() {
    let delta = delta_from(json!([{ "insert": "Hello\nWorld\n" }]));
    assert_eq!(
        encode(&delta),
        Document::from_blocks(vec![
            Block::paragraph(vec![InlineNode::text("Hello")]),
            Block::paragraph(vec![InlineNode::text("World")]),
        ])
    );
}

#[test]
fn header_on_terminator_promotes_block() {
    let delta = delta_from(json!([
        { "insert": "Intro" },
        { "insert": "\n", "attributes": { "header": 1 } },
        { "insert": "body" }
    ]));
    assert_eq!(
        encode(&delta),
        Document::from_blocks(vec![
            Block::heading(1, vec![InlineNode::text("Intro")]),
            Block::paragraph(vec![InlineNode::text("body")]),
        ])
    );
}

#[test]
fn empty_and_embed_only_inputs() {
    assert_eq!(encode(&Delta::default()), Document::empty());

    let delta = Delta::new(vec![DeltaOp::image("a.png"), DeltaOp::image("b.png")]);
    assert_eq!(
        encode(&delta),
        Document::from_blocks(vec![
            Block::paragraph(vec![InlineNode::image("a.png")]),
            Block::paragraph(vec![InlineNode::image("b.png")]),
        ])
    );
}

#[test]
fn malformed_ops_are_tolerated() {
    let delta = delta_from(json!([
        { "attributes": { "bold": true } },
        { "insert": "a", "attributes": { "bold": "true", "italic": 1 } },
        { "insert": { "video": "clip.mp4" } }
    ]));
    assert_eq!(encode(&delta), Document::plain_text("a"));
}

#[test]
fn unknown_attributes_do_not_leak_into_marks() {
    let attributes: Attributes =
        serde_json::from_value(json!({ "color": "#f00", "bold": true })).unwrap();
    let delta = Delta::new(vec![DeltaOp::styled("x", attributes)]);

    let document = encode(&delta);
    let expected = TextMarks {
        bold: true,
        ..TextMarks::default()
    };
    assert_eq!(
        document,
        Document::from_blocks(vec![Block::paragraph(vec![InlineNode::styled("x", expected)])])
    );
}

#[test]
fn decode_rejects_what_editors_cannot_hold() {
    let image_heading =
        Document::from_blocks(vec![Block::heading(1, vec![InlineNode::image("a.png")])]);
    assert_eq!(
        decode(&image_heading),
        Err(ContentError::ImageInHeading { block: 0 })
    );

    let deep = Document::from_blocks(vec![
        Block::paragraph(vec![]),
        Block::heading(9, vec![InlineNode::text("x")]),
    ]);
    assert_eq!(
        decode(&deep),
        Err(ContentError::InvalidHeadingLevel { block: 1, level: 9 })
    );
}

#[test]
fn slate_style_leaves_without_type_are_accepted() {
    let document: Document = serde_json::from_value(json!([
        { "type": "paragraph", "children": [ { "text": "legacy", "italic": true } ] }
    ]))
    .unwrap();

    let expected = TextMarks {
        italic: true,
        ..TextMarks::default()
    };
    assert_eq!(
        document,
        Document::from_blocks(vec![Block::paragraph(vec![InlineNode::styled(
            "legacy", expected
        )])])
    );
}
