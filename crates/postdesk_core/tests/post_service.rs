mod common;

use common::{client, BASE_URL};
use http::{Method, StatusCode};
use postdesk_core::{
    Block, DeltaOp, Document, EditorSession, InlineNode, MemoryEditor, PostForm, PostService,
    PostServiceError, PostStatus, PostValidationError, SubmitTarget,
};
use serde_json::{json, Value};

fn service() -> PostService<common::FakeTransport> {
    PostService::new(client())
}

fn stored_post(content: Value) -> Value {
    json!({
        "data": {
            "id": 7,
            "documentId": "post-7",
            "blog_post_title": "Hello",
            "blog_post_description": "First post",
            "blog_post_content": content,
            "blog_post_image_url": null,
            "blog_post_status": "draft",
            "createdAt": "2024-05-01T10:00:00.000Z"
        }
    })
}

fn form() -> PostForm {
    PostForm {
        title: "Hello".to_string(),
        description: "First post".to_string(),
        image_url: String::new(),
        status: PostStatus::Publish,
    }
}

#[test]
fn load_for_edit_accepts_array_content() {
    let service = service();
    service.client().transport().respond_json(
        StatusCode::OK,
        stored_post(json!([
            { "type": "paragraph", "children": [ { "type": "text", "text": "body" } ] }
        ])),
    );

    let state = service.load_for_edit("post-7").unwrap();
    assert_eq!(state.document_id, "post-7");
    assert_eq!(state.form.title, "Hello");
    assert_eq!(state.form.status, PostStatus::Draft);
    assert_eq!(state.form.image_url, "");
    assert_eq!(state.content, Some(Document::plain_text("body")));

    let request = service.client().transport().last();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.uri, format!("{BASE_URL}/blogposts/post-7"));
}

#[test]
fn load_for_edit_accepts_legacy_string_content() {
    let service = service();
    let encoded = json!([
        { "type": "heading", "level": 1, "children": [ { "type": "text", "text": "T" } ] }
    ])
    .to_string();
    service
        .client()
        .transport()
        .respond_json(StatusCode::OK, stored_post(json!(encoded)));
    service
        .client()
        .transport()
        .respond_json(StatusCode::OK, stored_post(json!("just words")));
    service
        .client()
        .transport()
        .respond_json(StatusCode::OK, stored_post(Value::Null));

    let parsed = service.load_for_edit("post-7").unwrap();
    assert_eq!(
        parsed.content,
        Some(Document::from_blocks(vec![Block::heading(
            1,
            vec![InlineNode::text("T")]
        )]))
    );

    let fallback = service.load_for_edit("post-7").unwrap();
    assert_eq!(fallback.content, Some(Document::plain_text("just words")));

    let empty = service.load_for_edit("post-7").unwrap();
    assert_eq!(empty.content, None);
}

#[test]
fn load_for_edit_reports_corrupt_array() {
    let service = service();
    service.client().transport().respond_json(
        StatusCode::OK,
        stored_post(json!([ { "type": "quote", "children": [] } ])),
    );

    assert!(matches!(
        service.load_for_edit("post-7"),
        Err(PostServiceError::Content(_))
    ));
}

#[test]
fn submit_reads_editor_synchronously() {
    let service = service();
    let mut session = EditorSession::new();
    session
        .start(MemoryEditor::new(), Some(&Document::plain_text("draft")))
        .unwrap();
    session
        .apply_edit(|editor| editor.push(DeltaOp::text(" final")))
        .unwrap();

    let stale = Document::plain_text("draft");
    let payload = service
        .submit(SubmitTarget::Create, &form(), &session, Some(&stale))
        .unwrap();

    let expected = Document::from_blocks(vec![Block::paragraph(vec![
        InlineNode::text("draft"),
        InlineNode::text(" final"),
    ])]);
    assert_eq!(payload.content, Some(expected.clone()));

    let request = service.client().transport().last();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.uri, format!("{BASE_URL}/blogposts"));
    assert_eq!(
        request.body,
        Some(json!({
            "data": {
                "blog_post_title": "Hello",
                "blog_post_description": "First post",
                "blog_post_content": serde_json::to_value(&expected).unwrap(),
                "blog_post_image_url": "",
                "blog_post_status": "publish"
            }
        }))
    );
}

#[test]
fn submit_falls_back_to_last_seen_document() {
    let service = service();
    let mut session: EditorSession<MemoryEditor> = EditorSession::new();
    session.start(MemoryEditor::new(), None).unwrap();
    session.destroy();

    let last_seen = Document::plain_text("from callback");
    let payload = service
        .submit(
            SubmitTarget::Update {
                document_id: "post-7",
            },
            &form(),
            &session,
            Some(&last_seen),
        )
        .unwrap();
    assert_eq!(payload.content, Some(last_seen));

    let request = service.client().transport().last();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.uri, format!("{BASE_URL}/blogposts/post-7"));
}

#[test]
fn submit_without_any_content_sends_null() {
    let service = service();
    let session: EditorSession<MemoryEditor> = EditorSession::new();

    let payload = service
        .submit(SubmitTarget::Create, &form(), &session, None)
        .unwrap();
    assert_eq!(payload.content, None);

    let body = service.client().transport().last().body.unwrap();
    assert_eq!(body["data"]["blog_post_content"], Value::Null);
}

#[test]
fn invalid_form_sends_nothing() {
    let service = service();
    let session: EditorSession<MemoryEditor> = EditorSession::new();
    let mut form = form();
    form.image_url = "cover.png".to_string();

    let err = service
        .submit(SubmitTarget::Create, &form, &session, None)
        .unwrap_err();
    assert!(matches!(
        err,
        PostServiceError::Validation(PostValidationError::InvalidImageUrl(_))
    ));
    assert!(service.client().transport().recorded().is_empty());
}

#[test]
fn api_errors_surface_from_submit() {
    let service = service();
    service
        .client()
        .transport()
        .respond_raw(StatusCode::BAD_REQUEST, "invalid payload");
    let session: EditorSession<MemoryEditor> = EditorSession::new();

    let err = service
        .submit(SubmitTarget::Create, &form(), &session, None)
        .unwrap_err();
    match err {
        PostServiceError::Api(api) => assert_eq!(api.status(), Some(StatusCode::BAD_REQUEST)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn list_posts_keeps_raw_content() {
    let service = service();
    let record = stored_post(json!("legacy text"))["data"].clone();
    let listing = json!({ "data": [record] });
    service
        .client()
        .transport()
        .respond_json(StatusCode::OK, listing);

    let posts = service.list_posts().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].document_id, "post-7");
    assert_eq!(posts[0].content, json!("legacy text"));
    assert_eq!(
        service.client().transport().last().uri,
        format!("{BASE_URL}/blogposts")
    );
}
