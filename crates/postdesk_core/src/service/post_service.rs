//! Blog post use-case service.
//!
//! # Responsibility
//! - Load a stored post into form fields plus an editable document.
//! - Submit a post using a final synchronous read of the editor.
//!
//! # Invariants
//! - Submitted content comes from `EditorSession::content()` when the session
//!   is ready; the last change-callback document is only a fallback.
//! - A failed validation sends no request.

use crate::api::client::ApiClient;
use crate::api::resource::Resource;
use crate::api::{ApiError, Transport};
use crate::content::document::Document;
use crate::content::persisted::normalize_persisted;
use crate::content::ContentError;
use crate::editor::session::EditorSession;
use crate::editor::NativeEditor;
use crate::model::post::{BlogPost, PostForm, PostPayload, PostValidationError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for post use-cases.
#[derive(Debug)]
pub enum PostServiceError {
    Validation(PostValidationError),
    Api(ApiError),
    /// Stored content cannot be loaded into the editor.
    Content(ContentError),
}

impl Display for PostServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Api(err) => write!(f, "{err}"),
            Self::Content(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PostServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Api(err) => Some(err),
            Self::Content(err) => Some(err),
        }
    }
}

impl From<PostValidationError> for PostServiceError {
    fn from(value: PostValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ApiError> for PostServiceError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<ContentError> for PostServiceError {
    fn from(value: ContentError) -> Self {
        Self::Content(value)
    }
}

/// Form fields and editor content for one stored post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEditState {
    pub document_id: String,
    pub form: PostForm,
    /// `None` means "start the editor empty".
    pub content: Option<Document>,
}

/// Whether a submit creates a post or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget<'a> {
    Create,
    Update { document_id: &'a str },
}

/// Post service facade over an API client.
pub struct PostService<T: Transport> {
    client: ApiClient<T>,
}

impl<T: Transport> PostService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn list_posts(&self) -> Result<Vec<BlogPost>, PostServiceError> {
        Ok(self.client.list(Resource::BlogPosts)?)
    }

    /// Fetches a post and normalizes its stored content.
    pub fn load_for_edit(&self, document_id: &str) -> Result<PostEditState, PostServiceError> {
        let post: BlogPost = self.client.get(Resource::BlogPosts, document_id)?;
        let content = normalize_persisted(&post.content)?;
        Ok(PostEditState {
            document_id: post.document_id.clone(),
            form: PostForm::from_post(&post),
            content,
        })
    }

    /// Validates `form`, flushes the editor and creates or updates the post.
    ///
    /// `last_seen` is the most recent document delivered through the
    /// session's change callback; it is used only when the session cannot be
    /// read (not started yet, or already destroyed).
    ///
    /// Returns the payload that was sent.
    pub fn submit<E: NativeEditor>(
        &self,
        target: SubmitTarget<'_>,
        form: &PostForm,
        session: &EditorSession<E>,
        last_seen: Option<&Document>,
    ) -> Result<PostPayload, PostServiceError> {
        form.validate()?;

        let content = session.content().or_else(|| last_seen.cloned());
        let payload = form.to_payload(content);
        match target {
            SubmitTarget::Create => self.client.create(Resource::BlogPosts, &payload)?,
            SubmitTarget::Update { document_id } => {
                self.client
                    .update(Resource::BlogPosts, document_id, &payload)?
            }
        }

        info!(
            "event=post_submit module=service status=ok action={} has_content={} blocks={}",
            match target {
                SubmitTarget::Create => "create",
                SubmitTarget::Update { .. } => "update",
            },
            payload.content.is_some(),
            payload.content.as_ref().map_or(0, |doc| doc.blocks.len())
        );
        Ok(payload)
    }

    pub fn delete_post(&self, document_id: &str) -> Result<(), PostServiceError> {
        self.client.delete(Resource::BlogPosts, document_id)?;
        Ok(())
    }
}
