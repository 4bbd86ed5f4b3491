//! Blog post record, form and payload.
//!
//! # Invariants
//! - `content` on `BlogPost` is kept as raw JSON; it goes through
//!   `content::persisted::normalize_persisted` before reaching an editor.
//! - `PostPayload` always serializes `blog_post_content`, `null` included.

use crate::content::document::Document;
use crate::model::is_http_url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Publication state chosen in the post form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Publish,
    #[default]
    Save,
    Draft,
}

/// Blog post as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: u64,
    #[serde(rename = "documentId")]
    pub document_id: String,
    #[serde(rename = "blog_post_title", default)]
    pub title: String,
    #[serde(rename = "blog_post_description", default)]
    pub description: String,
    /// Raw persisted content: array, JSON-encoded string, plain text or null.
    #[serde(rename = "blog_post_content", default)]
    pub content: Value,
    #[serde(rename = "blog_post_image_url", default)]
    pub image_url: Option<String>,
    #[serde(rename = "blog_post_status", default)]
    pub status: PostStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
}

/// Editable post fields other than content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub description: String,
    /// Empty string means "no cover image".
    pub image_url: String,
    pub status: PostStatus,
}

/// Validation failure for `PostForm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    EmptyTitle,
    EmptyDescription,
    InvalidImageUrl(String),
}

impl Display for PostValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => f.write_str("post title is required"),
            Self::EmptyDescription => f.write_str("post description is required"),
            Self::InvalidImageUrl(value) => write!(f, "invalid image URL: `{value}`"),
        }
    }
}

impl Error for PostValidationError {}

impl PostForm {
    /// Prefills the form from a stored post.
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            image_url: post.image_url.clone().unwrap_or_default(),
            status: post.status,
        }
    }

    /// Checks required fields and the optional image URL.
    pub fn validate(&self) -> Result<(), PostValidationError> {
        if self.title.trim().is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(PostValidationError::EmptyDescription);
        }
        let image_url = self.image_url.trim();
        if !image_url.is_empty() && !is_http_url(image_url) {
            return Err(PostValidationError::InvalidImageUrl(image_url.to_string()));
        }
        Ok(())
    }

    /// Builds the create/update body fields with `content` attached.
    pub fn to_payload(&self, content: Option<Document>) -> PostPayload {
        PostPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            content,
            image_url: self.image_url.trim().to_string(),
            status: self.status,
        }
    }
}

/// Body fields of a post create/update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPayload {
    #[serde(rename = "blog_post_title")]
    pub title: String,
    #[serde(rename = "blog_post_description")]
    pub description: String,
    #[serde(rename = "blog_post_content")]
    pub content: Option<Document>,
    #[serde(rename = "blog_post_image_url")]
    pub image_url: String,
    #[serde(rename = "blog_post_status")]
    pub status: PostStatus,
}
