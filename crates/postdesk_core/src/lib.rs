//! Core logic for the postdesk content dashboard.
//! This crate is the single source of truth for content invariants.

pub mod api;
pub mod config;
pub mod content;
pub mod editor;
pub mod logging;
pub mod model;
pub mod service;

pub use api::client::ApiClient;
pub use api::resource::Resource;
pub use api::{ApiError, ApiResult, Transport, TransportError};
pub use config::{ClientConfig, ConfigError, CredentialProvider, NoCredentials, StaticToken};
pub use content::decode::decode;
pub use content::delta::{Attributes, Delta, DeltaOp, Embed, Insert};
pub use content::document::{Block, Document, ImageNode, InlineNode, TextMarks, TextNode};
pub use content::encode::encode;
pub use content::persisted::normalize_persisted;
pub use content::ContentError;
pub use editor::memory::MemoryEditor;
pub use editor::session::{ChangeGuard, EditorSession, SessionError, SessionPhase};
pub use editor::{NativeEditor, Selection};
pub use logging::{
    default_log_level, init_logging, logging_status, LogLevel, LogSettings, LoggingError,
};
pub use model::post::{BlogPost, PostForm, PostPayload, PostStatus, PostValidationError};
pub use model::taxonomy::{
    Category, CategoryForm, Domain, DomainForm, Tag, TagForm, TaxonomyValidationError,
};
pub use service::post_service::{PostEditState, PostService, PostServiceError, SubmitTarget};
pub use service::taxonomy_service::{TaxonomyService, TaxonomyServiceError};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
