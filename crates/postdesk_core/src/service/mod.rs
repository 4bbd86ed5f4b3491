//! Dashboard use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, content conversion and API calls per screen.
//! - Keep hosts decoupled from request building and envelope details.
//!
//! # Invariants
//! - Forms are validated before any request is sent.
//! - Services never hold editor state; sessions are passed in per call.

pub mod post_service;
pub mod taxonomy_service;
