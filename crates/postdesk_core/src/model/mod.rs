//! Dashboard records and forms.
//!
//! # Responsibility
//! - Mirror the backend's record shapes (posts, categories, domains, tags).
//! - Validate form input before any request is built.
//!
//! # Invariants
//! - Field names on the wire match the backend schema exactly
//!   (`blog_post_title`, `documentId`, ...); Rust names stay idiomatic.
//! - Forms never produce a payload that failed `validate()` in services.

use once_cell::sync::Lazy;
use regex::Regex;

pub mod post;
pub mod taxonomy;

static HTTP_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://[^\s/?#]+[^\s]*$").expect("valid url regex"));
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));
static SLUG_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug separator regex"));

/// Returns whether `value` is an absolute http(s) URL.
pub fn is_http_url(value: &str) -> bool {
    HTTP_URL_RE.is_match(value)
}

/// Returns whether `value` is lowercase kebab-case (`rust-tips`).
pub fn is_slug(value: &str) -> bool {
    SLUG_RE.is_match(value)
}

/// Derives a kebab-case slug from free text; empty when nothing survives.
pub fn slugify(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    SLUG_SEPARATOR_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
