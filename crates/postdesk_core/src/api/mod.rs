//! REST API access for dashboard resources.
//!
//! # Responsibility
//! - Build requests for the backend's `{ data: ... }` envelope convention.
//! - Keep the HTTP stack behind the `Transport` trait so core stays
//!   network-agnostic.
//!
//! # Invariants
//! - Every request goes through one `ClientConfig`; credentials come from its
//!   provider at send time.
//! - Non-2xx responses surface as `ApiError::Status`, never as decoded data.

use http::{Request, Response, StatusCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client;
pub mod resource;

pub type ApiResult<T> = Result<T, ApiError>;

/// Blocking request executor supplied by the host.
pub trait Transport {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, TransportError>;
}

/// Failure below HTTP semantics (connect, TLS, timeout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "transport failure: {}", self.0)
    }
}

impl Error for TransportError {}

/// Error for API calls.
#[derive(Debug)]
pub enum ApiError {
    /// Record id would escape its path segment.
    InvalidId(String),
    /// Request could not be assembled.
    Request(http::Error),
    Transport(TransportError),
    /// Backend answered with a non-success status.
    Status { status: StatusCode, body: String },
    /// Request body could not be serialized.
    Encode(serde_json::Error),
    /// Response body did not match the expected shape.
    Decode(serde_json::Error),
}

impl ApiError {
    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "invalid record id: `{id}`"),
            Self::Request(err) => write!(f, "invalid request: {err}"),
            Self::Transport(err) => write!(f, "{err}"),
            Self::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "request failed with status {status}")
                } else {
                    write!(f, "request failed with status {status}: {body}")
                }
            }
            Self::Encode(err) => write!(f, "failed to encode request body: {err}"),
            Self::Decode(err) => write!(f, "failed to decode response body: {err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Request(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::InvalidId(_) | Self::Status { .. } => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}

impl From<http::Error> for ApiError {
    fn from(value: http::Error) -> Self {
        Self::Request(value)
    }
}
