//! API client configuration.
//!
//! # Responsibility
//! - Describe which backend the dashboard talks to and how it authenticates.
//! - Load that description from the process environment.
//!
//! # Invariants
//! - Credentials are always injected through `CredentialProvider`; nothing in
//!   core embeds a token.
//! - `base_url` is an absolute http(s) URL without a trailing `/`.

use crate::model::is_http_url;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Environment key holding the API base URL.
pub const ENV_BASE_URL: &str = "POSTDESK_BASE_URL";
/// Environment key holding the optional bearer token.
pub const ENV_API_TOKEN: &str = "POSTDESK_API_TOKEN";
/// Environment key enabling file logging in the given absolute directory.
pub const ENV_LOG_DIR: &str = "POSTDESK_LOG_DIR";
/// Environment key overriding `logging::default_log_level()`.
pub const ENV_LOG_LEVEL: &str = "POSTDESK_LOG_LEVEL";

/// Source of the bearer token attached to each request.
pub trait CredentialProvider: Send + Sync {
    /// Returns the token to send, or `None` for anonymous requests.
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed token, typically read once at startup.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl Debug for StaticToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Provider for backends that need no authentication.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required key is absent or blank.
    Missing(&'static str),
    /// Base URL is not an absolute http(s) URL.
    InvalidBaseUrl(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing required setting `{key}`"),
            Self::InvalidBaseUrl(value) => {
                write!(f, "base URL must be an absolute http(s) URL, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Backend connection settings passed explicitly to the API client.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl ClientConfig {
    /// Builds a config after normalizing and validating `base_url`.
    ///
    /// # Errors
    /// - `InvalidBaseUrl` when `base_url` is not an absolute http(s) URL.
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            credentials,
        })
    }

    /// Reads `POSTDESK_BASE_URL` and `POSTDESK_API_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading keys through `lookup`.
    ///
    /// # Errors
    /// - `Missing` when the base URL key is absent or blank.
    /// - `InvalidBaseUrl` when it is not an absolute http(s) URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(ENV_BASE_URL))?;

        let credentials: Arc<dyn CredentialProvider> = match lookup(ENV_API_TOKEN) {
            Some(token) if !token.trim().is_empty() => {
                Arc::new(StaticToken::new(token.trim().to_string()))
            }
            _ => Arc::new(NoCredentials),
        };

        Self::new(&base_url, credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.credentials.bearer_token()
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !is_http_url(trimmed) {
        return Err(ConfigError::InvalidBaseUrl(raw.trim().to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, ConfigError, ENV_API_TOKEN, ENV_BASE_URL};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_trims_trailing_slash_and_reads_token() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, " https://cms.example.com/api/ "),
            (ENV_API_TOKEN, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), "https://cms.example.com/api");
        assert_eq!(config.bearer_token().as_deref(), Some("secret"));
    }

    #[test]
    fn blank_token_means_anonymous() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "http://localhost:1337/api"),
            (ENV_API_TOKEN, "  "),
        ]))
        .unwrap();
        assert_eq!(config.bearer_token(), None);
    }

    #[test]
    fn missing_and_invalid_base_url_are_rejected() {
        let missing = ClientConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(missing, ConfigError::Missing(ENV_BASE_URL));

        let invalid =
            ClientConfig::from_lookup(lookup_from(&[(ENV_BASE_URL, "cms.example.com")]))
                .unwrap_err();
        assert!(matches!(invalid, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn debug_output_hides_credentials() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "https://cms.example.com"),
            (ENV_API_TOKEN, "secret"),
        ]))
        .unwrap();
        assert!(!format!("{config:?}").contains("secret"));
    }
}
