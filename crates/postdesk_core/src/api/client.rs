//! Envelope-aware CRUD client over a `Transport`.

use crate::api::resource::Resource;
use crate::api::{ApiError, ApiResult, Transport};
use crate::config::ClientConfig;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Request};
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const JSON_MEDIA_TYPE: &str = "application/json";
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Serialize)]
struct OutgoingEnvelope<'a, B> {
    data: &'a B,
}

#[derive(Deserialize)]
struct IncomingEnvelope<R> {
    data: R,
}

/// CRUD client for backend collections.
pub struct ApiClient<T: Transport> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Lists all records of `resource`.
    pub fn list<R: DeserializeOwned>(&self, resource: Resource) -> ApiResult<Vec<R>> {
        let url = self.collection_url(resource, None, resource.read_query())?;
        let body = self.execute(resource, Method::GET, url, None)?;
        decode_envelope(&body)
    }

    /// Fetches one record by document id.
    pub fn get<R: DeserializeOwned>(&self, resource: Resource, id: &str) -> ApiResult<R> {
        let url = self.collection_url(resource, Some(id), resource.read_query())?;
        let body = self.execute(resource, Method::GET, url, None)?;
        decode_envelope(&body)
    }

    /// Creates a record from `data`, sent as `{ "data": data }`.
    pub fn create<B: Serialize>(&self, resource: Resource, data: &B) -> ApiResult<()> {
        let url = self.collection_url(resource, None, None)?;
        let body = encode_envelope(data)?;
        self.execute(resource, Method::POST, url, Some(body))?;
        Ok(())
    }

    /// Replaces a record's fields with `data`, sent as `{ "data": data }`.
    pub fn update<B: Serialize>(&self, resource: Resource, id: &str, data: &B) -> ApiResult<()> {
        let url = self.collection_url(resource, Some(id), None)?;
        let body = encode_envelope(data)?;
        self.execute(resource, Method::PUT, url, Some(body))?;
        Ok(())
    }

    pub fn delete(&self, resource: Resource, id: &str) -> ApiResult<()> {
        let url = self.collection_url(resource, Some(id), None)?;
        self.execute(resource, Method::DELETE, url, None)?;
        Ok(())
    }

    fn collection_url(
        &self,
        resource: Resource,
        id: Option<&str>,
        query: Option<&str>,
    ) -> ApiResult<String> {
        let mut url = format!("{}/{}", self.config.base_url(), resource.path_segment());
        if let Some(id) = id {
            url.push('/');
            url.push_str(validate_id(id)?);
        }
        if let Some(query) = query {
            url.push('?');
            url.push_str(query);
        }
        Ok(url)
    }

    fn execute(
        &self,
        resource: Resource,
        method: Method,
        url: String,
        body: Option<Vec<u8>>,
    ) -> ApiResult<Vec<u8>> {
        let started_at = Instant::now();
        let request = self.build_request(method.clone(), url, body)?;

        let response = match self.transport.send(request) {
            Ok(response) => response,
            Err(err) => {
                error!(
                    "event=api_request module=api status=error method={} resource={} duration_ms={} error_code=transport_failed error={}",
                    method,
                    resource.path_segment(),
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        let status = response.status();
        let body = response.into_body();
        if !status.is_success() {
            error!(
                "event=api_request module=api status=error method={} resource={} http_status={} duration_ms={} error_code=http_status",
                method,
                resource.path_segment(),
                status.as_u16(),
                started_at.elapsed().as_millis()
            );
            return Err(ApiError::Status {
                status,
                body: error_body_summary(&body),
            });
        }

        info!(
            "event=api_request module=api status=ok method={} resource={} http_status={} duration_ms={} bytes={}",
            method,
            resource.path_segment(),
            status.as_u16(),
            started_at.elapsed().as_millis(),
            body.len()
        );
        Ok(body)
    }

    fn build_request(
        &self,
        method: Method,
        url: String,
        body: Option<Vec<u8>>,
    ) -> ApiResult<Request<Vec<u8>>> {
        let mut builder = Request::builder()
            .method(method)
            .uri(url)
            .header(ACCEPT, JSON_MEDIA_TYPE);
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, JSON_MEDIA_TYPE);
        }
        if let Some(token) = self.config.bearer_token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        Ok(builder.body(body.unwrap_or_default())?)
    }
}

fn validate_id(id: &str) -> ApiResult<&str> {
    let trimmed = id.trim();
    let escapes_segment = trimmed
        .chars()
        .any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace());
    if trimmed.is_empty() || escapes_segment || trimmed == "." || trimmed == ".." {
        return Err(ApiError::InvalidId(id.to_string()));
    }
    Ok(trimmed)
}

fn encode_envelope<B: Serialize>(data: &B) -> ApiResult<Vec<u8>> {
    serde_json::to_vec(&OutgoingEnvelope { data }).map_err(ApiError::Encode)
}

fn decode_envelope<R: DeserializeOwned>(body: &[u8]) -> ApiResult<R> {
    serde_json::from_slice::<IncomingEnvelope<R>>(body)
        .map(|envelope| envelope.data)
        .map_err(ApiError::Decode)
}

fn error_body_summary(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let flattened = text.replace(['\n', '\r'], " ");
    let mut summary: String = flattened.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
    if flattened.trim().chars().count() > MAX_ERROR_BODY_CHARS {
        summary.push_str("...");
    }
    summary
}
