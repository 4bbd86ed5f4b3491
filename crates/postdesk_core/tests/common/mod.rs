#![allow(dead_code)]

use http::{Method, Request, Response, StatusCode};
use postdesk_core::{
    ApiClient, ClientConfig, NoCredentials, StaticToken, Transport, TransportError,
};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;

pub const BASE_URL: &str = "https://cms.example.com/api";
pub const TOKEN: &str = "test-token";

/// Request as seen by the fake backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub uri: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

/// In-process transport that records requests and replays queued responses.
///
/// Unqueued requests get `200 {}`.
#[derive(Default)]
pub struct FakeTransport {
    requests: RefCell<Vec<Recorded>>,
    responses: RefCell<VecDeque<Result<Response<Vec<u8>>, TransportError>>>,
}

impl FakeTransport {
    pub fn respond_json(&self, status: StatusCode, body: Value) {
        let response = Response::builder()
            .status(status)
            .body(serde_json::to_vec(&body).unwrap())
            .unwrap();
        self.responses.borrow_mut().push_back(Ok(response));
    }

    pub fn respond_raw(&self, status: StatusCode, body: &str) {
        let response = Response::builder()
            .status(status)
            .body(body.as_bytes().to_vec())
            .unwrap();
        self.responses.borrow_mut().push_back(Ok(response));
    }

    pub fn fail(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.borrow().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests.borrow().last().cloned().unwrap()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, TransportError> {
        let header = |name: http::header::HeaderName| {
            request
                .headers()
                .get(name)
                .map(|value| value.to_str().unwrap().to_string())
        };
        let body = if request.body().is_empty() {
            None
        } else {
            Some(serde_json::from_slice(request.body()).unwrap())
        };
        self.requests.borrow_mut().push(Recorded {
            method: request.method().clone(),
            uri: request.uri().to_string(),
            authorization: header(http::header::AUTHORIZATION),
            content_type: header(http::header::CONTENT_TYPE),
            body,
        });

        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Response::new(b"{}".to_vec())))
    }
}

pub fn config() -> ClientConfig {
    ClientConfig::new(BASE_URL, Arc::new(StaticToken::new(TOKEN))).unwrap()
}

pub fn anonymous_config() -> ClientConfig {
    ClientConfig::new(BASE_URL, Arc::new(NoCredentials)).unwrap()
}

pub fn client() -> ApiClient<FakeTransport> {
    ApiClient::new(config(), FakeTransport::default())
}
