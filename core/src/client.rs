//! Verb-based HTTP client for the remote API.
//!
//! # Design
//! `GoRestClient` holds only a base URL, an optional bearer token and a
//! `ureq` agent; it carries no mutable state between calls, so one instance
//! can be shared across threads and an authenticated and an anonymous
//! instance can be used side by side. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` without I/O and
//! `execute`, which performs exactly one round trip: no retries, no caching.
//!
//! Status codes are never errors here. Transport failures propagate to the
//! caller untouched.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::http::{ApiResponse, HttpMethod, HttpRequest};

#[derive(Clone)]
pub struct GoRestClient {
    base_url: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl fmt::Debug for GoRestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoRestClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

fn agent(timeout: Option<Duration>) -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(timeout)
        .build()
        .new_agent()
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl GoRestClient {
    /// A client bound to `base_url`. With a token, every request carries
    /// `Authorization: Bearer <token>`; without one, requests are anonymous.
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
            agent: agent(None),
        }
    }

    /// Bound every round trip (connect through body read) by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = agent(Some(timeout));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn build_request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: self.url(path),
            headers,
            body,
        }
    }

    fn build_with_body<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(body).map_err(ClientError::Encode)?;
        Ok(self.build_request(method, path, Some(body)))
    }

    pub fn build_get(&self, path: &str) -> HttpRequest {
        self.build_request(HttpMethod::Get, path, None)
    }

    pub fn build_delete(&self, path: &str) -> HttpRequest {
        self.build_request(HttpMethod::Delete, path, None)
    }

    pub fn build_post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ClientError> {
        self.build_with_body(HttpMethod::Post, path, body)
    }

    pub fn build_put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ClientError> {
        self.build_with_body(HttpMethod::Put, path, body)
    }

    pub fn build_patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ClientError> {
        self.build_with_body(HttpMethod::Patch, path, body)
    }

    /// Perform one round trip.
    pub fn execute(&self, request: HttpRequest) -> Result<ApiResponse, ClientError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let result = match (method, body) {
            (HttpMethod::Get | HttpMethod::Delete, Some(_)) => {
                return Err(ClientError::UnexpectedBody { method, url });
            }
            (HttpMethod::Get, None) => with_headers(self.agent.get(&url), &headers).call(),
            (HttpMethod::Delete, None) => with_headers(self.agent.delete(&url), &headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(self.agent.post(&url), &headers).send(body.as_bytes()),
            (HttpMethod::Post, None) => with_headers(self.agent.post(&url), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(self.agent.put(&url), &headers).send(body.as_bytes()),
            (HttpMethod::Put, None) => with_headers(self.agent.put(&url), &headers).send_empty(),
            (HttpMethod::Patch, Some(body)) => with_headers(self.agent.patch(&url), &headers).send(body.as_bytes()),
            (HttpMethod::Patch, None) => with_headers(self.agent.patch(&url), &headers).send_empty(),
        };

        let transport = |source| ClientError::Transport {
            method,
            url: url.clone(),
            source,
        };
        let mut response = result.map_err(transport)?;
        let status = response.status().as_u16();
        let text = response.body_mut().read_to_string().map_err(transport)?;

        tracing::debug!(
            method = %method,
            url = %url,
            status,
            authenticated = self.token.is_some(),
            "round trip"
        );

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|source| ClientError::Decode {
                method,
                url: url.clone(),
                status,
                body: text.clone(),
                source,
            })?
        };

        Ok(ApiResponse { status, body })
    }

    pub fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.execute(self.build_get(path))
    }

    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse, ClientError> {
        self.execute(self.build_post(path, body)?)
    }

    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse, ClientError> {
        self.execute(self.build_put(path, body)?)
    }

    pub fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse, ClientError> {
        self.execute(self.build_patch(path, body)?)
    }

    pub fn delete(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.execute(self.build_delete(path))
    }
}
