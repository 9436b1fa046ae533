//! HTTP transport types.
//!
//! # Design
//! Requests are described as plain data before they are sent, so header
//! injection and URL construction can be checked without a network. A
//! response is reduced to what the contract talks about: the numeric status
//! and the JSON body. Non-2xx statuses are ordinary values here; deciding
//! whether a status is acceptable is the caller's job.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ContractError;
use crate::matchers::Expectation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `GoRestClient::build`; executed by `GoRestClient::execute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The observable outcome of one round trip.
///
/// An empty body (as sent with 204) is represented as JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Fail with the actual status and body unless the status is `expected`.
    pub fn expect_status(&self, expected: u16) -> Result<&Self, ContractError> {
        if self.status == expected {
            return Ok(self);
        }
        Err(ContractError::UnexpectedStatus {
            expected,
            actual: self.status,
            body: self.body_text(),
        })
    }

    /// Check the status, then the body against `expectation`.
    pub fn expect(&self, expected: u16, expectation: &Expectation) -> Result<&Self, ContractError> {
        self.expect_status(expected)?;
        expectation.verify(&self.body)?;
        Ok(self)
    }

    /// Decode the body into a typed value.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ContractError> {
        serde_json::from_value(self.body.clone()).map_err(|source| ContractError::Shape {
            target: std::any::type_name::<T>(),
            body: self.body_text(),
            source,
        })
    }

    /// Pretty-printed body for diagnostics.
    pub fn body_text(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.to_string())
    }
}
