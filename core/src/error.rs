//! Error types for the contract client and suites.
//!
//! # Design
//! The client never turns an HTTP status into an error: 401, 404 and 422 are
//! the expected outcome of negative-path scenarios and come back as data.
//! `ClientError` is reserved for the request never completing or its body
//! being unreadable. `ContractError` is what a scenario reports when the
//! remote service disagrees with the documented behaviour; it always carries
//! the actual status and body for diagnosis.

use thiserror::Error;

use crate::http::HttpMethod;
use crate::matchers::MatchError;

/// Failures of a single round trip.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS, TLS or timeout failure. Never retried.
    #[error("{method} {url}: transport failed: {source}")]
    Transport {
        method: HttpMethod,
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// The response arrived but its body is not JSON.
    #[error("{method} {url} answered {status} with a non-JSON body: {body}")]
    Decode {
        method: HttpMethod,
        url: String,
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// A GET or DELETE request was handed a body; it is never sent.
    #[error("{method} {url}: {method} requests carry no body")]
    UnexpectedBody { method: HttpMethod, url: String },

    /// The request payload could not be serialized to JSON.
    #[error("request body could not be serialized: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A disagreement between the remote service and its documented contract.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("expected HTTP {expected}, got {actual}; body: {body}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error(transparent)]
    Mismatch(#[from] MatchError),

    #[error("body does not decode as {target}: {source}; body: {body}")]
    Shape {
        target: &'static str,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("GET /users returned no public user: {0}")]
    MissingPublicUser(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}
