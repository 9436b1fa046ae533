//! Contract-test core for a public user/post/todo REST API.
//!
//! # Overview
//! The remote service is a black box. This crate provides what scenario
//! suites need to drive it and judge its answers: domain shapes, randomised
//! fixtures, a verb-based HTTP client, and partial response matchers.
//!
//! # Design
//! - `GoRestClient` is stateless beyond its base URL and optional token;
//!   requests are built as plain data (`HttpRequest`) before one round trip
//!   executes them.
//! - Status codes are data, not errors. Scenarios assert them with
//!   `ApiResponse::expect_status`, whose failure carries the actual body.
//! - `matchers` checks bodies by inclusion: literal fields must echo back,
//!   server-assigned ones only need the right JSON type.
//! - Configuration and the shared public-user lookup live in `config` and
//!   `harness`; a missing base URL or token is fatal before any scenario runs.

pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod http;
pub mod matchers;
pub mod routes;
pub mod types;

pub use client::GoRestClient;
pub use config::{ConfigError, ContractConfig};
pub use error::{ClientError, ContractError};
pub use harness::{init_tracing, Harness};
pub use http::{ApiResponse, HttpMethod, HttpRequest};
pub use matchers::{errors_containing, Expectation, JsonType, MatchError, ObjectPattern, Rule};
pub use types::{
    CreatePost, CreateTodo, CreateUser, FieldError, Gender, Post, Todo, TodoStatus, UpdatePost, UpdateTodo,
    UpdateUser, User, UserStatus,
};
