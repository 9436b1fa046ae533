//! Shared setup for scenario suites.
//!
//! A `Harness` owns one authenticated and one anonymous client built from
//! the same configuration, and resolves the rotating "public" user lazily:
//! the first element of `GET /users` is fetched once and reused for the
//! harness's lifetime. Nothing here is hard-coded against the remote
//! dataset.

use std::sync::OnceLock;

use serde::Deserialize;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{fmt, registry, EnvFilter};

use crate::client::GoRestClient;
use crate::config::{ConfigError, ContractConfig};
use crate::error::ContractError;
use crate::fixtures::{random_post, random_todo, random_user};
use crate::routes;
use crate::types::{CreatePost, CreateTodo, CreateUser, Post, Todo};

/// Install a test-friendly subscriber filtered by `RUST_LOG`. Safe to call
/// from every test.
pub fn init_tracing() {
    drop(
        registry()
            .with(fmt::layer().with_test_writer().with_target(false))
            .with(EnvFilter::from_default_env())
            .try_init(),
    );
}

#[derive(Deserialize)]
struct Assigned {
    id: u64,
}

#[derive(Debug)]
pub struct Harness {
    pub authed: GoRestClient,
    pub anonymous: GoRestClient,
    public_user: OnceLock<u64>,
}

impl Harness {
    pub fn new(config: &ContractConfig) -> Self {
        Self {
            authed: GoRestClient::new(&config.base_url, Some(&config.token)).with_timeout(config.timeout),
            anonymous: GoRestClient::new(&config.base_url, None).with_timeout(config.timeout),
            public_user: OnceLock::new(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let config = ContractConfig::load()?;
        info!(base_url = %config.base_url, timeout = ?config.timeout, "contract harness configured");
        Ok(Self::new(&config))
    }

    /// Id of the first user in the public listing, fetched on first use.
    pub fn public_user_id(&self) -> Result<u64, ContractError> {
        if let Some(id) = self.public_user.get() {
            return Ok(*id);
        }
        let response = self.anonymous.get(&routes::users())?;
        response.expect_status(200)?;
        let id = response
            .body
            .get(0)
            .and_then(|user| user.get("id"))
            .and_then(|id| id.as_u64())
            .ok_or_else(|| ContractError::MissingPublicUser(response.body_text()))?;
        info!(public_user_id = id, "resolved public user");
        Ok(*self.public_user.get_or_init(|| id))
    }

    /// Create a user from fresh fixture data; returns the payload and its id.
    pub fn create_user(&self) -> Result<(CreateUser, u64), ContractError> {
        let data = random_user();
        let response = self.authed.post(&routes::users(), &data)?;
        let Assigned { id } = response.expect_status(201)?.json::<Assigned>()?;
        Ok((data, id))
    }

    pub fn create_post(&self, user_id: u64) -> Result<(CreatePost, Post), ContractError> {
        let data = random_post();
        let response = self.authed.post(&routes::user_posts(user_id), &data)?;
        let post = response.expect_status(201)?.json()?;
        Ok((data, post))
    }

    pub fn create_todo(&self, user_id: u64) -> Result<(CreateTodo, Todo), ContractError> {
        let data = random_todo();
        let response = self.authed.post(&routes::user_todos(user_id), &data)?;
        let todo = response.expect_status(201)?.json()?;
        Ok((data, todo))
    }
}
