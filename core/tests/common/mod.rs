//! Shared setup for the live scenario suites.
//!
//! Each suite file is its own test binary, so the harness below (and the
//! public user it resolves) is shared by the scenarios of one suite only.
//! These suites talk to the real service; they are `#[ignore]`d and run with
//! `cargo test -- --ignored` once `BASE_URL` and `TOKEN` are exported.

#![allow(dead_code)]

use std::sync::LazyLock;

use gorest_core::{init_tracing, Harness};

pub const BLANK: &str = "can't be blank";
pub const TITLE_TOO_LONG: &str = "is too long (maximum is 200 characters)";
pub const GENDER_BLANK: &str = "can't be blank, can be male of female";
pub const TODO_STATUS_BLANK: &str = "can't be blank, can be pending or completed";
pub const EMAIL_INVALID: &str = "is invalid";
pub const EMAIL_TAKEN: &str = "has already been taken";

/// The suite's harness. Missing configuration aborts every scenario.
pub fn harness() -> &'static Harness {
    static HARNESS: LazyLock<Harness> = LazyLock::new(|| {
        init_tracing();
        Harness::from_env().unwrap_or_else(|err| panic!("{err}"))
    });
    &HARNESS
}
