//! Core types and trait definitions for the attache client.
//!
//! This crate is deliberately free of HTTP, terminal and database
//! dependencies. Records mirror the remote API's JSON shapes; everything the
//! client owns locally (sessions, drafts, error maps, the match board) is
//! modelled here so that it can be exercised without a server.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

pub mod error;
pub mod form;
pub mod forms;
pub mod logbook;
pub mod matching;
pub mod model;
pub mod reference;
pub mod role;
pub mod route;
pub mod session;

pub use error::{Error, Result};
