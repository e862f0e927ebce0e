//! SQLite backend for the attache session store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every session field is one row, so a
//! session survives restarts the way a browser's local storage survives
//! page loads.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteSessionStore;

#[cfg(test)]
mod tests;
