//! HTTP access to the attachment-management API.
//!
//! [`ApiClient`] wraps every endpoint the terminal client calls;
//! [`ReferenceCache`] sits in front of the two lookup lists so that every
//! screen with a selection control shares one copy of them.

mod cache;
mod client;

pub mod error;

pub use cache::ReferenceCache;
pub use client::{ApiClient, ApiConfig};
pub use error::{ApiError, Result};
