//! Terminal front-end for the industrial-attachment management API.
//!
//! One binary serves all four roles. Screens are mounted per [`Route`], each
//! guarded by the role's stored session; see [`app::App`].
//!
//! [`Route`]: attache_core::route::Route

pub mod app;
pub mod config;
pub mod screens;
pub mod ui;
