//! VOblako cloud storage mock API
//!
//! An in-memory file storage backend with session-cookie authentication,
//! a static folder tree for the browser UI, and an optional passthrough
//! mode that forwards every request to an external API.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod store;
pub mod tree;
