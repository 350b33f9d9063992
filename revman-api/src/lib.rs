//! Revman API - HTTP client for the Review Manager backend
//!
//! [`ApiClient`] implements the backend traits of `revman-core`, so the
//! views run unchanged against the real server.

mod client;
mod error;
mod rewards;
mod tasks;
mod users;

pub use client::{ApiClient, SESSION_COOKIE};
pub use error::{Error, Result};
