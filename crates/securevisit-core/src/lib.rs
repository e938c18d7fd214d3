//! Shared plumbing for SecureVisit services.
//!
//! Error envelope, env-based config, tracing setup, health handlers, request-id
//! middleware, the wall-clock port and a few serde / sea-orm helpers.

pub mod clock;
pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
