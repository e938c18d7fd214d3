pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod infra;
pub mod operator;
pub mod router;
pub mod state;
pub mod usecase;
