//! # savings-api
//!
//! HTTP API server for the Savings Calculator.
//!
//! This crate provides:
//! - JSON endpoints over the settings and project stores (see [`routes`])
//! - Error-to-response mapping (`400` for validation, `404` for unknown ids)
//! - Server configuration loaded from TOML and the environment
//! - Server lifecycle: construction, serving, graceful shutdown

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use routes::router;
pub use server::Server;
pub use state::AppState;
