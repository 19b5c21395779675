//! Core Module
//!
//! Configuration, shared server state, and the HTTP server lifecycle.

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
