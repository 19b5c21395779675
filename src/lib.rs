//! Menu Server - menu management REST API
//!
//! A three-level menu hierarchy (Category → SubCategory → Item) with tax
//! inheritance and derived pricing.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # configuration, state, server lifecycle
//! ├── api/           # HTTP routes and handlers
//! ├── catalog/       # write orchestration: guard + service
//! ├── pricing/       # pure tax/amount resolution
//! ├── db/            # embedded SurrealDB: models + repositories
//! └── utils/         # errors, envelope, logging
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod db;
pub mod pricing;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
