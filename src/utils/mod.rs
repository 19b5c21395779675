//! Common utility types and functions
//!
//! - [`AppError`] - application error type
//! - [`ApiResponse`] - API response envelope
//! - logging setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::{ApiResponse, AppError};
pub use error::{created, ok};
pub use result::AppResult;
