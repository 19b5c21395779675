//! Catalog Module
//!
//! Write orchestration for the menu hierarchy: the consistency guard and the
//! service that sequences guard checks, tax/amount resolution, and
//! persistence.

pub mod guard;
pub mod service;

pub use guard::{ConsistencyGuard, GuardError};
pub use service::CatalogService;
