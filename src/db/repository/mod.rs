//! Repository Module
//!
//! CRUD access to the menu hierarchy tables. Record references are stored as
//! `"table:id"` strings and compared with exact string equality; ids coming
//! in from the API are accepted with or without the table prefix.

pub mod category;
pub mod item;
pub mod subcategory;

// Re-exports
pub use category::CategoryRepository;
pub use item::ItemRepository;
pub use subcategory::SubCategoryRepository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // A UNIQUE index violation is the storage-level duplicate-name guard
        // firing; it must not surface as a generic server error.
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::duplicate(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Extract the pure id if it contains a table prefix
/// (e.g. "category:xxx" -> "xxx")
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Full `"table:id"` reference string for a possibly-bare id
pub fn record_ref(table: &str, id: &str) -> String {
    format!("{}:{}", table, strip_table_prefix(table, id))
}
