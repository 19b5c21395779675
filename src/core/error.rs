use thiserror::Error;

/// Startup and server-lifecycle errors. Request-scoped errors are
/// [`crate::utils::AppError`]; this type only covers what happens before the
/// router is serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;
