use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;

/// Server state - shared handles injected into every request
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | immutable configuration |
/// | db | Surreal<Db> | embedded database handle |
///
/// Cloning is cheap; the database handle is internally reference-counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
}

impl ServerState {
    /// Open the on-disk database under the configured working directory
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db_service = DbService::new(&db_path)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
        })
    }

    /// In-memory state for tests and ephemeral runs
    pub async fn in_memory(config: &Config) -> Result<Self> {
        let db_service = DbService::memory()
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
        })
    }
}
