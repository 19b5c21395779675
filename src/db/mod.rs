//! Database Module
//!
//! Owns the embedded SurrealDB connection and the schema bootstrap. The
//! service object is created once at startup and injected into the server
//! state; nothing else in the crate opens a connection.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "menu";
const DATABASE: &str = "menu";

/// Table and index definitions applied on every startup.
///
/// The UNIQUE indexes on the normalized `nameLower` column are the
/// authoritative duplicate-name guard: application-level checks are advisory
/// and a concurrent create that slips past them fails here.
const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS uniq_category_name
        ON TABLE category COLUMNS nameLower UNIQUE;

    DEFINE TABLE IF NOT EXISTS subcategory SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS uniq_subcategory_name
        ON TABLE subcategory COLUMNS category, nameLower UNIQUE;

    DEFINE TABLE IF NOT EXISTS item SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS uniq_item_name
        ON TABLE item COLUMNS category, nameLower UNIQUE;
";

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path` and apply the schema
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let service = Self { db };
        service.init().await?;

        tracing::info!("Database ready at {}", db_path.display());
        Ok(service)
    }

    /// Open an in-memory database (tests and ephemeral runs)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        let service = Self { db };
        service.init().await?;
        Ok(service)
    }

    async fn init(&self) -> Result<(), AppError> {
        self.db
            .use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        self.db
            .query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;

        Ok(())
    }
}
