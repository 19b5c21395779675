//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Category, CategoryId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "category";

const DUPLICATE_MSG: &str = "Category with the same name already exists.";

/// Resolved field set persisted on create. Tax fields arrive already resolved;
/// the repository only adds the lookup column and timestamps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tax_applicability: bool,
    pub tax: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
}

/// Partial update merged into the stored record
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_applicability: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
}

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all categories ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id (with or without the "category:" prefix)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let category: Option<Category> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(category)
    }

    /// Case-insensitive exact-match lookup by name
    pub async fn find_by_name_ci(&self, name: &str) -> RepoResult<Option<Category>> {
        let lowered = name.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE nameLower = $name LIMIT 1")
            .bind(("name", lowered))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Case-insensitive duplicate lookup, optionally excluding one record
    pub async fn find_duplicate(
        &self,
        name: &str,
        exclude: Option<&CategoryId>,
    ) -> RepoResult<Option<Category>> {
        let lowered = name.to_lowercase();
        let mut result = if let Some(exclude) = exclude {
            self.base
                .db()
                .query("SELECT * FROM category WHERE nameLower = $name AND id != $exclude LIMIT 1")
                .bind(("name", lowered))
                .bind(("exclude", exclude.clone()))
                .await?
        } else {
            self.base
                .db()
                .query("SELECT * FROM category WHERE nameLower = $name LIMIT 1")
                .bind(("name", lowered))
                .await?
        };
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new category
    pub async fn create(&self, data: NewCategory) -> RepoResult<Category> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Content {
            #[serde(flatten)]
            data: NewCategory,
            name_lower: String,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
        }

        let now = Utc::now();
        let content = Content {
            name_lower: data.name.to_lowercase(),
            data,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Category> = self
            .base
            .db()
            .create(TABLE)
            .content(content)
            .await
            .map_err(|e| remap_duplicate(e.into()))?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Merge a partial update into a category and return the updated record
    pub async fn update(&self, id: &str, patch: CategoryPatch) -> RepoResult<Category> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct MergeData {
            #[serde(flatten)]
            patch: CategoryPatch,
            #[serde(skip_serializing_if = "Option::is_none")]
            name_lower: Option<String>,
            updated_at: DateTime<Utc>,
        }

        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let data = MergeData {
            name_lower: patch.name.as_ref().map(|n| n.to_lowercase()),
            patch,
            updated_at: Utc::now(),
        };

        let thing = RecordId::from_table_key(TABLE, pure_id.clone());
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", data))
            .await
            .map_err(|e| remap_duplicate(e.into()))?
            .check()
            .map_err(|e| remap_duplicate(e.into()))?;

        self.find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Category not found.".to_string()))
    }
}

fn remap_duplicate(err: RepoError) -> RepoError {
    match err {
        RepoError::Duplicate(_) => RepoError::Duplicate(DUPLICATE_MSG.to_string()),
        other => other,
    }
}
