//! SubCategory Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{SubCategory, SubCategoryId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "subcategory";

const DUPLICATE_MSG: &str = "Sub-category with the same name already exists in this category.";

/// Resolved field set persisted on create
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubCategory {
    /// Owning category as a `"category:id"` reference
    pub category: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_applicability: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
}

/// Partial update merged into the stored record
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryPatch {
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
}

#[derive(Clone)]
pub struct SubCategoryRepository {
    base: BaseRepository,
}

impl SubCategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all subcategories ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<SubCategory>> {
        let subcategories: Vec<SubCategory> = self
            .base
            .db()
            .query("SELECT * FROM subcategory ORDER BY name")
            .await?
            .take(0)?;
        Ok(subcategories)
    }

    /// Find subcategory by id (with or without the "subcategory:" prefix)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<SubCategory>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let subcategory: Option<SubCategory> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(subcategory)
    }

    /// Case-insensitive exact-match lookup by name (across all categories)
    pub async fn find_by_name_ci(&self, name: &str) -> RepoResult<Option<SubCategory>> {
        let lowered = name.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM subcategory WHERE nameLower = $name LIMIT 1")
            .bind(("name", lowered))
            .await?;
        let subcategories: Vec<SubCategory> = result.take(0)?;
        Ok(subcategories.into_iter().next())
    }

    /// All subcategories of one category, ordered by name
    pub async fn find_by_category(&self, category_ref: &str) -> RepoResult<Vec<SubCategory>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM subcategory WHERE category = $category ORDER BY name")
            .bind(("category", category_ref.to_string()))
            .await?;
        let subcategories: Vec<SubCategory> = result.take(0)?;
        Ok(subcategories)
    }

    /// Case-insensitive duplicate lookup scoped to one category, optionally
    /// excluding one record
    pub async fn find_duplicate(
        &self,
        category_ref: &str,
        name: &str,
        exclude: Option<&SubCategoryId>,
    ) -> RepoResult<Option<SubCategory>> {
        let lowered = name.to_lowercase();
        let mut result = if let Some(exclude) = exclude {
            self.base
                .db()
                .query(
                    "SELECT * FROM subcategory \
                     WHERE category = $category AND nameLower = $name AND id != $exclude LIMIT 1",
                )
                .bind(("category", category_ref.to_string()))
                .bind(("name", lowered))
                .bind(("exclude", exclude.clone()))
                .await?
        } else {
            self.base
                .db()
                .query(
                    "SELECT * FROM subcategory \
                     WHERE category = $category AND nameLower = $name LIMIT 1",
                )
                .bind(("category", category_ref.to_string()))
                .bind(("name", lowered))
                .await?
        };
        let subcategories: Vec<SubCategory> = result.take(0)?;
        Ok(subcategories.into_iter().next())
    }

    /// Create a new subcategory
    pub async fn create(&self, data: NewSubCategory) -> RepoResult<SubCategory> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Content {
            #[serde(flatten)]
            data: NewSubCategory,
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

        let created: Option<SubCategory> = self
            .base
            .db()
            .create(TABLE)
            .content(content)
            .await
            .map_err(|e| remap_duplicate(e.into()))?;
        created.ok_or_else(|| RepoError::Database("Failed to create subcategory".to_string()))
    }

    /// Merge a partial update into a subcategory and return the updated record
    pub async fn update(&self, id: &str, patch: SubCategoryPatch) -> RepoResult<SubCategory> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct MergeData {
            #[serde(flatten)]
            patch: SubCategoryPatch,
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
            .ok_or_else(|| RepoError::NotFound("Sub-category not found.".to_string()))
    }
}

fn remap_duplicate(err: RepoError) -> RepoError {
    match err {
        RepoError::Duplicate(_) => RepoError::Duplicate(DUPLICATE_MSG.to_string()),
        other => other,
    }
}
