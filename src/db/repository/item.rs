//! Item Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Item, ItemId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "item";

const DUPLICATE_MSG: &str = "Item with the same name already exists in this category.";

/// Resolved field set persisted on create. Tax and amounts arrive already
/// resolved; the repository only adds the lookup column and timestamps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    /// Owning category as a `"category:id"` reference
    pub category: String,
    /// Optional `"subcategory:id"` reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tax_applicability: bool,
    pub tax: f64,
    pub base_amount: f64,
    pub discount: f64,
    pub total_amount: f64,
}

/// Partial update merged into the stored record.
///
/// `sub_category` is tri-state: `None` keeps the current link, `Some(None)`
/// clears it (serialized as an explicit null), `Some(Some(_))` reassigns.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<Option<String>>,
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
    pub base_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
}

#[derive(Clone)]
pub struct ItemRepository {
    base: BaseRepository,
}

impl ItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all items ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Item>> {
        let items: Vec<Item> = self
            .base
            .db()
            .query("SELECT * FROM item ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find item by id (with or without the "item:" prefix)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Item>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let item: Option<Item> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(item)
    }

    /// Case-insensitive exact-match lookup by name (across all categories)
    pub async fn find_by_name_ci(&self, name: &str) -> RepoResult<Option<Item>> {
        let lowered = name.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM item WHERE nameLower = $name LIMIT 1")
            .bind(("name", lowered))
            .await?;
        let items: Vec<Item> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// All items of one category, ordered by name
    pub async fn find_by_category(&self, category_ref: &str) -> RepoResult<Vec<Item>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM item WHERE category = $category ORDER BY name")
            .bind(("category", category_ref.to_string()))
            .await?;
        let items: Vec<Item> = result.take(0)?;
        Ok(items)
    }

    /// All items of one subcategory, ordered by name
    pub async fn find_by_subcategory(&self, subcategory_ref: &str) -> RepoResult<Vec<Item>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM item WHERE subCategory = $subcategory ORDER BY name")
            .bind(("subcategory", subcategory_ref.to_string()))
            .await?;
        let items: Vec<Item> = result.take(0)?;
        Ok(items)
    }

    /// Case-insensitive substring search on the item name
    pub async fn search(&self, needle: &str, limit: usize) -> RepoResult<Vec<Item>> {
        let lowered = needle.to_lowercase();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM item \
                 WHERE string::contains(nameLower, $needle) \
                 ORDER BY name LIMIT $limit",
            )
            .bind(("needle", lowered))
            .bind(("limit", limit as i64))
            .await?;
        let items: Vec<Item> = result.take(0)?;
        Ok(items)
    }

    /// Case-insensitive duplicate lookup scoped to one category, optionally
    /// excluding one record
    pub async fn find_duplicate(
        &self,
        category_ref: &str,
        name: &str,
        exclude: Option<&ItemId>,
    ) -> RepoResult<Option<Item>> {
        let lowered = name.to_lowercase();
        let mut result = if let Some(exclude) = exclude {
            self.base
                .db()
                .query(
                    "SELECT * FROM item \
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
                    "SELECT * FROM item \
                     WHERE category = $category AND nameLower = $name LIMIT 1",
                )
                .bind(("category", category_ref.to_string()))
                .bind(("name", lowered))
                .await?
        };
        let items: Vec<Item> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Create a new item
    pub async fn create(&self, data: NewItem) -> RepoResult<Item> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Content {
            #[serde(flatten)]
            data: NewItem,
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

        let created: Option<Item> = self
            .base
            .db()
            .create(TABLE)
            .content(content)
            .await
            .map_err(|e| remap_duplicate(e.into()))?;
        created.ok_or_else(|| RepoError::Database("Failed to create item".to_string()))
    }

    /// Merge a partial update into an item and return the updated record
    pub async fn update(&self, id: &str, patch: ItemPatch) -> RepoResult<Item> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct MergeData {
            #[serde(flatten)]
            patch: ItemPatch,
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
            .ok_or_else(|| RepoError::NotFound("Item not found.".to_string()))
    }
}

fn remap_duplicate(err: RepoError) -> RepoError {
    match err {
        RepoError::Duplicate(_) => RepoError::Duplicate(DUPLICATE_MSG.to_string()),
        other => other,
    }
}
