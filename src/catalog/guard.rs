//! Consistency Guard
//!
//! Referential and uniqueness checks that run before any write. Uniqueness
//! here is advisory (read-then-write); the unique storage indexes remain the
//! authoritative guard under concurrency.

use crate::db::models::{Category, CategoryId, ItemId, SubCategory, SubCategoryId};
use crate::db::repository::{
    CategoryRepository, ItemRepository, RepoError, SubCategoryRepository,
};
use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Category not found.")]
    CategoryNotFound,

    #[error("Sub-category not found.")]
    SubCategoryNotFound,

    #[error("Sub-category does not belong to the specified category.")]
    SubCategoryMismatch,

    #[error("{0}")]
    DuplicateName(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<GuardError> for AppError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::CategoryNotFound | GuardError::SubCategoryNotFound => {
                AppError::not_found(err.to_string())
            }
            GuardError::SubCategoryMismatch => AppError::validation(err.to_string()),
            GuardError::DuplicateName(msg) => AppError::duplicate(msg),
            GuardError::Repo(repo) => repo.into(),
        }
    }
}

type GuardResult<T> = Result<T, GuardError>;

#[derive(Clone)]
pub struct ConsistencyGuard {
    categories: CategoryRepository,
    subcategories: SubCategoryRepository,
    items: ItemRepository,
}

impl ConsistencyGuard {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            categories: CategoryRepository::new(db.clone()),
            subcategories: SubCategoryRepository::new(db.clone()),
            items: ItemRepository::new(db),
        }
    }

    /// The referenced category, or `CategoryNotFound`
    pub async fn category_exists(&self, id: &str) -> GuardResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(GuardError::CategoryNotFound)
    }

    /// The referenced subcategory, which must belong to `category_ref`
    pub async fn sub_category_in(
        &self,
        id: &str,
        category_ref: &str,
    ) -> GuardResult<SubCategory> {
        let sub = self
            .subcategories
            .find_by_id(id)
            .await?
            .ok_or(GuardError::SubCategoryNotFound)?;
        if sub.category.to_string() != category_ref {
            return Err(GuardError::SubCategoryMismatch);
        }
        Ok(sub)
    }

    /// Global case-insensitive category name uniqueness
    pub async fn unique_category_name(
        &self,
        name: &str,
        exclude: Option<&CategoryId>,
    ) -> GuardResult<()> {
        if self
            .categories
            .find_duplicate(name, exclude)
            .await?
            .is_some()
        {
            return Err(GuardError::DuplicateName(
                "Category with the same name already exists.".to_string(),
            ));
        }
        Ok(())
    }

    /// Case-insensitive subcategory name uniqueness within one category
    pub async fn unique_sub_category_name(
        &self,
        category_ref: &str,
        name: &str,
        exclude: Option<&SubCategoryId>,
    ) -> GuardResult<()> {
        if self
            .subcategories
            .find_duplicate(category_ref, name, exclude)
            .await?
            .is_some()
        {
            return Err(GuardError::DuplicateName(
                "Sub-category with the same name already exists in this category.".to_string(),
            ));
        }
        Ok(())
    }

    /// Case-insensitive item name uniqueness within one category
    pub async fn unique_item_name(
        &self,
        category_ref: &str,
        name: &str,
        exclude: Option<&ItemId>,
    ) -> GuardResult<()> {
        if self
            .items
            .find_duplicate(category_ref, name, exclude)
            .await?
            .is_some()
        {
            return Err(GuardError::DuplicateName(
                "Item with the same name already exists in this category.".to_string(),
            ));
        }
        Ok(())
    }
}
