//! Catalog Service
//!
//! Orchestrates every write against the hierarchy. The order is fixed:
//! reference checks, then uniqueness checks, then tax/amount resolution, then
//! persistence. Handlers stay thin by calling in here.

use super::guard::ConsistencyGuard;
use crate::db::models::{
    Category, CategoryCreate, CategoryUpdate, Item, ItemCreate, ItemUpdate, SubCategory,
    SubCategoryCreate, SubCategoryUpdate,
};
use crate::db::repository::{
    CategoryRepository, ItemRepository, SubCategoryRepository,
    category::{CategoryPatch, NewCategory},
    item::{ItemPatch, NewItem},
    subcategory::{NewSubCategory, SubCategoryPatch},
};
use crate::pricing::{
    EffectiveTax, TaxInput, TaxScope, cascade, resolve_amounts, resolve_create, resolve_update,
    subcategory_overrides,
};
use crate::utils::{AppError, AppResult};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct CatalogService {
    guard: ConsistencyGuard,
    categories: CategoryRepository,
    subcategories: SubCategoryRepository,
    items: ItemRepository,
}

/// `"table:id"` reference for a record that came out of the database
fn stored_ref(category: &Category) -> AppResult<String> {
    category
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Stored category has no id"))
}

fn category_tax(category: &Category) -> EffectiveTax {
    EffectiveTax {
        applicability: category.tax_applicability,
        tax: category.tax,
    }
}

fn subcategory_tax(sub: &SubCategory) -> TaxInput {
    TaxInput {
        applicability: sub.tax_applicability,
        tax: sub.tax,
    }
}

impl CatalogService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            guard: ConsistencyGuard::new(db.clone()),
            categories: CategoryRepository::new(db.clone()),
            subcategories: SubCategoryRepository::new(db.clone()),
            items: ItemRepository::new(db),
        }
    }

    // ---- categories ----

    pub async fn create_category(&self, data: CategoryCreate) -> AppResult<Category> {
        self.guard.unique_category_name(&data.name, None).await?;

        let resolved = resolve_create(
            &TaxScope::Category,
            TaxInput {
                applicability: data.tax_applicability,
                tax: data.tax,
            },
        )?;

        let created = self
            .categories
            .create(NewCategory {
                name: data.name,
                image: data.image,
                description: data.description,
                tax_applicability: resolved.applicability,
                tax: resolved.tax,
                tax_type: data.tax_type,
            })
            .await?;
        Ok(created)
    }

    pub async fn update_category(&self, id: &str, data: CategoryUpdate) -> AppResult<Category> {
        let prior = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found."))?;

        if let Some(name) = &data.name
            && name.to_lowercase() != prior.name_lower
        {
            self.guard
                .unique_category_name(name, prior.id.as_ref())
                .await?;
        }

        let resolved = resolve_update(
            &TaxScope::Category,
            category_tax(&prior),
            TaxInput {
                applicability: data.tax_applicability,
                tax: data.tax,
            },
            false,
        )?;

        let updated = self
            .categories
            .update(
                id,
                CategoryPatch {
                    name: data.name,
                    image: data.image,
                    description: data.description,
                    tax_applicability: resolved.map(|t| t.applicability),
                    tax: resolved.map(|t| t.tax),
                    tax_type: data.tax_type,
                },
            )
            .await?;
        Ok(updated)
    }

    // ---- subcategories ----

    pub async fn create_sub_category(&self, data: SubCategoryCreate) -> AppResult<SubCategory> {
        let category = self.guard.category_exists(&data.category_id).await?;
        let category_ref = stored_ref(&category)?;

        self.guard
            .unique_sub_category_name(&category_ref, &data.name, None)
            .await?;

        let stored = subcategory_overrides(
            category_tax(&category),
            TaxInput {
                applicability: data.tax_applicability,
                tax: data.tax,
            },
        );

        let created = self
            .subcategories
            .create(NewSubCategory {
                category: category_ref,
                name: data.name,
                image: data.image,
                description: data.description,
                tax_applicability: stored.applicability,
                tax: stored.tax,
            })
            .await?;
        Ok(created)
    }

    pub async fn update_sub_category(
        &self,
        id: &str,
        data: SubCategoryUpdate,
    ) -> AppResult<SubCategory> {
        let prior = self
            .subcategories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Sub-category not found."))?;
        let category_ref = prior.category.to_string();
        let category = self.guard.category_exists(&category_ref).await?;

        if let Some(name) = &data.name
            && name.to_lowercase() != prior.name_lower
        {
            self.guard
                .unique_sub_category_name(&category_ref, name, prior.id.as_ref())
                .await?;
        }

        let parent = category_tax(&category);
        let resolved = resolve_update(
            &TaxScope::SubCategory { parent },
            cascade(parent, subcategory_tax(&prior)),
            TaxInput {
                applicability: data.tax_applicability,
                tax: data.tax,
            },
            false,
        )?;

        let updated = self
            .subcategories
            .update(
                id,
                SubCategoryPatch {
                    name: data.name,
                    image: data.image,
                    description: data.description,
                    tax_applicability: resolved.map(|t| t.applicability),
                    tax: resolved.map(|t| t.tax),
                },
            )
            .await?;
        Ok(updated)
    }

    // ---- items ----

    pub async fn create_item(&self, data: ItemCreate) -> AppResult<Item> {
        let category = self.guard.category_exists(&data.category_id).await?;
        let category_ref = stored_ref(&category)?;

        let sub = match &data.sub_category_id {
            Some(sub_id) => Some(self.guard.sub_category_in(sub_id, &category_ref).await?),
            None => None,
        };

        self.guard
            .unique_item_name(&category_ref, &data.name, None)
            .await?;

        let parent = match &sub {
            Some(sub) => cascade(category_tax(&category), subcategory_tax(sub)),
            None => category_tax(&category),
        };
        let resolved = resolve_create(
            &TaxScope::Item { parent },
            TaxInput {
                applicability: data.tax_applicability,
                tax: data.tax,
            },
        )?;
        let amounts = resolve_amounts(data.base_amount, data.discount.unwrap_or(0.0))?;

        let created = self
            .items
            .create(NewItem {
                category: category_ref,
                sub_category: sub.and_then(|s| s.id.map(|id| id.to_string())),
                name: data.name,
                image: data.image,
                description: data.description,
                tax_applicability: resolved.applicability,
                tax: resolved.tax,
                base_amount: amounts.base_amount,
                discount: amounts.discount,
                total_amount: amounts.total_amount,
            })
            .await?;
        Ok(created)
    }

    pub async fn update_item(&self, id: &str, data: ItemUpdate) -> AppResult<Item> {
        let prior = self
            .items
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found."))?;
        let prior_category_ref = prior.category.to_string();

        // target category: explicit reassignment or the current one
        let category = match &data.category_id {
            Some(category_id) => self.guard.category_exists(category_id).await?,
            None => self.guard.category_exists(&prior_category_ref).await?,
        };
        let category_ref = stored_ref(&category)?;
        let category_changed = category_ref != prior_category_ref;

        let prior_sub_ref = prior.sub_category.as_ref().map(|s| s.to_string());

        // tri-state subcategory: absent keeps (with auto-detach if the kept
        // link no longer matches the target category), null detaches, a value
        // reassigns and must belong to the target category
        let (sub, sub_patch) = match &data.sub_category_id {
            None => match &prior_sub_ref {
                Some(sub_ref) => {
                    match self.guard.sub_category_in(sub_ref, &category_ref).await {
                        Ok(sub) => (Some(sub), None),
                        // stale link after a reparent: detach instead of failing
                        Err(_) if category_changed => (None, Some(None)),
                        Err(err) => return Err(err.into()),
                    }
                }
                None => (None, None),
            },
            Some(None) => (None, prior_sub_ref.is_some().then_some(None)),
            Some(Some(sub_id)) => {
                let sub = self.guard.sub_category_in(sub_id, &category_ref).await?;
                let sub_ref = sub
                    .id
                    .as_ref()
                    .map(|id| id.to_string())
                    .ok_or_else(|| AppError::internal("Stored subcategory has no id"))?;
                let changed = prior_sub_ref.as_deref() != Some(sub_ref.as_str());
                (Some(sub), changed.then_some(Some(sub_ref)))
            }
        };
        let parent_changed = category_changed || sub_patch.is_some();

        let name = data.name.clone().unwrap_or_else(|| prior.name.clone());
        let name_changed = data
            .name
            .as_ref()
            .is_some_and(|n| n.to_lowercase() != prior.name_lower);
        if name_changed || category_changed {
            self.guard
                .unique_item_name(&category_ref, &name, prior.id.as_ref())
                .await?;
        }

        let parent = match &sub {
            Some(sub) => cascade(category_tax(&category), subcategory_tax(sub)),
            None => category_tax(&category),
        };
        let resolved = resolve_update(
            &TaxScope::Item { parent },
            EffectiveTax {
                applicability: prior.tax_applicability,
                tax: prior.tax,
            },
            TaxInput {
                applicability: data.tax_applicability,
                tax: data.tax,
            },
            parent_changed,
        )?;

        let amounts = if data.base_amount.is_some() || data.discount.is_some() {
            Some(resolve_amounts(
                data.base_amount.unwrap_or(prior.base_amount),
                data.discount.unwrap_or(prior.discount),
            )?)
        } else {
            None
        };

        let updated = self
            .items
            .update(
                id,
                ItemPatch {
                    category: category_changed.then_some(category_ref),
                    sub_category: sub_patch,
                    name: data.name,
                    image: data.image,
                    description: data.description,
                    tax_applicability: resolved.map(|t| t.applicability),
                    tax: resolved.map(|t| t.tax),
                    base_amount: amounts.map(|a| a.base_amount),
                    discount: amounts.map(|a| a.discount),
                    total_amount: amounts.map(|a| a.total_amount),
                },
            )
            .await?;
        Ok(updated)
    }
}
