//! SubCategory Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

pub type SubCategoryId = RecordId;

/// SubCategory model
///
/// Middle level of the hierarchy. `tax_applicability`/`tax` left unset mean
/// "inherit from the category" at resolution time; legacy rows may carry
/// unset values, freshly written rows always carry resolved ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<SubCategoryId>,
    /// Record link to the owning category
    #[serde(with = "serde_helpers::record_id")]
    pub category: RecordId,
    pub name: String,
    /// Normalized lookup column, not part of the API payload
    #[serde(default, skip_serializing)]
    pub name_lower: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_applicability: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryCreate {
    pub category_id: String,
    #[validate(length(min = 2, max = 120, message = "Name must be 2-120 characters."))]
    pub name: String,
    #[validate(url(message = "Image must be a valid URL."))]
    pub image: Option<String>,
    pub description: Option<String>,
    pub tax_applicability: Option<bool>,
    #[validate(range(min = 0.0, message = "Tax must be non-negative."))]
    pub tax: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryUpdate {
    #[validate(length(min = 2, max = 120, message = "Name must be 2-120 characters."))]
    pub name: Option<String>,
    #[validate(url(message = "Image must be a valid URL."))]
    pub image: Option<String>,
    pub description: Option<String>,
    pub tax_applicability: Option<bool>,
    #[validate(range(min = 0.0, message = "Tax must be non-negative."))]
    pub tax: Option<f64>,
}
