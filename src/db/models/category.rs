//! Category Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

pub type CategoryId = RecordId;

/// Category model
///
/// Top level of the menu hierarchy. Carries the tax defaults that
/// sub-categories and items inherit when they don't override them.
/// Invariant: `tax_applicability == false` implies `tax == 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<CategoryId>,
    pub name: String,
    /// Normalized lookup column, not part of the API payload
    #[serde(default, skip_serializing)]
    pub name_lower: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tax_applicability: bool,
    #[serde(default)]
    pub tax: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    #[validate(length(min = 2, max = 120, message = "Name must be 2-120 characters."))]
    pub name: String,
    #[validate(url(message = "Image must be a valid URL."))]
    pub image: Option<String>,
    pub description: Option<String>,
    pub tax_applicability: Option<bool>,
    #[validate(range(min = 0.0, message = "Tax must be non-negative."))]
    pub tax: Option<f64>,
    #[validate(length(max = 120, message = "Tax type must be at most 120 characters."))]
    pub tax_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[validate(length(min = 2, max = 120, message = "Name must be 2-120 characters."))]
    pub name: Option<String>,
    #[validate(url(message = "Image must be a valid URL."))]
    pub image: Option<String>,
    pub description: Option<String>,
    pub tax_applicability: Option<bool>,
    #[validate(range(min = 0.0, message = "Tax must be non-negative."))]
    pub tax: Option<f64>,
    #[validate(length(max = 120, message = "Tax type must be at most 120 characters."))]
    pub tax_type: Option<String>,
}
