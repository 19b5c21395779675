//! Item Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

pub type ItemId = RecordId;

/// Item model
///
/// Leaf level of the hierarchy. Tax fields are always resolved at write time;
/// `total_amount` is derived (`max(0, base_amount - discount)`) and never
/// taken from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ItemId>,
    /// Record link to the owning category
    #[serde(with = "serde_helpers::record_id")]
    pub category: RecordId,
    /// Optional record link to a subcategory of the same category
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub sub_category: Option<RecordId>,
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
    pub base_amount: f64,
    #[serde(default)]
    pub discount: f64,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreate {
    pub category_id: String,
    pub sub_category_id: Option<String>,
    #[validate(length(min = 2, max = 120, message = "Name must be 2-120 characters."))]
    pub name: String,
    #[validate(url(message = "Image must be a valid URL."))]
    pub image: Option<String>,
    pub description: Option<String>,
    pub tax_applicability: Option<bool>,
    #[validate(range(min = 0.0, message = "Tax must be non-negative."))]
    pub tax: Option<f64>,
    #[validate(range(min = 0.0, message = "Base amount must be non-negative."))]
    pub base_amount: f64,
    #[validate(range(min = 0.0, message = "Discount must be non-negative."))]
    pub discount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub category_id: Option<String>,
    /// Tri-state: absent = keep, null = detach, value = reassign
    #[serde(default, deserialize_with = "serde_helpers::double_option")]
    pub sub_category_id: Option<Option<String>>,
    #[validate(length(min = 2, max = 120, message = "Name must be 2-120 characters."))]
    pub name: Option<String>,
    #[validate(url(message = "Image must be a valid URL."))]
    pub image: Option<String>,
    pub description: Option<String>,
    pub tax_applicability: Option<bool>,
    #[validate(range(min = 0.0, message = "Tax must be non-negative."))]
    pub tax: Option<f64>,
    #[validate(range(min = 0.0, message = "Base amount must be non-negative."))]
    pub base_amount: Option<f64>,
    #[validate(range(min = 0.0, message = "Discount must be non-negative."))]
    pub discount: Option<f64>,
}
