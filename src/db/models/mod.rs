//! Database Models

// Serde helpers
pub mod serde_helpers;

// Menu hierarchy
pub mod category;
pub mod item;
pub mod subcategory;

// Re-exports
pub use category::{Category, CategoryCreate, CategoryId, CategoryUpdate};
pub use item::{Item, ItemCreate, ItemId, ItemUpdate};
pub use subcategory::{SubCategory, SubCategoryCreate, SubCategoryId, SubCategoryUpdate};
