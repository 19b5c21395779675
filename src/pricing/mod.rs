//! Pricing Module
//!
//! Pure computation of effective tax fields and derived monetary amounts.
//! Nothing in here touches the database; callers fetch the parent records
//! and hand in plain values.

pub mod money;
pub mod resolver;

pub use money::round2;
pub use resolver::{
    Amounts, EffectiveTax, ResolveError, TaxInput, TaxScope, cascade, resolve_amounts,
    resolve_create, resolve_update, subcategory_overrides,
};
