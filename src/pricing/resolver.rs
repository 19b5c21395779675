//! Tax and Amount Resolver
//!
//! Effective tax fields cascade one parent level: a subcategory falls back to
//! its category, an item falls back to the field-wise merge of its subcategory
//! over its category. `total_amount` is always derived from `base_amount` and
//! `discount`.

use super::money::round2;
use crate::utils::AppError;
use thiserror::Error;

/// Tax fields as supplied by a request (or stored as raw subcategory
/// overrides). `None` means "not given / inherit".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaxInput {
    pub applicability: Option<bool>,
    pub tax: Option<f64>,
}

/// Fully resolved tax fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveTax {
    pub applicability: bool,
    pub tax: f64,
}

/// Which level of the hierarchy is being resolved. Levels below the root
/// carry the already-resolved parent chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaxScope {
    Category,
    SubCategory { parent: EffectiveTax },
    Item { parent: EffectiveTax },
}

impl TaxScope {
    fn parent(&self) -> Option<EffectiveTax> {
        match self {
            TaxScope::Category => None,
            TaxScope::SubCategory { parent } | TaxScope::Item { parent } => Some(*parent),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("Tax is required when tax applicability is true.")]
    MissingRequiredTax,

    #[error("Tax cannot be set when tax applicability is false.")]
    TaxNotApplicable,

    #[error("Discount cannot exceed the base amount.")]
    DiscountExceedsBase,

    #[error("Amounts must be finite numbers.")]
    NonFinite,
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Merge explicit overrides onto resolved parent values. Applicability is
/// inherited field-wise; tax only matters while applicable.
pub fn cascade(base: EffectiveTax, overrides: TaxInput) -> EffectiveTax {
    let applicability = overrides.applicability.unwrap_or(base.applicability);
    let tax = if applicability {
        overrides.tax.unwrap_or(base.tax)
    } else {
        0.0
    };
    EffectiveTax { applicability, tax }
}

/// Resolve tax fields for a create.
///
/// At the root there is nothing to inherit from: applicability defaults to
/// false, and turning it on requires an explicit tax. Below the root, missing
/// fields come from the parent chain.
pub fn resolve_create(scope: &TaxScope, input: TaxInput) -> Result<EffectiveTax, ResolveError> {
    if let Some(tax) = input.tax
        && !tax.is_finite()
    {
        return Err(ResolveError::NonFinite);
    }

    match scope.parent() {
        None => {
            let applicability = input.applicability.unwrap_or(false);
            let tax = if applicability {
                input.tax.ok_or(ResolveError::MissingRequiredTax)?
            } else {
                0.0
            };
            Ok(EffectiveTax {
                applicability,
                tax,
            })
        }
        Some(parent) => Ok(cascade(parent, input)),
    }
}

/// Raw overrides to store on a subcategory at create time. Missing fields
/// stay missing (inherit later); a tax supplied while effectively not
/// applicable is forced to zero.
pub fn subcategory_overrides(parent: EffectiveTax, input: TaxInput) -> TaxInput {
    let effective = cascade(parent, input);
    TaxInput {
        applicability: input.applicability,
        tax: if effective.applicability {
            input.tax
        } else {
            input.tax.map(|_| 0.0)
        },
    }
}

/// Resolve tax fields for an update.
///
/// Returns `Ok(None)` when neither tax field was touched and the parent chain
/// did not change; the stored fields stay as they are. Otherwise:
/// - flip to false forces tax to 0
/// - flip to true (or a parent change) without an explicit tax sources the
///   rate from the parent chain; at the root that is an error
/// - applicability untouched and still true keeps the prior stored tax unless
///   an explicit tax is supplied
/// - a positive tax supplied alone while not applicable is rejected
pub fn resolve_update(
    scope: &TaxScope,
    prior: EffectiveTax,
    input: TaxInput,
    parent_changed: bool,
) -> Result<Option<EffectiveTax>, ResolveError> {
    if input.applicability.is_none() && input.tax.is_none() && !parent_changed {
        return Ok(None);
    }
    if let Some(tax) = input.tax
        && !tax.is_finite()
    {
        return Err(ResolveError::NonFinite);
    }

    let parent = scope.parent();
    let inherited = if parent_changed {
        // a reparent re-derives from the new chain
        parent.map(|p| p.applicability).unwrap_or(prior.applicability)
    } else {
        prior.applicability
    };
    let applicability = input.applicability.unwrap_or(inherited);

    if !applicability {
        let explicit_flip = input.applicability == Some(false);
        if !explicit_flip && !parent_changed && input.tax.unwrap_or(0.0) > 0.0 {
            return Err(ResolveError::TaxNotApplicable);
        }
        return Ok(Some(EffectiveTax {
            applicability: false,
            tax: 0.0,
        }));
    }

    let flipped_on = !prior.applicability;
    let tax = match input.tax {
        Some(tax) => tax,
        None if flipped_on || parent_changed => match parent {
            Some(parent) => parent.tax,
            None => return Err(ResolveError::MissingRequiredTax),
        },
        None => prior.tax,
    };

    Ok(Some(EffectiveTax {
        applicability: true,
        tax,
    }))
}

/// Derived monetary fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amounts {
    pub base_amount: f64,
    pub discount: f64,
    pub total_amount: f64,
}

/// Validate base/discount and derive the total. A supplied total is never
/// consulted; this is the only place `total_amount` is ever computed.
pub fn resolve_amounts(base_amount: f64, discount: f64) -> Result<Amounts, ResolveError> {
    if !base_amount.is_finite() || !discount.is_finite() {
        return Err(ResolveError::NonFinite);
    }
    if discount > base_amount {
        return Err(ResolveError::DiscountExceedsBase);
    }
    let total_amount = round2((base_amount - discount).max(0.0));
    Ok(Amounts {
        base_amount,
        discount,
        total_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT_ON: EffectiveTax = EffectiveTax {
        applicability: true,
        tax: 5.0,
    };
    const PARENT_OFF: EffectiveTax = EffectiveTax {
        applicability: false,
        tax: 0.0,
    };

    fn input(applicability: Option<bool>, tax: Option<f64>) -> TaxInput {
        TaxInput { applicability, tax }
    }

    #[test]
    fn category_create_defaults_to_not_applicable() {
        let resolved = resolve_create(&TaxScope::Category, TaxInput::default()).unwrap();
        assert_eq!(resolved, PARENT_OFF);
    }

    #[test]
    fn category_create_requires_tax_when_applicable() {
        let err = resolve_create(&TaxScope::Category, input(Some(true), None)).unwrap_err();
        assert_eq!(err, ResolveError::MissingRequiredTax);
    }

    #[test]
    fn category_create_forces_zero_tax_when_not_applicable() {
        let resolved =
            resolve_create(&TaxScope::Category, input(Some(false), Some(12.0))).unwrap();
        assert_eq!(resolved.tax, 0.0);
    }

    #[test]
    fn item_create_inherits_parent_tax() {
        let scope = TaxScope::Item { parent: PARENT_ON };
        let resolved = resolve_create(&scope, TaxInput::default()).unwrap();
        assert_eq!(resolved, PARENT_ON);
    }

    #[test]
    fn item_create_override_wins_over_parent() {
        let scope = TaxScope::Item { parent: PARENT_ON };
        let resolved = resolve_create(&scope, input(None, Some(8.0))).unwrap();
        assert_eq!(resolved.tax, 8.0);
    }

    #[test]
    fn cascade_merges_subcategory_over_category() {
        // subcategory overrides only the rate; applicability still inherited
        let merged = cascade(PARENT_ON, input(None, Some(2.5)));
        assert_eq!(
            merged,
            EffectiveTax {
                applicability: true,
                tax: 2.5
            }
        );

        // subcategory turns tax off entirely
        let merged = cascade(PARENT_ON, input(Some(false), None));
        assert_eq!(merged, PARENT_OFF);
    }

    #[test]
    fn subcategory_overrides_zeroes_tax_when_off() {
        let stored = subcategory_overrides(PARENT_OFF, input(None, Some(9.0)));
        assert_eq!(stored.tax, Some(0.0));
        assert_eq!(stored.applicability, None);
    }

    #[test]
    fn update_untouched_leaves_stored_fields() {
        let result =
            resolve_update(&TaxScope::Category, PARENT_ON, TaxInput::default(), false).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn update_flip_off_forces_zero() {
        let resolved =
            resolve_update(&TaxScope::Category, PARENT_ON, input(Some(false), Some(7.0)), false)
                .unwrap()
                .unwrap();
        assert_eq!(resolved, PARENT_OFF);
    }

    #[test]
    fn update_flip_on_at_root_requires_tax() {
        let err = resolve_update(&TaxScope::Category, PARENT_OFF, input(Some(true), None), false)
            .unwrap_err();
        assert_eq!(err, ResolveError::MissingRequiredTax);
    }

    #[test]
    fn update_flip_on_below_root_sources_parent_rate() {
        let scope = TaxScope::Item { parent: PARENT_ON };
        let resolved = resolve_update(&scope, PARENT_OFF, input(Some(true), None), false)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.tax, 5.0);
    }

    #[test]
    fn update_reparent_rederives_from_new_chain() {
        let scope = TaxScope::Item { parent: PARENT_ON };
        let prior = EffectiveTax {
            applicability: false,
            tax: 0.0,
        };
        let resolved = resolve_update(&scope, prior, TaxInput::default(), true)
            .unwrap()
            .unwrap();
        assert_eq!(resolved, PARENT_ON);
    }

    #[test]
    fn update_keeps_own_rate_when_still_applicable() {
        let scope = TaxScope::Item { parent: PARENT_ON };
        let prior = EffectiveTax {
            applicability: true,
            tax: 8.0,
        };
        let resolved = resolve_update(&scope, prior, input(Some(true), None), false)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.tax, 8.0);
    }

    #[test]
    fn update_rejects_tax_while_not_applicable() {
        let scope = TaxScope::Item { parent: PARENT_OFF };
        let err = resolve_update(&scope, PARENT_OFF, input(None, Some(3.0)), false).unwrap_err();
        assert_eq!(err, ResolveError::TaxNotApplicable);
    }

    #[test]
    fn amounts_derive_total() {
        let amounts = resolve_amounts(100.0, 15.0).unwrap();
        assert_eq!(amounts.total_amount, 85.0);
    }

    #[test]
    fn amounts_reject_discount_over_base() {
        let err = resolve_amounts(100.0, 150.0).unwrap_err();
        assert_eq!(err, ResolveError::DiscountExceedsBase);
    }

    #[test]
    fn amounts_reject_non_finite() {
        let err = resolve_amounts(f64::INFINITY, 0.0).unwrap_err();
        assert_eq!(err, ResolveError::NonFinite);
    }

    #[test]
    fn amounts_round_to_cents() {
        let amounts = resolve_amounts(10.555, 0.0).unwrap();
        assert_eq!(amounts.total_amount, 10.56);
    }
}
