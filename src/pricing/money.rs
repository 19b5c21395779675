//! Monetary rounding

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary value to 2 decimal places, midpoint away from zero.
///
/// Falls back to the input for values `Decimal` cannot represent; callers
/// reject non-finite inputs before any arithmetic.
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round2(10.005), 10.01);
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(99.999), 100.0);
    }

    #[test]
    fn leaves_two_decimal_values_alone() {
        assert_eq!(round2(42.5), 42.5);
        assert_eq!(round2(0.0), 0.0);
    }
}
