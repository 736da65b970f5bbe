//! Money display formatting.
//!
//! Internal totals carry full decimal precision; rounding to two places
//! happens only here, at display time.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Format a decimal amount for display, e.g. `$19.99`.
///
/// The amount is rounded half-up to two decimal places. The currency symbol
/// is whatever the site is configured with (`$` by default).
#[must_use]
pub fn display_amount(amount: Decimal, currency_symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{currency_symbol}{rounded:.2}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_amount_whole() {
        assert_eq!(display_amount(Decimal::from(180), "$"), "$180.00");
    }

    #[test]
    fn test_display_amount_rounds_half_up() {
        let amount: Decimal = "19.995".parse().unwrap();
        assert_eq!(display_amount(amount, "$"), "$20.00");
    }

    #[test]
    fn test_display_amount_full_precision_input() {
        // Internal values may carry more precision than is ever displayed.
        let amount: Decimal = "149.999999".parse().unwrap();
        assert_eq!(display_amount(amount, "$"), "$150.00");
    }

    #[test]
    fn test_display_amount_other_symbol() {
        let amount: Decimal = "7.5".parse().unwrap();
        assert_eq!(display_amount(amount, "€"), "€7.50");
    }
}
