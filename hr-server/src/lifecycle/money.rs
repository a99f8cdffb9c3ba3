//! Salary arithmetic using rust_decimal for precision
//!
//! The percentage is first turned into a factor with 6 fractional digits,
//! then the new salary is rounded half-up to cents.

use rust_decimal::prelude::*;

/// Fractional digits kept in the raise factor
const FACTOR_PLACES: u32 = 6;

/// Salary scale
const DECIMAL_PLACES: u32 = 2;

/// `p / 100`, rounded half-up to 6 places
pub fn raise_factor(percentage: Decimal) -> Decimal {
    (percentage / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(FACTOR_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// New salary after a raise of `percentage` percent, scale exactly 2
pub fn apply_raise(current: Decimal, percentage: Decimal) -> Decimal {
    let factor = Decimal::ONE + raise_factor(percentage);
    let mut raised =
        (current * factor).round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    raised.rescale(DECIMAL_PLACES);
    raised
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_documented_raises() {
        assert_eq!(apply_raise(dec("5000.00"), dec("10.00")).to_string(), "5500.00");
        assert_eq!(apply_raise(dec("5500.00"), dec("15.00")).to_string(), "6325.00");
    }

    #[test]
    fn test_result_always_has_two_places() {
        let cases = [
            ("1000.00", "100.00", "2000.00"),
            ("0.00", "50.00", "0.00"),
            ("1234.56", "0.01", "1234.68"),
            ("9800.00", "300.00", "39200.00"),
        ];
        for (salary, pct, expected) in cases {
            let result = apply_raise(dec(salary), dec(pct));
            assert_eq!(result.to_string(), expected, "{salary} + {pct}%");
            assert_eq!(result.scale(), 2);
        }
    }

    #[test]
    fn test_half_up_rounding() {
        // 100.01 * 1.005 = 100.51005 -> 100.51
        assert_eq!(apply_raise(dec("100.01"), dec("0.50")).to_string(), "100.51");
        // 0.10 * 1.05 = 0.105 -> 0.11 (half-up, not banker's)
        assert_eq!(apply_raise(dec("0.10"), dec("5.00")).to_string(), "0.11");
        // 0.30 * 1.05 = 0.315 -> 0.32
        assert_eq!(apply_raise(dec("0.30"), dec("5.00")).to_string(), "0.32");
    }

    #[test]
    fn test_factor_is_rounded_to_six_places() {
        assert_eq!(raise_factor(dec("12.34")).to_string(), "0.1234");
        assert_eq!(raise_factor(dec("0.01")), dec("0.0001"));
        // Two-place percentages never need more than 4 places; the bound holds anyway
        assert!(raise_factor(dec("33.33")).scale() <= 6);
    }
}
