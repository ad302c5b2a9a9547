//! Fixed periodic payment (EMI) and the flat total-interest aggregate.
//!
//! `compute_emi` keeps the calculator's long-standing contract of returning
//! `0` for inputs it cannot price; `try_compute_emi` is the same computation
//! with the reason surfaced as an [`EmiError::NotComputable`].

use rust_decimal::Decimal;

use crate::config::{MONTHS_PER_YEAR, RATE_DIVISOR};
use crate::error::EmiError;
use crate::types::{round_money, Money, Percent, Rate};
use crate::EmiResult;

/// Monthly decimal rate for a nominal annual percentage.
pub fn periodic_rate(interest_rate: Percent) -> Rate {
    interest_rate / RATE_DIVISOR
}

/// Number of monthly periods in a tenure. Overflow yields 0 periods.
pub fn period_count(tenure_years: u32) -> u32 {
    tenure_years.checked_mul(MONTHS_PER_YEAR).unwrap_or(0)
}

/// Raise a Decimal base to an integer exponent via iterative multiplication.
/// Returns `None` when the power no longer fits in a Decimal.
fn checked_powi(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(base)?;
    }
    Some(result)
}

/// Fixed monthly payment that retires `principal` over `tenure_years`.
///
/// Returns `0` when the loan cannot be priced (non-positive principal or
/// rate, zero tenure, or an out-of-range result). A `0` must be read as
/// "invalid", never as a free loan.
pub fn compute_emi(principal: Money, interest_rate: Percent, tenure_years: u32) -> Money {
    try_compute_emi(principal, interest_rate, tenure_years).unwrap_or(Decimal::ZERO)
}

/// Fallible form of [`compute_emi`].
pub fn try_compute_emi(
    principal: Money,
    interest_rate: Percent,
    tenure_years: u32,
) -> EmiResult<Money> {
    unrounded_emi(principal, interest_rate, tenure_years).map(round_money)
}

/// The payment at full Decimal precision. The scheduler iterates on this so
/// that the 2 dp rounding of the published EMI does not compound.
pub(crate) fn unrounded_emi(
    principal: Money,
    interest_rate: Percent,
    tenure_years: u32,
) -> EmiResult<Money> {
    if principal <= Decimal::ZERO {
        return Err(not_computable("principal must be positive"));
    }
    if interest_rate <= Decimal::ZERO {
        return Err(not_computable("interest rate must be positive"));
    }
    let n = period_count(tenure_years);
    if n == 0 {
        return Err(not_computable("tenure must cover at least one period"));
    }

    let r = periodic_rate(interest_rate);
    let periods = Decimal::from(n);
    if r.is_zero() {
        // A positive rate below Decimal scale: amortize straight-line.
        return Ok(principal / periods);
    }

    let growth = checked_powi(Decimal::ONE + r, n)
        .ok_or_else(|| not_computable("compound growth factor overflows"))?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Ok(principal / periods);
    }

    principal
        .checked_mul(r)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| not_computable("payment overflows"))
}

/// Total interest under the flat (non-prepaid) schedule: `emi * N - principal`.
///
/// Does not walk the schedule, so it can differ by a few cents from the sum
/// of the schedule's interest column.
pub fn compute_total_interest(emi: Money, principal: Money, tenure_years: u32) -> Money {
    let total_paid = emi * Decimal::from(period_count(tenure_years));
    round_money(total_paid - principal)
}

fn not_computable(reason: &str) -> EmiError {
    EmiError::NotComputable {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_emi_home_loan_reference() {
        // 10 lakh at 8.5% over 20 years
        assert_eq!(compute_emi(dec!(1_000_000), dec!(8.5), 20), dec!(8678.23));
    }

    #[test]
    fn test_total_interest_reference() {
        let emi = compute_emi(dec!(1_000_000), dec!(8.5), 20);
        assert_eq!(
            compute_total_interest(emi, dec!(1_000_000), 20),
            dec!(1_082_775.20)
        );
    }

    #[test]
    fn test_invalid_inputs_return_zero() {
        assert_eq!(compute_emi(dec!(0), dec!(8.5), 20), Decimal::ZERO);
        assert_eq!(compute_emi(dec!(-5), dec!(8.5), 20), Decimal::ZERO);
        assert_eq!(compute_emi(dec!(1000), dec!(0), 20), Decimal::ZERO);
        assert_eq!(compute_emi(dec!(1000), dec!(-1), 20), Decimal::ZERO);
        assert_eq!(compute_emi(dec!(1000), dec!(8.5), 0), Decimal::ZERO);
    }

    #[test]
    fn test_try_compute_emi_reports_reason() {
        match try_compute_emi(dec!(1000), dec!(0), 5) {
            Err(EmiError::NotComputable { reason }) => assert!(reason.contains("interest rate")),
            other => panic!("Expected NotComputable, got {other:?}"),
        }
    }

    #[test]
    fn test_sub_scale_rate_is_straight_line() {
        // 1e-28 / 1200 rounds to an exact zero periodic rate
        let tiny = dec!(0.0000000000000000000000000001);
        assert!(periodic_rate(tiny).is_zero());
        assert_eq!(compute_emi(dec!(120_000), tiny, 10), dec!(1000));
    }

    #[test]
    fn test_growth_factor_overflow_is_not_computable() {
        assert!(try_compute_emi(dec!(1000), dec!(1000000), 1000).is_err());
        assert_eq!(compute_emi(dec!(1000), dec!(1000000), 1000), Decimal::ZERO);
    }

    #[test]
    fn test_period_count_overflow() {
        assert_eq!(period_count(20), 240);
        assert_eq!(period_count(u32::MAX), 0);
    }
}
