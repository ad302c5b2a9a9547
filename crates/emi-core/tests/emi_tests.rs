use emi_core::emi::{period_count, periodic_rate};
use emi_core::{compute_emi, compute_total_interest, try_compute_emi, EmiError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{}: expected ~{}, got {} (diff = {})",
        msg,
        expected,
        actual,
        diff
    );
}

/// Unrounded annuity payment recomputed independently of the crate.
fn reference_payment(principal: Decimal, annual_pct: Decimal, years: u32) -> Decimal {
    let r = annual_pct / dec!(1200);
    let n = years * 12;
    let mut discount = Decimal::ZERO;
    let mut factor = Decimal::ONE;
    for _ in 0..n {
        factor /= Decimal::ONE + r;
        discount += factor;
    }
    principal / discount
}

// ===========================================================================
// EMI formula
// ===========================================================================

#[test]
fn test_emi_known_answer_home_loan() {
    // 10 lakh at 8.5% over 20 years: r = 0.0070833.., N = 240
    assert_close(
        periodic_rate(dec!(8.5)),
        dec!(0.0070833333),
        dec!(0.0000000001),
        "periodic rate",
    );
    assert_eq!(period_count(20), 240);
    assert_eq!(compute_emi(dec!(1_000_000), dec!(8.5), 20), dec!(8678.23));
}

#[test]
fn test_emi_matches_present_value_annuity() {
    let cases = [
        (dec!(1_000_000), dec!(8.5), 20),
        (dec!(500_000), dec!(15.5), 3),
        (dec!(600_000), dec!(12.5), 5),
        (dec!(2_500_000), dec!(9), 15),
        (dec!(10_000), dec!(100), 50),
    ];
    for (p, rate, years) in cases {
        let emi = compute_emi(p, rate, years);
        assert_close(
            emi,
            reference_payment(p, rate, years),
            dec!(0.005),
            &format!("EMI for {p} at {rate}% over {years}y"),
        );
    }
}

#[test]
fn test_emi_times_periods_equals_principal_plus_interest() {
    for (p, rate, years) in [
        (dec!(1_000_000), dec!(8.5), 20),
        (dec!(750_000), dec!(7.25), 30),
        (dec!(50_000), dec!(24), 2),
    ] {
        let emi = compute_emi(p, rate, years);
        let interest = compute_total_interest(emi, p, years);
        let n = Decimal::from(years * 12);
        assert_close(emi * n, p + interest, dec!(0.01), "EMI * N vs P + interest");
    }
}

#[test]
fn test_total_interest_known_answer() {
    let emi = compute_emi(dec!(1_000_000), dec!(8.5), 20);
    assert_eq!(
        compute_total_interest(emi, dec!(1_000_000), 20),
        dec!(1_082_775.20)
    );
}

// ===========================================================================
// Degenerate inputs
// ===========================================================================

#[test]
fn test_zero_rate_guard_returns_zero() {
    // Exactly zero is caught by the input guard, not the straight-line branch
    assert_eq!(compute_emi(dec!(120_000), Decimal::ZERO, 10), Decimal::ZERO);
}

#[test]
fn test_rate_that_vanishes_at_decimal_scale_is_straight_line() {
    let tiny = dec!(0.0000000000000000000000000001);
    assert!(periodic_rate(tiny).is_zero());
    assert_eq!(compute_emi(dec!(120_000), tiny, 10), dec!(1000));

    // Just above the boundary the compound formula still runs and lands on
    // the straight-line payment to the cent
    let small = dec!(0.000001);
    assert!(!periodic_rate(small).is_zero());
    assert_eq!(compute_emi(dec!(120_000), small, 10), dec!(1000));
}

#[test]
fn test_non_positive_inputs_not_computable() {
    for (p, rate, years) in [
        (dec!(-1), dec!(8), 10),
        (dec!(0), dec!(8), 10),
        (dec!(1000), dec!(-8), 10),
        (dec!(1000), dec!(8), 0),
    ] {
        assert_eq!(compute_emi(p, rate, years), Decimal::ZERO);
        assert!(matches!(
            try_compute_emi(p, rate, years),
            Err(EmiError::NotComputable { .. })
        ));
    }
}
