//! Calculator variants: generic EMI, car (down payment), home and personal
//! (processing fee), and the prepayment-aware computation.
//!
//! Every adapter validates first and hands back the all-zero
//! [`LoanResult::default`] when the input is invalid; surfacing the
//! violations is the caller's job (see [`crate::validation`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ValidationLimits;
use crate::emi::{compute_emi, compute_total_interest, period_count};
use crate::schedule::{build_amortization_schedule, AmortizationRow, LoanTerms, ScheduleTotals};
use crate::types::{round_money, Money};
use crate::validation::validate_parts;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan-type specific adjustments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoanKind {
    #[default]
    Generic,
    /// Down payment is paid upfront and reduces the financed principal.
    Car { down_payment: Money },
    /// Processing fee is paid upfront; it is neither financed nor interest-bearing.
    Home { processing_fee: Money },
    Personal { processing_fee: Money },
}

impl LoanKind {
    pub fn name(&self) -> &'static str {
        match self {
            LoanKind::Generic => "generic",
            LoanKind::Car { .. } => "car",
            LoanKind::Home { .. } => "home",
            LoanKind::Personal { .. } => "personal",
        }
    }
}

/// Complete input for one calculator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    #[serde(flatten)]
    pub terms: LoanTerms,
    #[serde(default)]
    pub kind: LoanKind,
}

/// EMI, totals and schedule for one loan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// Periodic payment before any prepayment.
    pub emi: Money,
    pub total_interest: Money,
    pub total_amount: Money,
    pub schedule: Vec<AmortizationRow>,
}

// ---------------------------------------------------------------------------
// Adapters
// ---------------------------------------------------------------------------

/// Plain EMI calculator over the terms as given.
pub fn compute_generic_loan(terms: &LoanTerms) -> LoanResult {
    if !admit(terms, &LoanKind::Generic) {
        return LoanResult::default();
    }
    amortize(terms)
}

/// Car loan: the down payment is subtracted before financing and added back
/// to the total cost. A down payment covering the whole price means the car
/// was paid in cash.
pub fn compute_car_loan(terms: &LoanTerms, down_payment: Money) -> LoanResult {
    let financed = terms.principal - down_payment;
    if terms.principal > Decimal::ZERO && financed <= Decimal::ZERO {
        return LoanResult {
            total_amount: round_money(terms.principal),
            ..LoanResult::default()
        };
    }
    if !admit(terms, &LoanKind::Car { down_payment }) {
        return LoanResult::default();
    }

    let mut result = amortize(&terms.with_principal(financed));
    result.total_amount = round_money(result.total_amount + down_payment);
    result
}

/// Home loan: processing fee added to the total cost only.
pub fn compute_home_loan(terms: &LoanTerms, processing_fee: Money) -> LoanResult {
    with_processing_fee(terms, LoanKind::Home { processing_fee }, processing_fee)
}

/// Personal loan: same shape as the home loan.
pub fn compute_personal_loan(terms: &LoanTerms, processing_fee: Money) -> LoanResult {
    with_processing_fee(terms, LoanKind::Personal { processing_fee }, processing_fee)
}

/// Totals taken from the schedule itself, so a prepayment lowers the cost.
pub fn compute_loan_with_prepayment(terms: &LoanTerms) -> LoanResult {
    if !admit(terms, &LoanKind::Generic) {
        return LoanResult::default();
    }
    schedule_derived(terms)
}

/// Dispatch on the loan kind.
pub fn compute_loan(input: &LoanInput) -> LoanResult {
    match &input.kind {
        LoanKind::Generic => compute_generic_loan(&input.terms),
        LoanKind::Car { down_payment } => compute_car_loan(&input.terms, *down_payment),
        LoanKind::Home { processing_fee } => compute_home_loan(&input.terms, *processing_fee),
        LoanKind::Personal { processing_fee } => {
            compute_personal_loan(&input.terms, *processing_fee)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn with_processing_fee(terms: &LoanTerms, kind: LoanKind, processing_fee: Money) -> LoanResult {
    if !admit(terms, &kind) {
        return LoanResult::default();
    }
    let mut result = amortize(terms);
    result.total_amount = round_money(result.total_amount + processing_fee);
    result
}

fn admit(terms: &LoanTerms, kind: &LoanKind) -> bool {
    let report = validate_parts(terms, kind, &ValidationLimits::default());
    if !report.valid {
        log::warn!(
            "refusing {} loan computation: {}",
            kind.name(),
            report.messages().join("; ")
        );
    }
    report.valid
}

/// Flat totals (`emi * N`) unless a prepayment is configured, in which case
/// the totals come from the schedule.
fn amortize(terms: &LoanTerms) -> LoanResult {
    if terms.effective_prepayment().is_some() {
        return schedule_derived(terms);
    }
    let emi = compute_emi(terms.principal, terms.interest_rate, terms.tenure_years);
    let periods = Decimal::from(period_count(terms.tenure_years));
    LoanResult {
        emi,
        total_interest: compute_total_interest(emi, terms.principal, terms.tenure_years),
        total_amount: round_money(emi * periods),
        schedule: build_amortization_schedule(terms),
    }
}

fn schedule_derived(terms: &LoanTerms) -> LoanResult {
    let emi = compute_emi(terms.principal, terms.interest_rate, terms.tenure_years);
    let schedule = build_amortization_schedule(terms);
    let totals = ScheduleTotals::from_rows(&schedule);
    LoanResult {
        emi,
        total_interest: round_money(totals.total_payment - terms.principal),
        total_amount: round_money(totals.total_payment),
        schedule,
    }
}
