//! Validated loan report wrapped in the standard computation envelope.
//!
//! This is the entry point used by the CLI and the Node bindings. Unlike the
//! adapters in [`crate::variants`], it reports invalid input as an error
//! instead of degrading to a zero result.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::emi::{period_count, periodic_rate};
use crate::error::EmiError;
use crate::schedule::{build_amortization_schedule, LoanTerms, ScheduleTotals};
use crate::types::{round_money, with_metadata, ComputationOutput, Money};
use crate::validation::{validate_inputs, ValidationError};
use crate::variants::{compute_loan, LoanInput, LoanKind, LoanResult};
use crate::EmiResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Effect of the configured prepayment against the same loan without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentSavings {
    pub baseline_total_payment: Money,
    pub prepaid_total_payment: Money,
    pub interest_saved: Money,
    pub periods_saved: u32,
}

/// Full calculator output for one loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanReport {
    pub loan_type: String,
    /// Principal that is actually amortized (after any down payment).
    pub financed_principal: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_fee_pct: Option<Decimal>,
    pub schedule_totals: ScheduleTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepayment_savings: Option<PrepaymentSavings>,
    #[serde(flatten)]
    pub loan: LoanResult,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Validate `input`, run the matching calculator variant and report.
pub fn calculate_loan(input: &LoanInput) -> EmiResult<ComputationOutput<LoanReport>> {
    let terms = &input.terms;
    let mut warnings: Vec<String> = Vec::new();

    let financed = financed_principal(input);
    let paid_in_cash = matches!(input.kind, LoanKind::Car { .. })
        && terms.principal > Decimal::ZERO
        && financed <= Decimal::ZERO;

    let mut report = validate_inputs(input);
    if paid_in_cash {
        // A cash purchase only excuses the down-payment rule.
        report
            .errors
            .retain(|e| !matches!(e, ValidationError::InvalidDownPayment { .. }));
        report.valid = report.errors.is_empty();
    }
    if !report.valid {
        return Err(EmiError::Validation(report));
    }
    if paid_in_cash {
        warnings.push("Down payment covers the full price; nothing is financed".into());
    }

    let rate = periodic_rate(terms.interest_rate);
    if !paid_in_cash && rate.is_zero() {
        warnings.push(format!(
            "Interest rate {}% is below decimal precision per period; principal is amortized straight-line",
            terms.interest_rate
        ));
    }

    let periods = period_count(terms.tenure_years);
    if let Some(p) = terms.effective_prepayment() {
        if p.month > periods {
            warnings.push(format!(
                "Prepayment month {} is beyond the {periods}-period term; it is never applied",
                p.month
            ));
        } else if p.amount >= financed {
            warnings.push(
                "Prepayment exceeds the financed principal; it is capped at the outstanding balance"
                    .into(),
            );
        }
    }

    let loan = compute_loan(input);
    let schedule_totals = ScheduleTotals::from_rows(&loan.schedule);
    let prepayment_savings = if paid_in_cash {
        None
    } else {
        prepayment_savings(terms, financed, &schedule_totals)
    };

    let result = LoanReport {
        loan_type: input.kind.name().to_string(),
        financed_principal: round_money(financed.max(Decimal::ZERO)),
        down_payment_pct: match input.kind {
            LoanKind::Car { down_payment } => share_of_principal(down_payment, terms.principal),
            _ => None,
        },
        processing_fee_pct: match input.kind {
            LoanKind::Home { processing_fee } | LoanKind::Personal { processing_fee } => {
                share_of_principal(processing_fee, terms.principal)
            }
            _ => None,
        },
        schedule_totals,
        prepayment_savings,
        loan,
    };

    Ok(with_metadata(
        "Reducing-balance EMI amortization (monthly compounding)",
        &serde_json::json!({
            "input": input,
            "periodic_rate": rate.to_string(),
            "periods": periods,
        }),
        warnings,
        result,
    ))
}

/// Principal left to amortize once any down payment is taken off.
pub fn financed_principal(input: &LoanInput) -> Money {
    match input.kind {
        LoanKind::Car { down_payment } => input.terms.principal - down_payment,
        _ => input.terms.principal,
    }
}

fn share_of_principal(amount: Money, principal: Money) -> Option<Decimal> {
    if principal <= Decimal::ZERO {
        return None;
    }
    Some(round_money(amount / principal * dec!(100)))
}

fn prepayment_savings(
    terms: &LoanTerms,
    financed: Money,
    prepaid: &ScheduleTotals,
) -> Option<PrepaymentSavings> {
    terms.effective_prepayment()?;

    let mut baseline_terms = terms.with_principal(financed);
    baseline_terms.prepayment = None;
    let baseline = ScheduleTotals::from_rows(&build_amortization_schedule(&baseline_terms));

    Some(PrepaymentSavings {
        baseline_total_payment: baseline.total_payment,
        prepaid_total_payment: prepaid.total_payment,
        interest_saved: baseline.total_interest - prepaid.total_interest,
        periods_saved: baseline.periods.saturating_sub(prepaid.periods),
    })
}
