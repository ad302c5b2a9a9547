//! Month-by-month amortization with an optional lump-sum prepayment.
//!
//! The running balance is carried at full Decimal precision; only emitted
//! rows are rounded to 2 dp. A prepayment shortens the schedule and never
//! reduces the EMI.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_TENURE_YEARS, MONTHS_PER_YEAR};
use crate::emi::{period_count, periodic_rate, unrounded_emi};
use crate::types::{round_money, Money, Percent};

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// How often a configured prepayment is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepaymentFrequency {
    /// A single lump sum at `month`.
    #[default]
    Once,
    /// The same sum every period from `month` until the loan is retired.
    Monthly,
}

/// Extra principal paid on top of the EMI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prepayment {
    pub amount: Money,
    /// 1-based period at which the prepayment is first applied.
    pub month: u32,
    #[serde(default)]
    pub frequency: PrepaymentFrequency,
}

impl Prepayment {
    /// A zero amount or a zero month means no prepayment at all.
    pub fn is_effective(&self) -> bool {
        self.amount > Decimal::ZERO && self.month > 0
    }

    fn is_due(&self, period: u32, already_applied: bool) -> bool {
        if !self.is_effective() || period < self.month {
            return false;
        }
        match self.frequency {
            PrepaymentFrequency::Once => !already_applied,
            PrepaymentFrequency::Monthly => true,
        }
    }
}

/// The loan terms shared by every calculator variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Nominal annual rate in percent.
    pub interest_rate: Percent,
    pub tenure_years: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepayment: Option<Prepayment>,
}

impl LoanTerms {
    pub fn new(principal: Money, interest_rate: Percent, tenure_years: u32) -> Self {
        Self {
            principal,
            interest_rate,
            tenure_years,
            prepayment: None,
        }
    }

    pub fn with_prepayment(mut self, prepayment: Prepayment) -> Self {
        self.prepayment = Some(prepayment);
        self
    }

    /// Same terms over a different principal (used for down-payment adjustment).
    pub fn with_principal(&self, principal: Money) -> Self {
        Self {
            principal,
            ..self.clone()
        }
    }

    /// The prepayment, if one is configured with a positive amount and month.
    pub fn effective_prepayment(&self) -> Option<&Prepayment> {
        self.prepayment.as_ref().filter(|p| p.is_effective())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One period of the amortization ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    /// EMI plus any prepayment applied this period. On the closing row this
    /// is the interest plus the balance actually retired.
    pub payment: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub remaining_balance: Money,
}

/// Column sums of a schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub periods: u32,
    pub total_payment: Money,
    pub total_principal: Money,
    pub total_interest: Money,
}

impl ScheduleTotals {
    pub fn from_rows(rows: &[AmortizationRow]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            acc.periods += 1;
            acc.total_payment += row.payment;
            acc.total_principal += row.principal_paid;
            acc.total_interest += row.interest_paid;
            acc
        })
    }
}

// ---------------------------------------------------------------------------
// Schedule builder
// ---------------------------------------------------------------------------

/// Build the period-by-period ledger for `terms`.
///
/// Degenerate terms (no periods, non-positive principal or rate, or an EMI
/// that cannot be computed) produce an empty schedule.
pub fn build_amortization_schedule(terms: &LoanTerms) -> Vec<AmortizationRow> {
    let periods = period_count(terms.tenure_years);
    if periods == 0 || terms.principal <= Decimal::ZERO || terms.interest_rate <= Decimal::ZERO {
        return Vec::new();
    }
    let emi = match unrounded_emi(terms.principal, terms.interest_rate, terms.tenure_years) {
        Ok(emi) => emi,
        Err(e) => {
            log::debug!("no schedule: {e}");
            return Vec::new();
        }
    };

    let rate = periodic_rate(terms.interest_rate);
    let prepayment = terms.effective_prepayment();

    // Terms are not validated here; reserve at most the longest lendable term.
    let capacity = periods.min(MAX_TENURE_YEARS * MONTHS_PER_YEAR);
    let mut schedule = Vec::with_capacity(capacity as usize);
    let mut balance = terms.principal;
    let mut prepayment_applied = false;

    for period in 1..=periods {
        let interest = balance * rate;
        let mut principal_paid = emi - interest;

        let mut applied = Decimal::ZERO;
        if let Some(p) = prepayment {
            if balance > Decimal::ZERO && p.is_due(period, prepayment_applied) {
                let headroom = (balance - principal_paid).max(Decimal::ZERO);
                applied = p.amount.min(headroom);
                principal_paid += applied;
                prepayment_applied = true;
            }
        }

        // Final truncation; the last nominal period also sweeps any residual
        // left by Decimal precision.
        let closing = principal_paid >= balance || period == periods;
        let payment = if closing {
            principal_paid = balance;
            interest + balance
        } else {
            emi + applied
        };

        balance -= principal_paid;

        schedule.push(AmortizationRow {
            period,
            payment: round_money(payment),
            principal_paid: round_money(principal_paid),
            interest_paid: round_money(interest),
            remaining_balance: round_money(balance).max(Decimal::ZERO),
        });

        if balance <= Decimal::ZERO {
            if period < periods {
                log::debug!("schedule retired early at period {period} of {periods}");
            }
            break;
        }
    }

    log::debug!(
        "built {} row schedule for principal {} at {}% over {} years",
        schedule.len(),
        terms.principal,
        terms.interest_rate,
        terms.tenure_years
    );
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn one_year_loan() -> LoanTerms {
        LoanTerms::new(dec!(100_000), dec!(12), 1)
    }

    #[test]
    fn test_first_row_split() {
        let rows = build_amortization_schedule(&one_year_loan());
        let first = &rows[0];
        assert_eq!(first.period, 1);
        assert_eq!(first.payment, dec!(8884.88));
        assert_eq!(first.interest_paid, dec!(1000.00));
        assert_eq!(first.principal_paid, dec!(7884.88));
        assert_eq!(first.remaining_balance, dec!(92115.12));
    }

    #[test]
    fn test_full_term_closes_at_zero() {
        let rows = build_amortization_schedule(&one_year_loan());
        assert_eq!(rows.len(), 12);
        let last = rows.last().unwrap();
        assert_eq!(last.period, 12);
        assert_eq!(last.remaining_balance, Decimal::ZERO);
        assert_eq!(last.principal_paid, dec!(8796.91));
    }

    #[test]
    fn test_one_time_prepayment_applied_once() {
        let terms = one_year_loan().with_prepayment(Prepayment {
            amount: dec!(50_000),
            month: 6,
            frequency: PrepaymentFrequency::Once,
        });
        let rows = build_amortization_schedule(&terms);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[5].payment, dec!(58884.88));
        assert_eq!(rows[4].payment, dec!(8884.88));
        // Closing row retires the remainder
        assert_eq!(rows[6].principal_paid, dec!(1492.11));
        assert_eq!(rows[6].remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_oversized_prepayment_is_capped() {
        let terms = one_year_loan().with_prepayment(Prepayment {
            amount: dec!(200_000),
            month: 6,
            frequency: PrepaymentFrequency::Once,
        });
        let rows = build_amortization_schedule(&terms);
        assert_eq!(rows.len(), 6);
        let last = rows.last().unwrap();
        assert_eq!(last.remaining_balance, Decimal::ZERO);
        // Only the outstanding balance is taken, not the full 200k
        assert_eq!(last.payment, dec!(60376.99));
        assert_eq!(last.principal_paid, dec!(59779.19));
    }

    #[test]
    fn test_zero_month_prepayment_ignored() {
        let terms = one_year_loan().with_prepayment(Prepayment {
            amount: dec!(10_000),
            month: 0,
            frequency: PrepaymentFrequency::Once,
        });
        assert_eq!(
            build_amortization_schedule(&terms),
            build_amortization_schedule(&one_year_loan())
        );
    }

    #[test]
    fn test_degenerate_terms_yield_empty_schedule() {
        assert!(build_amortization_schedule(&LoanTerms::new(dec!(1000), dec!(10), 0)).is_empty());
        assert!(build_amortization_schedule(&LoanTerms::new(dec!(0), dec!(10), 5)).is_empty());
        assert!(build_amortization_schedule(&LoanTerms::new(dec!(1000), dec!(0), 5)).is_empty());
    }

    #[test]
    fn test_term_beyond_lending_cap_still_runs_in_full() {
        // Sub-scale rate: straight-line over 100 years, twice the preallocated rows
        let terms = LoanTerms::new(dec!(1000), dec!(0.0000000000000000000000000001), 100);
        let rows = build_amortization_schedule(&terms);
        assert_eq!(rows.len(), 1200);
        assert_eq!(rows.last().unwrap().remaining_balance, Decimal::ZERO);
        assert_eq!(rows[0].interest_paid, Decimal::ZERO);
    }

    #[test]
    fn test_totals_from_rows() {
        let rows = build_amortization_schedule(&one_year_loan());
        let totals = ScheduleTotals::from_rows(&rows);
        assert_eq!(totals.periods, 12);
        // Per-row rounding drifts by at most a cent per row
        assert!((totals.total_principal - dec!(100_000)).abs() <= dec!(0.12));
        assert!(
            (totals.total_payment - totals.total_principal - totals.total_interest).abs()
                <= dec!(0.12)
        );
    }
}
