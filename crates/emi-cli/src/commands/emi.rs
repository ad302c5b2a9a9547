use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use emi_core::emi::period_count;
use emi_core::{
    build_amortization_schedule, compute_total_interest, try_compute_emi, LoanTerms, Prepayment,
    PrepaymentFrequency,
};

use crate::input;

/// Loan terms shared by every command
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TermsArgs {
    /// Loan principal (or vehicle/property price for variants with a down payment)
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate in percent (8.5 = 8.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Extra principal paid on top of the EMI
    #[arg(long)]
    pub prepayment_amount: Option<Decimal>,

    /// 1-based month at which the prepayment is applied
    #[arg(long)]
    pub prepayment_month: Option<u32>,

    /// Repeat the prepayment every month from --prepayment-month on
    #[arg(long)]
    pub recurring: bool,
}

impl TermsArgs {
    pub fn to_terms(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        let mut terms = LoanTerms::new(
            self.principal
                .ok_or("--principal is required (or provide --input)")?,
            self.rate.ok_or("--rate is required (or provide --input)")?,
            self.tenure.ok_or("--tenure is required (or provide --input)")?,
        );
        if let Some(amount) = self.prepayment_amount {
            let month = self
                .prepayment_month
                .ok_or("--prepayment-month is required with --prepayment-amount")?;
            terms.prepayment = Some(Prepayment {
                amount,
                month,
                frequency: if self.recurring {
                    PrepaymentFrequency::Monthly
                } else {
                    PrepaymentFrequency::Once
                },
            });
        }
        Ok(terms)
    }
}

/// Arguments for the plain EMI calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Nominal annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Tenure in years
    #[arg(long)]
    pub tenure: u32,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub terms: TermsArgs,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi = try_compute_emi(args.principal, args.rate, args.tenure)?;
    let periods = period_count(args.tenure);
    Ok(json!({
        "emi": emi,
        "total_interest": compute_total_interest(emi, args.principal, args.tenure),
        "total_amount": emi * Decimal::from(periods),
        "periods": periods,
    }))
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        args.terms.to_terms()?
    };
    let rows = build_amortization_schedule(&terms);
    if rows.is_empty() {
        return Err("no schedule: principal, rate and tenure must all be positive".into());
    }
    Ok(serde_json::to_value(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flags() -> TermsArgs {
        TermsArgs {
            principal: Some(dec!(100_000)),
            rate: Some(dec!(12)),
            tenure: Some(1),
            prepayment_amount: None,
            prepayment_month: None,
            recurring: false,
        }
    }

    #[test]
    fn test_terms_from_flags() {
        let terms = flags().to_terms().unwrap();
        assert_eq!(terms, LoanTerms::new(dec!(100_000), dec!(12), 1));
    }

    #[test]
    fn test_prepayment_needs_month() {
        let mut args = flags();
        args.prepayment_amount = Some(dec!(5000));
        assert!(args.to_terms().is_err());

        args.prepayment_month = Some(4);
        args.recurring = true;
        let p = args.to_terms().unwrap().prepayment.unwrap();
        assert_eq!(p.frequency, PrepaymentFrequency::Monthly);
    }

    #[test]
    fn test_run_emi_totals() {
        let value = run_emi(EmiArgs {
            principal: dec!(1_000_000),
            rate: dec!(8.5),
            tenure: 20,
        })
        .unwrap();
        assert_eq!(value["emi"], "8678.23");
        assert_eq!(value["total_interest"], "1082775.20");
        assert_eq!(value["periods"], 240);
    }

    #[test]
    fn test_run_emi_rejects_zero_rate() {
        let err = run_emi(EmiArgs {
            principal: dec!(1000),
            rate: dec!(0),
            tenure: 1,
        })
        .unwrap_err();
        assert!(err.to_string().contains("interest rate"));
    }
}
