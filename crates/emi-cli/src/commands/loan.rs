use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use emi_core::{calculate_loan, validate_inputs, LoanInput, LoanKind};

use crate::commands::emi::TermsArgs;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Generic,
    Car,
    Home,
    Personal,
}

/// Arguments for the full loan report
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub terms: TermsArgs,

    /// Calculator variant
    #[arg(long, value_enum, default_value = "generic")]
    pub kind: KindArg,

    /// Down payment (car loans)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Upfront processing fee (home and personal loans)
    #[arg(long)]
    pub processing_fee: Option<Decimal>,
}

/// Arguments for input validation
#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

impl LoanArgs {
    fn to_input(&self) -> Result<LoanInput, Box<dyn std::error::Error>> {
        let kind = match self.kind {
            KindArg::Generic => LoanKind::Generic,
            KindArg::Car => LoanKind::Car {
                down_payment: self.down_payment.unwrap_or(Decimal::ZERO),
            },
            KindArg::Home => LoanKind::Home {
                processing_fee: self.processing_fee.unwrap_or(Decimal::ZERO),
            },
            KindArg::Personal => LoanKind::Personal {
                processing_fee: self.processing_fee.unwrap_or(Decimal::ZERO),
            },
        };
        Ok(LoanInput {
            terms: self.terms.to_terms()?,
            kind,
        })
    }

    fn resolve(&self) -> Result<LoanInput, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            input::file::read_input(path)
        } else if let Some(data) = input::stdin::read_stdin()? {
            Ok(serde_json::from_value(data)?)
        } else {
            self.to_input()
        }
    }
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = args.resolve()?;
    let result = calculate_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = args.loan.resolve()?;
    let report = validate_inputs(&loan_input);
    let mut value = serde_json::to_value(&report)?;
    if let Value::Object(ref mut map) = value {
        map.insert("messages".into(), serde_json::to_value(report.messages())?);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn car_args() -> LoanArgs {
        LoanArgs {
            input: None,
            terms: TermsArgs {
                principal: Some(dec!(800_000)),
                rate: Some(dec!(12.5)),
                tenure: Some(5),
                prepayment_amount: None,
                prepayment_month: None,
                recurring: false,
            },
            kind: KindArg::Car,
            down_payment: Some(dec!(200_000)),
            processing_fee: None,
        }
    }

    #[test]
    fn test_car_flags_build_tagged_kind() {
        let input = car_args().to_input().unwrap();
        assert_eq!(
            input.kind,
            LoanKind::Car {
                down_payment: dec!(200_000)
            }
        );
    }

    #[test]
    fn test_loan_report_value() {
        let report = calculate_loan(&car_args().to_input().unwrap()).unwrap();
        let value = serde_json::to_value(report).unwrap();
        assert_eq!(value["result"]["loan_type"], "car");
        assert_eq!(value["result"]["financed_principal"], "600000");
    }
}
