use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ValidationLimits;
use crate::schedule::LoanTerms;
use crate::types::{Money, Percent};
use crate::variants::{LoanInput, LoanKind};

/// A single rule violated by a loan input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Principal amount must be greater than 0")]
    InvalidPrincipal { principal: Money },

    #[error("Interest rate must be greater than 0 and at most {max}%")]
    InvalidInterestRate { interest_rate: Percent, max: Percent },

    #[error("Tenure must be between 1 and {max} years")]
    InvalidTenure { tenure_years: u32, max: u32 },

    #[error("Down payment must be non-negative and less than the principal amount")]
    InvalidDownPayment { down_payment: Money },

    #[error("Processing fee cannot be negative")]
    InvalidProcessingFee { processing_fee: Money },

    #[error("Prepayment amount cannot be negative")]
    InvalidPrepayment { amount: Money },
}

/// Outcome of validating a loan input. Every rule is checked, so `errors`
/// lists all violations in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Human-readable messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Validate against the default lending limits.
pub fn validate_inputs(input: &LoanInput) -> ValidationReport {
    validate_with_limits(input, &ValidationLimits::default())
}

pub fn validate_with_limits(input: &LoanInput, limits: &ValidationLimits) -> ValidationReport {
    validate_parts(&input.terms, &input.kind, limits)
}

pub(crate) fn validate_parts(
    terms: &LoanTerms,
    kind: &LoanKind,
    limits: &ValidationLimits,
) -> ValidationReport {
    let mut errors = Vec::new();

    if terms.principal <= Decimal::ZERO {
        errors.push(ValidationError::InvalidPrincipal {
            principal: terms.principal,
        });
    }

    if terms.interest_rate <= Decimal::ZERO || terms.interest_rate > limits.max_interest_rate {
        errors.push(ValidationError::InvalidInterestRate {
            interest_rate: terms.interest_rate,
            max: limits.max_interest_rate,
        });
    }

    if terms.tenure_years == 0 || terms.tenure_years > limits.max_tenure_years {
        errors.push(ValidationError::InvalidTenure {
            tenure_years: terms.tenure_years,
            max: limits.max_tenure_years,
        });
    }

    match kind {
        LoanKind::Car { down_payment } => {
            if *down_payment < Decimal::ZERO || *down_payment >= terms.principal {
                errors.push(ValidationError::InvalidDownPayment {
                    down_payment: *down_payment,
                });
            }
        }
        LoanKind::Home { processing_fee } | LoanKind::Personal { processing_fee } => {
            if *processing_fee < Decimal::ZERO {
                errors.push(ValidationError::InvalidProcessingFee {
                    processing_fee: *processing_fee,
                });
            }
        }
        LoanKind::Generic => {}
    }

    if let Some(p) = &terms.prepayment {
        if p.amount < Decimal::ZERO {
            errors.push(ValidationError::InvalidPrepayment { amount: p.amount });
        }
    }

    ValidationReport::from_errors(errors)
}
