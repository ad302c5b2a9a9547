pub mod calculator;
pub mod config;
pub mod emi;
pub mod error;
pub mod schedule;
pub mod types;
pub mod validation;
pub mod variants;

pub use calculator::{calculate_loan, LoanReport, PrepaymentSavings};
pub use emi::{compute_emi, compute_total_interest, try_compute_emi};
pub use error::EmiError;
pub use schedule::{
    build_amortization_schedule, AmortizationRow, LoanTerms, Prepayment, PrepaymentFrequency,
    ScheduleTotals,
};
pub use types::*;
pub use validation::{validate_inputs, validate_with_limits, ValidationError, ValidationReport};
pub use variants::{
    compute_car_loan, compute_generic_loan, compute_home_loan, compute_loan,
    compute_loan_with_prepayment, compute_personal_loan, LoanInput, LoanKind, LoanResult,
};

/// Standard result type for the fallible loan operations
pub type EmiResult<T> = Result<T, EmiError>;
