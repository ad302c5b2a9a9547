use std::str::FromStr;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};

use emi_core::{EmiError, LoanInput, LoanTerms};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, value: &str) -> NapiResult<Decimal> {
    Decimal::from_str(value.trim()).map_err(|e| {
        to_napi_error(EmiError::InvalidInput {
            field: field.into(),
            reason: e.to_string(),
        })
    })
}

/// Malformed JSON surfaces as an `EmiError::SerializationError`.
fn parse_json<T: DeserializeOwned>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(|e| to_napi_error(EmiError::from(e)))
}

#[derive(Serialize)]
struct EmiOutput {
    emi: Decimal,
    total_interest: Decimal,
    total_amount: Decimal,
}

// ---------------------------------------------------------------------------
// EMI
// ---------------------------------------------------------------------------

/// Decimal amounts cross the boundary as strings to keep full precision.
#[napi]
pub fn compute_emi(
    principal: String,
    interest_rate: String,
    tenure_years: u32,
) -> NapiResult<String> {
    let principal = parse_decimal("principal", &principal)?;
    let interest_rate = parse_decimal("interest_rate", &interest_rate)?;
    let emi = emi_core::try_compute_emi(principal, interest_rate, tenure_years)
        .map_err(to_napi_error)?;
    let total_interest = emi_core::compute_total_interest(emi, principal, tenure_years);
    let output = EmiOutput {
        emi,
        total_interest,
        total_amount: principal + total_interest,
    };
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let terms: LoanTerms = parse_json(&input_json)?;
    let schedule = emi_core::build_amortization_schedule(&terms);
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan variants
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input: LoanInput = parse_json(&input_json)?;
    let output = emi_core::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_loan(input_json: String) -> NapiResult<String> {
    let input: LoanInput = parse_json(&input_json)?;
    let report = emi_core::validate_inputs(&input);
    serde_json::to_string(&report).map_err(to_napi_error)
}
