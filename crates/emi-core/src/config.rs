//! Lending policy constants and the validation limits derived from them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Payment periods per year; every schedule is monthly.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Divides a nominal annual percentage into a monthly decimal rate (12 * 100).
pub const RATE_DIVISOR: Decimal = dec!(1200);

/// Longest tenure accepted by validation, in years.
pub const MAX_TENURE_YEARS: u32 = 50;

/// Highest nominal annual rate accepted by validation, in percent.
pub const MAX_INTEREST_RATE: Decimal = dec!(100);

/// Decimal places of every emitted monetary value.
pub const MONEY_DP: u32 = 2;

/// Upper bounds applied by input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub max_tenure_years: u32,
    pub max_interest_rate: Decimal,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_tenure_years: MAX_TENURE_YEARS,
            max_interest_rate: MAX_INTEREST_RATE,
        }
    }
}
