//! Test Helpers

use std::str::FromStr;

use rust_decimal::Decimal;
use testresult::TestResult;

/// Parse a decimal literal such as `"12.50"`.
pub(crate) fn price(value: &str) -> TestResult<Decimal> {
    Ok(Decimal::from_str(value)?)
}
