use std::fmt;

use rust_decimal::Decimal;

/// Parse a deposit/withdrawal amount entered by the user.
/// Amounts are whole units: "50" -> 50, " 50 " -> 50. Anything that is not
/// an integer (including "50.00") is rejected.
pub fn parse_amount(input: &str) -> Result<Decimal, ParseAmountError> {
    let units: i64 = input
        .trim()
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;
    Ok(Decimal::from(units))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
