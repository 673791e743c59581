//! ISO 4217 currency codes for the major FX pairs.

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// Currency code.
///
/// Covers the G10 currencies, which is the universe the FX options market
/// conventions in this library are defined for.
///
/// # Examples
///
/// ```
/// use fxpricer_core::types::Currency;
///
/// let usd: Currency = "USD".parse().unwrap();
/// assert_eq!(usd.code(), "USD");
/// assert_eq!(format!("{}", Currency::EUR), "EUR");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
    /// Australian Dollar
    AUD,
    /// New Zealand Dollar
    NZD,
    /// Canadian Dollar
    CAD,
    /// Swedish Krona
    SEK,
    /// Norwegian Krone
    NOK,
}

impl Currency {
    /// Returns the ISO 4217 code.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::AUD => "AUD",
            Currency::NZD => "NZD",
            Currency::CAD => "CAD",
            Currency::SEK => "SEK",
            Currency::NOK => "NOK",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            "AUD" => Ok(Currency::AUD),
            "NZD" => Ok(Currency::NZD),
            "CAD" => Ok(Currency::CAD),
            "SEK" => Ok(Currency::SEK),
            "NOK" => Ok(Currency::NOK),
            _ => Err(CurrencyError::UnknownCurrency(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for ccy in [
            Currency::USD,
            Currency::EUR,
            Currency::GBP,
            Currency::JPY,
            Currency::CHF,
            Currency::AUD,
            Currency::NZD,
            Currency::CAD,
            Currency::SEK,
            Currency::NOK,
        ] {
            assert_eq!(ccy.code().parse::<Currency>().unwrap(), ccy);
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!("Eur".parse::<Currency>().unwrap(), Currency::EUR);
    }

    #[test]
    fn test_from_str_unknown() {
        let result = "XYZ".parse::<Currency>();
        assert!(matches!(result, Err(CurrencyError::UnknownCurrency(_))));
    }
}
