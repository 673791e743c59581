//! Currency pair identifier for FX calculations.
//!
//! The convention is BASE/QUOTE: an EUR/USD option is an option on one unit
//! of EUR, with strike and premium expressed in USD. The spot rate is not
//! stored on the pair; market levels are passed explicitly with each
//! pricing call.

use std::fmt;
use std::str::FromStr;

use super::currency::Currency;
use super::error::CurrencyError;

/// A currency pair in BASE/QUOTE convention.
///
/// In the FX options nomenclature the base currency is the "foreign"
/// currency (the asset) and the quote currency is the "domestic" one
/// (the numeraire the premium is paid in).
///
/// # Examples
///
/// ```
/// use fxpricer_core::types::{Currency, CurrencyPair};
///
/// let eurusd = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
/// assert_eq!(eurusd.base(), Currency::EUR);
/// assert_eq!(eurusd.quote(), Currency::USD);
/// assert_eq!(eurusd.code(), "EUR/USD");
///
/// let usdeur = eurusd.invert();
/// assert_eq!(usdeur.code(), "USD/EUR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyPair {
    /// Base (foreign) currency
    base: Currency,
    /// Quote (domestic) currency
    quote: Currency,
}

impl CurrencyPair {
    /// Creates a new currency pair.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::SameCurrency` if base and quote coincide.
    pub fn new(base: Currency, quote: Currency) -> Result<Self, CurrencyError> {
        if base == quote {
            return Err(CurrencyError::SameCurrency(base.code().to_string()));
        }
        Ok(Self { base, quote })
    }

    /// Returns the base (foreign) currency.
    #[inline]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Returns the quote (domestic) currency.
    #[inline]
    pub fn quote(&self) -> Currency {
        self.quote
    }

    /// Returns the pair code in BASE/QUOTE format.
    pub fn code(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }

    /// Returns the inverted pair (QUOTE/BASE).
    #[inline]
    pub fn invert(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = CurrencyError;

    /// Parses a pair from "EUR/USD" or "EURUSD" format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base_str, quote_str) = match s.split_once('/') {
            Some((b, q)) => (b, q),
            None if s.len() == 6 && s.is_ascii() => s.split_at(3),
            None => {
                return Err(CurrencyError::ParseError(format!(
                    "Expected BASE/QUOTE or BASEQUOTE format, got: {}",
                    s
                )));
            }
        };
        CurrencyPair::new(base_str.parse()?, quote_str.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_same_currency() {
        let result = CurrencyPair::new(Currency::USD, Currency::USD);
        assert!(matches!(result, Err(CurrencyError::SameCurrency(_))));
    }

    #[test]
    fn test_invert() {
        let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
        let inverted = pair.invert();
        assert_eq!(inverted.base(), Currency::USD);
        assert_eq!(inverted.quote(), Currency::EUR);
    }

    #[test]
    fn test_from_str_slash_format() {
        let pair: CurrencyPair = "GBP/JPY".parse().unwrap();
        assert_eq!(pair.base(), Currency::GBP);
        assert_eq!(pair.quote(), Currency::JPY);
    }

    #[test]
    fn test_from_str_compact_format() {
        let pair: CurrencyPair = "EURUSD".parse().unwrap();
        assert_eq!(pair.code(), "EUR/USD");
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("EUR".parse::<CurrencyPair>().is_err());
        assert!("EUR/EUR".parse::<CurrencyPair>().is_err());
        assert!("EUR/XXX".parse::<CurrencyPair>().is_err());
    }
}
