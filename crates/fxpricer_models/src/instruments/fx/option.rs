//! European vanilla FX option contract.

use std::fmt;

use fxpricer_core::types::time::Date;
use fxpricer_core::types::CurrencyPair;
use thiserror::Error;

/// FX option contract errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxOptionError {
    /// Non-positive strike.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Non-positive notional.
    #[error("Invalid notional: {notional}")]
    InvalidNotional {
        /// The invalid notional value
        notional: f64,
    },
}

/// Call or put.
///
/// `sign()` returns the omega that folds the call and put branches of the
/// Black formula into one expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FxOptionType {
    /// Right to buy the base currency.
    Call,
    /// Right to sell the base currency.
    Put,
}

impl FxOptionType {
    /// Returns omega: +1 for calls, -1 for puts.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            FxOptionType::Call => 1.0,
            FxOptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for FxOptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxOptionType::Call => write!(f, "Call"),
            FxOptionType::Put => write!(f, "Put"),
        }
    }
}

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Long the option.
    Buy,
    /// Short the option.
    Sell,
}

impl Direction {
    /// Returns +1 for buys, -1 for sells.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Buy => 1.0,
            Direction::Sell => -1.0,
        }
    }
}

/// A European vanilla FX option.
///
/// An option on one unit of the pair's base (foreign) currency, with strike
/// and premium in the quote (domestic) currency. Immutable value object
/// with by-value equality.
///
/// # Examples
///
/// ```
/// use fxpricer_core::types::time::Date;
/// use fxpricer_core::types::{Currency, CurrencyPair};
/// use fxpricer_models::instruments::fx::{Direction, EuropeanVanillaFxOption, FxOptionType};
///
/// let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
/// let option = EuropeanVanillaFxOption::new(
///     pair,
///     1.12,
///     Date::from_ymd(2025, 1, 1).unwrap(),
///     FxOptionType::Call,
///     1_000_000.0,
///     Direction::Buy,
/// )
/// .unwrap();
///
/// assert_eq!(option.strike(), 1.12);
/// assert_eq!(option.option_type(), FxOptionType::Call);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuropeanVanillaFxOption {
    /// Currency pair (base = foreign, quote = domestic)
    pair: CurrencyPair,
    /// Strike in domestic per unit of foreign
    strike: f64,
    /// Expiry date
    expiry: Date,
    /// Call or put
    option_type: FxOptionType,
    /// Notional in foreign currency units
    notional: f64,
    /// Buy or sell
    direction: Direction,
}

impl EuropeanVanillaFxOption {
    /// Creates a new option contract.
    ///
    /// # Errors
    ///
    /// Returns `FxOptionError` for a non-positive strike or notional.
    pub fn new(
        pair: CurrencyPair,
        strike: f64,
        expiry: Date,
        option_type: FxOptionType,
        notional: f64,
        direction: Direction,
    ) -> Result<Self, FxOptionError> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(FxOptionError::InvalidStrike { strike });
        }
        if !notional.is_finite() || notional <= 0.0 {
            return Err(FxOptionError::InvalidNotional { notional });
        }
        Ok(Self {
            pair,
            strike,
            expiry,
            option_type,
            notional,
            direction,
        })
    }

    /// Returns the currency pair.
    #[inline]
    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the expiry date.
    #[inline]
    pub fn expiry(&self) -> Date {
        self.expiry
    }

    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> FxOptionType {
        self.option_type
    }

    /// Returns the notional in foreign currency units.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the trade direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxpricer_core::types::Currency;

    fn eurusd() -> CurrencyPair {
        CurrencyPair::new(Currency::EUR, Currency::USD).unwrap()
    }

    fn expiry() -> Date {
        Date::from_ymd(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_sign_conventions() {
        assert_eq!(FxOptionType::Call.sign(), 1.0);
        assert_eq!(FxOptionType::Put.sign(), -1.0);
        assert_eq!(Direction::Buy.sign(), 1.0);
        assert_eq!(Direction::Sell.sign(), -1.0);
    }

    #[test]
    fn test_new_valid() {
        let option = EuropeanVanillaFxOption::new(
            eurusd(),
            1.12,
            expiry(),
            FxOptionType::Put,
            500_000.0,
            Direction::Sell,
        )
        .unwrap();
        assert_eq!(option.pair().code(), "EUR/USD");
        assert_eq!(option.direction(), Direction::Sell);
        assert_eq!(option.notional(), 500_000.0);
    }

    #[test]
    fn test_new_invalid_strike() {
        for strike in [0.0, -1.1, f64::NAN] {
            let result = EuropeanVanillaFxOption::new(
                eurusd(),
                strike,
                expiry(),
                FxOptionType::Call,
                1.0,
                Direction::Buy,
            );
            assert!(matches!(result, Err(FxOptionError::InvalidStrike { .. })));
        }
    }

    #[test]
    fn test_new_invalid_notional() {
        let result = EuropeanVanillaFxOption::new(
            eurusd(),
            1.12,
            expiry(),
            FxOptionType::Call,
            0.0,
            Direction::Buy,
        );
        assert!(matches!(result, Err(FxOptionError::InvalidNotional { .. })));
    }

    #[test]
    fn test_value_equality() {
        let a = EuropeanVanillaFxOption::new(
            eurusd(),
            1.12,
            expiry(),
            FxOptionType::Call,
            1.0,
            Direction::Buy,
        )
        .unwrap();
        let b = a;
        assert_eq!(a, b);
    }
}
