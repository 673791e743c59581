//! Smile construction error types.

use fxpricer_core::market_data::MarketDataError;
use fxpricer_core::types::time::Date;
use thiserror::Error;

use crate::analytical::AnalyticalError;
use crate::instruments::fx::FxMarketQuoteType;

/// Smile construction and evaluation errors.
///
/// # Examples
///
/// ```
/// use fxpricer_core::types::time::Date;
/// use fxpricer_models::instruments::fx::FxMarketQuoteType;
/// use fxpricer_models::smile::SmileError;
///
/// let err = SmileError::MissingPillar {
///     expiry: Date::from_ymd(2025, 1, 1).unwrap(),
///     quote_type: FxMarketQuoteType::Butterfly25Delta,
/// };
/// assert!(format!("{}", err).contains("25DFLY"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SmileError {
    /// No market quotes supplied.
    #[error("Smile construction requires at least one market quote")]
    NoQuotes,

    /// Quotes observed on different dates cannot calibrate one smile.
    #[error("Quote as-of date {got} differs from {expected}")]
    MixedAsOfDates {
        /// The as-of date of the first quote
        expected: Date,
        /// The conflicting as-of date
        got: Date,
    },

    /// Non-positive spot rate.
    #[error("Invalid spot rate: {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// An expiry lacks one of the three required pillar quotes.
    #[error("Missing {quote_type} quote for expiry {expiry}")]
    MissingPillar {
        /// The expiry with incomplete quotes
        expiry: Date,
        /// The pillar that is missing
        quote_type: FxMarketQuoteType,
    },

    /// The requested expiry was not calibrated.
    #[error("No market quotes were supplied for expiry {expiry}")]
    UnknownExpiry {
        /// The requested expiry
        expiry: Date,
    },

    /// Two pillar strikes coincide, making the weight denominators vanish.
    #[error("Degenerate smile: pillar strikes {k_lower} and {k_upper} collide")]
    DegenerateSmile {
        /// Lower strike of the colliding pair
        k_lower: f64,
        /// Upper strike of the colliding pair
        k_upper: f64,
    },

    /// Non-positive target strike.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// A premium-style quote arrived without its strike.
    #[error("Premium quote for expiry {expiry} does not carry a strike")]
    PremiumQuoteWithoutStrike {
        /// The expiry of the offending quote
        expiry: Date,
    },

    /// Market data error.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Analytical error.
    #[error("Analytical error: {0}")]
    Analytical(#[from] AnalyticalError),
}
