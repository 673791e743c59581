//! Market data error types.

use crate::types::time::Date;
use crate::types::{DateError, InterpolationError};
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `DateOutOfRange`: query date precedes the curve's valuation date
///   (discounting into the past is undefined)
/// - `EmptyCurve`: no pillars supplied at construction
/// - `UnsortedPillars`: pillar dates not strictly increasing
/// - `InvalidDiscountFactor`: non-positive discount factor pillar
/// - `ValuationDiscountFactorNotUnit`: a pillar on the valuation date whose
///   discount factor is not 1
/// - `Interpolation` / `Date`: wrapped lower-layer errors
///
/// # Examples
///
/// ```
/// use fxpricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidDiscountFactor { df: -0.5 };
/// assert_eq!(format!("{}", err), "Invalid discount factor: -0.5");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Query date precedes the curve's valuation date.
    #[error("Date {date} precedes the valuation date {valuation_date}")]
    DateOutOfRange {
        /// The query date
        date: Date,
        /// The curve's valuation date
        valuation_date: Date,
    },

    /// No pillars supplied.
    #[error("Discounting curve requires at least one pillar")]
    EmptyCurve,

    /// Pillar dates not strictly increasing.
    #[error("Curve pillar dates must be strictly increasing at {date}")]
    UnsortedPillars {
        /// The offending pillar date
        date: Date,
    },

    /// Non-positive discount factor.
    #[error("Invalid discount factor: {df}")]
    InvalidDiscountFactor {
        /// The invalid discount factor value
        df: f64,
    },

    /// The valuation-date pillar must carry discount factor 1.
    #[error("Discount factor at the valuation date must be 1, got {df}")]
    ValuationDiscountFactorNotUnit {
        /// The discount factor supplied at the valuation date
        df: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Date error.
    #[error("Date error: {0}")]
    Date(#[from] DateError),
}
