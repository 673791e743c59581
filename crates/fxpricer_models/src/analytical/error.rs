//! Error types for analytical pricing operations.

use thiserror::Error;

/// Analytical pricing errors.
///
/// Degenerate limits are rejected, not silently zero-filled: a
/// non-positive volatility or year fraction leaves the Black formula
/// undefined, so construction fails at the point of detection.
///
/// # Examples
/// ```
/// use fxpricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::NonPositiveVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("-0.2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticalError {
    /// Non-positive volatility.
    #[error("Non-positive volatility: sigma = {volatility}")]
    NonPositiveVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Non-positive time to expiry.
    #[error("Non-positive time to expiry: tau = {time}")]
    NonPositiveTime {
        /// The invalid year fraction
        time: f64,
    },

    /// Non-positive forward.
    #[error("Invalid forward: F = {forward}")]
    InvalidForward {
        /// The invalid forward value
        forward: f64,
    },

    /// Non-positive strike.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Non-positive discount factor.
    #[error("Invalid discount factor: {df}")]
    InvalidDiscountFactor {
        /// The invalid discount factor
        df: f64,
    },

    /// Implied volatility inversion failed to converge.
    #[error("Implied volatility did not converge after {iterations} iterations")]
    ImpliedVolNotConverged {
        /// Iterations performed before giving up
        iterations: usize,
    },
}
