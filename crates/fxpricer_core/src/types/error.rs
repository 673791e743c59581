//! Error types for the foundation layer.
//!
//! This module provides:
//! - `DateError`: date construction, parsing and ordering failures
//! - `CurrencyError`: currency and currency pair parsing failures
//! - `InterpolationError`: grid construction and lookup failures

use thiserror::Error;

use super::time::Date;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: invalid calendar components (e.g. February 30th)
/// - `InvalidDateRange`: an interval whose end precedes its start, where the
///   operation is only defined for ordered dates
/// - `ParseError`: failed to parse a date or tenor string
/// - `Overflow`: date arithmetic left the supported calendar range
///
/// # Examples
/// ```
/// use fxpricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2023, month: 2, day: 29 };
/// assert_eq!(format!("{}", err), "Invalid date: 2023-2-29");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g. February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// End date precedes start date for an order-sensitive operation.
    #[error("Invalid date range: end {end} precedes start {start}")]
    InvalidDateRange {
        /// Start of the interval
        start: Date,
        /// End of the interval
        end: Date,
    },

    /// Failed to parse a date or tenor string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Date arithmetic left the supported calendar range.
    #[error("Date arithmetic overflow applying tenor {tenor}")]
    Overflow {
        /// The tenor whose application overflowed
        tenor: String,
    },
}

/// Currency-related errors.
///
/// # Examples
/// ```
/// use fxpricer_core::types::CurrencyError;
///
/// let err = CurrencyError::UnknownCurrency("XYZ".to_string());
/// assert_eq!(format!("{}", err), "Unknown currency: XYZ");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Base and quote currencies of a pair are the same.
    #[error("Base and quote currencies are the same: {0}")]
    SameCurrency(String),

    /// Failed to parse a currency or pair string.
    #[error("Currency parse error: {0}")]
    ParseError(String),
}

/// Interpolation-related errors.
///
/// Degenerate grids cover both insufficient and colliding inputs: a grid
/// with fewer than two knots cannot define a segment, and two knots sharing
/// an x-coordinate make the segment slope undefined.
///
/// # Examples
/// ```
/// use fxpricer_core::types::InterpolationError;
///
/// let err = InterpolationError::DegenerateGrid { got: 1, need: 2 };
/// assert!(format!("{}", err).contains("need at least 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Fewer grid points than the method requires.
    #[error("Degenerate grid: got {got} points, need at least {need}")]
    DegenerateGrid {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Two grid points share an x-coordinate.
    #[error("Degenerate grid: duplicate x-coordinate {x}")]
    DuplicateKnot {
        /// The colliding x-coordinate
        x: f64,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
