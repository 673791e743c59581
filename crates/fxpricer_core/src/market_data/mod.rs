//! Market data structures for the pricing layer.
//!
//! This module provides the date-keyed discounting curve and its error
//! types. Curves are immutable after construction and safe to share
//! read-only across threads.
//!
//! # Example
//!
//! ```
//! use fxpricer_core::market_data::curves::{CurveInterpolation, DiscountingCurve};
//! use fxpricer_core::types::time::{Date, DayCountBasis};
//!
//! let valuation = Date::from_ymd(2024, 1, 1).unwrap();
//! let curve = DiscountingCurve::new(
//!     valuation,
//!     &[(Date::from_ymd(2025, 1, 1).unwrap(), 0.97)],
//!     DayCountBasis::ActualActual,
//!     CurveInterpolation::LogLinearDiscountFactor,
//! )
//! .unwrap();
//!
//! let df = curve.discount_factor(Date::from_ymd(2025, 1, 1).unwrap()).unwrap();
//! assert!((df - 0.97).abs() < 1e-12);
//! ```

pub mod curves;
pub mod error;

pub use curves::{CurveInterpolation, DiscountingCurve};
pub use error::MarketDataError;
