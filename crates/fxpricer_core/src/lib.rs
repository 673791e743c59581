//! # fxpricer_core: Foundation Layer for FX Option Pricing
//!
//! This crate is the bottom layer of the fxpricer workspace. It owns the
//! building blocks that every pricing component consumes:
//!
//! - Type-safe dates and day count conventions (`types::time`)
//! - Currencies and currency pairs (`types::currency`, `types::currency_pair`)
//! - One-dimensional interpolation (`math::interpolators`)
//! - Date-keyed discounting curves (`market_data::curves`)
//!
//! Everything here is immutable after construction and free of I/O, so
//! curves and interpolators can be shared read-only across threads without
//! coordination.
//!
//! ## Example
//!
//! ```
//! use fxpricer_core::market_data::curves::{CurveInterpolation, DiscountingCurve};
//! use fxpricer_core::types::time::{Date, DayCountBasis};
//!
//! let valuation = Date::from_ymd(2024, 1, 1).unwrap();
//! let pillar = Date::from_ymd(2025, 1, 1).unwrap();
//!
//! let curve = DiscountingCurve::new(
//!     valuation,
//!     &[(pillar, 0.97)],
//!     DayCountBasis::Actual365,
//!     CurveInterpolation::LogLinearDiscountFactor,
//! )
//! .unwrap();
//!
//! // The discount factor at the valuation date is exactly 1.
//! assert_eq!(curve.discount_factor(valuation).unwrap(), 1.0);
//! ```

pub mod market_data;
pub mod math;
pub mod types;
