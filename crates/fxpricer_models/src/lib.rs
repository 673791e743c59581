//! # fxpricer_models: FX Option Instruments, Smile and Pricing
//!
//! The model layer of the fxpricer workspace, built on top of
//! `fxpricer_core`. It provides:
//!
//! - FX option and market quote value objects (`instruments::fx`)
//! - Normal distribution kernels and the Garman-Kohlhagen calculator with
//!   analytic Greeks (`analytical`)
//! - The Vanna-Volga smile construction (`smile`)
//! - The quote-driven FX volatility surface (`market`)
//! - The top-level European vanilla FX option pricer (`pricing`)
//!
//! All components are immutable after construction; pricing calls are pure
//! closed-form computations that either return a value or fail fast with a
//! structured error.
//!
//! ## Example
//!
//! ```
//! use fxpricer_core::market_data::curves::{CurveInterpolation, DiscountingCurve};
//! use fxpricer_core::types::time::{Date, DayCountBasis};
//! use fxpricer_core::types::{Currency, CurrencyPair};
//! use fxpricer_models::instruments::fx::{Direction, EuropeanVanillaFxOption, FxOptionType};
//! use fxpricer_models::pricing::BlackScholesVanillaFxOptionPricer;
//!
//! let valuation = Date::from_ymd(2023, 1, 1).unwrap();
//! let expiry = Date::from_ymd(2024, 1, 1).unwrap();
//! let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
//!
//! let domestic = DiscountingCurve::new(
//!     valuation,
//!     &[(expiry, (-0.02_f64).exp())],
//!     DayCountBasis::Actual365,
//!     CurveInterpolation::LogLinearDiscountFactor,
//! )
//! .unwrap();
//! let foreign = DiscountingCurve::new(
//!     valuation,
//!     &[(expiry, (-0.01_f64).exp())],
//!     DayCountBasis::Actual365,
//!     CurveInterpolation::LogLinearDiscountFactor,
//! )
//! .unwrap();
//!
//! let option = EuropeanVanillaFxOption::new(
//!     pair,
//!     1.10,
//!     expiry,
//!     FxOptionType::Call,
//!     1_000_000.0,
//!     Direction::Buy,
//! )
//! .unwrap();
//!
//! let pricer = BlackScholesVanillaFxOptionPricer::new(valuation, 1.10, domestic, foreign);
//! let results = pricer.price_with_volatility(&option, 0.10).unwrap();
//! assert!(results.price > 0.0);
//! ```

pub mod analytical;
pub mod instruments;
pub mod market;
pub mod pricing;
pub mod smile;
