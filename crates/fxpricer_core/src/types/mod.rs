//! Core date, currency and error types.
//!
//! This module provides:
//! - `time`: `Date`, `DayCountBasis` and `Tenor` for financial date arithmetic
//! - `currency`: ISO currency codes for the major FX pairs
//! - `currency_pair`: the BASE/QUOTE pair identifier
//! - `error`: structured error types for dates, currencies and interpolation

pub mod currency;
pub mod currency_pair;
pub mod error;
pub mod time;

pub use currency::Currency;
pub use currency_pair::CurrencyPair;
pub use error::{CurrencyError, DateError, InterpolationError};
pub use time::{Date, DayCountBasis, Tenor};
