//! Foreign exchange instruments and market quotes.
//!
//! This module provides:
//! - [`EuropeanVanillaFxOption`]: the vanilla call/put contract
//! - [`EuropeanVanillaFxOptionQuote`]: a market quote for a smile pillar
//! - The convention enums the FX options market quotes in:
//!   [`FxOptionType`], [`Direction`], [`DeltaConvention`],
//!   [`FxQuoteConvention`], [`FxMarketQuoteType`], [`QuoteStyle`]

mod option;
mod quote;

pub use option::{Direction, EuropeanVanillaFxOption, FxOptionError, FxOptionType};
pub use quote::{
    DeltaConvention, EuropeanVanillaFxOptionQuote, FxMarketQuoteType, FxQuoteConvention,
    QuoteStyle,
};
