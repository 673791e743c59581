//! Top-level pricers.

pub mod error;
pub mod european_vanilla;

pub use error::FxPricerError;
pub use european_vanilla::{BlackScholesVanillaFxOptionPricer, FxOptionPricingResults};
