//! Pricer-level error type.

use fxpricer_core::market_data::MarketDataError;
use fxpricer_core::types::DateError;
use thiserror::Error;

use crate::analytical::AnalyticalError;
use crate::instruments::fx::FxOptionError;
use crate::smile::SmileError;

/// Top-level pricing errors.
///
/// Wraps the layer-specific errors so that a pricing call surfaces one
/// error type to the orchestrating caller. All failures are synchronous
/// and reflect caller programming errors or bad market data; there is no
/// retry or recovery inside the core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxPricerError {
    /// Date arithmetic error.
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Discounting curve error.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Analytical pricing error.
    #[error("Analytical error: {0}")]
    Analytical(#[from] AnalyticalError),

    /// Smile construction or lookup error.
    #[error("Smile error: {0}")]
    Smile(#[from] SmileError),

    /// Instrument definition error.
    #[error("Instrument error: {0}")]
    Instrument(#[from] FxOptionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_analytical_error() {
        let err: FxPricerError =
            AnalyticalError::NonPositiveVolatility { volatility: -0.1 }.into();
        assert!(matches!(err, FxPricerError::Analytical(_)));
        assert!(format!("{}", err).contains("-0.1"));
    }

    #[test]
    fn test_wraps_market_data_error() {
        let err: FxPricerError = MarketDataError::EmptyCurve.into();
        assert!(matches!(err, FxPricerError::MarketData(_)));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err: FxPricerError = MarketDataError::EmptyCurve.into();
        let _: &dyn std::error::Error = &err;
    }
}
