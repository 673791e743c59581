//! Analytical pricing kernels for European FX options.
//!
//! This module provides:
//! - Standard normal distribution functions (`distributions`)
//! - The Garman-Kohlhagen / Black calculator with analytic Greeks (`black`)
//! - Newton implied-volatility inversion (`implied`)
//!
//! The calculator is generic over `T: num_traits::Float`; all sensitivities
//! are exact closed-form partial derivatives, never finite differences.

pub mod black;
pub mod distributions;
pub mod error;
pub mod implied;

pub use black::BlackCalculator;
pub use distributions::{norm_cdf, norm_inv_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use implied::implied_volatility;
