//! Implied volatility inversion for premium-style quotes.

use super::black::BlackCalculator;
use super::distributions::norm_pdf;
use super::error::AnalyticalError;
use crate::instruments::fx::FxOptionType;

/// Iteration cap for the Newton solver.
const MAX_ITERATIONS: usize = 100;

/// Absolute premium tolerance at convergence.
const PRICE_TOLERANCE: f64 = 1e-12;

/// Volatility bounds keeping the Newton iterates in the Black domain.
const MIN_VOL: f64 = 1e-6;
const MAX_VOL: f64 = 10.0;

/// Solves the Black price for the implied volatility.
///
/// Newton-Raphson on the premium with the analytic vega, seeded with the
/// Brenner-Subrahmanyam at-the-money approximation
/// sigma_0 = premium / (P_d * F) * sqrt(2 pi / tau). Used when a smile
/// pillar arrives as a premium; the Vanna-Volga evaluation itself never
/// iterates.
///
/// # Arguments
///
/// * `premium` - Option premium in domestic currency per unit of foreign
///   notional (must be positive and above intrinsic value)
/// * `forward` - Outright forward
/// * `strike` - Strike
/// * `year_fraction` - Time to expiry in years
/// * `df_domestic` / `df_foreign` - Discount factors to expiry
/// * `option_type` - Call or put
///
/// # Errors
///
/// `AnalyticalError::ImpliedVolNotConverged` when the premium cannot be
/// matched within the iteration cap, which includes premia outside the
/// no-arbitrage band where vega collapses.
///
/// # Examples
///
/// ```
/// use fxpricer_models::analytical::{implied_volatility, BlackCalculator};
/// use fxpricer_models::instruments::fx::FxOptionType;
///
/// let calc = BlackCalculator::new(1.11, 1.10, 0.1234, 1.0, 0.98, 0.99).unwrap();
/// let premium = calc.price(FxOptionType::Call);
///
/// let vol = implied_volatility(premium, 1.11, 1.10, 1.0, 0.98, 0.99, FxOptionType::Call)
///     .unwrap();
/// assert!((vol - 0.1234).abs() < 1e-10);
/// ```
pub fn implied_volatility(
    premium: f64,
    forward: f64,
    strike: f64,
    year_fraction: f64,
    df_domestic: f64,
    df_foreign: f64,
    option_type: FxOptionType,
) -> Result<f64, AnalyticalError> {
    if premium <= 0.0 || !premium.is_finite() {
        return Err(AnalyticalError::ImpliedVolNotConverged { iterations: 0 });
    }

    // Brenner-Subrahmanyam ATM seed, clamped into the admissible band.
    let seed = premium / (df_domestic * forward) * (2.0 * std::f64::consts::PI / year_fraction).sqrt();
    let mut vol = seed.clamp(0.05, 1.0);

    for iteration in 0..MAX_ITERATIONS {
        let calc = BlackCalculator::new(
            forward,
            strike,
            vol,
            year_fraction,
            df_domestic,
            df_foreign,
        )?;
        let diff = calc.price(option_type) - premium;
        if diff.abs() < PRICE_TOLERANCE {
            return Ok(vol);
        }

        // Forward vega: dV/dsigma = P_d * F * phi(d+) * sqrt(tau).
        let vega = df_domestic * forward * norm_pdf(calc.d_plus()) * year_fraction.sqrt();
        if vega < 1e-12 {
            return Err(AnalyticalError::ImpliedVolNotConverged {
                iterations: iteration,
            });
        }

        vol = (vol - diff / vega).clamp(MIN_VOL, MAX_VOL);
    }

    Err(AnalyticalError::ImpliedVolNotConverged {
        iterations: MAX_ITERATIONS,
    })
}
