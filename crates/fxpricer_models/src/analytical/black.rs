//! Garman-Kohlhagen (Black) calculator for European vanilla FX options.
//!
//! The Garman-Kohlhagen formula extends Black-Scholes to an FX underlying
//! discounted on two curves:
//!
//! ```text
//! d+ = [ln(F/K) + sigma^2 tau / 2] / (sigma sqrt(tau)),  d- = d+ - sigma sqrt(tau)
//! Call = P_d(tau) * (F * Phi(d+) - K * Phi(d-))
//! ```
//!
//! with F the outright forward, P_d the domestic discount factor, and the
//! put obtained from the same expression through omega = -1. Spot-measure
//! identities use S = F * P_d / P_f.

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::fx::{DeltaConvention, FxOptionType};

/// Closed-form Black calculator on the forward.
///
/// Pre-computes d+/d- and holds the market snapshot it was built from; all
/// Greek methods are exact analytic partial derivatives of the price with
/// respect to spot and volatility.
///
/// # Type Parameters
///
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
///
/// ```
/// use fxpricer_models::analytical::BlackCalculator;
/// use fxpricer_models::instruments::fx::FxOptionType;
///
/// // F = S * df_f / df_d with S = 1.10, r_d = 2%, r_f = 1%, tau = 1
/// let df_d = (-0.02_f64).exp();
/// let df_f = (-0.01_f64).exp();
/// let forward = 1.10 * df_f / df_d;
///
/// let calc = BlackCalculator::new(forward, 1.10, 0.10, 1.0, df_d, df_f).unwrap();
/// let call = calc.price(FxOptionType::Call);
/// let put = calc.price(FxOptionType::Put);
///
/// // Put-call parity: C - P = S * df_f - K * df_d
/// let parity = 1.10 * df_f - 1.10 * df_d;
/// assert!((call - put - parity).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackCalculator<T: Float> {
    /// Outright forward F(0, tau)
    forward: T,
    /// Strike
    strike: T,
    /// Implied volatility
    volatility: T,
    /// Year fraction to expiry
    year_fraction: T,
    /// Domestic discount factor P_d(0, tau)
    df_domestic: T,
    /// Foreign discount factor P_f(0, tau)
    df_foreign: T,
    /// d+ term
    d_plus: T,
    /// d- term
    d_minus: T,
    /// sqrt(tau)
    sqrt_t: T,
}

impl<T: Float> BlackCalculator<T> {
    /// Creates a calculator from a market snapshot.
    ///
    /// # Arguments
    ///
    /// * `forward` - Outright forward (must be positive)
    /// * `strike` - Strike (must be positive)
    /// * `volatility` - Implied volatility (must be positive)
    /// * `year_fraction` - Time to expiry in years (must be positive)
    /// * `df_domestic` - Domestic discount factor (must be positive)
    /// * `df_foreign` - Foreign discount factor (must be positive)
    ///
    /// # Errors
    ///
    /// Returns the matching `AnalyticalError` variant for each degenerate
    /// input; the sigma -> 0 and tau -> 0 limits are undefined here, not
    /// silently zero-filled.
    pub fn new(
        forward: T,
        strike: T,
        volatility: T,
        year_fraction: T,
        df_domestic: T,
        df_foreign: T,
    ) -> Result<Self, AnalyticalError> {
        if volatility <= T::zero() {
            return Err(AnalyticalError::NonPositiveVolatility {
                volatility: volatility.to_f64().unwrap_or(0.0),
            });
        }
        if year_fraction <= T::zero() {
            return Err(AnalyticalError::NonPositiveTime {
                time: year_fraction.to_f64().unwrap_or(0.0),
            });
        }
        if forward <= T::zero() {
            return Err(AnalyticalError::InvalidForward {
                forward: forward.to_f64().unwrap_or(0.0),
            });
        }
        if strike <= T::zero() {
            return Err(AnalyticalError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(0.0),
            });
        }
        if df_domestic <= T::zero() {
            return Err(AnalyticalError::InvalidDiscountFactor {
                df: df_domestic.to_f64().unwrap_or(0.0),
            });
        }
        if df_foreign <= T::zero() {
            return Err(AnalyticalError::InvalidDiscountFactor {
                df: df_foreign.to_f64().unwrap_or(0.0),
            });
        }

        let two = T::from(2.0).unwrap();
        let sqrt_t = year_fraction.sqrt();
        let vol_sqrt_t = volatility * sqrt_t;

        let d_plus = ((forward / strike).ln() + volatility * volatility * year_fraction / two)
            / vol_sqrt_t;
        let d_minus = d_plus - vol_sqrt_t;

        Ok(Self {
            forward,
            strike,
            volatility,
            year_fraction,
            df_domestic,
            df_foreign,
            d_plus,
            d_minus,
            sqrt_t,
        })
    }

    /// Returns d+.
    #[inline]
    pub fn d_plus(&self) -> T {
        self.d_plus
    }

    /// Returns d-.
    #[inline]
    pub fn d_minus(&self) -> T {
        self.d_minus
    }

    /// Returns the outright forward.
    #[inline]
    pub fn forward(&self) -> T {
        self.forward
    }

    /// Returns the spot implied by the forward and the two discount
    /// factors: S = F * P_d / P_f.
    #[inline]
    pub fn spot(&self) -> T {
        self.forward * self.df_domestic / self.df_foreign
    }

    /// Domestic zero rate implied by the discount factor.
    #[inline]
    fn rate_domestic(&self) -> T {
        -self.df_domestic.ln() / self.year_fraction
    }

    /// Foreign zero rate implied by the discount factor.
    #[inline]
    fn rate_foreign(&self) -> T {
        -self.df_foreign.ln() / self.year_fraction
    }

    /// Option price in domestic currency per unit of foreign notional.
    ///
    /// omega folds the call and put branches:
    /// V = P_d * omega * (F * Phi(omega d+) - K * Phi(omega d-)).
    pub fn price(&self, option_type: FxOptionType) -> T {
        let omega = T::from(option_type.sign()).unwrap();
        let undiscounted = omega
            * (self.forward * norm_cdf(omega * self.d_plus)
                - self.strike * norm_cdf(omega * self.d_minus));
        self.df_domestic * undiscounted
    }

    /// First derivative of the price with respect to spot, under the
    /// requested delta convention.
    ///
    /// - `SpotDelta`: omega * P_f * Phi(omega d+)
    /// - `ForwardDelta`: omega * Phi(omega d+)
    /// - `PremiumAdjustedDelta`: spot delta minus the premium re-expressed
    ///   in foreign currency
    pub fn delta(&self, option_type: FxOptionType, convention: DeltaConvention) -> T {
        let omega = T::from(option_type.sign()).unwrap();
        let spot_delta = omega * self.df_foreign * norm_cdf(omega * self.d_plus);
        match convention {
            DeltaConvention::SpotDelta => spot_delta,
            DeltaConvention::ForwardDelta => omega * norm_cdf(omega * self.d_plus),
            DeltaConvention::PremiumAdjustedDelta => {
                spot_delta - self.price(option_type) / self.spot()
            }
        }
    }

    /// Second derivative of the price with respect to spot. Identical for
    /// calls and puts.
    ///
    /// Gamma = P_f * phi(d+) / (S * sigma * sqrt(tau)).
    pub fn gamma(&self) -> T {
        self.df_foreign * norm_pdf(self.d_plus)
            / (self.spot() * self.volatility * self.sqrt_t)
    }

    /// First derivative of the price with respect to volatility. Identical
    /// for calls and puts.
    ///
    /// Vega = S * P_f * phi(d+) * sqrt(tau).
    pub fn vega(&self) -> T {
        self.spot() * self.df_foreign * norm_pdf(self.d_plus) * self.sqrt_t
    }

    /// Cross derivative of the price with respect to spot and volatility.
    ///
    /// Vanna = -P_f * phi(d+) * d- / sigma.
    pub fn vanna(&self) -> T {
        -self.df_foreign * norm_pdf(self.d_plus) * self.d_minus / self.volatility
    }

    /// Second derivative of the price with respect to volatility.
    ///
    /// Volga = S * P_f * phi(d+) * sqrt(tau) * d+ * d- / sigma.
    pub fn volga(&self) -> T {
        self.vega() * self.d_plus * self.d_minus / self.volatility
    }

    /// Derivative of the price with respect to calendar time, per year.
    ///
    /// Theta = -S * P_f * phi(d+) * sigma / (2 sqrt(tau))
    ///       + omega * (r_f * S * P_f * Phi(omega d+) - r_d * K * P_d * Phi(omega d-)).
    pub fn theta(&self, option_type: FxOptionType) -> T {
        let omega = T::from(option_type.sign()).unwrap();
        let two = T::from(2.0).unwrap();
        let spot = self.spot();

        let decay = -spot * self.df_foreign * norm_pdf(self.d_plus) * self.volatility
            / (two * self.sqrt_t);
        let carry = omega
            * (self.rate_foreign() * spot * self.df_foreign * norm_cdf(omega * self.d_plus)
                - self.rate_domestic()
                    * self.strike
                    * self.df_domestic
                    * norm_cdf(omega * self.d_minus));
        decay + carry
    }
}
