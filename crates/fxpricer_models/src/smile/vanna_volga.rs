//! Vanna-Volga smile construction.
//!
//! The Vanna-Volga method extrapolates a full volatility smile from the
//! three liquid pillar quotes per expiry: the at-the-money straddle, the
//! 25-delta risk reversal and the 25-delta butterfly. The pillar vols are
//!
//! ```text
//! sigma_25C = sigma_ATM + BF + RR / 2
//! sigma_25P = sigma_ATM + BF - RR / 2
//! ```
//!
//! and their strikes K_25P < K_ATM < K_25C are recovered from the 25-delta
//! spot-delta convention. The first-order approximation then weighs the
//! pillar vols by log-moneyness ratios; the weights sum to one, so the
//! smile reproduces each pillar exactly at its strike.

use std::collections::BTreeMap;

use fxpricer_core::market_data::curves::DiscountingCurve;
use fxpricer_core::market_data::MarketDataError;
use fxpricer_core::types::time::{Date, DayCountBasis};

use super::error::SmileError;
use crate::analytical::{implied_volatility, norm_inv_cdf};
use crate::instruments::fx::{
    EuropeanVanillaFxOptionQuote, FxMarketQuoteType, FxOptionType, FxQuoteConvention, QuoteStyle,
};

/// Year fraction convention for smile time axes, per FX market practice.
const SMILE_BASIS: DayCountBasis = DayCountBasis::Actual365;

/// Vanna-Volga smile model calibrated to ATM / risk-reversal / butterfly
/// quotes.
///
/// Immutable after construction: the quote buckets, spot and curve handles
/// are fixed, and every evaluation is a deterministic closed-form
/// computation with no iterative root-finding.
///
/// # Examples
///
/// ```
/// use fxpricer_core::market_data::curves::{CurveInterpolation, DiscountingCurve};
/// use fxpricer_core::types::time::{Date, DayCountBasis};
/// use fxpricer_core::types::{Currency, CurrencyPair};
/// use fxpricer_models::instruments::fx::{EuropeanVanillaFxOptionQuote, FxMarketQuoteType};
/// use fxpricer_models::smile::VannaVolga;
///
/// let valuation = Date::from_ymd(2024, 1, 1).unwrap();
/// let expiry = Date::from_ymd(2025, 1, 1).unwrap();
/// let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
///
/// let curve = |rate: f64| {
///     DiscountingCurve::new(
///         valuation,
///         &[(expiry, (-rate * 366.0 / 365.0_f64).exp())],
///         DayCountBasis::Actual365,
///         CurveInterpolation::LogLinearDiscountFactor,
///     )
///     .unwrap()
/// };
///
/// let quotes = [
///     EuropeanVanillaFxOptionQuote::vol_quote(
///         pair, valuation, expiry, FxMarketQuoteType::AtmStraddle, 0.10,
///     ),
///     EuropeanVanillaFxOptionQuote::vol_quote(
///         pair, valuation, expiry, FxMarketQuoteType::RiskReversal25Delta, -0.01,
///     ),
///     EuropeanVanillaFxOptionQuote::vol_quote(
///         pair, valuation, expiry, FxMarketQuoteType::Butterfly25Delta, 0.005,
///     ),
/// ];
///
/// let smile = VannaVolga::new(&quotes, 1.10, curve(0.02), curve(0.01)).unwrap();
///
/// // At the ATM strike the smile returns the ATM vol exactly.
/// let k_atm = smile.k_atm(expiry).unwrap();
/// let vol = smile.first_order_volatility(k_atm, expiry).unwrap();
/// assert!((vol - 0.10).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct VannaVolga {
    /// Observation date of the calibrating quotes
    valuation_date: Date,
    /// Spot rate, domestic per unit of foreign
    spot: f64,
    /// Discounting curve of the quote (domestic) currency
    domestic_curve: DiscountingCurve,
    /// Discounting curve of the base (foreign) currency
    foreign_curve: DiscountingCurve,
    /// ATM straddle vols per expiry
    atm: BTreeMap<Date, f64>,
    /// 25-delta risk reversal quotes per expiry
    risk_reversal: BTreeMap<Date, f64>,
    /// 25-delta butterfly quotes per expiry
    butterfly: BTreeMap<Date, f64>,
}

impl VannaVolga {
    /// Calibrates the model from a list of pillar quotes.
    ///
    /// Quotes are bucketed by expiry into the three pillar types; every
    /// expiry must carry all three. Premium-style quotes are inverted to
    /// volatility on ingestion, so the internal representation is always
    /// plain volatility.
    ///
    /// # Errors
    ///
    /// * `SmileError::NoQuotes` - empty quote list
    /// * `SmileError::MixedAsOfDates` - inconsistent observation dates
    /// * `SmileError::InvalidSpot` - non-positive spot
    /// * `SmileError::MissingPillar` - an expiry lacking ATM, RR or BF
    /// * `SmileError::PremiumQuoteWithoutStrike` - premium quote without a
    ///   strike to invert at
    pub fn new(
        quotes: &[EuropeanVanillaFxOptionQuote],
        spot: f64,
        domestic_curve: DiscountingCurve,
        foreign_curve: DiscountingCurve,
    ) -> Result<Self, SmileError> {
        let first = quotes.first().ok_or(SmileError::NoQuotes)?;
        let valuation_date = first.as_of_date;

        if !spot.is_finite() || spot <= 0.0 {
            return Err(SmileError::InvalidSpot { spot });
        }

        let mut model = Self {
            valuation_date,
            spot,
            domestic_curve,
            foreign_curve,
            atm: BTreeMap::new(),
            risk_reversal: BTreeMap::new(),
            butterfly: BTreeMap::new(),
        };

        for quote in quotes {
            if quote.as_of_date != valuation_date {
                return Err(SmileError::MixedAsOfDates {
                    expected: valuation_date,
                    got: quote.as_of_date,
                });
            }
            let vol = model.normalized_vol(quote)?;
            let bucket = match quote.quote_type {
                FxMarketQuoteType::AtmStraddle => &mut model.atm,
                FxMarketQuoteType::RiskReversal25Delta => &mut model.risk_reversal,
                FxMarketQuoteType::Butterfly25Delta => &mut model.butterfly,
            };
            bucket.insert(quote.expiry_date, vol);
        }

        model.check_quote_integrity()?;
        Ok(model)
    }

    /// Every expiry must carry all three pillar quotes.
    fn check_quote_integrity(&self) -> Result<(), SmileError> {
        let mut expiries: Vec<Date> = self.atm.keys().copied().collect();
        expiries.extend(self.risk_reversal.keys().copied());
        expiries.extend(self.butterfly.keys().copied());
        expiries.sort();
        expiries.dedup();

        for expiry in expiries {
            for (bucket, quote_type) in [
                (&self.atm, FxMarketQuoteType::AtmStraddle),
                (&self.risk_reversal, FxMarketQuoteType::RiskReversal25Delta),
                (&self.butterfly, FxMarketQuoteType::Butterfly25Delta),
            ] {
                if !bucket.contains_key(&expiry) {
                    return Err(SmileError::MissingPillar { expiry, quote_type });
                }
            }
        }
        Ok(())
    }

    /// Reduces a quote to plain volatility.
    ///
    /// Volatility and delta-volatility quotes pass through; premium quotes
    /// are treated as call premia at their quoted strike and inverted.
    fn normalized_vol(&self, quote: &EuropeanVanillaFxOptionQuote) -> Result<f64, SmileError> {
        match quote.style {
            QuoteStyle::Volatility | QuoteStyle::DeltaVolatility(_) => Ok(quote.value),
            QuoteStyle::Premium(convention) => {
                let strike = quote.strike.ok_or(SmileError::PremiumQuoteWithoutStrike {
                    expiry: quote.expiry_date,
                })?;
                let tau = self.tau(quote.expiry_date)?;
                let df_domestic = self.domestic_curve.discount_factor(quote.expiry_date)?;
                let df_foreign = self.foreign_curve.discount_factor(quote.expiry_date)?;
                let forward = self.spot * df_foreign / df_domestic;

                let premium = match convention {
                    FxQuoteConvention::DomesticPerUnitOfForeign => quote.value,
                    FxQuoteConvention::PercentageDomestic => quote.value * self.spot / 100.0,
                    FxQuoteConvention::PercentageForeign => quote.value * strike / 100.0,
                };

                Ok(implied_volatility(
                    premium,
                    forward,
                    strike,
                    tau,
                    df_domestic,
                    df_foreign,
                    FxOptionType::Call,
                )?)
            }
        }
    }

    /// Returns the observation date of the calibrating quotes.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the spot rate.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the calibrated expiries in ascending order.
    pub fn expiries(&self) -> Vec<Date> {
        self.atm.keys().copied().collect()
    }

    /// Year fraction from the valuation date under the smile convention.
    fn tau(&self, expiry: Date) -> Result<f64, SmileError> {
        Ok(SMILE_BASIS
            .year_fraction(self.valuation_date, expiry)
            .map_err(MarketDataError::from)?)
    }

    fn pillar(&self, bucket: &BTreeMap<Date, f64>, expiry: Date) -> Result<f64, SmileError> {
        bucket
            .get(&expiry)
            .copied()
            .ok_or(SmileError::UnknownExpiry { expiry })
    }

    /// The ATM straddle vol quote.
    pub fn sigma_atm(&self, expiry: Date) -> Result<f64, SmileError> {
        self.pillar(&self.atm, expiry)
    }

    /// The 25-delta risk reversal quote.
    pub fn sigma_25d_rr(&self, expiry: Date) -> Result<f64, SmileError> {
        self.pillar(&self.risk_reversal, expiry)
    }

    /// The 25-delta butterfly quote.
    pub fn sigma_25d_fly(&self, expiry: Date) -> Result<f64, SmileError> {
        self.pillar(&self.butterfly, expiry)
    }

    /// The 25-delta call volatility implied by the pillar quotes.
    pub fn sigma_25d_call(&self, expiry: Date) -> Result<f64, SmileError> {
        Ok(self.sigma_atm(expiry)? + self.sigma_25d_fly(expiry)?
            + 0.50 * self.sigma_25d_rr(expiry)?)
    }

    /// The 25-delta put volatility implied by the pillar quotes.
    pub fn sigma_25d_put(&self, expiry: Date) -> Result<f64, SmileError> {
        Ok(self.sigma_atm(expiry)? + self.sigma_25d_fly(expiry)?
            - 0.50 * self.sigma_25d_rr(expiry)?)
    }

    /// The forward F(t1, t2) = spot * P_f(t1, t2) / P_d(t1, t2).
    pub fn forward(&self, t1: Date, t2: Date) -> Result<f64, SmileError> {
        let foreign_df = self.foreign_curve.forward_discount_factor(t1, t2)?;
        let domestic_df = self.domestic_curve.forward_discount_factor(t1, t2)?;
        Ok(self.spot * foreign_df / domestic_df)
    }

    /// The strike-recovery coefficient alpha = -Phi^-1(0.25 / P_d(0, T)).
    pub fn alpha(&self, expiry: Date) -> Result<f64, SmileError> {
        let compound_factor = 1.0 / self.domestic_curve.discount_factor(expiry)?;
        Ok(-norm_inv_cdf(0.25 * compound_factor))
    }

    /// The ATM (delta-neutral straddle) strike
    /// K_ATM = F * exp(sigma_ATM^2 tau / 2).
    pub fn k_atm(&self, expiry: Date) -> Result<f64, SmileError> {
        let fwd = self.forward(self.valuation_date, expiry)?;
        let tau = self.tau(expiry)?;
        let sigma = self.sigma_atm(expiry)?;
        Ok(fwd * (sigma * sigma / 2.0 * tau).exp())
    }

    /// The 25-delta call strike, above the forward.
    pub fn k_25d_call(&self, expiry: Date) -> Result<f64, SmileError> {
        let fwd = self.forward(self.valuation_date, expiry)?;
        let tau = self.tau(expiry)?;
        let sigma = self.sigma_25d_call(expiry)?;
        let alpha = self.alpha(expiry)?;
        Ok(fwd * (alpha * sigma * tau.sqrt() + 0.50 * sigma * sigma * tau).exp())
    }

    /// The 25-delta put strike, below the forward.
    pub fn k_25d_put(&self, expiry: Date) -> Result<f64, SmileError> {
        let fwd = self.forward(self.valuation_date, expiry)?;
        let tau = self.tau(expiry)?;
        let sigma = self.sigma_25d_put(expiry)?;
        let alpha = self.alpha(expiry)?;
        Ok(fwd * (-alpha * sigma * tau.sqrt() + 0.50 * sigma * sigma * tau).exp())
    }

    /// The log-moneyness weights of the first-order approximation.
    ///
    /// For K1 < K2 < K3 the weights satisfy w1 + w2 + w3 = 1, and at a
    /// pillar strike the matching weight is 1 with the others 0.
    fn weights(k1: f64, k2: f64, k3: f64, k: f64) -> Result<(f64, f64, f64), SmileError> {
        if !k.is_finite() || k <= 0.0 {
            return Err(SmileError::InvalidStrike { strike: k });
        }

        let ln_21 = (k2 / k1).ln();
        let ln_31 = (k3 / k1).ln();
        let ln_32 = (k3 / k2).ln();
        for (ln_ij, lower, upper) in [(ln_21, k1, k2), (ln_31, k1, k3), (ln_32, k2, k3)] {
            if ln_ij == 0.0 || !ln_ij.is_finite() {
                return Err(SmileError::DegenerateSmile {
                    k_lower: lower,
                    k_upper: upper,
                });
            }
        }

        let w1 = ((k2 / k).ln() * (k3 / k).ln()) / (ln_21 * ln_31);
        let w2 = ((k / k1).ln() * (k3 / k).ln()) / (ln_21 * ln_32);
        let w3 = ((k / k1).ln() * (k / k2).ln()) / (ln_31 * ln_32);
        Ok((w1, w2, w3))
    }

    /// First-order Vanna-Volga smile volatility at the target strike.
    ///
    /// sigma(K) = w1 sigma_25P + w2 sigma_ATM + w3 sigma_25C, equivalently
    /// sigma_ATM plus the weighted pillar deviations, since the weights sum
    /// to one. Exact at each pillar strike.
    ///
    /// # Errors
    ///
    /// * `SmileError::UnknownExpiry` - expiry not calibrated
    /// * `SmileError::InvalidStrike` - non-positive strike
    /// * `SmileError::DegenerateSmile` - colliding pillar strikes
    pub fn first_order_volatility(&self, strike: f64, expiry: Date) -> Result<f64, SmileError> {
        let sigma_1 = self.sigma_25d_put(expiry)?;
        let sigma_2 = self.sigma_atm(expiry)?;
        let sigma_3 = self.sigma_25d_call(expiry)?;

        let k1 = self.k_25d_put(expiry)?;
        let k2 = self.k_atm(expiry)?;
        let k3 = self.k_25d_call(expiry)?;

        if !(k1.is_finite() && k3.is_finite()) || k1 >= k2 || k2 >= k3 {
            return Err(SmileError::DegenerateSmile {
                k_lower: k1,
                k_upper: k3,
            });
        }

        let (w1, w2, w3) = Self::weights(k1, k2, k3, strike)?;
        Ok(w1 * sigma_1 + w2 * sigma_2 + w3 * sigma_3)
    }

    /// Second-order Vanna-Volga smile volatility at the target strike.
    ///
    /// Castagna-Mercurio refinement of the first-order value:
    ///
    /// ```text
    /// D1(K) = xi1(K) - sigma_ATM
    /// D2(K) = d+(K1) d-(K1) w1-ratio (sigma_25P - sigma_ATM)^2
    ///       + d+(K3) d-(K3) w3-ratio (sigma_25C - sigma_ATM)^2
    /// sigma(K) = sigma_ATM
    ///          + (-sigma_ATM + sqrt(sigma_ATM^2 + d+ d- (2 sigma_ATM D1 + D2))) / (d+ d-)
    /// ```
    ///
    /// The K -> K_ATM limit (d+ d- -> 0) is evaluated through the series
    /// expansion sigma_ATM + D1 + D2 / (2 sigma_ATM).
    pub fn second_order_volatility(&self, strike: f64, expiry: Date) -> Result<f64, SmileError> {
        let sigma_1 = self.sigma_25d_put(expiry)?;
        let sigma_2 = self.sigma_atm(expiry)?;
        let sigma_3 = self.sigma_25d_call(expiry)?;

        let k1 = self.k_25d_put(expiry)?;
        let k2 = self.k_atm(expiry)?;
        let k3 = self.k_25d_call(expiry)?;

        let tau = self.tau(expiry)?;
        let fwd = self.forward(self.valuation_date, expiry)?;

        let xi1 = self.first_order_volatility(strike, expiry)?;
        let d1_k = xi1 - sigma_2;

        let d2_k = Self::d_plus(fwd, k1, sigma_2, tau)
            * Self::d_minus(fwd, k1, sigma_2, tau)
            * ((k3 / strike).ln() * (k2 / strike).ln())
            / ((k3 / k1).ln() * (k2 / k1).ln())
            * (sigma_1 - sigma_2).powi(2)
            + Self::d_plus(fwd, k3, sigma_2, tau)
                * Self::d_minus(fwd, k3, sigma_2, tau)
                * ((strike / k1).ln() * (strike / k2).ln())
                / ((k3 / k1).ln() * (k3 / k2).ln())
                * (sigma_3 - sigma_2).powi(2);

        let d_plus_minus = Self::d_plus(fwd, strike, sigma_2, tau)
            * Self::d_minus(fwd, strike, sigma_2, tau);

        if d_plus_minus.abs() < 1e-12 {
            return Ok(sigma_2 + d1_k + d2_k / (2.0 * sigma_2));
        }

        let discriminant =
            sigma_2 * sigma_2 + d_plus_minus * (2.0 * sigma_2 * d1_k + d2_k);
        if discriminant < 0.0 {
            return Err(SmileError::DegenerateSmile {
                k_lower: k1,
                k_upper: k3,
            });
        }

        Ok(sigma_2 + (-sigma_2 + discriminant.sqrt()) / d_plus_minus)
    }

    /// d+ in the Black model on the forward.
    fn d_plus(fwd: f64, k: f64, sigma: f64, tau: f64) -> f64 {
        ((fwd / k).ln() + tau * sigma * sigma / 2.0) / (sigma * tau.sqrt())
    }

    /// d- in the Black model on the forward.
    fn d_minus(fwd: f64, k: f64, sigma: f64, tau: f64) -> f64 {
        ((fwd / k).ln() - tau * sigma * sigma / 2.0) / (sigma * tau.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fxpricer_core::market_data::curves::CurveInterpolation;
    use fxpricer_core::types::{Currency, CurrencyPair};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn eurusd() -> CurrencyPair {
        CurrencyPair::new(Currency::EUR, Currency::USD).unwrap()
    }

    fn flat_curve(valuation: Date, expiry: Date, rate: f64) -> DiscountingCurve {
        let tau = DayCountBasis::Actual365
            .year_fraction(valuation, expiry)
            .unwrap();
        DiscountingCurve::new(
            valuation,
            &[(expiry, (-rate * tau).exp())],
            DayCountBasis::Actual365,
            CurveInterpolation::LogLinearDiscountFactor,
        )
        .unwrap()
    }

    fn vol_quote(expiry: Date, quote_type: FxMarketQuoteType, value: f64) -> EuropeanVanillaFxOptionQuote {
        EuropeanVanillaFxOptionQuote::vol_quote(eurusd(), d(2024, 1, 1), expiry, quote_type, value)
    }

    /// ATM 10%, RR -1%, BF 0.5% for a single 1y expiry.
    fn calibrated_smile() -> (VannaVolga, Date) {
        let valuation = d(2024, 1, 1);
        let expiry = d(2025, 1, 1);
        let quotes = [
            vol_quote(expiry, FxMarketQuoteType::AtmStraddle, 0.10),
            vol_quote(expiry, FxMarketQuoteType::RiskReversal25Delta, -0.01),
            vol_quote(expiry, FxMarketQuoteType::Butterfly25Delta, 0.005),
        ];
        let smile = VannaVolga::new(
            &quotes,
            1.10,
            flat_curve(valuation, expiry, 0.02),
            flat_curve(valuation, expiry, 0.01),
        )
        .unwrap();
        (smile, expiry)
    }

    // ========================================
    // Construction
    // ========================================

    #[test]
    fn test_new_no_quotes() {
        let valuation = d(2024, 1, 1);
        let expiry = d(2025, 1, 1);
        let result = VannaVolga::new(
            &[],
            1.10,
            flat_curve(valuation, expiry, 0.02),
            flat_curve(valuation, expiry, 0.01),
        );
        assert!(matches!(result, Err(SmileError::NoQuotes)));
    }

    #[test]
    fn test_new_missing_pillar() {
        let valuation = d(2024, 1, 1);
        let expiry = d(2025, 1, 1);
        let quotes = [
            vol_quote(expiry, FxMarketQuoteType::AtmStraddle, 0.10),
            vol_quote(expiry, FxMarketQuoteType::RiskReversal25Delta, -0.01),
        ];
        let result = VannaVolga::new(
            &quotes,
            1.10,
            flat_curve(valuation, expiry, 0.02),
            flat_curve(valuation, expiry, 0.01),
        );
        assert!(matches!(
            result,
            Err(SmileError::MissingPillar {
                quote_type: FxMarketQuoteType::Butterfly25Delta,
                ..
            })
        ));
    }

    #[test]
    fn test_new_mixed_as_of_dates() {
        let valuation = d(2024, 1, 1);
        let expiry = d(2025, 1, 1);
        let mut quotes = vec![
            vol_quote(expiry, FxMarketQuoteType::AtmStraddle, 0.10),
            vol_quote(expiry, FxMarketQuoteType::RiskReversal25Delta, -0.01),
            vol_quote(expiry, FxMarketQuoteType::Butterfly25Delta, 0.005),
        ];
        quotes[2].as_of_date = d(2024, 1, 2);
        let result = VannaVolga::new(
            &quotes,
            1.10,
            flat_curve(valuation, expiry, 0.02),
            flat_curve(valuation, expiry, 0.01),
        );
        assert!(matches!(result, Err(SmileError::MixedAsOfDates { .. })));
    }

    #[test]
    fn test_new_invalid_spot() {
        let valuation = d(2024, 1, 1);
        let expiry = d(2025, 1, 1);
        let quotes = [vol_quote(expiry, FxMarketQuoteType::AtmStraddle, 0.10)];
        let result = VannaVolga::new(
            &quotes,
            -1.10,
            flat_curve(valuation, expiry, 0.02),
            flat_curve(valuation, expiry, 0.01),
        );
        assert!(matches!(result, Err(SmileError::InvalidSpot { .. })));
    }

    // ========================================
    // Pillar quantities
    // ========================================

    #[test]
    fn test_pillar_vols_from_rr_and_fly() {
        let (smile, expiry) = calibrated_smile();
        assert_relative_eq!(smile.sigma_atm(expiry).unwrap(), 0.10, epsilon = 1e-15);
        // sigma_25C = 0.10 + 0.005 - 0.005 = 0.10
        assert_relative_eq!(smile.sigma_25d_call(expiry).unwrap(), 0.10, epsilon = 1e-15);
        // sigma_25P = 0.10 + 0.005 + 0.005 = 0.11
        assert_relative_eq!(smile.sigma_25d_put(expiry).unwrap(), 0.11, epsilon = 1e-15);
    }

    #[test]
    fn test_unknown_expiry() {
        let (smile, _) = calibrated_smile();
        let other = d(2026, 1, 1);
        assert!(matches!(
            smile.sigma_atm(other),
            Err(SmileError::UnknownExpiry { .. })
        ));
        assert!(matches!(
            smile.first_order_volatility(1.10, other),
            Err(SmileError::UnknownExpiry { .. })
        ));
    }

    #[test]
    fn test_forward_points() {
        let (smile, expiry) = calibrated_smile();
        // F = S * P_f / P_d = S * exp((r_d - r_f) * tau)
        let tau = DayCountBasis::Actual365
            .year_fraction(d(2024, 1, 1), expiry)
            .unwrap();
        let expected = 1.10 * ((0.02 - 0.01) * tau).exp();
        assert_relative_eq!(
            smile.forward(d(2024, 1, 1), expiry).unwrap(),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_strikes_are_ordered() {
        let (smile, expiry) = calibrated_smile();
        let k1 = smile.k_25d_put(expiry).unwrap();
        let k2 = smile.k_atm(expiry).unwrap();
        let k3 = smile.k_25d_call(expiry).unwrap();
        let fwd = smile.forward(d(2024, 1, 1), expiry).unwrap();

        assert!(k1 < k2, "put strike {} below ATM strike {}", k1, k2);
        assert!(k2 < k3, "ATM strike {} below call strike {}", k2, k3);
        assert!(k1 < fwd && k3 > fwd);
    }

    #[test]
    fn test_alpha_is_positive_for_moderate_rates() {
        let (smile, expiry) = calibrated_smile();
        // 0.25 / P_d < 0.5, so the inverse CDF argument sits below the
        // median and alpha comes out positive.
        let alpha = smile.alpha(expiry).unwrap();
        assert!(alpha > 0.0);
    }

    // ========================================
    // Weights
    // ========================================

    #[test]
    fn test_weights_sum_to_one() {
        let (k1, k2, k3) = (0.95, 1.10, 1.25);
        for k in [0.90, 0.95, 1.0, 1.10, 1.18, 1.25, 1.40] {
            let (w1, w2, w3) = VannaVolga::weights(k1, k2, k3, k).unwrap();
            assert_relative_eq!(w1 + w2 + w3, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_weights_at_pillars() {
        let (k1, k2, k3) = (0.95, 1.10, 1.25);

        let (w1, w2, w3) = VannaVolga::weights(k1, k2, k3, k1).unwrap();
        assert_eq!((w1, w2, w3), (1.0, 0.0, 0.0));

        let (w1, w2, w3) = VannaVolga::weights(k1, k2, k3, k2).unwrap();
        assert_eq!((w1, w2, w3), (0.0, 1.0, 0.0));

        let (w1, w2, w3) = VannaVolga::weights(k1, k2, k3, k3).unwrap();
        assert_eq!((w1, w2, w3), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_weights_degenerate_strikes() {
        let result = VannaVolga::weights(1.10, 1.10, 1.25, 1.15);
        assert!(matches!(result, Err(SmileError::DegenerateSmile { .. })));

        let result = VannaVolga::weights(0.95, 1.10, 1.10, 1.15);
        assert!(matches!(result, Err(SmileError::DegenerateSmile { .. })));
    }

    #[test]
    fn test_weights_invalid_strike() {
        let result = VannaVolga::weights(0.95, 1.10, 1.25, 0.0);
        assert!(matches!(result, Err(SmileError::InvalidStrike { .. })));
        let result = VannaVolga::weights(0.95, 1.10, 1.25, -1.0);
        assert!(matches!(result, Err(SmileError::InvalidStrike { .. })));
    }

    // ========================================
    // Smile evaluation
    // ========================================

    #[test]
    fn test_first_order_exact_at_atm() {
        let (smile, expiry) = calibrated_smile();
        let k_atm = smile.k_atm(expiry).unwrap();
        let vol = smile.first_order_volatility(k_atm, expiry).unwrap();
        assert_eq!(vol, 0.10);
    }

    #[test]
    fn test_first_order_reproduces_pillars() {
        let (smile, expiry) = calibrated_smile();

        let k_put = smile.k_25d_put(expiry).unwrap();
        let vol_put = smile.first_order_volatility(k_put, expiry).unwrap();
        assert_relative_eq!(vol_put, smile.sigma_25d_put(expiry).unwrap(), epsilon = 1e-8);

        let k_call = smile.k_25d_call(expiry).unwrap();
        let vol_call = smile.first_order_volatility(k_call, expiry).unwrap();
        assert_relative_eq!(
            vol_call,
            smile.sigma_25d_call(expiry).unwrap(),
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_skew_direction() {
        // RR < 0: low strikes carry more volatility than high strikes.
        let (smile, expiry) = calibrated_smile();
        let k2 = smile.k_atm(expiry).unwrap();
        let low = smile.first_order_volatility(k2 * 0.93, expiry).unwrap();
        let high = smile.first_order_volatility(k2 * 1.07, expiry).unwrap();
        assert!(low > high);
    }

    #[test]
    fn test_second_order_exact_at_atm() {
        let (smile, expiry) = calibrated_smile();
        let k_atm = smile.k_atm(expiry).unwrap();
        let vol = smile.second_order_volatility(k_atm, expiry).unwrap();
        assert_relative_eq!(vol, 0.10, epsilon = 1e-10);
    }

    #[test]
    fn test_second_order_stays_near_first_order() {
        let (smile, expiry) = calibrated_smile();
        let k2 = smile.k_atm(expiry).unwrap();
        for k in [k2 * 0.95, k2 * 0.99, k2 * 1.01, k2 * 1.05] {
            let first = smile.first_order_volatility(k, expiry).unwrap();
            let second = smile.second_order_volatility(k, expiry).unwrap();
            assert!(
                (first - second).abs() < 0.005,
                "orders diverged at K = {}: {} vs {}",
                k,
                first,
                second
            );
        }
    }

    #[test]
    fn test_multi_expiry_calibration() {
        let valuation = d(2024, 1, 1);
        let e1 = d(2024, 7, 1);
        let e2 = d(2025, 1, 1);
        let quotes = [
            vol_quote(e1, FxMarketQuoteType::AtmStraddle, 0.09),
            vol_quote(e1, FxMarketQuoteType::RiskReversal25Delta, -0.008),
            vol_quote(e1, FxMarketQuoteType::Butterfly25Delta, 0.004),
            vol_quote(e2, FxMarketQuoteType::AtmStraddle, 0.10),
            vol_quote(e2, FxMarketQuoteType::RiskReversal25Delta, -0.01),
            vol_quote(e2, FxMarketQuoteType::Butterfly25Delta, 0.005),
        ];
        let smile = VannaVolga::new(
            &quotes,
            1.10,
            flat_curve(valuation, e2, 0.02),
            flat_curve(valuation, e2, 0.01),
        )
        .unwrap();

        assert_eq!(smile.expiries(), vec![e1, e2]);
        assert_relative_eq!(smile.sigma_atm(e1).unwrap(), 0.09, epsilon = 1e-15);
        assert_relative_eq!(smile.sigma_atm(e2).unwrap(), 0.10, epsilon = 1e-15);

        let k_atm_1 = smile.k_atm(e1).unwrap();
        assert_eq!(smile.first_order_volatility(k_atm_1, e1).unwrap(), 0.09);
    }

    // ========================================
    // Property tests
    // ========================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn weights_sum_to_one_for_random_grids(
                k1 in 0.50_f64..0.95,
                gap2 in 0.05_f64..0.40,
                gap3 in 0.05_f64..0.40,
                k in 0.40_f64..2.50,
            ) {
                let k2 = k1 + gap2;
                let k3 = k2 + gap3;
                let (w1, w2, w3) = VannaVolga::weights(k1, k2, k3, k).unwrap();
                prop_assert!((w1 + w2 + w3 - 1.0).abs() < 1e-9);
            }
        }
    }
}
