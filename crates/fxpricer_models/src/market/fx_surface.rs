//! Quote-driven FX volatility surface.
//!
//! The surface is a scalar field sigma(K, T): the x-axis is strike, the
//! y-axis time-to-expiry, the value implied volatility. It is backed by a
//! calibrated Vanna-Volga model, so a full smile per expiry is recovered
//! from the three liquid pillar quotes.

use fxpricer_core::market_data::curves::DiscountingCurve;
use fxpricer_core::types::time::Date;
use fxpricer_core::types::CurrencyPair;

use crate::instruments::fx::EuropeanVanillaFxOptionQuote;
use crate::smile::{SmileError, VannaVolga};

/// A point on the volatility surface sigma(T, K).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxVolatilitySurfacePoint {
    /// Strike
    pub strike: f64,
    /// Expiry date
    pub expiry: Date,
    /// Implied volatility
    pub sigma: f64,
}

/// The three pillar quotes of one expiry's smile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmilePillars {
    /// At-the-money straddle volatility
    pub atm: f64,
    /// 25-delta risk reversal
    pub risk_reversal: f64,
    /// 25-delta butterfly
    pub butterfly: f64,
}

/// FX volatility surface backed by a Vanna-Volga smile per expiry.
///
/// Quote normalisation happens at construction: every pillar is stored as
/// plain volatility, whatever style it was submitted in. Lookups resolve
/// through the first-order Vanna-Volga weighting scheme.
///
/// # Examples
///
/// ```
/// use fxpricer_core::market_data::curves::{CurveInterpolation, DiscountingCurve};
/// use fxpricer_core::types::time::{Date, DayCountBasis};
/// use fxpricer_core::types::{Currency, CurrencyPair};
/// use fxpricer_models::instruments::fx::{EuropeanVanillaFxOptionQuote, FxMarketQuoteType};
/// use fxpricer_models::market::FxVolatilitySurface;
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
/// let surface =
///     FxVolatilitySurface::new(pair, &quotes, 1.10, curve(0.02), curve(0.01)).unwrap();
///
/// let pillars = surface.pillars(expiry).unwrap();
/// assert!((pillars.atm - 0.10).abs() < 1e-15);
///
/// let point = surface.volatility(1.10, expiry).unwrap();
/// assert!(point.sigma > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct FxVolatilitySurface {
    /// Currency pair the surface belongs to
    pair: CurrencyPair,
    /// Calibrated smile model
    model: VannaVolga,
}

impl FxVolatilitySurface {
    /// Builds the surface from pillar quotes and the market context needed
    /// to normalise and evaluate them.
    ///
    /// # Errors
    ///
    /// Propagates the Vanna-Volga calibration errors; in particular
    /// `SmileError::MissingPillar` when an expiry lacks one of the three
    /// required quotes.
    pub fn new(
        pair: CurrencyPair,
        quotes: &[EuropeanVanillaFxOptionQuote],
        spot: f64,
        domestic_curve: DiscountingCurve,
        foreign_curve: DiscountingCurve,
    ) -> Result<Self, SmileError> {
        let model = VannaVolga::new(quotes, spot, domestic_curve, foreign_curve)?;
        Ok(Self { pair, model })
    }

    /// Returns the currency pair.
    #[inline]
    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    /// Returns the valuation date of the calibrating quotes.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.model.valuation_date()
    }

    /// Returns the underlying smile model.
    #[inline]
    pub fn model(&self) -> &VannaVolga {
        &self.model
    }

    /// Returns the (ATM, risk reversal, butterfly) pillar triple for an
    /// expiry.
    ///
    /// # Errors
    ///
    /// `SmileError::UnknownExpiry` when the expiry was not quoted.
    pub fn pillars(&self, expiry: Date) -> Result<SmilePillars, SmileError> {
        Ok(SmilePillars {
            atm: self.model.sigma_atm(expiry)?,
            risk_reversal: self.model.sigma_25d_rr(expiry)?,
            butterfly: self.model.sigma_25d_fly(expiry)?,
        })
    }

    /// Returns the implied volatility at (strike, expiry) through the
    /// first-order Vanna-Volga scheme.
    pub fn volatility(
        &self,
        strike: f64,
        expiry: Date,
    ) -> Result<FxVolatilitySurfacePoint, SmileError> {
        let sigma = self.model.first_order_volatility(strike, expiry)?;
        Ok(FxVolatilitySurfacePoint {
            strike,
            expiry,
            sigma,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fxpricer_core::market_data::curves::CurveInterpolation;
    use fxpricer_core::types::time::DayCountBasis;
    use fxpricer_core::types::Currency;
    use crate::analytical::BlackCalculator;
    use crate::instruments::fx::{FxMarketQuoteType, FxOptionType, FxQuoteConvention};

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

    fn standard_quotes(valuation: Date, expiry: Date) -> Vec<EuropeanVanillaFxOptionQuote> {
        vec![
            EuropeanVanillaFxOptionQuote::vol_quote(
                eurusd(),
                valuation,
                expiry,
                FxMarketQuoteType::AtmStraddle,
                0.10,
            ),
            EuropeanVanillaFxOptionQuote::vol_quote(
                eurusd(),
                valuation,
                expiry,
                FxMarketQuoteType::RiskReversal25Delta,
                -0.01,
            ),
            EuropeanVanillaFxOptionQuote::vol_quote(
                eurusd(),
                valuation,
                expiry,
                FxMarketQuoteType::Butterfly25Delta,
                0.005,
            ),
        ]
    }

    #[test]
    fn test_pillars_roundtrip() {
        let valuation = d(2024, 1, 1);
        let expiry = d(2025, 1, 1);
        let surface = FxVolatilitySurface::new(
            eurusd(),
            &standard_quotes(valuation, expiry),
            1.10,
            flat_curve(valuation, expiry, 0.02),
            flat_curve(valuation, expiry, 0.01),
        )
        .unwrap();

        let pillars = surface.pillars(expiry).unwrap();
        assert_relative_eq!(pillars.atm, 0.10, epsilon = 1e-15);
        assert_relative_eq!(pillars.risk_reversal, -0.01, epsilon = 1e-15);
        assert_relative_eq!(pillars.butterfly, 0.005, epsilon = 1e-15);
    }

    #[test]
    fn test_missing_pillar_propagates() {
        let valuation = d(2024, 1, 1);
        let expiry = d(2025, 1, 1);
        let mut quotes = standard_quotes(valuation, expiry);
        quotes.pop();
        let result = FxVolatilitySurface::new(
            eurusd(),
            &quotes,
            1.10,
            flat_curve(valuation, expiry, 0.02),
            flat_curve(valuation, expiry, 0.01),
        );
        assert!(matches!(result, Err(SmileError::MissingPillar { .. })));
    }

    #[test]
    fn test_unknown_expiry_lookup() {
        let valuation = d(2024, 1, 1);
        let expiry = d(2025, 1, 1);
        let surface = FxVolatilitySurface::new(
            eurusd(),
            &standard_quotes(valuation, expiry),
            1.10,
            flat_curve(valuation, expiry, 0.02),
            flat_curve(valuation, expiry, 0.01),
        )
        .unwrap();

        assert!(matches!(
            surface.pillars(d(2026, 1, 1)),
            Err(SmileError::UnknownExpiry { .. })
        ));
    }

    #[test]
    fn test_volatility_returns_surface_point() {
        let valuation = d(2024, 1, 1);
        let expiry = d(2025, 1, 1);
        let surface = FxVolatilitySurface::new(
            eurusd(),
            &standard_quotes(valuation, expiry),
            1.10,
            flat_curve(valuation, expiry, 0.02),
            flat_curve(valuation, expiry, 0.01),
        )
        .unwrap();

        let k_atm = surface.model().k_atm(expiry).unwrap();
        let point = surface.volatility(k_atm, expiry).unwrap();
        assert_eq!(point.expiry, expiry);
        assert_eq!(point.strike, k_atm);
        assert_eq!(point.sigma, 0.10);
    }

    #[test]
    fn test_premium_quote_is_normalised_to_volatility() {
        let valuation = d(2024, 1, 1);
        let expiry = d(2025, 1, 1);
        let domestic = flat_curve(valuation, expiry, 0.02);
        let foreign = flat_curve(valuation, expiry, 0.01);

        // Price the ATM pillar as a call premium at sigma = 10% and submit
        // that premium instead of the vol.
        let tau = DayCountBasis::Actual365
            .year_fraction(valuation, expiry)
            .unwrap();
        let df_d = domestic.discount_factor(expiry).unwrap();
        let df_f = foreign.discount_factor(expiry).unwrap();
        let forward = 1.10 * df_f / df_d;
        let strike = 1.12;
        let premium = BlackCalculator::new(forward, strike, 0.10, tau, df_d, df_f)
            .unwrap()
            .price(FxOptionType::Call);

        let mut quotes = standard_quotes(valuation, expiry);
        quotes[0] = EuropeanVanillaFxOptionQuote::premium_quote(
            eurusd(),
            valuation,
            expiry,
            FxMarketQuoteType::AtmStraddle,
            FxQuoteConvention::DomesticPerUnitOfForeign,
            premium,
            strike,
        );

        let surface =
            FxVolatilitySurface::new(eurusd(), &quotes, 1.10, domestic, foreign).unwrap();
        let pillars = surface.pillars(expiry).unwrap();
        assert_relative_eq!(pillars.atm, 0.10, epsilon = 1e-8);
    }

    #[test]
    fn test_premium_quote_without_strike_fails() {
        let valuation = d(2024, 1, 1);
        let expiry = d(2025, 1, 1);
        let mut quotes = standard_quotes(valuation, expiry);
        quotes[0] = EuropeanVanillaFxOptionQuote {
            strike: None,
            style: crate::instruments::fx::QuoteStyle::Premium(
                FxQuoteConvention::DomesticPerUnitOfForeign,
            ),
            ..quotes[0]
        };

        let result = FxVolatilitySurface::new(
            eurusd(),
            &quotes,
            1.10,
            flat_curve(valuation, expiry, 0.02),
            flat_curve(valuation, expiry, 0.01),
        );
        assert!(matches!(
            result,
            Err(SmileError::PremiumQuoteWithoutStrike { .. })
        ));
    }
}
