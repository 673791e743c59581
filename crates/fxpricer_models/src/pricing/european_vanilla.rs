//! European vanilla FX option pricer.

use fxpricer_core::market_data::curves::DiscountingCurve;
use fxpricer_core::types::time::{Date, DayCountBasis};

use super::error::FxPricerError;
use crate::analytical::{AnalyticalError, BlackCalculator};
use crate::instruments::fx::{
    DeltaConvention, EuropeanVanillaFxOption, FxQuoteConvention,
};
use crate::market::FxVolatilitySurface;

/// Price and sensitivities of one option, per unit of foreign notional.
///
/// All entries are raw analytic values: the price in domestic currency per
/// unit of foreign notional, delta per unit of spot, vega per unit of
/// volatility, theta per year. Scaling to notional, trade direction or
/// display units is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxOptionPricingResults {
    /// Price in domestic currency per unit of foreign notional
    pub price: f64,
    /// Spot delta
    pub delta: f64,
    /// Second derivative with respect to spot
    pub gamma: f64,
    /// First derivative with respect to volatility
    pub vega: f64,
    /// Cross derivative with respect to spot and volatility
    pub vanna: f64,
    /// Second derivative with respect to volatility
    pub volga: f64,
    /// Derivative with respect to calendar time, per year
    pub theta: f64,
}

/// Garman-Kohlhagen pricer for European vanilla FX options.
///
/// Owns its market snapshot: valuation date, spot, and the domestic and
/// foreign discounting curves. The volatility input is either supplied
/// directly or resolved from a Vanna-Volga surface at the option's strike
/// and expiry. Immutable after construction; pricing calls are pure, so
/// one pricer can serve concurrent callers without coordination.
///
/// # Examples
///
/// ```
/// use fxpricer_core::market_data::curves::{CurveInterpolation, DiscountingCurve};
/// use fxpricer_core::types::time::{Date, DayCountBasis};
/// use fxpricer_core::types::{Currency, CurrencyPair};
/// use fxpricer_models::instruments::fx::{Direction, EuropeanVanillaFxOption, FxOptionType};
/// use fxpricer_models::pricing::BlackScholesVanillaFxOptionPricer;
///
/// let valuation = Date::from_ymd(2023, 1, 1).unwrap();
/// let expiry = Date::from_ymd(2024, 1, 1).unwrap();
///
/// let curve = |rate: f64| {
///     DiscountingCurve::new(
///         valuation,
///         &[(expiry, (-rate).exp())],
///         DayCountBasis::Actual365,
///         CurveInterpolation::LogLinearDiscountFactor,
///     )
///     .unwrap()
/// };
///
/// let option = EuropeanVanillaFxOption::new(
///     CurrencyPair::new(Currency::EUR, Currency::USD).unwrap(),
///     1.10,
///     expiry,
///     FxOptionType::Call,
///     1.0,
///     Direction::Buy,
/// )
/// .unwrap();
///
/// let pricer =
///     BlackScholesVanillaFxOptionPricer::new(valuation, 1.10, curve(0.02), curve(0.01));
/// let results = pricer.price_with_volatility(&option, 0.10).unwrap();
/// assert!((results.price - 0.0488467).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholesVanillaFxOptionPricer {
    /// Valuation date
    valuation_date: Date,
    /// Spot rate, domestic per unit of foreign
    spot: f64,
    /// Discounting curve of the quote (domestic) currency
    domestic_curve: DiscountingCurve,
    /// Discounting curve of the base (foreign) currency
    foreign_curve: DiscountingCurve,
    /// Year fraction convention for the option's time to expiry
    basis: DayCountBasis,
}

impl BlackScholesVanillaFxOptionPricer {
    /// Creates a pricer with the ACT/365 option basis, the FX market
    /// default.
    pub fn new(
        valuation_date: Date,
        spot: f64,
        domestic_curve: DiscountingCurve,
        foreign_curve: DiscountingCurve,
    ) -> Self {
        Self {
            valuation_date,
            spot,
            domestic_curve,
            foreign_curve,
            basis: DayCountBasis::Actual365,
        }
    }

    /// Overrides the year fraction convention for the time to expiry.
    pub fn with_basis(mut self, basis: DayCountBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Returns the valuation date.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the spot rate.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Builds the Black calculator for an option at the given volatility.
    fn calculator(
        &self,
        option: &EuropeanVanillaFxOption,
        volatility: f64,
    ) -> Result<BlackCalculator<f64>, FxPricerError> {
        let expiry = option.expiry();
        if expiry <= self.valuation_date {
            // Expired and same-day options fail through the degenerate-time
            // path rather than a date-range error.
            let tau = (expiry - self.valuation_date) as f64 / 365.0;
            return Err(AnalyticalError::NonPositiveTime { time: tau }.into());
        }

        let tau = self.basis.year_fraction(self.valuation_date, expiry)?;
        let df_domestic = self.domestic_curve.discount_factor(expiry)?;
        let df_foreign = self.foreign_curve.discount_factor(expiry)?;
        let forward = self.spot * df_foreign / df_domestic;

        Ok(BlackCalculator::new(
            forward,
            option.strike(),
            volatility,
            tau,
            df_domestic,
            df_foreign,
        )?)
    }

    /// Prices an option at a directly supplied volatility.
    ///
    /// Returns the full record of price and analytic Greeks per unit of
    /// foreign notional.
    ///
    /// # Errors
    ///
    /// * `AnalyticalError::NonPositiveVolatility` for sigma <= 0
    /// * `AnalyticalError::NonPositiveTime` for an expiry on or before the
    ///   valuation date
    /// * curve lookup failures for expiries outside the curves
    pub fn price_with_volatility(
        &self,
        option: &EuropeanVanillaFxOption,
        volatility: f64,
    ) -> Result<FxOptionPricingResults, FxPricerError> {
        let calc = self.calculator(option, volatility)?;
        let option_type = option.option_type();

        Ok(FxOptionPricingResults {
            price: calc.price(option_type),
            delta: calc.delta(option_type, DeltaConvention::SpotDelta),
            gamma: calc.gamma(),
            vega: calc.vega(),
            vanna: calc.vanna(),
            volga: calc.volga(),
            theta: calc.theta(option_type),
        })
    }

    /// Prices an option with its volatility resolved from a Vanna-Volga
    /// surface at the option's strike and expiry.
    pub fn price_with_surface(
        &self,
        option: &EuropeanVanillaFxOption,
        surface: &FxVolatilitySurface,
    ) -> Result<FxOptionPricingResults, FxPricerError> {
        let point = surface.volatility(option.strike(), option.expiry())?;
        self.price_with_volatility(option, point.sigma)
    }

    /// Present value of the trade: the unit price scaled by notional and
    /// signed by direction.
    pub fn present_value(
        &self,
        option: &EuropeanVanillaFxOption,
        volatility: f64,
    ) -> Result<f64, FxPricerError> {
        let results = self.price_with_volatility(option, volatility)?;
        Ok(option.direction().sign() * option.notional() * results.price)
    }

    /// Re-expresses the unit premium in the requested price quotation
    /// convention.
    ///
    /// - `DomesticPerUnitOfForeign`: the premium itself
    /// - `PercentageDomestic`: premium / spot * 100
    /// - `PercentageForeign`: premium / strike * 100
    pub fn price_quoted(
        &self,
        option: &EuropeanVanillaFxOption,
        volatility: f64,
        convention: FxQuoteConvention,
    ) -> Result<f64, FxPricerError> {
        let results = self.price_with_volatility(option, volatility)?;
        let quoted = match convention {
            FxQuoteConvention::DomesticPerUnitOfForeign => results.price,
            FxQuoteConvention::PercentageDomestic => results.price / self.spot * 100.0,
            FxQuoteConvention::PercentageForeign => results.price / option.strike() * 100.0,
        };
        Ok(quoted)
    }
}
