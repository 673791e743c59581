//! Date-keyed discounting curve.

use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use crate::types::time::{Date, DayCountBasis};

/// Interpolation method for discounting curves.
///
/// Determines which transformed quantity is interpolated between pillars.
/// Extrapolation beyond the last pillar is flat on that same transformed
/// quantity, mirroring the interpolator's boundary policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveInterpolation {
    /// Linear interpolation of ln P(t).
    ///
    /// Equivalent to piecewise-constant forward rates between pillars,
    /// which keeps the curve arbitrage-consistent. This is the standard
    /// choice.
    LogLinearDiscountFactor,

    /// Linear interpolation of the continuously compounded zero rate,
    /// with the discount factor recovered as exp(-r(t) * t).
    LinearZeroRate,
}

/// Converts a discount factor into a continuously compounded zero rate.
///
/// Returns 0 for a vanishing year fraction.
#[inline]
pub fn df_to_rate(df: f64, tau: f64) -> f64 {
    if tau == 0.0 {
        0.0
    } else {
        -df.ln() / tau
    }
}

/// Converts a continuously compounded zero rate into a discount factor.
#[inline]
pub fn rate_to_df(rate: f64, tau: f64) -> f64 {
    (-rate * tau).exp()
}

/// Discounting curve built from (date, discount factor) pillars.
///
/// The curve owns a valuation date, an ordered set of pillars, a day count
/// basis used to map dates onto the time axis, and an interpolation method.
/// It is constructed once and never mutated; queries are pure.
///
/// # Invariants
///
/// - `discount_factor(valuation_date) == 1.0` exactly
/// - pillar dates are strictly increasing and never precede the valuation
///   date
/// - all discount factors are positive
///
/// # Example
///
/// ```
/// use fxpricer_core::market_data::curves::{CurveInterpolation, DiscountingCurve};
/// use fxpricer_core::types::time::{Date, DayCountBasis};
///
/// let valuation = Date::from_ymd(2024, 1, 1).unwrap();
/// let one_year = Date::from_ymd(2025, 1, 1).unwrap();
///
/// let curve = DiscountingCurve::new(
///     valuation,
///     &[(one_year, 0.97)],
///     DayCountBasis::ActualActual,
///     CurveInterpolation::LogLinearDiscountFactor,
/// )
/// .unwrap();
///
/// assert_eq!(curve.discount_factor(valuation).unwrap(), 1.0);
/// assert!((curve.discount_factor(one_year).unwrap() - 0.97).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountingCurve {
    /// Valuation date (time zero)
    valuation_date: Date,
    /// Pillar dates, anchored at the valuation date
    dates: Vec<Date>,
    /// Discount factors per pillar
    discount_factors: Vec<f64>,
    /// Year fractions from the valuation date per pillar
    times: Vec<f64>,
    /// Day count basis for the time axis
    basis: DayCountBasis,
    /// Interpolation method
    method: CurveInterpolation,
}

impl DiscountingCurve {
    /// Constructs a discounting curve from dated pillars.
    ///
    /// A synthetic (valuation_date, 1.0) anchor is prepended when the first
    /// pillar is strictly later than the valuation date, so P(0) = 1 holds
    /// by construction.
    ///
    /// # Arguments
    ///
    /// * `valuation_date` - The curve's time zero
    /// * `pillars` - (date, discount factor) pairs, strictly increasing in
    ///   date, none before the valuation date
    /// * `basis` - Day count basis mapping dates to year fractions
    /// * `method` - Interpolation method
    ///
    /// # Errors
    ///
    /// * `MarketDataError::EmptyCurve` - no pillars supplied
    /// * `MarketDataError::DateOutOfRange` - a pillar precedes the valuation
    ///   date
    /// * `MarketDataError::UnsortedPillars` - dates not strictly increasing
    /// * `MarketDataError::InvalidDiscountFactor` - non-positive or
    ///   non-finite factor
    /// * `MarketDataError::ValuationDiscountFactorNotUnit` - a pillar on the
    ///   valuation date with factor != 1
    pub fn new(
        valuation_date: Date,
        pillars: &[(Date, f64)],
        basis: DayCountBasis,
        method: CurveInterpolation,
    ) -> Result<Self, MarketDataError> {
        if pillars.is_empty() {
            return Err(MarketDataError::EmptyCurve);
        }

        for (i, &(date, df)) in pillars.iter().enumerate() {
            if date < valuation_date {
                return Err(MarketDataError::DateOutOfRange {
                    date,
                    valuation_date,
                });
            }
            if i > 0 && date <= pillars[i - 1].0 {
                return Err(MarketDataError::UnsortedPillars { date });
            }
            if !df.is_finite() || df <= 0.0 {
                return Err(MarketDataError::InvalidDiscountFactor { df });
            }
            if date == valuation_date && df != 1.0 {
                return Err(MarketDataError::ValuationDiscountFactorNotUnit { df });
            }
        }

        let mut dates = Vec::with_capacity(pillars.len() + 1);
        let mut discount_factors = Vec::with_capacity(pillars.len() + 1);
        if pillars[0].0 > valuation_date {
            dates.push(valuation_date);
            discount_factors.push(1.0);
        }
        for &(date, df) in pillars {
            dates.push(date);
            discount_factors.push(df);
        }

        if dates.len() < 2 {
            return Err(MarketDataError::Interpolation(
                crate::types::InterpolationError::DegenerateGrid {
                    got: dates.len(),
                    need: 2,
                },
            ));
        }

        let times = dates
            .iter()
            .map(|&d| basis.year_fraction(valuation_date, d))
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(Self {
            valuation_date,
            dates,
            discount_factors,
            times,
            basis,
            method,
        })
    }

    /// Returns the valuation date.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the day count basis.
    #[inline]
    pub fn basis(&self) -> DayCountBasis {
        self.basis
    }

    /// Returns the interpolation method.
    #[inline]
    pub fn method(&self) -> CurveInterpolation {
        self.method
    }

    /// Returns the pillar dates, including the valuation-date anchor.
    #[inline]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the pillar discount factors.
    #[inline]
    pub fn discount_factors(&self) -> &[f64] {
        &self.discount_factors
    }

    /// Knot zero rates for the `LinearZeroRate` method.
    ///
    /// The valuation-date anchor has no intrinsic rate; it takes the first
    /// pillar's rate so that the short end is flat.
    fn knot_rates(&self) -> Vec<f64> {
        let mut rates: Vec<f64> = self
            .times
            .iter()
            .zip(self.discount_factors.iter())
            .map(|(&t, &df)| df_to_rate(df, t))
            .collect();
        if self.times[0] == 0.0 {
            rates[0] = rates[1];
        }
        rates
    }

    /// Returns the discount factor P(valuation_date, date).
    ///
    /// Exactly 1 at the valuation date. Beyond the last pillar the
    /// transformed value (ln P for log-linear, the zero rate for
    /// linear-on-rate) is held flat.
    ///
    /// # Errors
    ///
    /// `MarketDataError::DateOutOfRange` when `date` precedes the valuation
    /// date; discounting into the past is undefined.
    pub fn discount_factor(&self, date: Date) -> Result<f64, MarketDataError> {
        if date < self.valuation_date {
            return Err(MarketDataError::DateOutOfRange {
                date,
                valuation_date: self.valuation_date,
            });
        }
        if date == self.valuation_date {
            return Ok(1.0);
        }

        let t = self.basis.year_fraction(self.valuation_date, date)?;

        match self.method {
            CurveInterpolation::LogLinearDiscountFactor => {
                let log_dfs: Vec<f64> = self.discount_factors.iter().map(|df| df.ln()).collect();
                let interp = LinearInterpolator::new(&self.times, &log_dfs)?;
                Ok(interp.interpolate(t)?.exp())
            }
            CurveInterpolation::LinearZeroRate => {
                let rates = self.knot_rates();
                let interp = LinearInterpolator::new(&self.times, &rates)?;
                let rate = interp.interpolate(t)?;
                Ok(rate_to_df(rate, t))
            }
        }
    }

    /// Returns the continuously compounded zero rate for `date`.
    ///
    /// Derived as -ln P(T) / tau(valuation_date, T) under the curve's day
    /// count basis.
    ///
    /// # Errors
    ///
    /// `MarketDataError::DateOutOfRange` when `date` does not lie strictly
    /// after the valuation date (the rate is undefined over a vanishing
    /// year fraction).
    pub fn zero_rate(&self, date: Date) -> Result<f64, MarketDataError> {
        if date <= self.valuation_date {
            return Err(MarketDataError::DateOutOfRange {
                date,
                valuation_date: self.valuation_date,
            });
        }
        let tau = self.basis.year_fraction(self.valuation_date, date)?;
        if tau <= 0.0 {
            return Err(MarketDataError::DateOutOfRange {
                date,
                valuation_date: self.valuation_date,
            });
        }
        let df = self.discount_factor(date)?;
        Ok(-df.ln() / tau)
    }

    /// Returns the forward discount factor P(d1, d2) = P(d2) / P(d1).
    ///
    /// # Errors
    ///
    /// Fails when `d2 < d1` or either date precedes the valuation date.
    pub fn forward_discount_factor(&self, d1: Date, d2: Date) -> Result<f64, MarketDataError> {
        if d2 < d1 {
            return Err(MarketDataError::Date(
                crate::types::DateError::InvalidDateRange { start: d1, end: d2 },
            ));
        }
        let df1 = self.discount_factor(d1)?;
        let df2 = self.discount_factor(d2)?;
        Ok(df2 / df1)
    }
}
