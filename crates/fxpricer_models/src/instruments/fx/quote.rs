//! FX options market quote conventions and the pillar quote record.

use std::fmt;
use std::str::FromStr;

use fxpricer_core::types::time::Date;
use fxpricer_core::types::CurrencyPair;

/// Price quotation styles for FX option premia.
///
/// The FX options market expresses the same premium in several units; the
/// pricer converts between them on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FxQuoteConvention {
    /// Premium in domestic currency per unit of foreign notional.
    DomesticPerUnitOfForeign,
    /// Premium as a percentage of the foreign notional (strike-scaled).
    PercentageForeign,
    /// Premium as a percentage of the domestic notional (spot-scaled).
    PercentageDomestic,
}

/// Delta conventions in the FX options market.
///
/// The rule mapping an option's delta to its strike depends on how the
/// delta hedge is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaConvention {
    /// Spot delta: the Black delta discounted by the foreign curve.
    SpotDelta,
    /// Forward delta: the undiscounted Black delta.
    ForwardDelta,
    /// Premium-adjusted spot delta: the spot delta reduced by the premium
    /// expressed in foreign currency.
    PremiumAdjustedDelta,
}

/// The liquid instrument a smile pillar quote refers to.
///
/// The most liquid quoted combinations in the FX options market are
/// at-the-money straddles, 25-delta risk reversals and 25-delta
/// butterflies; a full smile per expiry needs all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FxMarketQuoteType {
    /// At-the-money straddle volatility.
    AtmStraddle,
    /// 25-delta risk reversal: sigma(25D call) - sigma(25D put).
    RiskReversal25Delta,
    /// 25-delta vega-weighted butterfly:
    /// (sigma(25D call) + sigma(25D put)) / 2 - sigma(ATM).
    Butterfly25Delta,
}

impl FxMarketQuoteType {
    /// Returns the market short code.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            FxMarketQuoteType::AtmStraddle => "STDL",
            FxMarketQuoteType::RiskReversal25Delta => "25DRR",
            FxMarketQuoteType::Butterfly25Delta => "25DFLY",
        }
    }
}

impl fmt::Display for FxMarketQuoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for FxMarketQuoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STDL" | "ATM" => Ok(FxMarketQuoteType::AtmStraddle),
            "25DRR" | "RR" => Ok(FxMarketQuoteType::RiskReversal25Delta),
            "25DFLY" | "FLY" | "BF" => Ok(FxMarketQuoteType::Butterfly25Delta),
            _ => Err(format!("Unknown market quote type: {}", s)),
        }
    }
}

/// How the numeric value of a quote is expressed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuoteStyle {
    /// Plain implied volatility.
    Volatility,
    /// Implied volatility quoted at a delta pillar under the given delta
    /// convention.
    DeltaVolatility(DeltaConvention),
    /// Option premium in the given price quotation convention; inverted to
    /// volatility at surface construction. The quote must carry its strike.
    Premium(FxQuoteConvention),
}

/// A market quote for one smile pillar of one expiry.
///
/// Immutable record of a quoted level. The internal representation of a
/// volatility surface is always plain volatility; premium-style quotes are
/// converted on ingestion.
///
/// # Examples
///
/// ```
/// use fxpricer_core::types::time::Date;
/// use fxpricer_core::types::{Currency, CurrencyPair};
/// use fxpricer_models::instruments::fx::{
///     EuropeanVanillaFxOptionQuote, FxMarketQuoteType,
/// };
///
/// let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
/// let quote = EuropeanVanillaFxOptionQuote::vol_quote(
///     pair,
///     Date::from_ymd(2024, 1, 1).unwrap(),
///     Date::from_ymd(2025, 1, 1).unwrap(),
///     FxMarketQuoteType::AtmStraddle,
///     0.10,
/// );
/// assert_eq!(quote.quote_type, FxMarketQuoteType::AtmStraddle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuropeanVanillaFxOptionQuote {
    /// Currency pair the quote refers to
    pub pair: CurrencyPair,
    /// Observation date of the quote
    pub as_of_date: Date,
    /// Expiry date of the quoted pillar
    pub expiry_date: Date,
    /// Which pillar instrument is quoted
    pub quote_type: FxMarketQuoteType,
    /// How the numeric value is expressed
    pub style: QuoteStyle,
    /// The quoted level
    pub value: f64,
    /// Strike, required for premium-style quotes
    pub strike: Option<f64>,
}

impl EuropeanVanillaFxOptionQuote {
    /// Creates a plain volatility quote, the common case.
    pub fn vol_quote(
        pair: CurrencyPair,
        as_of_date: Date,
        expiry_date: Date,
        quote_type: FxMarketQuoteType,
        value: f64,
    ) -> Self {
        Self {
            pair,
            as_of_date,
            expiry_date,
            quote_type,
            style: QuoteStyle::Volatility,
            value,
            strike: None,
        }
    }

    /// Creates a premium-style quote carrying its strike.
    pub fn premium_quote(
        pair: CurrencyPair,
        as_of_date: Date,
        expiry_date: Date,
        quote_type: FxMarketQuoteType,
        convention: FxQuoteConvention,
        value: f64,
        strike: f64,
    ) -> Self {
        Self {
            pair,
            as_of_date,
            expiry_date,
            quote_type,
            style: QuoteStyle::Premium(convention),
            value,
            strike: Some(strike),
        }
    }
}
