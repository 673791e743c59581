//! Time types and day count conventions for financial calculations.
//!
//! This module provides:
//! - `Date`: type-safe date wrapper around chrono::NaiveDate
//! - `DayCountBasis`: industry-standard year fraction conventions
//! - `Tenor`: standard maturity labels such as 1M, 3M, 1Y
//!
//! # Examples
//!
//! ```
//! use fxpricer_core::types::time::{Date, DayCountBasis};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! let yf = DayCountBasis::Actual365.year_fraction(start, end).unwrap();
//! assert!((yf - 182.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 parsing and display plus the day arithmetic the
/// pricing layer needs.
///
/// # Examples
///
/// ```
/// use fxpricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// assert_eq!(date - start, 166);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDate` for impossible calendar dates such
    /// as February 30th.
    ///
    /// # Examples
    ///
    /// ```
    /// use fxpricer_core::types::time::Date;
    ///
    /// let leap = Date::from_ymd(2024, 2, 29).unwrap();
    /// assert_eq!(leap.day(), 29);
    ///
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from an ISO 8601 string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the underlying NaiveDate for access to chrono's full API.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates, negative when `self`
    /// precedes `other`.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Number of calendar days in a year, leap-aware.
fn days_in_year(year: i32) -> f64 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366.0
    } else {
        365.0
    }
}

/// Day count basis (year fraction convention).
///
/// # Variants
/// - `Actual360`: actual days / 360 (money market instruments)
/// - `Actual365`: actual days / 365 (most derivatives markets)
/// - `ActualActual`: actual days / actual days in year, leap-aware
/// - `Thirty360`: 30/360 US bond basis
///
/// All conventions are defined for ordered date pairs only: `year_fraction`
/// fails when the end date precedes the start date.
///
/// # Examples
///
/// ```
/// use fxpricer_core::types::time::{Date, DayCountBasis};
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 7, 1).unwrap();
///
/// let yf = DayCountBasis::Actual360.year_fraction(start, end).unwrap();
/// assert!((yf - 182.0 / 360.0).abs() < 1e-12);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCountBasis {
    /// Actual/360: actual_days / 360.0
    Actual360,

    /// Actual/365 Fixed: actual_days / 365.0
    Actual365,

    /// Actual/Actual: actual days over the actual length of each year.
    ///
    /// Same-year intervals divide by the length of that year. Intervals
    /// crossing year ends are split at the January 1sts and the fractions
    /// summed, so leap and non-leap years each contribute at their own
    /// denominator.
    ActualActual,

    /// 30/360 US Bond Basis: each month counts 30 days, the year 360.
    Thirty360,
}

impl DayCountBasis {
    /// Returns the standard convention name.
    ///
    /// # Examples
    ///
    /// ```
    /// use fxpricer_core::types::time::DayCountBasis;
    ///
    /// assert_eq!(DayCountBasis::Actual365.name(), "ACT/365");
    /// assert_eq!(DayCountBasis::ActualActual.name(), "ACT/ACT");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountBasis::Actual360 => "ACT/360",
            DayCountBasis::Actual365 => "ACT/365",
            DayCountBasis::ActualActual => "ACT/ACT",
            DayCountBasis::Thirty360 => "30/360",
        }
    }

    /// Calculates the year fraction between two dates.
    ///
    /// # Arguments
    /// * `start` - Start date (inclusive)
    /// * `end` - End date (exclusive)
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDateRange` when `end < start`; none of
    /// the supported conventions define negative fractions.
    ///
    /// # Examples
    ///
    /// ```
    /// use fxpricer_core::types::time::{Date, DayCountBasis};
    ///
    /// let start = Date::from_ymd(2024, 1, 1).unwrap();
    /// let end = Date::from_ymd(2025, 1, 1).unwrap();
    ///
    /// // 2024 is a leap year: ACT/ACT counts its 366 days at denominator 366.
    /// let yf = DayCountBasis::ActualActual.year_fraction(start, end).unwrap();
    /// assert!((yf - 1.0).abs() < 1e-12);
    /// ```
    pub fn year_fraction(&self, start: Date, end: Date) -> Result<f64, DateError> {
        if end < start {
            return Err(DateError::InvalidDateRange { start, end });
        }

        match self {
            DayCountBasis::Actual360 => Ok((end - start) as f64 / 360.0),
            DayCountBasis::Actual365 => Ok((end - start) as f64 / 365.0),
            DayCountBasis::ActualActual => {
                let (y1, y2) = (start.year(), end.year());
                if y1 == y2 {
                    return Ok((end - start) as f64 / days_in_year(y1));
                }

                // Split at the January 1sts and prorate each stub by the
                // actual length of its own year.
                let jan_first_after_start = Date::from_ymd(y1 + 1, 1, 1)?;
                let jan_first_of_end_year = Date::from_ymd(y2, 1, 1)?;
                let head = (jan_first_after_start - start) as f64 / days_in_year(y1);
                let tail = (end - jan_first_of_end_year) as f64 / days_in_year(y2);
                let whole_years = (y2 - y1 - 1) as f64;
                Ok(head + whole_years + tail)
            }
            DayCountBasis::Thirty360 => {
                let (y1, m1, d1) = (start.year(), start.month(), start.day());
                let (y2, m2, d2) = (end.year(), end.month(), end.day());

                // 30/360 US adjustments
                let d1_adj = if d1 == 31 { 30 } else { d1 };
                let d2_adj = if d2 == 31 && d1_adj == 30 { 30 } else { d2 };

                let days = 360 * (y2 - y1)
                    + 30 * (m2 as i32 - m1 as i32)
                    + (d2_adj as i32 - d1_adj as i32);
                Ok(days as f64 / 360.0)
            }
        }
    }
}

impl FromStr for DayCountBasis {
    type Err = DateError;

    /// Parses a day count basis from a string (case-insensitive).
    ///
    /// Supports the usual aliases:
    /// - ACT/360: "ACT/360", "Actual/360", "Act360", "A360"
    /// - ACT/365: "ACT/365", "Actual/365", "Act365", "A365"
    /// - ACT/ACT: "ACT/ACT", "ActualActual", "AA"
    /// - 30/360: "30/360", "Thirty360", "30360"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' '], "").as_str() {
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountBasis::Actual360),
            "ACT365" | "ACTUAL365" | "A365" => Ok(DayCountBasis::Actual365),
            "ACTACT" | "ACTUALACTUAL" | "AA" => Ok(DayCountBasis::ActualActual),
            "30360" | "THIRTY360" => Ok(DayCountBasis::Thirty360),
            _ => Err(DateError::ParseError(format!(
                "Unknown day count basis: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for DayCountBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_dcb_impl {
    use super::DayCountBasis;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountBasis {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountBasis {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountBasis::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// Unit of a tenor label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TenorUnit {
    /// Calendar days
    Days,
    /// Calendar weeks
    Weeks,
    /// Calendar months
    Months,
    /// Calendar years
    Years,
}

impl TenorUnit {
    fn code(&self) -> char {
        match self {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        }
    }
}

/// Standard maturity label such as 1M, 3M or 1Y.
///
/// Tenors key volatility pillars and translate into expiry dates by
/// calendar arithmetic, with month-end day clamping (adding 1M to
/// January 31st gives the last day of February).
///
/// # Examples
///
/// ```
/// use fxpricer_core::types::time::{Date, Tenor};
///
/// let tenor: Tenor = "6M".parse().unwrap();
/// let start = Date::from_ymd(2024, 1, 31).unwrap();
/// let end = tenor.add_to(start).unwrap();
/// assert_eq!(end, Date::from_ymd(2024, 7, 31).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tenor {
    n: u32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor from a count and unit.
    pub fn new(n: u32, unit: TenorUnit) -> Self {
        Self { n, unit }
    }

    /// Returns the count component.
    pub fn count(&self) -> u32 {
        self.n
    }

    /// Returns the unit component.
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Adds this tenor to a date.
    ///
    /// Month and year arithmetic clamps the day of month to the target
    /// month's length.
    ///
    /// # Errors
    ///
    /// Returns `DateError::Overflow` if the result leaves the supported
    /// calendar range.
    pub fn add_to(&self, date: Date) -> Result<Date, DateError> {
        let inner = date.into_inner();
        let shifted = match self.unit {
            TenorUnit::Days => inner.checked_add_days(chrono::Days::new(self.n as u64)),
            TenorUnit::Weeks => inner.checked_add_days(chrono::Days::new(7 * self.n as u64)),
            TenorUnit::Months => inner.checked_add_months(chrono::Months::new(self.n)),
            TenorUnit::Years => inner.checked_add_months(chrono::Months::new(12 * self.n)),
        };
        shifted.map(Date).ok_or_else(|| DateError::Overflow {
            tenor: self.to_string(),
        })
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.n, self.unit.code())
    }
}

impl FromStr for Tenor {
    type Err = DateError;

    /// Parses a tenor label such as "1M", "2W" or "10Y" (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unit = match s.chars().last() {
            Some('d') | Some('D') => TenorUnit::Days,
            Some('w') | Some('W') => TenorUnit::Weeks,
            Some('m') | Some('M') => TenorUnit::Months,
            Some('y') | Some('Y') => TenorUnit::Years,
            _ => {
                return Err(DateError::ParseError(format!("Unknown tenor: {}", s)));
            }
        };
        let n: u32 = s[..s.len() - 1]
            .parse()
            .map_err(|_| DateError::ParseError(format!("Unknown tenor: {}", s)))?;
        Ok(Tenor { n, unit })
    }
}
