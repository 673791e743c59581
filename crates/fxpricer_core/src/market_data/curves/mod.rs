//! Discounting curve implementations.

mod discount;

pub use discount::{df_to_rate, rate_to_df, CurveInterpolation, DiscountingCurve};
