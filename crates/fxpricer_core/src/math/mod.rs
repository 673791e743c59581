//! Numerical building blocks.
//!
//! Currently this module holds the one-dimensional interpolation machinery
//! used by the discounting curves.

pub mod interpolators;
