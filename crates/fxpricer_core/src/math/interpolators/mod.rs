//! One-dimensional interpolation over unequal grids.
//!
//! All interpolators implement the [`Interpolator`] trait:
//! - `interpolate(x: T) -> Result<T, InterpolationError>`: compute the value
//! - `domain() -> (T, T)`: the grid span
//!
//! The grid is fixed and sorted at construction; evaluation is a pure
//! function of the stored knots, so identical inputs always produce
//! bit-identical output.
//!
//! # Example
//!
//! ```
//! use fxpricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
//! assert_eq!(interp.domain(), (0.0, 2.0));
//!
//! let y = interp.interpolate(0.5).unwrap();
//! assert!((y - 2.0).abs() < 1e-12);
//! ```

mod linear;
mod traits;

pub use linear::LinearInterpolator;
pub use traits::Interpolator;
