//! Interpolator trait definition.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation over a fixed grid of (x, y) knots.
///
/// Implementations are constructed from an immutable grid sorted by x with
/// unique x-coordinates, and never mutate state on evaluation.
///
/// # Contract
///
/// - `interpolate(x)` returns the interpolated value for `x`; evaluating at
///   a knot returns the stored y-value exactly.
/// - Queries outside `domain()` flat-extrapolate to the nearest boundary
///   value. Extending the boundary segment linearly instead would be
///   numerically unstable at curve edges, so the boundary value is held
///   constant.
/// - Determinism: identical inputs produce bit-identical outputs.
pub trait Interpolator<T: Float> {
    /// Interpolates the value at point `x`.
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Returns the grid span as `(x_min, x_max)`.
    fn domain(&self) -> (T, T);
}
