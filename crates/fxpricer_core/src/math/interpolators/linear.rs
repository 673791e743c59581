//! Piecewise linear interpolation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator with flat extrapolation.
///
/// Stores (x, y) knots sorted by x and interpolates linearly between
/// adjacent knots. Outside the grid span the nearest boundary value is
/// returned unchanged.
///
/// # Construction
///
/// Knots are sorted by x-coordinate during construction. At least two
/// knots with distinct x-coordinates are required.
///
/// # Example
///
/// ```
/// use fxpricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let xs = [0.0, 1.0, 2.0];
/// let ys = [0.0, 2.0, 4.0];
///
/// let interp = LinearInterpolator::new(&xs, &ys).unwrap();
/// assert!((interp.interpolate(1.5).unwrap() - 3.0).abs() < 1e-12);
///
/// // Flat extrapolation beyond the grid.
/// assert_eq!(interp.interpolate(-1.0).unwrap(), 0.0);
/// assert_eq!(interp.interpolate(5.0).unwrap(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    /// Sorted x-coordinates
    xs: Vec<T>,
    /// y-values in sorted x order
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Constructs a linear interpolator from x and y knots.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::InvalidInput` - mismatched slice lengths
    /// * `InterpolationError::DegenerateGrid` - fewer than 2 knots
    /// * `InterpolationError::DuplicateKnot` - two knots share an
    ///   x-coordinate
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.len() < 2 {
            return Err(InterpolationError::DegenerateGrid {
                got: xs.len(),
                need: 2,
            });
        }

        let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        for window in pairs.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(InterpolationError::DuplicateKnot {
                    x: window[0].0.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        let (sorted_xs, sorted_ys): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();

        Ok(Self {
            xs: sorted_xs,
            ys: sorted_ys,
        })
    }

    /// Returns the sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns the y-values in sorted x order.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the number of knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns true if the interpolator has no knots. Never true for a
    /// successfully constructed interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Finds the segment index `i` with `xs[i] <= x < xs[i+1]`, clamped to
    /// the valid segment range.
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    /// Interpolates the value at `x`.
    ///
    /// Inside the grid the standard two-point formula applies:
    ///
    /// ```text
    /// y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    /// ```
    ///
    /// Outside the grid the nearest boundary y-value is returned (flat
    /// extrapolation).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let n = self.xs.len();

        // Flat extrapolation at both ends.
        if x <= self.xs[0] {
            return Ok(self.ys[0]);
        }
        if x >= self.xs[n - 1] {
            return Ok(self.ys[n - 1]);
        }

        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        let t = (x - x0) / (x1 - x0);
        Ok(y0 + (y1 - y0) * t)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
