//! Standard normal distribution functions.
//!
//! `norm_cdf` and `norm_pdf` are generic over `T: Float`; `norm_inv_cdf`
//! is f64-only and is used at quote-normalisation boundaries (delta to
//! strike conversion), never inside a pricing loop.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function via the Abramowitz and Stegun 7.1.26
/// rational approximation (maximum absolute error 1.5e-7).
///
/// Uses Horner evaluation of the polynomial and the reflection
/// erfc(-x) = 2 - erfc(x), so that Phi(x) + Phi(-x) cancels exactly in
/// floating point.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let two = T::from(2.0).unwrap();

    let abs_x = x.abs();

    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    if x < T::zero() {
        two - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Phi(x) = erfc(-x / sqrt(2)) / 2.
///
/// # Examples
///
/// ```
/// use fxpricer_models::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-12);
/// assert!((norm_cdf(1.0_f64) - 0.8413447).abs() < 1e-6);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    let sqrt_2 = T::from(std::f64::consts::SQRT_2).unwrap();
    half * erfc_approx(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// # Examples
///
/// ```
/// use fxpricer_models::analytical::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804014327).abs() < 1e-15);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();
    frac * (-half * x * x).exp()
}

/// Inverse standard normal cumulative distribution function.
///
/// Acklam's rational approximation with separate central and tail
/// expansions (relative error below 1.15e-9 over the open unit interval).
/// Returns the signed infinities at p = 0 and p = 1 and NaN outside [0, 1].
///
/// # Examples
///
/// ```
/// use fxpricer_models::analytical::{norm_cdf, norm_inv_cdf};
///
/// let x = norm_inv_cdf(0.25);
/// assert!((norm_cdf(x) - 0.25).abs() < 1e-6);
/// ```
pub fn norm_inv_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Reference values from Abramowitz & Stegun Table 26.1
    const CDF_REFERENCE: &[(f64, f64)] = &[
        (-3.0, 0.0013498980316300946),
        (-2.0, 0.02275013194817921),
        (-1.0, 0.15865525393145702),
        (-0.5, 0.30853753872598690),
        (0.0, 0.5),
        (0.5, 0.69146246127401310),
        (1.0, 0.84134474606854298),
        (2.0, 0.97724986805182079),
        (3.0, 0.99865010196837),
    ];

    #[test]
    fn test_norm_cdf_reference_values() {
        for &(x, expected) in CDF_REFERENCE {
            let got = norm_cdf(x);
            assert!(
                (got - expected).abs() < 2e-7,
                "x={} expected={} got={}",
                x,
                expected,
                got
            );
        }
    }

    #[test]
    fn test_norm_cdf_symmetry_is_exact() {
        // The reflection branch makes Phi(x) + Phi(-x) cancel exactly,
        // which put-call parity relies on.
        for i in 0..=60 {
            let x = i as f64 / 10.0;
            assert_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, "x = {}", x);
        }
    }

    #[test]
    fn test_norm_cdf_monotone() {
        let mut prev = norm_cdf(-8.0);
        for i in -79..=80 {
            let x = i as f64 / 10.0;
            let cur = norm_cdf(x);
            assert!(cur >= prev);
            prev = cur;
        }
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(1.0_f64), 0.24197072451914337, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(2.0_f64), 0.05399096651318806, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_pdf_symmetry() {
        for x in [0.5_f64, 1.0, 1.5, 2.0, 3.0] {
            assert_relative_eq!(norm_pdf(x), norm_pdf(-x), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_inv_cdf_known_values() {
        assert_relative_eq!(norm_inv_cdf(0.5), 0.0, epsilon = 1e-9);
        assert_relative_eq!(norm_inv_cdf(0.975), 1.959963984540054, epsilon = 1e-8);
        assert_relative_eq!(norm_inv_cdf(0.025), -1.959963984540054, epsilon = 1e-8);
        assert_relative_eq!(norm_inv_cdf(0.25), -0.6744897501960817, epsilon = 1e-8);
    }

    #[test]
    fn test_norm_inv_cdf_edges() {
        assert_eq!(norm_inv_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(norm_inv_cdf(1.0), f64::INFINITY);
        assert!(norm_inv_cdf(-0.1).is_nan());
        assert!(norm_inv_cdf(1.1).is_nan());
        assert!(norm_inv_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_inv_cdf_round_trips_cdf() {
        for i in 1..100 {
            let p = i as f64 / 100.0;
            let x = norm_inv_cdf(p);
            assert!(
                (norm_cdf(x) - p).abs() < 5e-7,
                "p={} x={} cdf={}",
                p,
                x,
                norm_cdf(x)
            );
        }
    }

    #[test]
    fn test_cdf_pdf_relationship() {
        // Numerical derivative of the CDF approximates the PDF.
        let h = 1e-4;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let numerical = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical, norm_pdf(x), epsilon = 1e-4);
        }
    }

    #[test]
    fn test_f32_compatibility() {
        let result = norm_cdf(0.0_f32);
        assert!((result - 0.5).abs() < 1e-6);
        let result = norm_pdf(0.0_f32);
        assert!((result - 0.398_942_3).abs() < 1e-5);
    }
}
