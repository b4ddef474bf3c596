//! # Interpolation Math
//!
//! Scalar helpers shared by the parameter interpolator.

/// Clamps a blend factor into `[0, 1]`. NaN is treated as 0.
pub fn clamp_unit(factor: f64) -> f64 {
    if factor.is_nan() {
        return 0.0;
    }
    factor.clamp(0.0, 1.0)
}

/// Linear interpolation from `a` (factor 0) to `b` (factor 1).
///
/// # Examples
///
/// ```
/// use deepdelve::utils::lerp;
///
/// assert_eq!(lerp(2.0, 12.0, 0.4), 6.0);
/// ```
pub fn lerp(a: f64, b: f64, factor: f64) -> f64 {
    a + (b - a) * factor
}

/// Linear interpolation between integers, rounded half to even.
///
/// Only the offset from `a` goes through floating point, so equal endpoints
/// come back unchanged however large they are.
pub fn lerp_rounded(a: i64, b: i64, factor: f64) -> i64 {
    let start = i128::from(a);
    let offset = (i128::from(b) - start) as f64 * factor;

    let whole = offset.floor();
    let mut step = whole as i128;
    let frac = offset - whole;
    if frac > 0.5 || (frac == 0.5 && (start + step).rem_euclid(2) == 1) {
        step += 1;
    }

    (start + step).clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
