//! Scalar helpers shared across the workspace
//!
//! All containers in this workspace specialise on single-precision complex
//! numbers. Comparisons are tolerance-based throughout; the default
//! tolerance matches the one the gate layer uses for qubit normalisation.

use num_complex::Complex32;

/// Default tolerance for approximate comparisons.
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// Returns true if `a` and `b` differ by less than [`DEFAULT_TOLERANCE`]
/// in magnitude.
///
/// # Examples
///
/// ```
/// use qusim2_core::approx_equal;
/// use num_complex::Complex32;
///
/// assert!(approx_equal(Complex32::new(1.0, 0.0), Complex32::new(1.0, 1e-7)));
/// assert!(!approx_equal(Complex32::new(1.0, 0.0), Complex32::new(0.0, 0.0)));
/// ```
pub fn approx_equal(a: Complex32, b: Complex32) -> bool {
    approx_equal_tol(a, b, DEFAULT_TOLERANCE)
}

/// Returns true if `a` and `b` differ by less than `tol` in magnitude.
pub fn approx_equal_tol(a: Complex32, b: Complex32, tol: f32) -> bool {
    (a - b).norm() < tol
}

/// Squared norm of an amplitude pair, |a|^2 + |b|^2.
pub fn norm_sq(a: Complex32, b: Complex32) -> f32 {
    a.norm_sqr() + b.norm_sqr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_approx_equal_within_tolerance() {
        let a = Complex32::new(0.5, -0.5);
        let b = Complex32::new(0.5 + 1e-6, -0.5 - 1e-6);
        assert!(approx_equal(a, b));
    }

    #[test]
    fn test_approx_equal_outside_tolerance() {
        let a = Complex32::new(0.5, 0.0);
        let b = Complex32::new(0.5 + 1e-3, 0.0);
        assert!(!approx_equal(a, b));
    }

    #[test]
    fn test_approx_equal_custom_tolerance() {
        let a = Complex32::new(1.0, 0.0);
        let b = Complex32::new(1.05, 0.0);
        assert!(approx_equal_tol(a, b, 0.1));
        assert!(!approx_equal_tol(a, b, 0.01));
    }

    #[test]
    fn test_norm_sq_unit() {
        let h = std::f32::consts::FRAC_1_SQRT_2;
        let n = norm_sq(Complex32::new(h, 0.0), Complex32::new(0.0, h));
        assert_relative_eq!(n, 1.0, epsilon = 1e-6);
    }
}
