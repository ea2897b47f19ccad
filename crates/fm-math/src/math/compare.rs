//! Floating point comparison helpers.

/// Default tolerance for comparing merged quantities.
pub const DEFAULT_TOL: f64 = 1e-9;

/// Approximate equality with an absolute floor and a relative scale.
///
/// NaN equals NaN; infinities are equal only with the same sign.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

/// Element-wise [`approx_eq`] over equal-length slices.
pub fn approx_eq_slice(a: &[f64], b: &[f64], tol: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| approx_eq(*x, *y, tol))
}

/// True when every value is at least the one before it.
pub fn is_non_decreasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_tolerance_scales() {
        assert!(approx_eq(4_000_000.0, 4_000_000.001, 1e-9));
        assert!(!approx_eq(1.0, 1.001, 1e-9));
    }

    #[test]
    fn special_values() {
        assert!(approx_eq(f64::NAN, f64::NAN, DEFAULT_TOL));
        assert!(!approx_eq(f64::NAN, 0.0, DEFAULT_TOL));
        assert!(approx_eq(f64::INFINITY, f64::INFINITY, DEFAULT_TOL));
        assert!(!approx_eq(f64::INFINITY, f64::NEG_INFINITY, DEFAULT_TOL));
    }

    #[test]
    fn slices() {
        assert!(approx_eq_slice(&[0.34, 0.22], &[0.34, 0.22 + 1e-15], DEFAULT_TOL));
        assert!(!approx_eq_slice(&[0.34], &[0.34, 0.22], DEFAULT_TOL));
    }

    #[test]
    fn monotonic() {
        assert!(is_non_decreasing(&[0.0, 0.0, 1.0]));
        assert!(!is_non_decreasing(&[1.0, 0.0]));
        assert!(is_non_decreasing(&[]));
    }
}
