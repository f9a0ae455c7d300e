use crate::{CoreError, CoreResult};

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Purely relative comparison (abs = 0).
    pub const fn relative(rel: Real) -> Self {
        Self { abs: 0.0, rel }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Relative error of `actual` against a nonzero `expected`.
pub fn relative_error(actual: Real, expected: Real) -> Real {
    ((actual - expected) / expected).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn relative_only_ignores_abs_floor() {
        let tol = Tolerances::relative(1e-6);
        assert!(nearly_equal(1.6e11, 1.6e11 * (1.0 + 1e-7), tol));
        assert!(!nearly_equal(1e-20, 2e-20, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn relative_error_scale_free() {
        assert!((relative_error(101.0, 100.0) - 0.01).abs() < 1e-12);
        assert!((relative_error(1.01e-5, 1e-5) - 0.01).abs() < 1e-9);
    }
}
