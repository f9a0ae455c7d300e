//! Root solver configuration.

use std::fmt;

/// Bracketed method used to locate the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootMethod {
    /// Brent's method: inverse quadratic / secant steps with bisection fallback
    #[default]
    Brent,
    /// Plain interval halving
    Bisection,
}

impl fmt::Display for RootMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brent => write!(f, "brent"),
            Self::Bisection => write!(f, "bisection"),
        }
    }
}

/// Root solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootConfig {
    /// Bracketing method
    pub method: RootMethod,
    /// Absolute tolerance on the root location
    pub xtol: f64,
    /// Relative tolerance on the root location
    pub rtol: f64,
    /// Maximum iterations
    pub max_iterations: usize,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            method: RootMethod::Brent,
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iterations: 100,
        }
    }
}

impl RootConfig {
    /// Default tolerances with a different method.
    pub fn with_method(method: RootMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Half-width below which an iterate at `x` counts as converged.
    pub(crate) fn half_tolerance(&self, x: f64) -> f64 {
        0.5 * (self.xtol + self.rtol * x.abs())
    }
}
