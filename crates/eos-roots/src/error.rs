//! Error types for root finding.

use thiserror::Error;

/// Errors that can occur while locating a bracketed root.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RootError {
    #[error("Invalid bracket [{a}, {b}]")]
    InvalidBracket { a: f64, b: f64 },

    #[error("f(a) and f(b) must have different signs: f({a}) = {fa}, f({b}) = {fb}")]
    NoSignChange { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("Residual is not a number at x = {x}: {value}")]
    NonFiniteResidual { x: f64, value: f64 },

    #[error("Convergence failed after {iterations} iterations (x = {x}, bracket width = {width})")]
    ConvergenceFailed {
        iterations: usize,
        x: f64,
        width: f64,
    },
}

pub type RootResult<T> = Result<T, RootError>;
