//! Bracketed scalar root finding.
//!
//! Every solver here works on a continuous `f(x)` over a bracket `[a, b]`
//! whose end values differ in sign. Iterates never leave the bracket, so a
//! residual that is undefined beyond one end can be bracketed right up to
//! (but not across) that end.

pub mod bracket;
pub mod config;
pub mod error;

pub use bracket::{RootSolution, bisect, brentq, solve_bracketed};
pub use config::{RootConfig, RootMethod};
pub use error::{RootError, RootResult};
