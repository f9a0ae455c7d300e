//! eos-core: shared foundation for the equation-of-state workspace.
//!
//! Contains:
//! - units (uom SI types + constructors, molar quantities as plain `f64`)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
