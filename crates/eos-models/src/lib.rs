//! eos-models: equation-of-state models for solid materials.
//!
//! Provides:
//! - `EquationOfState` trait: the property queries every model answers
//! - Reciprocal K' model (`RKprime`) and its PoverK root solves
//! - Parameter maps, typed records, and validation diagnostics
//! - Unit-aware text input, property sweeps, material files
//!
//! # Example
//!
//! ```
//! use eos_models::{EquationOfState, RKprime, RawParams};
//! use eos_core::units::{gpa, k};
//!
//! let eos = RKprime::new();
//! let mut raw: RawParams = [
//!     ("V_0", 1.1244e-5),
//!     ("K_0", 1.61e11),
//!     ("Kprime_0", 3.9),
//!     ("Kprime_inf", 2.4),
//! ]
//! .into_iter()
//! .collect();
//!
//! let validated = eos.validate_parameters(&mut raw).unwrap();
//! let v = eos.volume(gpa(25.0), k(300.0), &validated.params).unwrap();
//! assert!(v < 1.1244e-5);
//! ```

pub mod error;
pub mod kind;
pub mod material;
pub mod model;
pub mod params;
pub mod rkprime;
pub mod sweep_executor;
pub mod sweeps;
pub mod units;

// Re-exports for ergonomics
pub use error::{EosError, EosResult};
pub use kind::EosKind;
pub use material::{LoadedMaterial, MaterialFile, load_material, save_material};
pub use model::{EosPropertyPack, EquationOfState};
pub use params::{EosParams, ParamWarning, RawParams, Validated, keys};
pub use rkprime::{
    HEAT_CAPACITY_SENTINEL, KPRIME_INF_MIN, RKprime, RKprimeParams, bulk_modulus,
    delta_poverk_from_p, delta_poverk_from_v, poverk_from_p, poverk_from_v, shear_modulus,
};
pub use sweep_executor::{
    PointFailure, SweepError, SweepResult, execute_pressure_sweep, execute_volume_sweep,
};
pub use sweeps::{SweepDefinition, SweepDefinitionError, SweepType};
pub use units::{Quantity, UnitError, parse_quantity};
