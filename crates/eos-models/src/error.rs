//! Equation-of-state errors.

use eos_core::CoreError;
use eos_roots::RootError;
use thiserror::Error;

/// Result type for equation-of-state operations.
pub type EosResult<T> = Result<T, EosError>;

/// Errors that can occur while validating parameters or evaluating a model.
#[derive(Error, Debug)]
pub enum EosError {
    /// A required parameter is absent from the parameter set.
    #[error("params object missing parameter : {name}")]
    MissingParameter { name: &'static str },

    /// Non-physical input or result (non-positive volume, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Model name in a parameter file is not recognised.
    #[error("Unknown equation of state: {name}")]
    UnknownModel { name: String },

    /// The PoverK root could not be bracketed or did not converge.
    #[error("Root finding failed: {0}")]
    Root(#[from] RootError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
