use eos_models::{EosError, SweepDefinitionError, SweepError, UnitError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Material error: {0}")]
    Material(#[from] EosError),

    #[error("Invalid input: {0}")]
    Input(#[from] UnitError),

    #[error("Invalid sweep: {0}")]
    SweepDefinition(#[from] SweepDefinitionError),

    #[error("Sweep failed: {0}")]
    Sweep(#[from] SweepError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
