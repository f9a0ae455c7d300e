//! Sweep execution for generating equation-of-state data across a range.
//!
//! Every point is an independent query (nothing is carried from one point to
//! the next), so points are evaluated in parallel. A failing point is recorded
//! and the rest of the sweep still runs.

use crate::model::{EosPropertyPack, EquationOfState};
use crate::sweeps::SweepDefinition;
use crate::units::Quantity;
use eos_core::units::Temperature;
use rayon::prelude::*;
use thiserror::Error;

/// Error in sweep execution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    /// Sweep definition does not match the executor
    #[error("Invalid configuration: sweep must be over {expected}, got {actual}")]
    WrongQuantity { expected: Quantity, actual: Quantity },
    /// No point produced a result
    #[error("All {failed} sweep points failed")]
    AllPointsFailed { failed: usize },
}

/// Failure at one sweep point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFailure {
    pub point_index: usize,
    pub independent_value: f64,
    pub error: String,
}

/// Result of an equation-of-state sweep.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Model that produced the data
    pub model: String,
    /// Quantity that was swept
    pub quantity: Quantity,
    /// Independent variable values (the sweep parameter)
    pub independent_values: Vec<f64>,
    /// Computed states (None for failed points)
    pub states: Vec<Option<EosPropertyPack>>,
    /// Why each failed point failed
    pub failures: Vec<PointFailure>,
    /// Number of successful computations
    pub num_successful: usize,
    /// Number of failed computations
    pub num_failed: usize,
}

impl SweepResult {
    fn from_outcomes<E: ToString>(
        model: &str,
        quantity: Quantity,
        independent_values: Vec<f64>,
        outcomes: Vec<Result<EosPropertyPack, E>>,
    ) -> Result<Self, SweepError> {
        let mut states = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();

        for (point_index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(pack) => states.push(Some(pack)),
                Err(e) => {
                    failures.push(PointFailure {
                        point_index,
                        independent_value: independent_values[point_index],
                        error: e.to_string(),
                    });
                    states.push(None);
                }
            }
        }

        let num_failed = failures.len();
        let num_successful = states.len() - num_failed;
        if num_successful == 0 {
            return Err(SweepError::AllPointsFailed { failed: num_failed });
        }

        tracing::debug!(
            model,
            %quantity,
            num_successful,
            num_failed,
            "sweep finished"
        );

        Ok(Self {
            model: model.to_string(),
            quantity,
            independent_values,
            states,
            failures,
            num_successful,
            num_failed,
        })
    }

    fn column(&self, f: impl Fn(&EosPropertyPack) -> f64) -> Vec<f64> {
        self.states.iter().flatten().map(f).collect()
    }

    /// Get pressure array (excluding failed points)
    pub fn pressure_pa(&self) -> Vec<f64> {
        self.column(|s| s.pressure.value)
    }

    /// Get molar volume array (excluding failed points)
    pub fn volume_m3_per_mol(&self) -> Vec<f64> {
        self.column(|s| s.volume)
    }

    /// Get isothermal bulk modulus array (excluding failed points)
    pub fn isothermal_bulk_modulus_pa(&self) -> Vec<f64> {
        self.column(|s| s.isothermal_bulk_modulus.value)
    }

    /// Get independent values corresponding to successful states
    pub fn successful_independent_values(&self) -> Vec<f64> {
        self.independent_values
            .iter()
            .zip(&self.states)
            .filter_map(|(val, state)| state.as_ref().map(|_| *val))
            .collect()
    }
}

fn check_quantity(sweep_def: &SweepDefinition, expected: Quantity) -> Result<(), SweepError> {
    if sweep_def.quantity != expected {
        return Err(SweepError::WrongQuantity {
            expected,
            actual: sweep_def.quantity,
        });
    }
    Ok(())
}

/// Execute a pressure sweep at fixed temperature.
pub fn execute_pressure_sweep<M: EquationOfState>(
    model: &M,
    params: &M::Params,
    sweep_def: &SweepDefinition,
    temperature: Temperature,
) -> Result<SweepResult, SweepError> {
    check_quantity(sweep_def, Quantity::Pressure)?;

    let pressures = sweep_def.generate_points();
    let outcomes: Vec<_> = pressures
        .par_iter()
        .map(|&p| model.property_pack(eos_core::units::pa(p), temperature, params))
        .collect();

    SweepResult::from_outcomes(model.name(), Quantity::Pressure, pressures, outcomes)
}

/// Execute a molar-volume sweep at fixed temperature.
///
/// Each volume is first inverted to a pressure; the property pack is then
/// evaluated at that pressure.
pub fn execute_volume_sweep<M: EquationOfState>(
    model: &M,
    params: &M::Params,
    sweep_def: &SweepDefinition,
    temperature: Temperature,
) -> Result<SweepResult, SweepError> {
    check_quantity(sweep_def, Quantity::MolarVolume)?;

    let volumes = sweep_def.generate_points();
    let outcomes: Vec<_> = volumes
        .par_iter()
        .map(|&v| {
            let p = model.pressure(temperature, v, params)?;
            model.property_pack(p, temperature, params)
        })
        .collect();

    SweepResult::from_outcomes(model.name(), Quantity::MolarVolume, volumes, outcomes)
}
