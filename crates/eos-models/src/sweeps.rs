//! Property sweep generation.
//!
//! Supports parametric sweeps across pressure or molar volume. Used to build
//! compression curves and property tables.

use crate::units::{Quantity, UnitError, parse_quantity};
use std::fmt;
use thiserror::Error;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepType {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Rejected sweep definition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepDefinitionError {
    #[error("Start value error: {0}")]
    Start(UnitError),
    #[error("End value error: {0}")]
    End(UnitError),
    #[error("Sweep must have at least 2 points")]
    TooFewPoints,
    #[error("Start and end values must be different")]
    EmptyRange,
}

/// Definition of a single parameter sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    /// Quantity being swept
    pub quantity: Quantity,
    /// Start value in canonical SI units
    pub start_si: f64,
    /// End value in canonical SI units
    pub end_si: f64,
    /// Number of points to generate
    pub num_points: usize,
    /// Spacing type
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    /// Create a sweep from SI bounds.
    pub fn new(
        quantity: Quantity,
        start_si: f64,
        end_si: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> Result<Self, SweepDefinitionError> {
        if num_points < 2 {
            return Err(SweepDefinitionError::TooFewPoints);
        }

        if (start_si - end_si).abs() <= 1e-12 * start_si.abs().max(end_si.abs()) {
            return Err(SweepDefinitionError::EmptyRange);
        }

        Ok(Self {
            quantity,
            start_si,
            end_si,
            num_points,
            sweep_type,
        })
    }

    /// Create a sweep from user text inputs such as `"0 GPa"` and `"100 GPa"`.
    pub fn from_text(
        start_raw: &str,
        end_raw: &str,
        quantity: Quantity,
        num_points: usize,
        sweep_type: SweepType,
    ) -> Result<Self, SweepDefinitionError> {
        let start_si =
            parse_quantity(start_raw, quantity).map_err(SweepDefinitionError::Start)?;
        let end_si = parse_quantity(end_raw, quantity).map_err(SweepDefinitionError::End)?;
        Self::new(quantity, start_si, end_si, num_points, sweep_type)
    }

    /// Generate all points in the sweep.
    pub fn generate_points(&self) -> Vec<f64> {
        match self.sweep_type {
            SweepType::Linear => self.generate_linear(),
            SweepType::Logarithmic => self.generate_logarithmic(),
        }
    }

    fn generate_linear(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start_si];
        }

        let delta = (self.end_si - self.start_si) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start_si + i as f64 * delta)
            .collect();

        // Ensure exact endpoint
        points[self.num_points - 1] = self.end_si;
        points
    }

    fn generate_logarithmic(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start_si];
        }

        // Log spacing needs positive bounds; zero-pressure starts fall back to linear
        if self.start_si <= 0.0 || self.end_si <= 0.0 {
            return self.generate_linear();
        }

        let log_start = self.start_si.ln();
        let log_delta = (self.end_si.ln() - log_start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| (log_start + i as f64 * log_delta).exp())
            .collect();

        points[self.num_points - 1] = self.end_si;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} from {:e} to {:e} ({} points, {})",
            self.quantity, self.start_si, self.end_si, self.num_points, self.sweep_type
        )
    }
}
