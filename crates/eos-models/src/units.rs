//! Unit-aware numeric input.
//!
//! Text such as `"25 GPa"` or `"11.24 cm^3/mol"` is parsed into a canonical SI
//! value for one [`Quantity`] family. A bare number is taken as already SI.

use std::fmt;
use thiserror::Error;

/// Dimension/quantity family for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Pressure (canonical: Pa); negative values allowed
    Pressure,
    /// Temperature (canonical: Kelvin)
    Temperature,
    /// Molar volume (canonical: m³/mol)
    MolarVolume,
    /// Dimensionless (canonical: as-is, but may include %)
    Dimensionless,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressure => write!(f, "Pressure"),
            Self::Temperature => write!(f, "Temperature"),
            Self::MolarVolume => write!(f, "Molar Volume"),
            Self::Dimensionless => write!(f, "Dimensionless"),
        }
    }
}

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Unit not recognized for this quantity
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },
    /// Value out of physical range (e.g., negative absolute temperature)
    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },
}

/// Parse a quantity value from user input text into canonical SI units.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let trimmed = raw_text.trim();

    match quantity {
        Quantity::Pressure => parse_pressure(trimmed),
        Quantity::Temperature => parse_temperature(trimmed),
        Quantity::MolarVolume => parse_molar_volume(trimmed),
        Quantity::Dimensionless => parse_dimensionless(trimmed),
    }
}

/// Parse pressure in various units, return Pa.
fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let pa = match unit.to_lowercase().as_str() {
        "pa" | "pascal" => value,
        "kpa" => value * 1e3,
        "mpa" => value * 1e6,
        "gpa" => value * 1e9,
        "tpa" => value * 1e12,
        "bar" => value * 1e5,
        "kbar" => value * 1e8,
        "megabar" => value * 1e11,
        "atm" => value * 101_325.0,
        "" => value,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Pressure,
            });
        }
    };

    Ok(pa)
}

/// Parse temperature in various units, return Kelvin.
fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let kelvin = match unit.to_lowercase().as_str() {
        "k" | "kelvin" => value,
        "c" | "°c" | "celsius" => value + 273.15,
        "f" | "°f" | "fahrenheit" => (value + 459.67) * 5.0 / 9.0,
        "" => value,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Temperature,
            });
        }
    };

    if kelvin <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: kelvin,
            reason: "Absolute temperature must be > 0 K",
        });
    }

    Ok(kelvin)
}

/// Parse molar volume, return m³/mol.
fn parse_molar_volume(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let m3_per_mol = match unit.to_lowercase().as_str() {
        "m^3/mol" | "m³/mol" | "m3/mol" => value,
        "cm^3/mol" | "cm³/mol" | "cm3/mol" | "cc/mol" => value * 1e-6,
        "" => value,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::MolarVolume,
            });
        }
    };

    if m3_per_mol <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: m3_per_mol,
            reason: "Molar volume must be positive",
        });
    }

    Ok(m3_per_mol)
}

/// Parse dimensionless, accepting plain numbers or percent.
fn parse_dimensionless(input: &str) -> Result<f64, UnitError> {
    let parse = |s: &str| {
        s.trim().parse::<f64>().map_err(|_| {
            UnitError::ParseError(format!(
                "Could not parse dimensionless value from '{}'",
                input
            ))
        })
    };
    match input.strip_suffix('%') {
        Some(num) => Ok(parse(num)? / 100.0),
        None => parse(input),
    }
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// Examples:
/// - "25GPa" -> (25.0, "GPa")
/// - "1.5e-5 m^3/mol" -> (1.5e-5, "m^3/mol")
/// - "300" -> (300.0, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    // The exponent marker only counts when a digit or sign follows it
    let bytes = trimmed.as_bytes();
    let split_idx = trimmed
        .char_indices()
        .find(|&(i, c)| match c {
            '0'..='9' | '.' | '-' | '+' => false,
            'e' | 'E' => !matches!(
                bytes.get(i + 1),
                Some(b'0'..=b'9') | Some(b'-') | Some(b'+')
            ),
            _ => true,
        })
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);

    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
    })?;

    Ok((value, unit_part.trim().to_string()))
}
