// eos-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

/// Molar volume [m³/mol].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type MolarVolume = f64;

/// Molar heat capacity [J/(K·mol)].
pub type MolarHeatCapacity = f64;

/// Volumetric thermal expansivity [1/K].
pub type ThermalExpansivity = f64;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn gpa(v: f64) -> Pressure {
    use uom::si::pressure::gigapascal;
    Pressure::new::<gigapascal>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

pub mod constants {
    use super::*;

    /// Reference temperature used when a caller has no better choice [K].
    pub const T_REF_K: f64 = 300.0;

    #[inline]
    pub fn t_ref() -> Temperature {
        k(T_REF_K)
    }
}
