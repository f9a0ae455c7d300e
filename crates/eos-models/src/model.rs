//! Equation-of-state capability trait.

use crate::error::{EosError, EosResult};
use crate::kind::EosKind;
use crate::params::{EosParams, RawParams, Validated, keys};
use eos_core::units::{
    Density, MolarHeatCapacity, MolarVolume, Pressure, Temperature, ThermalExpansivity,
    kg_per_m3,
};

/// All properties of one (P, T) state, computed together.
#[derive(Clone, Debug)]
pub struct EosPropertyPack {
    /// Pressure [Pa]
    pub pressure: Pressure,

    /// Temperature [K]
    pub temperature: Temperature,

    /// Molar volume [m³/mol]
    pub volume: MolarVolume,

    /// Isothermal bulk modulus K_T [Pa]
    pub isothermal_bulk_modulus: Pressure,

    /// Adiabatic bulk modulus K_S [Pa]
    pub adiabatic_bulk_modulus: Pressure,

    /// Shear modulus G [Pa]
    pub shear_modulus: Pressure,

    /// Isochoric heat capacity [J/(K·mol)]
    pub heat_capacity_v: MolarHeatCapacity,

    /// Isobaric heat capacity [J/(K·mol)]
    pub heat_capacity_p: MolarHeatCapacity,

    /// Thermal expansivity [1/K]
    pub thermal_expansivity: ThermalExpansivity,

    /// Grueneisen parameter (dimensionless)
    pub grueneisen_parameter: f64,
}

impl EosPropertyPack {
    /// Return a summary string of all contained properties (for debugging).
    pub fn summary(&self) -> String {
        format!(
            "Pack(P={:.4e}Pa,T={:.1}K,V={:.6e}m³/mol,K_T={:.4e}Pa,K_S={:.4e}Pa,G={:.3e}Pa,Cv={:.3e},Cp={:.3e},α={:.3e},γ={:.3})",
            self.pressure.value,
            self.temperature.value,
            self.volume,
            self.isothermal_bulk_modulus.value,
            self.adiabatic_bulk_modulus.value,
            self.shear_modulus.value,
            self.heat_capacity_v,
            self.heat_capacity_p,
            self.thermal_expansivity,
            self.grueneisen_parameter
        )
    }
}

/// Trait for equation-of-state models.
///
/// Every variant answers the same set of property queries, either from
/// `(pressure, temperature)` or `(temperature, volume)`, so a material can
/// dispatch without knowing which model it holds. Variants without thermal
/// physics still answer the thermal queries with fixed values.
///
/// Implementations must be thread-safe (Send + Sync); queries take the
/// parameter record by shared reference and keep no state between calls.
pub trait EquationOfState: Send + Sync {
    /// Typed parameter record for this model.
    type Params: EosParams;

    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Registry tag of this model.
    fn kind(&self) -> EosKind;

    /// Check a raw parameter set, inserting defaults for optional keys.
    ///
    /// Fails only if a required key is absent; out-of-range values are
    /// reported as warnings in the returned [`Validated`].
    fn validate_parameters(&self, raw: &mut RawParams) -> EosResult<Validated<Self::Params>>;

    /// Molar volume [m³/mol] at the given pressure and temperature.
    fn volume(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        params: &Self::Params,
    ) -> EosResult<MolarVolume>;

    /// Pressure [Pa] at the given temperature and molar volume.
    fn pressure(
        &self,
        temperature: Temperature,
        volume: MolarVolume,
        params: &Self::Params,
    ) -> EosResult<Pressure>;

    /// Isothermal bulk modulus K_T [Pa].
    fn isothermal_bulk_modulus(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        volume: MolarVolume,
        params: &Self::Params,
    ) -> EosResult<Pressure>;

    /// Adiabatic bulk modulus K_S [Pa].
    fn adiabatic_bulk_modulus(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        volume: MolarVolume,
        params: &Self::Params,
    ) -> EosResult<Pressure>;

    /// Shear modulus G [Pa].
    fn shear_modulus(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        volume: MolarVolume,
        params: &Self::Params,
    ) -> EosResult<Pressure>;

    /// Isochoric molar heat capacity [J/(K·mol)].
    fn heat_capacity_v(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        volume: MolarVolume,
        params: &Self::Params,
    ) -> EosResult<MolarHeatCapacity>;

    /// Isobaric molar heat capacity [J/(K·mol)].
    fn heat_capacity_p(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        volume: MolarVolume,
        params: &Self::Params,
    ) -> EosResult<MolarHeatCapacity>;

    /// Volumetric thermal expansivity [1/K].
    fn thermal_expansivity(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        volume: MolarVolume,
        params: &Self::Params,
    ) -> EosResult<ThermalExpansivity>;

    /// Grueneisen parameter (dimensionless).
    fn grueneisen_parameter(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        volume: MolarVolume,
        params: &Self::Params,
    ) -> EosResult<f64>;

    /// Density [kg/m³] from molar volume; needs `molar_mass` in the parameters.
    fn density(&self, volume: MolarVolume, params: &Self::Params) -> EosResult<Density> {
        let molar_mass = params.molar_mass().ok_or(EosError::MissingParameter {
            name: keys::MOLAR_MASS,
        })?;
        if !volume.is_finite() || volume <= 0.0 {
            return Err(EosError::NonPhysical {
                what: "molar volume must be positive and finite",
            });
        }
        Ok(kg_per_m3(molar_mass / volume))
    }

    /// Compute every property at (P, T) in one call.
    ///
    /// Default implementation calls the individual queries; models that share
    /// an expensive intermediate between queries override it.
    fn property_pack(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        params: &Self::Params,
    ) -> EosResult<EosPropertyPack> {
        let volume = self.volume(pressure, temperature, params)?;
        Ok(EosPropertyPack {
            pressure,
            temperature,
            volume,
            isothermal_bulk_modulus: self
                .isothermal_bulk_modulus(pressure, temperature, volume, params)?,
            adiabatic_bulk_modulus: self
                .adiabatic_bulk_modulus(pressure, temperature, volume, params)?,
            shear_modulus: self.shear_modulus(pressure, temperature, volume, params)?,
            heat_capacity_v: self.heat_capacity_v(pressure, temperature, volume, params)?,
            heat_capacity_p: self.heat_capacity_p(pressure, temperature, volume, params)?,
            thermal_expansivity: self
                .thermal_expansivity(pressure, temperature, volume, params)?,
            grueneisen_parameter: self
                .grueneisen_parameter(pressure, temperature, volume, params)?,
        })
    }
}
