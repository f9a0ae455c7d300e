//! Isothermal reciprocal K' equation of state (Stacey & Davis, 2004).
//!
//! The model uses the fact that K' varies smoothly with P/K and tends to a
//! limit `Kprime_inf >= 5/3` at infinite pressure. Pressure and volume are
//! both linked to the ratio `PoverK = P / K(P)` through implicit equations:
//!
//! ```text
//! PoverK = (P / K_0) (1 - K'_inf PoverK)^(K'_0 / K'_inf)
//! ln(V / V_0) = (K'_0 / K'_inf^2) ln(1 - K'_inf PoverK) + (K'_0 / K'_inf - 1) PoverK
//! ```
//!
//! Every query solves one of these for `PoverK` with a bracketed root finder
//! on `(-1, 1/K'_inf)` and derives the requested quantity algebraically.
//! `PoverK` is never cached between queries.
//!
//! The model has no temperature dependence: heat capacities are reported as
//! [`HEAT_CAPACITY_SENTINEL`] and expansivity and the Grueneisen parameter as
//! zero. Shear behaviour is not modelled and the shear modulus is zero.

use crate::error::{EosError, EosResult};
use crate::kind::EosKind;
use crate::model::{EosPropertyPack, EquationOfState};
use crate::params::{EosParams, ParamWarning, RawParams, Validated, keys};
use eos_core::ensure_finite;
use eos_core::units::{
    MolarHeatCapacity, MolarVolume, Pressure, Temperature, ThermalExpansivity, pa,
};
use eos_roots::{RootConfig, solve_bracketed};

/// Heat capacity reported by models without thermal physics [J/(K·mol)].
pub const HEAT_CAPACITY_SENTINEL: f64 = 1.0e99;

/// Thermodynamic lower limit on K' at infinite pressure.
pub const KPRIME_INF_MIN: f64 = 5.0 / 3.0;

/// Lower end of the PoverK search bracket.
pub const POVERK_LOWER_BOUND: f64 = -1.0;

/// Parameters of the reciprocal K' model.
#[derive(Debug, Clone, PartialEq)]
pub struct RKprimeParams {
    /// Reference volume V_0 [m³/mol]
    pub v_0: f64,
    /// Reference isothermal bulk modulus K_0 [Pa]
    pub k_0: f64,
    /// dK/dP at the reference pressure
    pub kprime_0: f64,
    /// dK/dP in the limit P -> infinity
    pub kprime_inf: f64,
    /// Reference pressure [Pa]
    pub p_0: f64,
    /// Shear modulus [Pa]; carried but unused
    pub g_0: f64,
    /// dG/dP; carried but unused
    pub gprime_0: f64,
    /// Molar mass [kg/mol]
    pub molar_mass: Option<f64>,
}

impl RKprimeParams {
    /// Parameters with `P_0 = 0` and NaN shear terms.
    pub fn new(v_0: f64, k_0: f64, kprime_0: f64, kprime_inf: f64) -> Self {
        Self {
            v_0,
            k_0,
            kprime_0,
            kprime_inf,
            p_0: 0.0,
            g_0: f64::NAN,
            gprime_0: f64::NAN,
            molar_mass: None,
        }
    }

    pub fn with_molar_mass(mut self, molar_mass: f64) -> Self {
        self.molar_mass = Some(molar_mass);
        self
    }

    /// Build the record from a raw map that already holds every required key.
    ///
    /// Run [`RKprime::validate_parameters`] first to fill in `P_0`, `G_0` and
    /// `Gprime_0`; this function inserts nothing.
    pub fn from_raw(raw: &RawParams) -> EosResult<Self> {
        Ok(Self {
            v_0: raw.require(keys::V_0)?,
            k_0: raw.require(keys::K_0)?,
            kprime_0: raw.require(keys::KPRIME_0)?,
            kprime_inf: raw.require(keys::KPRIME_INF)?,
            p_0: raw.require(keys::P_0)?,
            g_0: raw.require(keys::G_0)?,
            gprime_0: raw.require(keys::GPRIME_0)?,
            molar_mass: raw.get(keys::MOLAR_MASS),
        })
    }

    /// Exclusive upper end of the PoverK domain, `1 / Kprime_inf`.
    pub fn poverk_limit(&self) -> f64 {
        1.0 / self.kprime_inf
    }

    fn kprime_ratio(&self) -> f64 {
        self.kprime_0 / self.kprime_inf
    }

    /// Range checks, in a fixed order. Nothing here is fatal.
    pub fn range_warnings(&self) -> Vec<ParamWarning> {
        [
            ParamWarning::check(keys::P_0, self.p_0, 0.0, f64::INFINITY),
            ParamWarning::check(keys::V_0, self.v_0, 1.0e-7, 1.0e-3),
            ParamWarning::check(keys::K_0, self.k_0, 1.0e9, 1.0e13),
            ParamWarning::check(keys::KPRIME_0, self.kprime_0, 0.0, 10.0),
            ParamWarning::check(
                keys::KPRIME_INF,
                self.kprime_inf,
                KPRIME_INF_MIN,
                self.kprime_0,
            ),
            ParamWarning::check(keys::G_0, self.g_0, 0.0, 1.0e13),
            ParamWarning::check(keys::GPRIME_0, self.gprime_0, -5.0, 10.0),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl EosParams for RKprimeParams {
    fn molar_mass(&self) -> Option<f64> {
        self.molar_mass
    }

    fn to_raw(&self) -> RawParams {
        let mut raw: RawParams = [
            (keys::V_0, self.v_0),
            (keys::K_0, self.k_0),
            (keys::KPRIME_0, self.kprime_0),
            (keys::KPRIME_INF, self.kprime_inf),
            (keys::P_0, self.p_0),
            (keys::G_0, self.g_0),
            (keys::GPRIME_0, self.gprime_0),
        ]
        .into_iter()
        .collect();
        if let Some(m) = self.molar_mass {
            raw.insert(keys::MOLAR_MASS, m);
        }
        raw
    }
}

/// Residual of the pressure-driven implicit equation (Stacey & Davis eq. 58).
#[inline]
pub fn delta_poverk_from_p(
    poverk: f64,
    pressure: f64,
    k_0: f64,
    kprime_0: f64,
    kprime_inf: f64,
) -> f64 {
    poverk - (pressure / k_0) * (1.0 - kprime_inf * poverk).powf(kprime_0 / kprime_inf)
}

/// Residual of the volume-driven implicit equation (Stacey & Davis eq. 61).
///
/// `_k_0` is accepted so both residuals share a parameter order; the volume
/// relation does not depend on it.
#[inline]
pub fn delta_poverk_from_v(
    poverk: f64,
    volume: f64,
    v_0: f64,
    _k_0: f64,
    kprime_0: f64,
    kprime_inf: f64,
) -> f64 {
    let kprime_ratio = kprime_0 / kprime_inf;
    (v_0 / volume).ln()
        + kprime_ratio / kprime_inf * (1.0 - kprime_inf * poverk).ln()
        + (kprime_ratio - 1.0) * poverk
}

/// Search bracket for PoverK: `[-1, largest float below 1/Kprime_inf]`.
///
/// The upper end is pulled inside the domain until `1 - Kprime_inf x` is
/// strictly positive, so neither residual is evaluated on the boundary.
fn poverk_bracket(kprime_inf: f64) -> EosResult<(f64, f64)> {
    if !kprime_inf.is_finite() || kprime_inf <= 0.0 {
        return Err(EosError::NonPhysical {
            what: "Kprime_inf must be positive and finite",
        });
    }
    let mut upper = (1.0 / kprime_inf).next_down();
    while 1.0 - kprime_inf * upper <= 0.0 {
        upper = upper.next_down();
    }
    Ok((POVERK_LOWER_BOUND, upper))
}

/// Solve for PoverK at the given pressure [Pa] with default solver settings.
pub fn poverk_from_p(pressure: f64, params: &RKprimeParams) -> EosResult<f64> {
    poverk_from_p_with(pressure, params, &RootConfig::default())
}

/// Solve for PoverK at the given pressure [Pa].
pub fn poverk_from_p_with(
    pressure: f64,
    params: &RKprimeParams,
    config: &RootConfig,
) -> EosResult<f64> {
    let (lower, upper) = poverk_bracket(params.kprime_inf)?;
    let solution = solve_bracketed(
        |x| delta_poverk_from_p(x, pressure, params.k_0, params.kprime_0, params.kprime_inf),
        lower,
        upper,
        config,
    )?;
    Ok(solution.root)
}

/// Solve for PoverK at the given molar volume [m³/mol] with default solver settings.
pub fn poverk_from_v(volume: f64, params: &RKprimeParams) -> EosResult<f64> {
    poverk_from_v_with(volume, params, &RootConfig::default())
}

/// Solve for PoverK at the given molar volume [m³/mol].
pub fn poverk_from_v_with(
    volume: f64,
    params: &RKprimeParams,
    config: &RootConfig,
) -> EosResult<f64> {
    let (lower, upper) = poverk_bracket(params.kprime_inf)?;
    let solution = solve_bracketed(
        |x| {
            delta_poverk_from_v(
                x,
                volume,
                params.v_0,
                params.k_0,
                params.kprime_0,
                params.kprime_inf,
            )
        },
        lower,
        upper,
        config,
    )?;
    Ok(solution.root)
}

fn bulk_modulus_from_poverk(poverk: f64, params: &RKprimeParams) -> f64 {
    params.k_0 * (1.0 - params.kprime_inf * poverk).powf(-params.kprime_ratio())
}

fn volume_from_poverk(poverk: f64, params: &RKprimeParams) -> f64 {
    let kprime_ratio = params.kprime_ratio();
    params.v_0
        * (kprime_ratio / params.kprime_inf * (1.0 - params.kprime_inf * poverk).ln()
            + (kprime_ratio - 1.0) * poverk)
            .exp()
}

fn pressure_from_poverk(poverk: f64, params: &RKprimeParams) -> f64 {
    poverk * bulk_modulus_from_poverk(poverk, params)
}

/// Isothermal bulk modulus [Pa] at the given pressure [Pa].
pub fn bulk_modulus(pressure: f64, params: &RKprimeParams) -> EosResult<f64> {
    let poverk = poverk_from_p(pressure, params)?;
    Ok(bulk_modulus_from_poverk(poverk, params))
}

/// Shear modulus [Pa]. Not modelled; always zero.
pub fn shear_modulus(_pressure: f64, _params: &RKprimeParams) -> f64 {
    0.0
}

/// Isothermal reciprocal K' equation of state.
#[derive(Debug, Clone, Default)]
pub struct RKprime {
    config: RootConfig,
}

impl RKprime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a non-default root solver for every PoverK solve.
    pub fn with_config(config: RootConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RootConfig {
        &self.config
    }

    fn poverk_at_pressure(&self, pressure: Pressure, params: &RKprimeParams) -> EosResult<f64> {
        let p = ensure_finite(pressure.value, "pressure")?;
        poverk_from_p_with(p, params, &self.config)
    }

    fn bulk_modulus_at(&self, pressure: Pressure, params: &RKprimeParams) -> EosResult<Pressure> {
        let poverk = self.poverk_at_pressure(pressure, params)?;
        Ok(pa(bulk_modulus_from_poverk(poverk, params)))
    }
}

impl EquationOfState for RKprime {
    type Params = RKprimeParams;

    fn name(&self) -> &str {
        "Reciprocal K'"
    }

    fn kind(&self) -> EosKind {
        EosKind::RKprime
    }

    fn validate_parameters(&self, raw: &mut RawParams) -> EosResult<Validated<RKprimeParams>> {
        let mut defaults_applied = Vec::new();

        if raw.insert_default(keys::P_0, 0.0) {
            defaults_applied.push(keys::P_0);
        }
        // Shear terms are optional: density and bulk modulus need neither.
        for key in [keys::G_0, keys::GPRIME_0] {
            if raw.insert_default(key, f64::NAN) {
                defaults_applied.push(key);
            }
        }

        for key in [
            keys::V_0,
            keys::K_0,
            keys::KPRIME_0,
            keys::KPRIME_INF,
            keys::G_0,
            keys::GPRIME_0,
        ] {
            raw.require(key)?;
        }

        let params = RKprimeParams::from_raw(raw)?;
        let warnings = params.range_warnings();
        for warning in &warnings {
            tracing::warn!(
                parameter = warning.name,
                value = warning.value,
                "{warning}"
            );
        }

        Ok(Validated {
            params,
            warnings,
            defaults_applied,
        })
    }

    fn volume(
        &self,
        pressure: Pressure,
        _temperature: Temperature,
        params: &RKprimeParams,
    ) -> EosResult<MolarVolume> {
        let poverk = self.poverk_at_pressure(pressure, params)?;
        Ok(ensure_finite(volume_from_poverk(poverk, params), "volume")?)
    }

    fn pressure(
        &self,
        _temperature: Temperature,
        volume: MolarVolume,
        params: &RKprimeParams,
    ) -> EosResult<Pressure> {
        if !volume.is_finite() || volume <= 0.0 {
            return Err(EosError::NonPhysical {
                what: "molar volume must be positive and finite",
            });
        }
        let poverk = poverk_from_v_with(volume, params, &self.config)?;
        let p = ensure_finite(pressure_from_poverk(poverk, params), "pressure")?;
        Ok(pa(p))
    }

    fn isothermal_bulk_modulus(
        &self,
        pressure: Pressure,
        _temperature: Temperature,
        _volume: MolarVolume,
        params: &RKprimeParams,
    ) -> EosResult<Pressure> {
        self.bulk_modulus_at(pressure, params)
    }

    fn adiabatic_bulk_modulus(
        &self,
        pressure: Pressure,
        _temperature: Temperature,
        _volume: MolarVolume,
        params: &RKprimeParams,
    ) -> EosResult<Pressure> {
        self.bulk_modulus_at(pressure, params)
    }

    fn shear_modulus(
        &self,
        pressure: Pressure,
        _temperature: Temperature,
        _volume: MolarVolume,
        params: &RKprimeParams,
    ) -> EosResult<Pressure> {
        Ok(pa(shear_modulus(pressure.value, params)))
    }

    fn heat_capacity_v(
        &self,
        _pressure: Pressure,
        _temperature: Temperature,
        _volume: MolarVolume,
        _params: &RKprimeParams,
    ) -> EosResult<MolarHeatCapacity> {
        Ok(HEAT_CAPACITY_SENTINEL)
    }

    fn heat_capacity_p(
        &self,
        _pressure: Pressure,
        _temperature: Temperature,
        _volume: MolarVolume,
        _params: &RKprimeParams,
    ) -> EosResult<MolarHeatCapacity> {
        Ok(HEAT_CAPACITY_SENTINEL)
    }

    fn thermal_expansivity(
        &self,
        _pressure: Pressure,
        _temperature: Temperature,
        _volume: MolarVolume,
        _params: &RKprimeParams,
    ) -> EosResult<ThermalExpansivity> {
        Ok(0.0)
    }

    fn grueneisen_parameter(
        &self,
        _pressure: Pressure,
        _temperature: Temperature,
        _volume: MolarVolume,
        _params: &RKprimeParams,
    ) -> EosResult<f64> {
        Ok(0.0)
    }

    /// One PoverK solve serves volume and both bulk moduli.
    fn property_pack(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        params: &RKprimeParams,
    ) -> EosResult<EosPropertyPack> {
        let poverk = self.poverk_at_pressure(pressure, params)?;
        let volume = ensure_finite(volume_from_poverk(poverk, params), "volume")?;
        let k = pa(bulk_modulus_from_poverk(poverk, params));
        Ok(EosPropertyPack {
            pressure,
            temperature,
            volume,
            isothermal_bulk_modulus: k,
            adiabatic_bulk_modulus: k,
            shear_modulus: pa(shear_modulus(pressure.value, params)),
            heat_capacity_v: HEAT_CAPACITY_SENTINEL,
            heat_capacity_p: HEAT_CAPACITY_SENTINEL,
            thermal_expansivity: 0.0,
            grueneisen_parameter: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eos_core::units::{gpa, k};
    use eos_core::{Tolerances, nearly_equal};
    use eos_roots::{RootError, RootMethod};

    fn mgo_like() -> RKprimeParams {
        RKprimeParams::new(1.1244e-5, 1.61e11, 3.9, 2.4)
    }

    fn raw(pairs: &[(&str, f64)]) -> RawParams {
        pairs.iter().map(|&(key, value)| (key, value)).collect()
    }

    #[test]
    fn residuals_vanish_at_zero_pressure_reference() {
        let p = mgo_like();
        assert_eq!(delta_poverk_from_p(0.0, 0.0, p.k_0, p.kprime_0, p.kprime_inf), 0.0);
        assert_eq!(
            delta_poverk_from_v(0.0, p.v_0, p.v_0, p.k_0, p.kprime_0, p.kprime_inf),
            0.0
        );
    }

    #[test]
    fn bracket_stays_inside_domain() {
        for kinf in [KPRIME_INF_MIN, 2.0, 2.4, 3.0, 7.0] {
            let (lower, upper) = poverk_bracket(kinf).unwrap();
            assert_eq!(lower, -1.0);
            assert!(upper < 1.0 / kinf);
            assert!(1.0 - kinf * upper > 0.0);
        }
    }

    #[test]
    fn bracket_rejects_non_positive_kprime_inf() {
        assert!(matches!(
            poverk_bracket(0.0),
            Err(EosError::NonPhysical { .. })
        ));
        assert!(matches!(
            poverk_bracket(-2.0),
            Err(EosError::NonPhysical { .. })
        ));
    }

    #[test]
    fn poverk_is_zero_at_zero_pressure() {
        let x = poverk_from_p(0.0, &mgo_like()).unwrap();
        assert!(x.abs() < 1e-11);
    }

    #[test]
    fn poverk_solves_pressure_residual() {
        let p = mgo_like();
        let pressure = 50.0e9;
        let x = poverk_from_p(pressure, &p).unwrap();
        let r = delta_poverk_from_p(x, pressure, p.k_0, p.kprime_0, p.kprime_inf);
        assert!(r.abs() < 1e-10);
        assert!(x > 0.0 && x < p.poverk_limit());
    }

    #[test]
    fn bisection_config_gives_same_volume() {
        let p = mgo_like();
        let brent = RKprime::new();
        let bisect = RKprime::with_config(RootConfig::with_method(RootMethod::Bisection));
        let v1 = brent.volume(gpa(30.0), k(300.0), &p).unwrap();
        let v2 = bisect.volume(gpa(30.0), k(300.0), &p).unwrap();
        assert!(nearly_equal(v1, v2, Tolerances::relative(1e-9)));
    }

    #[test]
    fn strong_tension_has_no_bracketed_root() {
        let p = mgo_like();
        let err = poverk_from_p(-1.0e13, &p).unwrap_err();
        assert!(matches!(err, EosError::Root(RootError::NoSignChange { .. })));
    }

    #[test]
    fn volume_decreases_and_modulus_increases_with_pressure() {
        let eos = RKprime::new();
        let p = mgo_like();
        let t = k(300.0);
        let mut last_v = f64::INFINITY;
        let mut last_k = 0.0;
        for gpa_value in [0.0, 10.0, 50.0, 100.0, 300.0] {
            let v = eos.volume(gpa(gpa_value), t, &p).unwrap();
            let kt = eos
                .isothermal_bulk_modulus(gpa(gpa_value), t, v, &p)
                .unwrap()
                .value;
            assert!(v < last_v);
            assert!(kt > last_k);
            last_v = v;
            last_k = kt;
        }
    }

    #[test]
    fn validation_injects_defaults_once() {
        let eos = RKprime::new();
        let mut params = raw(&[
            (keys::V_0, 1e-5),
            (keys::K_0, 1.6e11),
            (keys::KPRIME_0, 4.0),
            (keys::KPRIME_INF, 2.0),
        ]);
        let first = eos.validate_parameters(&mut params).unwrap();
        assert_eq!(
            first.defaults_applied,
            vec![keys::P_0, keys::G_0, keys::GPRIME_0]
        );
        assert!(!first.has_warnings());

        let second = eos.validate_parameters(&mut params).unwrap();
        assert!(second.defaults_applied.is_empty());
        assert_eq!(params.len(), 7);
    }

    #[test]
    fn validation_warns_in_check_order() {
        let eos = RKprime::new();
        let mut params = raw(&[
            (keys::P_0, -1.0),
            (keys::V_0, 1.0),
            (keys::K_0, 1.6e11),
            (keys::KPRIME_0, 4.0),
            (keys::KPRIME_INF, 5.0),
            (keys::G_0, 1e14),
            (keys::GPRIME_0, -6.0),
        ]);
        let validated = eos.validate_parameters(&mut params).unwrap();
        let names: Vec<_> = validated.warnings.iter().map(|w| w.name).collect();
        assert_eq!(
            names,
            vec![keys::P_0, keys::V_0, keys::KPRIME_INF, keys::G_0, keys::GPRIME_0]
        );
    }

    #[test]
    fn from_raw_requires_validated_map() {
        let params = raw(&[
            (keys::V_0, 1e-5),
            (keys::K_0, 1.6e11),
            (keys::KPRIME_0, 4.0),
            (keys::KPRIME_INF, 2.0),
        ]);
        assert!(matches!(
            RKprimeParams::from_raw(&params),
            Err(EosError::MissingParameter { name: "P_0" })
        ));
    }

    #[test]
    fn to_raw_round_trips() {
        let p = mgo_like().with_molar_mass(0.0403);
        let back = RKprimeParams::from_raw(&p.to_raw()).unwrap();
        assert_eq!(back.v_0, p.v_0);
        assert_eq!(back.molar_mass, Some(0.0403));
        assert!(back.g_0.is_nan());
    }

    #[test]
    fn property_pack_matches_individual_queries() {
        let eos = RKprime::new();
        let p = mgo_like();
        let t = k(1000.0);
        let pressure = gpa(25.0);
        let pack = eos.property_pack(pressure, t, &p).unwrap();
        let v = eos.volume(pressure, t, &p).unwrap();
        let kt = eos.isothermal_bulk_modulus(pressure, t, v, &p).unwrap();
        assert_eq!(pack.volume, v);
        assert_eq!(pack.isothermal_bulk_modulus.value, kt.value);
        assert_eq!(pack.adiabatic_bulk_modulus.value, kt.value);
        assert!(pack.summary().starts_with("Pack("));
    }

    #[test]
    fn rejects_non_positive_volume() {
        let eos = RKprime::new();
        let err = eos.pressure(k(300.0), 0.0, &mgo_like()).unwrap_err();
        assert!(matches!(err, EosError::NonPhysical { .. }));
    }

    #[test]
    fn rejects_nan_pressure() {
        let eos = RKprime::new();
        let err = eos
            .volume(pa(f64::NAN), k(300.0), &mgo_like())
            .unwrap_err();
        assert!(matches!(err, EosError::Core(_)));
    }

    #[test]
    fn density_uses_molar_mass() {
        let eos = RKprime::new();
        let p = mgo_like().with_molar_mass(0.0403);
        let rho = eos.density(p.v_0, &p).unwrap();
        assert!((rho.value - 0.0403 / 1.1244e-5).abs() < 1e-6);

        let err = eos.density(p.v_0, &mgo_like()).unwrap_err();
        assert!(matches!(
            err,
            EosError::MissingParameter { name: "molar_mass" }
        ));
    }
}
