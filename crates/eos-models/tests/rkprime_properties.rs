//! Behavioural checks for the reciprocal K' model.

use eos_core::units::{gpa, k, pa};
use eos_core::{Tolerances, nearly_equal, relative_error};
use eos_models::{
    EosError, EquationOfState, HEAT_CAPACITY_SENTINEL, RKprime, RKprimeParams, RawParams,
    bulk_modulus, keys, poverk_from_p, poverk_from_v, shear_modulus,
};
use eos_roots::RootError;
use proptest::prelude::*;

fn raw(pairs: &[(&str, f64)]) -> RawParams {
    pairs.iter().map(|&(key, value)| (key, value)).collect()
}

fn reference_raw() -> RawParams {
    raw(&[
        (keys::V_0, 1e-5),
        (keys::K_0, 1.6e11),
        (keys::KPRIME_0, 4.0),
        (keys::KPRIME_INF, 2.0),
    ])
}

fn reference_params() -> RKprimeParams {
    RKprime::new()
        .validate_parameters(&mut reference_raw())
        .unwrap()
        .params
}

#[test]
fn round_trip_at_any_temperature() {
    let eos = RKprime::new();
    let params = reference_params();
    for t in [1.0, 300.0, 2000.0, 4000.0] {
        for p_gpa in [0.1, 1.0, 10.0, 50.0, 135.0, 360.0] {
            let p = gpa(p_gpa);
            let v = eos.volume(p, k(t), &params).unwrap();
            let p_back = eos.pressure(k(t), v, &params).unwrap();
            assert!(
                relative_error(p_back.value, p.value) < 1e-6,
                "P={p_gpa} GPa, T={t} K: got {}",
                p_back.value
            );
        }
    }
}

#[test]
fn temperature_is_ignored() {
    let eos = RKprime::new();
    let params = reference_params();
    let v_cold = eos.volume(gpa(20.0), k(10.0), &params).unwrap();
    let v_hot = eos.volume(gpa(20.0), k(3000.0), &params).unwrap();
    assert_eq!(v_cold, v_hot);
}

#[test]
fn poverk_stays_below_domain_limit() {
    let params = reference_params();
    let limit = 1.0 / params.kprime_inf;
    for p in [0.0, 1e9, 1e11, 1e12, 1e13] {
        let x = poverk_from_p(p, &params).unwrap();
        assert!(x < limit, "PoverK {x} at P={p}");
    }
    for v in [1e-5, 8e-6, 5e-6, 2e-6] {
        let x = poverk_from_v(v, &params).unwrap();
        assert!(x < limit, "PoverK {x} at V={v}");
    }
}

#[test]
fn expansion_beyond_lower_bracket_is_reported() {
    // K'_0 / K'_inf = 2.4 puts the volume residual below zero at PoverK = -1
    // for any V >= V_0.
    let eos = RKprime::new();
    let params = RKprimeParams::new(1e-5, 1.6e11, 6.0, 2.5);

    let err = eos.pressure(k(300.0), 1.01e-5, &params).unwrap_err();
    assert!(
        matches!(err, EosError::Root(RootError::NoSignChange { .. })),
        "unexpected error: {err}"
    );

    // Enough compression brings the root back inside the bracket
    let p = eos.pressure(k(300.0), 0.8e-5, &params).unwrap();
    assert!(p.value > 0.0);
}

#[test]
fn zero_pressure_recovers_reference_state() {
    let eos = RKprime::new();
    let params = reference_params();
    assert_eq!(params.p_0, 0.0);

    let v = eos.volume(pa(params.p_0), k(300.0), &params).unwrap();
    let kt = bulk_modulus(params.p_0, &params).unwrap();
    let tol = Tolerances::relative(1e-9);
    assert!(nearly_equal(v, params.v_0, tol));
    assert!(nearly_equal(kt, params.k_0, tol));
}

#[test]
fn adiabatic_equals_isothermal() {
    let eos = RKprime::new();
    let params = reference_params();
    let p = gpa(42.0);
    let t = k(1500.0);
    let v = eos.volume(p, t, &params).unwrap();
    let kt = eos.isothermal_bulk_modulus(p, t, v, &params).unwrap();
    let ks = eos.adiabatic_bulk_modulus(p, t, v, &params).unwrap();
    assert_eq!(kt.value, ks.value);
    assert_eq!(kt.value, bulk_modulus(p.value, &params).unwrap());
}

#[test]
fn thermal_and_shear_properties_are_constant() {
    let eos = RKprime::new();
    let params = reference_params();
    for (p, t, v) in [(0.0, 300.0, 1e-5), (5e10, 2500.0, 8e-6), (-1e9, 1.0, 1.1e-5)] {
        let (p, t) = (pa(p), k(t));
        assert_eq!(eos.shear_modulus(p, t, v, &params).unwrap().value, 0.0);
        assert_eq!(eos.thermal_expansivity(p, t, v, &params).unwrap(), 0.0);
        assert_eq!(eos.grueneisen_parameter(p, t, v, &params).unwrap(), 0.0);
        assert_eq!(eos.heat_capacity_v(p, t, v, &params).unwrap(), 1e99);
        assert_eq!(eos.heat_capacity_p(p, t, v, &params).unwrap(), 1e99);
    }
    assert_eq!(HEAT_CAPACITY_SENTINEL, 1e99);
    assert_eq!(shear_modulus(1e10, &params), 0.0);
}

#[test]
fn validation_fills_optional_defaults() {
    let mut params = reference_raw();
    let validated = RKprime::new().validate_parameters(&mut params).unwrap();

    assert_eq!(params.get(keys::P_0), Some(0.0));
    assert!(params.get(keys::G_0).unwrap().is_nan());
    assert!(params.get(keys::GPRIME_0).unwrap().is_nan());
    assert!(validated.warnings.is_empty());
}

#[test]
fn validation_names_missing_v0() {
    let mut params = raw(&[
        (keys::K_0, 1.6e11),
        (keys::KPRIME_0, 4.0),
        (keys::KPRIME_INF, 2.0),
    ]);
    let err = RKprime::new().validate_parameters(&mut params).unwrap_err();
    assert!(matches!(err, EosError::MissingParameter { name: "V_0" }));
    assert!(err.to_string().contains("V_0"));
}

#[test]
fn low_kprime_inf_warns_but_succeeds() {
    let eos = RKprime::new();
    let mut params = reference_raw();
    params.insert(keys::KPRIME_INF, 1.0);

    let validated = eos.validate_parameters(&mut params).unwrap();
    assert_eq!(validated.warnings.len(), 1);
    assert!(validated.warned(keys::KPRIME_INF));
    assert_eq!(validated.params.kprime_inf, 1.0);

    // Still usable
    let v = eos.volume(gpa(10.0), k(300.0), &validated.params).unwrap();
    assert!(v > 0.0 && v < 1e-5);
}

#[test]
fn validation_is_idempotent() {
    let eos = RKprime::new();
    let mut params = reference_raw();
    params.insert(keys::KPRIME_INF, 1.0);

    let first = eos.validate_parameters(&mut params).unwrap();
    let snapshot = params.clone();
    let second = eos.validate_parameters(&mut params).unwrap();

    assert_eq!(first.warnings, second.warnings);
    assert!(second.defaults_applied.is_empty());
    assert_eq!(params.len(), snapshot.len());
    assert_eq!(params.get(keys::P_0), snapshot.get(keys::P_0));
}

proptest! {
    #[test]
    fn poverk_below_limit_for_any_params(
        v_0 in 1e-6_f64..1e-4,
        k_0 in 1e9_f64..1e13,
        kprime_inf in (5.0_f64 / 3.0)..6.0,
        frac in 0.0_f64..1.0,
        p in 0.0_f64..1e15,
        v_frac in 0.01_f64..1.0,
    ) {
        let kprime_0 = kprime_inf + frac * (10.0 - kprime_inf);
        let params = RKprimeParams::new(v_0, k_0, kprime_0, kprime_inf);
        let limit = 1.0 / kprime_inf;

        let x = poverk_from_p(p, &params).unwrap();
        prop_assert!(x < limit);

        // Volumes outside what the bracket reaches fail; anything returned
        // must still lie in the domain.
        match poverk_from_v(v_frac * v_0, &params) {
            Ok(x) => prop_assert!((-1.0..limit).contains(&x)),
            Err(err) => prop_assert!(
                matches!(err, EosError::Root(RootError::NoSignChange { .. })),
                "unexpected error: {}",
                err
            ),
        }
    }

    #[test]
    fn round_trip_over_parameter_space(
        v_0 in 5e-6_f64..5e-5,
        k_0 in 5e10_f64..3e11,
        kprime_inf in 2.0_f64..3.0,
        frac in 0.0_f64..1.0,
        p in 1e8_f64..2e11,
    ) {
        let kprime_0 = kprime_inf + frac * (4.0 - kprime_inf);
        let params = RKprimeParams::new(v_0, k_0, kprime_0, kprime_inf);
        let eos = RKprime::new();

        let v = eos.volume(pa(p), k(300.0), &params).unwrap();
        prop_assert!(v > 0.0 && v < v_0);
        let p_back = eos.pressure(k(300.0), v, &params).unwrap().value;
        prop_assert!(relative_error(p_back, p) < 1e-6);
    }

    #[test]
    fn bulk_modulus_is_positive(
        k_0 in 1e9_f64..1e13,
        kprime_inf in (5.0_f64 / 3.0)..6.0,
        frac in 0.0_f64..1.0,
        p in 0.0_f64..5e11,
    ) {
        let kprime_0 = kprime_inf + frac * (10.0 - kprime_inf);
        let params = RKprimeParams::new(1e-5, k_0, kprime_0, kprime_inf);
        let kt = bulk_modulus(p, &params).unwrap();
        prop_assert!(kt > 0.0);
        prop_assert!(kt >= k_0 * (1.0 - 1e-9));
    }
}
