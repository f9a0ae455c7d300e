//! Parameter storage, range diagnostics, and validation results.
//!
//! Parameter sets arrive as string-keyed maps ([`RawParams`]), the form they
//! take in material files. Each model validates the map once, injecting
//! defaults for optional keys, and hands back a typed record together with a
//! list of non-fatal [`ParamWarning`]s.

use crate::error::{EosError, EosResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter key names as they appear in material files.
pub mod keys {
    pub const V_0: &str = "V_0";
    pub const K_0: &str = "K_0";
    pub const KPRIME_0: &str = "Kprime_0";
    pub const KPRIME_INF: &str = "Kprime_inf";
    pub const G_0: &str = "G_0";
    pub const GPRIME_0: &str = "Gprime_0";
    pub const P_0: &str = "P_0";
    pub const MOLAR_MASS: &str = "molar_mass";
}

/// Caller-owned parameter mapping, name -> value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawParams(BTreeMap<String, f64>);

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(key.into(), value)
    }

    /// Insert `value` only if `key` is absent. Returns true if it was inserted.
    pub fn insert_default(&mut self, key: &str, value: f64) -> bool {
        if self.0.contains_key(key) {
            return false;
        }
        self.0.insert(key.to_string(), value);
        true
    }

    /// Look up a key that must be present.
    pub fn require(&self, key: &'static str) -> EosResult<f64> {
        self.get(key)
            .ok_or(EosError::MissingParameter { name: key })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Typed parameter record produced by a model's validation step.
pub trait EosParams: Clone + Send + Sync {
    /// Molar mass [kg/mol], if the parameter set carries one.
    fn molar_mass(&self) -> Option<f64>;

    /// Convert back to the string-keyed form.
    fn to_raw(&self) -> RawParams;
}

/// Non-fatal diagnostic: a parameter lies outside its usual physical range.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamWarning {
    pub name: &'static str,
    pub value: f64,
    /// Expected inclusive range `[lo, hi]`
    pub expected: (f64, f64),
}

impl ParamWarning {
    /// Return a warning if `value` falls outside `[lo, hi]`.
    ///
    /// NaN compares false both ways and therefore never warns, so optional
    /// parameters left at NaN stay silent.
    pub fn check(name: &'static str, value: f64, lo: f64, hi: f64) -> Option<Self> {
        if value < lo || value > hi {
            Some(Self {
                name,
                value,
                expected: (lo, hi),
            })
        } else {
            None
        }
    }
}

impl fmt::Display for ParamWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unusual value for {} ({}; expected {} to {})",
            self.name, self.value, self.expected.0, self.expected.1
        )
    }
}

/// Outcome of a successful validation.
#[derive(Debug, Clone)]
pub struct Validated<P> {
    /// Typed parameters, defaults included
    pub params: P,
    /// Out-of-range diagnostics, in check order
    pub warnings: Vec<ParamWarning>,
    /// Keys that were absent and got a default inserted
    pub defaults_applied: Vec<&'static str>,
}

impl<P> Validated<P> {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// True if a warning was raised for `name`.
    pub fn warned(&self, name: &str) -> bool {
        self.warnings.iter().any(|w| w.name == name)
    }
}
