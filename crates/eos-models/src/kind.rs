//! Registry of available equation-of-state models.

use crate::error::EosError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag naming an equation-of-state model in material files and on the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EosKind {
    /// Isothermal reciprocal K' model
    RKprime,
}

impl EosKind {
    /// Every registered model.
    pub const ALL: [EosKind; 1] = [EosKind::RKprime];

    /// Canonical identifier used when writing files.
    pub fn id(self) -> &'static str {
        match self {
            Self::RKprime => "rkprime",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::RKprime => &["rkprime", "rkp", "reciprocal_kprime"],
        }
    }
}

impl fmt::Display for EosKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for EosKind {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let query = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.aliases().contains(&query.as_str()))
            .ok_or_else(|| EosError::UnknownModel {
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for EosKind {
    type Error = EosError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EosKind> for String {
    fn from(kind: EosKind) -> Self {
        kind.id().to_string()
    }
}
