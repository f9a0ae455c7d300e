//! Material parameter files (YAML or JSON).

use crate::error::EosResult;
use crate::kind::EosKind;
use crate::model::EquationOfState;
use crate::params::{RawParams, Validated};
use crate::rkprime::{RKprime, RKprimeParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk description of one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialFile {
    pub name: String,
    pub equation_of_state: EosKind,
    pub params: RawParams,
}

/// A material whose parameters passed validation.
#[derive(Debug, Clone)]
pub struct LoadedMaterial {
    /// File contents, with defaults inserted into `params`
    pub file: MaterialFile,
    pub validated: Validated<RKprimeParams>,
}

impl LoadedMaterial {
    /// Model matching the file's `equation_of_state` tag.
    pub fn model(&self) -> RKprime {
        match self.file.equation_of_state {
            EosKind::RKprime => RKprime::new(),
        }
    }

    pub fn params(&self) -> &RKprimeParams {
        &self.validated.params
    }
}

impl MaterialFile {
    /// Validate (inserting defaults) with the model named in the file.
    pub fn validate(mut self) -> EosResult<LoadedMaterial> {
        let validated = match self.equation_of_state {
            EosKind::RKprime => RKprime::new().validate_parameters(&mut self.params)?,
        };
        Ok(LoadedMaterial {
            file: self,
            validated,
        })
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn parse_yaml(content: &str) -> EosResult<LoadedMaterial> {
    let file: MaterialFile = serde_yaml::from_str(content)?;
    file.validate()
}

pub fn parse_json(content: &str) -> EosResult<LoadedMaterial> {
    let file: MaterialFile = serde_json::from_str(content)?;
    file.validate()
}

/// Load a material; `.json` files are read as JSON, anything else as YAML.
pub fn load_material(path: &Path) -> EosResult<LoadedMaterial> {
    let content = std::fs::read_to_string(path)?;
    let loaded = if is_json(path) {
        parse_json(&content)?
    } else {
        parse_yaml(&content)?
    };
    tracing::debug!(
        path = %path.display(),
        name = %loaded.file.name,
        warnings = loaded.validated.warnings.len(),
        "material loaded"
    );
    Ok(loaded)
}

/// Validate and write a material; format chosen by extension as in [`load_material`].
///
/// The file is written as given. Defaults are not persisted, since JSON has no
/// representation for the NaN shear defaults.
pub fn save_material(path: &Path, material: &MaterialFile) -> EosResult<()> {
    material.clone().validate()?;
    let content = if is_json(path) {
        serde_json::to_string_pretty(material)?
    } else {
        serde_yaml::to_string(material)?
    };
    std::fs::write(path, content)?;
    Ok(())
}
