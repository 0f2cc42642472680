//! Problem configuration: material, formulation, time stepping, and mesh files.
//!
//! The configuration is read from JSON:
//!
//! ```json
//! {
//!   "material": { "type": "neo_hookean", "lambda": 10.0, "mu": 1.0 },
//!   "formulation": { "inverse": false, "time": { "unsteady": false } },
//!   "mesh": { "mesh_file": "cube.xml", "boundaries": "cube_facets.xml" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::moduli::{ElasticModuli, LameParameters};

/// Constitutive law selected by `material.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Small-strain linear elasticity
    #[default]
    LinElastic,
    /// Compressible or incompressible neo-Hookean hyperelasticity
    NeoHookean,
}

impl MaterialKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MaterialKind::LinElastic => "lin_elastic",
            MaterialKind::NeoHookean => "neo_hookean",
        }
    }
}

/// Material section of the configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialConfig {
    #[serde(rename = "type", default)]
    pub kind: MaterialKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub young: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poisson: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kappa: Option<f64>,
    #[serde(default)]
    pub incompressible: bool,
}

impl MaterialConfig {
    pub fn moduli(&self) -> ElasticModuli {
        ElasticModuli {
            lambda: self.lambda,
            mu: self.mu,
            young: self.young,
            poisson: self.poisson,
            kappa: self.kappa,
        }
    }

    /// Resolve the configured moduli to Lamé parameters.
    ///
    /// An incompressible material only needs `mu`; λ then defaults to zero
    /// since the volumetric response is carried by the pressure.
    pub fn lame(&self) -> Result<LameParameters> {
        let moduli = self.moduli();
        if self.incompressible && moduli.count() == 1 {
            if let Some(mu) = self.mu {
                if !(mu > 0.0) {
                    return Err(ConfigError::InvalidModuli(format!(
                        "shear modulus mu must be positive, got {mu}"
                    )));
                }
                return Ok(LameParameters::new(0.0, mu));
            }
        }
        moduli.resolve()
    }
}

/// Time-integration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeConfig {
    #[serde(default)]
    pub unsteady: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<f64>,
    /// Weight of the current step in the theta scheme
    #[serde(default = "default_theta")]
    pub theta: f64,
}

fn default_theta() -> f64 {
    1.0
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            unsteady: false,
            dt: None,
            theta: default_theta(),
        }
    }
}

/// Formulation section of the configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormulationConfig {
    /// Solve for the reference configuration given the current one
    #[serde(default)]
    pub inverse: bool,
    #[serde(default)]
    pub time: TimeConfig,
}

/// Mesh section of the configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshConfig {
    pub mesh_file: PathBuf,
    /// Mesh function marking boundary facets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundaries: Option<PathBuf>,
}

/// Complete problem configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MechanicsConfig {
    pub material: MaterialConfig,
    #[serde(default)]
    pub formulation: FormulationConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshConfig>,
}

impl MechanicsConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    ///
    /// Relative mesh paths are resolved against the directory holding the file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("reading configuration from {}", path.display());
        let raw = fs::read_to_string(path)?;
        let mut config = Self::from_json_str(&raw)?;

        if let (Some(mesh), Some(base)) = (config.mesh.as_mut(), path.parent()) {
            mesh.mesh_file = base.join(&mesh.mesh_file);
            if let Some(boundaries) = mesh.boundaries.as_mut() {
                *boundaries = base.join(&*boundaries);
            }
        }

        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.material.lame()?;

        let time = &self.formulation.time;
        if !(0.0..=1.0).contains(&time.theta) {
            return Err(ConfigError::InvalidTime(format!(
                "theta must lie in [0, 1], got {}",
                time.theta
            )));
        }
        if let Some(dt) = time.dt {
            if !(dt > 0.0) {
                return Err(ConfigError::InvalidTime(format!(
                    "dt must be positive, got {dt}"
                )));
            }
        }
        Ok(())
    }

    pub fn lame(&self) -> Result<LameParameters> {
        self.material.lame()
    }

    pub fn is_inverse(&self) -> bool {
        self.formulation.inverse
    }

    pub fn is_unsteady(&self) -> bool {
        self.formulation.time.unsteady
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_material_section() {
        let config = MechanicsConfig::from_json_str(
            r#"{ "material": { "type": "lin_elastic", "lambda": 1.0, "mu": 0.5 } }"#,
        )
        .expect("config should parse");

        assert_eq!(config.material.kind, MaterialKind::LinElastic);
        assert!(!config.is_inverse());
        assert!(!config.is_unsteady());
        assert_eq!(config.formulation.time.theta, 1.0);
        assert!(config.mesh.is_none());
    }

    #[test]
    fn parses_full_configuration() {
        let src = r#"
{
  "material": { "type": "neo_hookean", "young": 10.0, "poisson": 0.3, "incompressible": false },
  "formulation": { "inverse": true, "time": { "unsteady": true, "dt": 0.01, "theta": 0.5 } },
  "mesh": { "mesh_file": "cube.xml", "boundaries": "cube_facets.h5" }
}
"#;
        let config = MechanicsConfig::from_json_str(src).expect("config should parse");
        assert_eq!(config.material.kind, MaterialKind::NeoHookean);
        assert!(config.is_inverse());
        assert!(config.is_unsteady());
        assert_eq!(config.formulation.time.dt, Some(0.01));

        let mesh = config.mesh.as_ref().expect("mesh section");
        assert_eq!(mesh.mesh_file, PathBuf::from("cube.xml"));
        assert_eq!(mesh.boundaries, Some(PathBuf::from("cube_facets.h5")));

        let lame = config.lame().expect("moduli resolve");
        assert!((lame.poisson() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn incompressible_material_rejects_non_positive_mu() {
        for mu in ["0.0", "-1.5"] {
            let raw = format!(
                r#"{{ "material": {{ "type": "neo_hookean", "mu": {mu}, "incompressible": true }} }}"#
            );
            let err = MechanicsConfig::from_json_str(&raw).expect_err("mu must be positive");
            assert!(
                matches!(&err, ConfigError::InvalidModuli(msg) if msg.contains("mu")),
                "{err}"
            );
        }
    }

    #[test]
    fn incompressible_material_needs_only_mu() {
        let config = MechanicsConfig::from_json_str(
            r#"{ "material": { "type": "neo_hookean", "mu": 2.0, "incompressible": true } }"#,
        )
        .expect("config should parse");
        let lame = config.lame().expect("mu alone is enough");
        assert_eq!(lame.lambda, 0.0);
        assert_eq!(lame.mu, 2.0);
    }

    #[test]
    fn rejects_unknown_material_type() {
        let err = MechanicsConfig::from_json_str(
            r#"{ "material": { "type": "mooney_rivlin", "lambda": 1.0, "mu": 1.0 } }"#,
        )
        .expect_err("unknown type should fail");
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn rejects_out_of_range_theta() {
        let err = MechanicsConfig::from_json_str(
            r#"{ "material": { "lambda": 1.0, "mu": 1.0 },
                 "formulation": { "time": { "unsteady": true, "theta": 1.5 } } }"#,
        )
        .expect_err("theta > 1 should fail");
        assert!(matches!(err, ConfigError::InvalidTime(_)));
    }

    #[test]
    fn file_loading_resolves_mesh_paths_next_to_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("problem.json");
        fs::write(
            &path,
            r#"{ "material": { "lambda": 1.0, "mu": 1.0 },
                 "mesh": { "mesh_file": "cube.xml", "boundaries": "facets.xml" } }"#,
        )
        .expect("write config");

        let config = MechanicsConfig::from_json_file(&path).expect("load config");
        let mesh = config.mesh.expect("mesh section");
        assert_eq!(mesh.mesh_file, dir.path().join("cube.xml"));
        assert_eq!(mesh.boundaries, Some(dir.path().join("facets.xml")));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = MechanicsConfig::from_json_file(dir.path().join("absent.json"))
            .expect_err("missing file should fail");
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn json_round_trip_keeps_material_kind_name() {
        let config = MechanicsConfig {
            material: MaterialConfig {
                kind: MaterialKind::NeoHookean,
                lambda: Some(1.0),
                mu: Some(1.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let json = config.to_json_pretty().expect("serialize");
        assert!(json.contains("\"neo_hookean\""));
        assert_eq!(MechanicsConfig::from_json_str(&json).expect("parse"), config);
    }
}
