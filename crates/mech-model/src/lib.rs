//! Configuration data model for the mechanics workspace.
//!
//! Holds the material parameters, formulation flags, time-stepping settings,
//! and mesh file locations consumed by `mech-materials` and `mech-io`.

pub mod config;
pub mod error;
pub mod moduli;

pub use config::{
    FormulationConfig, MaterialConfig, MaterialKind, MechanicsConfig, MeshConfig, TimeConfig,
};
pub use error::{ConfigError, Result};
pub use moduli::{ElasticModuli, LameParameters};
