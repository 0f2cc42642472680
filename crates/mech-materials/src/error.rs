//! Error types for mech-materials

use mech_model::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MaterialError>;

#[derive(Error, Debug)]
pub enum MaterialError {
    #[error("Tensor must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Tensor is singular and cannot be inverted")]
    Singular,

    #[error("Jacobian must be positive, got {0}")]
    NonPositiveJacobian(f64),

    #[error("Incompressible material requires a pressure")]
    MissingPressure,

    #[error("Unsteady formulation requires the previous deformation gradient")]
    MissingPreviousState,

    #[error("Expected 1, 4 or 9 tensor components, got {0}")]
    ComponentCount(usize),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
