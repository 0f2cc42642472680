//! Constitutive laws for continuum mechanics.
//!
//! Stresses are evaluated numerically from a deformation gradient given as a
//! dense square matrix. The forward formulation maps the reference to the
//! current configuration; the inverse formulation receives the gradient from
//! the current to the reference configuration.
//!
//! # Example
//!
//! ```
//! use mech_materials::{Kinematics, ProblemState, StressMeasure, material_stress};
//! use mech_model::MechanicsConfig;
//!
//! let config = MechanicsConfig::from_json_str(
//!     r#"{ "material": { "type": "neo_hookean", "lambda": 10.0, "mu": 1.0 } }"#,
//! )?;
//! let state = Kinematics::from_components(&[1.1, 0.0, 0.0, 1.0])?;
//! let response = material_stress(&ProblemState::new(&config, state))?;
//! assert_eq!(response.measure, StressMeasure::FirstPiolaKirchhoff);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod kinematics;
pub mod linear_elastic;
pub mod model;
pub mod neo_hookean;
pub mod postprocess;

pub use error::{MaterialError, Result};
pub use kinematics::{Kinematics, ProblemState};
pub use linear_elastic::{
    INCOMPRESSIBLE_LAMBDA, forward_lin_elastic, inverse_lin_elastic, lin_elastic,
};
pub use model::{
    ConstitutiveModel, LinearElastic, NeoHookean, StressMeasure, StressResponse, evaluate,
    material_stress, model_from_config,
};
pub use neo_hookean::{forward_neo_hookean, inverse_neo_hookean, neo_hookean, neo_hookean_stress};
pub use postprocess::{
    PrincipalValues, StressSummary, TensorComponents, cauchy_from_first_piola,
    compute_mises_stress, summarize, to_cauchy,
};
