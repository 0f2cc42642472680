//! Small-strain isotropic linear elasticity.
//!
//! Cauchy stress T = λ tr(ε) I + 2μ ε with ε = sym(F) − I. The inverse
//! formulation receives the gradient from the current to the reference
//! configuration and uses ε = sym(F⁻¹) − I instead.
//!
//! When λ exceeds [`INCOMPRESSIBLE_LAMBDA`] the material is treated as
//! incompressible and the volumetric term is dropped, leaving T = 2μ ε.

use nalgebra::DMatrix;

use crate::error::Result;
use crate::kinematics::{ProblemState, check_square, inverse, sym};
use crate::model::{LinearElastic, StressResponse, evaluate};

/// λ above which the volumetric term is dropped
pub const INCOMPRESSIBLE_LAMBDA: f64 = 1e8;

fn isotropic_stress(epsilon: DMatrix<f64>, la: f64, mu: f64) -> DMatrix<f64> {
    let dim = epsilon.nrows();
    if la > INCOMPRESSIBLE_LAMBDA {
        epsilon * (2.0 * mu)
    } else {
        DMatrix::identity(dim, dim) * (la * epsilon.trace()) + epsilon * (2.0 * mu)
    }
}

/// Cauchy stress for the forward (reference → current) formulation
pub fn forward_lin_elastic(f: &DMatrix<f64>, la: f64, mu: f64) -> Result<DMatrix<f64>> {
    let dim = check_square(f)?;
    let epsilon = sym(f) - DMatrix::identity(dim, dim);
    Ok(isotropic_stress(epsilon, la, mu))
}

/// Cauchy stress for the inverse (current → reference) formulation
pub fn inverse_lin_elastic(f: &DMatrix<f64>, la: f64, mu: f64) -> Result<DMatrix<f64>> {
    let dim = check_square(f)?;
    let epsilon = sym(&inverse(f)?) - DMatrix::identity(dim, dim);
    Ok(isotropic_stress(epsilon, la, mu))
}

/// Linear-elastic stress of a problem, with the previous-step stress when the
/// formulation is unsteady
pub fn lin_elastic(problem: &ProblemState<'_>) -> Result<StressResponse> {
    let model = LinearElastic::from_config(problem.config)?;
    evaluate(&model, problem)
}
