//! Neo-Hookean hyperelasticity.
//!
//! The forward formulation returns the first Piola-Kirchhoff stress derived
//! from
//!
//! ```text
//! ψ(C) = μ/2 (tr C − 3) − μ ln J + λ/2 (ln J)²
//! ```
//!
//! and the inverse formulation returns the Cauchy stress derived from
//!
//! ```text
//! ψ(c) = μ/2 (i₂/i₃ − 3) + μ ln j + λ/2 (ln j)²
//! ```
//!
//! where `c = fᵀf` and `f` maps the current to the reference configuration.
//! Incompressible materials evaluate the law on the isochoric part of the
//! gradient and add the pressure contribution.

use nalgebra::DMatrix;

use crate::error::{MaterialError, Result};
use crate::kinematics::{ProblemState, check_square, inverse};
use crate::model::{NeoHookean, StressResponse, evaluate};

fn check_jacobian(j: f64) -> Result<()> {
    if j > 0.0 {
        Ok(())
    } else {
        Err(MaterialError::NonPositiveJacobian(j))
    }
}

/// First Piola-Kirchhoff stress P = μF + (λ ln J − μ) F⁻ᵀ
pub fn forward_neo_hookean(f: &DMatrix<f64>, j: f64, la: f64, mu: f64) -> Result<DMatrix<f64>> {
    check_jacobian(j)?;
    let finv_t = inverse(f)?.transpose();
    Ok(f * mu + finv_t * (la * j.ln() - mu))
}

/// Cauchy stress σ = −j(μ + λ ln j) I + jμ c⁻¹
pub fn inverse_neo_hookean(f: &DMatrix<f64>, j: f64, la: f64, mu: f64) -> Result<DMatrix<f64>> {
    let dim = check_square(f)?;
    check_jacobian(j)?;
    let c = f.transpose() * f;
    let cinv = inverse(&c)?;
    Ok(DMatrix::identity(dim, dim) * (-j * (mu + la * j.ln())) + cinv * (j * mu))
}

/// Neo-Hookean stress for either formulation.
///
/// `pressure` is only read for incompressible materials, where it is required.
pub fn neo_hookean_stress(
    f: &DMatrix<f64>,
    j: f64,
    la: f64,
    mu: f64,
    incompressible: bool,
    inverse_formulation: bool,
    pressure: Option<f64>,
) -> Result<DMatrix<f64>> {
    let dim = check_square(f)?;

    if !incompressible {
        return if inverse_formulation {
            inverse_neo_hookean(f, j, la, mu)
        } else {
            forward_neo_hookean(f, j, la, mu)
        };
    }

    let p = pressure.ok_or(MaterialError::MissingPressure)?;
    check_jacobian(j)?;
    let fbar = f * j.powf(-1.0 / dim as f64);
    let jbar = fbar.determinant();

    if inverse_formulation {
        let stress = inverse_neo_hookean(&fbar, jbar, la, mu)?;
        Ok(stress + DMatrix::identity(dim, dim) * p)
    } else {
        let stress = forward_neo_hookean(&fbar, jbar, la, mu)?;
        Ok(stress + inverse(f)?.transpose() * (p * j))
    }
}

/// Neo-Hookean stress of a problem: Cauchy stress for the inverse
/// formulation, first Piola-Kirchhoff stress for the forward one
pub fn neo_hookean(problem: &ProblemState<'_>) -> Result<StressResponse> {
    let model = NeoHookean::from_config(problem.config)?;
    evaluate(&model, problem)
}
