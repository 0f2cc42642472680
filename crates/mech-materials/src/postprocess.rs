//! Derived stress quantities.
//!
//! - Cauchy stress from first Piola-Kirchhoff stress
//! - von Mises equivalent stress
//! - Principal, hydrostatic and deviatoric stresses
//!
//! Tensors of dimension 1 or 2 are embedded in 3-D with zero out-of-plane
//! components (plane stress).

use nalgebra::{DMatrix, Matrix3};
use serde::Serialize;

use crate::error::{MaterialError, Result};
use crate::kinematics::{Kinematics, check_square, sym};
use crate::model::StressMeasure;

/// Stress tensor components in Voigt order
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TensorComponents {
    pub xx: f64,
    pub yy: f64,
    pub zz: f64,
    pub xy: f64,
    pub yz: f64,
    pub xz: f64,
}

impl TensorComponents {
    /// Components of the symmetric part of `t`
    pub fn from_tensor(t: &DMatrix<f64>) -> Result<Self> {
        let m = embed(t)?;
        Ok(Self {
            xx: m[(0, 0)],
            yy: m[(1, 1)],
            zz: m[(2, 2)],
            xy: m[(0, 1)],
            yz: m[(1, 2)],
            xz: m[(0, 2)],
        })
    }

    pub fn to_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.xx, self.xy, self.xz, //
            self.xy, self.yy, self.yz, //
            self.xz, self.yz, self.zz,
        )
    }
}

fn embed(t: &DMatrix<f64>) -> Result<Matrix3<f64>> {
    let dim = check_square(t)?;
    if dim > 3 {
        return Err(MaterialError::NotSquare {
            rows: dim,
            cols: dim,
        });
    }
    let s = sym(t);
    let mut m = Matrix3::zeros();
    m.view_mut((0, 0), (dim, dim)).copy_from(&s);
    Ok(m)
}

/// Principal values sorted from largest to smallest
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrincipalValues {
    pub max: f64,
    pub mid: f64,
    pub min: f64,
}

/// Cauchy stress σ = J⁻¹ P Fᵀ
pub fn cauchy_from_first_piola(p: &DMatrix<f64>, kinematics: &Kinematics) -> Result<DMatrix<f64>> {
    check_square(p)?;
    if !(kinematics.jacobian > 0.0) {
        return Err(MaterialError::NonPositiveJacobian(kinematics.jacobian));
    }
    Ok(p * kinematics.deformation_gradient.transpose() / kinematics.jacobian)
}

/// Convert a stress of the given measure to Cauchy stress
pub fn to_cauchy(
    stress: &DMatrix<f64>,
    measure: StressMeasure,
    kinematics: &Kinematics,
) -> Result<DMatrix<f64>> {
    match measure {
        StressMeasure::Cauchy => Ok(stress.clone()),
        StressMeasure::FirstPiolaKirchhoff => cauchy_from_first_piola(stress, kinematics),
    }
}

/// Compute von Mises stress from stress tensor components
///
/// Formula: σ_v = sqrt(0.5 * [(σ_xx - σ_yy)² + (σ_yy - σ_zz)² + (σ_zz - σ_xx)²] + 3 * [τ_xy² + τ_yz² + τ_xz²])
pub fn compute_mises_stress(stress: &TensorComponents) -> f64 {
    let term1 = 0.5
        * ((stress.xx - stress.yy).powi(2)
            + (stress.yy - stress.zz).powi(2)
            + (stress.zz - stress.xx).powi(2));

    let term2 = 3.0 * (stress.xy.powi(2) + stress.yz.powi(2) + stress.xz.powi(2));

    (term1 + term2).sqrt()
}

/// Eigenvalues of the symmetric stress tensor
pub fn compute_principal_stresses(stress: &TensorComponents) -> PrincipalValues {
    let mut values: Vec<f64> = stress
        .to_matrix()
        .symmetric_eigenvalues()
        .iter()
        .copied()
        .collect();
    values.sort_by(|a, b| b.total_cmp(a));
    PrincipalValues {
        max: values[0],
        mid: values[1],
        min: values[2],
    }
}

/// Mean normal stress (σ_xx + σ_yy + σ_zz) / 3
pub fn compute_hydrostatic_stress(stress: &TensorComponents) -> f64 {
    (stress.xx + stress.yy + stress.zz) / 3.0
}

/// Stress minus its hydrostatic part
pub fn compute_deviatoric_stress(stress: &TensorComponents) -> TensorComponents {
    let hydro = compute_hydrostatic_stress(stress);
    TensorComponents {
        xx: stress.xx - hydro,
        yy: stress.yy - hydro,
        zz: stress.zz - hydro,
        ..*stress
    }
}

/// Scalar measures of one Cauchy stress tensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StressSummary {
    pub components: TensorComponents,
    pub von_mises: f64,
    pub hydrostatic: f64,
    pub deviatoric: TensorComponents,
    pub principal: PrincipalValues,
}

/// Summarize `stress` after converting it to Cauchy stress
pub fn summarize(
    stress: &DMatrix<f64>,
    measure: StressMeasure,
    kinematics: &Kinematics,
) -> Result<StressSummary> {
    let cauchy = to_cauchy(stress, measure, kinematics)?;
    let components = TensorComponents::from_tensor(&cauchy)?;
    Ok(StressSummary {
        components,
        von_mises: compute_mises_stress(&components),
        hydrostatic: compute_hydrostatic_stress(&components),
        deviatoric: compute_deviatoric_stress(&components),
        principal: compute_principal_stresses(&components),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniaxial(value: f64) -> TensorComponents {
        TensorComponents {
            xx: value,
            ..Default::default()
        }
    }

    #[test]
    fn mises_of_uniaxial_stress_is_the_axial_stress() {
        assert!((compute_mises_stress(&uniaxial(100.0)) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn mises_of_pure_shear() {
        let stress = TensorComponents {
            xy: 100.0,
            ..Default::default()
        };
        let expected = 3.0_f64.sqrt() * 100.0;
        assert!((compute_mises_stress(&stress) - expected).abs() < 1e-9);
    }

    #[test]
    fn principal_values_of_shear_are_plus_minus_tau() {
        let stress = TensorComponents {
            xy: 5.0,
            ..Default::default()
        };
        let p = compute_principal_stresses(&stress);
        assert!((p.max - 5.0).abs() < 1e-9);
        assert!(p.mid.abs() < 1e-9);
        assert!((p.min + 5.0).abs() < 1e-9);
    }

    #[test]
    fn deviatoric_part_is_trace_free() {
        let stress = TensorComponents {
            xx: 100.0,
            yy: 50.0,
            zz: 25.0,
            xy: 10.0,
            yz: 5.0,
            xz: 2.0,
        };
        let dev = compute_deviatoric_stress(&stress);
        assert!((dev.xx + dev.yy + dev.zz).abs() < 1e-9);
        assert_eq!(dev.xy, stress.xy);
    }

    #[test]
    fn plane_tensor_is_embedded_with_zero_out_of_plane_terms() {
        let t = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 3.0]);
        let c = TensorComponents::from_tensor(&t).unwrap();
        assert_eq!((c.xx, c.yy, c.zz, c.xy, c.yz, c.xz), (1.0, 3.0, 0.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn cauchy_of_first_piola_under_pure_stretch() {
        let kin = Kinematics::from_components(&[2.0, 0.0, 0.0, 1.0]).unwrap();
        let p = DMatrix::from_row_slice(2, 2, &[4.0, 0.0, 0.0, 1.0]);
        let sigma = cauchy_from_first_piola(&p, &kin).unwrap();
        // σ = P Fᵀ / J with J = 2
        assert!((sigma[(0, 0)] - 4.0).abs() < 1e-12);
        assert!((sigma[(1, 1)] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn summary_of_cauchy_stress_uses_it_unchanged() {
        let kin = Kinematics::identity(3);
        let stress = DMatrix::from_diagonal_element(3, 3, 2.0);
        let summary = summarize(&stress, StressMeasure::Cauchy, &kin).unwrap();
        assert!(summary.von_mises.abs() < 1e-12);
        assert!((summary.hydrostatic - 2.0).abs() < 1e-12);
        assert_eq!(summary.deviatoric, TensorComponents::default());
        assert!((summary.principal.min - 2.0).abs() < 1e-9);
    }
}
