//! Deformation state handed to the constitutive laws.

use mech_model::MechanicsConfig;
use nalgebra::DMatrix;

use crate::error::{MaterialError, Result};

/// Dimension of a square tensor
pub fn check_square(t: &DMatrix<f64>) -> Result<usize> {
    if t.nrows() != t.ncols() {
        return Err(MaterialError::NotSquare {
            rows: t.nrows(),
            cols: t.ncols(),
        });
    }
    Ok(t.nrows())
}

/// Symmetric part (A + Aᵀ)/2
pub fn sym(t: &DMatrix<f64>) -> DMatrix<f64> {
    (t + t.transpose()) * 0.5
}

pub fn inverse(t: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    check_square(t)?;
    t.clone().try_inverse().ok_or(MaterialError::Singular)
}

/// Deformation gradient with its Jacobian and, for incompressible
/// materials, the hydrostatic pressure at the same state
#[derive(Debug, Clone, PartialEq)]
pub struct Kinematics {
    pub deformation_gradient: DMatrix<f64>,
    /// det F
    pub jacobian: f64,
    pub pressure: Option<f64>,
}

impl Kinematics {
    pub fn new(deformation_gradient: DMatrix<f64>) -> Result<Self> {
        check_square(&deformation_gradient)?;
        let jacobian = deformation_gradient.determinant();
        Ok(Self {
            deformation_gradient,
            jacobian,
            pressure: None,
        })
    }

    /// Undeformed state of dimension `dim`
    pub fn identity(dim: usize) -> Self {
        Self {
            deformation_gradient: DMatrix::identity(dim, dim),
            jacobian: 1.0,
            pressure: None,
        }
    }

    /// Build from row-major components; 1, 4 or 9 values give a 1-D, 2-D or
    /// 3-D gradient
    pub fn from_components(values: &[f64]) -> Result<Self> {
        let dim = match values.len() {
            1 => 1,
            4 => 2,
            9 => 3,
            n => return Err(MaterialError::ComponentCount(n)),
        };
        Self::new(DMatrix::from_row_slice(dim, dim, values))
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn dim(&self) -> usize {
        self.deformation_gradient.nrows()
    }
}

/// Configuration plus the current and previous deformation states
#[derive(Debug, Clone)]
pub struct ProblemState<'a> {
    pub config: &'a MechanicsConfig,
    pub current: Kinematics,
    /// State at the previous time step, needed for unsteady formulations
    pub previous: Option<Kinematics>,
}

impl<'a> ProblemState<'a> {
    pub fn new(config: &'a MechanicsConfig, current: Kinematics) -> Self {
        Self {
            config,
            current,
            previous: None,
        }
    }

    pub fn with_previous(mut self, previous: Kinematics) -> Self {
        self.previous = Some(previous);
        self
    }
}
