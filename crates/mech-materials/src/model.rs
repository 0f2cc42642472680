//! Constitutive model trait and dispatch on the configured material.

use mech_model::{LameParameters, MaterialKind, MechanicsConfig};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{MaterialError, Result};
use crate::kinematics::{Kinematics, ProblemState};
use crate::linear_elastic::{INCOMPRESSIBLE_LAMBDA, forward_lin_elastic, inverse_lin_elastic};
use crate::neo_hookean::neo_hookean_stress;

/// Which stress tensor a model returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressMeasure {
    /// Force per unit area in the current configuration
    Cauchy,
    /// Force per unit area in the reference configuration
    FirstPiolaKirchhoff,
}

/// Material law mapping a deformation state to a stress tensor
pub trait ConstitutiveModel {
    fn name(&self) -> &'static str;

    fn measure(&self, inverse: bool) -> StressMeasure;

    fn stress(&self, kinematics: &Kinematics, inverse: bool) -> Result<DMatrix<f64>>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearElastic {
    pub lame: LameParameters,
}

impl LinearElastic {
    pub fn new(lame: LameParameters) -> Self {
        if lame.lambda > INCOMPRESSIBLE_LAMBDA {
            tracing::warn!(
                "lambda = {} exceeds {INCOMPRESSIBLE_LAMBDA}, dropping volumetric stress",
                lame.lambda
            );
        }
        Self { lame }
    }

    pub fn from_config(config: &MechanicsConfig) -> Result<Self> {
        Ok(Self::new(config.lame()?))
    }
}

impl ConstitutiveModel for LinearElastic {
    fn name(&self) -> &'static str {
        MaterialKind::LinElastic.as_str()
    }

    fn measure(&self, _inverse: bool) -> StressMeasure {
        StressMeasure::Cauchy
    }

    fn stress(&self, kinematics: &Kinematics, inverse: bool) -> Result<DMatrix<f64>> {
        let f = &kinematics.deformation_gradient;
        if inverse {
            inverse_lin_elastic(f, self.lame.lambda, self.lame.mu)
        } else {
            forward_lin_elastic(f, self.lame.lambda, self.lame.mu)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeoHookean {
    pub lame: LameParameters,
    pub incompressible: bool,
}

impl NeoHookean {
    pub fn new(lame: LameParameters, incompressible: bool) -> Self {
        Self {
            lame,
            incompressible,
        }
    }

    pub fn from_config(config: &MechanicsConfig) -> Result<Self> {
        Ok(Self::new(config.lame()?, config.material.incompressible))
    }
}

impl ConstitutiveModel for NeoHookean {
    fn name(&self) -> &'static str {
        MaterialKind::NeoHookean.as_str()
    }

    fn measure(&self, inverse: bool) -> StressMeasure {
        if inverse {
            StressMeasure::Cauchy
        } else {
            StressMeasure::FirstPiolaKirchhoff
        }
    }

    fn stress(&self, kinematics: &Kinematics, inverse: bool) -> Result<DMatrix<f64>> {
        neo_hookean_stress(
            &kinematics.deformation_gradient,
            kinematics.jacobian,
            self.lame.lambda,
            self.lame.mu,
            self.incompressible,
            inverse,
            kinematics.pressure,
        )
    }
}

/// Stress at the current step and, for unsteady problems, the previous step
#[derive(Debug, Clone, PartialEq)]
pub struct StressResponse {
    pub measure: StressMeasure,
    pub current: DMatrix<f64>,
    pub previous: Option<DMatrix<f64>>,
}

impl StressResponse {
    /// θ·current + (1 − θ)·previous; the current stress alone for steady problems
    pub fn theta_weighted(&self, theta: f64) -> DMatrix<f64> {
        match &self.previous {
            Some(previous) => &self.current * theta + previous * (1.0 - theta),
            None => self.current.clone(),
        }
    }
}

/// Evaluate `model` on the states held by `problem`
pub fn evaluate(model: &dyn ConstitutiveModel, problem: &ProblemState<'_>) -> Result<StressResponse> {
    let inverse = problem.config.is_inverse();
    let current = model.stress(&problem.current, inverse)?;

    let previous = if problem.config.is_unsteady() {
        let state = problem
            .previous
            .as_ref()
            .ok_or(MaterialError::MissingPreviousState)?;
        Some(model.stress(state, inverse)?)
    } else {
        None
    };

    Ok(StressResponse {
        measure: model.measure(inverse),
        current,
        previous,
    })
}

/// Build the model named by `material.type`
pub fn model_from_config(config: &MechanicsConfig) -> Result<Box<dyn ConstitutiveModel>> {
    let model: Box<dyn ConstitutiveModel> = match config.material.kind {
        MaterialKind::LinElastic => Box::new(LinearElastic::from_config(config)?),
        MaterialKind::NeoHookean => Box::new(NeoHookean::from_config(config)?),
    };
    tracing::debug!(
        "using {} material ({} formulation)",
        model.name(),
        if config.is_inverse() { "inverse" } else { "forward" }
    );
    Ok(model)
}

/// Stress of whichever material the configuration names
pub fn material_stress(problem: &ProblemState<'_>) -> Result<StressResponse> {
    let model = model_from_config(problem.config)?;
    evaluate(model.as_ref(), problem)
}
