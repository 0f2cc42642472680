//! Isotropic elastic moduli and their conversion to Lamé parameters.
//!
//! Any two independent moduli out of Young's modulus (E), Poisson's ratio (ν),
//! bulk modulus (κ), and the Lamé parameters (λ, μ) determine the others.
//! All formulas assume three-dimensional isotropic elasticity.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Lamé parameters (λ, μ) used by the constitutive laws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LameParameters {
    /// First Lamé parameter λ
    pub lambda: f64,
    /// Shear modulus μ
    pub mu: f64,
}

impl LameParameters {
    pub fn new(lambda: f64, mu: f64) -> Self {
        Self { lambda, mu }
    }

    /// Young's modulus E = μ(3λ + 2μ)/(λ + μ)
    pub fn young(&self) -> f64 {
        self.mu * (3.0 * self.lambda + 2.0 * self.mu) / (self.lambda + self.mu)
    }

    /// Poisson's ratio ν = λ/(2(λ + μ))
    pub fn poisson(&self) -> f64 {
        self.lambda / (2.0 * (self.lambda + self.mu))
    }

    /// Bulk modulus κ = λ + 2μ/3
    pub fn bulk(&self) -> f64 {
        self.lambda + 2.0 * self.mu / 3.0
    }
}

/// Partially specified set of isotropic moduli
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElasticModuli {
    pub lambda: Option<f64>,
    pub mu: Option<f64>,
    pub young: Option<f64>,
    pub poisson: Option<f64>,
    pub kappa: Option<f64>,
}

impl ElasticModuli {
    /// Number of moduli that were given
    pub fn count(&self) -> usize {
        [self.lambda, self.mu, self.young, self.poisson, self.kappa]
            .iter()
            .filter(|m| m.is_some())
            .count()
    }

    /// Resolve the given moduli to Lamé parameters.
    ///
    /// When more than two moduli are present, pairs are tried in the order
    /// (λ, μ), (E, ν), (κ, μ), (E, μ), (μ, ν), (κ, E), (κ, ν), (λ, ν),
    /// (λ, E), (λ, κ) and the first complete pair wins.
    pub fn resolve(&self) -> Result<LameParameters> {
        if let Some(nu) = self.poisson {
            if !(nu > -1.0 && nu < 0.5) {
                return Err(ConfigError::InvalidModuli(format!(
                    "Poisson's ratio must lie in (-1, 0.5), got {nu}"
                )));
            }
        }

        let lame = match (self.lambda, self.mu, self.young, self.poisson, self.kappa) {
            (Some(la), Some(mu), _, _, _) => LameParameters::new(la, mu),
            (_, _, Some(e), Some(nu), _) => LameParameters::new(
                e * nu / ((1.0 + nu) * (1.0 - 2.0 * nu)),
                e / (2.0 * (1.0 + nu)),
            ),
            (_, Some(mu), _, _, Some(k)) => LameParameters::new(k - 2.0 * mu / 3.0, mu),
            (_, Some(mu), Some(e), _, _) => {
                let denom = 3.0 * mu - e;
                if denom == 0.0 {
                    return Err(ConfigError::InvalidModuli(
                        "E = 3μ corresponds to an unbounded λ".to_string(),
                    ));
                }
                LameParameters::new(mu * (e - 2.0 * mu) / denom, mu)
            }
            (_, Some(mu), _, Some(nu), _) => {
                LameParameters::new(2.0 * mu * nu / (1.0 - 2.0 * nu), mu)
            }
            (_, _, Some(e), _, Some(k)) => {
                let denom = 9.0 * k - e;
                if denom == 0.0 {
                    return Err(ConfigError::InvalidModuli(
                        "E = 9κ corresponds to an unbounded μ".to_string(),
                    ));
                }
                LameParameters::new(3.0 * k * (3.0 * k - e) / denom, 3.0 * k * e / denom)
            }
            (_, _, _, Some(nu), Some(k)) => LameParameters::new(
                3.0 * k * nu / (1.0 + nu),
                3.0 * k * (1.0 - 2.0 * nu) / (2.0 * (1.0 + nu)),
            ),
            (Some(la), _, _, Some(nu), _) => {
                if nu == 0.0 {
                    return Err(ConfigError::InvalidModuli(
                        "μ is undetermined by λ together with ν = 0".to_string(),
                    ));
                }
                LameParameters::new(la, la * (1.0 - 2.0 * nu) / (2.0 * nu))
            }
            (Some(la), _, Some(e), _, _) => {
                let r = (e * e + 9.0 * la * la + 2.0 * e * la).sqrt();
                LameParameters::new(la, (e - 3.0 * la + r) / 4.0)
            }
            (Some(la), _, _, _, Some(k)) => LameParameters::new(la, 1.5 * (k - la)),
            _ => {
                return Err(ConfigError::MissingModuli(format!(
                    "two independent moduli are required, {} given",
                    self.count()
                )));
            }
        };

        if !(lame.mu > 0.0) || !lame.lambda.is_finite() {
            return Err(ConfigError::InvalidModuli(format!(
                "resolved to lambda = {}, mu = {}",
                lame.lambda, lame.mu
            )));
        }

        Ok(lame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn steel() -> LameParameters {
        ElasticModuli {
            young: Some(210.0e9),
            poisson: Some(0.3),
            ..Default::default()
        }
        .resolve()
        .expect("steel moduli should resolve")
    }

    #[test]
    fn young_poisson_round_trip_through_lame() {
        let lame = steel();
        assert!((lame.young() - 210.0e9).abs() / 210.0e9 < TOL);
        assert!((lame.poisson() - 0.3).abs() < TOL);
    }

    #[test]
    fn every_pair_agrees_with_lame_pair() {
        let reference = steel();
        let e = reference.young();
        let nu = reference.poisson();
        let k = reference.bulk();
        let la = reference.lambda;
        let mu = reference.mu;

        let pairs = [
            ElasticModuli { kappa: Some(k), mu: Some(mu), ..Default::default() },
            ElasticModuli { young: Some(e), mu: Some(mu), ..Default::default() },
            ElasticModuli { mu: Some(mu), poisson: Some(nu), ..Default::default() },
            ElasticModuli { kappa: Some(k), young: Some(e), ..Default::default() },
            ElasticModuli { kappa: Some(k), poisson: Some(nu), ..Default::default() },
            ElasticModuli { lambda: Some(la), poisson: Some(nu), ..Default::default() },
            ElasticModuli { lambda: Some(la), young: Some(e), ..Default::default() },
            ElasticModuli { lambda: Some(la), kappa: Some(k), ..Default::default() },
        ];

        for moduli in pairs {
            let lame = moduli.resolve().expect("pair should resolve");
            assert!(
                (lame.lambda - la).abs() / la < 1e-6,
                "lambda mismatch for {moduli:?}: {}",
                lame.lambda
            );
            assert!(
                (lame.mu - mu).abs() / mu < 1e-6,
                "mu mismatch for {moduli:?}: {}",
                lame.mu
            );
        }
    }

    #[test]
    fn single_modulus_is_rejected() {
        let err = ElasticModuli {
            mu: Some(1.0),
            ..Default::default()
        }
        .resolve()
        .expect_err("one modulus is not enough");
        assert!(matches!(err, ConfigError::MissingModuli(_)));
    }

    #[test]
    fn incompressible_poisson_is_rejected() {
        let err = ElasticModuli {
            young: Some(1.0),
            poisson: Some(0.5),
            ..Default::default()
        }
        .resolve()
        .expect_err("nu = 0.5 is not admissible");
        assert!(matches!(err, ConfigError::InvalidModuli(_)));
    }
}
