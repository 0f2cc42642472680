use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use mech_materials::{
    Kinematics, ProblemState, StressMeasure, StressResponse, StressSummary, material_stress,
    summarize,
};
use mech_model::MechanicsConfig;
use nalgebra::DMatrix;
use serde::Serialize;
use tracing::info;

#[derive(Args)]
pub struct StressArgs {
    /// Problem configuration (JSON)
    pub config: PathBuf,

    /// Deformation gradient, row-major and comma separated (1, 4 or 9 values)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub deformation: Vec<f64>,

    /// Deformation gradient at the previous time step
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub previous: Option<Vec<f64>>,

    /// Pressure at the current step (incompressible materials)
    #[arg(long, allow_hyphen_values = true)]
    pub pressure: Option<f64>,

    /// Pressure at the previous step (incompressible materials)
    #[arg(long, allow_hyphen_values = true)]
    pub previous_pressure: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StressReport {
    pub generated_at: String,
    pub material: &'static str,
    pub formulation: &'static str,
    pub measure: StressMeasure,
    pub stress: Vec<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_stress: Option<Vec<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta_weighted: Option<Vec<Vec<f64>>>,
    pub summary: StressSummary,
}

fn rows(m: &DMatrix<f64>) -> Vec<Vec<f64>> {
    m.row_iter().map(|row| row.iter().copied().collect()).collect()
}

fn state(components: &[f64], pressure: Option<f64>) -> anyhow::Result<Kinematics> {
    let kinematics = Kinematics::from_components(components)?;
    Ok(match pressure {
        Some(p) => kinematics.with_pressure(p),
        None => kinematics,
    })
}

pub fn build_report(config: &MechanicsConfig, args: &StressArgs) -> anyhow::Result<StressReport> {
    let current = state(&args.deformation, args.pressure).context("invalid --deformation")?;
    let mut problem = ProblemState::new(config, current);
    if let Some(previous) = &args.previous {
        problem = problem
            .with_previous(state(previous, args.previous_pressure).context("invalid --previous")?);
    }

    let response: StressResponse =
        material_stress(&problem).context("stress evaluation failed")?;
    let summary = summarize(&response.current, response.measure, &problem.current)?;

    Ok(StressReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        material: config.material.kind.as_str(),
        formulation: if config.is_inverse() { "inverse" } else { "forward" },
        measure: response.measure,
        stress: rows(&response.current),
        previous_stress: response.previous.as_ref().map(rows),
        theta_weighted: response
            .previous
            .as_ref()
            .map(|_| rows(&response.theta_weighted(config.formulation.time.theta))),
        summary,
    })
}

pub fn execute(args: StressArgs) -> anyhow::Result<()> {
    let config = MechanicsConfig::from_json_file(&args.config)
        .with_context(|| format!("invalid configuration {}", args.config.display()))?;
    let report = build_report(&config, &args)?;
    info!(
        "{} stress evaluated, von Mises = {:.6e}",
        config.material.kind.as_str(),
        report.summary.von_mises
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
