use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use mech_io::load_from_config;
use mech_model::MechanicsConfig;
use tracing::{info, warn};

use super::mesh_info::{print_markers, print_mesh};

#[derive(Args)]
pub struct CheckArgs {
    /// Problem configuration (JSON)
    pub config: PathBuf,

    /// Skip loading the mesh named in the configuration
    #[arg(long)]
    pub skip_mesh: bool,
}

pub fn execute(args: CheckArgs) -> anyhow::Result<()> {
    info!("Checking configuration: {}", args.config.display());
    let config = MechanicsConfig::from_json_file(&args.config)
        .with_context(|| format!("invalid configuration {}", args.config.display()))?;
    let lame = config.lame().context("cannot resolve elastic moduli")?;

    println!("Material: {}", config.material.kind.as_str());
    println!("  lambda:  {:.6e}", lame.lambda);
    println!("  mu:      {:.6e}", lame.mu);
    println!("  E:       {:.6e}", lame.young());
    println!("  nu:      {:.6}", lame.poisson());
    println!("  kappa:   {:.6e}", lame.bulk());
    if config.material.incompressible {
        println!("  incompressible");
    }

    let time = &config.formulation.time;
    println!(
        "Formulation: {}, {}",
        if config.is_inverse() { "inverse" } else { "forward" },
        if config.is_unsteady() { "unsteady" } else { "steady" }
    );
    if config.is_unsteady() {
        println!("  dt = {:?}, theta = {}", time.dt, time.theta);
    }

    match (&config.mesh, args.skip_mesh) {
        (Some(mesh_config), false) => {
            let data = load_from_config(mesh_config).context("failed to load mesh")?;
            print_mesh(&data.mesh);
            if let Some(boundaries) = &data.boundaries {
                print_markers(boundaries);
            }
        }
        (Some(_), true) => info!("Mesh loading skipped"),
        (None, _) => warn!("Configuration names no mesh"),
    }

    info!("Configuration OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../mech-io/tests/fixtures")
            .join(name)
    }

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("problem.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn check_loads_configured_mesh_and_markers() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            r#"{{ "material": {{ "type": "neo_hookean", "young": 10.0, "poisson": 0.3 }},
                 "mesh": {{ "mesh_file": {:?}, "boundaries": {:?} }} }}"#,
            fixture("two_tets.xml"),
            fixture("two_tets_facets.xml"),
        );
        let config = write_config(dir.path(), &body);
        execute(CheckArgs {
            config,
            skip_mesh: false,
        })
        .unwrap();
    }

    #[test]
    fn check_reports_missing_mesh_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            r#"{ "material": { "type": "lin_elastic", "lambda": 1.0, "mu": 1.0 },
                 "mesh": { "mesh_file": "absent.xml" } }"#,
        );
        let args = CheckArgs {
            config,
            skip_mesh: false,
        };
        assert!(execute(args).is_err());
    }

    #[test]
    fn check_rejects_underdetermined_material() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            r#"{ "material": { "type": "lin_elastic", "mu": 1.0 } }"#,
        );
        let args = CheckArgs {
            config,
            skip_mesh: true,
        };
        assert!(execute(args).is_err());
    }
}
