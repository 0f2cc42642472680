//! Command-line front end: mesh inspection, configuration checks, and stress
//! evaluation for a single deformation state.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "mech-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Constitutive stress evaluation and mesh loading", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a mesh (and optional markers) and print a summary
    MeshInfo(commands::MeshInfoArgs),
    /// Validate a configuration file and the mesh it names
    Check(commands::CheckArgs),
    /// Evaluate the configured material for one deformation gradient
    Stress(commands::StressArgs),
}

fn parse_level(raw: &str) -> Level {
    match raw.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::MeshInfo(args) => commands::mesh_info(args),
        Commands::Check(args) => commands::check(args),
        Commands::Stress(args) => commands::stress(args),
    }
}
