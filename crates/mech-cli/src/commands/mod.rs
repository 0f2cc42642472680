//! Subcommand implementations

mod check;
mod mesh_info;
mod stress;

pub use check::{CheckArgs, execute as check};
pub use mesh_info::{MeshInfoArgs, execute as mesh_info};
pub use stress::{StressArgs, execute as stress};
