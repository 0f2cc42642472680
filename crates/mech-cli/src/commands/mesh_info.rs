use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use mech_io::{Mesh, MeshFunction, load_mesh, load_mesh_function};
use tracing::info;

#[derive(Args)]
pub struct MeshInfoArgs {
    /// Mesh file (.xml, or .h5 when built with HDF5 support)
    pub mesh: PathBuf,

    /// Mesh function with entity markers for the same mesh
    #[arg(short, long)]
    pub markers: Option<PathBuf>,
}

pub fn execute(args: MeshInfoArgs) -> anyhow::Result<()> {
    info!("Loading mesh: {}", args.mesh.display());
    let mesh = load_mesh(&args.mesh)
        .with_context(|| format!("failed to load mesh {}", args.mesh.display()))?;
    print_mesh(&mesh);

    if let Some(path) = &args.markers {
        info!("Loading markers: {}", path.display());
        let markers = load_mesh_function(path, &mesh)
            .with_context(|| format!("failed to load mesh function {}", path.display()))?;
        print_markers(&markers);
    }
    Ok(())
}

pub(crate) fn print_mesh(mesh: &Mesh) {
    println!("Mesh");
    println!("  cell type:  {}", mesh.cell_type.dolfin_name());
    println!(
        "  dimension:  {} (topological {})",
        mesh.geometric_dim,
        mesh.topological_dim()
    );
    println!("  vertices:   {}", mesh.num_vertices());
    println!("  cells:      {}", mesh.num_cells());
    if let Some((min, max)) = mesh.bounding_box() {
        let dim = mesh.geometric_dim;
        println!("  bounds min: {:?}", &min[..dim]);
        println!("  bounds max: {:?}", &max[..dim]);
    }
}

pub(crate) fn print_markers(markers: &MeshFunction) {
    println!("Markers (dimension {}, {} entities)", markers.dim, markers.len());
    for (value, count) in markers.histogram() {
        println!("  {value:>6}: {count}");
    }
}
