//! Mesh and mesh-function loading with format dispatch.
//!
//! Files whose name ends in `.h5` go through the HDF5 reader, everything else
//! through the native dolfin XML reader.

use std::path::Path;

use mech_model::MeshConfig;

use crate::error::{IoError, Result};
use crate::mesh::{Mesh, MeshFunction};
use crate::xml;

/// Whether this build can read HDF5 files
pub fn has_hdf5() -> bool {
    cfg!(feature = "hdf5")
}

pub fn is_hdf5_file(path: &Path) -> bool {
    path.to_string_lossy().ends_with(".h5")
}

fn is_xml_file(path: &Path) -> bool {
    path.to_string_lossy().ends_with(".xml")
}

/// Load a mesh from an XML or HDF5 file
pub fn load_mesh(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let mesh = if is_hdf5_file(path) {
        load_mesh_hdf5(path)?
    } else {
        load_mesh_native(path)?
    };
    tracing::debug!(
        "loaded {} cells and {} vertices from {}",
        mesh.num_cells(),
        mesh.num_vertices(),
        path.display()
    );
    Ok(mesh)
}

/// Load a mesh function defined on `mesh` from an XML or HDF5 file
pub fn load_mesh_function(path: impl AsRef<Path>, mesh: &Mesh) -> Result<MeshFunction> {
    let path = path.as_ref();
    let function = if is_hdf5_file(path) {
        load_mesh_function_hdf5(path, mesh)?
    } else {
        load_mesh_function_native(path, mesh)?
    };
    function.check_against(mesh)?;
    tracing::debug!(
        "loaded mesh function of dimension {} with {} values from {}",
        function.dim,
        function.len(),
        path.display()
    );
    Ok(function)
}

fn load_mesh_native(path: &Path) -> Result<Mesh> {
    if !is_xml_file(path) {
        return Err(IoError::UnsupportedFormat(path.to_path_buf()));
    }
    xml::read_mesh_file(path)
}

fn load_mesh_function_native(path: &Path, mesh: &Mesh) -> Result<MeshFunction> {
    if !is_xml_file(path) {
        return Err(IoError::UnsupportedFormat(path.to_path_buf()));
    }
    xml::read_mesh_function_file(path, mesh)
}

/// Support is checked before the extension, so a build without HDF5 reports
/// the missing support even for a misnamed file.
fn check_hdf5_path(supported: bool, path: &Path) -> Result<()> {
    if !supported {
        return Err(IoError::Hdf5Unsupported);
    }
    if !is_hdf5_file(path) {
        return Err(IoError::InvalidExtension(path.to_path_buf()));
    }
    Ok(())
}

/// Load a mesh from an HDF5 file only
pub fn load_mesh_hdf5(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    check_hdf5_path(has_hdf5(), path)?;

    #[cfg(feature = "hdf5")]
    {
        crate::h5::read_mesh(path)
    }
    #[cfg(not(feature = "hdf5"))]
    {
        Err(IoError::Hdf5Unsupported)
    }
}

/// Load a mesh function from an HDF5 file only
pub fn load_mesh_function_hdf5(path: impl AsRef<Path>, mesh: &Mesh) -> Result<MeshFunction> {
    let path = path.as_ref();
    check_hdf5_path(has_hdf5(), path)?;

    #[cfg(feature = "hdf5")]
    {
        crate::h5::read_mesh_function(path, mesh)
    }
    #[cfg(not(feature = "hdf5"))]
    {
        let _ = mesh;
        Err(IoError::Hdf5Unsupported)
    }
}

/// Mesh together with its optional boundary markers
#[derive(Debug, Clone)]
pub struct MeshData {
    pub mesh: Mesh,
    pub boundaries: Option<MeshFunction>,
}

/// Load the mesh and boundary markers named in a configuration
pub fn load_from_config(config: &MeshConfig) -> Result<MeshData> {
    let mesh = load_mesh(&config.mesh_file)?;
    let boundaries = config
        .boundaries
        .as_ref()
        .map(|path| load_mesh_function(path, &mesh))
        .transpose()?;
    Ok(MeshData { mesh, boundaries })
}
