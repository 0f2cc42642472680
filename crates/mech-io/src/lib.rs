//! Mesh I/O for the mechanics workspace.
//!
//! This crate provides:
//! - **Mesh / MeshFunction** data structures with on-demand entity enumeration
//! - **dolfin XML** reader for meshes and mesh functions
//! - **HDF5** reader for dolfin's HDF5 layout (optional, enable with `hdf5` feature)
//! - **Format dispatch** on the file name: `.h5` goes to HDF5, everything else to XML

pub mod error;
#[cfg(feature = "hdf5")]
pub mod h5;
pub mod loader;
pub mod mesh;
pub mod xml;

pub use error::{IoError, Result};
pub use loader::{
    MeshData, has_hdf5, is_hdf5_file, load_from_config, load_mesh, load_mesh_function,
    load_mesh_function_hdf5, load_mesh_hdf5,
};
pub use mesh::{CellType, Mesh, MeshEntities, MeshFunction};
