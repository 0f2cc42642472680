//! Reader for meshes and mesh functions stored in dolfin's HDF5 layout.
//!
//! A mesh lives in a group holding `coordinates` (vertices × gdim) and
//! `topology` (cells × vertices per cell, with a `celltype` attribute). A mesh
//! function group holds `values` and the vertex lists of the marked entities
//! in `topology`.

use std::path::Path;

use hdf5::types::{VarLenAscii, VarLenUnicode};
use hdf5::{Dataset, File};

use crate::error::{IoError, Result};
use crate::mesh::{CellType, Mesh, MeshFunction};

pub const MESH_GROUP: &str = "mesh";
pub const MESH_FUNCTION_GROUP: &str = "mesh_function";

fn shape_2d(dataset: &Dataset, name: &str) -> Result<(usize, usize)> {
    match dataset.shape().as_slice() {
        [rows, cols] => Ok((*rows, *cols)),
        [rows] => Ok((*rows, 1)),
        other => Err(IoError::InvalidData(format!(
            "dataset '{name}' has unexpected shape {other:?}"
        ))),
    }
}

fn read_indices(dataset: &Dataset, name: &str) -> Result<Vec<usize>> {
    dataset
        .read_raw::<i64>()?
        .into_iter()
        .map(|v| {
            usize::try_from(v)
                .map_err(|_| IoError::InvalidData(format!("negative index {v} in '{name}'")))
        })
        .collect()
}

fn cell_type_attr(dataset: &Dataset) -> Option<CellType> {
    let attr = dataset.attr("celltype").ok()?;
    let name = attr
        .read_scalar::<VarLenUnicode>()
        .map(|s| s.as_str().to_string())
        .or_else(|_| attr.read_scalar::<VarLenAscii>().map(|s| s.as_str().to_string()))
        .ok()?;
    CellType::from_dolfin_name(&name)
}

pub fn read_mesh(path: &Path) -> Result<Mesh> {
    let file = File::open(path)?;
    let group = file.group(MESH_GROUP)?;

    let coordinates = group.dataset("coordinates")?;
    let (num_vertices, gdim) = shape_2d(&coordinates, "coordinates")?;
    let raw = coordinates.read_raw::<f64>()?;
    if gdim == 0 || gdim > 3 || raw.len() != num_vertices * gdim {
        return Err(IoError::InvalidData(format!(
            "coordinates hold {} values for {num_vertices} vertices of dimension {gdim}",
            raw.len()
        )));
    }
    let points = raw
        .chunks(gdim)
        .map(|row| {
            let mut p = [0.0; 3];
            p[..gdim].copy_from_slice(row);
            p
        })
        .collect();

    let topology = group.dataset("topology")?;
    let (_, width) = shape_2d(&topology, "topology")?;
    let cell_type = cell_type_attr(&topology)
        .or_else(|| CellType::infer(width, gdim))
        .ok_or_else(|| {
            IoError::InvalidData(format!("cannot determine cell type of {width}-vertex cells"))
        })?;
    let cells = cell_type.split_cells(&read_indices(&topology, "topology")?, width)?;

    Mesh::new(gdim, cell_type, points, cells)
}

pub fn read_mesh_function(path: &Path, mesh: &Mesh) -> Result<MeshFunction> {
    let file = File::open(path)?;
    let group = file.group(MESH_FUNCTION_GROUP)?;

    let values = group
        .dataset("values")?
        .read_raw::<u64>()?
        .into_iter()
        .map(|v| v as usize)
        .collect::<Vec<_>>();

    let topology = group.dataset("topology")?;
    let (rows, width) = shape_2d(&topology, "topology")?;
    if rows != values.len() {
        return Err(IoError::InvalidData(format!(
            "{} values for {rows} entities",
            values.len()
        )));
    }
    let dim = mesh.cell_type.entity_dim(width).ok_or_else(|| {
        IoError::InvalidData(format!(
            "{width}-vertex entities do not belong to a {} mesh",
            mesh.cell_type.dolfin_name()
        ))
    })?;

    let entities = mesh.entities(dim)?;
    let mut function = MeshFunction::new(dim, entities.len(), 0);
    for (vertices, value) in read_indices(&topology, "topology")?
        .chunks(width)
        .zip(values)
    {
        let entity = entities.find(vertices).ok_or_else(|| {
            IoError::InvalidData(format!("entity with vertices {vertices:?} is not in the mesh"))
        })?;
        function.values[entity] = value;
    }
    Ok(function)
}
