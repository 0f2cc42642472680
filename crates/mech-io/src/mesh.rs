//! Mesh and mesh-function data structures.
//!
//! A [`Mesh`] stores vertex coordinates and cell connectivity for a single
//! cell type. Entities of intermediate dimension (edges, facets) are not
//! stored but enumerated on demand by [`Mesh::entities`], which numbers them
//! in order of first appearance while walking the cells. Vertices keep their
//! vertex index and cells keep their cell index.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{IoError, Result};

/// Cell shape of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    Point,
    Interval,
    Triangle,
    Quadrilateral,
    Tetrahedron,
    Hexahedron,
}

impl CellType {
    /// Number of vertices of one cell
    pub fn num_vertices(self) -> usize {
        match self {
            CellType::Point => 1,
            CellType::Interval => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral => 4,
            CellType::Tetrahedron => 4,
            CellType::Hexahedron => 8,
        }
    }

    pub fn topological_dim(self) -> usize {
        match self {
            CellType::Point => 0,
            CellType::Interval => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron => 3,
        }
    }

    /// Split flat connectivity into cells of `width` vertices each
    pub fn split_cells(self, flat: &[usize], width: usize) -> Result<Vec<Vec<usize>>> {
        if width != self.num_vertices() {
            return Err(IoError::InvalidData(format!(
                "connectivity has {width} columns but {} cells have {} vertices",
                self.dolfin_name(),
                self.num_vertices()
            )));
        }
        if flat.len() % width != 0 {
            return Err(IoError::InvalidData(format!(
                "{} indices do not split into {width}-vertex cells",
                flat.len()
            )));
        }
        Ok(flat.chunks(width).map(<[usize]>::to_vec).collect())
    }

    /// Parse the cell type name used in dolfin files
    pub fn from_dolfin_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "point" | "vertex" => Some(CellType::Point),
            "interval" => Some(CellType::Interval),
            "triangle" => Some(CellType::Triangle),
            "quadrilateral" => Some(CellType::Quadrilateral),
            "tetrahedron" => Some(CellType::Tetrahedron),
            "hexahedron" => Some(CellType::Hexahedron),
            _ => None,
        }
    }

    pub fn dolfin_name(self) -> &'static str {
        match self {
            CellType::Point => "point",
            CellType::Interval => "interval",
            CellType::Triangle => "triangle",
            CellType::Quadrilateral => "quadrilateral",
            CellType::Tetrahedron => "tetrahedron",
            CellType::Hexahedron => "hexahedron",
        }
    }

    /// Guess the cell type from the number of vertices per cell.
    ///
    /// Four vertices are ambiguous; they are read as a tetrahedron in 3-D
    /// and as a quadrilateral otherwise.
    pub fn infer(num_vertices: usize, geometric_dim: usize) -> Option<Self> {
        match num_vertices {
            1 => Some(CellType::Point),
            2 => Some(CellType::Interval),
            3 => Some(CellType::Triangle),
            4 if geometric_dim >= 3 => Some(CellType::Tetrahedron),
            4 => Some(CellType::Quadrilateral),
            8 => Some(CellType::Hexahedron),
            _ => None,
        }
    }

    /// Dimension of the sub-entity with `num_vertices` vertices
    pub fn entity_dim(self, num_vertices: usize) -> Option<usize> {
        (0..=self.topological_dim()).find(|&d| {
            self.local_entities(d)
                .first()
                .is_some_and(|e| e.len() == num_vertices)
        })
    }

    /// Local vertex lists of the sub-entities of dimension `dim`.
    ///
    /// Simplex facets are numbered by their opposite vertex; quadrilateral and
    /// hexahedron vertices follow tensor-product ordering.
    pub fn local_entities(self, dim: usize) -> Vec<Vec<usize>> {
        let tdim = self.topological_dim();
        if dim > tdim {
            return Vec::new();
        }
        if dim == 0 {
            return (0..self.num_vertices()).map(|v| vec![v]).collect();
        }
        if dim == tdim {
            return vec![(0..self.num_vertices()).collect()];
        }

        let table: &[&[usize]] = match (self, dim) {
            (CellType::Triangle, 1) => &[&[1, 2], &[0, 2], &[0, 1]],
            (CellType::Tetrahedron, 1) => &[&[2, 3], &[1, 3], &[1, 2], &[0, 3], &[0, 2], &[0, 1]],
            (CellType::Tetrahedron, 2) => &[&[1, 2, 3], &[0, 2, 3], &[0, 1, 3], &[0, 1, 2]],
            (CellType::Quadrilateral, 1) => &[&[0, 1], &[2, 3], &[0, 2], &[1, 3]],
            (CellType::Hexahedron, 1) => &[
                &[0, 1],
                &[2, 3],
                &[4, 5],
                &[6, 7],
                &[0, 2],
                &[1, 3],
                &[4, 6],
                &[5, 7],
                &[0, 4],
                &[1, 5],
                &[2, 6],
                &[3, 7],
            ],
            (CellType::Hexahedron, 2) => &[
                &[0, 1, 2, 3],
                &[4, 5, 6, 7],
                &[0, 1, 4, 5],
                &[2, 3, 6, 7],
                &[0, 2, 4, 6],
                &[1, 3, 5, 7],
            ],
            _ => &[],
        };
        table.iter().map(|e| e.to_vec()).collect()
    }
}

/// Finite element mesh with a single cell type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Number of coordinates per vertex (1, 2 or 3)
    pub geometric_dim: usize,
    pub cell_type: CellType,
    /// Vertex coordinates, padded with zeros beyond `geometric_dim`
    pub coordinates: Vec<[f64; 3]>,
    /// Cell connectivity as vertex indices
    pub cells: Vec<Vec<usize>>,
}

impl Mesh {
    /// Create a mesh, checking connectivity against the vertex count
    pub fn new(
        geometric_dim: usize,
        cell_type: CellType,
        coordinates: Vec<[f64; 3]>,
        cells: Vec<Vec<usize>>,
    ) -> Result<Self> {
        let mesh = Self {
            geometric_dim,
            cell_type,
            coordinates,
            cells,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=3).contains(&self.geometric_dim) {
            return Err(IoError::InvalidData(format!(
                "geometric dimension must be 1, 2 or 3, got {}",
                self.geometric_dim
            )));
        }
        if self.cell_type.topological_dim() > self.geometric_dim {
            return Err(IoError::InvalidData(format!(
                "{} cells cannot be embedded in {}-D space",
                self.cell_type.dolfin_name(),
                self.geometric_dim
            )));
        }

        let expected = self.cell_type.num_vertices();
        let num_vertices = self.coordinates.len();
        for (index, cell) in self.cells.iter().enumerate() {
            if cell.len() != expected {
                return Err(IoError::InvalidData(format!(
                    "cell {index} has {} vertices but a {} has {expected}",
                    cell.len(),
                    self.cell_type.dolfin_name()
                )));
            }
            if let Some(&v) = cell.iter().find(|&&v| v >= num_vertices) {
                return Err(IoError::InvalidData(format!(
                    "cell {index} references vertex {v} but the mesh has {num_vertices} vertices"
                )));
            }
        }
        Ok(())
    }

    pub fn num_vertices(&self) -> usize {
        self.coordinates.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn topological_dim(&self) -> usize {
        self.cell_type.topological_dim()
    }

    /// Coordinates of a vertex, truncated to the geometric dimension
    pub fn vertex(&self, index: usize) -> Option<&[f64]> {
        self.coordinates
            .get(index)
            .map(|c| &c[..self.geometric_dim])
    }

    /// Axis-aligned bounding box as (min, max)
    pub fn bounding_box(&self) -> Option<([f64; 3], [f64; 3])> {
        let first = *self.coordinates.first()?;
        let bounds = self
            .coordinates
            .iter()
            .fold((first, first), |(mut lo, mut hi), c| {
                for k in 0..3 {
                    lo[k] = lo[k].min(c[k]);
                    hi[k] = hi[k].max(c[k]);
                }
                (lo, hi)
            });
        Some(bounds)
    }

    /// Enumerate the mesh entities of dimension `dim`
    pub fn entities(&self, dim: usize) -> Result<MeshEntities> {
        let tdim = self.topological_dim();
        if dim > tdim {
            return Err(IoError::InvalidData(format!(
                "entity dimension {dim} exceeds topological dimension {tdim}"
            )));
        }

        let local = self.cell_type.local_entities(dim);
        let mut vertices: Vec<Vec<usize>> = Vec::new();
        let mut lookup: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut cell_entities = Vec::with_capacity(self.cells.len());

        if dim == 0 {
            vertices = (0..self.num_vertices()).map(|v| vec![v]).collect();
            lookup = vertices.iter().cloned().zip(0..).collect();
        } else if dim == tdim {
            for (index, cell) in self.cells.iter().enumerate() {
                vertices.push(cell.clone());
                lookup.insert(sorted(cell), index);
            }
        }

        for (index, cell) in self.cells.iter().enumerate() {
            let mut ids = Vec::with_capacity(local.len());
            for entity in &local {
                let global: Vec<usize> = entity.iter().map(|&v| cell[v]).collect();
                let key = sorted(&global);
                let id = if dim == tdim {
                    index
                } else if let Some(&id) = lookup.get(&key) {
                    id
                } else {
                    let id = vertices.len();
                    vertices.push(global);
                    lookup.insert(key, id);
                    id
                };
                ids.push(id);
            }
            cell_entities.push(ids);
        }

        Ok(MeshEntities {
            dim,
            vertices,
            lookup,
            cell_entities,
        })
    }
}

fn sorted(vertices: &[usize]) -> Vec<usize> {
    let mut key = vertices.to_vec();
    key.sort_unstable();
    key
}

/// Entities of one dimension with their vertex lists
#[derive(Debug, Clone)]
pub struct MeshEntities {
    pub dim: usize,
    /// Vertex indices of every entity
    pub vertices: Vec<Vec<usize>>,
    lookup: HashMap<Vec<usize>, usize>,
    cell_entities: Vec<Vec<usize>>,
}

impl MeshEntities {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Entity index of a cell's local entity
    pub fn cell_entity(&self, cell: usize, local: usize) -> Option<usize> {
        self.cell_entities.get(cell)?.get(local).copied()
    }

    /// Entity index from its vertices, in any order
    pub fn find(&self, vertices: &[usize]) -> Option<usize> {
        self.lookup.get(&sorted(vertices)).copied()
    }
}

/// Non-negative integer marker attached to every entity of one dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshFunction {
    /// Dimension of the marked entities
    pub dim: usize,
    pub values: Vec<usize>,
}

impl MeshFunction {
    /// Mesh function of `size` entities all set to `value`
    pub fn new(dim: usize, size: usize, value: usize) -> Self {
        Self {
            dim,
            values: vec![value; size],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, entity: usize) -> Option<usize> {
        self.values.get(entity).copied()
    }

    /// Number of entities carrying each marker value
    pub fn histogram(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for &value in &self.values {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    /// Check the size against the entity count of `mesh`
    pub fn check_against(&self, mesh: &Mesh) -> Result<()> {
        let expected = mesh.entities(self.dim)?.len();
        if self.values.len() != expected {
            return Err(IoError::InvalidData(format!(
                "mesh function of dimension {} has {} values but the mesh has {expected} entities",
                self.dim,
                self.values.len()
            )));
        }
        Ok(())
    }
}
