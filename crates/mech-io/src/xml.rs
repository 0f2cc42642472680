//! Reader for the dolfin XML mesh and mesh-function formats.
//!
//! Mesh files look like
//!
//! ```xml
//! <dolfin xmlns:dolfin="http://fenicsproject.org">
//!   <mesh celltype="triangle" dim="2">
//!     <vertices size="3">
//!       <vertex index="0" x="0" y="0"/>
//!       ...
//!     </vertices>
//!     <cells size="1">
//!       <triangle index="0" v0="0" v1="1" v2="2"/>
//!     </cells>
//!   </mesh>
//! </dolfin>
//! ```
//!
//! Mesh functions come either as one `<entity index value/>` per entity, or as a
//! `<mesh_value_collection>` of `<value cell_index local_entity value/>` items
//! that address entities through the cells containing them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{IoError, Result};
use crate::mesh::{CellType, Mesh, MeshFunction};

/// Attributes of one XML element
struct Attrs {
    element: String,
    map: HashMap<String, String>,
}

impl Attrs {
    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let element = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        let mut map = HashMap::new();
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            map.insert(key, value);
        }
        Ok(Self { element, map })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    fn required(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| {
            IoError::Parse(format!("<{}> is missing attribute '{key}'", self.element))
        })
    }

    fn parse<T: FromStr>(&self, key: &str) -> Result<T> {
        let raw = self.required(key)?;
        raw.trim().parse::<T>().map_err(|_| {
            IoError::Parse(format!(
                "<{}> attribute '{key}' has invalid value '{raw}'",
                self.element
            ))
        })
    }

    fn parse_opt<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            Some(_) => self.parse(key).map(Some),
            None => Ok(None),
        }
    }
}

/// Store `item` at `index`, growing the list up to `limit` entries
fn place<T>(
    slots: &mut Vec<Option<T>>,
    index: usize,
    limit: usize,
    item: T,
    what: &str,
) -> Result<()> {
    if index >= limit {
        return Err(IoError::Parse(format!(
            "{what} index {index} out of range (at most {limit} entries)"
        )));
    }
    if index >= slots.len() {
        slots.resize_with(index + 1, || None);
    }
    if slots[index].is_some() {
        return Err(IoError::Parse(format!("duplicate {what} index {index}")));
    }
    slots[index] = Some(item);
    Ok(())
}

fn collect<T>(slots: Vec<Option<T>>, announced: Option<usize>, what: &str) -> Result<Vec<T>> {
    if let Some(size) = announced {
        if size != slots.len() {
            return Err(IoError::Parse(format!(
                "expected {size} {what} entries, found {}",
                slots.len()
            )));
        }
    }
    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| slot.ok_or_else(|| IoError::Parse(format!("missing {what} {i}"))))
        .collect()
}

pub fn read_mesh_file(path: impl AsRef<Path>) -> Result<Mesh> {
    let raw = fs::read_to_string(path.as_ref())?;
    parse_mesh_str(&raw)
}

pub fn parse_mesh_str(raw: &str) -> Result<Mesh> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(true);

    let mut cell_type: Option<CellType> = None;
    let mut geometric_dim: Option<usize> = None;
    let mut vertices: Vec<Option<[f64; 3]>> = Vec::new();
    let mut cells: Vec<Option<Vec<usize>>> = Vec::new();
    let mut num_vertices: Option<usize> = None;
    let mut num_cells: Option<usize> = None;
    // No document can hold more entries than it has bytes
    let bound = raw.len();
    // <domains> and <data> blocks carry markers, not geometry
    let mut skip_depth = 0usize;

    loop {
        let (e, is_start) = match reader.read_event()? {
            Event::Start(e) => (e, true),
            Event::Empty(e) => (e, false),
            Event::End(e) => {
                if matches!(e.local_name().as_ref(), b"domains" | b"data") {
                    skip_depth = skip_depth.saturating_sub(1);
                }
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        let name = e.local_name();
        if matches!(name.as_ref(), b"domains" | b"data") {
            if is_start {
                skip_depth += 1;
            }
            continue;
        }
        if skip_depth > 0 {
            continue;
        }

        let attrs = Attrs::from_start(&e)?;
        match attrs.element.as_str() {
            "mesh" => {
                let name = attrs.required("celltype")?;
                cell_type = Some(CellType::from_dolfin_name(name).ok_or_else(|| {
                    IoError::Parse(format!("unknown cell type '{name}'"))
                })?);
                geometric_dim = Some(attrs.parse("dim")?);
            }
            "vertices" => num_vertices = attrs.parse_opt("size")?,
            "cells" => num_cells = attrs.parse_opt("size")?,
            "vertex" => {
                let gdim = geometric_dim
                    .ok_or_else(|| IoError::Parse("<vertex> outside of <mesh>".to_string()))?;
                let mut coords = [0.0; 3];
                for (k, axis) in ["x", "y", "z"].iter().enumerate().take(gdim) {
                    coords[k] = attrs.parse(axis)?;
                }
                let limit = num_vertices.map_or(bound, |n| n.min(bound));
                place(&mut vertices, attrs.parse("index")?, limit, coords, "vertex")?;
            }
            element => {
                let Some(ct) = cell_type else { continue };
                if element != ct.dolfin_name() {
                    continue;
                }
                let connectivity = (0..ct.num_vertices())
                    .map(|k| attrs.parse::<usize>(&format!("v{k}")))
                    .collect::<Result<Vec<_>>>()?;
                let limit = num_cells.map_or(bound, |n| n.min(bound));
                place(&mut cells, attrs.parse("index")?, limit, connectivity, "cell")?;
            }
        }
    }

    let (Some(cell_type), Some(geometric_dim)) = (cell_type, geometric_dim) else {
        return Err(IoError::Parse("no <mesh> element found".to_string()));
    };

    Mesh::new(
        geometric_dim,
        cell_type,
        collect(vertices, num_vertices, "vertex")?,
        collect(cells, num_cells, "cell")?,
    )
}

pub fn read_mesh_function_file(path: impl AsRef<Path>, mesh: &Mesh) -> Result<MeshFunction> {
    let raw = fs::read_to_string(path.as_ref())?;
    parse_mesh_function_str(&raw, mesh)
}

fn check_value_type(attrs: &Attrs) -> Result<()> {
    match attrs.get("type") {
        None | Some("uint" | "size_t" | "int" | "unsigned int") => Ok(()),
        Some(other) => Err(IoError::UnsupportedValueType(other.to_string())),
    }
}

pub fn parse_mesh_function_str(raw: &str, mesh: &Mesh) -> Result<MeshFunction> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(true);

    let mut function: Option<MeshFunction> = None;
    let mut collection_dim: Option<usize> = None;
    let mut collection: Vec<(usize, usize, usize)> = Vec::new();

    loop {
        let e = match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => e,
            Event::Eof => break,
            _ => continue,
        };
        let attrs = Attrs::from_start(&e)?;

        match attrs.element.as_str() {
            "mesh_function" => {
                // The collection format nests its header one level deeper
                if let Some(dim) = attrs.parse_opt::<usize>("dim")? {
                    check_value_type(&attrs)?;
                    let expected = mesh.entities(dim)?.len();
                    if let Some(size) = attrs.parse_opt::<usize>("size")? {
                        if size != expected {
                            return Err(IoError::InvalidData(format!(
                                "mesh function of dimension {dim} has size {size} but the mesh has {expected} entities"
                            )));
                        }
                    }
                    function = Some(MeshFunction::new(dim, expected, 0));
                }
            }
            "entity" => {
                let f = function.as_mut().ok_or_else(|| {
                    IoError::Parse("<entity> outside of <mesh_function>".to_string())
                })?;
                let index: usize = attrs.parse("index")?;
                let value: usize = attrs.parse("value")?;
                let size = f.values.len();
                let slot = f.values.get_mut(index).ok_or_else(|| {
                    IoError::InvalidData(format!(
                        "entity index {index} out of range for mesh function of size {size}"
                    ))
                })?;
                *slot = value;
            }
            "mesh_value_collection" => {
                check_value_type(&attrs)?;
                collection_dim = Some(attrs.parse("dim")?);
            }
            "value" => {
                collection.push((
                    attrs.parse("cell_index")?,
                    attrs.parse("local_entity")?,
                    attrs.parse("value")?,
                ));
            }
            _ => {}
        }
    }

    if let Some(dim) = collection_dim {
        let entities = mesh.entities(dim)?;
        let mut f = MeshFunction::new(dim, entities.len(), 0);
        for (cell, local, value) in collection {
            let entity = entities.cell_entity(cell, local).ok_or_else(|| {
                IoError::InvalidData(format!(
                    "cell {cell} has no local entity {local} of dimension {dim}"
                ))
            })?;
            f.values[entity] = value;
        }
        return Ok(f);
    }

    function.ok_or_else(|| IoError::Parse("no <mesh_function> element found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<?xml version="1.0"?>
<dolfin xmlns:dolfin="http://fenicsproject.org">
  <mesh celltype="triangle" dim="2">
    <vertices size="4">
      <vertex index="0" x="0" y="0" />
      <vertex index="1" x="1" y="0" />
      <vertex index="3" x="0" y="1" />
      <vertex index="2" x="1" y="1" />
    </vertices>
    <cells size="2">
      <triangle index="0" v0="0" v1="1" v2="2" />
      <triangle index="1" v0="0" v1="2" v2="3" />
    </cells>
    <domains>
      <mesh_value_collection type="uint" dim="1" size="1">
        <value cell_index="0" local_entity="2" value="7" />
      </mesh_value_collection>
    </domains>
  </mesh>
</dolfin>
"#;

    #[test]
    fn parses_triangle_mesh_with_unordered_vertices() {
        let mesh = parse_mesh_str(SQUARE).expect("mesh should parse");
        assert_eq!(mesh.cell_type, CellType::Triangle);
        assert_eq!(mesh.geometric_dim, 2);
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_cells(), 2);
        assert_eq!(mesh.vertex(2), Some(&[1.0, 1.0][..]));
        assert_eq!(mesh.cells[1], vec![0, 2, 3]);
    }

    #[test]
    fn missing_coordinate_is_reported() {
        let src = r#"<dolfin><mesh celltype="triangle" dim="2"><vertices size="1">
            <vertex index="0" x="0"/></vertices></mesh></dolfin>"#;
        let err = parse_mesh_str(src).expect_err("y is missing");
        assert!(err.to_string().contains("'y'"), "{err}");
    }

    #[test]
    fn missing_mesh_element_is_reported() {
        let err = parse_mesh_str("<dolfin></dolfin>").expect_err("empty document");
        assert!(matches!(err, IoError::Parse(_)));
    }

    #[test]
    fn parses_entity_mesh_function() {
        let mesh = parse_mesh_str(SQUARE).unwrap();
        let src = r#"<dolfin><mesh_function type="uint" dim="2" size="2">
            <entity index="0" value="1"/><entity index="1" value="2"/>
            </mesh_function></dolfin>"#;
        let f = parse_mesh_function_str(src, &mesh).expect("function should parse");
        assert_eq!(f.dim, 2);
        assert_eq!(f.values, vec![1, 2]);
    }

    #[test]
    fn parses_value_collection_for_facets() {
        let mesh = parse_mesh_str(SQUARE).unwrap();
        let src = r#"<dolfin><mesh_function>
            <mesh_value_collection name="f" type="uint" dim="1" size="2">
              <value cell_index="0" local_entity="2" value="4"/>
              <value cell_index="1" local_entity="0" value="5"/>
            </mesh_value_collection></mesh_function></dolfin>"#;
        let f = parse_mesh_function_str(src, &mesh).expect("collection should parse");
        let edges = mesh.entities(1).unwrap();
        assert_eq!(f.len(), 5);
        assert_eq!(f.get(edges.find(&[0, 1]).unwrap()), Some(4));
        assert_eq!(f.get(edges.find(&[2, 3]).unwrap()), Some(5));
        assert_eq!(f.histogram().get(&0), Some(&3));
    }

    #[test]
    fn rejects_non_integer_value_type() {
        let mesh = parse_mesh_str(SQUARE).unwrap();
        let src = r#"<dolfin><mesh_function type="double" dim="2" size="2"/></dolfin>"#;
        let err = parse_mesh_function_str(src, &mesh).expect_err("double is unsupported");
        assert!(matches!(err, IoError::UnsupportedValueType(_)));
    }

    #[test]
    fn rejects_size_mismatch() {
        let mesh = parse_mesh_str(SQUARE).unwrap();
        let src = r#"<dolfin><mesh_function type="uint" dim="2" size="3"/></dolfin>"#;
        let err = parse_mesh_function_str(src, &mesh).expect_err("mesh has two cells");
        assert!(matches!(err, IoError::InvalidData(_)));
    }

    #[test]
    fn huge_announced_vertex_count_is_not_allocated() {
        let src = format!(
            r#"<dolfin><mesh celltype="interval" dim="1"><vertices size="{}">
            <vertex index="0" x="0"/><vertex index="1" x="1"/></vertices>
            <cells size="1"><interval index="0" v0="0" v1="1"/></cells></mesh></dolfin>"#,
            usize::MAX
        );
        let err = parse_mesh_str(&src).expect_err("size does not match the vertex list");
        assert!(matches!(err, IoError::Parse(_)), "{err}");
    }

    #[test]
    fn vertex_index_beyond_announced_size_is_rejected() {
        let src = r#"<dolfin><mesh celltype="interval" dim="1"><vertices size="2">
            <vertex index="0" x="0"/><vertex index="5" x="1"/></vertices></mesh></dolfin>"#;
        let err = parse_mesh_str(src).expect_err("index 5 exceeds size 2");
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn maximal_index_without_size_is_rejected() {
        let src = format!(
            r#"<dolfin><mesh celltype="interval" dim="1"><vertices>
            <vertex index="{}" x="0"/></vertices></mesh></dolfin>"#,
            usize::MAX
        );
        let err = parse_mesh_str(&src).expect_err("index cannot fit in the document");
        assert!(matches!(err, IoError::Parse(_)));
    }

    #[test]
    fn huge_mesh_function_size_is_checked_before_allocation() {
        let mesh = parse_mesh_str(SQUARE).unwrap();
        let src = format!(
            r#"<dolfin><mesh_function type="uint" dim="2" size="{}"/></dolfin>"#,
            usize::MAX
        );
        let err = parse_mesh_function_str(&src, &mesh).expect_err("mesh has two cells");
        assert!(matches!(err, IoError::InvalidData(_)));
    }
}
