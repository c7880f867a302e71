//! Legacy VTK (`.vtk`) reader/writer for unstructured grids.
//!
//! This implementation targets ASCII legacy VTK files with an
//! `UNSTRUCTURED_GRID` dataset. Single-component `CELL_DATA` arrays, given
//! either as `SCALARS` blocks or inside a `FIELD` block, become cell fields.
//! `POINT_DATA` and multi-component arrays are parsed and skipped.
//!
//! Spaces in array names are encoded as `%20`, as VTK itself does.

use crate::data::mesh::{Cell, MeshAccess, UnstructuredMesh};
use crate::io::{MeshReader, MeshWriter};
use crate::mesh_error::MeshCompareError;
use crate::topology::cell_type::CellType;
use std::io::{Read, Write};

#[derive(Debug, Default, Clone)]
pub struct VtkReader;

#[derive(Debug, Default, Clone)]
pub struct VtkWriter;

fn encode_name(name: &str) -> String {
    name.replace(' ', "%20")
}

fn decode_name(name: &str) -> String {
    name.replace("%20", " ")
}

fn parse_err(msg: impl Into<String>) -> MeshCompareError {
    MeshCompareError::MeshIoParse(msg.into())
}

/// `a * b` for header counts, rejecting products that overflow `usize`.
fn value_count(a: usize, b: usize, what: &str) -> Result<usize, MeshCompareError> {
    a.checked_mul(b)
        .ok_or_else(|| parse_err(format!("{what} count overflows: {a} x {b}")))
}

impl VtkWriter {
    fn write_values<W: Write>(writer: &mut W, values: &[f64]) -> Result<(), MeshCompareError> {
        let mut line_len = 0usize;
        for value in values {
            let text = value.to_string();
            if line_len > 0 && line_len + text.len() + 1 > 70 {
                writeln!(writer)?;
                line_len = 0;
            }
            if line_len > 0 {
                write!(writer, " ")?;
                line_len += 1;
            }
            write!(writer, "{text}")?;
            line_len += text.len();
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl MeshWriter for VtkWriter {
    type Mesh = UnstructuredMesh;

    fn write<W: Write>(&self, mut writer: W, mesh: &UnstructuredMesh) -> Result<(), MeshCompareError> {
        writeln!(writer, "# vtk DataFile Version 3.0")?;
        writeln!(writer, "mesh-compare")?;
        writeln!(writer, "ASCII")?;
        writeln!(writer, "DATASET UNSTRUCTURED_GRID")?;

        writeln!(writer, "POINTS {} double", mesh.point_count())?;
        for [x, y, z] in mesh.points() {
            writeln!(writer, "{x} {y} {z}")?;
        }

        let total_size: usize = mesh.cells().iter().map(|c| c.connectivity.len() + 1).sum();
        writeln!(writer, "CELLS {} {}", mesh.cell_count(), total_size)?;
        for cell in mesh.cells() {
            write!(writer, "{}", cell.connectivity.len())?;
            for idx in &cell.connectivity {
                write!(writer, " {idx}")?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "CELL_TYPES {}", mesh.cell_count())?;
        for cell in mesh.cells() {
            writeln!(writer, "{}", cell.cell_type.vtk_id())?;
        }

        let cell_data = mesh.cell_data();
        if !cell_data.is_empty() {
            writeln!(writer, "CELL_DATA {}", mesh.cell_count())?;
            writeln!(writer, "FIELD FieldData {}", cell_data.len())?;
            for (name, values) in cell_data.iter() {
                writeln!(writer, "{} 1 {} double", encode_name(name), values.len())?;
                Self::write_values(&mut writer, values)?;
            }
        }
        Ok(())
    }
}

/// A parsed data array: name, components, flat values.
#[derive(Debug)]
struct DataArray {
    name: String,
    components: usize,
    values: Vec<f64>,
}

/// Token cursor over the body of a legacy VTK file.
struct Tokens<'a> {
    inner: std::iter::Peekable<std::str::SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace().peekable(),
        }
    }

    fn next(&mut self, what: &str) -> Result<&'a str, MeshCompareError> {
        self.inner
            .next()
            .ok_or_else(|| parse_err(format!("missing {what}")))
    }

    fn peek(&mut self) -> Option<&'a str> {
        self.inner.peek().copied()
    }

    fn expect(&mut self, keyword: &str) -> Result<(), MeshCompareError> {
        let token = self.next(keyword)?;
        if !token.eq_ignore_ascii_case(keyword) {
            return Err(parse_err(format!("expected {keyword}, found {token}")));
        }
        Ok(())
    }

    fn next_usize(&mut self, what: &str) -> Result<usize, MeshCompareError> {
        self.next(what)?
            .parse()
            .map_err(|_| parse_err(format!("invalid {what}")))
    }

    fn next_f64(&mut self, what: &str) -> Result<f64, MeshCompareError> {
        self.next(what)?
            .parse()
            .map_err(|_| parse_err(format!("invalid {what}")))
    }

    fn next_f64s(&mut self, count: usize, what: &str) -> Result<Vec<f64>, MeshCompareError> {
        (0..count).map(|_| self.next_f64(what)).collect()
    }
}

impl VtkReader {
    /// Parse the attribute arrays of a `POINT_DATA`/`CELL_DATA` block with
    /// `tuples` entries, stopping at the next block keyword or end of input.
    fn parse_attributes(
        tokens: &mut Tokens<'_>,
        tuples: usize,
    ) -> Result<Vec<DataArray>, MeshCompareError> {
        let mut arrays = Vec::new();
        while let Some(keyword) = tokens.peek() {
            match keyword.to_ascii_uppercase().as_str() {
                "POINT_DATA" | "CELL_DATA" => break,
                "SCALARS" => {
                    tokens.next("SCALARS")?;
                    let name = decode_name(tokens.next("scalars name")?);
                    let _data_type = tokens.next("scalars type")?;
                    let mut components = 1;
                    if let Some(next) = tokens.peek() {
                        if !next.eq_ignore_ascii_case("LOOKUP_TABLE") {
                            components = tokens.next_usize("scalars components")?;
                        }
                    }
                    tokens.expect("LOOKUP_TABLE")?;
                    let _table = tokens.next("lookup table name")?;
                    let values = tokens.next_f64s(value_count(tuples, components, "scalars")?, "scalars value")?;
                    arrays.push(DataArray {
                        name,
                        components,
                        values,
                    });
                }
                "VECTORS" | "NORMALS" => {
                    tokens.next(keyword)?;
                    let name = decode_name(tokens.next("vectors name")?);
                    let _data_type = tokens.next("vectors type")?;
                    let values = tokens.next_f64s(value_count(tuples, 3, "vectors")?, "vectors value")?;
                    arrays.push(DataArray {
                        name,
                        components: 3,
                        values,
                    });
                }
                "FIELD" => {
                    tokens.next("FIELD")?;
                    let _field_name = tokens.next("field name")?;
                    let num_arrays = tokens.next_usize("field count")?;
                    for _ in 0..num_arrays {
                        let name = decode_name(tokens.next("field array name")?);
                        let components = tokens.next_usize("field components")?;
                        let array_tuples = tokens.next_usize("field tuples")?;
                        let _data_type = tokens.next("field type")?;
                        let count = value_count(components, array_tuples, "field data")?;
                        let values = tokens.next_f64s(count, "field data value")?;
                        arrays.push(DataArray {
                            name,
                            components,
                            values,
                        });
                    }
                }
                _ => {
                    return Err(parse_err(format!("unexpected token {keyword}")));
                }
            }
        }
        Ok(arrays)
    }
}

impl MeshReader for VtkReader {
    type Mesh = UnstructuredMesh;

    fn read<R: Read>(&self, mut reader: R) -> Result<UnstructuredMesh, MeshCompareError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let mut lines = input.lines();
        let _version = lines.next();
        let _comment = lines.next();
        let format = lines.next().ok_or_else(|| parse_err("missing ASCII line"))?;
        if format.trim() != "ASCII" {
            return Err(parse_err("VTK ASCII format required"));
        }
        let dataset = lines
            .next()
            .ok_or_else(|| parse_err("missing DATASET line"))?;
        if !dataset.trim().ends_with("UNSTRUCTURED_GRID") {
            return Err(parse_err("VTK UNSTRUCTURED_GRID required"));
        }

        let remaining: String = lines.collect::<Vec<_>>().join("\n");
        let mut tokens = Tokens::new(&remaining);

        tokens.expect("POINTS")?;
        let num_points = tokens.next_usize("point count")?;
        let _point_type = tokens.next("point type")?;
        let coords = tokens.next_f64s(value_count(num_points, 3, "point")?, "point value")?;
        let points: Vec<[f64; 3]> = coords.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        tokens.expect("CELLS")?;
        let num_cells = tokens.next_usize("cell count")?;
        let _total_size = tokens.next_usize("cell size")?;
        let mut connectivity = Vec::new();
        for _ in 0..num_cells {
            let count = tokens.next_usize("cell size")?;
            let conn = (0..count)
                .map(|_| tokens.next_usize("cell index"))
                .collect::<Result<Vec<_>, _>>()?;
            connectivity.push(conn);
        }

        tokens.expect("CELL_TYPES")?;
        let cell_types_count = tokens.next_usize("cell types count")?;
        if cell_types_count != num_cells {
            return Err(parse_err(format!(
                "CELL_TYPES count {cell_types_count} does not match CELLS count {num_cells}"
            )));
        }
        let mut cells = Vec::with_capacity(connectivity.len());
        for conn in connectivity {
            let raw = tokens.next("cell type")?;
            let id: i32 = raw
                .parse()
                .map_err(|_| parse_err(format!("invalid cell type {raw}")))?;
            let cell_type = CellType::from_vtk_id(id, conn.len())
                .ok_or_else(|| parse_err(format!("unsupported VTK cell type {id}")))?;
            cells.push(Cell::new(cell_type, conn));
        }

        let mut mesh = UnstructuredMesh::try_new(points, cells)?;

        while let Some(keyword) = tokens.peek() {
            let keyword = keyword.to_ascii_uppercase();
            match keyword.as_str() {
                "POINT_DATA" | "CELL_DATA" => {
                    tokens.next(&keyword)?;
                    let tuples = tokens.next_usize("attribute tuple count")?;
                    let arrays = Self::parse_attributes(&mut tokens, tuples)?;
                    if keyword != "CELL_DATA" {
                        continue;
                    }
                    for array in arrays {
                        if array.components != 1 {
                            log::debug!(
                                "skipping {}-component cell array `{}`",
                                array.components,
                                array.name
                            );
                            continue;
                        }
                        mesh.set_cell_field(&array.name, array.values)?;
                    }
                }
                _ => return Err(parse_err(format!("unexpected token {keyword}"))),
            }
        }

        Ok(mesh)
    }
}
