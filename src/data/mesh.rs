//! Mesh access traits and the in-memory unstructured mesh.
//!
//! The comparison algorithms only ever talk to meshes through
//! [`MeshAccess`] (counts and named cell fields) and, for the quality
//! method, [`MeshGeometry`] (cell types and vertex coordinates).
//! [`UnstructuredMesh`] implements both and is what the VTK reader produces.

use crate::data::field::CellData;
use crate::mesh_error::MeshCompareError;
use crate::topology::cell_type::CellType;

/// Counts and named per-cell scalar fields of a mesh.
pub trait MeshAccess {
    /// Number of points (vertices) in the mesh.
    fn point_count(&self) -> usize;

    /// Number of cells in the mesh.
    fn cell_count(&self) -> usize;

    /// The cell field called `name`, or `None` when absent.
    fn cell_field(&self, name: &str) -> Option<&[f64]>;

    /// Attach (or replace) a cell field.
    ///
    /// Implementations must reject fields whose length differs from
    /// [`cell_count`](MeshAccess::cell_count).
    fn set_cell_field(&mut self, name: &str, values: Vec<f64>) -> Result<(), MeshCompareError>;
}

/// Per-cell geometry needed to evaluate cell quality.
pub trait MeshGeometry: MeshAccess {
    /// Type of cell `cell`.
    fn cell_type(&self, cell: usize) -> CellType;

    /// Coordinates of the vertices of `cell`, in connectivity order.
    fn cell_vertices(&self, cell: usize) -> Vec<[f64; 3]>;
}

/// A single cell: its type and indices into the mesh point list.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    pub connectivity: Vec<usize>,
}

impl Cell {
    pub fn new(cell_type: CellType, connectivity: impl IntoIterator<Item = usize>) -> Self {
        Self {
            cell_type,
            connectivity: connectivity.into_iter().collect(),
        }
    }
}

/// Unstructured mesh with explicit point coordinates and cell connectivity.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnstructuredMesh {
    points: Vec<[f64; 3]>,
    cells: Vec<Cell>,
    cell_data: CellData,
}

impl UnstructuredMesh {
    /// Build a mesh, validating every cell's connectivity.
    ///
    /// Each cell must list exactly [`CellType::vertex_count`] vertices, and
    /// every vertex index must refer to an existing point.
    pub fn try_new(points: Vec<[f64; 3]>, cells: Vec<Cell>) -> Result<Self, MeshCompareError> {
        for (idx, cell) in cells.iter().enumerate() {
            let expected = cell.cell_type.vertex_count();
            if cell.connectivity.len() != expected {
                return Err(MeshCompareError::InvalidConnectivity {
                    cell: idx,
                    reason: format!(
                        "{:?} expects {expected} vertices, got {}",
                        cell.cell_type,
                        cell.connectivity.len()
                    ),
                });
            }
            if let Some(&bad) = cell.connectivity.iter().find(|&&p| p >= points.len()) {
                return Err(MeshCompareError::InvalidConnectivity {
                    cell: idx,
                    reason: format!("point index {bad} out of range ({} points)", points.len()),
                });
            }
        }
        Ok(Self {
            points,
            cells,
            cell_data: CellData::new(),
        })
    }

    /// Builder-style variant of [`MeshAccess::set_cell_field`].
    pub fn with_cell_field(
        mut self,
        name: &str,
        values: Vec<f64>,
    ) -> Result<Self, MeshCompareError> {
        self.set_cell_field(name, values)?;
        Ok(self)
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_data(&self) -> &CellData {
        &self.cell_data
    }
}

impl MeshAccess for UnstructuredMesh {
    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn cell_field(&self, name: &str) -> Option<&[f64]> {
        self.cell_data.get(name)
    }

    fn set_cell_field(&mut self, name: &str, values: Vec<f64>) -> Result<(), MeshCompareError> {
        if values.len() != self.cells.len() {
            return Err(MeshCompareError::FieldLengthMismatch {
                name: name.to_string(),
                expected: self.cells.len(),
                found: values.len(),
            });
        }
        self.cell_data.insert(name, values);
        Ok(())
    }
}

impl MeshGeometry for UnstructuredMesh {
    fn cell_type(&self, cell: usize) -> CellType {
        self.cells[cell].cell_type
    }

    fn cell_vertices(&self, cell: usize) -> Vec<[f64; 3]> {
        self.cells[cell]
            .connectivity
            .iter()
            .map(|&p| self.points[p])
            .collect()
    }
}
