//! MeshCompareError: Unified error type for mesh-compare public APIs
//!
//! Every fallible operation in the crate returns this type. A structural
//! mismatch between two meshes (different point counts) is *not* an error;
//! it is reported as a failed [`ComparisonResult`](crate::algs::compare::ComparisonResult).

use crate::topology::cell_type::CellType;
use std::fmt;
use thiserror::Error;

/// Which of the two compared meshes an error refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MeshRole {
    /// The candidate mesh under test.
    Mesh,
    /// The known-good reference mesh.
    Reference,
}

impl fmt::Display for MeshRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshRole::Mesh => f.write_str("mesh"),
            MeshRole::Reference => f.write_str("reference mesh"),
        }
    }
}

/// Unified error type for mesh-compare operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshCompareError {
    /// No candidate mesh was supplied.
    #[error("No mesh.")]
    NoMesh,
    /// No reference mesh was supplied.
    #[error("No reference.")]
    NoReferenceMesh,
    /// No comparison method was configured.
    #[error("No method.")]
    NoMethod,
    /// The comparison method is not one of `quality` or `array`.
    #[error("Invalid method `{0}` (expected `quality` or `array`)")]
    InvalidMethod(String),
    /// The array method was selected without a field name.
    #[error("No ArrayName.")]
    EmptyFieldName,
    /// The named cell field does not exist on one of the meshes.
    #[error("Invalid ArrayName: {mesh} has no cell field `{name}`")]
    MissingField { mesh: MeshRole, name: String },
    /// A comparator was handed a mesh without cells.
    #[error("{0} has no cells")]
    EmptyMesh(MeshRole),
    /// The quality metric has no formula for this cell type.
    #[error("Unsupported cell type for ratio quality: {0:?}")]
    UnsupportedCellType(CellType),
    /// Degenerate or otherwise unusable cell geometry.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A cell field does not have one value per cell.
    #[error("Cell field `{name}` has {found} values, mesh has {expected} cells")]
    FieldLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    /// Cell connectivity does not fit the cell type or the point list.
    #[error("Invalid connectivity for cell {cell}: {reason}")]
    InvalidConnectivity { cell: usize, reason: String },
    /// Malformed mesh file contents.
    #[error("Mesh I/O parse error: {0}")]
    MeshIoParse(String),
    /// Underlying reader/writer failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl MeshCompareError {
    /// `true` for errors caused by missing or invalid caller input, as opposed
    /// to errors raised while evaluating mesh contents.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MeshCompareError::NoMesh
                | MeshCompareError::NoReferenceMesh
                | MeshCompareError::NoMethod
                | MeshCompareError::InvalidMethod(_)
                | MeshCompareError::EmptyFieldName
                | MeshCompareError::MissingField { .. }
        )
    }
}

impl From<std::io::Error> for MeshCompareError {
    fn from(err: std::io::Error) -> Self {
        MeshCompareError::Io(err.to_string())
    }
}
