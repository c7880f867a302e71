//! Data module: meshes and their named cell fields

pub mod field;
pub mod mesh;

pub use field::{CellData, FieldRange};
pub use mesh::{Cell, MeshAccess, MeshGeometry, UnstructuredMesh};
