//! Cell type metadata for mesh cells.
//!
//! Besides the topological dimension, each cell type knows how many vertices
//! its connectivity lists and which legacy VTK type id it maps to.

/// Common cell types for unstructured mesh elements.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellType {
    /// 0D vertex.
    #[default]
    Vertex,
    /// 1D segment/edge.
    Segment,
    /// 2D simplex (triangle).
    Triangle,
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D tensor-product cell (hex).
    Hexahedron,
    /// 3D wedge/prism.
    Prism,
    /// 3D pyramid.
    Pyramid,
    /// 2D polygon with `n` vertices.
    Polygon(u8),
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Vertex => 0,
            CellType::Segment => 1,
            CellType::Triangle | CellType::Quadrilateral | CellType::Polygon(_) => 2,
            CellType::Tetrahedron | CellType::Hexahedron | CellType::Prism | CellType::Pyramid => 3,
        }
    }

    /// Number of vertices in the cell's connectivity list.
    pub fn vertex_count(self) -> usize {
        match self {
            CellType::Vertex => 1,
            CellType::Segment => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral | CellType::Tetrahedron => 4,
            CellType::Pyramid => 5,
            CellType::Prism => 6,
            CellType::Hexahedron => 8,
            CellType::Polygon(n) => n as usize,
        }
    }

    /// Legacy VTK cell type id (`VTK_TETRA = 10`, ...).
    pub fn vtk_id(self) -> i32 {
        match self {
            CellType::Vertex => 1,
            CellType::Segment => 3,
            CellType::Triangle => 5,
            CellType::Polygon(_) => 7,
            CellType::Quadrilateral => 9,
            CellType::Tetrahedron => 10,
            CellType::Hexahedron => 12,
            CellType::Prism => 13,
            CellType::Pyramid => 14,
        }
    }

    /// Inverse of [`CellType::vtk_id`].
    ///
    /// Polygons carry their vertex count, so callers pass the length of the
    /// cell's connectivity list. Returns `None` for ids without a mapping.
    pub fn from_vtk_id(id: i32, vertex_count: usize) -> Option<CellType> {
        match id {
            1 => Some(CellType::Vertex),
            3 => Some(CellType::Segment),
            5 => Some(CellType::Triangle),
            7 => u8::try_from(vertex_count).ok().map(CellType::Polygon),
            9 => Some(CellType::Quadrilateral),
            10 => Some(CellType::Tetrahedron),
            12 => Some(CellType::Hexahedron),
            13 => Some(CellType::Prism),
            14 => Some(CellType::Pyramid),
            _ => None,
        }
    }
}
