//! Ratio-type cell quality and its reduction to a mesh-wide range.
//!
//! # Ratio quality
//! [`RatioQuality`] evaluates one shape-regularity scalar per cell, normalized
//! so that an ideal cell scores `1` and worse cells score higher:
//!
//! - **Triangle**: radius ratio `R / (2 r)` (circumradius over twice the
//!   inradius).
//! - **Tetrahedron**: radius ratio `R / (3 r)`.
//! - **Quadrilateral**, **Hexahedron**, **Prism**, **Pyramid**: edge ratio
//!   `L_max / L_min` over the cell's edges.
//!
//! Vertices, segments and polygons have no ratio formula and are rejected
//! with [`MeshCompareError::UnsupportedCellType`].
//!
//! # Vertex ordering
//! - **Quadrilateral**: `[v0, v1, v2, v3]` around the boundary.
//! - **Hexahedron**: bottom face `[0, 1, 2, 3]` and top face `[4, 5, 6, 7]`.
//! - **Prism**: bottom triangle `[0, 1, 2]` and top triangle `[3, 4, 5]`.
//! - **Pyramid**: base quad `[0, 1, 2, 3]` and apex `v4`.
//!
//! # Examples
//! ```rust
//! use mesh_compare::data::mesh::{Cell, UnstructuredMesh};
//! use mesh_compare::geometry::quality::evaluate_quality;
//! use mesh_compare::topology::cell_type::CellType;
//!
//! let h = 3f64.sqrt() / 2.0;
//! let mesh = UnstructuredMesh::try_new(
//!     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, h, 0.0]],
//!     vec![Cell::new(CellType::Triangle, [0, 1, 2])],
//! )?;
//! let range = evaluate_quality(&mesh)?;
//! assert!((range.min - 1.0).abs() < 1e-12);
//! # Ok::<(), mesh_compare::mesh_error::MeshCompareError>(())
//! ```

use crate::data::field::FieldRange;
use crate::data::mesh::MeshGeometry;
use crate::mesh_error::{MeshCompareError, MeshRole};
use crate::topology::cell_type::CellType;

const EPS: f64 = 1e-12;

/// Name under which per-cell quality values are attached to a mesh.
pub const QUALITY_FIELD_NAME: &str = "Quality";

/// Provider of a single scalar quality value per cell.
pub trait QualityMetric {
    /// Quality of one cell given its type and vertex coordinates.
    fn ratio_quality(
        &self,
        cell_type: CellType,
        vertices: &[[f64; 3]],
    ) -> Result<f64, MeshCompareError>;
}

/// Radius ratio for simplices, edge ratio for the other volumetric and
/// quadrilateral cells.
#[derive(Clone, Copy, Debug, Default)]
pub struct RatioQuality;

impl QualityMetric for RatioQuality {
    fn ratio_quality(
        &self,
        cell_type: CellType,
        vertices: &[[f64; 3]],
    ) -> Result<f64, MeshCompareError> {
        ratio_quality(cell_type, vertices)
    }
}

/// Ratio quality of a single cell.
pub fn ratio_quality(cell_type: CellType, vertices: &[[f64; 3]]) -> Result<f64, MeshCompareError> {
    let edges = edges_for_cell(cell_type).ok_or(MeshCompareError::UnsupportedCellType(cell_type))?;
    let expected = cell_type.vertex_count();
    if vertices.len() != expected {
        return Err(MeshCompareError::InvalidGeometry(format!(
            "vertex count mismatch: expected {expected}, got {}",
            vertices.len()
        )));
    }
    match cell_type {
        CellType::Triangle => triangle_radius_ratio(vertices),
        CellType::Tetrahedron => tet_radius_ratio(vertices),
        _ => edge_ratio(edges, vertices),
    }
}

/// Per-cell quality values for every cell of `mesh`, in cell order.
pub fn cell_quality_field<M, Q>(mesh: &M, metric: &Q) -> Result<Vec<f64>, MeshCompareError>
where
    M: MeshGeometry + ?Sized,
    Q: QualityMetric + ?Sized,
{
    (0..mesh.cell_count())
        .map(|cell| metric.ratio_quality(mesh.cell_type(cell), &mesh.cell_vertices(cell)))
        .collect()
}

/// Evaluate `metric` on every cell and attach the values to `mesh` as the
/// [`QUALITY_FIELD_NAME`] cell field.
pub fn attach_quality_field<M, Q>(mesh: &mut M, metric: &Q) -> Result<(), MeshCompareError>
where
    M: MeshGeometry + ?Sized,
    Q: QualityMetric + ?Sized,
{
    let values = cell_quality_field(mesh, metric)?;
    mesh.set_cell_field(QUALITY_FIELD_NAME, values)
}

/// `(min, max)` of the ratio quality over all cells.
pub fn evaluate_quality<M>(mesh: &M) -> Result<FieldRange, MeshCompareError>
where
    M: MeshGeometry + ?Sized,
{
    evaluate_quality_with(mesh, &RatioQuality, MeshRole::Mesh)
}

/// `(min, max)` of `metric` over all cells of `mesh`.
///
/// `role` only labels the [`MeshCompareError::EmptyMesh`] error for a mesh
/// without cells.
pub fn evaluate_quality_with<M, Q>(
    mesh: &M,
    metric: &Q,
    role: MeshRole,
) -> Result<FieldRange, MeshCompareError>
where
    M: MeshGeometry + ?Sized,
    Q: QualityMetric + ?Sized,
{
    if mesh.cell_count() == 0 {
        return Err(MeshCompareError::EmptyMesh(role));
    }
    let values = cell_quality_field(mesh, metric)?;
    FieldRange::from_values(&values).ok_or(MeshCompareError::EmptyMesh(role))
}

fn triangle_radius_ratio(v: &[[f64; 3]]) -> Result<f64, MeshCompareError> {
    let lengths = edge_lengths(&TRI_EDGES, v)?;
    let [a, b, c] = [lengths[1], lengths[2], lengths[0]];
    let max_len = a.max(b).max(c);
    let area = 0.5 * norm(cross(sub(v[1], v[0]), sub(v[2], v[0])));
    if area <= EPS * max_len * max_len {
        return Err(MeshCompareError::InvalidGeometry(format!(
            "degenerate triangle: area = {area}"
        )));
    }
    // R = abc / 4A, r = A / s  =>  R / 2r = abc s / 8A^2
    let s = 0.5 * (a + b + c);
    Ok(a * b * c * s / (8.0 * area * area))
}

fn tet_radius_ratio(v: &[[f64; 3]]) -> Result<f64, MeshCompareError> {
    let max_len = edge_lengths(&TET_EDGES, v)?
        .into_iter()
        .fold(0.0f64, f64::max);
    let a = sub(v[1], v[0]);
    let b = sub(v[2], v[0]);
    let c = sub(v[3], v[0]);
    let triple = dot(a, cross(b, c));
    let volume = triple.abs() / 6.0;
    if volume <= EPS * max_len.powi(3) {
        return Err(MeshCompareError::InvalidGeometry(format!(
            "degenerate tetrahedron: volume = {volume}"
        )));
    }
    let surface: f64 = TET_FACES
        .iter()
        .map(|f| 0.5 * norm(cross(sub(v[f[1]], v[f[0]]), sub(v[f[2]], v[f[0]]))))
        .sum();
    let inradius = 3.0 * volume / surface;

    let center = scale(
        add(
            add(scale(cross(b, c), dot(a, a)), scale(cross(c, a), dot(b, b))),
            scale(cross(a, b), dot(c, c)),
        ),
        1.0 / (2.0 * triple),
    );
    let circumradius = norm(center);
    Ok(circumradius / (3.0 * inradius))
}

fn edge_ratio(edges: &[(usize, usize)], v: &[[f64; 3]]) -> Result<f64, MeshCompareError> {
    let lengths = edge_lengths(edges, v)?;
    let (min_len, max_len) = lengths
        .iter()
        .fold((f64::INFINITY, 0.0f64), |(lo, hi), &len| (lo.min(len), hi.max(len)));
    Ok(max_len / min_len)
}

/// Lengths of `edges`, rejecting edges that vanish relative to the longest.
fn edge_lengths(edges: &[(usize, usize)], v: &[[f64; 3]]) -> Result<Vec<f64>, MeshCompareError> {
    let lengths: Vec<f64> = edges.iter().map(|&(i, j)| norm(sub(v[i], v[j]))).collect();
    let max_len = lengths.iter().copied().fold(0.0f64, f64::max);
    if lengths.iter().any(|&len| len <= EPS * max_len) {
        return Err(MeshCompareError::InvalidGeometry(
            "zero-length edge detected".into(),
        ));
    }
    Ok(lengths)
}

fn edges_for_cell(cell_type: CellType) -> Option<&'static [(usize, usize)]> {
    match cell_type {
        CellType::Triangle => Some(&TRI_EDGES),
        CellType::Quadrilateral => Some(&QUAD_EDGES),
        CellType::Tetrahedron => Some(&TET_EDGES),
        CellType::Hexahedron => Some(&HEX_EDGES),
        CellType::Prism => Some(&PRISM_EDGES),
        CellType::Pyramid => Some(&PYRAMID_EDGES),
        _ => None,
    }
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

const TRI_EDGES: [(usize, usize); 3] = [(0, 1), (1, 2), (2, 0)];
const QUAD_EDGES: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];
const TET_EDGES: [(usize, usize); 6] = [(0, 1), (1, 2), (2, 0), (0, 3), (1, 3), (2, 3)];
const HEX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];
const PRISM_EDGES: [(usize, usize); 9] = [
    (0, 1),
    (1, 2),
    (2, 0),
    (3, 4),
    (4, 5),
    (5, 3),
    (0, 3),
    (1, 4),
    (2, 5),
];
const PYRAMID_EDGES: [(usize, usize); 8] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (0, 4),
    (1, 4),
    (2, 4),
    (3, 4),
];

const TET_FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [1, 2, 3], [0, 2, 3]];
