#![allow(dead_code)]
use mesh_compare::data::mesh::{Cell, MeshAccess, UnstructuredMesh};
use mesh_compare::topology::cell_type::CellType;

/// Index of grid point `(i, j, k)` in an `n`-cell-wide block.
fn grid_index(n: usize, i: usize, j: usize, k: usize) -> usize {
    i + (n + 1) * (j + (n + 1) * k)
}

/// Unit-spaced `n x n x n` block of hexahedra.
pub fn hex_block(n: usize) -> UnstructuredMesh {
    jittered_hex_block(n, &[])
}

/// Hex block whose points are shifted by `offsets` (cycled over the points).
pub fn jittered_hex_block(n: usize, offsets: &[[f64; 3]]) -> UnstructuredMesh {
    let mut points = Vec::with_capacity((n + 1).pow(3));
    for k in 0..=n {
        for j in 0..=n {
            for i in 0..=n {
                let idx = points.len();
                let d = if offsets.is_empty() {
                    [0.0; 3]
                } else {
                    offsets[idx % offsets.len()]
                };
                points.push([i as f64 + d[0], j as f64 + d[1], k as f64 + d[2]]);
            }
        }
    }
    let mut cells = Vec::with_capacity(n.pow(3));
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                cells.push(Cell::new(
                    CellType::Hexahedron,
                    [
                        grid_index(n, i, j, k),
                        grid_index(n, i + 1, j, k),
                        grid_index(n, i + 1, j + 1, k),
                        grid_index(n, i, j + 1, k),
                        grid_index(n, i, j, k + 1),
                        grid_index(n, i + 1, j, k + 1),
                        grid_index(n, i + 1, j + 1, k + 1),
                        grid_index(n, i, j + 1, k + 1),
                    ],
                ));
            }
        }
    }
    UnstructuredMesh::try_new(points, cells).unwrap()
}

/// One vertex cell per value on `points` points, carrying `values` as `name`.
pub fn vertex_strip(name: &str, values: &[f64], points: usize) -> UnstructuredMesh {
    let pts = (0..points).map(|i| [i as f64, 0.0, 0.0]).collect();
    let cells = (0..values.len())
        .map(|i| Cell::new(CellType::Vertex, [i % points]))
        .collect();
    UnstructuredMesh::try_new(pts, cells)
        .unwrap()
        .with_cell_field(name, values.to_vec())
        .unwrap()
}

/// `mesh` with the cell field `name` set to `values`.
pub fn with_field(mut mesh: UnstructuredMesh, name: &str, values: Vec<f64>) -> UnstructuredMesh {
    mesh.set_cell_field(name, values).unwrap();
    mesh
}
