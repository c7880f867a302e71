mod util;

use mesh_compare::algs::compare::{CompareConfig, MeshComparator};
use mesh_compare::data::mesh::{Cell, UnstructuredMesh};
use mesh_compare::geometry::quality::{QualityMetric, evaluate_quality};
use mesh_compare::mesh_error::{MeshCompareError, MeshRole};
use mesh_compare::topology::cell_type::CellType;
use util::{hex_block, jittered_hex_block};

/// Reports the x coordinate of a cell's first vertex as its quality.
struct FirstVertexX;

impl QualityMetric for FirstVertexX {
    fn ratio_quality(
        &self,
        _cell_type: CellType,
        vertices: &[[f64; 3]],
    ) -> Result<f64, MeshCompareError> {
        Ok(vertices[0][0])
    }
}

fn vertex_cloud(xs: &[f64]) -> UnstructuredMesh {
    let points = xs.iter().map(|&x| [x, 0.0, 0.0]).collect();
    let cells = (0..xs.len())
        .map(|i| Cell::new(CellType::Vertex, [i]))
        .collect();
    UnstructuredMesh::try_new(points, cells).unwrap()
}

fn ten_cells(max: f64) -> UnstructuredMesh {
    let mut xs: Vec<f64> = (0..9).map(|i| 0.80 + 0.01 * i as f64).collect();
    xs.push(max);
    vertex_cloud(&xs)
}

#[test]
fn quality_ranges_within_tolerance() {
    let mesh = ten_cells(0.95);
    let reference = ten_cells(0.951);

    let loose = CompareConfig::quality().with_tolerance(1e-2);
    let result = MeshComparator::with_metric(loose, FirstVertexX)
        .compare(Some(&mesh), Some(&reference))
        .unwrap();
    assert!(result.passed(), "{}", result.log_text());
    assert_eq!(result.log()[2], "Mesh Quality Range: (0.8, 0.95)");
    assert_eq!(result.log()[3], "Reference Quality Range: (0.8, 0.951)");

    let tight = CompareConfig::quality().with_tolerance(1e-4);
    let result = MeshComparator::with_metric(tight, FirstVertexX)
        .compare(Some(&mesh), Some(&reference))
        .unwrap();
    assert!(!result.passed());
    assert_eq!(result.log().last().unwrap(), "Result: failed");
}

#[test]
fn identical_meshes_pass_unless_tolerance_is_zero() {
    let mesh = hex_block(2);
    let cmp = MeshComparator::new(CompareConfig::quality());
    assert!(cmp.compare(Some(&mesh), Some(&mesh)).unwrap().passed());

    let cmp = MeshComparator::new(CompareConfig::quality().with_tolerance(0.0));
    assert!(!cmp.compare(Some(&mesh), Some(&mesh)).unwrap().passed());
}

#[test]
fn distorted_mesh_fails() {
    let mesh = jittered_hex_block(2, &[[0.0; 3], [0.05, -0.02, 0.0], [0.0, 0.03, 0.01]]);
    let reference = hex_block(2);
    let result = MeshComparator::new(CompareConfig::quality().with_tolerance(1e-3))
        .compare(Some(&mesh), Some(&reference))
        .unwrap();
    assert!(!result.passed());
    assert!(result.difference_mesh().is_none());

    let regular = evaluate_quality(&reference).unwrap();
    assert!((regular.min - 1.0).abs() < 1e-12);
    assert!((regular.max - 1.0).abs() < 1e-12);
}

#[test]
fn empty_reference_is_fatal() {
    let mesh = hex_block(1);
    let empty = UnstructuredMesh::default();
    let err = MeshComparator::new(CompareConfig::quality())
        .compare(Some(&mesh), Some(&empty))
        .unwrap_err();
    assert_eq!(err, MeshCompareError::EmptyMesh(MeshRole::Reference));
}

#[test]
fn unsupported_cells_are_surfaced() {
    let mesh = UnstructuredMesh::try_new(
        vec![[0.0; 3], [1.0, 0.0, 0.0]],
        vec![Cell::new(CellType::Segment, [0, 1])],
    )
    .unwrap();
    let err = MeshComparator::new(CompareConfig::quality())
        .compare(Some(&mesh), Some(&mesh))
        .unwrap_err();
    assert_eq!(err, MeshCompareError::UnsupportedCellType(CellType::Segment));
}

#[test]
fn sub_millimetre_cells_compare_cleanly() {
    let h = 1e-4;
    let tet = UnstructuredMesh::try_new(
        vec![[0.0, 0.0, 0.0], [h, 0.0, 0.0], [0.0, h, 0.0], [0.0, 0.0, h]],
        vec![Cell::new(CellType::Tetrahedron, [0, 1, 2, 3])],
    )
    .unwrap();
    let side = 1e-6;
    let triangle = UnstructuredMesh::try_new(
        vec![
            [0.0, 0.0, 0.0],
            [side, 0.0, 0.0],
            [0.5 * side, 3f64.sqrt() / 2.0 * side, 0.0],
        ],
        vec![Cell::new(CellType::Triangle, [0, 1, 2])],
    )
    .unwrap();

    let cmp = MeshComparator::new(CompareConfig::quality());
    for mesh in [&tet, &triangle] {
        let result = cmp.compare(Some(mesh), Some(mesh)).unwrap();
        assert!(result.passed(), "{}", result.log_text());
        assert_eq!(result.log()[4], "Quality Range Difference: (0.0, 0.0)");
    }
}
