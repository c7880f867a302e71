//! Per-cell difference of a named field between a candidate and a reference.
//!
//! The reference field is copied onto a clone of the candidate as
//! `Ref<name>`, and the difference `candidate - reference` is stored alongside
//! it as [`DIFFERENCE_FIELD_NAME`]. Neither input mesh is modified.

use crate::data::field::FieldRange;
use crate::data::mesh::MeshAccess;
use crate::mesh_error::{MeshCompareError, MeshRole};

/// Name of the per-cell difference field on the output mesh.
pub const DIFFERENCE_FIELD_NAME: &str = "ResultArray";

/// Prefix for the copy of the reference field on the output mesh.
pub const REFERENCE_FIELD_PREFIX: &str = "Ref";

/// Outcome of [`compute_difference`].
#[derive(Clone, Debug, PartialEq)]
pub enum DifferenceOutcome<M> {
    /// Point counts differ; no difference field was computed.
    UnevenPoints {
        mesh_points: usize,
        reference_points: usize,
    },
    /// The candidate clone carrying the difference field, and its range.
    Computed { mesh: M, range: FieldRange },
}

/// Name under which the reference copy of `field_name` is stored.
pub fn reference_field_name(field_name: &str) -> String {
    format!("{REFERENCE_FIELD_PREFIX}{field_name}")
}

/// Difference the cell field `field_name` of `candidate` against `reference`.
///
/// Fails fast with [`MeshCompareError::EmptyFieldName`] or
/// [`MeshCompareError::MissingField`] (reference checked first). A point
/// count mismatch is reported as [`DifferenceOutcome::UnevenPoints`].
///
/// Cell ordering is assumed to match between the two meshes; equal point
/// counts are the only structural check.
pub fn compute_difference<M>(
    candidate: &M,
    reference: &M,
    field_name: &str,
) -> Result<DifferenceOutcome<M>, MeshCompareError>
where
    M: MeshAccess + Clone,
{
    if field_name.is_empty() {
        return Err(MeshCompareError::EmptyFieldName);
    }
    let reference_values = reference
        .cell_field(field_name)
        .ok_or_else(|| MeshCompareError::MissingField {
            mesh: MeshRole::Reference,
            name: field_name.to_string(),
        })?;
    let candidate_values = candidate
        .cell_field(field_name)
        .ok_or_else(|| MeshCompareError::MissingField {
            mesh: MeshRole::Mesh,
            name: field_name.to_string(),
        })?;

    let mesh_points = candidate.point_count();
    let reference_points = reference.point_count();
    if mesh_points != reference_points {
        return Ok(DifferenceOutcome::UnevenPoints {
            mesh_points,
            reference_points,
        });
    }

    if candidate.cell_count() == 0 {
        return Err(MeshCompareError::EmptyMesh(MeshRole::Mesh));
    }
    if reference.cell_count() == 0 {
        return Err(MeshCompareError::EmptyMesh(MeshRole::Reference));
    }

    let difference: Vec<f64> = candidate_values
        .iter()
        .zip(reference_values)
        .map(|(a, b)| a - b)
        .collect();
    let range = FieldRange::from_values(&difference)
        .ok_or(MeshCompareError::EmptyMesh(MeshRole::Mesh))?;

    let mut mesh = candidate.clone();
    mesh.set_cell_field(&reference_field_name(field_name), reference_values.to_vec())?;
    mesh.set_cell_field(DIFFERENCE_FIELD_NAME, difference)?;
    log::debug!("cell field `{field_name}` difference range {range}");

    Ok(DifferenceOutcome::Computed { mesh, range })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mesh::{Cell, UnstructuredMesh};
    use crate::topology::cell_type::CellType;

    fn strip(values: &[f64], points: usize) -> UnstructuredMesh {
        let pts = (0..points).map(|i| [i as f64, 0.0, 0.0]).collect();
        let cells = (0..values.len())
            .map(|i| Cell::new(CellType::Vertex, [i % points]))
            .collect();
        UnstructuredMesh::try_new(pts, cells)
            .unwrap()
            .with_cell_field("Pressure", values.to_vec())
            .unwrap()
    }

    #[test]
    fn difference_field_is_attached_to_a_copy() {
        let candidate = strip(&[1.0, 2.0, 4.0], 3);
        let reference = strip(&[1.0, 2.0, 3.0], 3);
        let outcome = compute_difference(&candidate, &reference, "Pressure").unwrap();
        let DifferenceOutcome::Computed { mesh, range } = outcome else {
            panic!("expected a computed difference");
        };
        assert_eq!(range, FieldRange::new(0.0, 1.0));
        assert_eq!(mesh.cell_field("ResultArray"), Some(&[0.0, 0.0, 1.0][..]));
        assert_eq!(mesh.cell_field("RefPressure"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(
            mesh.cell_data().names().collect::<Vec<_>>(),
            vec!["Pressure", "RefPressure", "ResultArray"]
        );
        assert_eq!(candidate.cell_field("ResultArray"), None);
        assert_eq!(reference.cell_field("RefPressure"), None);
    }

    #[test]
    fn uneven_points_short_circuits() {
        let candidate = strip(&[1.0, 2.0], 3);
        let reference = strip(&[5.0, 9.0], 2);
        assert_eq!(
            compute_difference(&candidate, &reference, "Pressure").unwrap(),
            DifferenceOutcome::UnevenPoints {
                mesh_points: 3,
                reference_points: 2
            }
        );
    }

    #[test]
    fn missing_fields_fail_fast() {
        let candidate = strip(&[1.0], 1);
        let reference = strip(&[1.0], 1);
        assert_eq!(
            compute_difference(&candidate, &reference, ""),
            Err(MeshCompareError::EmptyFieldName)
        );
        assert_eq!(
            compute_difference(&candidate, &reference, "Velocity"),
            Err(MeshCompareError::MissingField {
                mesh: MeshRole::Reference,
                name: "Velocity".into()
            })
        );
        let mut reference = reference;
        reference.set_cell_field("Velocity", vec![0.0]).unwrap();
        assert_eq!(
            compute_difference(&candidate, &reference, "Velocity"),
            Err(MeshCompareError::MissingField {
                mesh: MeshRole::Mesh,
                name: "Velocity".into()
            })
        );
    }

    #[test]
    fn empty_meshes_are_rejected() {
        let empty = UnstructuredMesh::default()
            .with_cell_field("Pressure", Vec::new())
            .unwrap();
        assert_eq!(
            compute_difference(&empty, &empty, "Pressure"),
            Err(MeshCompareError::EmptyMesh(MeshRole::Mesh))
        );
    }
}
