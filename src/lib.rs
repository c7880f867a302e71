#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-compare
//!
//! mesh-compare checks a newly generated volumetric mesh against a known-good
//! reference and reports whether the two are equal within an absolute
//! tolerance. It is meant for regression tests of meshing pipelines.
//!
//! ## Methods
//! - **quality**: evaluate a ratio-type quality scalar for every cell of both
//!   meshes and compare the `(min, max)` ranges.
//! - **array**: difference a named per-cell scalar field and compare the range
//!   of the difference. The candidate mesh, augmented with the reference copy
//!   (`Ref<name>`) and the difference (`ResultArray`), is returned for
//!   inspection.
//!
//! Both methods pass only if every absolute difference is *strictly* below
//! the tolerance (default `1e-8`).
//!
//! ## Usage
//! ```rust
//! use mesh_compare::prelude::*;
//!
//! let mesh = UnstructuredMesh::try_new(
//!     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
//!     vec![Cell::new(CellType::Triangle, [0, 1, 2])],
//! )?
//! .with_cell_field("Pressure", vec![1.0])?;
//!
//! let comparator = MeshComparator::new(CompareConfig::array("Pressure").with_tolerance(1e-6));
//! let result = comparator.compare(Some(&mesh), Some(&mesh))?;
//! assert!(result.passed());
//! assert!(result.difference_mesh().is_some());
//! # Ok::<(), mesh_compare::mesh_error::MeshCompareError>(())
//! ```
//!
//! ## Features
//! - `rayon`: compare many mesh pairs in parallel with
//!   [`MeshComparator::compare_all`](algs::compare::MeshComparator::compare_all).

pub mod algs;
pub mod data;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::compare::{
        CompareConfig, CompareMethod, ComparisonResult, MeshComparator, compare,
    };
    pub use crate::algs::difference::{DifferenceOutcome, compute_difference};
    pub use crate::data::field::{CellData, FieldRange};
    pub use crate::data::mesh::{Cell, MeshAccess, MeshGeometry, UnstructuredMesh};
    pub use crate::geometry::quality::{
        QualityMetric, RatioQuality, attach_quality_field, evaluate_quality,
    };
    pub use crate::io::vtk::{VtkReader, VtkWriter};
    pub use crate::io::{MeshReader, MeshWriter};
    pub use crate::mesh_error::{MeshCompareError, MeshRole};
    pub use crate::topology::cell_type::CellType;
}
