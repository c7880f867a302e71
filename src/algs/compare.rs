//! Mesh comparison engine.
//!
//! [`MeshComparator`] runs one of two strategies against a candidate and a
//! reference mesh and reduces the outcome to a single pass/fail verdict:
//!
//! - [`CompareMethod::Quality`]: evaluate the ratio quality range of both
//!   meshes and compare the ranges bound by bound.
//! - [`CompareMethod::Array`]: difference a named cell field (see
//!   [`compute_difference`]) and check the range of the difference.
//!
//! Both strategies share the same strict tolerance rule: the largest absolute
//! difference must be *strictly* below the tolerance.
//!
//! Missing inputs and empty meshes abort with a [`MeshCompareError`]; a point
//! count mismatch under the array method is a regular failed
//! [`ComparisonResult`].

use crate::algs::difference::{DifferenceOutcome, compute_difference};
use crate::data::field::FieldRange;
use crate::data::mesh::MeshGeometry;
use crate::geometry::quality::{QualityMetric, RatioQuality, evaluate_quality_with};
use crate::mesh_error::{MeshCompareError, MeshRole};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default absolute tolerance for both comparison methods.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Log line recorded when the array method sees different point counts.
pub const UNEVEN_POINTS_LOG: &str = "Uneven NumberOfPoints";

/// Comparison strategy.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareMethod {
    /// Compare ratio quality ranges.
    Quality,
    /// Compare a named cell field.
    Array,
}

impl FromStr for CompareMethod {
    type Err = MeshCompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quality" => Ok(CompareMethod::Quality),
            "array" => Ok(CompareMethod::Array),
            "" => Err(MeshCompareError::NoMethod),
            other => Err(MeshCompareError::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for CompareMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareMethod::Quality => f.write_str("quality"),
            CompareMethod::Array => f.write_str("array"),
        }
    }
}

/// Immutable settings for one or many comparisons.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Strategy to run; required.
    pub method: Option<CompareMethod>,
    /// Cell field to compare; required by [`CompareMethod::Array`].
    pub array_name: Option<String>,
    /// Absolute tolerance; differences must be strictly smaller.
    pub tolerance: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            method: None,
            array_name: None,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl CompareConfig {
    /// Quality comparison with the default tolerance.
    pub fn quality() -> Self {
        Self {
            method: Some(CompareMethod::Quality),
            ..Self::default()
        }
    }

    /// Array comparison of the cell field `name` with the default tolerance.
    pub fn array(name: impl Into<String>) -> Self {
        Self {
            method: Some(CompareMethod::Array),
            array_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Parse the method from its textual name (`"quality"` / `"array"`).
    pub fn with_method_name(mut self, method: &str) -> Result<Self, MeshCompareError> {
        self.method = Some(method.parse()?);
        Ok(self)
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_array_name(mut self, name: impl Into<String>) -> Self {
        self.array_name = Some(name.into());
        self
    }
}

/// Verdict, log and optional difference mesh of one comparison.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonResult<M> {
    passed: bool,
    log: Vec<String>,
    difference_mesh: Option<M>,
}

impl<M> ComparisonResult<M> {
    /// Whether the meshes are equal within tolerance.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Log lines in the order they were recorded.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Log lines joined with newlines.
    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }

    /// Candidate mesh carrying the difference field (array method only).
    pub fn difference_mesh(&self) -> Option<&M> {
        self.difference_mesh.as_ref()
    }

    pub fn into_difference_mesh(self) -> Option<M> {
        self.difference_mesh
    }
}

/// Runs comparisons with a fixed configuration and quality metric.
#[derive(Clone, Debug)]
pub struct MeshComparator<Q = RatioQuality> {
    config: CompareConfig,
    metric: Q,
}

impl MeshComparator<RatioQuality> {
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            metric: RatioQuality,
        }
    }
}

impl<Q: QualityMetric> MeshComparator<Q> {
    /// Comparator using a custom quality metric for [`CompareMethod::Quality`].
    pub fn with_metric(config: CompareConfig, metric: Q) -> Self {
        Self { config, metric }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare `mesh` against `reference`.
    ///
    /// Preconditions are checked in order: mesh present, reference present,
    /// method configured, and (array method) a non-empty array name.
    pub fn compare<M>(
        &self,
        mesh: Option<&M>,
        reference: Option<&M>,
    ) -> Result<ComparisonResult<M>, MeshCompareError>
    where
        M: MeshGeometry + Clone,
    {
        let mesh = mesh.ok_or(MeshCompareError::NoMesh)?;
        let reference = reference.ok_or(MeshCompareError::NoReferenceMesh)?;
        let method = self.config.method.ok_or(MeshCompareError::NoMethod)?;
        log::debug!(
            "comparing meshes by {method} with tolerance {:e}",
            self.config.tolerance
        );

        let result = match method {
            CompareMethod::Quality => self.quality_compare(mesh, reference)?,
            CompareMethod::Array => {
                let name = self
                    .config
                    .array_name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .ok_or(MeshCompareError::EmptyFieldName)?;
                self.array_compare(mesh, reference, name)?
            }
        };
        log::info!(
            "{method} comparison {}",
            if result.passed { "passed" } else { "failed" }
        );
        Ok(result)
    }

    fn quality_compare<M>(
        &self,
        mesh: &M,
        reference: &M,
    ) -> Result<ComparisonResult<M>, MeshCompareError>
    where
        M: MeshGeometry,
    {
        let mesh_range = evaluate_quality_with(mesh, &self.metric, MeshRole::Mesh)?;
        let reference_range = evaluate_quality_with(reference, &self.metric, MeshRole::Reference)?;
        let difference = mesh_range.difference(&reference_range);
        log::debug!("quality ranges {mesh_range} vs {reference_range}, difference {difference}");

        let mut lines = points_log(mesh.point_count(), reference.point_count());
        lines.push(format!("Mesh Quality Range: {mesh_range}"));
        lines.push(format!("Reference Quality Range: {reference_range}"));
        lines.push(format!("Quality Range Difference: {difference}"));
        Ok(self.finish(difference, lines, None))
    }

    fn array_compare<M>(
        &self,
        mesh: &M,
        reference: &M,
        name: &str,
    ) -> Result<ComparisonResult<M>, MeshCompareError>
    where
        M: MeshGeometry + Clone,
    {
        let mut lines = points_log(mesh.point_count(), reference.point_count());
        match compute_difference(mesh, reference, name)? {
            DifferenceOutcome::UnevenPoints {
                mesh_points,
                reference_points,
            } => {
                log::warn!(
                    "point count mismatch: mesh has {mesh_points}, reference has {reference_points}"
                );
                lines.push(UNEVEN_POINTS_LOG.to_string());
                lines.push(verdict_line(false));
                Ok(ComparisonResult {
                    passed: false,
                    log: lines,
                    difference_mesh: None,
                })
            }
            DifferenceOutcome::Computed { mesh, range } => {
                lines.push(format!("Result Range: {range}"));
                Ok(self.finish(range, lines, Some(mesh)))
            }
        }
    }

    fn finish<M>(
        &self,
        difference: FieldRange,
        mut lines: Vec<String>,
        difference_mesh: Option<M>,
    ) -> ComparisonResult<M> {
        let passed = difference.within(self.config.tolerance);
        lines.push(verdict_line(passed));
        ComparisonResult {
            passed,
            log: lines,
            difference_mesh,
        }
    }

    /// Compare many independent `(mesh, reference)` pairs.
    ///
    /// Results keep the input order. With the `rayon` feature the pairs are
    /// compared in parallel.
    #[cfg(not(feature = "rayon"))]
    pub fn compare_all<M>(
        &self,
        pairs: &[(M, M)],
    ) -> Vec<Result<ComparisonResult<M>, MeshCompareError>>
    where
        M: MeshGeometry + Clone,
    {
        pairs
            .iter()
            .map(|(mesh, reference)| self.compare(Some(mesh), Some(reference)))
            .collect()
    }

    /// Compare many independent `(mesh, reference)` pairs in parallel.
    ///
    /// Results keep the input order.
    #[cfg(feature = "rayon")]
    pub fn compare_all<M>(
        &self,
        pairs: &[(M, M)],
    ) -> Vec<Result<ComparisonResult<M>, MeshCompareError>>
    where
        M: MeshGeometry + Clone + Send + Sync,
        Q: Sync,
    {
        use rayon::prelude::*;
        pairs
            .par_iter()
            .map(|(mesh, reference)| self.compare(Some(mesh), Some(reference)))
            .collect()
    }
}

/// Compare two meshes with the ratio quality metric.
///
/// `method` is the textual method name, `array_name` is required for
/// `"array"`.
pub fn compare<M>(
    method: &str,
    mesh: Option<&M>,
    reference: Option<&M>,
    array_name: Option<&str>,
    tolerance: f64,
) -> Result<ComparisonResult<M>, MeshCompareError>
where
    M: MeshGeometry + Clone,
{
    let mesh = mesh.ok_or(MeshCompareError::NoMesh)?;
    let reference = reference.ok_or(MeshCompareError::NoReferenceMesh)?;
    let mut config = CompareConfig::default()
        .with_method_name(method)?
        .with_tolerance(tolerance);
    config.array_name = array_name.map(str::to_string);
    MeshComparator::new(config).compare(Some(mesh), Some(reference))
}

fn points_log(mesh_points: usize, reference_points: usize) -> Vec<String> {
    vec![
        format!("Mesh points: {mesh_points}"),
        format!("Reference Points: {reference_points}"),
    ]
}

fn verdict_line(passed: bool) -> String {
    format!("Result: {}", if passed { "passed" } else { "failed" })
}
