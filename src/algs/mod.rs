//! Comparison algorithms.

pub mod compare;
pub mod difference;

pub use compare::{CompareConfig, CompareMethod, ComparisonResult, MeshComparator, compare};
pub use difference::{DifferenceOutcome, compute_difference};
