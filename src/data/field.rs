//! Named per-cell scalar fields and their value ranges.
//!
//! [`CellData`] keeps fields in insertion order; replacing a field keeps its
//! slot so that existing fields are never reordered. [`FieldRange`] is the
//! `(min, max)` summary both comparison methods reduce to.

use itertools::{Itertools, MinMaxResult};
use std::fmt;

/// Insertion-ordered set of named cell fields.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CellData {
    fields: Vec<(String, Vec<f64>)>,
}

impl CellData {
    /// Empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of the field called `name`, if present.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Whether a field called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert or replace the field called `name`.
    ///
    /// Returns the previous values when the field already existed.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) -> Option<Vec<f64>> {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, values)),
            None => {
                self.fields.push((name, values));
                None
            }
        }
    }

    /// Remove the field called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Vec<f64>> {
        let idx = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(idx).1)
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate `(name, values)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.fields
            .iter()
            .map(|(n, values)| (n.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Extremes of a scalar field across all cells.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Reduce `values` to `(min, max)`; `None` for an empty slice.
    ///
    /// Ordering uses `f64::total_cmp`, so a NaN value surfaces as the maximum
    /// instead of being dropped.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        match values.iter().copied().minmax_by(|a, b| a.total_cmp(b)) {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(v) => Some(Self::new(v, v)),
            MinMaxResult::MinMax(min, max) => Some(Self::new(min, max)),
        }
    }

    /// Elementwise `self - other`.
    pub fn difference(&self, other: &FieldRange) -> FieldRange {
        FieldRange::new(self.min - other.min, self.max - other.max)
    }

    /// Largest absolute value of the two bounds.
    pub fn max_abs(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }

    /// Strict tolerance test shared by both comparison methods.
    ///
    /// `max(|min|, |max|) < tolerance`; a value equal to the tolerance fails,
    /// and so does any NaN bound.
    pub fn within(&self, tolerance: f64) -> bool {
        self.min.abs() < tolerance && self.max.abs() < tolerance
    }
}

impl fmt::Display for FieldRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut data = CellData::new();
        data.insert("a", vec![1.0]);
        data.insert("b", vec![2.0]);
        let old = data.insert("a", vec![3.0]);
        assert_eq!(old, Some(vec![1.0]));
        assert_eq!(data.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(data.get("a"), Some(&[3.0][..]));
    }

    #[test]
    fn range_of_values() {
        assert_eq!(FieldRange::from_values(&[]), None);
        assert_eq!(
            FieldRange::from_values(&[2.0]),
            Some(FieldRange::new(2.0, 2.0))
        );
        assert_eq!(
            FieldRange::from_values(&[3.0, -1.0, 2.0]),
            Some(FieldRange::new(-1.0, 3.0))
        );
    }

    #[test]
    fn tolerance_is_strict() {
        let range = FieldRange::new(0.0, 0.5);
        assert!(range.within(0.6));
        assert!(!range.within(0.5));
        assert!(!FieldRange::new(0.0, 0.0).within(0.0));
        assert!(!FieldRange::new(f64::NAN, 0.0).within(1.0));
    }

    #[test]
    fn nan_surfaces_as_max() {
        let range = FieldRange::from_values(&[1.0, f64::NAN, 0.5]).unwrap();
        assert_eq!(range.min, 0.5);
        assert!(range.max.is_nan());
    }

    #[test]
    fn display_matches_tuple_form() {
        assert_eq!(FieldRange::new(0.8, 1.0).to_string(), "(0.8, 1.0)");
    }
}
