//! Geometry utilities for mesh-compare.
//!
//! This module provides the per-cell ratio quality metric and its reduction
//! to a mesh-wide range.

pub mod quality;
