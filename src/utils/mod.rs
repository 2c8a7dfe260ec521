//! Utility functions for feature geometry
//!
//! - Centroids and axis-aligned bounding boxes
//! - Pairwise distances, edges and diagonals of quadrilaterals
//! - Bretschneider and shoelace areas

/// Centroid, bounding box, distance and area helpers
pub mod geometry;
