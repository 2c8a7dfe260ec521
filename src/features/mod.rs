//! Feature objects detected in a host image
//!
//! A feature is an immutable record tied to the image it was found in. Every
//! feature type exposes its boundary and centroid and can draw itself onto the
//! host overlay; bounding-box queries and cropping come for free from the
//! boundary.

/// Barcode feature
pub mod barcode;

pub use barcode::Barcode;

use std::fmt;
use std::ops::Deref;

use image::Rgb;

use crate::error::{BarcodeError, Result};
use crate::models::Point;
use crate::surface::DrawingSurface;
use crate::utils::geometry::BoundingBox;

/// Common contract for features found in a host image
pub trait Feature: fmt::Display {
    /// Surface the feature was detected in
    type Surface: DrawingSurface + ?Sized;

    /// Host image
    fn image(&self) -> &Self::Surface;

    /// Outline points in image coordinates
    fn boundary(&self) -> &[Point];

    /// Mean of the boundary points
    fn centroid(&self) -> Point;

    /// Draw the feature outline on the host overlay
    fn draw(&self, color: Rgb<u8>, width: i32);

    /// Human-readable one-line description
    fn text_representation(&self) -> String {
        self.to_string()
    }

    /// Axis-aligned box around the boundary (degenerate at the centroid if
    /// the boundary is empty)
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.boundary()).unwrap_or_else(|| {
            let c = self.centroid();
            BoundingBox {
                min_x: c.x,
                min_y: c.y,
                max_x: c.x,
                max_y: c.y,
            }
        })
    }

    /// Leftmost boundary x
    fn min_x(&self) -> f64 {
        self.bounding_box().min_x
    }

    /// Rightmost boundary x
    fn max_x(&self) -> f64 {
        self.bounding_box().max_x
    }

    /// Topmost boundary y
    fn min_y(&self) -> f64 {
        self.bounding_box().min_y
    }

    /// Bottommost boundary y
    fn max_y(&self) -> f64 {
        self.bounding_box().max_y
    }

    /// Bounding box width
    fn width(&self) -> f64 {
        self.bounding_box().width()
    }

    /// Bounding box height
    fn height(&self) -> f64 {
        self.bounding_box().height()
    }

    /// Euclidean distance from the centroid to `point`
    fn distance_from(&self, point: Point) -> f64 {
        self.centroid().distance(&point)
    }

    /// Crop the host image to the bounding box, clipped to the image
    fn crop(&self) -> Result<<Self::Surface as DrawingSurface>::Cropped> {
        let bbox = self.bounding_box();
        let (w, h) = self.image().dimensions();

        let x0 = bbox.min_x.floor().clamp(0.0, f64::from(w)) as u32;
        let y0 = bbox.min_y.floor().clamp(0.0, f64::from(h)) as u32;
        let x1 = bbox.max_x.ceil().clamp(0.0, f64::from(w)) as u32;
        let y1 = bbox.max_y.ceil().clamp(0.0, f64::from(h)) as u32;

        if x1 <= x0 || y1 <= y0 {
            return Err(BarcodeError::crop(format!(
                "feature box ({:.1},{:.1})-({:.1},{:.1}) has no pixels inside {w}x{h}",
                bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y
            )));
        }
        self.image().crop(x0, y0, x1 - x0, y1 - y0)
    }
}

/// Features found in one image, in detection order
#[derive(Debug, Clone)]
pub struct FeatureSet<F> {
    features: Vec<F>,
}

impl<F: Feature> FeatureSet<F> {
    /// Wrap features in detection order
    pub fn new(features: Vec<F>) -> Self {
        Self { features }
    }

    /// Draw every feature with the same style
    pub fn draw_all(&self, color: Rgb<u8>, width: i32) {
        for feature in &self.features {
            feature.draw(color, width);
        }
    }

    /// Centroid of every feature
    pub fn centroids(&self) -> Vec<Point> {
        self.features.iter().map(|f| f.centroid()).collect()
    }

    /// Reorder by centroid distance from `point`, nearest first
    pub fn sort_by_distance_from(&mut self, point: Point) {
        self.features
            .sort_by(|a, b| a.distance_from(point).total_cmp(&b.distance_from(point)));
    }

    /// Unwrap into the underlying vector
    pub fn into_vec(self) -> Vec<F> {
        self.features
    }
}

impl<F> Default for FeatureSet<F> {
    fn default() -> Self {
        Self {
            features: Vec::new(),
        }
    }
}

impl<F> Deref for FeatureSet<F> {
    type Target = [F];

    fn deref(&self) -> &[F] {
        &self.features
    }
}

impl<F> IntoIterator for FeatureSet<F> {
    type Item = F;
    type IntoIter = std::vec::IntoIter<F>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'s, F> IntoIterator for &'s FeatureSet<F> {
    type Item = &'s F;
    type IntoIter = std::slice::Iter<'s, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

impl<F> FromIterator<F> for FeatureSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}
