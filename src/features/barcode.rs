use std::fmt;

use image::Rgb;
use rayon::prelude::*;
use tracing::{debug, instrument, trace};

use super::{Feature, FeatureSet};
use crate::config::{self, AreaPolicy};
use crate::error::{BarcodeError, Result};
use crate::models::{DecodedSymbol, Point};
use crate::surface::{DrawingSurface, LayeredImage};
use crate::utils::geometry::{self, BoundingBox, Quad};

/// Barcode found in a host image
///
/// Wraps one decoder symbol: the boundary quadrilateral, the payload and the
/// centroid, plus a borrow of the image the symbol was read from.
///
/// * The boundary is kept exactly as the decoder reported it when it has four
///   points. For QR codes those are the finder reference corners, so the
///   shape is a general quadrangle rather than a rectangle.
/// * Longer outlines collapse to their bounding rectangle, corners ordered
///   (min-x,min-y), (min-x,max-y), (max-x,max-y), (max-x,min-y).
///
/// Edge and area queries assume the four corners are in cyclic order, which
/// is the decoder's responsibility; out-of-order corners give silently wrong
/// results.
pub struct Barcode<'img, S: ?Sized = LayeredImage> {
    image: &'img S,
    boundary: Quad,
    payload: String,
    centroid: Point,
}

impl<'img, S: DrawingSurface + ?Sized> Barcode<'img, S> {
    /// Build a feature from a decoder symbol
    ///
    /// Fails with `InvalidDecodedSymbol` if the outline has fewer than four
    /// points or any coordinate is not finite.
    #[instrument(skip_all, fields(points = symbol.location.len()))]
    pub fn new(image: &'img S, symbol: DecodedSymbol) -> Result<Self> {
        let DecodedSymbol { location, data } = symbol;

        if location.len() < 4 {
            return Err(BarcodeError::invalid_symbol(format!(
                "{} boundary points, need at least 4",
                location.len()
            )));
        }
        if let Some(bad) = location.iter().find(|p| !p.is_finite()) {
            return Err(BarcodeError::invalid_symbol(format!(
                "non-finite boundary point ({}, {})",
                bad.x, bad.y
            )));
        }

        let boundary: Quad = match <[Point; 4]>::try_from(location.as_slice()) {
            Ok(quad) => quad,
            Err(_) => {
                let bbox = BoundingBox::from_points(&location)
                    .ok_or_else(|| BarcodeError::invalid_symbol("empty outline"))?;
                trace!(?bbox, "outline reduced to bounding rectangle");
                bbox.corners()
            }
        };
        let centroid = geometry::centroid(&boundary);

        debug!(x = centroid.x, y = centroid.y, payload_len = data.len(), "barcode feature created");
        Ok(Self {
            image,
            boundary,
            payload: data,
            centroid,
        })
    }

    /// Four boundary corners
    pub fn boundary(&self) -> &Quad {
        &self.boundary
    }

    /// Decoded payload
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Mean of the four boundary corners
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Image the barcode was read from
    pub fn image(&self) -> &'img S {
        self.image
    }

    /// Side lengths (0,1), (1,2), (2,3), (3,0)
    pub fn edge_lengths(&self) -> [f64; 4] {
        geometry::edge_lengths(&self.boundary)
    }

    /// Diagonal lengths (0,2), (1,3)
    pub fn diagonal_lengths(&self) -> [f64; 2] {
        geometry::diagonal_lengths(&self.boundary)
    }

    /// Longest side of the boundary quadrangle; diagonals never count
    pub fn longest_edge_length(&self) -> f64 {
        self.edge_lengths().into_iter().fold(0.0, f64::max)
    }

    /// Area of the boundary quadrangle under the configured area policy
    ///
    /// See [`config::area_policy`].
    pub fn quadrilateral_area(&self) -> Result<f64> {
        self.quadrilateral_area_with(config::area_policy())
    }

    /// Area of the boundary quadrangle from its sides and diagonals
    /// (generalized Bretschneider formula)
    pub fn quadrilateral_area_with(&self, policy: AreaPolicy) -> Result<f64> {
        geometry::bretschneider_area(&self.boundary, policy, config::area_epsilon())
    }

    /// Outline the boundary on the host overlay: four segments 0→1, 1→2,
    /// 2→3, 3→0. A negative `width` asks the surface to fill the shape.
    pub fn draw(&self, color: Rgb<u8>, width: i32) {
        for (i, j) in geometry::EDGES {
            self.image
                .draw_line(self.boundary[i], self.boundary[j], color, width);
        }
    }

    /// `draw` with the configured default color and width
    pub fn draw_default(&self) {
        self.draw(config::DEFAULT_COLOR, config::draw_width());
    }

    /// `"<module>::Barcode at (x,y), read data: <payload>"`, centroid truncated
    pub fn text_representation(&self) -> String {
        self.to_string()
    }
}

impl<'img, S: DrawingSurface + Sync + ?Sized> Barcode<'img, S> {
    /// Build one feature per symbol, in parallel, keeping decoder order
    ///
    /// The first invalid symbol fails the whole batch.
    pub fn from_symbols(image: &'img S, symbols: Vec<DecodedSymbol>) -> Result<FeatureSet<Self>> {
        symbols
            .into_par_iter()
            .map(|symbol| Self::new(image, symbol))
            .collect::<Result<Vec<_>>>()
            .map(FeatureSet::new)
    }
}

impl<S: ?Sized> fmt::Display for Barcode<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::Barcode at ({:.0},{:.0}), read data: {}",
            module_path!(),
            toward_zero(self.centroid.x),
            toward_zero(self.centroid.y),
            self.payload
        )
    }
}

/// Truncate without the `i64` cast's saturation; `-0` prints as `0`
fn toward_zero(v: f64) -> f64 {
    v.trunc() + 0.0
}

impl<S: ?Sized> fmt::Debug for Barcode<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Barcode")
            .field("boundary", &self.boundary)
            .field("payload", &self.payload)
            .field("centroid", &self.centroid)
            .finish_non_exhaustive()
    }
}

impl<S: ?Sized> Clone for Barcode<'_, S> {
    fn clone(&self) -> Self {
        Self {
            image: self.image,
            boundary: self.boundary,
            payload: self.payload.clone(),
            centroid: self.centroid,
        }
    }
}

impl<S: DrawingSurface + ?Sized> Feature for Barcode<'_, S> {
    type Surface = S;

    fn image(&self) -> &S {
        self.image
    }

    fn boundary(&self) -> &[Point] {
        &self.boundary
    }

    fn centroid(&self) -> Point {
        self.centroid
    }

    fn draw(&self, color: Rgb<u8>, width: i32) {
        Barcode::draw(self, color, width);
    }
}

impl<'img, S: DrawingSurface + ?Sized> FeatureSet<Barcode<'img, S>> {
    /// Payload of every barcode, in set order
    pub fn payloads(&self) -> Vec<&str> {
        self.features.iter().map(|b| b.payload()).collect()
    }

    /// Barcode with the longest boundary edge
    pub fn longest(&self) -> Option<&Barcode<'img, S>> {
        self.features
            .iter()
            .max_by(|a, b| a.longest_edge_length().total_cmp(&b.longest_edge_length()))
    }

    /// Reorder by quadrilateral area, smallest first
    pub fn sort_by_area(&mut self, policy: AreaPolicy) -> Result<()> {
        let areas = self
            .features
            .iter()
            .map(|b| b.quadrilateral_area_with(policy))
            .collect::<Result<Vec<_>>>()?;
        let mut keyed: Vec<_> = areas
            .into_iter()
            .zip(std::mem::take(&mut self.features))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.features = keyed.into_iter().map(|(_, b)| b).collect();
        Ok(())
    }
}
