use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use image::{Rgb, RgbImage};
use tracing::{debug, instrument, trace};

use super::{DrawingLayer, DrawingSurface};
use crate::error::{BarcodeError, Result};
use crate::models::Point;

/// RGB image with a vector overlay kept apart from its pixels
///
/// Drawing only records commands; `apply_layers` rasterizes them onto a copy,
/// leaving the source pixels as loaded.
#[derive(Debug)]
pub struct LayeredImage {
    pixels: RgbImage,
    layer: Mutex<DrawingLayer>,
}

impl LayeredImage {
    /// Wrap decoded pixels with an empty overlay
    pub fn new(pixels: RgbImage) -> Self {
        Self {
            pixels,
            layer: Mutex::new(DrawingLayer::new()),
        }
    }

    /// Black image of the given size
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbImage::new(width, height))
    }

    /// Load and decode an image file
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let pixels = image::open(path.as_ref())?.to_rgb8();
        debug!(width = pixels.width(), height = pixels.height(), "image loaded");
        Ok(Self::new(pixels))
    }

    /// Source pixels, without the overlay
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn lock_layer(&self) -> MutexGuard<'_, DrawingLayer> {
        // A panic mid-push cannot leave the command list inconsistent
        self.layer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the overlay
    pub fn layer(&self) -> DrawingLayer {
        self.lock_layer().clone()
    }

    /// Drop every queued overlay command
    pub fn clear_layers(&self) {
        self.lock_layer().clear();
    }

    /// Pixels with the overlay rasterized on top
    #[instrument(skip(self))]
    pub fn apply_layers(&self) -> RgbImage {
        let mut canvas = self.pixels.clone();
        let layer = self.lock_layer();
        debug!(commands = layer.len(), "rendering overlay");
        layer.render_onto(&mut canvas);
        canvas
    }

    /// Render the overlay and write the result; format follows the extension
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn save_rendered(&self, path: impl AsRef<Path>) -> Result<()> {
        self.apply_layers().save(path.as_ref())?;
        Ok(())
    }
}

impl DrawingSurface for LayeredImage {
    type Cropped = LayeredImage;

    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn draw_line(&self, a: Point, b: Point, color: Rgb<u8>, width: i32) {
        trace!(?a, ?b, ?color, width, "draw_line");
        self.lock_layer().line(a, b, color, width);
    }

    fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<LayeredImage> {
        let (w, h) = self.pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(BarcodeError::crop(format!("empty region {width}x{height}")));
        }
        let fits_x = x.checked_add(width).is_some_and(|end| end <= w);
        let fits_y = y.checked_add(height).is_some_and(|end| end <= h);
        if !fits_x || !fits_y {
            return Err(BarcodeError::crop(format!(
                "region {width}x{height}+{x}+{y} exceeds image {w}x{h}"
            )));
        }
        let region = image::imageops::crop_imm(&self.pixels, x, y, width, height).to_image();
        Ok(LayeredImage::new(region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_line_leaves_pixels_untouched() {
        let img = LayeredImage::blank(10, 10);
        img.draw_line(Point::new(0.0, 0.0), Point::new(9.0, 0.0), Rgb([0, 255, 0]), 1);

        assert_eq!(img.layer().len(), 1);
        assert_eq!(*img.pixels().get_pixel(4, 0), Rgb([0, 0, 0]));
        assert_eq!(*img.apply_layers().get_pixel(4, 0), Rgb([0, 255, 0]));

        img.clear_layers();
        assert!(img.layer().is_empty());
    }

    #[test]
    fn test_crop_bounds() {
        let mut pixels = RgbImage::new(20, 10);
        pixels.put_pixel(5, 4, Rgb([9, 9, 9]));
        let img = LayeredImage::new(pixels);

        let cropped = img.crop(5, 4, 3, 2).unwrap();
        assert_eq!(cropped.dimensions(), (3, 2));
        assert_eq!(*cropped.pixels().get_pixel(0, 0), Rgb([9, 9, 9]));

        assert!(img.crop(18, 0, 5, 5).is_err());
        assert!(img.crop(0, 0, 0, 5).is_err());
        assert!(img.crop(u32::MAX, 0, 2, 2).is_err());
    }
}
