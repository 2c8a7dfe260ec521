//! Host image capabilities a feature draws onto and crops from
//!
//! Features hold a shared borrow of their source image for their whole
//! lifetime, so drawing goes through `&self`. Implementations keep their
//! overlay behind interior mutability and never touch the pixel buffer when a
//! line is drawn.

/// Overlay command list and rasterization
pub mod layer;
/// `image`-backed host surface
pub mod layered_image;

pub use layer::{DrawingLayer, LineCommand};
pub use layered_image::LayeredImage;

use image::Rgb;

use crate::error::Result;
use crate::models::Point;

/// Drawing and cropping surface backing a detected feature
pub trait DrawingSurface {
    /// Image type produced by `crop`
    type Cropped;

    /// Width and height in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Queue a line on the overlay; a negative `width` requests a filled shape
    fn draw_line(&self, a: Point, b: Point, color: Rgb<u8>, width: i32);

    /// Copy out the `width` x `height` region starting at (`x`, `y`)
    fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Self::Cropped>;
}
