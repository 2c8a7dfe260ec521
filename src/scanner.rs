//! Seam to the external barcode decoder
//!
//! Symbol decoding is done by another library; this module only turns its
//! output into [`Barcode`] features bound to the scanned image.

use image::RgbImage;
use tracing::{info, instrument};

use crate::error::Result;
use crate::features::{Barcode, FeatureSet};
use crate::models::DecodedSymbol;
use crate::surface::LayeredImage;

/// External decoder producing symbol records from pixels
pub trait SymbolDecoder {
    /// Decode every symbol visible in `pixels`
    fn decode(&self, pixels: &RgbImage) -> Result<Vec<DecodedSymbol>>;
}

impl<F> SymbolDecoder for F
where
    F: Fn(&RgbImage) -> Result<Vec<DecodedSymbol>>,
{
    fn decode(&self, pixels: &RgbImage) -> Result<Vec<DecodedSymbol>> {
        self(pixels)
    }
}

/// Run `decoder` over `image` and wrap each symbol as a barcode feature
///
/// Returns an empty set when nothing decodes.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn find_barcodes<'img, D>(image: &'img LayeredImage, decoder: &D) -> Result<FeatureSet<Barcode<'img>>>
where
    D: SymbolDecoder + ?Sized,
{
    let symbols = decoder.decode(image.pixels())?;
    info!(symbols = symbols.len(), "decoder finished");
    Barcode::from_symbols(image, symbols)
}
