//! Error types for barcode feature construction, geometry and rendering

use thiserror::Error;

/// Result type alias for scv_barcode operations
pub type Result<T> = std::result::Result<T, BarcodeError>;

/// Errors surfaced by barcode features and their host surfaces
#[derive(Error, Debug)]
pub enum BarcodeError {
    /// Decoder output cannot describe a quadrilateral
    #[error("Invalid decoded symbol: {reason}")]
    InvalidDecodedSymbol {
        /// What was wrong with the outline
        reason: String,
    },

    /// Area radicand fell below zero beyond rounding tolerance
    #[error("Degenerate geometry: area radicand {radicand} is negative")]
    DegenerateGeometry {
        /// Value that would have been square-rooted
        radicand: f64,
    },

    /// Color triplet could not be parsed
    #[error("Invalid color: {input}")]
    InvalidColor {
        /// Rejected input text
        input: String,
    },

    /// Requested crop region lies outside the image or is empty
    #[error("Crop failed: {reason}")]
    Crop {
        /// Why the region was rejected
        reason: String,
    },

    /// Image could not be loaded, decoded or encoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BarcodeError {
    /// Create an invalid-symbol error with context
    pub fn invalid_symbol(reason: impl Into<String>) -> Self {
        Self::InvalidDecodedSymbol {
            reason: reason.into(),
        }
    }

    /// Create a crop error with context
    pub fn crop(reason: impl Into<String>) -> Self {
        Self::Crop {
            reason: reason.into(),
        }
    }
}
