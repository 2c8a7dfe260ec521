//! scv_barcode - barcode features for image-processing hosts
//!
//! Adapts the symbols an external barcode decoder reports (a boundary
//! outline plus the decoded payload) into feature objects bound to the image
//! they were read from. A feature knows its boundary quadrangle and centroid,
//! measures its longest edge and area, and draws itself onto the host
//! image's overlay layer.
//!
//! ```
//! use scv_barcode::{Barcode, DecodedSymbol, LayeredImage, Point};
//!
//! let image = LayeredImage::blank(32, 32);
//! let symbol = DecodedSymbol::new(
//!     [(0, 0), (0, 10), (10, 10), (10, 0)].map(Point::from),
//!     "hello",
//! );
//! let code = Barcode::new(&image, symbol).unwrap();
//! assert_eq!(code.centroid(), Point::new(5.0, 5.0));
//! assert_eq!(code.longest_edge_length(), 10.0);
//! code.draw(image::Rgb([255, 0, 0]), 1);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Environment-driven defaults (area policy, draw style)
pub mod config;
/// Error type and crate `Result` alias
pub mod error;
/// Feature contract, feature sets and the barcode feature
pub mod features;
/// Core data structures (Point, DecodedSymbol)
pub mod models;
/// Decoder seam and the find-barcodes driver
pub mod scanner;
/// Host image capabilities and the layered image implementation
pub mod surface;
/// Image loading and argument parsing helpers
pub mod tools;
/// Utility functions (geometry)
pub mod utils;

pub use config::AreaPolicy;
pub use error::{BarcodeError, Result};
pub use features::{Barcode, Feature, FeatureSet};
pub use models::{DecodedSymbol, Point, PointI};
pub use scanner::{SymbolDecoder, find_barcodes};
pub use surface::{DrawingLayer, DrawingSurface, LayeredImage, LineCommand};
