use super::Point;

/// One symbol as reported by an external barcode decoder
///
/// `location` traces the symbol outline in image coordinates. Four points are
/// expected in top-left clockwise order; longer outlines (linear symbologies
/// report one point per scan hit) are reduced to their bounding rectangle
/// when a feature is built from the symbol.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedSymbol {
    /// Outline points in image coordinates
    pub location: Vec<Point>,
    /// Decoded payload
    pub data: String,
}

impl DecodedSymbol {
    /// Create a symbol record from an outline and a payload
    pub fn new(location: impl IntoIterator<Item = Point>, data: impl Into<String>) -> Self {
        Self {
            location: location.into_iter().collect(),
            data: data.into(),
        }
    }
}
