/// Point types
pub mod point;
/// Decoder symbol records
pub mod symbol;

pub use point::{Point, PointI};
pub use symbol::DecodedSymbol;
