//! Helpers shared by the command-line tool and integration tests

use std::path::Path;

use image::Rgb;

use crate::error::{BarcodeError, Result};
use crate::features::Barcode;
use crate::models::{DecodedSymbol, Point};
use crate::surface::LayeredImage;

/// Load an image file as a drawable host image.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<LayeredImage> {
    LayeredImage::open(path)
}

/// Parse `"x,y;x,y;..."` into points. Whitespace around numbers is ignored.
pub fn parse_points(input: &str) -> Result<Vec<Point>> {
    input
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| -> Result<Point> {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| BarcodeError::invalid_symbol(format!("point '{pair}' is not x,y")))?;
            let x = parse_coord(x, pair)?;
            let y = parse_coord(y, pair)?;
            Ok(Point::new(x, y))
        })
        .collect()
}

fn parse_coord(value: &str, pair: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| BarcodeError::invalid_symbol(format!("non-numeric coordinate in '{pair}'")))
}

/// Parse `"r,g,b"` into a color triplet.
pub fn parse_color(input: &str) -> Result<Rgb<u8>> {
    let invalid = || BarcodeError::InvalidColor {
        input: input.to_string(),
    };
    let channels: Vec<u8> = input
        .split(',')
        .map(|c| c.trim().parse::<u8>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| invalid())?;
    let rgb: [u8; 3] = channels.try_into().map_err(|_| invalid())?;
    Ok(Rgb(rgb))
}

/// Geometry report for hand-labeled corner points
///
/// The feature sits on an empty 0x0 surface: inspection never draws, so the
/// size of the coordinates costs nothing.
pub fn inspect(location: Vec<Point>, data: impl Into<String>) -> Result<String> {
    let surface = LayeredImage::blank(0, 0);
    let code = Barcode::new(&surface, DecodedSymbol::new(location, data))?;

    let mut report = format!("{code}\n");
    for (i, p) in code.boundary().iter().enumerate() {
        report.push_str(&format!("  corner {}: ({:.2}, {:.2})\n", i, p.x, p.y));
    }
    let c = code.centroid();
    report.push_str(&format!("Centroid: ({:.2}, {:.2})\n", c.x, c.y));
    report.push_str(&format!("Edges: {:?}\n", code.edge_lengths()));
    report.push_str(&format!("Diagonals: {:?}\n", code.diagonal_lengths()));
    report.push_str(&format!("Longest edge: {:.3}\n", code.longest_edge_length()));
    report.push_str(&format!("Area: {:.3}\n", code.quadrilateral_area()?));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        let pts = parse_points("0,0; 0, 10 ;10,10;10,0;").unwrap();
        assert_eq!(
            pts,
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 10.0),
                Point::new(10.0, 10.0),
                Point::new(10.0, 0.0),
            ]
        );
        assert!(parse_points("1,2;3").is_err());
        assert!(parse_points("a,2").is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("255, 0,12").unwrap(), Rgb([255, 0, 12]));
        assert!(matches!(parse_color("1,2"), Err(BarcodeError::InvalidColor { .. })));
        assert!(parse_color("256,0,0").is_err());
    }

    #[test]
    fn test_inspect_report() {
        let report = inspect(parse_points("0,0;0,10;10,10;10,0").unwrap(), "hello").unwrap();
        assert!(report.starts_with("scv_barcode::features::barcode::Barcode at (5,5), read data: hello\n"));
        assert!(report.contains("Centroid: (5.00, 5.00)"));
        assert!(report.contains("Longest edge: 10.000"));
        assert!(report.contains("Area: 100.000"));
    }

    #[test]
    fn test_inspect_huge_coordinates() {
        // Corners past u32::MAX must not size a canvas
        let far = inspect(
            parse_points("0,0;0,4294967295;4294967295,4294967295;4294967295,0").unwrap(),
            "far",
        )
        .unwrap();
        assert!(far.contains("Longest edge: 4294967295.000"));

        let wide = inspect(
            parse_points("0,0;0,100000;100000,100000;100000,0").unwrap(),
            "wide",
        )
        .unwrap();
        assert!(wide.contains("Centroid: (50000.00, 50000.00)"));
    }
}
