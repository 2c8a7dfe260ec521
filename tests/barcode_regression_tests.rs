//! Integration tests for barcode features against a real host image
//!
//! These tests drive the public API end to end: building features from decoder
//! output, measuring them, drawing onto the overlay and cropping. The sample
//! fixture reproduces the geometry of the reference barcode image, whose code
//! reads as a 262 pixel square.

use image::{Rgb, RgbImage};
use scv_barcode::utils::geometry::shoelace_area;
use scv_barcode::{
    AreaPolicy, Barcode, BarcodeError, DecodedSymbol, Feature, LayeredImage, Point, find_barcodes,
};

const RED: Rgb<u8> = Rgb([255, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn sample_symbol() -> DecodedSymbol {
    DecodedSymbol::new(
        [(40, 30), (40, 292), (302, 292), (302, 30)].map(Point::from),
        "4006381333931",
    )
}

fn white_image() -> LayeredImage {
    LayeredImage::new(RgbImage::from_pixel(400, 350, WHITE))
}

#[test]
fn test_sample_barcode_geometry() {
    let image = white_image();
    let code = Barcode::new(&image, sample_symbol()).expect("valid symbol");

    assert_eq!(code.longest_edge_length(), 262.0);
    let area = code
        .quadrilateral_area_with(AreaPolicy::Strict)
        .expect("square has positive area");
    assert!((area - 68644.0).abs() < 1e-6, "area was {}", area);
    assert_eq!(code.centroid(), Point::new(171.0, 161.0));
}

#[test]
fn test_sample_barcode_repr() {
    let image = white_image();
    let code = Barcode::new(&image, sample_symbol()).expect("valid symbol");
    assert_eq!(
        code.text_representation(),
        "scv_barcode::features::barcode::Barcode at (171,161), read data: 4006381333931"
    );
}

#[test]
fn test_draw_goes_to_overlay() {
    let image = white_image();
    let code = Barcode::new(&image, sample_symbol()).expect("valid symbol");

    code.draw(RED, 5);
    assert_eq!(image.layer().len(), 4);
    // Source pixels stay as loaded
    assert_eq!(*image.pixels().get_pixel(40, 100), WHITE);

    let rendered = image.apply_layers();
    for x in 38..=42 {
        assert_eq!(*rendered.get_pixel(x, 100), RED, "stroke column {}", x);
    }
    assert_eq!(*rendered.get_pixel(36, 100), WHITE);
    assert_eq!(*rendered.get_pixel(171, 161), WHITE);
}

#[test]
fn test_negative_width_fills() {
    let image = white_image();
    let code = Barcode::new(&image, sample_symbol()).expect("valid symbol");

    code.draw(RED, -1);
    let rendered = image.apply_layers();
    assert_eq!(*rendered.get_pixel(171, 161), RED);
    assert_eq!(*rendered.get_pixel(350, 320), WHITE);
}

#[test]
fn test_fill_far_outside_image() {
    let image = white_image();
    let symbol = DecodedSymbol::new(
        [(-3e9, -3e9), (-3e9, 3e9), (3e9, 3e9), (3e9, -3e9)].map(Point::from),
        "far",
    );
    let code = Barcode::new(&image, symbol).expect("finite corners");

    code.draw(RED, -1);
    let rendered = image.apply_layers();
    assert_eq!(*rendered.get_pixel(0, 0), RED);
    assert_eq!(*rendered.get_pixel(399, 349), RED);
}

#[test]
fn test_extreme_width_renders() {
    let image = white_image();
    let code = Barcode::new(&image, sample_symbol()).expect("valid symbol");

    code.draw(RED, i32::MIN);
    let rendered = image.apply_layers();
    // Stroke is capped at the canvas diagonal, so each edge band still
    // reaches the far side of the image
    assert_eq!(*rendered.get_pixel(171, 161), RED);
    assert_eq!(*rendered.get_pixel(0, 161), RED);
    assert_eq!(*rendered.get_pixel(399, 161), RED);
    assert_eq!(*rendered.get_pixel(171, 0), RED);
    // Corner outside every edge band
    assert_eq!(*rendered.get_pixel(0, 0), WHITE);
}

#[test]
fn test_crop_to_feature() {
    let mut pixels = RgbImage::from_pixel(400, 350, WHITE);
    pixels.put_pixel(40, 30, Rgb([1, 2, 3]));
    let image = LayeredImage::new(pixels);
    let code = Barcode::new(&image, sample_symbol()).expect("valid symbol");

    let cropped = code.crop().expect("feature lies inside the image");
    assert_eq!((cropped.width(), cropped.height()), (262, 262));
    assert_eq!(*cropped.pixels().get_pixel(0, 0), Rgb([1, 2, 3]));
}

#[test]
fn test_find_barcodes_reduces_long_outlines() {
    let image = LayeredImage::blank(32, 32);
    let decoder = |_: &RgbImage| -> scv_barcode::Result<Vec<DecodedSymbol>> {
        Ok(vec![DecodedSymbol::new(
            [(5, 3), (20, 4), (18, 15), (2, 12), (9, 9), (11, 5)].map(Point::from),
            "code128",
        )])
    };

    let found = find_barcodes(&image, &decoder).expect("decoder output is valid");
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].boundary(),
        &[
            Point::new(2.0, 3.0),
            Point::new(2.0, 15.0),
            Point::new(20.0, 15.0),
            Point::new(20.0, 3.0),
        ]
    );
}

#[test]
fn test_area_agrees_with_shoelace() {
    let image = LayeredImage::blank(512, 512);
    let quads = [
        [(12.0, 10.0), (8.0, 140.0), (150.0, 160.0), (145.0, 4.0)],
        [(100.0, 100.0), (90.0, 300.0), (310.0, 320.0), (280.0, 95.0)],
        [(0.0, 0.0), (3.0, 4.0), (10.0, 4.0), (12.0, 0.0)],
    ];
    for quad in quads {
        let location = quad.map(Point::from);
        let code = Barcode::new(&image, DecodedSymbol::new(location, "q")).expect("valid quad");
        let area = code
            .quadrilateral_area_with(AreaPolicy::Strict)
            .expect("convex quad");
        let expected = shoelace_area(&location);
        assert!(
            (area - expected).abs() < 1e-6 * expected,
            "area {} vs shoelace {}",
            area,
            expected
        );
    }
}

#[test]
fn test_collinear_boundary_has_zero_area() {
    let image = LayeredImage::blank(64, 64);
    let location = [(0, 5), (10, 5), (20, 5), (30, 5)].map(Point::from);
    let code = Barcode::new(&image, DecodedSymbol::new(location, "line")).expect("valid symbol");

    for policy in [AreaPolicy::Strict, AreaPolicy::Clamp] {
        let area = code.quadrilateral_area_with(policy).expect("noise is clamped");
        assert!(area.abs() < 1e-6);
    }
}

#[test]
fn test_short_outline_rejected() {
    let image = LayeredImage::blank(8, 8);
    let symbol = DecodedSymbol::new([(0, 0), (1, 1)].map(Point::from), "x");
    let err = Barcode::new(&image, symbol).unwrap_err();
    assert!(matches!(err, BarcodeError::InvalidDecodedSymbol { .. }));
}
