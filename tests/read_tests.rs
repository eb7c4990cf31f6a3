//! Decoding through `BarcodeStudio` with a stub codec

mod common;

use barcode_studio::reader::highlight::HIGHLIGHT_COLOR;
use barcode_studio::{BarcodeStudio, Point, highlight, is_gs1};
use common::{StubCodec, png_with_block};
use std::sync::atomic::AtomicBool;

const SQUARE_SVG: &str = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" width="40" height="30"><rect x="10" y="10" width="10" height="10" fill="black"/></svg>"#;

fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

#[test]
fn test_points_are_in_original_coordinates() {
    let studio = BarcodeStudio::with_codec(StubCodec::reading("found"));
    let png = png_with_block(100, 80, 30, 20, 20, 20);

    let results = studio.read_barcodes(&png, Some("image/png"));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "found");
    // padding of 20 subtracted exactly once
    assert_eq!(results[0].points, square(30.0, 20.0, 50.0, 40.0));
}

#[test]
fn test_large_image_uses_proportional_padding() {
    let studio = BarcodeStudio::with_codec(StubCodec::reading("found"));
    let png = png_with_block(400, 300, 100, 50, 10, 10);

    let results = studio.read_barcodes(&png, None);
    assert_eq!(results[0].points, square(100.0, 50.0, 110.0, 60.0));
}

#[test]
fn test_svg_input_is_rasterized() {
    let studio = BarcodeStudio::with_codec(StubCodec::reading("vector"));
    let results = studio.read_barcodes(SQUARE_SVG.as_bytes(), None);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].points, square(10.0, 10.0, 20.0, 20.0));
}

#[test]
fn test_blank_image_reads_nothing() {
    let studio = BarcodeStudio::with_codec(StubCodec::reading("x"));
    let png = png_with_block(50, 50, 0, 0, 0, 0);
    assert!(studio.read_barcodes(&png, None).is_empty());
}

#[test]
fn test_garbage_input_reads_nothing() {
    let studio = BarcodeStudio::with_codec(StubCodec::reading("x"));
    assert!(studio.read_barcodes(b"not an image at all", None).is_empty());
    assert!(studio.read_barcodes(b"<svg", Some("image/svg+xml")).is_empty());
    assert!(studio.read_barcodes(&[], None).is_empty());
}

#[test]
fn test_codec_failure_reads_nothing() {
    let studio = BarcodeStudio::with_codec(StubCodec {
        fail_decode: true,
        ..StubCodec::reading("x")
    });
    let png = png_with_block(60, 60, 10, 10, 20, 20);
    assert!(studio.read_barcodes(&png, None).is_empty());
}

#[test]
fn test_gs1_classification() {
    let png = png_with_block(60, 60, 10, 10, 20, 20);

    let by_prefix = BarcodeStudio::with_codec(StubCodec::reading("0112345678901234"));
    assert!(is_gs1(&by_prefix.read_barcodes(&png, None)[0]));

    let plain = BarcodeStudio::with_codec(StubCodec::reading("99XYZ"));
    assert!(!is_gs1(&plain.read_barcodes(&png, None)[0]));

    let by_identifier = BarcodeStudio::with_codec(StubCodec {
        symbology_identifier: Some("]Q3".to_string()),
        ..StubCodec::reading("hello")
    });
    assert!(is_gs1(&by_identifier.read_barcodes(&png, None)[0]));
}

#[test]
fn test_batch_reads_every_item() {
    let studio = BarcodeStudio::with_codec(StubCodec::reading("x"));
    let a = png_with_block(60, 60, 10, 10, 20, 20);
    let b = b"garbage".to_vec();
    let items = [(a.as_slice(), None), (b.as_slice(), None), (SQUARE_SVG.as_bytes(), None)];

    let results = studio.read_batch(&items, &AtomicBool::new(false));
    let counts: Vec<Option<usize>> = results.iter().map(|r| r.as_ref().map(Vec::len)).collect();
    assert_eq!(counts, vec![Some(1), Some(0), Some(1)]);
}

#[test]
fn test_highlight_marks_the_decoded_symbol() {
    let studio = BarcodeStudio::with_codec(StubCodec::reading("x"));
    let png = png_with_block(200, 200, 50, 50, 100, 100);
    let results = studio.read_barcodes(&png, None);

    let marked = image::load_from_memory(&highlight(&png, &results[0].points))
        .unwrap()
        .to_rgba8();
    assert_eq!(marked.dimensions(), (200, 200));
    // box padding is 4 around (50,50)-(150,150)
    assert_eq!(*marked.get_pixel(46, 100), HIGHLIGHT_COLOR);
    assert_eq!(marked.get_pixel(100, 100)[0], 0);
    assert_eq!(marked.get_pixel(10, 10)[1], 255);
}

#[test]
fn test_highlight_needs_two_points() {
    let png = png_with_block(40, 40, 5, 5, 10, 10);
    assert_eq!(highlight(&png, &[Point::new(5.0, 5.0)]), png);
    assert_eq!(highlight(&png, &[]), png);
}
