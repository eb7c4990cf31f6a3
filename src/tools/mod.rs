use crate::error::Result;
use crate::models::{DecodedResult, Symbology};
use crate::reader::is_gs1;
use std::fs;
use std::path::Path;

/// Guess a content type from a file extension.
///
/// Returns `None` for unknown extensions; the decoder then sniffs the bytes.
pub fn content_type_for_path<P: AsRef<Path>>(path: P) -> Option<&'static str> {
    let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "svg" | "svgz" => Some("image/svg+xml"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Read an image file along with its guessed content type.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, Option<&'static str>)> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    Ok((bytes, content_type_for_path(path)))
}

/// One-line summary of a decoded result.
pub fn describe_result(index: usize, result: &DecodedResult) -> String {
    let mut line = format!("[{index}] {}: {}", result.symbology, result.text);
    if is_gs1(result) {
        line.push_str(" (GS1)");
    }
    if let Some((min, max)) = crate::models::point::bounds(&result.points) {
        line.push_str(&format!(
            " at ({:.0}, {:.0})-({:.0}, {:.0})",
            min.x, min.y, max.x, max.y
        ));
    }
    line
}

/// Row of the format listing: id, name, dimension, GS1 support.
pub fn format_row(symbology: Symbology) -> String {
    let info = symbology.info();
    format!(
        "{:<18} {:<20} {}  {}",
        info.id,
        info.name,
        info.dimension,
        if info.supports_gs1 { "GS1" } else { "-" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_for_path("a/b/code.SVG"), Some("image/svg+xml"));
        assert_eq!(content_type_for_path("shot.jpeg"), Some("image/jpeg"));
        assert_eq!(content_type_for_path("upload"), None);
        assert_eq!(content_type_for_path("notes.txt"), None);
    }

    #[test]
    fn test_describe_includes_gs1_and_bounds() {
        let result = DecodedResult::new("0112345678901234", Symbology::Code128).with_points(vec![
            Point::new(10.0, 40.0),
            Point::new(210.0, 40.0),
        ]);
        assert_eq!(
            describe_result(0, &result),
            "[0] Code 128: 0112345678901234 (GS1) at (10, 40)-(210, 40)"
        );
    }

    #[test]
    fn test_describe_plain_result() {
        let result = DecodedResult::new("hello", Symbology::QrCode);
        assert_eq!(describe_result(2, &result), "[2] QR Code: hello");
    }

    #[test]
    fn test_format_row_lists_attributes() {
        let row = format_row(Symbology::DataMatrix);
        assert!(row.starts_with("DATA_MATRIX"));
        assert!(row.contains("2D"));
        assert!(row.ends_with("GS1"));
    }

    #[test]
    fn test_load_image_reads_bytes() {
        let path = std::env::temp_dir().join(format!("barcode_studio_tools_{}.svg", std::process::id()));
        fs::write(&path, "<svg/>").unwrap();
        let (bytes, content_type) = load_image(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(bytes, b"<svg/>");
        assert_eq!(content_type, Some("image/svg+xml"));
    }
}
