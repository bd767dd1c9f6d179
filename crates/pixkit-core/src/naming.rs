//! Download filename derivation.

/// Stem used when the uploaded name has nothing before its first `.`.
const FALLBACK_STEM: &str = "image";

/// Text before the first `.` of `original`.
pub fn file_stem(original: &str) -> &str {
    let stem = original.split('.').next().unwrap_or_default();
    if stem.is_empty() {
        FALLBACK_STEM
    } else {
        stem
    }
}

/// Lowercased text after the last `.`, or `"unknown"` when there is none.
pub fn file_extension(original: &str) -> String {
    match original.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => "unknown".to_string(),
    }
}

/// Name for a tool's output file: `{stem}_{suffix}.{extension}`, or
/// `{stem}.{extension}` when `suffix` is empty.
pub fn output_name(original: &str, suffix: &str, extension: &str) -> String {
    let stem = file_stem(original);
    if suffix.is_empty() {
        format!("{stem}.{extension}")
    } else {
        format!("{stem}_{suffix}.{extension}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_name_with_suffix() {
        assert_eq!(output_name("photo.jpg", "cropped", "png"), "photo_cropped.png");
        assert_eq!(
            output_name("holiday.PNG", "compressed", "webp"),
            "holiday_compressed.webp"
        );
    }

    #[test]
    fn test_stem_stops_at_first_dot() {
        assert_eq!(output_name("my.photo.jpeg", "resized", "png"), "my_resized.png");
    }

    #[test]
    fn test_empty_suffix() {
        assert_eq!(output_name("scan.bmp", "", "gif"), "scan.gif");
    }

    #[test]
    fn test_missing_stem_falls_back() {
        assert_eq!(output_name(".hidden", "cropped", "png"), "image_cropped.png");
        assert_eq!(output_name("", "", "png"), "image.png");
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("photo.JPG"), "jpg");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("README"), "unknown");
        assert_eq!(file_extension("trailing."), "unknown");
    }
}
