//! CLI command implementations

pub mod analyze;
pub mod harmonize;
pub mod templates;

use anyhow::{Context, Result};
use harmony_io::ImageData;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<ImageData> {
    harmony_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path, honoring JPEG quality
pub fn save_image(path: &Path, image: &ImageData, quality: u8) -> Result<()> {
    let result = match harmony_io::Format::from_extension(path) {
        harmony_io::Format::Jpeg => {
            let options = harmony_io::jpeg::JpegWriterOptions { quality };
            harmony_io::jpeg::JpegWriter::with_options(options).write(path, image)
        }
        _ => harmony_io::write(path, image),
    };
    result.with_context(|| format!("Failed to save: {}", path.display()))
}

/// Escapes a string for JSON output.
pub fn json_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Formats a list of numbers as `[a, b]`.
pub fn list<T: std::fmt::Display>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_escape() {
        assert_eq!(json_escape(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(json_escape("x\ny"), "x\\ny");
        assert_eq!(json_escape("\u{1}"), "\\u0001");
    }

    #[test]
    fn test_list() {
        assert_eq!(list(&[57u16, 13]), "[57, 13]");
        assert_eq!(list::<u8>(&[]), "[]");
    }
}
