//! URL modeling and output filename derivation.
//!
//! The output file is named after the last path segment of the URL,
//! sanitized for Linux filesystems.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename_for_linux;

/// Default filename when the URL path yields nothing usable.
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Derives a safe filename for saving a download.
///
/// - `derive_filename("https://example.com/archive.zip")` → `"archive.zip"`
/// - `derive_filename("https://example.com/")` → `"download.bin"`
pub fn derive_filename(url: &str) -> String {
    let Some(raw) = filename_from_url_path(url) else {
        return DEFAULT_FILENAME.to_string();
    };

    let sanitized = sanitize_filename_for_linux(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}
