//! Linux-safe filename sanitization.

/// Linux NAME_MAX in bytes.
const NAME_MAX: usize = 255;

fn is_forbidden(c: char) -> bool {
    c == '/' || c == '\\' || c == '\0' || c.is_control() || c.is_whitespace()
}

/// Sanitizes a candidate filename for safe use on Linux.
///
/// Path separators, NUL, control characters and whitespace become `_` (runs
/// collapse to one), leading/trailing dots and underscores are trimmed, and
/// the result is cut to at most 255 bytes on a char boundary.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if is_forbidden(c) || c == '_' {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut end = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}
