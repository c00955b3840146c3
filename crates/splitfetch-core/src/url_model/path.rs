//! Filename extraction from URL path.

/// Last non-empty path segment of `url`, used as the output filename hint.
///
/// Returns `None` if the URL cannot be parsed, has no path segments (e.g.
/// `mailto:`), or its path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    match segment {
        "." | ".." => None,
        s => Some(s.to_string()),
    }
}
