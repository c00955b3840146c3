//! Segment files and final-file assembly.
//!
//! Each segment is downloaded into its own `<final>.part<id>` file. After all
//! workers are joined the merger appends them in id order into `<final>.part`
//! and renames that onto the final path. A `PartFileGuard` removes leftovers
//! on every path that does not end in a successful merge.

mod guard;
mod merge;

pub use guard::PartFileGuard;
pub use merge::merge_segments;

use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for a segment file: `file.iso` + id 2 → `file.iso.part2`.
pub fn segment_path(final_path: &Path, segment_id: usize) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(format!("{}{}", TEMP_SUFFIX, segment_id));
    PathBuf::from(o)
}

/// Path the merger writes into before renaming: `file.iso` → `file.iso.part`.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_path_appends_part_and_id() {
        let p = segment_path(Path::new("downloads/file.iso"), 0);
        assert_eq!(p.to_string_lossy(), "downloads/file.iso.part0");
        let p = segment_path(Path::new("/tmp/archive.zip"), 11);
        assert_eq!(p.to_string_lossy(), "/tmp/archive.zip.part11");
    }

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("file.iso"));
        assert_eq!(p.to_string_lossy(), "file.iso.part");
        assert_ne!(p, segment_path(Path::new("file.iso"), 0));
    }
}
