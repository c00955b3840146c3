//! Ordered concatenation of segment files into the final file.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::DownloadError;

use super::temp_path;

const BUF_SIZE: usize = 256 * 1024;

/// Appends every file of `part_paths` (already in segment-id order) into
/// `final_path` and returns the number of bytes written.
///
/// Writes into `<final>.part`, fsyncs, then renames onto `final_path`; on
/// error the temp file is removed and `final_path` is left untouched. Once the
/// rename succeeded the segment files are deleted; deletion failures are only
/// logged.
pub fn merge_segments(final_path: &Path, part_paths: &[PathBuf]) -> Result<u64, DownloadError> {
    let tmp = temp_path(final_path);
    let written = match concat_into(&tmp, part_paths) {
        Ok(n) => n,
        Err(e) => {
            let _ = std::fs::remove_file(&tmp);
            return Err(e);
        }
    };

    if let Err(e) = std::fs::rename(&tmp, final_path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(DownloadError::merge_io(final_path, e));
    }
    tracing::debug!(
        path = %final_path.display(),
        bytes = written,
        segments = part_paths.len(),
        "merged segment files"
    );

    for path in part_paths {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), "could not remove segment file after merge: {}", e);
        }
    }

    Ok(written)
}

fn concat_into(tmp: &Path, part_paths: &[PathBuf]) -> Result<u64, DownloadError> {
    let out = File::create(tmp).map_err(|e| DownloadError::merge_io(tmp, e))?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, out);
    let mut total = 0u64;

    for path in part_paths {
        let part = File::open(path).map_err(|e| DownloadError::merge_io(path, e))?;
        let mut reader = BufReader::with_capacity(BUF_SIZE, part);
        total += io::copy(&mut reader, &mut writer).map_err(|e| DownloadError::merge_io(path, e))?;
    }

    let out = writer
        .into_inner()
        .map_err(|e| DownloadError::merge_io(tmp, e.into_error()))?;
    out.sync_all().map_err(|e| DownloadError::merge_io(tmp, e))?;
    Ok(total)
}
