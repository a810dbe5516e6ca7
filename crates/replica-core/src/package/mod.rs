//! Archive packaging: `index.html` plus every downloaded asset, zipped.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use url::Url;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::capture::CaptureResult;
use crate::error::PackageError;

/// Archive path of the rewritten page.
pub const INDEX_HTML: &str = "index.html";

/// One (archive path, bytes) pair handed to the zip writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry<'a> {
    pub path: &'a str,
    pub data: &'a [u8],
}

/// `index.html` followed by each asset at its local path.
///
/// When several assets share a path the entry keeps its first position and the
/// last payload, as if the later write overwrote the earlier file.
pub fn archive_entries(capture: &CaptureResult) -> Vec<ArchiveEntry<'_>> {
    let mut entries = vec![ArchiveEntry {
        path: INDEX_HTML,
        data: capture.final_markup.as_bytes(),
    }];
    for asset in &capture.assets {
        let entry = ArchiveEntry {
            path: &asset.local_path,
            data: &asset.payload,
        };
        match entries.iter_mut().find(|e| e.path == entry.path) {
            Some(existing) => {
                tracing::debug!(path = entry.path, "archive path reused, keeping later payload");
                *existing = entry;
            }
            None => entries.push(entry),
        }
    }
    entries
}

/// Zips the capture into an in-memory archive.
pub fn build_archive(capture: &CaptureResult) -> Result<Vec<u8>, PackageError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in archive_entries(capture) {
        zip.start_file(entry.path, options)?;
        zip.write_all(entry.data)?;
    }
    Ok(zip.finish()?.into_inner())
}

/// `<hostname>-replica.zip` for the captured page (`page-replica.zip` without a host).
pub fn archive_file_name(page_url: &Url) -> String {
    let host = page_url.host_str().filter(|h| !h.is_empty()).unwrap_or("page");
    format!("{host}-replica.zip")
}

/// Writes the archive into `dir` under [`archive_file_name`]; returns the path.
pub fn write_archive(capture: &CaptureResult, dir: &Path) -> Result<PathBuf, PackageError> {
    let bytes = build_archive(capture)?;
    let path = dir.join(archive_file_name(&capture.page_url));
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), "archive written");
    Ok(path)
}
