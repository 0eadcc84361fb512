use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;
use crate::error::AppError;

pub const BUNDLE_NAME: &str = "resultados.zip";

/// Packs the generated workbooks into one zip archive.
pub fn zip_reports(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>, AppError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (file_name, bytes) in files {
        zip.start_file(file_name.as_str(), SimpleFileOptions::default())
            .map_err(bundle_error)?;
        zip.write_all(bytes).map_err(bundle_error)?;
    }

    let cursor = zip.finish().map_err(bundle_error)?;
    Ok(cursor.into_inner())
}

fn bundle_error(e: impl std::fmt::Display) -> AppError {
    AppError::WriteFailed { file: BUNDLE_NAME.to_string(), message: e.to_string() }
}

/// Writes `bytes` to `dir/file_name` through a temporary file in the same
/// directory, so the target either holds the whole workbook or is untouched.
pub fn write_atomic(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
    let target = dir.join(file_name);
    let write_failed = |e: std::io::Error| AppError::WriteFailed {
        file: target.display().to_string(),
        message: e.to_string(),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(bytes).map_err(write_failed)?;
    tmp.as_file().sync_all().map_err(write_failed)?;
    tmp.persist(&target).map_err(|e| write_failed(e.error))?;

    tracing::info!("Saved {}", target.display());
    Ok(target)
}
