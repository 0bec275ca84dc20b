use crate::error::{PortfolioError, Result};
use csv::StringRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Checks if a path exists
pub fn path_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Rejects a record wider than its header. Shorter records are accepted;
/// their trailing fields read as missing.
pub fn check_record_width(path: &Path, headers: &StringRecord, record: &StringRecord) -> Result<()> {
    if record.len() > headers.len() {
        return Err(PortfolioError::TooManyFields {
            path: path.to_path_buf(),
            line: record.position().map(|p| p.line()).unwrap_or_default(),
            found: record.len(),
            expected: headers.len(),
        });
    }
    Ok(())
}

/// Lists the files in `dir` whose extension matches `extension` (case-insensitive).
///
/// Results are sorted by file name so runs are reproducible across platforms.
/// A missing directory is an error; an existing directory without matches is not.
pub fn list_files_with_extension<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !path_exists(dir) {
        return Err(PortfolioError::MissingFile {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| PortfolioError::io(dir, e))? {
        let entry = entry.map_err(|e| PortfolioError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
