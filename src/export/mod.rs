//! Report serialization: computed report lines written as plain JSON or
//! CSV data files. No styling, no documents; vouchers go through the
//! voucher seam instead.

use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Refuse relative paths and silent overwrites.
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.is_absolute() {
        return Err(AppError::Export(format!(
            "output file path must be absolute: {}",
            path.display()
        )));
    }
    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "output file already exists (pass force to overwrite): {}",
            path.display()
        )));
    }
    Ok(())
}

/// Write report lines as pretty-printed JSON.
pub fn write_json<T: Serialize>(lines: &[T], path: &Path, force: bool) -> AppResult<()> {
    ensure_writable(path, force)?;
    let json = serde_json::to_string_pretty(lines)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Write report lines as CSV, header row included.
pub fn write_csv<T: Serialize>(lines: &[T], path: &Path, force: bool) -> AppResult<()> {
    ensure_writable(path, force)?;
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;
    for line in lines {
        wtr.serialize(line)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }
    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    Ok(())
}
