//! Write rendered text (results or generated samples) to disk.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;

/// Write `contents` to `path`, replacing any existing file.
pub fn write_text(path: &Path, contents: &str) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create '{}': {e}", path.display())))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| AppError::new(4, format!("Failed to write '{}': {e}", path.display())))?;
    Ok(())
}

/// Read a whole input file.
pub fn read_text(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))
}
