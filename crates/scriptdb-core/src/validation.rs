use std::path::Path;

use crate::error::{Error, Result};

/// Reject blank (empty or whitespace-only) text arguments.
pub fn require_text(value: &str, label: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{label} must not be blank")));
    }
    Ok(())
}

/// Reject blank directory or file path arguments.
pub fn require_path(path: &Path, label: &str) -> Result<()> {
    require_text(&path.to_string_lossy(), label)
}
