use std::path::Path;

use scriptdb_core::{Error, Result, require_path, require_text};

/// Incremental updates are not supported yet.
///
/// Arguments are still validated so a blank flag reports as bad input, but
/// nothing is connected to or read: the call always ends in
/// [`Error::Unsupported`].
pub fn update_database(connection_string: &str, scripts_dir: &Path) -> Result<()> {
    require_text(connection_string, "--connection-string")?;
    require_path(scripts_dir, "--scripts-dir")?;

    tracing::warn!(event = "update_rejected", scripts_dir = %scripts_dir.display());
    Err(Error::Unsupported(
        "update-db is not implemented; rebuild with build-db instead".to_string(),
    ))
}
