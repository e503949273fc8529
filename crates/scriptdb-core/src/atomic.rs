use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Replace `path` with `content` via a sibling temp file and a rename, so
/// readers never observe a half-written script.
pub fn write_text_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
        }
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)
        .map_err(|err| Error::io(&tmp_path, err))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|err| Error::io(&tmp_path, err))?;
    drop(file);

    std::fs::rename(&tmp_path, path).map_err(|err| Error::io(path, err))
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::InvalidInput(format!("invalid output path {}", path.display())))?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scriptdb_atomic_{label}_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn creates_parent_and_overwrites() {
        let dir = temp_dir("overwrite");
        let path = dir.join("01_domains.sql");

        write_text_atomic(&path, "-- first\n").expect("first write");
        write_text_atomic(&path, "-- second\n").expect("second write");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "-- second\n");
        assert!(!dir.join("01_domains.sql.tmp").exists());
    }

    #[test]
    fn rejects_path_without_file_name() {
        assert!(write_text_atomic(Path::new("/"), "x").is_err());
    }
}
