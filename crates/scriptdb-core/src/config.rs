use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_DATABASE_FILE: &str = "database.fdb";
pub const DEFAULT_PAGE_SIZE: u32 = 4096;
pub const DEFAULT_ENCODING: &str = "UTF-8";

const ENCODINGS: &[&str] = &["UTF-8", "UTF-16", "UTF-16le", "UTF-16be"];

/// Settings loaded from the optional `--config` TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub export: ExportSettings,
}

/// Parameters used when the builder creates a new database file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub file_name: String,
    pub page_size: u32,
    pub encoding: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_DATABASE_FILE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        let name = self.file_name.trim();
        if name.is_empty() {
            return Err(Error::Config("database.file_name must not be blank".to_string()));
        }
        if name.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "database.file_name must be a bare file name, got `{name}`"
            )));
        }
        if !(512..=65536).contains(&self.page_size) || !self.page_size.is_power_of_two() {
            return Err(Error::Config(format!(
                "database.page_size must be a power of two between 512 and 65536, got {}",
                self.page_size
            )));
        }
        if !ENCODINGS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(&self.encoding))
        {
            return Err(Error::Config(format!(
                "database.encoding must be one of {}, got `{}`",
                ENCODINGS.join(", "),
                self.encoding
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportSettings {
    /// Sort exported objects by name for byte-stable output.
    pub sort_by_name: bool,
}

/// Load settings from `path`, or defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let content = std::fs::read_to_string(path).map_err(|err| {
        Error::Config(format!("cannot read {}: {err}", path.display()))
    })?;
    let settings = parse_settings(&content)
        .map_err(|err| Error::Config(format!("{}: {err}", path.display())))?;
    tracing::debug!(event = "config_loaded", path = %path.display());
    Ok(settings)
}

fn parse_settings(content: &str) -> Result<Settings> {
    let settings: Settings =
        toml::from_str(content).map_err(|err| Error::Config(err.to_string()))?;
    settings.database.validate()?;
    Ok(settings)
}
