use scriptdb_core::{Error, Result, require_text};

use crate::postgres::PostgresCatalog;
use crate::source::CatalogSource;
use crate::sqlite::SqliteCatalog;

/// Engines the exporter can read a catalog from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Postgres,
    Sqlite,
}

impl Engine {
    /// Detect the engine from the connection string scheme.
    pub fn detect(conn: &str) -> Result<Self> {
        let conn = conn.trim_start();
        if conn.starts_with("postgres://") || conn.starts_with("postgresql://") {
            Ok(Engine::Postgres)
        } else if conn.starts_with("sqlite:") {
            Ok(Engine::Sqlite)
        } else {
            let scheme = conn.split(':').next().unwrap_or_default();
            Err(Error::Unsupported(format!(
                "no catalog reader for connection scheme `{scheme}`"
            )))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Postgres => "postgres",
            Engine::Sqlite => "sqlite",
        }
    }
}

/// Open a catalog reader for `conn` on a single dedicated connection.
pub async fn open_catalog(conn: &str) -> Result<Box<dyn CatalogSource>> {
    require_text(conn, "--connection-string")?;

    let engine = Engine::detect(conn)?;
    tracing::debug!(event = "engine_detected", engine = engine.as_str());

    let source: Box<dyn CatalogSource> = match engine {
        Engine::Postgres => Box::new(PostgresCatalog::connect(conn.trim()).await?),
        Engine::Sqlite => Box::new(SqliteCatalog::connect(conn.trim()).await?),
    };
    Ok(source)
}
