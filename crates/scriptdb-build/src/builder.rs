use std::path::{Path, PathBuf};

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};

use scriptdb_core::{
    DatabaseConfig, Error, Result, StatementExecutor, execute_script, require_path,
};

use crate::executor::ConnectionExecutor;

/// Outcome of a build run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub database_path: PathBuf,
    /// True when this run created the database file.
    pub created: bool,
    /// Applied scripts, in execution order.
    pub scripts: Vec<PathBuf>,
    pub statements: usize,
}

/// Builds a database file from a directory of `.sql` scripts.
#[derive(Debug, Clone, Default)]
pub struct DatabaseBuilder {
    config: DatabaseConfig,
}

fn db_error(err: sqlx::Error) -> Error {
    Error::Db(err.to_string())
}

impl DatabaseBuilder {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    pub fn database_path(&self, db_dir: &Path) -> PathBuf {
        db_dir.join(&self.config.file_name)
    }

    fn connect_options(&self, path: &Path) -> SqliteConnectOptions {
        // page_size and encoding only take effect on an empty database.
        SqliteConnectOptions::new()
            .filename(path)
            .page_size(self.config.page_size)
            .pragma("encoding", format!("'{}'", self.config.encoding))
    }

    /// Create (when absent) the database under `db_dir` and apply every
    /// script of `scripts_dir` in one transaction.
    ///
    /// Scripts run in lexicographic path order. Any failure rolls the whole
    /// batch back, so no statement of the run is retained.
    pub async fn build(&self, db_dir: &Path, scripts_dir: &Path) -> Result<BuildReport> {
        require_path(db_dir, "--db-dir")?;
        require_path(scripts_dir, "--scripts-dir")?;
        if !scripts_dir.is_dir() {
            return Err(Error::DirectoryNotFound(scripts_dir.to_path_buf()));
        }
        self.config.validate()?;

        std::fs::create_dir_all(db_dir).map_err(|err| Error::io(db_dir, err))?;
        let database_path = self.database_path(db_dir);

        tracing::info!(
            event = "build_started",
            database = %database_path.display(),
            scripts_dir = %scripts_dir.display()
        );

        let created = if database_path.exists() {
            false
        } else {
            self.create_database(&database_path).await?;
            true
        };

        let scripts = discover_scripts(scripts_dir)?;
        if scripts.is_empty() {
            tracing::info!(event = "no_scripts", scripts_dir = %scripts_dir.display());
            return Ok(BuildReport {
                database_path,
                created,
                scripts,
                statements: 0,
            });
        }

        let mut conn = self
            .connect_options(&database_path)
            .connect()
            .await
            .map_err(db_error)?;

        let mut tx = conn.begin().await.map_err(db_error)?;
        let outcome = {
            let mut executor = ConnectionExecutor::new(&mut *tx);
            apply_scripts(&mut executor, &scripts).await
        };

        let statements = match outcome {
            Ok(statements) => {
                tx.commit().await.map_err(db_error)?;
                statements
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(event = "rollback_failed", error = %rollback_err);
                }
                tracing::warn!(event = "build_rolled_back", error = %err);
                return Err(err);
            }
        };

        conn.close().await.map_err(db_error)?;

        tracing::info!(
            event = "build_committed",
            scripts = scripts.len(),
            statements
        );

        Ok(BuildReport {
            database_path,
            created,
            scripts,
            statements,
        })
    }

    async fn create_database(&self, path: &Path) -> Result<()> {
        let conn = self
            .connect_options(path)
            .create_if_missing(true)
            .connect()
            .await
            .map_err(db_error)?;
        conn.close().await.map_err(db_error)?;

        tracing::info!(
            event = "database_created",
            path = %path.display(),
            page_size = self.config.page_size,
            encoding = %self.config.encoding
        );
        Ok(())
    }
}

/// List `.sql` files directly inside `dir`, sorted by path.
pub fn discover_scripts(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|err| Error::io(dir, err))?;

    let mut scripts = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| Error::io(dir, err))?.path();
        if path.is_file() && has_sql_extension(&path) {
            scripts.push(path);
        }
    }

    scripts.sort();
    Ok(scripts)
}

fn has_sql_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"))
}

/// Run each script through `executor` in the given order and return the
/// total number of statements executed.
pub async fn apply_scripts<E>(executor: &mut E, scripts: &[PathBuf]) -> Result<usize>
where
    E: StatementExecutor + ?Sized,
{
    let mut total = 0;

    for path in scripts {
        tracing::info!(event = "script_started", path = %path.display());
        let script = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;

        let statements =
            execute_script(executor, &script)
                .await
                .map_err(|err| Error::Script {
                    path: path.clone(),
                    source: Box::new(err),
                })?;

        tracing::info!(event = "script_applied", path = %path.display(), statements);
        total += statements;
    }

    Ok(total)
}
