use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, SqliteConnection};

use scriptdb_core::{DomainDefinition, Error, ProcedureStub, Result, TableDefinition};

use crate::source::CatalogSource;

mod mapper;
mod queries;

/// Catalog reader for SQLite database files.
///
/// SQLite has neither domains nor stored procedures, so those exports are
/// always empty.
pub struct SqliteCatalog {
    conn: SqliteConnection,
}

impl SqliteCatalog {
    pub fn new(conn: SqliteConnection) -> Self {
        Self { conn }
    }

    /// Open an existing database read-only from a `sqlite:` URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let conn = SqliteConnectOptions::from_str(url)
            .map_err(|err| Error::Db(err.to_string()))?
            .read_only(true)
            .connect()
            .await
            .map_err(|err| Error::Db(err.to_string()))?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl CatalogSource for SqliteCatalog {
    fn engine(&self) -> &'static str {
        "sqlite"
    }

    async fn domains(&mut self) -> Result<Vec<DomainDefinition>> {
        Ok(Vec::new())
    }

    async fn tables(&mut self) -> Result<Vec<TableDefinition>> {
        let relations = mapper::filter_tables(queries::list_relations(&mut self.conn).await?);

        let mut tables = Vec::with_capacity(relations.len());
        for relation in relations {
            let raw_columns = queries::list_columns(&mut self.conn, &relation.name).await?;
            tables.push(TableDefinition {
                name: relation.name,
                columns: mapper::map_columns(raw_columns),
            });
        }

        Ok(tables)
    }

    async fn procedures(&mut self) -> Result<Vec<ProcedureStub>> {
        Ok(Vec::new())
    }
}
