use async_trait::async_trait;
use sqlx::{Connection, PgConnection};

use scriptdb_core::{DomainDefinition, Error, ProcedureStub, Result, TableDefinition};

use crate::source::CatalogSource;

mod mapper;
mod queries;

/// Catalog reader for PostgreSQL databases.
pub struct PostgresCatalog {
    conn: PgConnection,
}

impl PostgresCatalog {
    /// Create a reader over an already open connection.
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }

    /// Open a single connection from a `postgres://` URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let conn = PgConnection::connect(url)
            .await
            .map_err(|err| Error::Db(err.to_string()))?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl CatalogSource for PostgresCatalog {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn domains(&mut self) -> Result<Vec<DomainDefinition>> {
        let raw = queries::list_domains(&mut self.conn).await?;
        Ok(mapper::map_domains(raw))
    }

    async fn tables(&mut self) -> Result<Vec<TableDefinition>> {
        let relations = mapper::filter_tables(queries::list_relations(&mut self.conn).await?);

        let mut tables = Vec::with_capacity(relations.len());
        for relation in relations {
            let raw_columns =
                queries::list_columns(&mut self.conn, &relation.schema, &relation.name).await?;
            tables.push(TableDefinition {
                name: mapper::qualified_name(&relation.schema, &relation.name),
                columns: mapper::map_columns(raw_columns),
            });
        }

        Ok(tables)
    }

    async fn procedures(&mut self) -> Result<Vec<ProcedureStub>> {
        let raw = queries::list_procedures(&mut self.conn).await?;
        Ok(mapper::map_procedures(raw))
    }
}
