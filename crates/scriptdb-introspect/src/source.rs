use async_trait::async_trait;

use scriptdb_core::{DomainDefinition, ProcedureStub, Result, TableDefinition};

/// Trait implemented by catalog readers for a specific engine.
///
/// Each method runs its own queries and returns user-defined objects only;
/// engine-specific system filters live inside the implementation.
#[async_trait]
pub trait CatalogSource: Send {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// User-defined domains in catalog order.
    async fn domains(&mut self) -> Result<Vec<DomainDefinition>>;

    /// User tables (views excluded), each with columns in ordinal order.
    async fn tables(&mut self) -> Result<Vec<TableDefinition>>;

    /// User-defined stored procedures, names only.
    async fn procedures(&mut self) -> Result<Vec<ProcedureStub>>;
}
