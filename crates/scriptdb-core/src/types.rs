//! Catalog entities rebuilt from the live database on every run.

/// A named, reusable column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainDefinition {
    pub name: String,
    pub sql_type: String,
}

/// A user table with its columns in declared ordinal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub sql_type: String,
}

/// A stored procedure exported as a named skeleton only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureStub {
    pub name: String,
}
