//! Catalog introspection and schema script export.

pub mod connect;
pub mod export;
pub mod options;
pub mod postgres;
pub mod render;
pub mod source;
pub mod sqlite;

pub use connect::{Engine, open_catalog};
pub use export::{DOMAINS_FILE, ExportReport, PROCEDURES_FILE, TABLES_FILE, export_scripts};
pub use options::ExportOptions;
pub use postgres::PostgresCatalog;
pub use source::CatalogSource;
pub use sqlite::SqliteCatalog;
