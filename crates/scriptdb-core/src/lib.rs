//! Core contracts and helpers for scriptdb.
//!
//! This crate defines the catalog entity types, the field-type mapper, the
//! line-oriented script executor, configuration, and the error type shared
//! across the builder, the exporter and the CLI.

pub mod atomic;
pub mod config;
pub mod error;
pub mod redaction;
pub mod script;
pub mod typemap;
pub mod types;
pub mod validation;

pub use atomic::write_text_atomic;
pub use config::{DatabaseConfig, ExportSettings, Settings, load_settings};
pub use error::{Error, Result};
pub use redaction::redact_connection_string;
pub use script::{SplitState, StatementExecutor, StatementSplitter, execute_script, split_statements};
pub use typemap::{FieldType, map_field_type};
pub use types::{ColumnDefinition, DomainDefinition, ProcedureStub, TableDefinition};
pub use validation::{require_path, require_text};
