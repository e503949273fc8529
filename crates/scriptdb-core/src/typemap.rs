//! Field-type codes and their portable SQL spelling.
//!
//! Codes follow the numbering used by classic InterBase-style catalogs
//! (`rdb$field_type`); engine adapters translate their own type names into
//! these codes so rendering stays engine-neutral.

pub const SMALLINT: i16 = 7;
pub const INTEGER: i16 = 8;
pub const FLOAT: i16 = 10;
pub const DATE: i16 = 12;
pub const TIME: i16 = 13;
pub const CHAR: i16 = 14;
pub const BIGINT: i16 = 16;
pub const DOUBLE: i16 = 27;
pub const TIMESTAMP: i16 = 35;
pub const VARCHAR: i16 = 37;
pub const BLOB: i16 = 261;

/// Type code plus declared length as read from a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType {
    pub code: i16,
    pub length: i32,
}

impl FieldType {
    pub fn new(code: i16, length: i32) -> Self {
        Self { code, length }
    }

    /// Field type without a meaningful length.
    pub fn fixed(code: i16) -> Self {
        Self { code, length: 0 }
    }

    pub fn sql_type(&self) -> String {
        map_field_type(self.code, self.length)
    }
}

/// Map a type code and declared length to a SQL type name.
///
/// Total: unknown codes map to `BLOB`.
pub fn map_field_type(code: i16, length: i32) -> String {
    match code {
        SMALLINT => "SMALLINT".to_string(),
        INTEGER => "INTEGER".to_string(),
        FLOAT => "FLOAT".to_string(),
        DATE => "DATE".to_string(),
        TIME => "TIME".to_string(),
        CHAR => format!("CHAR({length})"),
        BIGINT => "BIGINT".to_string(),
        DOUBLE => "DOUBLE PRECISION".to_string(),
        TIMESTAMP => "TIMESTAMP".to_string(),
        VARCHAR => format!("VARCHAR({length})"),
        _ => "BLOB".to_string(),
    }
}
