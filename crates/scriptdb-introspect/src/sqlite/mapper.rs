use scriptdb_core::typemap::{
    BIGINT, BLOB, CHAR, DATE, DOUBLE, FLOAT, INTEGER, SMALLINT, TIME, TIMESTAMP, VARCHAR,
};
use scriptdb_core::{ColumnDefinition, FieldType};

use super::queries::{RawColumn, RawRelation};

/// Internal tables (`sqlite_sequence`, `sqlite_stat1`, ...) and views are
/// not exported.
pub fn is_user_table(raw: &RawRelation) -> bool {
    raw.kind == "table" && !raw.name.starts_with("sqlite_")
}

pub fn filter_tables(raw: Vec<RawRelation>) -> Vec<RawRelation> {
    raw.into_iter().filter(is_user_table).collect()
}

/// Parse a declared column type such as `VARCHAR(10)` into a field type.
pub fn field_type(declared: &str) -> FieldType {
    let upper = declared.trim().to_ascii_uppercase();
    let (base, length) = match upper.split_once('(') {
        Some((base, rest)) => (base, leading_length(rest)),
        None => (upper.as_str(), None),
    };
    let base = base.split_whitespace().collect::<Vec<_>>().join(" ");

    match base.as_str() {
        "SMALLINT" => FieldType::fixed(SMALLINT),
        "INT" | "INTEGER" => FieldType::fixed(INTEGER),
        "FLOAT" | "REAL" => FieldType::fixed(FLOAT),
        "DATE" => FieldType::fixed(DATE),
        "TIME" => FieldType::fixed(TIME),
        "CHAR" | "CHARACTER" => FieldType::new(CHAR, length.unwrap_or(1)),
        "BIGINT" => FieldType::fixed(BIGINT),
        "DOUBLE" | "DOUBLE PRECISION" => FieldType::fixed(DOUBLE),
        "TIMESTAMP" | "DATETIME" => FieldType::fixed(TIMESTAMP),
        "VARCHAR" | "CHARACTER VARYING" | "VARYING CHARACTER" => match length {
            Some(length) => FieldType::new(VARCHAR, length),
            None => FieldType::fixed(BLOB),
        },
        _ => FieldType::fixed(BLOB),
    }
}

fn leading_length(args: &str) -> Option<i32> {
    let first = args.split([',', ')']).next()?;
    first.trim().parse::<i32>().ok().filter(|length| *length > 0)
}

pub fn map_columns(raw: Vec<RawColumn>) -> Vec<ColumnDefinition> {
    raw.into_iter()
        .map(|column| ColumnDefinition {
            sql_type: field_type(&column.declared_type).sql_type(),
            name: column.name,
        })
        .collect()
}
