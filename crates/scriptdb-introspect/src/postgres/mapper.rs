use scriptdb_core::typemap::{
    BIGINT, BLOB, CHAR, DATE, DOUBLE, FLOAT, INTEGER, SMALLINT, TIME, TIMESTAMP, VARCHAR,
};
use scriptdb_core::{ColumnDefinition, DomainDefinition, FieldType, ProcedureStub};

use super::queries::{RawColumn, RawDomain, RawProcedure, RawRelation};

/// Header size Postgres adds to `char`/`varchar` type modifiers.
const VARHDRSZ: i32 = 4;

pub fn is_user_schema(schema: &str) -> bool {
    !schema.starts_with("pg_") && schema != "information_schema"
}

pub fn is_user_domain(raw: &RawDomain) -> bool {
    is_user_schema(&raw.schema)
}

/// Plain and partitioned tables count; views and materialized views do not.
pub fn is_user_table(raw: &RawRelation) -> bool {
    is_user_schema(&raw.schema) && matches!(raw.relkind.as_str(), "r" | "p")
}

pub fn is_user_procedure(raw: &RawProcedure) -> bool {
    is_user_schema(&raw.schema)
}

/// Objects outside `public` keep their schema so replayed scripts resolve.
pub fn qualified_name(schema: &str, name: &str) -> String {
    if schema == "public" {
        name.to_string()
    } else {
        format!("{schema}.{name}")
    }
}

/// Translate a Postgres base type name and modifier into a field type.
pub fn field_type(type_name: &str, type_modifier: i32) -> FieldType {
    match type_name {
        "int2" => FieldType::fixed(SMALLINT),
        "int4" => FieldType::fixed(INTEGER),
        "float4" => FieldType::fixed(FLOAT),
        "date" => FieldType::fixed(DATE),
        "time" => FieldType::fixed(TIME),
        "int8" => FieldType::fixed(BIGINT),
        "float8" => FieldType::fixed(DOUBLE),
        "timestamp" => FieldType::fixed(TIMESTAMP),
        "bpchar" if type_modifier > VARHDRSZ => {
            FieldType::new(CHAR, type_modifier - VARHDRSZ)
        }
        "bpchar" => FieldType::new(CHAR, 1),
        "varchar" if type_modifier > VARHDRSZ => {
            FieldType::new(VARCHAR, type_modifier - VARHDRSZ)
        }
        _ => FieldType::fixed(BLOB),
    }
}

pub fn map_domains(raw: Vec<RawDomain>) -> Vec<DomainDefinition> {
    raw.into_iter()
        .filter(is_user_domain)
        .map(|domain| DomainDefinition {
            sql_type: field_type(&domain.base_type, domain.type_modifier).sql_type(),
            name: qualified_name(&domain.schema, &domain.name),
        })
        .collect()
}

pub fn filter_tables(raw: Vec<RawRelation>) -> Vec<RawRelation> {
    raw.into_iter().filter(is_user_table).collect()
}

pub fn map_columns(raw: Vec<RawColumn>) -> Vec<ColumnDefinition> {
    raw.into_iter()
        .map(|column| ColumnDefinition {
            sql_type: field_type(&column.type_name, column.type_modifier).sql_type(),
            name: column.name,
        })
        .collect()
}

pub fn map_procedures(raw: Vec<RawProcedure>) -> Vec<ProcedureStub> {
    raw.into_iter()
        .filter(is_user_procedure)
        .map(|procedure| ProcedureStub {
            name: qualified_name(&procedure.schema, &procedure.name),
        })
        .collect()
}
