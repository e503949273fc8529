//! Rendering of catalog entities into replayable SQL script text.

use std::fmt::Write as _;

use scriptdb_core::{DomainDefinition, ProcedureStub, TableDefinition};

const COLUMN_INDENT: &str = "    ";

pub fn render_domains(domains: &[DomainDefinition]) -> String {
    let mut out = String::from("-- DOMAINS\n");
    for domain in domains {
        let _ = writeln!(out, "CREATE DOMAIN {} AS {};", domain.name, domain.sql_type);
    }
    out
}

pub fn render_tables(tables: &[TableDefinition]) -> String {
    let mut out = String::from("-- TABLES\n");
    for table in tables {
        let _ = writeln!(out, "CREATE TABLE {} (", table.name);
        let columns: Vec<String> = table
            .columns
            .iter()
            .map(|column| format!("{COLUMN_INDENT}{} {}", column.name, column.sql_type))
            .collect();
        out.push_str(&columns.join(",\n"));
        out.push_str("\n);\n\n");
    }
    out
}

/// Procedure bodies are not exported; each procedure becomes an empty
/// skeleton so the replayed script reserves the name.
pub fn render_procedures(procedures: &[ProcedureStub]) -> String {
    let mut out = String::from("-- PROCEDURES\n");
    for procedure in procedures {
        let _ = writeln!(out, "CREATE OR ALTER PROCEDURE {}", procedure.name);
        out.push_str("AS\n");
        out.push_str("BEGIN\n");
        let _ = writeln!(out, "{COLUMN_INDENT}/* body not exported */");
        out.push_str("END;\n\n");
    }
    out
}
