use std::path::{Path, PathBuf};

use scriptdb_core::{Error, Result, require_path, write_text_atomic};

use crate::options::ExportOptions;
use crate::render::{render_domains, render_procedures, render_tables};
use crate::source::CatalogSource;

/// Numeric prefixes encode replay order: domains before the tables that
/// reference them, procedures last.
pub const DOMAINS_FILE: &str = "01_domains.sql";
pub const TABLES_FILE: &str = "02_tables.sql";
pub const PROCEDURES_FILE: &str = "03_procedures.sql";

/// Outcome of a completed export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Written files, in replay order.
    pub files: Vec<PathBuf>,
    pub domains: usize,
    pub tables: usize,
    pub procedures: usize,
}

/// Export the catalog of `source` into three numbered scripts under
/// `output_dir`, creating the directory when missing.
///
/// Each script is written as soon as its query finishes, so a failure in a
/// later step leaves the earlier files on disk.
pub async fn export_scripts(
    source: &mut dyn CatalogSource,
    output_dir: &Path,
    opts: &ExportOptions,
) -> Result<ExportReport> {
    require_path(output_dir, "--output-dir")?;
    std::fs::create_dir_all(output_dir).map_err(|err| Error::io(output_dir, err))?;

    tracing::info!(
        event = "export_started",
        engine = source.engine(),
        output_dir = %output_dir.display()
    );

    let mut domains = source.domains().await?;
    if opts.sort_by_name {
        domains.sort_by(|left, right| left.name.cmp(&right.name));
    }
    let domains_path = write_artifact(output_dir, DOMAINS_FILE, &render_domains(&domains))?;

    let mut tables = source.tables().await?;
    if opts.sort_by_name {
        tables.sort_by(|left, right| left.name.cmp(&right.name));
    }
    let tables_path = write_artifact(output_dir, TABLES_FILE, &render_tables(&tables))?;

    let mut procedures = source.procedures().await?;
    if opts.sort_by_name {
        procedures.sort_by(|left, right| left.name.cmp(&right.name));
    }
    let procedures_path =
        write_artifact(output_dir, PROCEDURES_FILE, &render_procedures(&procedures))?;

    let report = ExportReport {
        files: vec![domains_path, tables_path, procedures_path],
        domains: domains.len(),
        tables: tables.len(),
        procedures: procedures.len(),
    };

    tracing::info!(
        event = "export_finished",
        domains = report.domains,
        tables = report.tables,
        procedures = report.procedures
    );

    Ok(report)
}

fn write_artifact(output_dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let path = output_dir.join(file_name);
    write_text_atomic(&path, content)?;
    tracing::info!(event = "artifact_written", path = %path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use scriptdb_core::{ColumnDefinition, DomainDefinition, ProcedureStub, TableDefinition};

    use super::*;

    struct FakeCatalog {
        domains: Vec<DomainDefinition>,
        tables: Vec<TableDefinition>,
        procedures: Vec<ProcedureStub>,
        fail_tables: bool,
    }

    impl FakeCatalog {
        fn sample() -> Self {
            Self {
                domains: vec![
                    domain("D_NAME", "VARCHAR(40)"),
                    domain("D_AMOUNT", "DOUBLE PRECISION"),
                ],
                tables: vec![
                    TableDefinition {
                        name: "ORDERS".to_string(),
                        columns: vec![ColumnDefinition {
                            name: "TOTAL".to_string(),
                            sql_type: "DOUBLE PRECISION".to_string(),
                        }],
                    },
                    TableDefinition {
                        name: "CUSTOMERS".to_string(),
                        columns: vec![ColumnDefinition {
                            name: "NAME".to_string(),
                            sql_type: "VARCHAR(40)".to_string(),
                        }],
                    },
                ],
                procedures: vec![ProcedureStub {
                    name: "CLOSE_DAY".to_string(),
                }],
                fail_tables: false,
            }
        }
    }

    fn domain(name: &str, sql_type: &str) -> DomainDefinition {
        DomainDefinition {
            name: name.to_string(),
            sql_type: sql_type.to_string(),
        }
    }

    #[async_trait]
    impl CatalogSource for FakeCatalog {
        fn engine(&self) -> &'static str {
            "fake"
        }

        async fn domains(&mut self) -> Result<Vec<DomainDefinition>> {
            Ok(self.domains.clone())
        }

        async fn tables(&mut self) -> Result<Vec<TableDefinition>> {
            if self.fail_tables {
                return Err(Error::Db("relation query failed".to_string()));
            }
            Ok(self.tables.clone())
        }

        async fn procedures(&mut self) -> Result<Vec<ProcedureStub>> {
            Ok(self.procedures.clone())
        }
    }

    fn temp_out_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scriptdb_export_{label}_{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn writes_numbered_scripts_in_catalog_order() {
        let out_dir = temp_out_dir("order");
        let mut catalog = FakeCatalog::sample();

        let report = export_scripts(&mut catalog, &out_dir, &ExportOptions::default())
            .await
            .expect("export");

        assert_eq!(
            report.files,
            vec![
                out_dir.join("01_domains.sql"),
                out_dir.join("02_tables.sql"),
                out_dir.join("03_procedures.sql"),
            ]
        );
        assert_eq!((report.domains, report.tables, report.procedures), (2, 2, 1));

        let domains = std::fs::read_to_string(out_dir.join(DOMAINS_FILE)).expect("domains");
        assert_eq!(
            domains,
            "-- DOMAINS\nCREATE DOMAIN D_NAME AS VARCHAR(40);\nCREATE DOMAIN D_AMOUNT AS DOUBLE PRECISION;\n"
        );

        let tables = std::fs::read_to_string(out_dir.join(TABLES_FILE)).expect("tables");
        let orders = tables.find("CREATE TABLE ORDERS").expect("orders block");
        let customers = tables.find("CREATE TABLE CUSTOMERS").expect("customers block");
        assert!(orders < customers);
    }

    #[tokio::test]
    async fn sorts_by_name_when_requested() {
        let out_dir = temp_out_dir("sorted");
        let mut catalog = FakeCatalog::sample();
        let opts = ExportOptions { sort_by_name: true };

        export_scripts(&mut catalog, &out_dir, &opts).await.expect("export");

        let domains = std::fs::read_to_string(out_dir.join(DOMAINS_FILE)).expect("domains");
        assert!(domains.find("D_AMOUNT") < domains.find("D_NAME"));
        let tables = std::fs::read_to_string(out_dir.join(TABLES_FILE)).expect("tables");
        assert!(tables.find("CUSTOMERS") < tables.find("ORDERS"));
    }

    #[tokio::test]
    async fn failure_keeps_files_already_written() {
        let out_dir = temp_out_dir("partial");
        let mut catalog = FakeCatalog {
            fail_tables: true,
            ..FakeCatalog::sample()
        };

        let err = export_scripts(&mut catalog, &out_dir, &ExportOptions::default())
            .await
            .expect_err("tables query fails");

        assert!(matches!(err, Error::Db(_)));
        assert!(out_dir.join(DOMAINS_FILE).exists());
        assert!(!out_dir.join(TABLES_FILE).exists());
        assert!(!out_dir.join(PROCEDURES_FILE).exists());
    }

    #[tokio::test]
    async fn overwrites_previous_export() {
        let out_dir = temp_out_dir("overwrite");
        std::fs::create_dir_all(&out_dir).expect("create out dir");
        std::fs::write(out_dir.join(PROCEDURES_FILE), "stale content").expect("seed file");

        let mut catalog = FakeCatalog::sample();
        export_scripts(&mut catalog, &out_dir, &ExportOptions::default())
            .await
            .expect("export");

        let procedures =
            std::fs::read_to_string(out_dir.join(PROCEDURES_FILE)).expect("procedures");
        assert!(procedures.starts_with("-- PROCEDURES\nCREATE OR ALTER PROCEDURE CLOSE_DAY\n"));
    }

    #[tokio::test]
    async fn blank_output_dir_is_rejected() {
        let mut catalog = FakeCatalog::sample();
        let err = export_scripts(&mut catalog, Path::new(""), &ExportOptions::default())
            .await
            .expect_err("blank dir");
        assert!(err.is_input_error());
    }
}
