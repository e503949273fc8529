/// Options that control how the export renders catalog objects.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Sort domains, tables and procedures by name instead of keeping the
    /// catalog's result order. Column order is never changed.
    pub sort_by_name: bool,
}
