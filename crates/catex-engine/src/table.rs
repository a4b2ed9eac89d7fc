//! Owned, in-memory string grid shared by the canonical and catalog inputs.
//!
//! Reading the grid from disk is the caller's job; the engine only ever sees
//! a header row plus data rows, all as text.

use crate::error::EngineError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Name used in error messages, e.g. `"canonical"` or `"catalog"`.
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Like [`Table::column_index`] but a missing column is an error.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingColumn`] when no header matches `column`.
    pub fn require_column(&self, column: &str) -> Result<usize, EngineError> {
        self.column_index(column)
            .ok_or_else(|| EngineError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Cell text at `(row, column)`. Short rows read as empty.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map_or("", String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            "canonical",
            vec!["Variant SKU".into(), "Title".into()],
            vec![
                vec!["BED-100-01".into(), "Oak Bed".into()],
                vec!["BED-100-02".into()],
            ],
        )
    }

    #[test]
    fn column_index_finds_exact_header() {
        let table = sample();
        assert_eq!(table.column_index("Title"), Some(1));
        assert_eq!(table.column_index("title"), None);
    }

    #[test]
    fn require_column_reports_table_name() {
        let err = sample().require_column("Vendor").unwrap_err();
        assert!(
            matches!(err, EngineError::MissingColumn { ref table, ref column } if table == "canonical" && column == "Vendor")
        );
    }

    #[test]
    fn cell_reads_short_rows_as_empty() {
        let table = sample();
        assert_eq!(table.cell(0, 1), "Oak Bed");
        assert_eq!(table.cell(1, 1), "");
        assert_eq!(table.cell(9, 0), "");
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }
}
