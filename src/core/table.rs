//! In-memory tabular data structure shared across the pipeline.
//!
//! Every session file is loaded into a [`DataTable`] and the consolidated
//! dataset is itself a `DataTable` built by column-union concatenation.
//! Cells are stored as `Option<String>`: `None` is the missing-value marker,
//! distinct from an empty string.

/// A rectangular table of optional string cells with named columns.
///
/// Invariant: every row has exactly `num_columns()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl DataTable {
    /// Creates an empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Returns the number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows in order.
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Returns the index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Appends a row, padding with missing cells or truncating so the row
    /// matches the current column count.
    pub fn push_row(&mut self, mut cells: Vec<Option<String>>) {
        cells.resize(self.columns.len(), None);
        self.rows.push(cells);
    }

    /// Appends a column holding the same value in every row.
    ///
    /// Used to tag provenance and filename-derived metadata, which are
    /// constant across one session file.
    pub fn push_const_column(&mut self, name: &str, value: Option<String>) {
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(value.clone());
        }
    }

    /// Returns the cells of a column by name, or `None` if the column
    /// does not exist.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row[idx].as_deref())
                .collect(),
        )
    }

    /// Returns a column parsed leniently as floats.
    ///
    /// Missing cells and cells that do not parse as a number both yield
    /// `None`, so each statistic can exclude them independently.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row[idx].as_deref().and_then(|s| s.trim().parse().ok()))
                .collect(),
        )
    }

    /// Concatenates tables with column-union semantics.
    ///
    /// The output column set is the union of all input column sets in
    /// first-seen order. Rows from a table lacking a column get missing
    /// cells for it. Row order is input-table order, then original row
    /// order within each table.
    pub fn concat(tables: &[DataTable]) -> DataTable {
        let mut columns: Vec<String> = Vec::new();
        for table in tables {
            for col in &table.columns {
                if !columns.contains(col) {
                    columns.push(col.clone());
                }
            }
        }

        let total_rows: usize = tables.iter().map(|t| t.num_rows()).sum();
        let mut rows = Vec::with_capacity(total_rows);

        for table in tables {
            // Map each output column to its index in this table, if any.
            let mapping: Vec<Option<usize>> = columns
                .iter()
                .map(|c| table.column_index(c))
                .collect();

            for row in &table.rows {
                rows.push(
                    mapping
                        .iter()
                        .map(|idx| idx.and_then(|i| row[i].clone()))
                        .collect(),
                );
            }
        }

        DataTable { columns, rows }
    }
}
