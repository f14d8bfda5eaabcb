use std::fmt;

// ---------------------------------------------------------------------------
// Column – one named numeric column
// ---------------------------------------------------------------------------

/// A single named column of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – ordered named numeric columns
// ---------------------------------------------------------------------------

/// An ordered collection of named numeric columns. All columns have the same
/// length; `push_column` enforces this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Table::default()
    }

    /// Build a one-row table from `(name, value)` pairs, preserving order.
    pub fn single_row<'a>(fields: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let columns = fields
            .into_iter()
            .map(|(name, value)| Column::new(name, vec![value]))
            .collect();
        Table { columns }
    }

    /// Number of rows (length of the first column; 0 for an empty table).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Ordered column names.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Append a column. The length must match the current row count unless
    /// the table is empty.
    pub fn push_column(&mut self, column: Column) -> Result<(), ShapeError> {
        if !self.columns.is_empty() && column.values.len() != self.n_rows() {
            return Err(ShapeError {
                column: column.name,
                expected: self.n_rows(),
                actual: column.values.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Copy of this table without the named column. A no-op copy when the
    /// column is absent.
    pub fn without_column(&self, name: &str) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .filter(|c| c.name != name)
                .cloned()
                .collect(),
        }
    }

    /// One row as display cells, for the preview grid.
    pub fn row_cells(&self, row: usize) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| {
                c.values
                    .get(row)
                    .map(|v| format_cell(*v))
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Trim trailing float noise for display: integers render bare, everything
/// else with up to four decimals.
fn format_cell(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e12 {
        format!("{v:.0}")
    } else {
        let s = format!("{v:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Column length does not match the table's row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    pub column: String,
    pub expected: usize,
    pub actual: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "column '{}' has {} values, expected {}",
            self.column, self.actual, self.expected
        )
    }
}

impl std::error::Error for ShapeError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
