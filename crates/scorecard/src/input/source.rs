//! Typed table model and source metadata.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the loaded data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file (empty for uploads).
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }

    /// Metadata for a table that was built in memory rather than read from disk.
    pub fn in_memory(table: &DataTable) -> Self {
        Self {
            file: String::new(),
            path: PathBuf::new(),
            hash: String::new(),
            size_bytes: 0,
            format: "memory".to_string(),
            row_count: table.row_count(),
            column_count: table.column_count(),
            loaded_at: Utc::now(),
        }
    }
}

/// A single typed cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A finite numeric value.
    Number(f64),
    /// Any non-numeric, non-null text.
    Text(String),
    /// Blank or a conventional null token.
    Empty,
}

impl Cell {
    /// Type a raw field the way a spreadsheet reader would.
    pub fn from_raw(raw: &str) -> Self {
        if DataTable::is_null_value(raw) {
            return Cell::Empty;
        }

        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
            Cell::Empty => Ok(()),
        }
    }
}

/// Storage class of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Only numbers and blanks.
    Numeric,
    /// At least one text cell.
    Mixed,
}

/// Represents parsed tabular data.
///
/// Every row holds exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Cell>>,
}

impl DataTable {
    /// Create a new data table, padding or truncating rows to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();

        Self { headers, rows }
    }

    /// Build a table from untyped string fields.
    pub fn from_raw<S: AsRef<str>>(headers: Vec<String>, rows: Vec<Vec<S>>) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|v| Cell::from_raw(v.as_ref())).collect())
            .collect();
        Self::new(headers, rows)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all cells for a column by index.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().map(move |row| row.get(index).unwrap_or(&Cell::Empty))
    }

    /// Get a specific cell.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Classify a column as numeric or mixed.
    pub fn column_kind(&self, index: usize) -> ColumnKind {
        if self.column_cells(index).any(|c| matches!(c, Cell::Text(_))) {
            ColumnKind::Mixed
        } else {
            ColumnKind::Numeric
        }
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }
}
