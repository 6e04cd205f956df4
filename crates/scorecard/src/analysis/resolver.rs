//! Locating the single "total" column by name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::DataTable;

/// Substring (lowercase) that marks a total-score column.
const TOTAL_MARKER: &str = "total";

/// A column located by position and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Zero-based position in the table.
    pub index: usize,
    /// Header text.
    pub name: String,
}

/// Why a per-feature computation produced no result.
///
/// These are reported to the user and never abort the rest of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnIssue {
    /// No header contains "total".
    NotFound,
    /// More than one header contains "total".
    Ambiguous { columns: Vec<String> },
    /// The column resolved but has nothing numeric to chart.
    NoNumericData { column: String },
}

impl fmt::Display for ColumnIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnIssue::NotFound => {
                f.write_str("No columns containing 'total' found in the uploaded file.")
            }
            ColumnIssue::Ambiguous { .. } => {
                f.write_str("There are more than one column containing 'total'.")
            }
            ColumnIssue::NoNumericData { column } => {
                write!(f, "Column '{}' has no numeric values to plot.", column)
            }
        }
    }
}

impl std::error::Error for ColumnIssue {}

/// Return every column whose name satisfies `predicate`, in table order.
pub fn find_columns_matching<F>(table: &DataTable, predicate: F) -> Vec<ColumnRef>
where
    F: Fn(&str) -> bool,
{
    table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, name)| predicate(name))
        .map(|(index, name)| ColumnRef {
            index,
            name: name.clone(),
        })
        .collect()
}

/// Case-insensitive check for the "total" marker.
pub fn is_total_column(name: &str) -> bool {
    name.to_lowercase().contains(TOTAL_MARKER)
}

/// Resolve the one and only total column.
pub fn resolve_total_column(table: &DataTable) -> Result<ColumnRef, ColumnIssue> {
    let mut matches = find_columns_matching(table, is_total_column);

    match matches.len() {
        0 => Err(ColumnIssue::NotFound),
        1 => Ok(matches.remove(0)),
        _ => Err(ColumnIssue::Ambiguous {
            columns: matches.into_iter().map(|c| c.name).collect(),
        }),
    }
}
