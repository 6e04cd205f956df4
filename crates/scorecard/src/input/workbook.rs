//! Excel and OpenDocument workbooks.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::parser::ParserConfig;
use super::source::{Cell, DataTable};
use crate::error::{Result, ScorecardError};

/// Extensions read through the workbook path instead of the delimited one.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Lowercased workbook extension of `path`, if it has one.
pub(crate) fn workbook_format(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    WORKBOOK_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Read the first sheet of a workbook held in memory.
///
/// Cells keep the type the spreadsheet stored: numbers stay numbers and
/// text stays text even when it looks numeric.
pub(crate) fn read_first_sheet(bytes: &[u8], config: &ParserConfig) -> Result<DataTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ScorecardError::EmptyData("Workbook has no sheets".to_string()))??;

    let mut rows_iter = range.rows();

    let headers: Vec<String> = if config.has_header {
        match rows_iter.next() {
            Some(row) => row.iter().map(|cell| cell.to_string().trim().to_string()).collect(),
            None => return Err(ScorecardError::EmptyData("No columns found".to_string())),
        }
    } else {
        (0..range.width()).map(|i| format!("column_{}", i + 1)).collect()
    };

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ScorecardError::EmptyData("No columns found".to_string()));
    }

    let mut rows = Vec::new();
    for (row_idx, row) in rows_iter.enumerate() {
        if let Some(max) = config.max_rows {
            if row_idx >= max {
                break;
            }
        }

        let cells: Vec<Cell> = row.iter().map(cell_from_data).collect();
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        rows.push(cells);
    }

    if rows.is_empty() {
        return Err(ScorecardError::EmptyData("No data rows found".to_string()));
    }

    Ok(DataTable::new(headers, rows))
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) if f.is_finite() => Cell::Number(*f),
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            if DataTable::is_null_value(s) {
                Cell::Empty
            } else {
                Cell::Text(s.trim().to_string())
            }
        }
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Cell::Text(datetime.to_string()),
            None => Cell::Empty,
        },
        Data::Float(_) | Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workbook_format() {
        assert_eq!(workbook_format(Path::new("grades.XLSX")), Some("xlsx".to_string()));
        assert_eq!(workbook_format(Path::new("grades.xls")), Some("xls".to_string()));
        assert_eq!(workbook_format(Path::new("grades.csv")), None);
        assert_eq!(workbook_format(Path::new("grades")), None);
    }

    #[test]
    fn test_cells_keep_spreadsheet_types() {
        assert_eq!(cell_from_data(&Data::Float(85.0)), Cell::Number(85.0));
        assert_eq!(cell_from_data(&Data::Int(3)), Cell::Number(3.0));
        assert_eq!(
            cell_from_data(&Data::String("85".to_string())),
            Cell::Text("85".to_string())
        );
        assert_eq!(cell_from_data(&Data::String(" NA ".to_string())), Cell::Empty);
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::Number(1.0));
    }

    #[test]
    fn test_garbage_bytes_are_a_workbook_error() {
        let err = read_first_sheet(b"not a workbook", &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, ScorecardError::Workbook(_)));
    }
}
