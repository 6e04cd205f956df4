//! Numeric coercion of table cells.

use serde::Serialize;

use super::resolver::ColumnRef;
use crate::input::{Cell, DataTable};

/// Coerce a cell to a finite number, if it holds one.
pub fn try_parse_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Number(_) => None,
        Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Cell::Empty => None,
    }
}

/// Round half-to-even at the given number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round_ties_even() / factor
}

/// Print a value without a trailing `.0` when it is integral.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// The numeric values of one column, in row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSeries {
    /// Column the values came from.
    pub column: ColumnRef,
    /// Coercible values; missing and malformed cells are left out.
    pub values: Vec<f64>,
    /// How many cells were left out.
    pub dropped: usize,
}

impl NumericSeries {
    /// Extract a column, dropping every cell that is not a number.
    pub fn from_column(table: &DataTable, column: &ColumnRef) -> Self {
        let mut values = Vec::with_capacity(table.row_count());
        let mut dropped = 0;

        for cell in table.column_cells(column.index) {
            match try_parse_number(cell) {
                Some(v) => values.push(v),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            log::debug!(
                "column '{}': dropped {} non-numeric or missing cells",
                column.name,
                dropped
            );
        }

        Self {
            column: column.clone(),
            values,
            dropped,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest value, `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_parse_number() {
        assert_eq!(try_parse_number(&Cell::Number(4.0)), Some(4.0));
        assert_eq!(try_parse_number(&Cell::Text(" 7.5 ".into())), Some(7.5));
        assert_eq!(try_parse_number(&Cell::Text("seven".into())), None);
        assert_eq!(try_parse_number(&Cell::Number(f64::NAN)), None);
        assert_eq!(try_parse_number(&Cell::Empty), None);
    }

    #[test]
    fn test_series_tracks_dropped_cells() {
        let table = DataTable::from_raw(
            vec!["Total".into()],
            vec![vec!["10"], vec!["absent"], vec![""], vec!["12.5"]],
        );
        let column = ColumnRef {
            index: 0,
            name: "Total".into(),
        };
        let series = NumericSeries::from_column(&table, &column);

        assert_eq!(series.values, vec![10.0, 12.5]);
        assert_eq!(series.dropped, 2);
        assert_eq!(series.bounds(), Some((10.0, 12.5)));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.0 / 3.0, 3), 0.667);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(-1.23456, 2), -1.23);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(70.0), "70");
        assert_eq!(format_number(72.5), "72.5");
        assert_eq!(format_number(-3.0), "-3");
    }
}
