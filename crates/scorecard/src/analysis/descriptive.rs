//! Descriptive statistics for the total-score column.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::numeric::{format_number, round_to, NumericSeries};
use super::resolver::{resolve_total_column, ColumnIssue};
use crate::input::DataTable;

/// Decimal places kept in every summary figure.
pub const STATS_PRECISION: u32 = 3;

/// Summary of the total-score column.
///
/// All numeric fields are `None` when the column holds no numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Header of the summarized column.
    pub column: String,
    /// Number of numeric values.
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub range: Option<f64>,
    /// Most frequent value(s), ascending and comma-separated.
    pub mode: Option<String>,
}

impl StatsSummary {
    /// Summary for a column without any numeric values.
    pub fn empty(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            count: 0,
            mean: None,
            median: None,
            min: None,
            max: None,
            range: None,
            mode: None,
        }
    }

    /// Summarize an already extracted series.
    pub fn from_series(series: &NumericSeries) -> Self {
        let name = series.column.name.clone();
        let Some((min, max)) = series.bounds() else {
            return Self::empty(name);
        };

        let values = &series.values;
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;

        Self {
            column: name,
            count,
            mean: Some(round_to(mean, STATS_PRECISION)),
            median: Some(round_to(median(values), STATS_PRECISION)),
            min: Some(round_to(min, STATS_PRECISION)),
            max: Some(round_to(max, STATS_PRECISION)),
            range: Some(round_to(max - min, STATS_PRECISION)),
            mode: Some(mode_label(values)),
        }
    }
}

/// Compute the summary for the table's single "total" column.
pub fn compute_total_stats(table: &DataTable) -> Result<StatsSummary, ColumnIssue> {
    let column = resolve_total_column(table)?;
    let series = NumericSeries::from_column(table, &column);
    Ok(StatsSummary::from_series(&series))
}

/// 50th percentile with linear interpolation between the two middle values.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Every value sharing the highest frequency, ascending, joined by ", ".
fn mode_label(values: &[f64]) -> String {
    let mut counts: IndexMap<u64, (f64, usize)> = IndexMap::new();
    for &v in values {
        // Normalise -0.0 so it counts together with 0.0
        let v = if v == 0.0 { 0.0 } else { v };
        counts.entry(v.to_bits()).or_insert((v, 0)).1 += 1;
    }

    let top = counts.values().map(|(_, n)| *n).max().unwrap_or(0);
    let mut modes: Vec<f64> = counts
        .values()
        .filter(|(_, n)| *n == top)
        .map(|(v, _)| *v)
        .collect();
    modes.sort_by(f64::total_cmp);

    modes
        .into_iter()
        .map(format_number)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_table(values: &[&str]) -> DataTable {
        DataTable::from_raw(
            vec!["Name".into(), "Total Score".into()],
            values.iter().map(|v| vec!["x", *v]).collect(),
        )
    }

    #[test]
    fn test_basic_summary() {
        let table = total_table(&["70", "80", "90", "100"]);
        let stats = compute_total_stats(&table).unwrap();

        assert_eq!(stats.column, "Total Score");
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, Some(85.0));
        assert_eq!(stats.median, Some(85.0));
        assert_eq!(stats.min, Some(70.0));
        assert_eq!(stats.max, Some(100.0));
        assert_eq!(stats.range, Some(30.0));
    }

    #[test]
    fn test_multimodal_is_ascending_and_comma_joined() {
        let table = total_table(&["80", "70", "90", "80", "70"]);
        let stats = compute_total_stats(&table).unwrap();

        assert_eq!(stats.mode.as_deref(), Some("70, 80"));
        assert_eq!(stats.median, Some(80.0));
    }

    #[test]
    fn test_rounding_to_three_places() {
        let table = total_table(&["1", "1", "2"]);
        let stats = compute_total_stats(&table).unwrap();

        assert_eq!(stats.mean, Some(1.333));
        assert_eq!(stats.mode.as_deref(), Some("1"));
    }

    #[test]
    fn test_malformed_cells_are_dropped() {
        let table = total_table(&["50", "absent", "", "60"]);
        let stats = compute_total_stats(&table).unwrap();

        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, Some(55.0));
    }

    #[test]
    fn test_all_text_yields_empty_summary() {
        let table = total_table(&["absent", "excused"]);
        let stats = compute_total_stats(&table).unwrap();

        assert_eq!(stats, StatsSummary::empty("Total Score"));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let table = DataTable::from_raw(vec!["Q1".into()], vec![vec!["1"]]);
        assert_eq!(compute_total_stats(&table), Err(ColumnIssue::NotFound));
    }
}
