//! Classical item analysis with upper and lower scoring groups.
//!
//! Examinees are ranked by the last column of the table (the criterion,
//! normally the total score). The top and bottom `ceil(fraction * n)` rows
//! form the high and low groups; for small classes the two groups may share
//! rows, which is how the method is usually applied and is left as is.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::numeric::{round_to, try_parse_number};
use super::resolver::ColumnRef;
use crate::error::{Result, ScorecardError};
use crate::input::{ColumnKind, DataTable};

/// Share of examinees in each of the high and low groups.
pub const DEFAULT_GROUP_FRACTION: f64 = 0.27;

/// Decimal places kept in difficulty and discrimination indices.
pub const INDEX_PRECISION: u32 = 2;

/// Check that `fraction` lies in `(0, 0.5]`.
pub fn check_group_fraction(fraction: f64) -> Result<()> {
    if fraction > 0.0 && fraction <= 0.5 {
        Ok(())
    } else {
        Err(ScorecardError::Config(format!(
            "group fraction must be in (0, 0.5], got {}",
            fraction
        )))
    }
}

/// Interpretation band for a difficulty index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    #[serde(rename = "Very Easy")]
    VeryEasy,
    #[serde(rename = "Easy")]
    Easy,
    #[serde(rename = "Moderate(Average)")]
    Moderate,
    #[serde(rename = "Difficult")]
    Difficult,
    #[serde(rename = "Very Difficult")]
    VeryDifficult,
}

impl DifficultyLevel {
    /// Band a (rounded) difficulty index. Lower bounds are inclusive.
    pub fn from_index(value: f64) -> Self {
        if value >= 0.91 {
            DifficultyLevel::VeryEasy
        } else if value >= 0.76 {
            DifficultyLevel::Easy
        } else if value >= 0.26 {
            DifficultyLevel::Moderate
        } else if value >= 0.11 {
            DifficultyLevel::Difficult
        } else {
            DifficultyLevel::VeryDifficult
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DifficultyLevel::VeryEasy => "Very Easy",
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Moderate => "Moderate(Average)",
            DifficultyLevel::Difficult => "Difficult",
            DifficultyLevel::VeryDifficult => "Very Difficult",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Interpretation band for a discrimination index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscriminationLevel {
    #[serde(rename = "Very Good")]
    VeryGood,
    #[serde(rename = "Reasonably Good")]
    ReasonablyGood,
    #[serde(rename = "Marginal Item")]
    Marginal,
    #[serde(rename = "Poor Item")]
    Poor,
}

impl DiscriminationLevel {
    /// Band a (rounded) discrimination index. Lower bounds are inclusive.
    pub fn from_index(value: f64) -> Self {
        if value >= 0.40 {
            DiscriminationLevel::VeryGood
        } else if value >= 0.30 {
            DiscriminationLevel::ReasonablyGood
        } else if value >= 0.20 {
            DiscriminationLevel::Marginal
        } else {
            DiscriminationLevel::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiscriminationLevel::VeryGood => "Very Good",
            DiscriminationLevel::ReasonablyGood => "Reasonably Good",
            DiscriminationLevel::Marginal => "Marginal Item",
            DiscriminationLevel::Poor => "Poor Item",
        }
    }
}

impl fmt::Display for DiscriminationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Row indices of the high and low scoring groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSplit {
    pub group_size: usize,
    /// First `group_size` rows by descending criterion.
    pub high: Vec<usize>,
    /// Last `group_size` rows by descending criterion.
    pub low: Vec<usize>,
}

impl GroupSplit {
    /// Rank rows by criterion (descending, stable) and cut both groups.
    ///
    /// Rows without a numeric criterion rank below every scored row.
    pub fn from_criterion(criterion: &[Option<f64>], fraction: f64) -> Self {
        let n = criterion.len();
        let group_size = ((n as f64 * fraction).ceil() as usize).min(n);

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| match (criterion[a], criterion[b]) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Self {
            group_size,
            high: order[..group_size].to_vec(),
            low: order[n - group_size..].to_vec(),
        }
    }

    /// Whether at least one row belongs to both groups.
    pub fn overlaps(&self) -> bool {
        self.high.iter().any(|r| self.low.contains(r))
    }
}

/// Indices for one item column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemIndexRow {
    /// Item column header.
    pub item: String,
    pub difficulty: f64,
    pub difficulty_label: DifficultyLevel,
    pub discrimination: f64,
    pub discrimination_label: DiscriminationLevel,
}

/// One line of a display table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexTableRow {
    pub item: String,
    pub value: f64,
    pub interpretation: &'static str,
}

/// A two-column (value, interpretation) table keyed by item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexTable {
    pub title: &'static str,
    pub rows: Vec<IndexTableRow>,
}

impl IndexTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Result of the item analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemAnalysis {
    /// Column used for ranking; never reported as an item.
    pub criterion: ColumnRef,
    pub row_count: usize,
    pub group_size: usize,
    /// One row per numeric item column, in table order.
    pub rows: Vec<ItemIndexRow>,
}

impl ItemAnalysis {
    pub fn difficulty_table(&self) -> IndexTable {
        IndexTable {
            title: "Difficulty Index",
            rows: self
                .rows
                .iter()
                .map(|r| IndexTableRow {
                    item: r.item.clone(),
                    value: r.difficulty,
                    interpretation: r.difficulty_label.label(),
                })
                .collect(),
        }
    }

    pub fn discrimination_table(&self) -> IndexTable {
        IndexTable {
            title: "Discrimination Index",
            rows: self
                .rows
                .iter()
                .map(|r| IndexTableRow {
                    item: r.item.clone(),
                    value: r.discrimination,
                    interpretation: r.discrimination_label.label(),
                })
                .collect(),
        }
    }
}

/// Compute difficulty and discrimination for every numeric item column.
///
/// The last column is the ranking criterion. Blank item cells count as 0.
/// Fails when the table has no columns or no rows, or when `fraction` is
/// outside `(0, 0.5]`.
pub fn analyze_items(table: &DataTable, fraction: f64) -> Result<ItemAnalysis> {
    check_group_fraction(fraction)?;

    let Some(criterion_index) = table.column_count().checked_sub(1) else {
        return Err(ScorecardError::EmptyData(
            "item analysis needs at least one column".to_string(),
        ));
    };
    if table.row_count() == 0 {
        return Err(ScorecardError::EmptyData(
            "item analysis needs at least one row".to_string(),
        ));
    }

    let criterion: Vec<Option<f64>> = table
        .column_cells(criterion_index)
        .map(try_parse_number)
        .collect();
    let split = GroupSplit::from_criterion(&criterion, fraction);
    let g = split.group_size as f64;

    log::debug!(
        "item analysis: {} rows, group size {}, criterion '{}'",
        table.row_count(),
        split.group_size,
        table.headers[criterion_index]
    );

    let group_sum = |rows: &[usize], col: usize| -> f64 {
        rows.iter()
            .filter_map(|&r| table.cell(r, col).and_then(try_parse_number))
            .sum()
    };

    let rows = (0..criterion_index)
        .filter(|&col| table.column_kind(col) == ColumnKind::Numeric)
        .map(|col| {
            let high = group_sum(&split.high, col);
            let low = group_sum(&split.low, col);

            let difficulty = round_to((high + low) / (2.0 * g), INDEX_PRECISION);
            let discrimination = round_to((high - low) / g, INDEX_PRECISION);

            ItemIndexRow {
                item: table.headers[col].clone(),
                difficulty,
                difficulty_label: DifficultyLevel::from_index(difficulty),
                discrimination,
                discrimination_label: DiscriminationLevel::from_index(discrimination),
            }
        })
        .collect();

    Ok(ItemAnalysis {
        criterion: ColumnRef {
            index: criterion_index,
            name: table.headers[criterion_index].clone(),
        },
        row_count: table.row_count(),
        group_size: split.group_size,
        rows,
    })
}
