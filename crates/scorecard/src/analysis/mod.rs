//! Analysis engine: column resolution, statistics, histogram, and item indices.

mod descriptive;
mod histogram;
mod items;
mod numeric;
mod resolver;

pub use descriptive::{compute_total_stats, StatsSummary, STATS_PRECISION};
pub use histogram::{
    generate_total_histogram, render_png, BinningError, HistogramFailure, HistogramImage, HistogramSpec,
    HistogramStyle, MAX_BINS,
};
pub use items::{
    analyze_items, check_group_fraction, DifficultyLevel, DiscriminationLevel, GroupSplit, IndexTable, IndexTableRow,
    ItemAnalysis, ItemIndexRow, DEFAULT_GROUP_FRACTION, INDEX_PRECISION,
};
pub use numeric::{format_number, round_to, try_parse_number, NumericSeries};
pub use resolver::{find_columns_matching, is_total_column, resolve_total_column, ColumnIssue, ColumnRef};
