//! Scorecard: exam score statistics and classical item analysis.
//!
//! Scorecard takes a table of exam results (one row per examinee, one column
//! per item plus a trailing total) and produces three independent artifacts:
//!
//! - **Descriptive statistics** for the single column whose name contains "total"
//! - **A histogram** of that column with unit-width bins, rendered to PNG
//! - **Item indices** (difficulty and discrimination) using the upper/lower 27% method
//!
//! Each artifact either succeeds or contributes a human-readable issue to the
//! report; one failing feature never prevents the others from running.
//!
//! # Example
//!
//! ```no_run
//! use scorecard::Scorecard;
//!
//! let scorecard = Scorecard::new();
//! let report = scorecard.analyze("midterm.csv").unwrap();
//!
//! if let Some(stats) = &report.stats {
//!     println!("Mean: {:?}", stats.mean);
//! }
//! for issue in &report.issues {
//!     println!("{issue}");
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod input;

mod report;

pub use crate::report::{ExamReport, Scorecard, ScorecardConfig};
pub use analysis::{
    ColumnIssue, ColumnRef, DifficultyLevel, DiscriminationLevel, HistogramImage,
    HistogramSpec, HistogramStyle, IndexTable, ItemAnalysis, ItemIndexRow, NumericSeries,
    StatsSummary, DEFAULT_GROUP_FRACTION,
};
pub use error::{Result, ScorecardError};
pub use input::{Cell, ColumnKind, DataTable, Parser, ParserConfig, SourceMetadata};
