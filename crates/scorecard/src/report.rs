//! Main Scorecard struct and public API.

use std::path::Path;

use serde::Serialize;

use crate::analysis::{
    analyze_items, check_group_fraction, compute_total_stats, generate_total_histogram, HistogramImage, HistogramStyle,
    IndexTable, ItemAnalysis, StatsSummary, DEFAULT_GROUP_FRACTION,
};
use crate::error::Result;
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};

/// Configuration for Scorecard analysis.
#[derive(Debug, Clone)]
pub struct ScorecardConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Share of examinees in the high and low groups.
    pub group_fraction: f64,
    /// Histogram raster settings.
    pub histogram: HistogramStyle,
}

impl Default for ScorecardConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            group_fraction: DEFAULT_GROUP_FRACTION,
            histogram: HistogramStyle::default(),
        }
    }
}

impl ScorecardConfig {
    /// Override the group fraction.
    pub fn with_group_fraction(mut self, fraction: f64) -> Self {
        self.group_fraction = fraction;
        self
    }

    /// Check that the settings describe a usable analysis.
    pub fn validate(&self) -> Result<()> {
        check_group_fraction(self.group_fraction)
    }
}

/// Everything produced for one uploaded table.
///
/// Features that could not run leave their field empty and add a message
/// to `issues`.
#[derive(Debug, Clone, Serialize)]
pub struct ExamReport {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Descriptive statistics of the total column.
    pub stats: Option<StatsSummary>,
    /// Rendered score distribution.
    pub histogram: Option<HistogramImage>,
    /// Difficulty and discrimination indices.
    pub items: Option<ItemAnalysis>,
    /// User-facing messages from features that produced no result.
    pub issues: Vec<String>,
}

impl ExamReport {
    /// All issues joined with `separator`, or `None` when there are none.
    pub fn combined_issues(&self, separator: &str) -> Option<String> {
        if self.issues.is_empty() {
            None
        } else {
            Some(self.issues.join(separator))
        }
    }

    pub fn difficulty_table(&self) -> Option<IndexTable> {
        self.items.as_ref().map(ItemAnalysis::difficulty_table)
    }

    pub fn discrimination_table(&self) -> Option<IndexTable> {
        self.items.as_ref().map(ItemAnalysis::discrimination_table)
    }
}

/// The main Scorecard analysis engine.
///
/// Holds configuration only, so one instance can serve any number of
/// tables, including from several threads at once.
pub struct Scorecard {
    config: ScorecardConfig,
    parser: Parser,
}

impl Scorecard {
    /// Create a new Scorecard instance with default configuration.
    pub fn new() -> Self {
        let config = ScorecardConfig::default();
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    /// Create a Scorecard instance with custom configuration.
    pub fn with_config(config: ScorecardConfig) -> Result<Self> {
        config.validate()?;
        let parser = Parser::with_config(config.parser.clone());
        Ok(Self { config, parser })
    }

    pub fn config(&self) -> &ScorecardConfig {
        &self.config
    }

    /// Load a data file and analyze it.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<ExamReport> {
        let (table, source) = self.parser.parse_file(path)?;
        Ok(self.analyze_table(&table, source))
    }

    /// Analyze an uploaded file held in memory.
    pub fn analyze_bytes(&self, bytes: &[u8], name: &str) -> Result<ExamReport> {
        let (table, source) = self.parser.parse_bytes(bytes, name)?;
        Ok(self.analyze_table(&table, source))
    }

    /// Run statistics, histogram, and item analysis on a loaded table.
    ///
    /// The three features are independent; the table is only read.
    pub fn analyze_table(&self, table: &DataTable, source: SourceMetadata) -> ExamReport {
        let mut issues = Vec::new();

        let stats = match compute_total_stats(table) {
            Ok(stats) => Some(stats),
            Err(issue) => {
                log::warn!("statistics skipped: {}", issue);
                issues.push(issue.to_string());
                None
            }
        };

        let histogram = match generate_total_histogram(table, &self.config.histogram) {
            Ok(image) => Some(image),
            Err(failure) => {
                log::warn!("histogram skipped: {}", failure);
                issues.push(failure.to_string());
                None
            }
        };

        let items = match analyze_items(table, self.config.group_fraction) {
            Ok(items) => Some(items),
            Err(e) => {
                log::warn!("item analysis skipped: {}", e);
                issues.push(format!("Item analysis failed: {}", e));
                None
            }
        };

        ExamReport {
            source,
            stats,
            histogram,
            items,
            issues,
        }
    }
}

impl Default for Scorecard {
    fn default() -> Self {
        Self::new()
    }
}
