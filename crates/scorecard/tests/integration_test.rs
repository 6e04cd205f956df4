//! Integration tests for Scorecard.

use std::io::Write;
use tempfile::NamedTempFile;

use scorecard::{
    Cell, DifficultyLevel, DiscriminationLevel, Scorecard, ScorecardConfig, ScorecardError,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

const CLASS_CSV: &str = "Student,Q1,Q2,Q3,Total\n\
                         Ann,1,1,0,90\n\
                         Ben,1,1,1,85\n\
                         Cid,1,0,1,80\n\
                         Dee,1,1,0,70\n\
                         Eve,0,1,1,65\n\
                         Fay,1,0,0,60\n\
                         Gus,0,1,0,55\n\
                         Hal,1,0,0,50\n\
                         Ivy,0,0,1,45\n\
                         Jon,0,0,0,40\n";

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_analyze_class_file() {
    let file = create_test_file(CLASS_CSV, ".csv");
    let report = Scorecard::new().analyze(file.path()).expect("Analysis failed");

    assert_eq!(report.source.row_count, 10);
    assert_eq!(report.source.column_count, 5);
    assert_eq!(report.source.format, "csv");

    let stats = report.stats.as_ref().expect("stats");
    assert_eq!(stats.column, "Total");
    assert_eq!(stats.count, 10);
    assert_eq!(stats.mean, Some(64.0));
    assert_eq!(stats.median, Some(62.5));
    assert_eq!(stats.min, Some(40.0));
    assert_eq!(stats.max, Some(90.0));
    assert_eq!(stats.range, Some(50.0));

    let items = report.items.as_ref().expect("items");
    assert_eq!(items.group_size, 3);
    let names: Vec<&str> = items.rows.iter().map(|r| r.item.as_str()).collect();
    assert_eq!(names, vec!["Q1", "Q2", "Q3"]);
    assert_eq!(items.rows[0].difficulty_label, DifficultyLevel::Moderate);
    assert_eq!(items.rows[2].discrimination_label, DiscriminationLevel::ReasonablyGood);
}

#[test]
fn test_analyze_tsv_upload_bytes() {
    let content = CLASS_CSV.replace(',', "\t");
    let report = Scorecard::new()
        .analyze_bytes(content.as_bytes(), "class.tsv")
        .expect("Analysis failed");

    assert_eq!(report.source.format, "tsv");
    assert_eq!(report.source.file, "class.tsv");
    assert_eq!(report.stats.map(|s| s.count), Some(10));
}

#[test]
fn test_histogram_matches_total_column() {
    let file = create_test_file(CLASS_CSV, ".csv");
    let report = Scorecard::new().analyze(file.path()).unwrap();
    assert!(report.issues.is_empty(), "unexpected issues: {:?}", report.issues);

    let image = report.histogram.expect("histogram");
    assert_eq!(image.column.name, "Total");
    assert_eq!(image.spec.edges.first(), Some(&39.5));
    assert_eq!(image.spec.edges.last(), Some(&90.5));
    assert_eq!(image.spec.axis, (39.0, 91.0));
    assert_eq!(&image.png[..8], b"\x89PNG\r\n\x1a\n");
    assert!(image.data_uri().starts_with("data:image/png;base64,"));
}

#[test]
fn test_report_json_carries_base64_png() {
    let file = create_test_file(CLASS_CSV, ".csv");
    let report = Scorecard::new().analyze(file.path()).unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    let png = json["histogram"]["png"].as_str().expect("base64 string");
    assert!(png.starts_with("iVBORw0KGgo"));
    assert_eq!(json["issues"].as_array().map(Vec::len), Some(0));
}

// =============================================================================
// Reported conditions
// =============================================================================

#[test]
fn test_no_total_column() {
    let content = "Student,Q1,Q2,Score\nAnn,1,0,1\nBen,0,1,1\n";
    let file = create_test_file(content, ".csv");
    let report = Scorecard::new().analyze(file.path()).unwrap();

    assert!(report.stats.is_none());
    assert!(report.histogram.is_none());
    assert_eq!(report.issues.len(), 2);
    assert!(report.issues.iter().all(|i| i.contains("No columns containing 'total'")));
    // Item analysis still runs against the last column
    assert_eq!(report.items.map(|i| i.rows.len()), Some(2));
}

#[test]
fn test_two_total_columns() {
    let content = "Q1,Subtotal,Total\n1,1,2\n0,1,1\n";
    let file = create_test_file(content, ".csv");
    let report = Scorecard::new().analyze(file.path()).unwrap();

    assert!(report.stats.is_none());
    assert!(report.histogram.is_none());
    assert!(report
        .issues
        .iter()
        .all(|i| i == "There are more than one column containing 'total'."));
}

#[test]
fn test_all_text_total_is_empty_summary() {
    let content = "Q1,Total\n1,absent\n0,excused\n";
    let file = create_test_file(content, ".csv");
    let report = Scorecard::new().analyze(file.path()).unwrap();

    let stats = report.stats.expect("an empty summary, not an issue");
    assert_eq!(stats.count, 0);
    assert_eq!(stats.mean, None);
    assert_eq!(stats.mode, None);
    assert!(report.histogram.is_none());
    assert_eq!(
        report.issues[0],
        "Column 'Total' has no numeric values to plot."
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Scorecard::new().analyze("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, ScorecardError::Io { .. }));
}

#[test]
fn test_corrupt_workbook_is_an_error() {
    let err = Scorecard::new()
        .analyze_bytes(b"PK\x03\x04", "grades.xls")
        .unwrap_err();
    assert!(matches!(err, ScorecardError::Workbook(_)));
}

// =============================================================================
// Workbooks
// =============================================================================

const CLASS_XLSX: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/class.xlsx");

#[test]
fn test_analyze_workbook_file() {
    let report = Scorecard::new().analyze(CLASS_XLSX).expect("Analysis failed");

    assert_eq!(report.source.format, "xlsx");
    assert_eq!(report.source.row_count, 10);
    assert_eq!(report.source.column_count, 5);

    let stats = report.stats.as_ref().expect("stats");
    assert_eq!(stats.column, "Total");
    assert_eq!(stats.mean, Some(64.0));
    assert_eq!(stats.median, Some(62.5));

    let items = report.items.as_ref().expect("items");
    let names: Vec<&str> = items.rows.iter().map(|r| r.item.as_str()).collect();
    assert_eq!(names, vec!["Q1", "Q2", "Q3"]);
    assert_eq!(items.rows[0].difficulty, 0.67);
    assert_eq!(items.rows[2].discrimination_label, DiscriminationLevel::ReasonablyGood);
}

#[test]
fn test_workbook_upload_matches_csv() {
    let bytes = std::fs::read(CLASS_XLSX).unwrap();
    let from_workbook = Scorecard::new().analyze_bytes(&bytes, "Class.XLSX").unwrap();
    let from_csv = Scorecard::new()
        .analyze_bytes(CLASS_CSV.as_bytes(), "class.csv")
        .unwrap();

    assert_eq!(from_workbook.stats, from_csv.stats);
    assert_eq!(from_workbook.items, from_csv.items);
}

#[test]
fn test_workbook_cells_keep_sheet_types() {
    let (table, _) = scorecard::Parser::new().parse_file(CLASS_XLSX).unwrap();

    assert_eq!(table.headers, vec!["Student", "Q1", "Q2", "Q3", "Total"]);
    assert_eq!(table.cell(0, 0), Some(&Cell::Text("Ann".to_string())));
    assert_eq!(table.cell(0, 4), Some(&Cell::Number(90.0)));
    // Only the first sheet is read
    assert_eq!(table.row_count(), 10);
}

// =============================================================================
// Engine properties
// =============================================================================

#[test]
fn test_analysis_is_repeatable_and_read_only() {
    let file = create_test_file(CLASS_CSV, ".csv");
    let (table, source) = scorecard::Parser::new().parse_file(file.path()).unwrap();
    let before = table.clone();

    let scorecard = Scorecard::new();
    let first = scorecard.analyze_table(&table, source.clone());
    let second = scorecard.analyze_table(&table, source);

    assert_eq!(table, before);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.items, second.items);
    assert_eq!(
        first.histogram.as_ref().map(|h| &h.spec),
        second.histogram.as_ref().map(|h| &h.spec)
    );
}

#[test]
fn test_custom_group_fraction() {
    let file = create_test_file(CLASS_CSV, ".csv");
    let config = ScorecardConfig::default().with_group_fraction(0.5);
    let report = Scorecard::with_config(config)
        .unwrap()
        .analyze(file.path())
        .unwrap();

    assert_eq!(report.items.map(|i| i.group_size), Some(5));
}

#[test]
fn test_cells_are_typed_at_load() {
    let (table, _) = scorecard::Parser::new()
        .parse_bytes(b"Q1,Total\n1,NA\n,7\n", "t.csv")
        .unwrap();

    assert_eq!(table.cell(0, 1), Some(&Cell::Empty));
    assert_eq!(table.cell(1, 0), Some(&Cell::Empty));
    assert_eq!(table.cell(1, 1), Some(&Cell::Number(7.0)));
}
