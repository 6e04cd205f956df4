//! Tabular file parser: delimited text with delimiter detection, or the
//! first sheet of a workbook.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use super::source::{Cell, DataTable, SourceMetadata};
use super::workbook::{read_first_sheet, workbook_format};
use crate::error::{Result, ScorecardError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses tabular data files into a typed [`DataTable`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| ScorecardError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| ScorecardError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        self.parse_contents(&contents, path.to_path_buf())
    }

    /// Parse an in-memory upload. `name` is the client-side file name.
    pub fn parse_bytes(&self, bytes: &[u8], name: &str) -> Result<(DataTable, SourceMetadata)> {
        self.parse_contents(bytes, PathBuf::from(name))
    }

    fn parse_contents(&self, contents: &[u8], path: PathBuf) -> Result<(DataTable, SourceMetadata)> {
        let mut hasher = Sha256::new();
        hasher.update(contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (data_table, format) = match workbook_format(&path) {
            Some(format) => (read_first_sheet(contents, &self.config)?, format),
            None => self.read_delimited(contents)?,
        };

        log::debug!(
            "loaded {} ({}): {} rows x {} columns",
            path.display(),
            format,
            data_table.row_count(),
            data_table.column_count()
        );

        let source_metadata = SourceMetadata::new(
            path,
            hash,
            contents.len() as u64,
            format,
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    fn read_delimited(&self, contents: &[u8]) -> Result<(DataTable, String)> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(contents)?,
        };

        let data_table = self.read_table(contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        };

        Ok((data_table, format.to_string()))
    }

    fn reader<'a>(&self, bytes: &'a [u8], delimiter: u8) -> csv::Reader<&'a [u8]> {
        csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes)
    }

    fn read_table(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = self.reader(bytes, delimiter);

        let headers: Vec<String> = if self.config.has_header {
            reader
                .headers()?
                .iter()
                .map(|s| s.trim().to_string())
                .collect()
        } else {
            match reader.records().next() {
                Some(Ok(record)) => (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                Some(Err(e)) => return Err(e.into()),
                None => return Err(ScorecardError::EmptyData("No data rows found".to_string())),
            }
        };

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(ScorecardError::EmptyData("No columns found".to_string()));
        }

        // Start over so that headerless input keeps its first record
        let mut reader = self.reader(bytes, delimiter);
        let mut rows = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let row: Vec<Cell> = record.iter().map(Cell::from_raw).collect();
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(ScorecardError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ScorecardError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs rarely occur inside values
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
