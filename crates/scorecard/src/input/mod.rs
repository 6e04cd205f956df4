//! Input parsing and the in-memory table model.

mod parser;
mod source;
mod workbook;

pub use parser::{Parser, ParserConfig};
pub use source::{Cell, ColumnKind, DataTable, SourceMetadata};
