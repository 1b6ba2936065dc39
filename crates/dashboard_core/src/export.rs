//! CSV export of the loaded page.
//!
//! Only the rows currently loaded are exported, not the full filtered
//! result set on the server.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ListError;

/// One exported column: a header and how to render a row's cell.
pub struct CsvColumn<T> {
    pub header: &'static str,
    pub accessor: fn(&T) -> String,
}

impl<T> CsvColumn<T> {
    pub const fn new(header: &'static str, accessor: fn(&T) -> String) -> Self {
        Self { header, accessor }
    }
}

impl<T> Clone for CsvColumn<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CsvColumn<T> {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub contents: String,
}

/// Renders a header row plus one row per item. Every field is quoted and
/// embedded quotes are doubled.
pub fn to_csv<T>(items: &[T], columns: &[CsvColumn<T>]) -> Result<String, ListError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(columns.iter().map(|column| column.header))
        .map_err(|err| ListError::Export(err.to_string()))?;
    for item in items {
        writer
            .write_record(columns.iter().map(|column| (column.accessor)(item)))
            .map_err(|err| ListError::Export(err.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ListError::Export(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ListError::Export(err.to_string()))
}

/// `<resource>_<YYYY-MM-DD>.csv`
pub fn export_file_name(resource: &str, date: NaiveDate) -> String {
    format!("{resource}_{}.csv", date.format("%Y-%m-%d"))
}
