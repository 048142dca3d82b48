//! Exporting documents as flat word records.

mod csv;
mod json;
mod options;
mod record;
mod result;
mod text;

pub use self::csv::{to_csv, write_csv};
pub use json::{to_json, write_json};
pub use options::{ExportOptions, JsonFormat, OutputFormat, PageSelection};
pub use record::{export, export_pages, page_records, WordRecord, FIELDNAMES, WORD_OBJECT_TYPE};
pub use result::{ExportResult, ExportStats};
pub use text::to_text;

use crate::error::Result;

/// Serialize records in the format chosen by `options`.
pub fn render(records: &[WordRecord], options: &ExportOptions) -> Result<String> {
    match options.format {
        OutputFormat::Csv => to_csv(records),
        OutputFormat::Json => to_json(records, options.json_format),
    }
}

/// Write records in the format chosen by `options`.
pub fn render_to<W: std::io::Write>(
    records: &[WordRecord],
    options: &ExportOptions,
    writer: W,
) -> Result<()> {
    match options.format {
        OutputFormat::Csv => write_csv(records, writer),
        OutputFormat::Json => write_json(records, options.json_format, writer),
    }
}
