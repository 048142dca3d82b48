//! JSON output for word records.

use std::io::Write;

use super::record::WordRecord;
use super::JsonFormat;
use crate::error::{Error, Result};

/// Convert records to a JSON array.
pub fn to_json(records: &[WordRecord], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(records),
        JsonFormat::Compact => serde_json::to_string(records),
    };

    result.map_err(json_error)
}

/// Write records as a JSON array.
pub fn write_json<W: Write>(records: &[WordRecord], format: JsonFormat, writer: W) -> Result<()> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(writer, records),
        JsonFormat::Compact => serde_json::to_writer(writer, records),
    };

    result.map_err(json_error)
}

fn json_error(e: serde_json::Error) -> Error {
    Error::Render(format!("JSON serialization error: {}", e))
}
