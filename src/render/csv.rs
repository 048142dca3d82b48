//! CSV output for word records.

use std::io::Write;

use csv::WriterBuilder;

use super::record::{WordRecord, FIELDNAMES};
use crate::error::{Error, Result};

/// Write records as CSV.
///
/// The header row is always written, so an empty selection still yields a
/// valid file with column names.
pub fn write_csv<W: Write>(records: &[WordRecord], writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(FIELDNAMES)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Convert records to a CSV string.
pub fn to_csv(records: &[WordRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::Render(format!("CSV output is not UTF-8: {}", e)))
}
