//! CSV batch input and output
//!
//! Input files have an `id,value` header; output files carry
//! `id,status,output` with one row per input row.

use std::io::{Read, Write};

use crate::batch::{BatchItem, BatchRecord};
use crate::error::{AegisError, AegisResult};

/// Read batch items from CSV with an `id,value` header
pub fn read_batch_items<R: Read>(reader: R) -> AegisResult<Vec<BatchItem>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::Headers)
        .from_reader(reader);

    let mut items = Vec::new();
    for (line, row) in reader.deserialize::<BatchItem>().enumerate() {
        let item = row.map_err(|e| AegisError::Csv(format!("Row {}: {}", line + 1, e)))?;
        items.push(item);
    }
    Ok(items)
}

/// Write batch records as CSV with an `id,status,output` header
pub fn write_batch_records<W: Write>(writer: W, records: &[BatchRecord]) -> AegisResult<()> {
    let mut writer = ::csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
