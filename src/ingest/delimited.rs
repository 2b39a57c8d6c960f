use csv::ReaderBuilder;
use tracing::warn;

use crate::error::{PipelineError, Result};
use crate::ingest::sniff::detect_delimiter;
use crate::table::{Cell, Table};

/// Parse a delimited byte stream into a table. The delimiter is detected
/// from the stream (comma is not assumed); the first record is the header.
///
/// Row tolerance mirrors the lenient reader this replaces: records wider
/// than the header are skipped with a warning, records narrower are padded
/// with missing cells. Either way a bad record never aborts the read.
pub fn read_delimited(data: &[u8]) -> Result<Table> {
    let delimiter = detect_delimiter(data);
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut records = rdr.records();

    let header = loop {
        match records.next() {
            Some(Ok(r)) => break r,
            Some(Err(err)) => {
                return Err(PipelineError::Format(format!("bad header record: {err}")))
            }
            None => return Err(PipelineError::Format("no header record".into())),
        }
    };

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, field)| {
            if field.is_empty() {
                format!("column_{i}")
            } else {
                field.to_string()
            }
        })
        .collect();

    let mut table = Table::new(columns);
    let width = table.width();

    for (idx, record) in records.enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(err) => {
                warn!(record = idx + 1, %err, "skipping unparsable record");
                continue;
            }
        };
        if record.len() > width {
            warn!(
                record = idx + 1,
                fields = record.len(),
                expected = width,
                "skipping over-wide record"
            );
            continue;
        }
        let row: Vec<Cell> = record.iter().map(Cell::from_field).collect();
        table.push_row(row);
    }

    Ok(table)
}
