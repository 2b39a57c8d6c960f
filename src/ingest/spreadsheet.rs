use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::table::{Cell, Table};

/// Read the first worksheet of an `.xlsx` workbook. The first row is the
/// header; every other row becomes a table row, cells read as-is.
pub fn read_spreadsheet(path: &Path) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PipelineError::Format("workbook has no worksheets".into()))??;

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(r) => r,
        None => return Ok(Table::new(Vec::new())),
    };

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Data::Empty => format!("column_{i}"),
            other => other.to_string(),
        })
        .collect();

    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(row.iter().map(cell_value).collect());
    }

    debug!(
        columns = table.width(),
        rows = table.rows.len(),
        "read worksheet"
    );
    Ok(table)
}

fn cell_value(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Missing,
        Data::String(s) if s.is_empty() => Cell::Missing,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        other => Cell::Text(other.to_string()),
    }
}
