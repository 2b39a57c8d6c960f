use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::table::{Cell, Table};

/// Write `table` as a single-sheet `.xlsx` workbook, header first. Numeric
/// cells stay numbers in the sheet; everything else is written as text.
pub fn write_spreadsheet(table: &Table, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in table.columns.iter().enumerate() {
        sheet.write_string(0, col as u16, name)?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = ((r + 1) as u32, c as u16);
            match cell {
                Cell::Number(n) => sheet.write_number(r, c, *n)?,
                other => sheet.write_string(r, c, other.render())?,
            };
        }
    }

    workbook.save(path)?;
    Ok(())
}
