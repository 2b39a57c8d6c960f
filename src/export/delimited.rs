use std::path::Path;

use csv::Writer;

use crate::error::Result;
use crate::table::Table;

/// Write `table` as comma-delimited text, header first.
pub fn write_delimited(table: &Table, path: &Path) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|cell| cell.render()))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use tempfile::TempDir;

    #[test]
    fn round_trips_through_disk() {
        let table = Table {
            columns: vec!["name".into(), "score".into()],
            rows: vec![
                vec![Cell::Text("ada".into()), Cell::Number(99.0)],
                vec![Cell::Text("grace".into()), Cell::Number(85.5)],
            ],
        };
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_delimited(&table, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "name,score\nada,99\ngrace,85.5\n");
    }
}
