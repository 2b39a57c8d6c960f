pub mod delimited;
pub mod sniff;
pub mod spreadsheet;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{PipelineError, Result};
use crate::table::Table;

/// Input formats the reader understands, classified by filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Delimited,
    Spreadsheet,
}

/// Classify `path` by extension: `.csv` → delimited, `.xlsx` → spreadsheet,
/// anything else is unsupported. Matching is case-insensitive.
pub fn format_for(path: &Path) -> Result<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => Ok(Format::Delimited),
        "xlsx" => Ok(Format::Spreadsheet),
        _ => Err(PipelineError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}

/// Read `path` into a table, dispatching on its extension. A path that does
/// not point at a file is a missing input, not a parse failure.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.display()))]
pub fn read_table(path: &Path) -> Result<Table> {
    let format = format_for(path)?;
    if !path.is_file() {
        return Err(PipelineError::MissingInput(path.to_path_buf()));
    }

    let table = match format {
        Format::Delimited => delimited::read_delimited(&fs::read(path)?)?,
        Format::Spreadsheet => spreadsheet::read_spreadsheet(path)?,
    };
    info!(
        columns = table.width(),
        rows = table.rows.len(),
        "read table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn classifies_extensions() {
        assert_eq!(format_for(Path::new("a.csv")).unwrap(), Format::Delimited);
        assert_eq!(format_for(Path::new("a.CSV")).unwrap(), Format::Delimited);
        assert_eq!(
            format_for(Path::new("a.xlsx")).unwrap(),
            Format::Spreadsheet
        );
        assert!(matches!(
            format_for(Path::new("a.txt")),
            Err(PipelineError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            format_for(Path::new("noext")),
            Err(PipelineError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn absent_file_is_missing_input() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            read_table(&dir.path().join("gone.csv")),
            Err(PipelineError::MissingInput(_))
        ));
    }

    #[test]
    fn reads_csv_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"x,y\n1,2\n").unwrap();
        let t = read_table(&path).unwrap();
        assert_eq!(t.columns, vec!["x", "y"]);
        assert_eq!(t.rows.len(), 1);
    }
}
