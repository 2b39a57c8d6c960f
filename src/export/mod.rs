pub mod delimited;
pub mod spreadsheet;

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::table::Table;

/// Serialization formats for the clean/merge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Xlsx,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
        }
    }
}

/// Serialize `table` to `path` in the requested format.
#[tracing::instrument(level = "info", skip(table, path), fields(path = %path.display()))]
pub fn write_table(table: &Table, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => delimited::write_delimited(table, path)?,
        OutputFormat::Xlsx => spreadsheet::write_spreadsheet(table, path)?,
    }
    info!(rows = table.rows.len(), "wrote table");
    Ok(())
}
