use std::path::PathBuf;
use thiserror::Error;

/// Everything the pipeline can fail with. Malformed individual rows are not
/// errors (the readers skip them); these are the structural failures that
/// abort an invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input's extension is neither `.csv` nor `.xlsx`.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A stream was present but could not be parsed as its declared format.
    #[error("unparsable input: {0}")]
    Format(String),

    /// An expected input file was not supplied or does not exist.
    #[error("missing input: {}", .0.display())]
    MissingInput(PathBuf),

    /// A zero-column table reached the renderer; column-width layout would
    /// divide by zero.
    #[error("table has no columns")]
    EmptyTable,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet read: {0}")]
    SpreadsheetRead(#[from] calamine::XlsxError),

    #[error("spreadsheet write: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("pdf: {0}")]
    Pdf(#[from] lopdf::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
