pub mod error;
pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod report;
pub mod table;

pub use error::{PipelineError, Result};
pub use table::{Cell, Table, FILL_SENTINEL};
