pub mod layout;
pub mod pdf;

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::table::Table;

/// Default title, matching the clean operation's artifact.
pub const DEFAULT_TITLE: &str = "Cleaned Data Report";

/// Render a normalized table as a paginated A4 PDF at `path`.
///
/// Fails with [`crate::error::PipelineError::EmptyTable`] before touching
/// the filesystem if the table has no columns; the document is assembled
/// fully in memory and only then written out.
#[tracing::instrument(level = "info", skip(table, path), fields(path = %path.display()))]
pub fn render_pdf(table: &Table, title: &str, path: &Path) -> Result<()> {
    let layout = layout::paginate(table)?;
    let mut doc = pdf::build_document(table, &layout, title)?;
    doc.save(path)?;
    info!(
        pages = layout.pages.len(),
        rows = table.rows.len(),
        "wrote report"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::table::Cell;
    use lopdf::Document;
    use tempfile::TempDir;

    fn table_with_rows(n: usize) -> Table {
        let mut t = Table::new(vec!["name".into(), "value".into()]);
        for i in 0..n {
            t.push_row(vec![
                Cell::Text(format!("row {i}")),
                Cell::Number(i as f64),
            ]);
        }
        t
    }

    #[test]
    fn zero_column_table_fails_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");
        let err = render_pdf(&Table::new(Vec::new()), DEFAULT_TITLE, &path).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyTable));
        assert!(!path.exists());
    }

    #[test]
    fn single_page_report_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");
        render_pdf(&table_with_rows(5), DEFAULT_TITLE, &path).unwrap();
        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn long_table_repeats_header_across_pages() {
        let table = table_with_rows(200);
        let layout = layout::paginate(&table).unwrap();
        assert!(layout.pages.len() > 1);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");
        render_pdf(&table, DEFAULT_TITLE, &path).unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), layout.pages.len());
        // the header text shows up in every page's content stream
        for (_, page_id) in doc.get_pages() {
            let content = doc.get_page_content(page_id).unwrap();
            let text = String::from_utf8_lossy(&content).into_owned();
            assert!(text.contains("name"), "header missing from a page");
        }
    }
}
