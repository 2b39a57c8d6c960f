//! The four request-scoped operations. Each runs read → normalize →
//! [combine] → write synchronously and returns the path of the artifact it
//! wrote. Output filenames are fixed per operation; the directory is
//! caller-chosen, so nothing here depends on process-wide paths.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PipelineError, Result};
use crate::export::{write_table, OutputFormat};
use crate::ingest::{format_for, read_table, Format};
use crate::report::render_pdf;
use crate::table::combine::combine;
use crate::table::normalize::normalize;

pub const CLEAN_STEM: &str = "cleaned_data";
pub const MERGE_STEM: &str = "merged_data";

/// Read one table, normalize it, and serialize it in `format`.
#[tracing::instrument(level = "info", skip(input, out_dir), fields(input = %input.display()))]
pub fn clean(input: &Path, out_dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    let mut table = read_table(input)?;
    normalize(&mut table);

    let out = prepared(out_dir)?.join(format!("{CLEAN_STEM}.{}", format.extension()));
    write_table(&table, &out, format)?;
    info!(artifact = %out.display(), "clean finished");
    Ok(out)
}

/// Merge two delimited files into `merged_data.csv`. Both inputs must be
/// `.csv`; the operations for the two source formats are separate surfaces.
#[tracing::instrument(level = "info", skip_all)]
pub fn merge_csv(first: &Path, second: &Path, out_dir: &Path) -> Result<PathBuf> {
    merge(first, second, out_dir, Format::Delimited, OutputFormat::Csv)
}

/// Merge two spreadsheets into `merged_data.xlsx`.
#[tracing::instrument(level = "info", skip_all)]
pub fn merge_xlsx(first: &Path, second: &Path, out_dir: &Path) -> Result<PathBuf> {
    merge(
        first,
        second,
        out_dir,
        Format::Spreadsheet,
        OutputFormat::Xlsx,
    )
}

fn merge(
    first: &Path,
    second: &Path,
    out_dir: &Path,
    expect: Format,
    format: OutputFormat,
) -> Result<PathBuf> {
    for input in [first, second] {
        if format_for(input)? != expect {
            return Err(PipelineError::UnsupportedFormat(
                input.display().to_string(),
            ));
        }
    }
    let a = read_table(first)?;
    let b = read_table(second)?;
    let merged = combine(a, b);

    let out = prepared(out_dir)?.join(format!("{MERGE_STEM}.{}", format.extension()));
    write_table(&merged, &out, format)?;
    info!(artifact = %out.display(), "merge finished");
    Ok(out)
}

/// Read one table, normalize it, and render it as `cleaned_data.pdf`.
#[tracing::instrument(level = "info", skip(input, out_dir), fields(input = %input.display()))]
pub fn report(input: &Path, out_dir: &Path, title: &str) -> Result<PathBuf> {
    let mut table = read_table(input)?;
    normalize(&mut table);

    let out = prepared(out_dir)?.join(format!("{CLEAN_STEM}.pdf"));
    render_pdf(&table, title, &out)?;
    info!(artifact = %out.display(), "report finished");
    Ok(out)
}

fn prepared(out_dir: &Path) -> Result<&Path> {
    fs::create_dir_all(out_dir)?;
    Ok(out_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::FILL_SENTINEL;
    use std::io::Write;
    use tempfile::TempDir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,tablescrub=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn clean_writes_normalized_csv() {
        init_test_logging();
        let dir = TempDir::new().unwrap();
        let input = write_file(
            &dir,
            "in.csv",
            b"Name ,City\nada,london\nada,london\n,\ngrace,\n",
        );

        let out = clean(&input, &dir.path().join("out"), OutputFormat::Csv).unwrap();
        assert!(out.ends_with("cleaned_data.csv"));
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text, "name,city\nada,london\ngrace,Unknown\n");
    }

    #[test]
    fn clean_can_emit_xlsx() {
        init_test_logging();
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "in.csv", b"a,b\n1,2\n");
        let out = clean(&input, dir.path(), OutputFormat::Xlsx).unwrap();
        assert!(out.ends_with("cleaned_data.xlsx"));
        let back = crate::ingest::read_table(&out).unwrap();
        assert_eq!(back.columns, vec!["a", "b"]);
        assert_eq!(back.rows.len(), 1);
    }

    #[test]
    fn merge_csv_unions_columns_and_dedups() {
        init_test_logging();
        let dir = TempDir::new().unwrap();
        let first = write_file(&dir, "a.csv", b"id,name,city\n1,ada,london\n");
        let second = write_file(&dir, "b.csv", b"name,score\nada,99\n");

        let out = merge_csv(&first, &second, dir.path()).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            text,
            format!(
                "id,name,city,score\n1,ada,london,{s}\n{s},ada,{s},99\n",
                s = FILL_SENTINEL
            )
        );
    }

    #[test]
    fn merge_csv_rejects_wrong_extension() {
        init_test_logging();
        let dir = TempDir::new().unwrap();
        let first = write_file(&dir, "a.csv", b"a\n1\n");
        let second = write_file(&dir, "b.xlsx", b"");
        assert!(matches!(
            merge_csv(&first, &second, dir.path()),
            Err(PipelineError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn report_renders_pdf_artifact() {
        init_test_logging();
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "in.csv", b"name,score\nada,99\ngrace,85\n");
        let out = report(&input, dir.path(), "Cleaned Data Report").unwrap();
        assert!(out.ends_with("cleaned_data.pdf"));
        assert!(lopdf::Document::load(&out).is_ok());
    }

    #[test]
    fn missing_input_surfaces_before_any_write() {
        init_test_logging();
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("out");
        let err = clean(
            &dir.path().join("absent.csv"),
            &out_dir,
            OutputFormat::Csv,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput(_)));
        assert!(!out_dir.join("cleaned_data.csv").exists());
    }
}
