use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tablescrub::export::OutputFormat;
use tablescrub::pipeline;
use tablescrub::report::DEFAULT_TITLE;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "tablescrub", about = "Clean, merge, and report tabular files")]
struct Cli {
    /// Directory artifacts are written into.
    #[arg(long, default_value = "cleaned", global = true)]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize one csv/xlsx file and re-emit it as cleaned_data.<ext>.
    Clean {
        input: PathBuf,
        /// Output serialization for the cleaned table.
        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,
    },
    /// Merge two csv files into merged_data.csv.
    MergeCsv { first: PathBuf, second: PathBuf },
    /// Merge two xlsx workbooks into merged_data.xlsx.
    MergeXlsx { first: PathBuf, second: PathBuf },
    /// Normalize one csv/xlsx file and render it as cleaned_data.pdf.
    Report {
        input: PathBuf,
        /// Title centered above the table on the first page.
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,
    },
}

fn main() -> Result<()> {
    // ─── init logging ────────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();

    // ─── run the requested operation ─────────────────────────────────
    let artifact = match cli.command {
        Command::Clean { input, format } => pipeline::clean(&input, &cli.out_dir, format)?,
        Command::MergeCsv { first, second } => {
            pipeline::merge_csv(&first, &second, &cli.out_dir)?
        }
        Command::MergeXlsx { first, second } => {
            pipeline::merge_xlsx(&first, &second, &cli.out_dir)?
        }
        Command::Report { input, title } => pipeline::report(&input, &cli.out_dir, &title)?,
    };

    info!(artifact = %artifact.display(), "done");
    println!("{}", artifact.display());
    Ok(())
}
