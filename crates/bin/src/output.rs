//! Where and how a finished run is written.

use clap::{Args, ValueEnum};
use sift_output::{ExportFormat, Exporter, RunSummary, render_html};
use sift_screen::{ScreenOutcome, ScreenRecord};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Result rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Console table
    Table,
    /// CSV, one row per result
    Csv,
    /// JSON with results, exclusions and scan count
    Json,
    /// Standalone HTML page
    Html,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write results to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Also write dropped symbols and their reasons as CSV
    #[arg(long, value_name = "FILE")]
    exclusions: Option<PathBuf>,
}

impl OutputArgs {
    /// Render `outcome`, write it, and print the run summary to stderr.
    pub(crate) fn emit(
        &self,
        title: &str,
        outcome: &ScreenOutcome,
        table: impl FnOnce(&[ScreenRecord]) -> String,
    ) -> Result<(), Box<dyn Error>> {
        let summary = RunSummary::from_outcome(title, outcome);
        let rendered = match self.format {
            OutputFormat::Table => table(&outcome.results),
            OutputFormat::Csv => outcome.export_to_string(ExportFormat::Csv)?,
            OutputFormat::Json => outcome.export_to_string(ExportFormat::PrettyJson)?,
            OutputFormat::Html => render_html(title, &outcome.results, &summary),
        };

        match &self.output {
            Some(path) => {
                fs::write(path, rendered)?;
                eprintln!("Wrote {} results to {}", outcome.len(), path.display());
            }
            None => print!("{}", rendered),
        }

        if let Some(path) = &self.exclusions {
            outcome.exclusions.export_to_file(path, ExportFormat::Csv)?;
        }

        eprint!("{}", summary.to_ascii_table());
        Ok(())
    }
}
