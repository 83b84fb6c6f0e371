//! Flat-file export of screening results and price history.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sift_data::{OhlcBar, Symbol};
use sift_screen::{Exclusion, ScreenOutcome, ScreenRecord};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writer produced bytes that are not UTF-8
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Unknown export format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values, one row per record
    Csv,
    /// Compact JSON
    Json,
    /// Indented JSON
    PrettyJson,
}

impl ExportFormat {
    /// File extension for this format.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" => Ok(Self::PrettyJson),
            _ => Err(ExportError::InvalidFormat(s.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<()> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        tracing::info!(path = %path.display(), "exported");
        Ok(())
    }
}

fn to_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn to_json<T: Serialize + ?Sized>(value: &T, format: ExportFormat) -> Result<String> {
    Ok(match format {
        ExportFormat::PrettyJson => serde_json::to_string_pretty(value)?,
        _ => serde_json::to_string(value)?,
    })
}

/// One CSV row per record; JSON keeps the full record.
impl Exporter for [ScreenRecord] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => to_csv(self),
            _ => to_json(self, format),
        }
    }
}

/// CSV carries the ranked results only; JSON carries results, exclusions
/// and the scan count.
impl Exporter for ScreenOutcome {
    fn export_to_string(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => self.results.export_to_string(format),
            _ => to_json(self, format),
        }
    }
}

#[derive(Serialize)]
struct ExclusionRow<'a> {
    symbol: &'a str,
    reason: &'static str,
    detail: String,
}

/// Dropped symbols with their reason, for auditing a run.
impl Exporter for [Exclusion] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => to_csv(self.iter().map(|e| ExclusionRow {
                symbol: e.symbol.as_str(),
                reason: e.reason.label(),
                detail: e.reason.to_string(),
            })),
            _ => to_json(self, format),
        }
    }
}

/// Candle history for one coin over a trailing window of days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhlcExport {
    /// Coin id
    pub coin: Symbol,
    /// Window length in days
    pub days: u32,
    /// Candles, oldest first
    pub bars: Vec<OhlcBar>,
}

#[derive(Serialize)]
struct OhlcRow {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    datetime: String,
}

impl OhlcExport {
    /// Create a new export.
    pub const fn new(coin: Symbol, days: u32, bars: Vec<OhlcBar>) -> Self {
        Self { coin, days, bars }
    }

    /// Conventional file name, e.g. `bitcoin_ohlc_365d.csv`.
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!("{}_ohlc_{}d.{}", self.coin, self.days, format.extension())
    }

    fn rows(&self) -> impl Iterator<Item = OhlcRow> + '_ {
        self.bars.iter().map(|bar| OhlcRow {
            timestamp: bar.timestamp.timestamp_millis(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            datetime: iso(bar.timestamp),
        })
    }
}

fn iso(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Exporter for OhlcExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => to_csv(self.rows()),
            _ => to_json(self, format),
        }
    }
}
