//! sift CLI binary.
//!
//! Screens stocks and crypto against price, volume and indicator criteria.

mod commands;
mod config;
mod logging;
mod output;
mod progress;

use clap::{Parser, Subcommand};
use commands::crypto::CryptoArgs;
use commands::gainers::GainersArgs;
use commands::inspect::InspectArgs;
use commands::screen::ScreenArgs;
use commands::tickers::TickersArgs;
use config::ClientArgs;
use logging::LogFormat;
use std::process;

#[derive(Debug, Parser)]
#[command(name = "sift")]
#[command(about = "sift: stock and crypto screener", long_about = None)]
#[command(version)]
struct Cli {
    /// Log line format
    #[arg(long, value_enum, env = "SIFT_LOG_FORMAT", default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(flatten)]
    clients: ClientArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Screen a stock universe against criteria
    Screen(ScreenArgs),

    /// Scan today's top gainers for low float and unusual volume
    Gainers(GainersArgs),

    /// Show details, SMA 50/200 and RSI 14 for one stock
    Inspect(InspectArgs),

    /// List tradable tickers
    Tickers(TickersArgs),

    /// Screen top coins by market cap and alert on large moves
    Crypto(CryptoArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_error = config::load_dotenv();
    let cli = Cli::parse();
    logging::init(cli.log_format);
    if let Some(e) = dotenv_error {
        tracing::warn!(error = %e, "could not read .env");
    }

    match cli.command {
        Commands::Screen(args) => commands::screen::run(args, &cli.clients).await,
        Commands::Gainers(args) => commands::gainers::run(args, &cli.clients).await,
        Commands::Inspect(args) => commands::inspect::run(args, &cli.clients).await,
        Commands::Tickers(args) => commands::tickers::run(args, &cli.clients).await,
        Commands::Crypto(args) => commands::crypto::run(args, &cli.clients).await,
    }
}
