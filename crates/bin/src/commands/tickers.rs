//! `sift tickers`: list tradable symbols.

use crate::config::ClientArgs;
use clap::Args;
use sift_data::TickerQuery;
use std::error::Error;

#[derive(Debug, Args)]
pub(crate) struct TickersArgs {
    /// Market to list
    #[arg(long, default_value = "stocks")]
    market: String,

    /// Maximum number of tickers
    #[arg(long, default_value_t = 1000)]
    limit: usize,

    /// Keep every instrument type and symbol length
    #[arg(long)]
    all_types: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub(crate) async fn run(args: TickersArgs, clients: &ClientArgs) -> Result<(), Box<dyn Error>> {
    let polygon = clients.polygon()?;
    let mut query = TickerQuery {
        market: args.market,
        max_results: args.limit,
        ..TickerQuery::default()
    };
    if args.all_types {
        query.types.clear();
        query.max_symbol_len = None;
    }

    let tickers = polygon.tickers(&query).await?;
    tracing::info!(count = tickers.len(), "tickers listed");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tickers)?);
        return Ok(());
    }
    for info in &tickers {
        println!(
            "{:<8} {:<6} {}",
            info.symbol,
            info.ticker_type.as_deref().unwrap_or("-"),
            info.name.as_deref().unwrap_or("-")
        );
    }
    eprintln!("{} tickers", tickers.len());
    Ok(())
}
