//! `sift inspect`: detail view of one stock.

use crate::config::ClientArgs;
use clap::Args;
use sift_data::Symbol;
use sift_output::render_detail;
use sift_screen::Screener;
use std::error::Error;
use std::sync::Arc;

#[derive(Debug, Args)]
pub(crate) struct InspectArgs {
    /// Ticker symbol
    symbol: String,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub(crate) async fn run(args: InspectArgs, clients: &ClientArgs) -> Result<(), Box<dyn Error>> {
    let polygon = Arc::new(clients.polygon()?);
    let screener = Screener::new(polygon.clone())
        .with_indicators(polygon.clone())
        .with_reference(polygon);

    let detail = screener
        .inspect(&Symbol::new(args.symbol.trim().to_uppercase()))
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print!("{}", render_detail(&detail));
    }
    Ok(())
}
