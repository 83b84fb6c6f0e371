//! `sift crypto`: screen the top coins, download history, raise alerts.

use super::{CriteriaArgs, RankArgs};
use crate::config::ClientArgs;
use crate::output::OutputArgs;
use crate::progress;
use clap::Args;
use sift_data::{Symbol, TickerQuery};
use sift_output::{
    DEFAULT_ALERT_THRESHOLD, ExportFormat, Exporter, Notifier, OhlcExport, TelegramNotifier,
    price_alerts, render_table,
};
use sift_screen::{IndicatorPlan, Metric, ScreenCriteria, ScreenOptions, Screener};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub(crate) struct CryptoArgs {
    /// Number of coins, by market cap
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Quote currency
    #[arg(long, default_value = "usd")]
    vs_currency: String,

    /// Save OHLC history for every coin as `{coin}_ohlc_{days}d.csv`
    #[arg(long)]
    ohlc: bool,

    /// Days of OHLC history
    #[arg(long, default_value_t = 365)]
    ohlc_days: u32,

    /// Directory for OHLC files
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Absolute 24h move, in percent, that raises an alert
    #[arg(long, default_value_t = DEFAULT_ALERT_THRESHOLD)]
    alert_threshold: f64,

    /// Send alerts to Telegram (TELEGRAM_TOKEN, TELEGRAM_CHAT_ID)
    #[arg(long)]
    notify: bool,

    #[command(flatten)]
    criteria: CriteriaArgs,

    #[command(flatten)]
    rank: RankArgs,

    #[command(flatten)]
    output: OutputArgs,
}

pub(crate) async fn run(args: CryptoArgs, clients: &ClientArgs) -> Result<(), Box<dyn Error>> {
    let request = args.criteria.resolve(ScreenCriteria::default())?;
    let criteria = request.criteria.clone();
    let notifier = args.notify.then(TelegramNotifier::from_env).transpose()?;
    let coingecko = Arc::new(clients.coingecko()?.with_vs_currency(args.vs_currency.as_str()));

    let query = TickerQuery {
        market: "crypto".to_string(),
        page_size: u32::try_from(args.top).unwrap_or(u32::MAX),
        max_results: args.top,
        types: Vec::new(),
        max_symbol_len: None,
        ..TickerQuery::default()
    };
    let universe: Vec<Symbol> = coingecko
        .top_coins(&query)
        .await?
        .into_iter()
        .map(|coin| coin.symbol)
        .collect();

    // the listing carries market cap but quotes do not
    let fetch_details = criteria.uses(Metric::MarketCap) || args.rank.sort_by(&request) == Metric::MarketCap;
    let options = args.rank.apply(
        ScreenOptions::default()
            .with_indicators(IndicatorPlan::none())
            .with_details(fetch_details),
        &request,
    );

    let pb = progress::bar(universe.len(), "quoting coins")?;
    let screener = Screener::new(coingecko.clone())
        .with_reference(coingecko.clone())
        .with_progress(progress::tick(&pb));
    let outcome = screener.screen(&universe, &criteria, &options).await;
    pb.finish_and_clear();
    let outcome = outcome?;

    args.output.emit("Crypto Screen", &outcome, render_table)?;

    if args.ohlc {
        std::fs::create_dir_all(&args.dir)?;
        for coin in &universe {
            match coingecko.ohlc(coin, args.ohlc_days).await {
                Ok(bars) => {
                    let export = OhlcExport::new(coin.clone(), args.ohlc_days, bars);
                    let path = args.dir.join(export.file_name(ExportFormat::Csv));
                    export.export_to_file(&path, ExportFormat::Csv)?;
                    eprintln!("Saved {}", path.display());
                }
                Err(e) => tracing::warn!(%coin, error = %e, "ohlc download failed"),
            }
        }
    }

    for alert in price_alerts(&outcome.results, args.alert_threshold) {
        eprintln!("ALERT: {}", alert);
        if let Some(notifier) = &notifier
            && let Err(e) = notifier.notify("Price alert", &alert.to_string()).await
        {
            tracing::warn!(symbol = %alert.symbol, error = %e, "alert not delivered");
        }
    }
    Ok(())
}
