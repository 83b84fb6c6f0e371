//! `sift gainers`: low-float momentum scan over the top gainers feed.

use super::{CriteriaArgs, RankArgs};
use crate::config::ClientArgs;
use crate::output::OutputArgs;
use crate::progress;
use clap::Args;
use sift_data::GainerQuery;
use sift_output::{Notifier, TelegramNotifier, gainer_digest};
use sift_screen::volume::DEFAULT_LOOKBACK_DAYS;
use sift_screen::{
    BaselineWindow, GainerScan, IndicatorPlan, Metric, ScreenError, ScreenOptions, VolumeWindow,
    default_gainer_criteria,
};
use std::error::Error;
use std::sync::Arc;

/// Defaults: float at most 10M shares and relative volume of at least 5x.
#[derive(Debug, Args)]
pub(crate) struct GainersArgs {
    /// Lowest price requested from the feed
    #[arg(long, default_value_t = 1.0)]
    feed_min_price: f64,

    /// Highest price requested from the feed
    #[arg(long, default_value_t = 20.0)]
    feed_max_price: f64,

    /// Lowest percent change requested from the feed
    #[arg(long, default_value_t = 10.0)]
    feed_min_change: f64,

    /// Candidates requested from the feed
    #[arg(long, default_value_t = 50)]
    feed_limit: u32,

    /// Comma-separated exchanges (default NASDAQ,NYSE)
    #[arg(long, value_delimiter = ',')]
    exchanges: Vec<String>,

    /// Days of intraday history behind relative volume
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
    lookback_days: i64,

    /// Leave today's buckets out of the relative-volume baseline
    #[arg(long)]
    exclude_current: bool,

    /// Send hits to Telegram (TELEGRAM_TOKEN, TELEGRAM_CHAT_ID)
    #[arg(long)]
    notify: bool,

    #[command(flatten)]
    criteria: CriteriaArgs,

    #[command(flatten)]
    rank: RankArgs,

    #[command(flatten)]
    output: OutputArgs,
}

pub(crate) async fn run(args: GainersArgs, clients: &ClientArgs) -> Result<(), Box<dyn Error>> {
    let request = args.criteria.resolve(default_gainer_criteria())?;
    let criteria = request.criteria.clone();
    let notifier = args.notify.then(TelegramNotifier::from_env).transpose()?;
    let eodhd = Arc::new(clients.eodhd()?);

    let defaults = GainerQuery::default();
    let query = GainerQuery {
        exchanges: if args.exchanges.is_empty() {
            defaults.exchanges
        } else {
            args.exchanges
        },
        min_price: Some(args.feed_min_price),
        max_price: Some(args.feed_max_price),
        min_change_percent: Some(args.feed_min_change),
        limit: args.feed_limit,
        market: defaults.market,
    };

    let window = VolumeWindow {
        lookback_days: args.lookback_days,
        baseline: if args.exclude_current {
            BaselineWindow::ExcludeCurrent
        } else {
            BaselineWindow::IncludeCurrent
        },
        ..VolumeWindow::default()
    };
    let mut options = args
        .rank
        .apply(ScreenOptions::for_gainers(), &request)
        .with_volume_window(window);

    let pb = progress::spinner("scanning gainers")?;
    let mut scan = GainerScan::new(eodhd.clone(), eodhd.clone(), eodhd).with_progress(progress::tick(&pb));
    if criteria.uses(Metric::Rsi) || criteria.uses(Metric::PriceToSma) {
        let polygon = Arc::new(clients.polygon()?);
        scan = scan.with_indicators(polygon);
        options = options.with_indicators(IndicatorPlan::default());
    }

    let result = scan.scan(&query, &criteria, &options).await;
    pb.finish_and_clear();
    let outcome = match result {
        Err(ScreenError::EmptyUniverse) => {
            println!("No gainers reported by the feed.");
            return Ok(());
        }
        other => other?,
    };

    let title = format!(
        "Top Gainers (Price ${}-${}, >{}% Up)",
        args.feed_min_price, args.feed_max_price, args.feed_min_change
    );
    args.output.emit(&title, &outcome, |records| {
        format!("{}:\n{}\n", title, gainer_digest(records))
    })?;

    if let Some(notifier) = notifier {
        if outcome.is_empty() {
            tracing::info!("no hits, skipping notification");
        } else {
            notifier.notify(&title, &gainer_digest(&outcome.results)).await?;
            tracing::info!(hits = outcome.len(), "notification sent");
        }
    }
    Ok(())
}
