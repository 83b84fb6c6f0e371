//! `sift screen`: criteria screen over a stock universe.

use super::{CriteriaArgs, RankArgs};
use crate::config::ClientArgs;
use crate::output::OutputArgs;
use crate::progress;
use clap::{Args, ValueEnum};
use sift::{GicsSector, LargeCapUniverse, Universe};
use sift_data::{IndicatorSpec, Symbol, TickerQuery};
use sift_output::render_table;
use sift_screen::{IndicatorPlan, Metric, ScreenCriteria, ScreenOptions, Screener};
use std::error::Error;
use std::sync::Arc;

/// Where the symbols come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum UniverseKind {
    /// Fifty popular large caps
    LargeCap,
    /// Every active common stock and ETF listed by Polygon
    Listed,
}

#[derive(Debug, Args)]
pub(crate) struct ScreenArgs {
    /// Comma-separated symbols to screen instead of a universe
    #[arg(long, value_delimiter = ',')]
    symbols: Vec<String>,

    /// Universe to screen
    #[arg(long, value_enum, default_value_t = UniverseKind::LargeCap)]
    universe: UniverseKind,

    /// Restrict the large-cap universe to one GICS sector
    #[arg(long)]
    sector: Option<GicsSector>,

    /// Cap on tickers taken from the listing
    #[arg(long, default_value_t = TickerQuery::MAX_UNIVERSE)]
    max_tickers: usize,

    /// Skip name, market cap and sector lookups
    #[arg(long)]
    no_details: bool,

    /// Daily SMA window (0 disables)
    #[arg(long, default_value_t = 50)]
    sma_window: u32,

    /// Daily RSI window (0 disables)
    #[arg(long, default_value_t = 14)]
    rsi_window: u32,

    #[command(flatten)]
    criteria: CriteriaArgs,

    #[command(flatten)]
    rank: RankArgs,

    #[command(flatten)]
    output: OutputArgs,
}

pub(crate) async fn run(args: ScreenArgs, clients: &ClientArgs) -> Result<(), Box<dyn Error>> {
    let request = args.criteria.resolve(ScreenCriteria::default())?;
    let criteria = request.criteria.clone();
    let plan = IndicatorPlan {
        sma: (args.sma_window > 0).then(|| IndicatorSpec::sma(args.sma_window)),
        rsi: (args.rsi_window > 0).then(|| IndicatorSpec::rsi(args.rsi_window)),
    };
    let options = args.rank.apply(
        ScreenOptions::default()
            .with_indicators(plan)
            .with_details(!args.no_details),
        &request,
    );

    // build every client before the first request
    let polygon = Arc::new(clients.polygon()?);
    let mut screener = Screener::new(polygon.clone())
        .with_indicators(polygon.clone())
        .with_reference(polygon.clone());
    if criteria.uses(Metric::FloatShares) || criteria.uses(Metric::RelativeVolume) {
        let eodhd = Arc::new(clients.eodhd()?);
        screener = screener.with_fundamentals(eodhd.clone()).with_volume(eodhd);
    }

    let (pb, outcome) = match explicit_universe(&args) {
        Some(universe) => {
            let pb = progress::bar(universe.len(), "screening")?;
            let screener = screener.with_progress(progress::tick(&pb));
            (pb, screener.screen(&universe, &criteria, &options).await)
        }
        None => {
            let query = TickerQuery {
                max_results: args.max_tickers,
                ..TickerQuery::default()
            };
            let pb = progress::spinner("screening listed tickers")?;
            let screener = screener.with_progress(progress::tick(&pb));
            let outcome = screener
                .screen_listed(&*polygon, &query, &criteria, &options)
                .await;
            (pb, outcome)
        }
    };
    pb.finish_and_clear();
    let outcome = outcome?;

    args.output.emit("Stock Screen", &outcome, render_table)
}

/// Symbols named on the command line or taken from a static universe;
/// `None` when the universe comes from the ticker listing.
fn explicit_universe(args: &ScreenArgs) -> Option<Vec<Symbol>> {
    if !args.symbols.is_empty() {
        return Some(
            args.symbols
                .iter()
                .map(|s| Symbol::new(s.trim().to_uppercase()))
                .filter(|s| !s.is_empty())
                .collect(),
        );
    }
    match args.universe {
        UniverseKind::LargeCap => {
            let mut universe = LargeCapUniverse::new();
            if let Some(sector) = args.sector {
                universe = universe.in_sector(sector);
            }
            Some(universe.symbols())
        }
        UniverseKind::Listed => None,
    }
}
