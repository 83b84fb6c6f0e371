//! Subcommands and their shared arguments.

pub(crate) mod crypto;
pub(crate) mod gainers;
pub(crate) mod inspect;
pub(crate) mod screen;
pub(crate) mod tickers;

use clap::Args;
use sift_screen::options::DEFAULT_LIMIT;
use sift_screen::{Metric, ScreenCriteria, ScreenOptions, ScreenRequest, SortOrder};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Filter thresholds. Every bound is inclusive and optional.
#[derive(Debug, Clone, Args)]
pub(crate) struct CriteriaArgs {
    /// JSON file with criteria and optional `sort_by`/`sort_order`; flags
    /// override its fields
    #[arg(long, value_name = "FILE")]
    criteria: Option<PathBuf>,

    /// Minimum price
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price
    #[arg(long)]
    max_price: Option<f64>,

    /// Minimum volume
    #[arg(long)]
    min_volume: Option<f64>,

    /// Maximum volume
    #[arg(long)]
    max_volume: Option<f64>,

    /// Minimum market capitalization
    #[arg(long)]
    min_market_cap: Option<f64>,

    /// Maximum market capitalization
    #[arg(long)]
    max_market_cap: Option<f64>,

    /// Minimum percent change
    #[arg(long = "min-change", allow_negative_numbers = true)]
    min_change_percent: Option<f64>,

    /// Maximum percent change
    #[arg(long = "max-change", allow_negative_numbers = true)]
    max_change_percent: Option<f64>,

    /// Minimum RSI
    #[arg(long)]
    min_rsi: Option<f64>,

    /// Maximum RSI
    #[arg(long)]
    max_rsi: Option<f64>,

    /// Require the price strictly above its SMA
    #[arg(long)]
    price_above_sma: bool,

    /// Maximum floating shares
    #[arg(long = "max-float")]
    max_float_shares: Option<f64>,

    /// Minimum relative volume (current day over baseline mean)
    #[arg(long = "min-rel-volume")]
    min_relative_volume: Option<f64>,
}

impl CriteriaArgs {
    /// Request from the file (or `base`), criteria overridden by any flags
    /// given.
    pub(crate) fn resolve(&self, base: ScreenCriteria) -> Result<ScreenRequest, Box<dyn Error>> {
        let mut request: ScreenRequest = match &self.criteria {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => base.into(),
        };
        let criteria = &mut request.criteria;

        criteria.min_price = self.min_price.or(criteria.min_price);
        criteria.max_price = self.max_price.or(criteria.max_price);
        criteria.min_volume = self.min_volume.or(criteria.min_volume);
        criteria.max_volume = self.max_volume.or(criteria.max_volume);
        criteria.min_market_cap = self.min_market_cap.or(criteria.min_market_cap);
        criteria.max_market_cap = self.max_market_cap.or(criteria.max_market_cap);
        criteria.min_change_percent = self.min_change_percent.or(criteria.min_change_percent);
        criteria.max_change_percent = self.max_change_percent.or(criteria.max_change_percent);
        criteria.min_rsi = self.min_rsi.or(criteria.min_rsi);
        criteria.max_rsi = self.max_rsi.or(criteria.max_rsi);
        criteria.max_float_shares = self.max_float_shares.or(criteria.max_float_shares);
        criteria.min_relative_volume = self.min_relative_volume.or(criteria.min_relative_volume);
        if self.price_above_sma {
            criteria.price_above_sma = Some(true);
        }

        tracing::debug!(filters = criteria.active_filters().len(), "criteria resolved");
        Ok(request)
    }
}

/// Ranking and worker settings.
#[derive(Debug, Clone, Args)]
pub(crate) struct RankArgs {
    /// Metric to rank by [default: change_percent]
    #[arg(long)]
    sort_by: Option<Metric>,

    /// Ranking direction, asc or desc [default: desc]
    #[arg(long)]
    order: Option<SortOrder>,

    /// Maximum number of results
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Symbols evaluated at once
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
}

impl RankArgs {
    /// Ranking metric: the flag, then the request file, then change percent.
    pub(crate) fn sort_by(&self, request: &ScreenRequest) -> Metric {
        self.sort_by.or(request.sort_by).unwrap_or(Metric::ChangePercent)
    }

    /// Apply ranking and concurrency to `options`. Flags win over the
    /// request file.
    pub(crate) fn apply(&self, options: ScreenOptions, request: &ScreenRequest) -> ScreenOptions {
        let order = self.order.or(request.sort_order).unwrap_or(SortOrder::Descending);
        options
            .sorted_by(self.sort_by(request), order)
            .with_limit(self.limit)
            .with_concurrency(self.concurrency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use sift_screen::{Filter, default_gainer_criteria};

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        criteria: CriteriaArgs,
        #[command(flatten)]
        rank: RankArgs,
    }

    fn parse(args: &[&str]) -> Harness {
        Harness::try_parse_from(std::iter::once("sift").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_build_criteria() {
        let harness = parse(&["--min-price", "5", "--min-change", "-2.5", "--price-above-sma"]);
        let criteria = harness.criteria.resolve(ScreenCriteria::default()).unwrap().criteria;
        assert_eq!(criteria.min_price, Some(5.0));
        assert_eq!(criteria.min_change_percent, Some(-2.5));
        assert_eq!(criteria.price_above_sma, Some(true));
        assert_eq!(criteria.max_price, None);
    }

    #[test]
    fn test_flags_override_gainer_defaults() {
        let harness = parse(&["--min-rel-volume", "3"]);
        let criteria = harness.criteria.resolve(default_gainer_criteria()).unwrap().criteria;
        assert_eq!(criteria.min_relative_volume, Some(3.0));
        assert_eq!(criteria.max_float_shares, Some(10_000_000.0));
        assert!(criteria.active_filters().contains(&Filter::Max(Metric::FloatShares, 10_000_000.0)));
    }

    #[test]
    fn test_rank_defaults_and_overrides() {
        let request = ScreenRequest::default();
        let defaults = parse(&[]).rank.apply(ScreenOptions::default(), &request);
        assert_eq!(defaults.sort_by, Metric::ChangePercent);
        assert_eq!(defaults.order, SortOrder::Descending);
        assert_eq!(defaults.limit, DEFAULT_LIMIT);

        let options = parse(&["--sort-by", "rsi", "--order", "asc", "--concurrency", "4"])
            .rank
            .apply(ScreenOptions::default(), &request);
        assert_eq!(options.sort_by, Metric::Rsi);
        assert_eq!(options.order, SortOrder::Ascending);
        assert_eq!(options.concurrency, 4);
    }

    #[test]
    fn test_criteria_file_ranking_is_used() {
        let path = std::env::temp_dir().join(format!("sift-criteria-{}.json", std::process::id()));
        fs::write(&path, r#"{"min_volume": 1000, "sort_by": "volume", "sort_order": "asc"}"#)
            .unwrap();
        let file = path.to_str().unwrap();

        let harness = parse(&["--criteria", file]);
        let request = harness.criteria.resolve(ScreenCriteria::default()).unwrap();
        assert_eq!(request.criteria.min_volume, Some(1000.0));
        let options = harness.rank.apply(ScreenOptions::default(), &request);
        assert_eq!(options.sort_by, Metric::Volume);
        assert_eq!(options.order, SortOrder::Ascending);

        let harness = parse(&["--criteria", file, "--sort-by", "price"]);
        let request = harness.criteria.resolve(ScreenCriteria::default()).unwrap();
        let options = harness.rank.apply(ScreenOptions::default(), &request);
        assert_eq!(options.sort_by, Metric::Price);
        assert_eq!(options.order, SortOrder::Ascending);

        fs::remove_file(&path).unwrap();
    }
}
