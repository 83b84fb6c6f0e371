//! End-to-end screening runs over canned sources.

use approx::assert_relative_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sift_data::memory::{InMemorySource, quote};
use sift_data::{GainerCandidate, GainerQuery, IndicatorSpec, Symbol, TickerQuery, VolumeBar};
use sift_screen::{
    BaselineWindow, ExclusionReason, Filter, GainerScan, IndicatorPlan, Metric, ScreenCriteria,
    ScreenError, ScreenOptions, Screener, SortOrder, VolumeWindow, default_gainer_criteria,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn symbols(names: &[&str]) -> Vec<Symbol> {
    names.iter().map(|s| Symbol::new(*s)).collect()
}

fn result_symbols(outcome: &sift_screen::ScreenOutcome) -> Vec<&str> {
    outcome.results.iter().map(|r| r.symbol.as_str()).collect()
}

fn reason_for<'a>(outcome: &'a sift_screen::ScreenOutcome, symbol: &str) -> &'a ExclusionReason {
    &outcome
        .exclusions
        .iter()
        .find(|e| e.symbol.as_str() == symbol)
        .unwrap_or_else(|| panic!("{} was not excluded", symbol))
        .reason
}

fn plain_options() -> ScreenOptions {
    ScreenOptions::default()
        .with_indicators(IndicatorPlan::none())
        .with_details(false)
}

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 21, 0, 0).unwrap()
}

/// Buckets 15 minutes apart from 09:00 on `day` (at most 45 fit the day).
fn buckets(day: u32, volumes: &[f64]) -> Vec<VolumeBar> {
    let open = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
    volumes
        .iter()
        .enumerate()
        .map(|(i, v)| VolumeBar {
            timestamp: open + Duration::minutes(15 * i as i64),
            volume: *v,
        })
        .collect()
}

fn candidate(symbol: &str, price: f64, change_percent: f64) -> GainerCandidate {
    GainerCandidate {
        symbol: Symbol::new(symbol),
        name: Some(format!("{} Inc", symbol)),
        price,
        change_percent,
        volume: None,
        exchange: Some("NASDAQ".to_string()),
        market_cap: None,
    }
}

#[tokio::test]
async fn test_change_filter_scenario() {
    let source = Arc::new(
        InMemorySource::new()
            .with_quote(quote("A", 10.0, 12.0, 1e6))
            .with_quote(quote("B", 5.0, 4.5, 1e6))
            .with_quote(quote("C", 1.0, 1.0, 1e6))
            .failing_for("C"),
    );
    let criteria = ScreenCriteria {
        min_change_percent: Some(10.0),
        ..ScreenCriteria::default()
    };

    let outcome = Screener::new(source)
        .screen(&symbols(&["A", "B", "C"]), &criteria, &plain_options())
        .await
        .unwrap();

    assert_eq!(result_symbols(&outcome), vec!["A"]);
    assert_relative_eq!(outcome.results[0].change_percent, 20.0);
    assert_eq!(
        reason_for(&outcome, "B"),
        &ExclusionReason::FailedCriteria(vec![Filter::Min(Metric::ChangePercent, 10.0)])
    );
    assert!(matches!(reason_for(&outcome, "C"), ExclusionReason::FetchFailed(_)));
    assert_eq!(outcome.scanned, 3);
}

#[tokio::test]
async fn test_empty_criteria_return_every_quotable_symbol() {
    let source = Arc::new(
        InMemorySource::new()
            .with_quote(quote("A", 10.0, 11.0, 1.0))
            .with_quote(quote("B", 10.0, 9.0, 1.0))
            .with_quote(quote("D", 10.0, 10.0, 0.0)),
    );

    let outcome = Screener::new(source)
        .screen(
            &symbols(&["A", "B", "C", "D"]),
            &ScreenCriteria::default(),
            &plain_options(),
        )
        .await
        .unwrap();

    assert_eq!(result_symbols(&outcome), vec!["A", "D", "B"]);
    assert_eq!(reason_for(&outcome, "C"), &ExclusionReason::NoQuote);
}

#[tokio::test]
async fn test_size_cap_applies_without_criteria() {
    let mut source = InMemorySource::new();
    let names: Vec<String> = (0..60).map(|i| format!("S{:02}", i)).collect();
    for (i, name) in names.iter().enumerate() {
        source = source.with_quote(quote(name, 100.0, 100.0 + i as f64, 1.0));
    }
    let universe: Vec<Symbol> = names.iter().map(|n| Symbol::new(n.as_str())).collect();

    let outcome = Screener::new(Arc::new(source))
        .screen(&universe, &ScreenCriteria::default(), &plain_options())
        .await
        .unwrap();

    assert_eq!(outcome.len(), 50);
    assert_eq!(outcome.results[0].symbol.as_str(), "S59");
}

#[tokio::test]
async fn test_conjunction_holds_for_every_result() {
    let source = Arc::new(
        InMemorySource::new()
            .with_quote(quote("CHEAP", 2.0, 2.2, 5e6))
            .with_quote(quote("THIN", 50.0, 55.0, 1e3))
            .with_quote(quote("GOOD", 50.0, 52.0, 5e6))
            .with_quote(quote("FLAT", 50.0, 50.0, 5e6))
            .with_quote(quote("BEST", 20.0, 21.0, 2e7)),
    );
    let criteria = ScreenCriteria {
        min_price: Some(5.0),
        min_volume: Some(1e6),
        min_change_percent: Some(1.0),
        max_change_percent: Some(8.0),
        ..ScreenCriteria::default()
    };

    let outcome = Screener::new(source)
        .screen(
            &symbols(&["CHEAP", "THIN", "GOOD", "FLAT", "BEST"]),
            &criteria,
            &plain_options(),
        )
        .await
        .unwrap();

    assert_eq!(result_symbols(&outcome), vec!["BEST", "GOOD"]);
    for record in &outcome.results {
        assert!(criteria.matches(record));
        assert!(record.price >= 5.0);
        assert!(record.volume.unwrap() >= 1e6);
        assert!((1.0..=8.0).contains(&record.change_percent));
    }
}

#[tokio::test]
async fn test_zero_open_is_excluded_not_fatal() {
    let source = Arc::new(
        InMemorySource::new()
            .with_quote(quote("ZERO", 0.0, 3.0, 1.0))
            .with_quote(quote("OK", 1.0, 1.1, 1.0)),
    );

    let outcome = Screener::new(source)
        .screen(&symbols(&["ZERO", "OK"]), &ScreenCriteria::default(), &plain_options())
        .await
        .unwrap();

    assert_eq!(result_symbols(&outcome), vec!["OK"]);
    assert_eq!(reason_for(&outcome, "ZERO"), &ExclusionReason::DivisionUndefined);
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let source = Arc::new(
        InMemorySource::new()
            .with_quote(quote("A", 10.0, 11.0, 1.0))
            .with_quote(quote("B", 10.0, 11.0, 1.0))
            .with_quote(quote("C", 10.0, 12.0, 1.0)),
    );
    let screener = Screener::new(source);
    let universe = symbols(&["A", "B", "C"]);

    let first = screener
        .screen(&universe, &ScreenCriteria::default(), &plain_options())
        .await
        .unwrap();
    let second = screener
        .screen(&universe, &ScreenCriteria::default(), &plain_options())
        .await
        .unwrap();

    assert_eq!(first, second);
    // ties keep fetch order
    assert_eq!(result_symbols(&first), vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_concurrency_does_not_change_output() {
    let build = || {
        Arc::new(
            InMemorySource::new()
                .with_quote(quote("A", 10.0, 10.5, 1.0))
                .with_quote(quote("B", 10.0, 11.0, 1.0))
                .with_quote(quote("C", 10.0, 10.5, 1.0))
                .with_quote(quote("D", 10.0, 9.0, 1.0)),
        )
    };
    let universe = symbols(&["A", "B", "C", "D"]);

    let sequential = Screener::new(build())
        .screen(&universe, &ScreenCriteria::default(), &plain_options())
        .await
        .unwrap();
    let parallel = Screener::new(build())
        .screen(
            &universe,
            &ScreenCriteria::default(),
            &plain_options().with_concurrency(4),
        )
        .await
        .unwrap();

    assert_eq!(sequential.results, parallel.results);
    assert_eq!(result_symbols(&parallel), vec!["B", "A", "C", "D"]);
}

#[tokio::test]
async fn test_ascending_sort_by_rsi_puts_absent_last() {
    let source = Arc::new(
        InMemorySource::new()
            .with_quote(quote("HOT", 10.0, 11.0, 1.0))
            .with_quote(quote("NEW", 10.0, 11.0, 1.0))
            .with_quote(quote("COLD", 10.0, 11.0, 1.0))
            .with_indicator("HOT", IndicatorSpec::rsi(14), 80.0)
            .with_indicator("COLD", IndicatorSpec::rsi(14), 25.0),
    );
    let options = ScreenOptions::default()
        .with_details(false)
        .sorted_by(Metric::Rsi, SortOrder::Ascending);

    let outcome = Screener::new(source.clone())
        .with_indicators(source)
        .screen(&symbols(&["HOT", "NEW", "COLD"]), &ScreenCriteria::default(), &options)
        .await
        .unwrap();

    assert_eq!(result_symbols(&outcome), vec!["COLD", "HOT", "NEW"]);
    assert!(outcome.results[2].rsi.is_none());
}

#[tokio::test]
async fn test_indicator_filters_use_fetched_values() {
    let source = Arc::new(
        InMemorySource::new()
            .with_quote(quote("UP", 95.0, 100.0, 1.0))
            .with_quote(quote("DOWN", 95.0, 100.0, 1.0))
            .with_quote(quote("NOSMA", 95.0, 100.0, 1.0))
            .with_indicator("UP", IndicatorSpec::sma(50), 90.0)
            .with_indicator("UP", IndicatorSpec::rsi(14), 55.0)
            .with_indicator("DOWN", IndicatorSpec::sma(50), 110.0)
            .with_indicator("DOWN", IndicatorSpec::rsi(14), 45.0)
            .with_indicator("NOSMA", IndicatorSpec::rsi(14), 50.0),
    );
    let criteria = ScreenCriteria {
        price_above_sma: Some(true),
        max_rsi: Some(70.0),
        ..ScreenCriteria::default()
    };
    let options = ScreenOptions::default().with_details(false);

    let outcome = Screener::new(source.clone())
        .with_indicators(source)
        .screen(&symbols(&["UP", "DOWN", "NOSMA"]), &criteria, &options)
        .await
        .unwrap();

    assert_eq!(result_symbols(&outcome), vec!["UP"]);
    let up = &outcome.results[0];
    assert_relative_eq!(up.price_to_sma.unwrap(), 100.0 / 90.0);
    assert_eq!(
        reason_for(&outcome, "NOSMA"),
        &ExclusionReason::FailedCriteria(vec![Filter::PriceAboveSma])
    );
}

#[tokio::test]
async fn test_market_cap_comes_from_details() {
    let source = Arc::new(
        InMemorySource::new()
            .with_quote(quote("BIG", 10.0, 11.0, 1.0))
            .with_quote(quote("SMALL", 10.0, 11.0, 1.0))
            .with_quote(quote("UNKNOWN", 10.0, 11.0, 1.0))
            .with_market_cap("BIG", 5e11)
            .with_market_cap("SMALL", 2e8),
    );
    let criteria = ScreenCriteria {
        min_market_cap: Some(1e10),
        ..ScreenCriteria::default()
    };
    let options = plain_options().with_details(true);

    let outcome = Screener::new(source.clone())
        .with_reference(source)
        .screen(&symbols(&["BIG", "SMALL", "UNKNOWN"]), &criteria, &options)
        .await
        .unwrap();

    assert_eq!(result_symbols(&outcome), vec!["BIG"]);
    assert_eq!(outcome.exclusions.len(), 2);
}

#[tokio::test]
async fn test_empty_universe_is_an_error() {
    let screener = Screener::new(Arc::new(InMemorySource::new()));
    let result = screener
        .screen(&[], &ScreenCriteria::default(), &plain_options())
        .await;
    assert!(matches!(result, Err(ScreenError::EmptyUniverse)));
}

#[tokio::test]
async fn test_missing_source_is_configuration_error() {
    let source = Arc::new(InMemorySource::new().with_quote(quote("A", 1.0, 1.0, 1.0)));
    let screener = Screener::new(source.clone());

    for criteria in [
        ScreenCriteria {
            max_float_shares: Some(1e7),
            ..ScreenCriteria::default()
        },
        ScreenCriteria {
            min_relative_volume: Some(2.0),
            ..ScreenCriteria::default()
        },
        ScreenCriteria {
            min_rsi: Some(30.0),
            ..ScreenCriteria::default()
        },
        ScreenCriteria {
            min_market_cap: Some(1e9),
            ..ScreenCriteria::default()
        },
    ] {
        let result = screener
            .screen(&symbols(&["A"]), &criteria, &plain_options())
            .await;
        assert!(matches!(result, Err(ScreenError::Configuration(_))));
    }
    assert_eq!(source.quote_requests(), 0);
}

#[tokio::test]
async fn test_listed_universe_is_screened() {
    let source = Arc::new(
        InMemorySource::new()
            .with_listed("AAPL")
            .with_listed("MSFT")
            .with_quote(quote("AAPL", 100.0, 102.0, 1.0))
            .with_quote(quote("MSFT", 100.0, 101.0, 1.0)),
    );

    let outcome = Screener::new(source.clone())
        .screen_listed(
            source.as_ref(),
            &TickerQuery::default(),
            &ScreenCriteria::default(),
            &plain_options(),
        )
        .await
        .unwrap();

    assert_eq!(result_symbols(&outcome), vec!["AAPL", "MSFT"]);
}

#[tokio::test]
async fn test_empty_listing_is_empty_universe() {
    let source = Arc::new(InMemorySource::new());
    let result = Screener::new(source.clone())
        .screen_listed(
            source.as_ref(),
            &TickerQuery::default(),
            &ScreenCriteria::default(),
            &plain_options(),
        )
        .await;
    assert!(matches!(result, Err(ScreenError::EmptyUniverse)));
}

#[tokio::test]
async fn test_progress_reports_every_symbol() {
    let source = Arc::new(InMemorySource::new().with_quote(quote("A", 1.0, 1.0, 1.0)));
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);

    Screener::new(source)
        .with_progress(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .screen(&symbols(&["A", "B", "C"]), &ScreenCriteria::default(), &plain_options())
        .await
        .unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_inspect_collects_detail() {
    let source = Arc::new(
        InMemorySource::new()
            .with_quote(quote("AAPL", 100.0, 104.0, 1e7))
            .with_market_cap("AAPL", 3e12)
            .with_indicator("AAPL", IndicatorSpec::sma(50), 98.0)
            .with_indicator("AAPL", IndicatorSpec::sma(200), 90.0)
            .with_indicator("AAPL", IndicatorSpec::rsi(14), 61.0),
    );
    let screener = Screener::new(source.clone())
        .with_indicators(source.clone())
        .with_reference(source);

    let detail = screener.inspect(&Symbol::new("AAPL")).await.unwrap();
    assert_relative_eq!(detail.change, 4.0);
    assert_relative_eq!(detail.change_percent.unwrap(), 4.0);
    assert_eq!(detail.sma_200, Some(90.0));
    assert_eq!(detail.rsi_14, Some(61.0));
    assert_eq!(detail.details.market_cap, Some(3e12));

    let missing = screener.inspect(&Symbol::new("NOPE")).await;
    assert!(matches!(missing, Err(ScreenError::NotFound(s)) if s.as_str() == "NOPE"));
}

#[tokio::test]
async fn test_gainer_scan_scenario() {
    let mut today = buckets(15, &[60.0, 60.0, 60.0, 60.0, 60.0]);
    let mut history = buckets(14, &[1.0; 45]);
    history.append(&mut today);

    let source = Arc::new(
        InMemorySource::new()
            .with_gainer(candidate("LOWF", 4.0, 40.0))
            .with_gainer(candidate("HIGHF", 8.0, 25.0))
            .with_float_shares("LOWF", 5_000_000.0)
            .with_float_shares("HIGHF", 50_000_000.0)
            .with_volume_bars("LOWF", history)
            .with_volume_bars("HIGHF", buckets(15, &[1000.0])),
    );
    let options = ScreenOptions::for_gainers().with_volume_window(VolumeWindow {
        as_of: Some(as_of()),
        ..VolumeWindow::default()
    });

    let outcome = GainerScan::new(source.clone(), source.clone(), source.clone())
        .scan(&GainerQuery::default(), &default_gainer_criteria(), &options)
        .await
        .unwrap();

    assert_eq!(result_symbols(&outcome), vec!["LOWF"]);
    let record = &outcome.results[0];
    // 300 today over a 50-bucket mean of 6.9
    assert_relative_eq!(record.relative_volume.unwrap(), 300.0 / 6.9, epsilon = 1e-9);
    assert!(record.relative_volume.unwrap() >= 5.0);
    assert_eq!(record.float_shares, Some(5_000_000.0));
    assert_eq!(
        reason_for(&outcome, "HIGHF"),
        &ExclusionReason::FailedCriteria(vec![Filter::Max(Metric::FloatShares, 10_000_000.0)])
    );
    // the float rejection never reached the volume source
    assert_eq!(source.volume_requests(), 1);
}

#[tokio::test]
async fn test_gainer_with_flat_volume_is_excluded() {
    let source = Arc::new(
        InMemorySource::new()
            .with_gainer(candidate("DEAD", 3.0, 12.0))
            .with_float_shares("DEAD", 1_000_000.0)
            .with_volume_bars("DEAD", buckets(14, &[0.0, 0.0, 0.0])),
    );
    let options = ScreenOptions::for_gainers().with_volume_window(VolumeWindow {
        as_of: Some(as_of()),
        ..VolumeWindow::default()
    });

    let outcome = GainerScan::new(source.clone(), source.clone(), source)
        .scan(&GainerQuery::default(), &default_gainer_criteria(), &options)
        .await
        .unwrap();

    assert!(outcome.is_empty());
    assert_eq!(
        reason_for(&outcome, "DEAD"),
        &ExclusionReason::FailedCriteria(vec![Filter::Min(Metric::RelativeVolume, 5.0)])
    );
}

#[tokio::test]
async fn test_baseline_window_changes_the_ratio() {
    let mut bars = buckets(14, &[10.0, 10.0]);
    bars.extend(buckets(15, &[40.0, 40.0]));
    let build = || {
        Arc::new(
            InMemorySource::new()
                .with_gainer(candidate("RV", 5.0, 15.0))
                .with_float_shares("RV", 2_000_000.0)
                .with_volume_bars("RV", bars.clone()),
        )
    };
    let criteria = ScreenCriteria {
        max_float_shares: Some(1e7),
        min_relative_volume: Some(0.0),
        ..ScreenCriteria::default()
    };
    let window = |baseline| VolumeWindow {
        as_of: Some(as_of()),
        baseline,
        ..VolumeWindow::default()
    };

    let source = build();
    let included = GainerScan::new(source.clone(), source.clone(), source)
        .scan(
            &GainerQuery::default(),
            &criteria,
            &ScreenOptions::for_gainers().with_volume_window(window(BaselineWindow::IncludeCurrent)),
        )
        .await
        .unwrap();
    let source = build();
    let excluded = GainerScan::new(source.clone(), source.clone(), source)
        .scan(
            &GainerQuery::default(),
            &criteria,
            &ScreenOptions::for_gainers().with_volume_window(window(BaselineWindow::ExcludeCurrent)),
        )
        .await
        .unwrap();

    // today 80; mean 25 with today included, 10 without
    assert_relative_eq!(included.results[0].relative_volume.unwrap(), 3.2);
    assert_relative_eq!(excluded.results[0].relative_volume.unwrap(), 8.0);
}

#[tokio::test]
async fn test_gainer_fetch_failure_is_isolated() {
    let source = Arc::new(
        InMemorySource::new()
            .with_gainer(candidate("BROKEN", 4.0, 30.0))
            .with_gainer(candidate("FINE", 4.0, 20.0))
            .with_float_shares("FINE", 1_000_000.0)
            .with_volume_bars("FINE", buckets(15, &[100.0]))
            .failing_for("BROKEN"),
    );
    let criteria = ScreenCriteria {
        max_float_shares: Some(1e7),
        ..ScreenCriteria::default()
    };

    let outcome = GainerScan::new(source.clone(), source.clone(), source)
        .scan(&GainerQuery::default(), &criteria, &ScreenOptions::for_gainers())
        .await
        .unwrap();

    assert_eq!(result_symbols(&outcome), vec!["FINE"]);
    assert!(matches!(reason_for(&outcome, "BROKEN"), ExclusionReason::FetchFailed(_)));
}

#[tokio::test]
async fn test_empty_gainers_feed_is_empty_universe() {
    let source = Arc::new(InMemorySource::new());
    let result = GainerScan::new(source.clone(), source.clone(), source)
        .scan(
            &GainerQuery::default(),
            &default_gainer_criteria(),
            &ScreenOptions::for_gainers(),
        )
        .await;
    assert!(matches!(result, Err(ScreenError::EmptyUniverse)));
}

#[tokio::test]
async fn test_unreported_volume_fails_volume_bounds() {
    let mut thin = quote("NOVOL", 10.0, 11.0, 0.0);
    thin.volume = None;
    let source = Arc::new(
        InMemorySource::new()
            .with_quote(thin)
            .with_quote(quote("TRADED", 10.0, 11.0, 5e5)),
    );

    for criteria in [
        ScreenCriteria {
            max_volume: Some(1e9),
            ..ScreenCriteria::default()
        },
        ScreenCriteria {
            min_volume: Some(0.0),
            ..ScreenCriteria::default()
        },
    ] {
        let outcome = Screener::new(source.clone())
            .screen(&symbols(&["NOVOL", "TRADED"]), &criteria, &plain_options())
            .await
            .unwrap();

        assert_eq!(result_symbols(&outcome), vec!["TRADED"]);
        assert!(matches!(
            reason_for(&outcome, "NOVOL"),
            ExclusionReason::FailedCriteria(filters) if filters.len() == 1
        ));
    }

    let outcome = Screener::new(source)
        .screen(&symbols(&["NOVOL"]), &ScreenCriteria::default(), &plain_options())
        .await
        .unwrap();
    assert_eq!(outcome.results[0].volume, None);
}

#[tokio::test]
async fn test_bad_configuration_never_lists_tickers() {
    let source = Arc::new(
        InMemorySource::new()
            .with_listed("AAPL")
            .with_quote(quote("AAPL", 100.0, 102.0, 1.0)),
    );
    let criteria = ScreenCriteria {
        max_float_shares: Some(1e7),
        ..ScreenCriteria::default()
    };

    let result = Screener::new(source.clone())
        .screen_listed(source.as_ref(), &TickerQuery::default(), &criteria, &plain_options())
        .await;

    assert!(matches!(result, Err(ScreenError::Configuration(_))));
    assert_eq!(source.ticker_requests(), 0);
    assert_eq!(source.quote_requests(), 0);
}

#[tokio::test]
async fn test_evening_run_measures_the_closed_session() {
    // one quiet hour a day for two weeks, then a 5000/h session on the 15th
    let mut bars: Vec<VolumeBar> = (1..=14)
        .map(|day| VolumeBar {
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 15, 0, 0).unwrap(),
            volume: 100.0,
        })
        .collect();
    bars.extend((14..20).map(|hour| VolumeBar {
        timestamp: Utc.with_ymd_and_hms(2024, 3, 15, hour, 0, 0).unwrap(),
        volume: 5000.0,
    }));
    let source = Arc::new(
        InMemorySource::new()
            .with_gainer(candidate("SPIKE", 6.0, 30.0))
            .with_float_shares("SPIKE", 3_000_000.0)
            .with_volume_bars("SPIKE", bars),
    );
    // 21:00 New York, already the next day in UTC
    let evening = Utc.with_ymd_and_hms(2024, 3, 16, 1, 0, 0).unwrap();
    let options = ScreenOptions::for_gainers().with_volume_window(VolumeWindow {
        as_of: Some(evening),
        ..VolumeWindow::default()
    });

    let outcome = GainerScan::new(source.clone(), source.clone(), source)
        .scan(&GainerQuery::default(), &default_gainer_criteria(), &options)
        .await
        .unwrap();

    assert_eq!(result_symbols(&outcome), vec!["SPIKE"]);
    // 30000 in the session over a 20-bucket mean of 1570
    assert_relative_eq!(
        outcome.results[0].relative_volume.unwrap(),
        30_000.0 / 1_570.0,
        epsilon = 1e-9
    );
}
