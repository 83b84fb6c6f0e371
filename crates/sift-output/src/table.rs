//! Console rendering of screening results.

use crate::format::{MISSING, compact_count, compact_currency, or_missing, signed_percent, truncate};
use sift_screen::{ScreenRecord, SymbolDetail};

const NAME_WIDTH: usize = 24;
const RULE_WIDTH: usize = 112;

/// Format ranked records as a fixed-width table for terminal display.
pub fn render_table(records: &[ScreenRecord]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:>4}  {:<8} {:<w$} {:>10} {:>9} {:>9} {:>10} {:>7} {:>7} {:>8} {:>8}\n",
        "#",
        "Symbol",
        "Name",
        "Price",
        "Change",
        "Volume",
        "Mkt Cap",
        "RSI",
        "P/SMA",
        "Float",
        "Rel Vol",
        w = NAME_WIDTH
    ));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    for (rank, record) in records.iter().enumerate() {
        let name = record.name.as_deref().unwrap_or(MISSING);
        output.push_str(&format!(
            "{:>4}  {:<8} {:<w$} {:>10} {:>9} {:>9} {:>10} {:>7} {:>7} {:>8} {:>8}\n",
            rank + 1,
            record.symbol,
            truncate(name, NAME_WIDTH),
            format!("{:.2}", record.price),
            signed_percent(record.change_percent),
            or_missing(record.volume, compact_count),
            or_missing(record.market_cap, compact_currency),
            or_missing(record.rsi, |v| format!("{:.1}", v)),
            or_missing(record.price_to_sma, |v| format!("{:.2}", v)),
            or_missing(record.float_shares, compact_count),
            or_missing(record.relative_volume, |v| format!("{:.2}x", v)),
            w = NAME_WIDTH
        ));
    }

    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
    output
}

/// One-line summary of a gainer-scan hit, e.g.
/// `ABCD: Abcd Inc, Price: $4.20, Change: 35.10%, Volume: 1200000, Rel Volume: 6.80x, Float: 4100000`.
pub fn gainer_line(record: &ScreenRecord) -> String {
    format!(
        "{}: {}, Price: ${:.2}, Change: {:.2}%, Volume: {}, Rel Volume: {}, Float: {}",
        record.symbol,
        record.name.as_deref().unwrap_or(MISSING),
        record.price,
        record.change_percent,
        or_missing(record.volume, |v| format!("{:.0}", v)),
        or_missing(record.relative_volume, |v| format!("{:.2}x", v)),
        or_missing(record.float_shares, |v| format!("{:.0}", v)),
    )
}

/// Multi-line detail view for a single symbol.
pub fn render_detail(detail: &SymbolDetail) -> String {
    let mut output = String::new();
    let details = &detail.details;

    output.push_str(&format!(
        "\n{} - {}\n",
        details.symbol,
        details.name.as_deref().unwrap_or(MISSING)
    ));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    let rows = [
        ("Price", format!("{:.2}", detail.quote.price)),
        ("Open", format!("{:.2}", detail.quote.open)),
        (
            "High / Low",
            format!(
                "{} / {}",
                or_missing(detail.quote.high, |v| format!("{:.2}", v)),
                or_missing(detail.quote.low, |v| format!("{:.2}", v))
            ),
        ),
        ("Volume", or_missing(detail.quote.volume, compact_count)),
        (
            "Change",
            format!(
                "{:.2} ({})",
                detail.change,
                or_missing(detail.change_percent, signed_percent)
            ),
        ),
        ("Market Cap", or_missing(details.market_cap, compact_currency)),
        ("SMA 50", or_missing(detail.sma_50, |v| format!("{:.2}", v))),
        ("SMA 200", or_missing(detail.sma_200, |v| format!("{:.2}", v))),
        ("RSI 14", or_missing(detail.rsi_14, |v| format!("{:.1}", v))),
        ("Sector", details.sector.clone().unwrap_or_else(|| MISSING.to_string())),
        (
            "Exchange",
            details
                .primary_exchange
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
        ),
        (
            "Employees",
            details
                .total_employees
                .map_or_else(|| MISSING.to_string(), |n| n.to_string()),
        ),
        (
            "Homepage",
            details
                .homepage_url
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
        ),
    ];
    for (label, value) in rows {
        output.push_str(&format!("  {:<14} {}\n", format!("{}:", label), value));
    }

    if let Some(description) = &details.description {
        output.push('\n');
        output.push_str(description);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_data::{GainerCandidate, Symbol};

    fn gainer() -> ScreenRecord {
        let mut record = ScreenRecord::from_candidate(&GainerCandidate {
            symbol: Symbol::new("ABCD"),
            name: Some("Abcd Inc".to_string()),
            price: 4.2,
            change_percent: 35.1,
            volume: Some(1_200_000.0),
            exchange: Some("NASDAQ".to_string()),
            market_cap: None,
        });
        record.float_shares = Some(4_100_000.0);
        record.relative_volume = Some(6.8);
        record
    }

    #[test]
    fn test_table_rows_in_rank_order() {
        let mut second = gainer();
        second.symbol = Symbol::new("WXYZ");
        let table = render_table(&[gainer(), second]);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].contains("Symbol"));
        assert!(lines[2].trim_start().starts_with("1  ABCD"));
        assert!(lines[3].trim_start().starts_with("2  WXYZ"));
        assert!(lines[2].contains("+35.10%"));
        assert!(lines[2].contains("4.1M"));
        assert!(lines[2].contains("6.80x"));
    }

    #[test]
    fn test_absent_metrics_render_placeholder() {
        let table = render_table(&[gainer()]);
        // no market cap, rsi or sma for a feed candidate
        let row = table.lines().nth(2).unwrap();
        assert_eq!(row.split_whitespace().filter(|cell| *cell == MISSING).count(), 3);
    }

    #[test]
    fn test_gainer_line() {
        assert_eq!(
            gainer_line(&gainer()),
            "ABCD: Abcd Inc, Price: $4.20, Change: 35.10%, Volume: 1200000, Rel Volume: 6.80x, Float: 4100000"
        );
    }
}
