//! Standalone HTML results page.

use crate::format::{MISSING, compact_count, compact_currency, or_missing, signed_percent};
use crate::summary::RunSummary;
use sift_screen::ScreenRecord;

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}\
th,td{padding:4px 10px;border-bottom:1px solid #ddd}\
td.num{text-align:right}\
.positive{color:#1a7f37}.negative{color:#cf222e}.missing{color:#ccc}";

/// Escape text for inclusion in HTML.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn cell(value: String, class: &str) -> String {
    if value == MISSING {
        format!("<td class=\"{} missing\">{}</td>", class, MISSING)
    } else {
        format!("<td class=\"{}\">{}</td>", class, escape(&value))
    }
}

fn change_class(change: f64) -> &'static str {
    if change > 0.0 {
        "num positive"
    } else if change < 0.0 {
        "num negative"
    } else {
        "num"
    }
}

/// Render the ranked records and the run summary as an HTML document.
pub fn render_html(title: &str, records: &[ScreenRecord], summary: &RunSummary) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str(&format!("<h1>{}</h1>\n", escape(title)));
    html.push_str(&format!(
        "<p>Generated {} &middot; {} scanned &middot; {} matched &middot; {} excluded</p>\n",
        summary.generated_at.format("%Y-%m-%d %H:%M UTC"),
        summary.scanned,
        summary.matched,
        summary.excluded
    ));

    html.push_str("<table>\n<thead><tr>");
    for header in [
        "#", "Symbol", "Name", "Price", "Change %", "Volume", "Market Cap", "RSI", "Price/SMA",
        "Float", "Rel Vol", "Sector",
    ] {
        html.push_str(&format!("<th>{}</th>", header));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for (rank, record) in records.iter().enumerate() {
        html.push_str("<tr>");
        html.push_str(&cell((rank + 1).to_string(), "num"));
        html.push_str(&cell(record.symbol.to_string(), "text"));
        html.push_str(&cell(
            record.name.clone().unwrap_or_else(|| MISSING.to_string()),
            "text",
        ));
        html.push_str(&cell(format!("{:.2}", record.price), "num"));
        html.push_str(&cell(
            signed_percent(record.change_percent),
            change_class(record.change_percent),
        ));
        html.push_str(&cell(or_missing(record.volume, compact_count), "num"));
        html.push_str(&cell(or_missing(record.market_cap, compact_currency), "num"));
        html.push_str(&cell(or_missing(record.rsi, |v| format!("{:.1}", v)), "num"));
        html.push_str(&cell(
            or_missing(record.price_to_sma, |v| format!("{:.2}", v)),
            "num",
        ));
        html.push_str(&cell(or_missing(record.float_shares, compact_count), "num"));
        html.push_str(&cell(
            or_missing(record.relative_volume, |v| format!("{:.2}x", v)),
            "num",
        ));
        html.push_str(&cell(
            record.sector.clone().unwrap_or_else(|| MISSING.to_string()),
            "text",
        ));
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    if !summary.exclusion_counts.is_empty() {
        html.push_str("<h2>Excluded</h2>\n<ul>\n");
        for (reason, count) in &summary.exclusion_counts {
            html.push_str(&format!("<li>{}: {}</li>\n", escape(reason), count));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_data::memory::quote;
    use sift_screen::ScreenOutcome;

    #[test]
    fn test_escape() {
        assert_eq!(escape("AT&T <b>\"x\"</b>"), "AT&amp;T &lt;b&gt;&quot;x&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_render_marks_direction_and_escapes_names() {
        let mut up = ScreenRecord::from_quote(&quote("UP", 10.0, 11.0, 500.0)).unwrap();
        up.name = Some("Up & Away <Holdings>".to_string());
        let down = ScreenRecord::from_quote(&quote("DOWN", 10.0, 9.0, 500.0)).unwrap();
        let outcome = ScreenOutcome {
            results: vec![up, down],
            exclusions: Vec::new(),
            scanned: 2,
        };
        let summary = RunSummary::from_outcome("Screen", &outcome);

        let html = render_html("Screen <daily>", &outcome.results, &summary);
        assert!(html.contains("<title>Screen &lt;daily&gt;</title>"));
        assert!(html.contains("Up &amp; Away &lt;Holdings&gt;"));
        assert!(html.contains("<td class=\"num positive\">+10.00%</td>"));
        assert!(html.contains("<td class=\"num negative\">-10.00%</td>"));
        assert!(html.contains("<td class=\"num missing\">-</td>"));
        assert!(!html.contains("Excluded"));
    }
}
