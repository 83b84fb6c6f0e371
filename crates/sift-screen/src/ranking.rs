//! Ordering and truncation of screen results.

use crate::model::{Metric, ScreenRecord};
use crate::options::SortOrder;
use std::cmp::Ordering;

/// Sort `records` by `metric` and keep the first `limit`.
///
/// The sort is stable: records with equal keys keep their input order.
/// Records lacking the metric rank after every record that has it, in
/// either direction.
pub fn rank(records: &mut Vec<ScreenRecord>, metric: Metric, order: SortOrder, limit: usize) {
    records.sort_by(|a, b| compare(a.metric(metric), b.metric(metric), order));
    records.truncate(limit);
}

fn compare(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_data::memory::quote;

    fn record(symbol: &str, change_percent: f64, rsi: Option<f64>) -> ScreenRecord {
        let mut record = ScreenRecord::from_quote(&quote(symbol, 100.0, 100.0, 1.0)).unwrap();
        record.change_percent = change_percent;
        record.rsi = rsi;
        record
    }

    fn symbols(records: &[ScreenRecord]) -> Vec<&str> {
        records.iter().map(|r| r.symbol.as_str()).collect()
    }

    #[test]
    fn test_descending_with_stable_ties() {
        let mut records = vec![
            record("A", 1.0, None),
            record("B", 3.0, None),
            record("C", 3.0, None),
            record("D", 2.0, None),
        ];
        rank(&mut records, Metric::ChangePercent, SortOrder::Descending, 10);
        assert_eq!(symbols(&records), vec!["B", "C", "D", "A"]);
    }

    #[test]
    fn test_ascending_with_stable_ties() {
        let mut records = vec![
            record("A", 2.0, None),
            record("B", 1.0, None),
            record("C", 2.0, None),
        ];
        rank(&mut records, Metric::ChangePercent, SortOrder::Ascending, 10);
        assert_eq!(symbols(&records), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_absent_values_rank_last_both_ways() {
        let build = || {
            vec![
                record("NONE1", 0.0, None),
                record("LOW", 0.0, Some(30.0)),
                record("NONE2", 0.0, None),
                record("HIGH", 0.0, Some(70.0)),
            ]
        };

        let mut desc = build();
        rank(&mut desc, Metric::Rsi, SortOrder::Descending, 10);
        assert_eq!(symbols(&desc), vec!["HIGH", "LOW", "NONE1", "NONE2"]);

        let mut asc = build();
        rank(&mut asc, Metric::Rsi, SortOrder::Ascending, 10);
        assert_eq!(symbols(&asc), vec!["LOW", "HIGH", "NONE1", "NONE2"]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let mut records: Vec<_> = (0..60)
            .map(|i| record(&format!("S{}", i), f64::from(i), None))
            .collect();
        rank(&mut records, Metric::ChangePercent, SortOrder::Descending, 50);
        assert_eq!(records.len(), 50);
        assert_eq!(records[0].symbol.as_str(), "S59");
    }

    #[test]
    fn test_zero_limit_empties() {
        let mut records = vec![record("A", 1.0, None)];
        rank(&mut records, Metric::ChangePercent, SortOrder::Descending, 0);
        assert!(records.is_empty());
    }
}
