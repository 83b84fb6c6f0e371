//! Result of a screening run.

use crate::error::Exclusion;
use crate::model::ScreenRecord;
use serde::{Deserialize, Serialize};
use sift_data::Symbol;
use std::collections::BTreeMap;

/// Ranked results plus a diagnostic for every dropped symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenOutcome {
    /// Matching records, ranked and truncated
    pub results: Vec<ScreenRecord>,
    /// Symbols dropped during the run, in evaluation order
    pub exclusions: Vec<Exclusion>,
    /// Symbols evaluated
    pub scanned: usize,
}

impl ScreenOutcome {
    /// Number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Result symbols in rank order.
    pub fn symbols(&self) -> Vec<&Symbol> {
        self.results.iter().map(|r| &r.symbol).collect()
    }

    /// Exclusion tally keyed by reason label.
    pub fn exclusion_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for exclusion in &self.exclusions {
            *counts.entry(exclusion.reason.label()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExclusionReason;

    #[test]
    fn test_exclusion_counts() {
        let outcome = ScreenOutcome {
            results: Vec::new(),
            exclusions: vec![
                Exclusion::new(Symbol::new("A"), ExclusionReason::NoQuote),
                Exclusion::new(Symbol::new("B"), ExclusionReason::NoQuote),
                Exclusion::new(Symbol::new("C"), ExclusionReason::DivisionUndefined),
            ],
            scanned: 3,
        };
        let counts = outcome.exclusion_counts();
        assert_eq!(counts.get("no_quote"), Some(&2));
        assert_eq!(counts.get("division_undefined"), Some(&1));
        assert!(outcome.is_empty());
    }
}
