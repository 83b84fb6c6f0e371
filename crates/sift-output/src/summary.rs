//! Run summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sift_screen::ScreenOutcome;
use std::collections::BTreeMap;
use std::fmt;

/// Counts describing one screening run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Run label (e.g. `screen`, `gainers`)
    pub title: String,
    /// When the summary was produced
    pub generated_at: DateTime<Utc>,
    /// Symbols evaluated
    pub scanned: usize,
    /// Symbols returned after ranking and truncation
    pub matched: usize,
    /// Symbols dropped
    pub excluded: usize,
    /// Dropped symbols per reason label
    pub exclusion_counts: BTreeMap<String, usize>,
}

impl RunSummary {
    /// Summarize a finished run.
    pub fn from_outcome(title: impl Into<String>, outcome: &ScreenOutcome) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
            scanned: outcome.scanned,
            matched: outcome.len(),
            excluded: outcome.exclusions.len(),
            exclusion_counts: outcome
                .exclusion_counts()
                .into_iter()
                .map(|(label, count)| (label.to_string(), count))
                .collect(),
        }
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nRun Summary: {}\n", self.title));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("  {:<24}{:>8}\n", "Scanned", self.scanned));
        output.push_str(&format!("  {:<24}{:>8}\n", "Matched", self.matched));
        output.push_str(&format!("  {:<24}{:>8}\n", "Excluded", self.excluded));

        if !self.exclusion_counts.is_empty() {
            output.push_str(&"-".repeat(40));
            output.push('\n');
            for (reason, count) in &self.exclusion_counts {
                output.push_str(&format!("    {:<22}{:>8}\n", reason, count));
            }
        }

        output.push_str(&"=".repeat(40));
        output.push('\n');
        output
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} scanned, {} matched, {} excluded",
            self.title, self.scanned, self.matched, self.excluded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_data::Symbol;
    use sift_screen::{Exclusion, ExclusionReason};

    fn outcome() -> ScreenOutcome {
        ScreenOutcome {
            results: Vec::new(),
            exclusions: vec![
                Exclusion::new(Symbol::new("A"), ExclusionReason::NoQuote),
                Exclusion::new(Symbol::new("B"), ExclusionReason::FailedCriteria(Vec::new())),
                Exclusion::new(Symbol::new("C"), ExclusionReason::NoQuote),
            ],
            scanned: 3,
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary::from_outcome("screen", &outcome());
        assert_eq!(summary.scanned, 3);
        assert_eq!(summary.matched, 0);
        assert_eq!(summary.excluded, 3);
        assert_eq!(summary.exclusion_counts.get("no_quote"), Some(&2));
        assert_eq!(
            summary.to_string(),
            "screen: 3 scanned, 0 matched, 3 excluded"
        );
    }

    #[test]
    fn test_summary_table_lists_reasons() {
        let table = RunSummary::from_outcome("gainers", &outcome()).to_ascii_table();
        assert!(table.contains("Run Summary: gainers"));
        assert!(table.contains("no_quote"));
        assert!(table.contains("failed_criteria"));
    }
}
