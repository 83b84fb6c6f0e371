//! Relative volume.
//!
//! `relative_volume = current-period volume / mean bucket volume`, where the
//! current period is one trading session (a UTC calendar day) and the baseline
//! is the mean volume of the intraday buckets in the lookback window.
//!
//! The session is read off the bars rather than the clock: a run after the
//! US close is already on the next UTC date while the session it should
//! measure is still the one that just ended.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sift_data::{BarInterval, VolumeBar};

/// Default lookback for the baseline, in days.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Which buckets form the baseline mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BaselineWindow {
    /// Every bucket in the window, the current day's included
    #[default]
    IncludeCurrent,
    /// Only buckets before the current day
    ExcludeCurrent,
}

/// Where volume history is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeWindow {
    /// Bucket size
    pub interval: BarInterval,
    /// Days of history before `as_of`
    pub lookback_days: i64,
    /// Whether the current day is part of the baseline
    pub baseline: BaselineWindow,
    /// End of the window; `None` means now
    pub as_of: Option<DateTime<Utc>>,
}

impl Default for VolumeWindow {
    fn default() -> Self {
        Self {
            interval: BarInterval::Hour1,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            baseline: BaselineWindow::IncludeCurrent,
            as_of: None,
        }
    }
}

impl VolumeWindow {
    /// `(from, to)` bounds of the window.
    pub fn range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let to = self.as_of.unwrap_or_else(Utc::now);
        (to - Duration::days(self.lookback_days), to)
    }
}

/// Session the current period refers to.
///
/// The date of the latest bar at or before `as_of`, when that bar is less than
/// a day old. Otherwise the date of `as_of` itself, which has no trades yet.
pub fn current_session(bars: &[VolumeBar], as_of: DateTime<Utc>) -> NaiveDate {
    bars.iter()
        .map(|bar| bar.timestamp)
        .filter(|ts| *ts <= as_of && as_of - *ts < Duration::days(1))
        .max()
        .map_or_else(|| as_of.date_naive(), |ts| ts.date_naive())
}

/// Components of a relative-volume computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeVolume {
    /// Volume traded in the current session
    pub current: f64,
    /// Mean bucket volume of the baseline
    pub baseline: f64,
    /// Buckets in the baseline
    pub samples: usize,
    /// `current / baseline`, zero when the baseline is empty or zero
    pub ratio: f64,
}

/// Compute relative volume for `session` from intraday `bars`.
pub fn relative_volume(bars: &[VolumeBar], session: NaiveDate, window: BaselineWindow) -> RelativeVolume {
    let current = bars
        .iter()
        .filter(|bar| bar.date() == session)
        .fold(0.0, |total, bar| total + bar.volume);

    let (total, samples) = bars
        .iter()
        .filter(|bar| match window {
            BaselineWindow::IncludeCurrent => true,
            BaselineWindow::ExcludeCurrent => bar.date() < session,
        })
        .fold((0.0, 0usize), |(total, n), bar| (total + bar.volume, n + 1));

    let baseline = if samples == 0 {
        0.0
    } else {
        total / samples as f64
    };
    let ratio = if baseline > 0.0 { current / baseline } else { 0.0 };

    RelativeVolume {
        current,
        baseline,
        samples,
        ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn bar(day: u32, hour: u32, volume: f64) -> VolumeBar {
        VolumeBar {
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
            volume,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_window_range() {
        let as_of = Utc.with_ymd_and_hms(2024, 3, 31, 20, 0, 0).unwrap();
        let window = VolumeWindow {
            as_of: Some(as_of),
            ..VolumeWindow::default()
        };
        let (from, to) = window.range();
        assert_eq!(to, as_of);
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_include_current_counts_every_bucket() {
        let bars = vec![bar(4, 14, 100.0), bar(4, 15, 100.0), bar(5, 14, 400.0)];
        let rv = relative_volume(&bars, today(), BaselineWindow::IncludeCurrent);
        assert_relative_eq!(rv.current, 400.0);
        assert_relative_eq!(rv.baseline, 200.0);
        assert_eq!(rv.samples, 3);
        assert_relative_eq!(rv.ratio, 2.0);
    }

    #[test]
    fn test_exclude_current_uses_prior_days_only() {
        let bars = vec![bar(4, 14, 100.0), bar(4, 15, 100.0), bar(5, 14, 400.0)];
        let rv = relative_volume(&bars, today(), BaselineWindow::ExcludeCurrent);
        assert_relative_eq!(rv.baseline, 100.0);
        assert_eq!(rv.samples, 2);
        assert_relative_eq!(rv.ratio, 4.0);
    }

    #[test]
    fn test_zero_volume_history_gives_zero() {
        let bars = vec![bar(4, 14, 0.0), bar(5, 14, 0.0)];
        let rv = relative_volume(&bars, today(), BaselineWindow::IncludeCurrent);
        assert_relative_eq!(rv.ratio, 0.0);
    }

    #[test]
    fn test_no_samples_gives_zero() {
        let rv = relative_volume(&[], today(), BaselineWindow::IncludeCurrent);
        assert_eq!(rv.samples, 0);
        assert_relative_eq!(rv.ratio, 0.0);

        let only_today = vec![bar(5, 14, 500.0)];
        let rv = relative_volume(&only_today, today(), BaselineWindow::ExcludeCurrent);
        assert_relative_eq!(rv.ratio, 0.0);
    }

    #[test]
    fn test_no_trades_today() {
        let bars = vec![bar(3, 14, 100.0), bar(4, 14, 300.0)];
        let rv = relative_volume(&bars, today(), BaselineWindow::IncludeCurrent);
        assert_eq!(rv.current.to_bits(), 0.0_f64.to_bits());
        assert_eq!(rv.ratio.to_bits(), 0.0_f64.to_bits());
    }

    #[test]
    fn test_empty_session_is_positive_zero() {
        let rv = relative_volume(&[], today(), BaselineWindow::ExcludeCurrent);
        assert!(rv.current.is_sign_positive());
        assert!(rv.baseline.is_sign_positive());
        assert!(rv.ratio.is_sign_positive());
    }

    #[test]
    fn test_session_after_utc_midnight_is_the_one_that_closed() {
        let bars = vec![bar(14, 19, 100.0), bar(15, 14, 5000.0), bar(15, 19, 5000.0)];
        let evening = Utc.with_ymd_and_hms(2024, 3, 16, 1, 0, 0).unwrap();
        assert_eq!(
            current_session(&bars, evening),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_session_falls_back_to_as_of_date() {
        let bars = vec![bar(3, 14, 100.0)];
        let as_of = Utc.with_ymd_and_hms(2024, 3, 5, 15, 0, 0).unwrap();
        assert_eq!(current_session(&bars, as_of), today());
        assert_eq!(current_session(&[], as_of), today());
    }

    #[test]
    fn test_session_ignores_bars_after_as_of() {
        let bars = vec![bar(4, 14, 100.0), bar(6, 14, 100.0)];
        let as_of = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        assert_eq!(current_session(&bars, as_of), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }
}
