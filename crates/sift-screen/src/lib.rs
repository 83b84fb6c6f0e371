#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sift/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod criteria;
mod enrich;
pub mod error;
pub mod gainers;
pub mod model;
pub mod options;
pub mod outcome;
pub mod ranking;
pub mod screener;
pub mod volume;

pub use criteria::{Filter, ScreenCriteria, ScreenRequest};
pub use error::{Exclusion, ExclusionReason, Result, ScreenError};
pub use gainers::{GainerScan, default_gainer_criteria};
pub use model::{Metric, ScreenRecord};
pub use options::{IndicatorPlan, ScreenOptions, SortOrder};
pub use outcome::ScreenOutcome;
pub use screener::{Screener, SymbolDetail};
pub use volume::{BaselineWindow, RelativeVolume, VolumeWindow, current_session, relative_volume};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
