#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sift/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod alert;
pub mod export;
pub mod format;
pub mod html;
pub mod notify;
pub mod summary;
pub mod table;
pub mod telegram;

pub use alert::{DEFAULT_ALERT_THRESHOLD, PriceAlert, gainer_digest, price_alerts};
pub use export::{ExportError, ExportFormat, Exporter, OhlcExport};
pub use html::render_html;
pub use notify::{Notifier, NotifyError};
pub use summary::RunSummary;
pub use table::{gainer_line, render_detail, render_table};
pub use telegram::TelegramNotifier;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
