//! Progress reporting on stderr.

use indicatif::{ProgressBar, ProgressStyle, style::TemplateError};
use sift_data::Symbol;
use std::time::Duration;

/// Bar for a run over `len` symbols.
pub(crate) fn bar(len: usize, message: &'static str) -> Result<ProgressBar, TemplateError> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(pb)
}

/// Spinner for runs whose size is not known up front.
pub(crate) fn spinner(message: &'static str) -> Result<ProgressBar, TemplateError> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {pos} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(pb)
}

/// Per-symbol callback advancing `pb`.
pub(crate) fn tick(pb: &ProgressBar) -> impl Fn(&Symbol) + Send + Sync + 'static {
    let pb = pb.clone();
    move |symbol: &Symbol| {
        pb.set_message(symbol.to_string());
        pb.inc(1);
    }
}
