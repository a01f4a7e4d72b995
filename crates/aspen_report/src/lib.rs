//! aspen_report: benchmark reports for locally served GGUF models.
//!
//! Reads the metrics feed written by benchmark runs (CSV or JSON Lines) and
//! renders a Markdown report plus an HTML copy of it.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use aspen_report::{MetricsFeed, ModelProfile};
//!
//! # fn run() -> aspen_report::Result<()> {
//! let feed = MetricsFeed::from_path(Path::new("benchmarks/gemma_metrics.csv"))?;
//! let profile = ModelProfile::from_id("gemma-2-2b")?;
//! if let Some(latest) = feed.latest() {
//!     println!("{}: {:?} W", profile.title, latest.net_watts());
//! }
//! # Ok(())
//! # }
//! ```

pub mod battery;
pub mod error;
pub mod format;
pub mod html;
pub mod markdown;
pub mod metrics;
pub mod profile;

use std::fs;
use std::path::{Path, PathBuf};

pub use battery::{Battery, DEFAULT_BATTERIES, RuntimeEstimate, estimate_runtime, parse_batteries};
pub use error::{ReportError, Result};
pub use format::{group_thousands, human_bytes};
pub use html::build_html;
pub use markdown::{Report, ReportFiles, build_markdown};
pub use metrics::{MetricsFeed, MetricsRow};
pub use profile::{MemoryBreakdown, ModelProfile};

/// Disk size of the model file, `None` when it cannot be read.
pub fn model_size(path: &Path) -> Option<String> {
    fs::metadata(path).ok().map(|meta| human_bytes(meta.len()))
}

/// Write the Markdown report and its HTML rendering, creating `out_dir`.
///
/// Returns the two paths written, Markdown first.
pub fn write_documents(out_dir: &Path, stem: &str, markdown: &str) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(out_dir).map_err(|e| ReportError::io(out_dir, e))?;

    let md_path = out_dir.join(format!("{stem}.md"));
    let html_path = out_dir.join(format!("{stem}.html"));
    fs::write(&md_path, markdown).map_err(|e| ReportError::io(&md_path, e))?;
    fs::write(&html_path, build_html(markdown)).map_err(|e| ReportError::io(&html_path, e))?;

    Ok((md_path, html_path))
}
