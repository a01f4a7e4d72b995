//! Markdown report document.

use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

use crate::battery::{Battery, estimate_runtime};
use crate::format::group_thousands;
use crate::metrics::{MetricsFeed, MetricsRow};
use crate::profile::ModelProfile;

const NOT_AVAILABLE: &str = "N/A";
const RECENT_RUNS: usize = 10;

/// Paths listed in the Files section.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFiles {
    pub csv: PathBuf,
    pub jsonl: PathBuf,
    pub markdown: PathBuf,
    pub html: PathBuf,
}

impl ReportFiles {
    /// The CSV and JSONL aggregates sit side by side, so both are listed
    /// whichever one the feed was read from.
    pub fn new(metrics: &Path, out_dir: &Path, stem: &str) -> Self {
        Self {
            csv: metrics.with_extension("csv"),
            jsonl: metrics.with_extension("jsonl"),
            markdown: out_dir.join(format!("{stem}.md")),
            html: out_dir.join(format!("{stem}.html")),
        }
    }
}

/// Everything one report document is built from.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub profile: &'a ModelProfile,
    pub feed: &'a MetricsFeed,
    pub batteries: &'a [Battery],
    pub model_path: &'a Path,
    /// Human-readable file size, `None` when the model file is missing
    pub model_size: Option<String>,
    pub files: ReportFiles,
    /// Pre-formatted generation time
    pub generated_at: String,
}

pub fn build_markdown(report: &Report<'_>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_markdown(&mut out, report);
    out
}

fn write_markdown(out: &mut String, report: &Report<'_>) -> fmt::Result {
    let latest = report.feed.latest();
    let field = |pick: fn(&MetricsRow) -> &Option<String>| latest_value(latest, pick);
    let profile = report.profile;
    let memory = &profile.memory;
    let prompt_tokens = field(|r| &r.prompt_tokens);
    let gen_tokens = field(|r| &r.gen_tokens);

    writeln!(out, "# {}", profile.title)?;
    writeln!(out)?;
    writeln!(out, "**Generated:** {}  ", report.generated_at)?;
    writeln!(out, "**Latest run (UTC):** {}", field(|r| &r.timestamp))?;
    writeln!(out)?;

    writeln!(out, "## Latency and Throughput")?;
    writeln!(
        out,
        "- Text generation throughput (tg{gen_tokens}): {} tokens/sec",
        field(|r| &r.tokens_per_sec)
    )?;
    writeln!(
        out,
        "- Prompt processing throughput (pp{prompt_tokens}): see llama-bench output"
    )?;
    writeln!(out)?;

    writeln!(out, "## Memory Footprint and Model Size")?;
    writeln!(out, "- Model file: `{}`", report.model_path.display())?;
    writeln!(
        out,
        "- Model size (disk): {}",
        report.model_size.as_deref().unwrap_or("unknown")
    )?;
    writeln!(
        out,
        "- Estimated runtime memory (ctx={}):",
        profile.context_size
    )?;
    let precision = profile.buffer_precision;
    writeln!(out, "  - Model buffer: {:.precision$} MiB", memory.model_buffer)?;
    writeln!(out, "  - KV cache (f16): {:.precision$} MiB", memory.kv_cache)?;
    writeln!(
        out,
        "  - Compute buffers: {:.precision$} MiB",
        memory.compute_buffers
    )?;
    writeln!(out, "  - Output buffer: {:.2} MiB", memory.output_buffer)?;
    writeln!(out, "  - Token caches: {:.2} MiB", memory.token_caches)?;
    writeln!(out, "  - Estimated total RAM: ~{:.2} GB", memory.total_gb())?;
    if let Some(note) = profile.memory_note {
        writeln!(out, "{note}")?;
    }
    writeln!(out)?;

    writeln!(out, "## Power Efficiency (CPU)")?;
    writeln!(out, "- Idle average: {} W  ", field(|r| &r.idle_w))?;
    writeln!(out, "- Active average: {} W  ", field(|r| &r.active_w))?;
    writeln!(out, "- Net average: {} W  ", field(|r| &r.net_w))?;
    writeln!(out, "- Energy per token: {} J/token", field(|r| &r.j_per_token))?;
    writeln!(out)?;

    writeln!(out, "## Battery Runtime Estimates")?;
    if let Some(preamble) = profile.battery_preamble {
        writeln!(out, "{preamble}")?;
        writeln!(out)?;
    }
    write_battery_table(out, latest, report.batteries)?;
    writeln!(out)?;
    if let Some(note) = profile.battery_note {
        writeln!(out, "{note}")?;
        writeln!(out)?;
    }

    writeln!(out, "## Test Configuration")?;
    writeln!(out, "- Threads: {}  ", field(|r| &r.threads))?;
    writeln!(out, "- Context size: {}  ", profile.context_size)?;
    writeln!(out, "- Prompt tokens: {prompt_tokens}  ")?;
    writeln!(out, "- Generation tokens: {gen_tokens}  ")?;
    writeln!(out, "- Offload: {}", profile.offload)?;
    writeln!(out)?;

    writeln!(out, "## Files")?;
    writeln!(out, "- Aggregated CSV: `{}`  ", report.files.csv.display())?;
    writeln!(out, "- Aggregated JSONL: `{}`  ", report.files.jsonl.display())?;
    writeln!(
        out,
        "- Human report (this): `{}` / `{}`",
        report.files.markdown.display(),
        report.files.html.display()
    )?;
    writeln!(out)?;

    writeln!(out, "## Recent Runs (latest first)")?;
    write_recent_runs(out, report.feed)
}

/// A field of the latest row, or `N/A`.
fn latest_value<'r>(
    latest: Option<&'r MetricsRow>,
    pick: fn(&MetricsRow) -> &Option<String>,
) -> &'r str {
    latest
        .and_then(|row| pick(row).as_deref())
        .unwrap_or(NOT_AVAILABLE)
}

fn write_battery_table(
    out: &mut String,
    latest: Option<&MetricsRow>,
    batteries: &[Battery],
) -> fmt::Result {
    let net_watts = latest.and_then(MetricsRow::net_watts);
    let joules = latest.and_then(MetricsRow::joules_per_token);

    let (Some(net_watts), Some(joules)) = (net_watts, joules) else {
        return writeln!(out, "{}", battery_unavailable());
    };
    if batteries.is_empty() || net_watts <= 0.0 {
        return writeln!(out, "{}", battery_unavailable());
    }

    writeln!(
        out,
        "| Battery | Energy (Wh) | Est. runtime (h) | Tokens on full charge |"
    )?;
    writeln!(out, "|---|---:|---:|---:|")?;
    for battery in batteries {
        let estimate = estimate_runtime(battery, net_watts, joules);
        writeln!(
            out,
            "| {} | {:.1} | {:.2} | {} |",
            battery.name,
            battery.watt_hours,
            estimate.hours,
            group_thousands(estimate.tokens)
        )?;
    }
    Ok(())
}

fn battery_unavailable() -> &'static str {
    "(battery runtime requires valid net_W and J/token from a measurement)"
}

fn write_recent_runs(out: &mut String, feed: &MetricsFeed) -> fmt::Result {
    if feed.is_empty() {
        return writeln!(out, "(no data)");
    }
    writeln!(
        out,
        "| timestamp (UTC) | threads | pp | tg | t/s | J/token | net_W (W) |"
    )?;
    writeln!(out, "|---|---:|---:|---:|---:|---:|---:|")?;
    for row in feed.recent(RECENT_RUNS) {
        let cell = |value: &Option<String>| value.clone().unwrap_or_default();
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} |",
            cell(&row.timestamp),
            cell(&row.threads),
            cell(&row.prompt_tokens),
            cell(&row.gen_tokens),
            cell(&row.tokens_per_sec),
            cell(&row.j_per_token),
            cell(&row.net_w)
        )?;
    }
    Ok(())
}
