//! `aspen-report`: write Markdown and HTML benchmark reports.

use std::path::PathBuf;

use anyhow::{Context, Result};
use aspen_report::{
    DEFAULT_BATTERIES, MetricsFeed, MetricsRow, ModelProfile, Report, ReportFiles,
    build_markdown, model_size, parse_batteries, write_documents,
};
use clap::Parser;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use console::style;
use tracing::{info, warn};

const TABLE_ROWS: usize = 10;

/// Build a benchmark report from a metrics feed
#[derive(Parser)]
#[command(name = "aspen-report", about, version)]
struct Cli {
    /// Metrics feed (.csv, or .jsonl/.ndjson)
    #[arg(long)]
    metrics: PathBuf,

    /// Model profile: gemma-2-2b or gentinst
    #[arg(long, default_value = "gemma-2-2b")]
    profile: String,

    /// Model file whose size is reported (default: the profile's model path)
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Output directory (default: the metrics file's directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// File stem for the written documents (default: from the profile)
    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = aspen_observability::init_from_env("aspen-report") {
        eprintln!("{} Logging disabled: {e}", style("!").yellow());
    }

    let result = run(cli);
    aspen_observability::shutdown();

    if let Err(e) = result {
        eprintln!("{} {}", style("✗").red(), style(format!("{e:#}")).bright());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let profile = ModelProfile::from_id(&cli.profile)?;
    let feed = MetricsFeed::from_path(&cli.metrics)
        .with_context(|| format!("reading {}", cli.metrics.display()))?;
    if feed.is_empty() {
        warn!(path = %cli.metrics.display(), "Metrics feed is empty");
    }

    let battery_spec =
        std::env::var("BATTERY_WH").unwrap_or_else(|_| DEFAULT_BATTERIES.to_string());
    let batteries = parse_batteries(&battery_spec);
    if batteries.is_empty() {
        warn!(spec = %battery_spec, "Could not parse BATTERY_WH");
    }

    let model_path = cli
        .model_path
        .unwrap_or_else(|| PathBuf::from(profile.default_model_path));
    let out_dir = cli.out_dir.unwrap_or_else(|| {
        cli.metrics
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
    });
    let stem = cli.name.unwrap_or_else(|| profile.report_stem.to_string());

    let report = Report {
        profile: &profile,
        feed: &feed,
        batteries: &batteries,
        model_path: &model_path,
        model_size: model_size(&model_path),
        files: ReportFiles::new(&cli.metrics, &out_dir, &stem),
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S %Z").to_string(),
    };
    let markdown = build_markdown(&report);
    let (md_path, html_path) = write_documents(&out_dir, &stem, &markdown)?;
    info!(rows = feed.len(), profile = profile.id, "Report written");

    println!("Wrote: {}", md_path.display());
    println!("Wrote: {}", html_path.display());

    if !feed.is_empty() {
        println!();
        println!("{}", recent_runs_table(&feed.recent(TABLE_ROWS)));
    }
    Ok(())
}

fn recent_runs_table(rows: &[&MetricsRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["timestamp (UTC)", "threads", "pp", "tg", "t/s", "J/token", "net_W (W)"]
                .into_iter()
                .map(|title| {
                    Cell::new(title)
                        .fg(Color::Cyan)
                        .add_attribute(Attribute::Bold)
                }),
        );

    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    for row in rows {
        table.add_row(vec![
            Cell::new(text(&row.timestamp)).fg(Color::Green),
            Cell::new(text(&row.threads)),
            Cell::new(text(&row.prompt_tokens)),
            Cell::new(text(&row.gen_tokens)),
            Cell::new(text(&row.tokens_per_sec)),
            Cell::new(text(&row.j_per_token)),
            Cell::new(text(&row.net_w)),
        ]);
    }
    table
}
