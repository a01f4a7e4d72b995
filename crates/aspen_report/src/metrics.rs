//! Benchmark metrics feed.
//!
//! One row per benchmark run, read from CSV (header row) or JSON Lines.
//! Values are kept as text so the report shows exactly what was recorded.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{ReportError, Result};

/// One benchmark run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsRow {
    pub timestamp: Option<String>,
    pub threads: Option<String>,
    pub prompt_tokens: Option<String>,
    pub gen_tokens: Option<String>,
    pub tokens_per_sec: Option<String>,
    pub j_per_token: Option<String>,
    pub net_w: Option<String>,
    pub idle_w: Option<String>,
    pub active_w: Option<String>,
}

impl MetricsRow {
    fn from_fields(mut fields: HashMap<String, String>) -> Self {
        let mut take = |key: &str| fields.remove(key).filter(|v| !v.trim().is_empty());
        Self {
            timestamp: take("timestamp"),
            threads: take("threads"),
            prompt_tokens: take("prompt_tokens"),
            gen_tokens: take("gen_tokens"),
            tokens_per_sec: take("tokens_per_sec"),
            j_per_token: take("j_per_token"),
            net_w: take("net_W"),
            idle_w: take("idle_W"),
            active_w: take("active_W"),
        }
    }

    /// Net average power draw in watts, when recorded and numeric.
    pub fn net_watts(&self) -> Option<f64> {
        parse_number(self.net_w.as_deref())
    }

    /// Energy per generated token in joules, when recorded and numeric.
    pub fn joules_per_token(&self) -> Option<f64> {
        parse_number(self.j_per_token.as_deref())
    }
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value?.trim().parse().ok()
}

/// Rows in recording order, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MetricsFeed {
    rows: Vec<MetricsRow>,
}

impl MetricsFeed {
    pub fn new(rows: Vec<MetricsRow>) -> Self {
        Self { rows }
    }

    /// Load a feed, picking the format from the extension.
    ///
    /// `.jsonl` and `.ndjson` are read as JSON Lines, anything else as CSV.
    /// A missing file is an empty feed.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Metrics file not found, using empty feed");
            return Ok(Self::default());
        }

        let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
        let is_jsonl = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson"));

        let feed = if is_jsonl {
            Self::from_jsonl(BufReader::new(file))?
        } else {
            Self::from_csv(file)?
        };
        debug!(path = %path.display(), rows = feed.len(), "Loaded metrics feed");
        Ok(feed)
    }

    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in reader.deserialize::<HashMap<String, String>>() {
            rows.push(MetricsRow::from_fields(record?));
        }
        Ok(Self { rows })
    }

    pub fn from_jsonl<R: BufRead>(reader: R) -> Result<Self> {
        let mut rows = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let object: HashMap<String, Value> = serde_json::from_str(&line)
                .map_err(|source| ReportError::Jsonl { line: line_no, source })?;
            let fields = object
                .into_iter()
                .filter_map(|(key, value)| value_text(value).map(|text| (key, text)))
                .collect();
            rows.push(MetricsRow::from_fields(fields));
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Most recently recorded row.
    pub fn latest(&self) -> Option<&MetricsRow> {
        self.rows.last()
    }

    /// Up to `n` rows, latest first.
    pub fn recent(&self, n: usize) -> Vec<&MetricsRow> {
        self.rows.iter().rev().take(n).collect()
    }
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
