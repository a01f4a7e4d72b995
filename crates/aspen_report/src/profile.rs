//! Benchmarked model profiles.

use crate::error::{ReportError, Result};

/// Estimated runtime memory, in MiB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryBreakdown {
    pub model_buffer: f64,
    pub kv_cache: f64,
    pub compute_buffers: f64,
    pub output_buffer: f64,
    pub token_caches: f64,
}

impl MemoryBreakdown {
    /// Sum of all buffers in GB (1024 MiB).
    pub fn total_gb(&self) -> f64 {
        (self.model_buffer
            + self.kv_cache
            + self.compute_buffers
            + self.output_buffer
            + self.token_caches)
            / 1024.0
    }
}

/// Static facts about one benchmarked model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelProfile {
    pub id: &'static str,
    /// Report heading
    pub title: &'static str,
    pub default_model_path: &'static str,
    /// File stem for the written documents
    pub report_stem: &'static str,
    pub context_size: u32,
    pub offload: &'static str,
    pub memory: MemoryBreakdown,
    /// Decimal places for the model, KV and compute buffer lines
    pub buffer_precision: usize,
    pub memory_note: Option<&'static str>,
    pub battery_preamble: Option<&'static str>,
    pub battery_note: Option<&'static str>,
}

impl ModelProfile {
    pub fn gemma_2_2b() -> Self {
        Self {
            id: "gemma-2-2b",
            title: "Gemma 2 2B (Q4_K_M) – Full Benchmark Report",
            default_model_path: "models/gemma-2-2b-it-Q4_K_M.gguf",
            report_stem: "gemma_full_report",
            context_size: 4096,
            offload: "Metal (-ngl 20 unless otherwise specified)",
            memory: MemoryBreakdown {
                model_buffer: 1600.0,
                kv_cache: 256.0,
                compute_buffers: 350.0,
                output_buffer: 0.7,
                token_caches: 1.0,
            },
            buffer_precision: 0,
            memory_note: None,
            battery_preamble: None,
            battery_note: None,
        }
    }

    pub fn gentinst() -> Self {
        Self {
            id: "gentinst",
            title: "GentInst – Full Benchmark Report",
            default_model_path: "models/gentinst.gguf",
            report_stem: "gentinst_full_report",
            context_size: 4096,
            offload: "CPU-only (-ngl 0)",
            memory: MemoryBreakdown {
                model_buffer: 940.0,
                kv_cache: 224.0,
                compute_buffers: 300.0,
                output_buffer: 0.58,
                token_caches: 0.93,
            },
            buffer_precision: 2,
            memory_note: Some(
                "Notes: KV cache grows roughly linearly with context size; halving ctx to 2048 reduces KV to ~112 MiB. Values are estimates for Q4_K_M quantized GentInst (1.5B params).",
            ),
            battery_preamble: Some(
                "Using net average power and J/token from the latest run. Override batteries via env `BATTERY_WH` (comma-separated).",
            ),
            battery_note: Some(
                "Note: Power units auto-detected (mW→W). Averages are over idle/active sampling windows.",
            ),
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::gemma_2_2b(), Self::gentinst()]
    }

    pub fn ids() -> Vec<&'static str> {
        Self::all().into_iter().map(|p| p.id).collect()
    }

    pub fn from_id(id: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|p| p.id.eq_ignore_ascii_case(id.trim()))
            .ok_or_else(|| ReportError::UnknownProfile(id.to_string()))
    }
}
