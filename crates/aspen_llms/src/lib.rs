//! aspen_llms: completion client for a locally hosted llama-server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            dyn InferenceClient               │
//! │   complete(request, timeout) / health()      │
//! └──────────────────────┬───────────────────────┘
//!                        │
//!                        ▼
//!              ┌───────────────────┐      POST /completion
//!              │ LlamaServerClient │ ───► GET  /health
//!              └───────────────────┘
//! ```
//!
//! Every transport, status and decode failure is converted into an
//! [`InferenceError`] at this boundary; callers never see raw `reqwest`
//! errors.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use aspen_llms::{CompletionRequest, InferenceClient, LlamaServerClient, SamplingConfig};
//!
//! # async fn run() -> aspen_llms::Result<()> {
//! let client = LlamaServerClient::from_url("http://localhost:8080")?;
//! client.health(Duration::from_secs(5)).await?;
//!
//! let request = CompletionRequest::new("<|im_start|>user\nhi<|im_end|>\n", SamplingConfig::default());
//! let response = client.complete(request, Duration::from_secs(60)).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod providers;
pub mod types;


pub use client::InferenceClient;
pub use error::{InferenceError, Result};
pub use providers::llama_server::{LlamaServerClient, LlamaServerConfig, strip_stop_sequences};
pub use types::{CompletionRequest, InferenceResponse, SamplingConfig};
