//! llama.cpp `llama-server` provider module
//!
//! Talks to the native `/completion` and `/health` endpoints.
//! API docs: https://github.com/ggml-org/llama.cpp/tree/master/tools/server

mod convert;
mod provider;
mod types;

pub use convert::strip_stop_sequences;
pub use provider::LlamaServerClient;
pub use types::{LlamaCompletionRequest, LlamaCompletionResponse, LlamaServerConfig};
