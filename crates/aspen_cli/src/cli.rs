//! CLI argument definitions using clap derive macros.

use clap::Parser;

/// Interactive terminal chat with a local Aspen 4B llama-server.
///
/// Settings come from the environment (ASPEN_SERVER_URL, ASPEN_TIMEOUT_SECS,
/// ASPEN_HISTORY_PAIRS, ...) and from `.aspen/env` files.
#[derive(Parser)]
#[command(name = "aspen", about, version)]
pub struct Cli {}
