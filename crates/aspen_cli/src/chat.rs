//! The chat session: banner, pre-flight check, conversation loop.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use aspen_constant::{app, server};
use aspen_llms::{LlamaServerClient, LlamaServerConfig};
use aspen_runtime::{ChatConfig, Runtime, RuntimeError};
use console::{Term, style};
use tracing::info;

use crate::output;
use crate::render::ConsoleRenderer;
use crate::terminal::TerminalInput;

/// Exit code when the pre-flight check fails.
pub const EXIT_SERVER_UNAVAILABLE: i32 = 1;

/// Run one chat session and return the process exit code.
///
/// Every way the conversation itself can end exits 0, faults included, once
/// the diagnostic is printed.
pub async fn handle() -> Result<i32> {
    let config = ChatConfig::from_env();
    let server = LlamaServerConfig::new(&config.server_url)
        .map_err(|e| RuntimeError::ConfigError(e.to_string()))
        .context("ASPEN_SERVER_URL")?;

    let client = Arc::new(LlamaServerClient::new(server));
    banner(client.config());
    let mut runtime = Runtime::new(client.clone(), config);

    let spinner = output::spinner("Checking llama-server...");
    let ready = runtime.preflight().await;
    spinner.finish_and_clear();

    let (mut out, mut err) = (Term::stdout(), Term::stderr());
    if let Some(code) = report_preflight(&ready, client.config(), &mut out, &mut err)? {
        return Ok(code);
    }

    let mut input = TerminalInput::spawn();
    let mut renderer = ConsoleRenderer::stdio();
    let reason = runtime.run(&mut input, &mut renderer).await;
    info!(?reason, graceful = reason.is_graceful(), "Session finished");

    Ok(0)
}

fn banner(server: &LlamaServerConfig) {
    output::header(&format!("🌲 {} Terminal Chat", app::DISPLAY_NAME));
    output::dim("Type 'quit', 'exit', or Ctrl+C to end");
    output::kv("Server:", server.base_url.as_str().trim_end_matches('/'));
    println!();
}

/// Print the outcome of the pre-flight check.
///
/// Returns the exit code when the session must not start.
fn report_preflight<O: Write, E: Write>(
    result: &aspen_runtime::Result<()>,
    server: &LlamaServerConfig,
    out: &mut O,
    err: &mut E,
) -> io::Result<Option<i32>> {
    let error = match result {
        Ok(()) => {
            writeln!(
                out,
                "{}",
                output::ready_line(&format!("{} server is running!", app::DISPLAY_NAME))
            )?;
            writeln!(out)?;
            return Ok(None);
        }
        Err(error) => error,
    };

    writeln!(
        err,
        "{}",
        output::fatal_line(&format!("llama-server not running on {}", server.authority()))
    )?;
    if let Some(port) = server.port() {
        writeln!(out, "Start it with: {}", server::launch_hint(port))?;
    }
    if let RuntimeError::ServerUnavailable { source, .. } = error {
        writeln!(out, "{}", style(format!("  ({source})")).dim())?;
    }
    Ok(Some(EXIT_SERVER_UNAVAILABLE))
}
