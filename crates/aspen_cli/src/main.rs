//! CLI entry point for the Aspen terminal chat.

mod chat;
mod cli;
mod output;
mod render;
mod terminal;

use std::path::{Path, PathBuf};

use aspen_constant::app::{DATA_DIR, ENV_FILE};
use clap::Parser;

use crate::cli::Cli;

/// Nearest `relative` file in `start` or one of its ancestors.
fn find_upwards(start: &Path, relative: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(32)
        .map(|dir| dir.join(relative))
        .find(|candidate| candidate.exists())
}

/// Load env files. Values already set win, so the order is also the priority:
/// 1) process env  2) .aspen/env (project)  3) ~/.aspen/env  4) .env (project root)
fn load_aspen_config() {
    let cwd = std::env::current_dir().ok();
    let project_env = Path::new(DATA_DIR).join(ENV_FILE);

    if let Some(path) = cwd.as_deref().and_then(|dir| find_upwards(dir, &project_env)) {
        let _ = dotenvy::from_path(&path);
    }
    if let Some(home) = dirs::home_dir() {
        let global_env = home.join(DATA_DIR).join(ENV_FILE);
        if global_env.exists() {
            let _ = dotenvy::from_path(&global_env);
        }
    }
    if let Some(path) = cwd.as_deref().and_then(|dir| find_upwards(dir, Path::new(".env"))) {
        let _ = dotenvy::from_path(&path);
    }
}

#[tokio::main]
async fn main() {
    load_aspen_config();
    let _cli = Cli::parse();

    if let Err(e) = aspen_observability::init_from_env("aspen-chat") {
        output::warning(&format!("Logging disabled: {e}"));
    }

    let code = match chat::handle().await {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{e:#}"));
            1
        }
    };

    aspen_observability::shutdown();
    if code != 0 {
        std::process::exit(code);
    }
}
