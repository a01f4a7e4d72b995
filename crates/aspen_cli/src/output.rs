//! Terminal output helpers.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `indicatif` for the spinner shown while a request is in flight

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

pub fn header(text: &str) {
    println!("{}", style(text).bold().green());
    println!("{}", style("=".repeat(text.chars().count() + 1)).green());
}

/// Startup check passed.
pub fn ready_line(text: &str) -> String {
    format!("✅ {}", style(text).bright())
}

/// Startup check failed; the session will not start.
pub fn fatal_line(text: &str) -> String {
    format!("❌ {}", style(format!("Error: {text}")).red().bold())
}

pub fn error(text: &str) {
    eprintln!("{} {}", style("✗").red(), style(text).bright());
}

pub fn warning(text: &str) {
    eprintln!("{} {}", style("!").yellow(), style(text).bright());
}

pub fn dim(text: &str) {
    println!("{}", style(text).dim());
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    println!("  {} {}", style(key).cyan().bold(), value);
}

/// Create a spinner for async operations.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
