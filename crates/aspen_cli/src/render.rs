//! Console presentation of conversation events.

use std::io::{self, Write};

use aspen_constant::app::{ASSISTANT_LABEL, DISPLAY_NAME, FAREWELL};
use aspen_core::{ChatEvent, EndReason};
use aspen_runtime::Renderer;
use console::{Term, style};
use indicatif::ProgressBar;

use crate::output;

pub struct ConsoleRenderer<O, E> {
    out: O,
    err: E,
    /// Spinner only when stdout is a terminal
    interactive: bool,
    spinner: Option<ProgressBar>,
    /// A request is in flight, so the cursor sits at the start of a line
    dispatching: bool,
}

impl ConsoleRenderer<Term, Term> {
    pub fn stdio() -> Self {
        let out = Term::stdout();
        let interactive = out.is_term();
        Self {
            interactive,
            ..ConsoleRenderer::with_writers(out, Term::stderr())
        }
    }
}

impl<O: Write, E: Write> ConsoleRenderer<O, E> {
    /// Render into arbitrary writers, without a spinner.
    pub fn with_writers(out: O, err: E) -> Self {
        Self {
            out,
            err,
            interactive: false,
            spinner: None,
            dispatching: false,
        }
    }

    fn settle(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.dispatching = false;
    }

    /// Labelled assistant line followed by a blank line.
    fn write_labelled(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}: {}", style(ASSISTANT_LABEL).green().bold(), text)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn write_farewell(&mut self, reason: &EndReason, dispatching: bool) -> io::Result<()> {
        match reason {
            EndReason::UserExit => writeln!(self.out, "{FAREWELL}")?,
            // The cursor is still on the prompt line.
            EndReason::InputClosed => writeln!(self.out, "\n{FAREWELL}")?,
            EndReason::Interrupted if dispatching => writeln!(self.out, "\n{FAREWELL}")?,
            EndReason::Interrupted => writeln!(self.out, "\n\n{FAREWELL}")?,
            EndReason::Fault { error } => {
                writeln!(self.err, "{}", style(format!("Error: {error}")).red())?;
                return self.err.flush();
            }
        }
        self.out.flush()
    }
}

impl<O: Write + Send, E: Write + Send> Renderer for ConsoleRenderer<O, E> {
    fn render(&mut self, event: &ChatEvent) -> io::Result<()> {
        match event {
            ChatEvent::DispatchStarted => {
                self.dispatching = true;
                if self.interactive {
                    self.spinner = Some(output::spinner(&format!(
                        "{DISPLAY_NAME} is thinking..."
                    )));
                }
                Ok(())
            }
            ChatEvent::Reply { text } => {
                self.settle();
                self.write_labelled(text)
            }
            ChatEvent::Notice { message, .. } => {
                self.settle();
                let message = style(message).yellow().to_string();
                self.write_labelled(&message)
            }
            ChatEvent::SessionEnd { reason } => {
                let dispatching = self.dispatching;
                self.settle();
                self.write_farewell(reason, dispatching)
            }
        }
    }
}
