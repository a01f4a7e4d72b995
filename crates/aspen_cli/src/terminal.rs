//! Stdin-backed input for the conversation loop.
//!
//! Lines are read on a dedicated thread so a blocked read never holds up
//! runtime shutdown. Ctrl+C is observed through tokio's signal handler.

use std::io::BufRead;

use aspen_constant::app::USER_LABEL;
use aspen_runtime::{InputEvent, InputSource};
use async_trait::async_trait;
use console::{Term, style};
use tokio::sync::mpsc;
use tracing::debug;

pub struct TerminalInput {
    lines: mpsc::Receiver<InputEvent>,
    term: Term,
}

impl TerminalInput {
    /// Start the reader thread.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(1);
        std::thread::spawn(move || read_lines(std::io::stdin().lock(), tx));
        Self {
            lines: rx,
            term: Term::stdout(),
        }
    }

    fn show_prompt(&self) {
        let prompt = format!("{}: ", style(USER_LABEL).cyan().bold());
        if let Err(e) = self.term.write_str(&prompt) {
            debug!(error = %e, "Failed to write prompt");
        }
    }
}

/// Forward every line from `reader` until end of input or a read error.
fn read_lines<R: BufRead>(reader: R, tx: mpsc::Sender<InputEvent>) {
    for line in reader.lines() {
        let event = match line {
            Ok(line) => InputEvent::Line(line),
            Err(e) => {
                let _ = tx.blocking_send(InputEvent::Failed(e.to_string()));
                return;
            }
        };
        if tx.blocking_send(event).is_err() {
            return;
        }
    }
    let _ = tx.blocking_send(InputEvent::Closed);
}

#[async_trait]
impl InputSource for TerminalInput {
    async fn next_event(&mut self) -> InputEvent {
        self.show_prompt();
        tokio::select! {
            event = self.lines.recv() => event.unwrap_or(InputEvent::Closed),
            _ = tokio::signal::ctrl_c() => InputEvent::Interrupt,
        }
    }

    async fn interrupted(&mut self) {
        if tokio::signal::ctrl_c().await.is_err() {
            // No handler could be installed; never report an interrupt.
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines_forwards_then_closes() {
        let (tx, mut rx) = mpsc::channel(8);
        read_lines(Cursor::new("hello\n\nquit\n"), tx);

        assert_eq!(rx.try_recv().unwrap(), InputEvent::Line("hello".to_string()));
        assert_eq!(rx.try_recv().unwrap(), InputEvent::Line(String::new()));
        assert_eq!(rx.try_recv().unwrap(), InputEvent::Line("quit".to_string()));
        assert_eq!(rx.try_recv().unwrap(), InputEvent::Closed);
    }

    #[test]
    fn test_read_lines_reports_invalid_utf8() {
        let (tx, mut rx) = mpsc::channel(8);
        read_lines(Cursor::new(vec![b'h', b'i', b'\n', 0xff, 0xfe, b'\n']), tx);

        assert_eq!(rx.try_recv().unwrap(), InputEvent::Line("hi".to_string()));
        assert!(matches!(rx.try_recv().unwrap(), InputEvent::Failed(_)));
        assert!(rx.try_recv().is_err());
    }
}
