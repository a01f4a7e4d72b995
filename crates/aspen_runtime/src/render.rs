//! Output seam for the conversation loop.

use aspen_core::ChatEvent;

/// Receives loop events in order and presents them.
///
/// Rendering is synchronous so a reply is fully written before the loop
/// prompts for the next line.
pub trait Renderer: Send {
    fn render(&mut self, event: &ChatEvent) -> std::io::Result<()>;
}
