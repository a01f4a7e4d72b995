pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod render;
pub mod runtime;

#[cfg(test)]
mod tests;

pub use config::ChatConfig;
pub use error::{Result, RuntimeError};
pub use input::{classify_input, InputAction, InputEvent, InputSource};
pub use render::Renderer;
pub use runtime::{notice_for, LoopState, Runtime};
