//! Shared constants: app metadata, chat-template markers and llama-server defaults.

pub mod app;
pub mod server;
pub mod template;
