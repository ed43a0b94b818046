// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Synchronous line editing: the buffer, its mirror on the terminal cells, the key
//! dispatcher, and the services a read relies on (history, aliases, clipboard,
//! history search, config).

// Attach.
pub mod alias_expander;
pub mod clipboard_service;
pub mod edit_dispatcher;
pub mod edit_session;
pub mod history_search;
pub mod line_buffer;
pub mod readline_config;
pub mod readline_history;
pub mod render_width;
pub mod screen_sync;

#[cfg(test)]
mod integration_tests;

// Re-export.
pub use alias_expander::*;
pub use clipboard_service::*;
pub use edit_dispatcher::*;
pub use edit_session::*;
pub use history_search::*;
pub use line_buffer::*;
pub use readline_config::*;
pub use readline_history::*;
pub use render_width::*;
pub use screen_sync::*;
