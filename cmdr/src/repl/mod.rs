// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod clap_config;
pub mod repl_app;
pub mod ui_str;

// Re-export.
pub use clap_config::*;
pub use repl_app::*;
