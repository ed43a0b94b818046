// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Logging setup. The editor itself only emits [`tracing`] events; nothing is printed
//! unless the host installs a subscriber with [`try_initialize_logging_global`] or
//! [`try_initialize_logging_thread_local`].
//!
//! Stdout is the surface being edited, so display output should go to
//! [`DisplayPreference::Stderr`] or logs should go to a file.

// Attach.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
