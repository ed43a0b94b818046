// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `conline-repl` reads lines with [`conline`] and echoes them back. Type `switch` to
//! flip between the editor (`R> ` prompt) and the terminal's own line reader
//! (`W> ` prompt), and `exit` to quit.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod repl;

// Re-export.
pub use repl::*;
