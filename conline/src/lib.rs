// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # conline
//!
//! A line oriented terminal input editor. Given a stream of key events from a
//! terminal, it keeps an editable [`LineBuffer`] in sync with the visible cell grid
//! and hands the completed line back to the caller when the user presses `Enter`.
//!
//! The editing engine lives in [`readline_sync`]. It never talks to a terminal
//! directly. Everything goes through the [`TerminalSurface`] trait, which has a real
//! implementation backed by `crossterm` ([`CrosstermSurface`]) and a simulated grid
//! for tests ([`SurfaceMock`]).
//!
//! ```no_run
//! use conline::{CrosstermSurface, ReadlineConfig, ReadlineContext};
//!
//! # fn main() -> miette::Result<()> {
//! let mut context = ReadlineContext::new(ReadlineConfig::from_env());
//! let mut surface = CrosstermSurface::default();
//! let output = context.read_line(&mut surface, 256, None).map_err(miette::Report::from)?;
//! print!("{}", output.text);
//! # Ok(())
//! # }
//! ```
//!
//! What the editor supports:
//! - Cursor movement by unit (`Left`, `Right`, `Home`, `End`) and by word (`Ctrl` +
//!   `Left`, `Right`).
//! - Deletion by unit and by word, plus delete to start or end of line (`Ctrl` +
//!   `Home`, `End`).
//! - Insert and overwrite modes, toggled by `Insert`.
//! - History recall (`Up`, `Down`), shared across reads via [`SafeHistory`].
//! - An external history search helper (`F7`), see [`ProcessHistorySearch`].
//! - Clipboard paste (`Ctrl` + `V` or a bracketed paste).
//! - Alias expansion on submit, see [`expand_aliases`].
//! - Early return on caller selected control units, see [`WakeMask`].

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod core;
pub mod readline_sync;

// Re-export.
pub use core::*;
pub use readline_sync::*;
