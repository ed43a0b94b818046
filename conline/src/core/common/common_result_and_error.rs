// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error types shared by the whole crate.
//!
//! Only [`ReadlineError`] ever reaches the caller of
//! [`ReadlineContext::read_line`](crate::ReadlineContext::read_line). Everything else
//! (surface hiccups, rejected edits, a missing history search helper) is logged and
//! absorbed by the editor.

use std::io;

/// Type alias to make it easy to work with [`miette::Result`] and
/// [`miette::Report`] in binaries and setup code.
pub type CommonResult<T> = miette::Result<T>;

/// Error returned from [`read_line()`](crate::ReadlineContext::read_line).
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ReadlineError {
    /// Reading the next input event (or the raw passthrough line) failed.
    #[error(transparent)]
    #[diagnostic(code(conline::io))]
    IO(#[from] io::Error),

    /// The terminal is not in line editing mode and the raw passthrough read could not
    /// produce a line either.
    #[error("terminal mode unavailable: {0}")]
    #[diagnostic(
        code(conline::mode_unavailable),
        help("Is stdin attached to a terminal?")
    )]
    ModeUnavailable(String),
}

/// An edit would grow the buffer past its fixed capacity. The buffer is left
/// untouched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("edit rejected, {requested} units would exceed capacity {capacity}")]
#[diagnostic(code(conline::capacity_exceeded))]
pub struct CapacityExceeded {
    pub capacity: usize,
    pub requested: usize,
}
