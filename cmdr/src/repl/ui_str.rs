// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

pub const EDITED_PROMPT: &str = "R> ";
pub const PLAIN_PROMPT: &str = "W> ";

#[must_use]
pub fn early_return_msg(line: &str) -> String { format!("[early return] {line:?}") }

#[must_use]
pub fn unrecoverable_error_msg(report: &miette::Report) -> String {
    format!("Could not read from the terminal: {report:?}")
}
