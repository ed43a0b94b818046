// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Simple macro to create a [`Result`] with an [`Ok`] variant. It is just syntactic sugar
/// that helps having to write `Ok(())`.
/// - If no arg is passed in then it will return `Ok(())`.
/// - If an arg is passed in then it will return `Ok($arg)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Equivalent of [`assert_eq!`] but with pretty diffs, via `pretty_assertions`.
#[macro_export]
macro_rules! assert_eq2 {
    ($($params:tt)*) => {
        pretty_assertions::assert_eq!($($params)*)
    };
}

/// Run a terminal surface call whose failure must not abort the edit. On error the
/// failure is logged with the name of the operation and [`None`] is returned, so the
/// caller can fall back to the last state it observed.
///
/// ```ignore
/// let maybe_pos = best_effort!("cursor_position", surface.cursor_position());
/// ```
#[macro_export]
macro_rules! best_effort {
    ($op:literal, $expr:expr) => {
        match $expr {
            Ok(it) => Some(it),
            Err(err) => {
                ::tracing::warn!(
                    message = "terminal surface call failed",
                    op = $op,
                    error = %err
                );
                None
            }
        }
    };
}
