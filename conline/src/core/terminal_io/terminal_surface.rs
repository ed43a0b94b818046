// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The terminal primitives the editor is built on. The editor never prints escape
//! sequences itself; it asks a [`TerminalSurface`] to read key events, move the cursor
//! and write cells. Each rendered cell is one [`char`] in the strings passed to
//! [`TerminalSurface::write_cells`] and friends.

use std::io;

use super::InputEvent;

/// A zero based cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self { Self { row, col } }
}

/// Window geometry as seen by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    /// Number of cells per row. Writes wrap at this column.
    pub width: usize,
    /// The last visible row. Writing past it scrolls the window.
    pub bottom_row: usize,
}

/// Terminal mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalMode {
    /// The terminal delivers whole lines (cooked mode).
    pub line_input: bool,
    /// Typed characters are echoed.
    pub echo_input: bool,
    /// Writing past the last column continues on the next row.
    pub wrap_at_eol: bool,
}

impl TerminalMode {
    /// Cooked mode: the host expects a line at a time with echo.
    pub const COOKED: Self = Self {
        line_input: true,
        echo_input: true,
        wrap_at_eol: true,
    };

    /// What the editor switches to while it reads key events one at a time.
    pub const KEY_AT_A_TIME: Self = Self {
        line_input: false,
        echo_input: false,
        wrap_at_eol: true,
    };

    /// The host asked for line input with echo, so an edited read makes sense.
    #[must_use]
    pub fn wants_line_editing(&self) -> bool { self.line_input || self.echo_input }
}

/// Visual caret size. [`CaretStyle::Thin`] signals insert mode, [`CaretStyle::Block`]
/// overwrite mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum CaretStyle {
    /// Whatever the terminal (or the user's settings) shows by default.
    #[default]
    TerminalDefault,
    Thin,
    Block,
}

/// The terminal collaborator. Every call may fail; the editor treats failures during
/// an edit as non fatal.
pub trait TerminalSurface {
    /// # Errors
    /// Returns an error if the terminal mode can't be queried.
    fn get_mode(&mut self) -> io::Result<TerminalMode>;

    /// # Errors
    /// Returns an error if the terminal mode can't be changed.
    fn set_mode(&mut self, mode: TerminalMode) -> io::Result<()>;

    /// # Errors
    /// Returns an error if the cursor position can't be read.
    fn cursor_position(&mut self) -> io::Result<Pos>;

    /// # Errors
    /// Returns an error if the cursor can't be moved.
    fn set_cursor_position(&mut self, pos: Pos) -> io::Result<()>;

    /// # Errors
    /// Returns an error if the window size can't be read.
    fn window_geometry(&mut self) -> io::Result<WindowGeometry>;

    /// Write cells at the cursor and advance it, wrapping at the end of each row and
    /// scrolling the window when the bottom row is passed.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    fn write_cells(&mut self, cells: &str) -> io::Result<()>;

    /// Write cells starting at `pos` without moving the cursor. Output wraps at the end
    /// of each row and is clipped at the bottom of the window (it never scrolls).
    ///
    /// # Errors
    /// Returns an error if the write fails.
    fn write_cells_at(&mut self, pos: Pos, cells: &str) -> io::Result<()>;

    /// Blank `count` cells starting at `pos`, without moving the cursor. Same wrapping
    /// and clipping as [`TerminalSurface::write_cells_at`].
    ///
    /// # Errors
    /// Returns an error if the write fails.
    fn fill_blank(&mut self, pos: Pos, count: usize) -> io::Result<()>;

    /// # Errors
    /// Returns an error if the caret style can't be read.
    fn caret_style(&mut self) -> io::Result<CaretStyle>;

    /// # Errors
    /// Returns an error if the caret style can't be changed.
    fn set_caret_style(&mut self, style: CaretStyle) -> io::Result<()>;

    /// Block until the next input event.
    ///
    /// # Errors
    /// Returns an error if reading from the terminal fails, or input is exhausted.
    fn read_input_event(&mut self) -> io::Result<InputEvent>;

    /// Read a whole line the way the terminal would without the editor (no editing
    /// features). The returned text includes its line terminator.
    ///
    /// # Errors
    /// Returns an error if reading from the terminal fails.
    fn read_raw_line(&mut self) -> io::Result<String>;
}

impl std::fmt::Debug for dyn TerminalSurface + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn TerminalSurface")
    }
}

/// Move `pos` by `delta` cells along the row major cell grid of the given `width`,
/// carrying into the previous or next row. The row saturates at zero.
///
/// ```
/// use conline::{Pos, offset_position};
///
/// assert_eq!(offset_position(Pos::new(3, 8), 4, 10), Pos::new(4, 2));
/// assert_eq!(offset_position(Pos::new(3, 1), -3, 10), Pos::new(2, 8));
/// ```
#[must_use]
pub fn offset_position(pos: Pos, delta: isize, width: usize) -> Pos {
    let width = width.max(1);
    let linear = pos.row * width + pos.col;
    let target = linear.saturating_add_signed(delta);
    Pos::new(target / width, target % width)
}

/// Saturating conversion, cell counts never come near [`isize::MAX`].
#[must_use]
pub fn signed(it: usize) -> isize { isize::try_from(it).unwrap_or(isize::MAX) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;
    use test_case::test_case;

    #[test_case(Pos::new(0, 0), 5, 10, Pos::new(0, 5) ; "same row")]
    #[test_case(Pos::new(0, 9), 1, 10, Pos::new(1, 0) ; "carry into next row")]
    #[test_case(Pos::new(2, 0), -1, 10, Pos::new(1, 9) ; "borrow from previous row")]
    #[test_case(Pos::new(1, 4), -25, 10, Pos::new(0, 0) ; "saturates at origin")]
    #[test_case(Pos::new(0, 3), 27, 10, Pos::new(3, 0) ; "several rows")]
    fn test_offset_position(pos: Pos, delta: isize, width: usize, expected: Pos) {
        assert_eq2!(offset_position(pos, delta, width), expected);
    }

    #[test]
    fn test_wants_line_editing() {
        assert!(TerminalMode::COOKED.wants_line_editing());
        assert!(!TerminalMode::KEY_AT_A_TIME.wants_line_editing());
    }
}
