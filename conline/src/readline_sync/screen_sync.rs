// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keep the terminal cells in step with a [`LineBuffer`].
//!
//! The screen cursor always sits at the anchor (where the line started) advanced by
//! [`span_width`] of the units before the buffer cursor, carried across rows at the
//! window width. Each operation here edits the buffer and then rewrites only the cells
//! that changed: the unit(s) at the cursor and the shifted tail, plus blanks where a
//! tail got shorter.
//!
//! Writes that run past the bottom row scroll the window. Where that can happen the
//! landing row is pulled up by the number of rows scrolled.
//!
//! Surface failures never abort an edit. They are logged, and the last coordinate that
//! was observed (or computed) stands in for a fresh query.

use crate::{CapacityExceeded, LineBuffer, Pos, TerminalSurface, WindowGeometry,
            best_effort, cell_width, offset_position, render_span, render_unit, signed,
            signed_span_width, span_width};

/// Used only if the surface can't report its size on the very first query.
const FALLBACK_GEOMETRY: WindowGeometry = WindowGeometry {
    width: 80,
    bottom_row: 24,
};

#[derive(Debug)]
pub struct ScreenSync<'a> {
    surface: &'a mut dyn TerminalSurface,
    last_pos: Pos,
    last_geometry: WindowGeometry,
}

impl<'a> ScreenSync<'a> {
    pub fn new(surface: &'a mut dyn TerminalSurface) -> Self {
        let mut it = Self {
            surface,
            last_pos: Pos::default(),
            last_geometry: FALLBACK_GEOMETRY,
        };
        it.observe_cursor();
        it.observe_geometry();
        it
    }

    /// Direct access for the calls that aren't about cells (input, caret, mode).
    pub fn surface(&mut self) -> &mut dyn TerminalSurface { &mut *self.surface }

    fn observe_cursor(&mut self) -> Pos {
        if let Some(pos) = best_effort!("cursor_position", self.surface.cursor_position()) {
            self.last_pos = pos;
        }
        self.last_pos
    }

    fn observe_geometry(&mut self) -> WindowGeometry {
        if let Some(geometry) =
            best_effort!("window_geometry", self.surface.window_geometry())
        {
            self.last_geometry = geometry;
        }
        self.last_geometry
    }

    fn place_cursor(&mut self, pos: Pos) {
        best_effort!("set_cursor_position", self.surface.set_cursor_position(pos));
        self.last_pos = pos;
    }

    fn write_at(&mut self, pos: Pos, cells: &str) {
        if !cells.is_empty() {
            best_effort!("write_cells_at", self.surface.write_cells_at(pos, cells));
        }
    }

    fn blank(&mut self, pos: Pos, count: usize) {
        if count > 0 {
            best_effort!("fill_blank", self.surface.fill_blank(pos, count));
        }
    }

    /// Write `cells` at the screen cursor (which must be at `pos`), blank `stale`
    /// cells after them, and land the cursor `advance` cells past `pos`. Compensates
    /// for any scrolling the write caused. Returns the landing position.
    fn rewrite_from(&mut self, pos: Pos, cells: &str, advance: usize, stale: usize) -> Pos {
        let geometry = self.observe_geometry();
        let cell_count = cells.chars().count();

        if !cells.is_empty() {
            best_effort!("write_cells", self.surface.write_cells(cells));
        }

        let end = offset_position(pos, signed(cell_count), geometry.width);
        let overflow = end.row.saturating_sub(geometry.bottom_row);
        let pos = Pos::new(pos.row.saturating_sub(overflow), pos.col);
        if overflow > 0 {
            tracing::debug!(message = "write scrolled the window", rows = overflow);
        }

        let tail_end = offset_position(pos, signed(cell_count), geometry.width);
        self.blank(tail_end, stale);

        let landing = offset_position(pos, signed(advance), geometry.width);
        self.place_cursor(landing);
        landing
    }

    /// Move the buffer cursor to `new_offset` and the screen cursor by the matching
    /// number of cells. Returns that (signed) number of cells.
    ///
    /// # Panics
    ///
    /// Panics if `new_offset > len`.
    pub fn move_cursor(&mut self, buffer: &mut LineBuffer, new_offset: usize) -> isize {
        let distance = signed_span_width(buffer.chars(), buffer.cursor(), new_offset);
        buffer.set_cursor(new_offset);
        if distance != 0 {
            let pos = self.observe_cursor();
            let width = self.observe_geometry().width;
            self.place_cursor(offset_position(pos, distance, width));
        }
        distance
    }

    /// Erase the `length` units before the cursor, leaving the cursor where the first
    /// of them was.
    ///
    /// # Panics
    ///
    /// Panics if `length > cursor`.
    pub fn erase_back(&mut self, buffer: &mut LineBuffer, length: usize) {
        let end = buffer.cursor();
        assert!(length <= end, "erase back {length} past start from {end}");
        let start = end - length;
        let vacated = span_width(buffer.chars(), start, end);

        self.move_cursor(buffer, start);
        let pos = self.last_pos;
        buffer.erase(start, length);

        let tail = render_span(buffer.chars(), start, buffer.len());
        self.write_at(pos, &tail);
        let width = self.last_geometry.width;
        self.blank(offset_position(pos, signed(tail.chars().count()), width), vacated);
        self.place_cursor(pos);
    }

    /// Erase the `length` units at the cursor. The cursor doesn't move.
    ///
    /// # Panics
    ///
    /// Panics if `cursor + length > len`.
    pub fn erase_forward(&mut self, buffer: &mut LineBuffer, length: usize) {
        let start = buffer.cursor();
        let vacated = span_width(buffer.chars(), start, start + length);
        buffer.erase(start, length);

        let pos = self.observe_cursor();
        let width = self.observe_geometry().width;
        let tail = render_span(buffer.chars(), start, buffer.len());
        self.write_at(pos, &tail);
        self.blank(offset_position(pos, signed(tail.chars().count()), width), vacated);
        self.place_cursor(pos);
    }

    /// Replace the whole line with `text` and put the cursor at its end.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] (with nothing changed) if `text` doesn't fit.
    pub fn replace_line(
        &mut self,
        buffer: &mut LineBuffer,
        text: &str,
    ) -> Result<(), CapacityExceeded> {
        let requested = text.chars().count();
        if requested > buffer.edit_limit() {
            return Err(CapacityExceeded {
                capacity: buffer.edit_limit(),
                requested,
            });
        }

        let old_width = span_width(buffer.chars(), 0, buffer.len());
        self.move_cursor(buffer, 0);
        let origin = self.last_pos;

        buffer.replace_all(text)?;
        buffer.set_cursor(buffer.len());
        let cells = render_span(buffer.chars(), 0, buffer.len());
        let new_width = cells.chars().count();
        self.rewrite_from(origin, &cells, new_width, old_width.saturating_sub(new_width));
        Ok(())
    }

    /// Insert `text` at the cursor and advance past it.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] (with nothing changed) if `text` doesn't fit.
    pub fn insert_text(
        &mut self,
        buffer: &mut LineBuffer,
        text: &[char],
    ) -> Result<(), CapacityExceeded> {
        let start = buffer.cursor();
        buffer.insert(start, text)?;
        let end = start + text.len();
        buffer.set_cursor(end);

        let pos = self.observe_cursor();
        let advance = span_width(buffer.chars(), start, end);
        let cells = render_span(buffer.chars(), start, buffer.len());
        self.rewrite_from(pos, &cells, advance, 0);
        Ok(())
    }

    /// Overwrite the unit at the cursor (append at the end of the line) and advance
    /// past it. If the old and new units render at different widths the tail is
    /// redrawn.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] (with nothing changed) when appending to a full
    /// buffer.
    pub fn overwrite_unit(
        &mut self,
        buffer: &mut LineBuffer,
        unit: char,
    ) -> Result<(), CapacityExceeded> {
        let at = buffer.cursor();
        let Some(&old) = buffer.chars().get(at) else {
            return self.insert_text(buffer, &[unit]);
        };

        buffer.overwrite(at, unit)?;
        buffer.set_cursor(at + 1);

        let pos = self.observe_cursor();
        let (old_width, new_width) = (cell_width(old), cell_width(unit));
        if old_width == new_width {
            let mut cells = String::new();
            render_unit(unit, &mut cells);
            self.rewrite_from(pos, &cells, new_width, 0);
        } else {
            let cells = render_span(buffer.chars(), at, buffer.len());
            self.rewrite_from(pos, &cells, new_width, old_width.saturating_sub(new_width));
        }
        Ok(())
    }

    /// Append the line terminator to the buffer and write it at the cursor. The
    /// screen moves on to the next line even if the buffer has no room for it.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] if the terminator doesn't fit in the buffer.
    pub fn write_terminator(
        &mut self,
        buffer: &mut LineBuffer,
        terminator: &str,
    ) -> Result<(), CapacityExceeded> {
        let units: Vec<char> = terminator.chars().collect();
        let appended = buffer.append(&units);
        best_effort!("write_cells", self.surface.write_cells(terminator));
        appended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SurfaceMock, assert_eq2};

    fn chars(text: &str) -> Vec<char> { text.chars().collect() }

    /// A surface with `prompt` on screen, and a buffer holding `text` that is already
    /// displayed after it with the cursor at the end.
    fn setup(width: usize, height: usize, prompt: &str, text: &str) -> (SurfaceMock, LineBuffer) {
        let mock = SurfaceMock::new(width, height).with_prompt(prompt).with_prompt(text);
        let buffer = LineBuffer::with_seed(64, text, text.chars().count()).unwrap();
        (mock, buffer)
    }

    #[test]
    fn test_move_cursor_wraps_rows() {
        let (mut mock, mut buffer) = setup(10, 5, "> ", "abcdefghijkl");
        assert_eq2!(mock.cursor, Pos::new(1, 4));
        {
            let mut screen = ScreenSync::new(&mut mock);
            assert_eq2!(screen.move_cursor(&mut buffer, 3), -9);
        }
        assert_eq2!(mock.cursor, Pos::new(0, 5));
        assert_eq2!(buffer.cursor(), 3);
    }

    #[test]
    fn test_move_cursor_counts_caret_escapes() {
        let mut mock = SurfaceMock::new(10, 5).with_prompt("a^Bc");
        let mut buffer = LineBuffer::with_seed(64, "a\u{2}c", 3).unwrap();
        {
            let mut screen = ScreenSync::new(&mut mock);
            assert_eq2!(screen.move_cursor(&mut buffer, 1), -3);
        }
        assert_eq2!(mock.cursor, Pos::new(0, 1));
    }

    #[test]
    fn test_erase_back_shifts_tail_and_blanks() {
        let (mut mock, mut buffer) = setup(20, 3, "> ", "hello world");
        {
            let mut screen = ScreenSync::new(&mut mock);
            screen.move_cursor(&mut buffer, 5);
            screen.erase_back(&mut buffer, 2);
        }
        assert_eq2!(buffer.to_string(), "hel world");
        assert_eq2!(mock.row_text(0), "> hel world");
        assert_eq2!(mock.cursor, Pos::new(0, 5));
    }

    #[test]
    fn test_erase_forward_keeps_cursor() {
        let (mut mock, mut buffer) = setup(20, 3, "> ", "hello world");
        {
            let mut screen = ScreenSync::new(&mut mock);
            screen.move_cursor(&mut buffer, 5);
            screen.erase_forward(&mut buffer, 6);
        }
        assert_eq2!(buffer.to_string(), "hello");
        assert_eq2!(mock.row_text(0), "> hello");
        assert_eq2!(mock.cursor, Pos::new(0, 7));
    }

    #[test]
    fn test_replace_line_shorter_blanks_leftover() {
        let (mut mock, mut buffer) = setup(8, 4, "> ", "a long line");
        {
            let mut screen = ScreenSync::new(&mut mock);
            screen.move_cursor(&mut buffer, 2);
            screen.replace_line(&mut buffer, "ok").unwrap();
        }
        assert_eq2!(mock.row_text(0), "> ok");
        assert_eq2!(mock.row_text(1), "");
        assert_eq2!(mock.cursor, Pos::new(0, 4));
        assert_eq2!(buffer.cursor(), 2);
    }

    #[test]
    fn test_replace_line_twice_is_idempotent() {
        let (mut mock, mut buffer) = setup(8, 4, "> ", "abc");
        {
            let mut screen = ScreenSync::new(&mut mock);
            screen.replace_line(&mut buffer, "xy").unwrap();
            screen.replace_line(&mut buffer, "xy").unwrap();
        }
        assert_eq2!(buffer.to_string(), "xy");
        assert_eq2!(buffer.cursor(), 2);
        assert_eq2!(mock.row_text(0), "> xy");
        assert_eq2!(mock.cursor, Pos::new(0, 4));
    }

    #[test]
    fn test_replace_line_rejects_overflow_untouched() {
        let mut mock = SurfaceMock::new(8, 4).with_prompt("abc");
        let mut buffer = LineBuffer::with_seed(4, "abc", 3).unwrap();
        {
            let mut screen = ScreenSync::new(&mut mock);
            assert!(screen.replace_line(&mut buffer, "abcde").is_err());
        }
        assert_eq2!(buffer.to_string(), "abc");
        assert_eq2!(mock.cursor, Pos::new(0, 3));
    }

    #[test]
    fn test_insert_text_mid_line() {
        let (mut mock, mut buffer) = setup(20, 3, "> ", "helo");
        {
            let mut screen = ScreenSync::new(&mut mock);
            screen.move_cursor(&mut buffer, 3);
            screen.insert_text(&mut buffer, &chars("l")).unwrap();
        }
        assert_eq2!(mock.row_text(0), "> hello");
        assert_eq2!(mock.cursor, Pos::new(0, 6));
        assert_eq2!(buffer.cursor(), 4);
    }

    #[test]
    fn test_insert_text_scroll_compensation() {
        // The line sits on the bottom row. Inserting pushes the tail onto a new row,
        // which scrolls the window up by one.
        let mut mock = SurfaceMock::new(6, 2);
        mock.cursor = Pos::new(1, 0);
        let mut mock = mock.with_prompt("> ab");
        let mut buffer = LineBuffer::with_seed(64, "ab", 2).unwrap();
        {
            let mut screen = ScreenSync::new(&mut mock);
            screen.move_cursor(&mut buffer, 1);
            screen.insert_text(&mut buffer, &chars("XYZ")).unwrap();
        }
        assert_eq2!(mock.scroll_count, 1);
        assert_eq2!(mock.row_text(0), "> aXYZ");
        assert_eq2!(mock.row_text(1), "b");
        assert_eq2!(mock.cursor, Pos::new(1, 0));
        assert_eq2!(buffer.cursor(), 4);
    }

    #[test]
    fn test_overwrite_same_and_different_width() {
        let (mut mock, mut buffer) = setup(20, 3, "", "abcd");
        {
            let mut screen = ScreenSync::new(&mut mock);
            screen.move_cursor(&mut buffer, 1);
            screen.overwrite_unit(&mut buffer, 'X').unwrap();
            assert_eq2!(buffer.to_string(), "aXcd");
            screen.overwrite_unit(&mut buffer, '\u{3}').unwrap();
        }
        assert_eq2!(buffer.to_string(), "aX\u{3}d");
        assert_eq2!(mock.row_text(0), "aX^Cd");
        assert_eq2!(mock.cursor, Pos::new(0, 4));
    }

    #[test]
    fn test_overwrite_narrower_blanks_tail() {
        let mut mock = SurfaceMock::new(20, 3).with_prompt("^Cxy");
        let mut buffer = LineBuffer::with_seed(64, "\u{3}xy", 3).unwrap();
        {
            let mut screen = ScreenSync::new(&mut mock);
            screen.move_cursor(&mut buffer, 0);
            screen.overwrite_unit(&mut buffer, 'a').unwrap();
        }
        assert_eq2!(mock.row_text(0), "axy");
        assert_eq2!(mock.cursor, Pos::new(0, 1));
    }

    #[test]
    fn test_overwrite_at_end_appends() {
        let (mut mock, mut buffer) = setup(20, 3, "", "ab");
        {
            let mut screen = ScreenSync::new(&mut mock);
            screen.overwrite_unit(&mut buffer, 'c').unwrap();
        }
        assert_eq2!(buffer.to_string(), "abc");
        assert_eq2!(mock.cursor, Pos::new(0, 3));
    }

    #[test]
    fn test_failed_cursor_query_falls_back_to_last_known() {
        let (mut mock, mut buffer) = setup(20, 3, "", "abcd");
        {
            let mut screen = ScreenSync::new(&mut mock);
            screen.move_cursor(&mut buffer, 2);
        }
        assert_eq2!(mock.cursor, Pos::new(0, 2));

        mock.fail_cursor_query = true;
        {
            // Nothing was ever observed, so the origin stands in.
            let mut screen = ScreenSync::new(&mut mock);
            screen.move_cursor(&mut buffer, 3);
            // From here on the computed position is the last known one.
            screen.move_cursor(&mut buffer, 4);
        }
        assert_eq2!(mock.cursor, Pos::new(0, 2));
        assert_eq2!(buffer.cursor(), 4);
    }
}
