// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque, io};

use crate::{CaretStyle, InputEvent, Pos, TerminalMode, TerminalSurface,
            WindowGeometry, keypress};

/// A simulated terminal: a `width` x `height` grid of cells with a cursor, scripted
/// input, and switches to make individual calls fail.
///
/// Writes at the cursor wrap eagerly (the cursor moves to the next row as soon as the
/// last column is written) and scroll the grid up when they run past the bottom row.
/// Writes at an explicit position never move the cursor and are clipped at the end of
/// the grid.
#[derive(Debug, Clone)]
pub struct SurfaceMock {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<char>>,
    pub cursor: Pos,
    pub mode: TerminalMode,
    /// Every mode passed to [`TerminalSurface::set_mode`], in order.
    pub mode_history: Vec<TerminalMode>,
    pub caret_style: CaretStyle,
    /// Every style passed to [`TerminalSurface::set_caret_style`], in order.
    pub caret_history: Vec<CaretStyle>,
    pub input: VecDeque<InputEvent>,
    pub raw_lines: VecDeque<String>,
    /// Number of rows scrolled off the top so far.
    pub scroll_count: usize,
    pub fail_mode_query: bool,
    pub fail_cursor_query: bool,
    pub fail_writes: bool,
}

impl SurfaceMock {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![vec![' '; width]; height],
            cursor: Pos::default(),
            mode: TerminalMode::COOKED,
            mode_history: vec![],
            caret_style: CaretStyle::TerminalDefault,
            caret_history: vec![],
            input: VecDeque::new(),
            raw_lines: VecDeque::new(),
            scroll_count: 0,
            fail_mode_query: false,
            fail_cursor_query: false,
            fail_writes: false,
        }
    }

    #[must_use]
    pub fn with_input(mut self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.input.extend(events);
        self
    }

    /// Put `prompt` on screen at the cursor, as a host would before reading a line.
    #[must_use]
    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.put_cells(prompt);
        self
    }

    pub fn push_input(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.input.extend(events);
    }

    /// The text of `row`, with trailing blanks removed.
    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        self.grid
            .get(row)
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// `count` cells read in row major order starting at `pos`, clipped at the end of
    /// the grid.
    #[must_use]
    pub fn cells_from(&self, pos: Pos, count: usize) -> String {
        (self.linear(pos)..self.linear(pos) + count)
            .filter(|&index| index < self.width * self.height)
            .map(|index| self.grid[index / self.width][index % self.width])
            .collect()
    }

    fn linear(&self, pos: Pos) -> usize { pos.row * self.width + pos.col }

    fn scroll_up(&mut self) {
        self.grid.remove(0);
        self.grid.push(vec![' '; self.width]);
        self.scroll_count += 1;
    }

    fn next_row(&mut self) {
        self.cursor.col = 0;
        if self.cursor.row + 1 >= self.height {
            self.scroll_up();
        } else {
            self.cursor.row += 1;
        }
    }

    fn put_cells(&mut self, cells: &str) {
        for ch in cells.chars() {
            match ch {
                '\r' => self.cursor.col = 0,
                '\n' => self.next_row(),
                _ => {
                    self.grid[self.cursor.row][self.cursor.col] = ch;
                    self.cursor.col += 1;
                    if self.cursor.col == self.width {
                        self.next_row();
                    }
                }
            }
        }
    }

    fn put_cells_at(&mut self, pos: Pos, cells: impl Iterator<Item = char>) {
        let end = self.width * self.height;
        for (index, ch) in (self.linear(pos)..end).zip(cells) {
            self.grid[index / self.width][index % self.width] = ch;
        }
    }

    fn check_writable(&self) -> io::Result<()> {
        if self.fail_writes {
            Err(io::Error::other("write failed"))
        } else {
            Ok(())
        }
    }
}

impl TerminalSurface for SurfaceMock {
    fn get_mode(&mut self) -> io::Result<TerminalMode> {
        if self.fail_mode_query {
            return Err(io::Error::other("mode query failed"));
        }
        Ok(self.mode)
    }

    fn set_mode(&mut self, mode: TerminalMode) -> io::Result<()> {
        self.mode = mode;
        self.mode_history.push(mode);
        Ok(())
    }

    fn cursor_position(&mut self) -> io::Result<Pos> {
        if self.fail_cursor_query {
            return Err(io::Error::other("cursor query failed"));
        }
        Ok(self.cursor)
    }

    fn set_cursor_position(&mut self, pos: Pos) -> io::Result<()> {
        if pos.col >= self.width || pos.row >= self.height {
            return Err(io::Error::other(format!("{pos:?} is off screen")));
        }
        self.cursor = pos;
        Ok(())
    }

    fn window_geometry(&mut self) -> io::Result<WindowGeometry> {
        Ok(WindowGeometry {
            width: self.width,
            bottom_row: self.height - 1,
        })
    }

    fn write_cells(&mut self, cells: &str) -> io::Result<()> {
        self.check_writable()?;
        self.put_cells(cells);
        Ok(())
    }

    fn write_cells_at(&mut self, pos: Pos, cells: &str) -> io::Result<()> {
        self.check_writable()?;
        self.put_cells_at(pos, cells.chars());
        Ok(())
    }

    fn fill_blank(&mut self, pos: Pos, count: usize) -> io::Result<()> {
        self.check_writable()?;
        self.put_cells_at(pos, std::iter::repeat_n(' ', count));
        Ok(())
    }

    fn caret_style(&mut self) -> io::Result<CaretStyle> { Ok(self.caret_style) }

    fn set_caret_style(&mut self, style: CaretStyle) -> io::Result<()> {
        self.caret_style = style;
        self.caret_history.push(style);
        Ok(())
    }

    fn read_input_event(&mut self) -> io::Result<InputEvent> {
        self.input.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted input exhausted")
        })
    }

    fn read_raw_line(&mut self) -> io::Result<String> {
        self.raw_lines.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no raw line scripted")
        })
    }
}

/// One key down event per character of `text`.
pub fn type_text(text: &str) -> impl Iterator<Item = InputEvent> {
    text.chars()
        .map(|ch| InputEvent::Keyboard(keypress! { @char ch }))
}
