// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, IsTerminal, Write};

use crossterm::{QueueableCommand, cursor, event, style::Print, terminal};

use super::{CaretStyle, InputEvent, Pos, TerminalMode, TerminalSurface, WindowGeometry,
            offset_position};

/// [`TerminalSurface`] backed by crossterm, writing to stdout and reading stdin.
///
/// "Key at a time" mode is crossterm's raw mode plus bracketed paste. Crossterm can't
/// read the caret shape back, so the last style set through this surface is
/// remembered instead.
#[derive(Debug, Default)]
pub struct CrosstermSurface {
    caret_style: CaretStyle,
}

fn to_u16(it: usize) -> io::Result<u16> {
    u16::try_from(it).map_err(|_| io::Error::other(format!("{it} is off screen")))
}

impl CrosstermSurface {
    /// Clip `count` cells starting at `pos` so that nothing is written past the last
    /// cell of the window (which would scroll it).
    fn clip_to_window(&mut self, pos: Pos, count: usize) -> io::Result<usize> {
        let geometry = self.window_geometry()?;
        let window_cells = (geometry.bottom_row + 1) * geometry.width;
        let start = pos.row * geometry.width + pos.col;
        Ok(count.min(window_cells.saturating_sub(start)))
    }

    fn print_at(&mut self, pos: Pos, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .queue(cursor::SavePosition)?
            .queue(cursor::MoveTo(to_u16(pos.col)?, to_u16(pos.row)?))?
            .queue(Print(text))?
            .queue(cursor::RestorePosition)?;
        stdout.flush()
    }
}

impl TerminalSurface for CrosstermSurface {
    fn get_mode(&mut self) -> io::Result<TerminalMode> {
        if !io::stdin().is_terminal() {
            return Err(io::Error::other("stdin is not a terminal"));
        }
        Ok(if terminal::is_raw_mode_enabled()? {
            TerminalMode::KEY_AT_A_TIME
        } else {
            TerminalMode::COOKED
        })
    }

    fn set_mode(&mut self, mode: TerminalMode) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        if mode.line_input {
            stdout.queue(event::DisableBracketedPaste)?.flush()?;
            terminal::disable_raw_mode()
        } else {
            terminal::enable_raw_mode()?;
            stdout.queue(event::EnableBracketedPaste)?.flush()
        }
    }

    fn cursor_position(&mut self) -> io::Result<Pos> {
        let (col, row) = cursor::position()?;
        Ok(Pos::new(usize::from(row), usize::from(col)))
    }

    fn set_cursor_position(&mut self, pos: Pos) -> io::Result<()> {
        io::stdout()
            .lock()
            .queue(cursor::MoveTo(to_u16(pos.col)?, to_u16(pos.row)?))?
            .flush()
    }

    fn window_geometry(&mut self) -> io::Result<WindowGeometry> {
        let (columns, rows) = terminal::size()?;
        Ok(WindowGeometry {
            width: usize::from(columns),
            bottom_row: usize::from(rows).saturating_sub(1),
        })
    }

    /// Terminals defer the wrap after the last column until the next character
    /// arrives. When a write ends exactly on a row boundary the wrap is forced here,
    /// so the cursor always ends up where [`offset_position`] says it should.
    fn write_cells(&mut self, cells: &str) -> io::Result<()> {
        if cells.is_empty() {
            return Ok(());
        }
        let start = self.cursor_position()?;
        let width = self.window_geometry()?.width;
        let end = offset_position(start, super::signed(cells.chars().count()), width);

        let mut stdout = io::stdout().lock();
        stdout.queue(Print(cells))?;
        if end.col == 0 {
            stdout.queue(Print("\r\n"))?;
        }
        stdout.flush()
    }

    fn write_cells_at(&mut self, pos: Pos, cells: &str) -> io::Result<()> {
        let count = self.clip_to_window(pos, cells.chars().count())?;
        let clipped: String = cells.chars().take(count).collect();
        self.print_at(pos, &clipped)
    }

    fn fill_blank(&mut self, pos: Pos, count: usize) -> io::Result<()> {
        let count = self.clip_to_window(pos, count)?;
        self.print_at(pos, &" ".repeat(count))
    }

    fn caret_style(&mut self) -> io::Result<CaretStyle> { Ok(self.caret_style) }

    fn set_caret_style(&mut self, style: CaretStyle) -> io::Result<()> {
        let shape = match style {
            CaretStyle::TerminalDefault => cursor::SetCursorStyle::DefaultUserShape,
            CaretStyle::Thin => cursor::SetCursorStyle::SteadyUnderScore,
            CaretStyle::Block => cursor::SetCursorStyle::SteadyBlock,
        };
        io::stdout().lock().queue(shape)?.flush()?;
        self.caret_style = style;
        Ok(())
    }

    fn read_input_event(&mut self) -> io::Result<InputEvent> {
        loop {
            if let Ok(input_event) = InputEvent::try_from(event::read()?) {
                return Ok(input_event);
            }
        }
    }

    fn read_raw_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line)
    }
}
