// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{Event, KeyEventKind};

use super::{KeyPress, convert_key_event};

/// One event read from the terminal surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Key down (or auto repeat).
    Keyboard(KeyPress),
    /// Key up. Only reported by terminals that support it; the editor ignores these.
    KeyRelease(KeyPress),
    /// Text pasted by the terminal emulator.
    BracketedPaste(String),
    /// The window was resized.
    Resize { columns: usize, rows: usize },
}

impl InputEvent {
    #[must_use]
    pub fn is_key_down(&self) -> bool { matches!(self, InputEvent::Keyboard(_)) }
}

impl From<KeyPress> for InputEvent {
    fn from(press: KeyPress) -> Self { InputEvent::Keyboard(press) }
}

/// Crossterm events the editor has no use for (mouse, focus) fail to convert.
impl TryFrom<Event> for InputEvent {
    type Error = ();

    fn try_from(event: Event) -> Result<Self, Self::Error> {
        match event {
            Event::Key(key_event) => {
                let press = convert_key_event(&key_event).ok_or(())?;
                Ok(match key_event.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        InputEvent::Keyboard(press)
                    }
                    KeyEventKind::Release => InputEvent::KeyRelease(press),
                })
            }
            Event::Paste(text) => Ok(InputEvent::BracketedPaste(text)),
            Event::Resize(columns, rows) => Ok(InputEvent::Resize {
                columns: usize::from(columns),
                rows: usize::from(rows),
            }),
            Event::FocusGained | Event::FocusLost | Event::Mouse(_) => Err(()),
        }
    }
}
