// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One call of [`ReadlineContext::read_line`] is one editing session: seed the buffer,
//! pump input events through the [`EditDispatcher`] until the line is submitted or a
//! wake mask unit arrives, then hand back an owned copy of the line.
//!
//! The services that outlive a session (history, aliases, clipboard, history search)
//! live in [`ReadlineContext`]. Sessions on one context never overlap since
//! [`ReadlineContext::read_line`] takes `&mut self`.

use std::{fmt::{Debug, Formatter},
          io};

use crate::{AliasLookup, AliasTable, ClipboardService, DispatchOutcome, EditDispatcher,
            HistoryList, HistorySearch, LineBuffer, ProcessHistorySearch,
            ReadlineConfig, ReadlineError, SafeHistory, ScreenSync, SystemClipboard,
            TerminalMode, TerminalSurface, WakeMask, best_effort};

/// Appended to a submitted line, and written to the surface on submit.
pub const LINE_TERMINATOR: &str = "\r\n";

/// How a read is carried out, decided once per call from the terminal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineReader {
    /// The surface delivers a whole line itself. No editing.
    RawRead,
    /// Key at a time editing through the [`EditDispatcher`].
    EditedRead,
}

impl LineReader {
    /// Edit only when the mode could be read and asks for line input or echo.
    #[must_use]
    pub fn from_mode(mode: Option<TerminalMode>) -> Self {
        match mode {
            Some(mode) if mode.wants_line_editing() => LineReader::EditedRead,
            _ => LineReader::RawRead,
        }
    }
}

/// Optional per call input to [`ReadlineContext::read_line`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadControl {
    /// Text already on screen, which the line starts with.
    pub initial_chars: String,
    /// Where in `initial_chars` the cursor is (on screen and in the buffer).
    pub initial_cursor: usize,
    pub wake_mask: WakeMask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum LineEnding {
    Submitted,
    EarlyReturn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadLineOutput {
    /// For [`LineEnding::Submitted`] this ends with [`LINE_TERMINATOR`].
    pub text: String,
    /// Length of `text` in character units.
    pub len: usize,
    pub ending: LineEnding,
}

impl ReadLineOutput {
    fn new(text: String, ending: LineEnding) -> Self {
        let len = text.chars().count();
        Self { text, len, ending }
    }

    /// `text` without the line terminator.
    #[must_use]
    pub fn line(&self) -> &str { self.text.trim_end_matches(['\r', '\n']) }
}

/// Process scoped services shared by every read.
pub struct ReadlineContext {
    pub history: SafeHistory,
    pub aliases: Box<dyn AliasLookup>,
    pub clipboard: Box<dyn ClipboardService>,
    pub history_search: Option<Box<dyn HistorySearch>>,
    pub config: ReadlineConfig,
}

impl Debug for ReadlineContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadlineContext")
            .field("history_len", &crate::lock_history(&self.history).len())
            .field("history_search", &self.history_search.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReadlineContext {
    /// Empty history bounded by the config, an empty [`AliasTable`], the system
    /// clipboard, and a [`ProcessHistorySearch`] if a command is configured.
    #[must_use]
    pub fn new(config: ReadlineConfig) -> Self {
        let history_search = config
            .history_search_command
            .as_deref()
            .and_then(|command| {
                ProcessHistorySearch::from_command_line(
                    command,
                    config.history_search_timeout,
                )
            })
            .map(|it| Box::new(it) as Box<dyn HistorySearch>);

        Self {
            history: HistoryList::new(config.history_max_entries).into_safe(),
            aliases: Box::new(AliasTable::new()),
            clipboard: Box::new(SystemClipboard),
            history_search,
            config,
        }
    }

    /// Share a history with other contexts.
    #[must_use]
    pub fn with_history(mut self, history: SafeHistory) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: Box<dyn AliasLookup>) -> Self {
        self.aliases = aliases;
        self
    }

    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardService>) -> Self {
        self.clipboard = clipboard;
        self
    }

    #[must_use]
    pub fn with_history_search(mut self, search: Option<Box<dyn HistorySearch>>) -> Self {
        self.history_search = search;
        self
    }

    /// Read one line from `surface`, editing it in place if the terminal mode allows.
    /// At most `capacity` units are accepted (the terminator is not counted).
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::IO`] if reading input fails.
    /// - [`ReadlineError::ModeUnavailable`] if the mode can't be read and the raw read
    ///   that replaces editing fails too.
    pub fn read_line(
        &mut self,
        surface: &mut dyn TerminalSurface,
        capacity: usize,
        control: Option<&ReadControl>,
    ) -> Result<ReadLineOutput, ReadlineError> {
        let mode = surface.get_mode();
        let reader = LineReader::from_mode(mode.as_ref().ok().copied());
        tracing::debug!(message = "read_line", reader = ?reader, capacity);

        match (reader, mode) {
            (LineReader::EditedRead, Ok(original_mode)) => {
                self.read_edited(surface, original_mode, capacity, control)
            }
            (_, mode) => read_raw(surface, capacity, mode.err()),
        }
    }

    fn read_edited(
        &mut self,
        surface: &mut dyn TerminalSurface,
        original_mode: TerminalMode,
        capacity: usize,
        control: Option<&ReadControl>,
    ) -> Result<ReadLineOutput, ReadlineError> {
        let buffer = seed_buffer(capacity, control);
        let wake_mask = control.map_or(WakeMask::NONE, |it| it.wake_mask);
        let mut dispatcher =
            EditDispatcher::new(buffer, self.config.initial_edit_mode, wake_mask);

        best_effort!("set_mode", surface.set_mode(TerminalMode::KEY_AT_A_TIME));
        let original_caret = best_effort!("caret_style", surface.caret_style());
        best_effort!(
            "set_caret_style",
            surface.set_caret_style(dispatcher.mode.caret_style())
        );

        let result = self.pump_events(surface, &mut dispatcher);

        if let Some(style) = original_caret {
            best_effort!("set_caret_style", surface.set_caret_style(style));
        }
        best_effort!("set_mode", surface.set_mode(original_mode));

        let ending = result?;
        Ok(ReadLineOutput::new(dispatcher.buffer.to_string(), ending))
    }

    fn pump_events(
        &mut self,
        surface: &mut dyn TerminalSurface,
        dispatcher: &mut EditDispatcher,
    ) -> io::Result<LineEnding> {
        let mut screen = ScreenSync::new(surface);
        loop {
            let event = screen.surface().read_input_event()?;
            match dispatcher.dispatch(&event, &mut screen, self) {
                DispatchOutcome::Continue => {}
                DispatchOutcome::Submitted => return Ok(LineEnding::Submitted),
                DispatchOutcome::EarlyReturn => return Ok(LineEnding::EarlyReturn),
            }
        }
    }
}

/// A buffer of `capacity` units that keeps room for [`LINE_TERMINATOR`].
fn session_buffer(capacity: usize) -> LineBuffer {
    LineBuffer::new(capacity).with_reserved_tail(LINE_TERMINATOR.chars().count())
}

/// The seed is clipped to what editing may fill, and the cursor to the seed.
fn seed_buffer(capacity: usize, control: Option<&ReadControl>) -> LineBuffer {
    let mut buffer = session_buffer(capacity);
    let Some(control) = control else {
        return buffer;
    };
    let seed: String = control
        .initial_chars
        .chars()
        .take(buffer.edit_limit())
        .collect();
    if buffer.replace_all(&seed).is_ok() {
        buffer.set_cursor(control.initial_cursor.min(buffer.len()));
    }
    buffer
}

/// Let the surface read the line. The content is clipped to `capacity` and the
/// terminator normalized. End of input gives an empty [`LineEnding::Submitted`] line.
fn read_raw(
    surface: &mut dyn TerminalSurface,
    capacity: usize,
    mode_error: Option<io::Error>,
) -> Result<ReadLineOutput, ReadlineError> {
    let raw = surface.read_raw_line().map_err(|error| match &mode_error {
        Some(mode_error) => ReadlineError::ModeUnavailable(format!(
            "{mode_error}, and the raw read failed: {error}"
        )),
        None => ReadlineError::IO(error),
    })?;

    if raw.is_empty() {
        return Ok(ReadLineOutput::new(raw, LineEnding::Submitted));
    }

    let mut buffer = session_buffer(capacity);
    let content: String = raw
        .trim_end_matches(['\r', '\n'])
        .chars()
        .take(buffer.edit_limit())
        .collect();
    let terminator: Vec<char> = LINE_TERMINATOR.chars().collect();
    let stored = buffer
        .replace_all(&content)
        .and_then(|()| buffer.append(&terminator));
    if let Err(error) = stored {
        tracing::warn!(message = "raw line clipped", error = %error);
    }
    Ok(ReadLineOutput::new(buffer.to_string(), LineEnding::Submitted))
}
