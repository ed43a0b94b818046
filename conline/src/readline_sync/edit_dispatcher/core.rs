// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::event_handlers;
use crate::{CaretStyle, HistoryNav, InputEvent, LineBuffer, ReadlineContext, ScreenSync};

/// Whether printable keys shift the tail right or replace the unit at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum EditMode {
    Insert,
    #[default]
    Overwrite,
}

impl EditMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            EditMode::Insert => EditMode::Overwrite,
            EditMode::Overwrite => EditMode::Insert,
        }
    }

    /// Thin caret while inserting, block caret while overwriting.
    #[must_use]
    pub fn caret_style(self) -> CaretStyle {
        match self {
            EditMode::Insert => CaretStyle::Thin,
            EditMode::Overwrite => CaretStyle::Block,
        }
    }
}

/// Set of control codes (`0x00` .. `0x1f`) that end a read early. Bit `n` stands for
/// the unit with code `n`, so `1 << 9` is `Tab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WakeMask(pub u32);

impl WakeMask {
    pub const NONE: WakeMask = WakeMask(0);

    #[must_use]
    pub fn with_unit(self, unit: char) -> Self {
        match Self::bit(unit) {
            Some(bit) => WakeMask(self.0 | bit),
            None => self,
        }
    }

    #[must_use]
    pub fn contains(&self, unit: char) -> bool {
        Self::bit(unit).is_some_and(|bit| self.0 & bit != 0)
    }

    fn bit(unit: char) -> Option<u32> {
        let code = u32::from(unit);
        (code < u32::BITS).then(|| 1 << code)
    }
}

/// What the session loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Continue,
    /// `Enter` was pressed. The buffer holds the (alias expanded) line.
    Submitted,
    /// A wake mask unit arrived.
    EarlyReturn,
}

/// Per read editing state. The shared services (history, aliases, clipboard,
/// history search, config) come from the [`ReadlineContext`] passed to
/// [`EditDispatcher::dispatch`].
#[derive(Debug)]
pub struct EditDispatcher {
    pub buffer: LineBuffer,
    pub mode: EditMode,
    pub wake_mask: WakeMask,
    pub nav: HistoryNav,
}

impl EditDispatcher {
    #[must_use]
    pub fn new(buffer: LineBuffer, mode: EditMode, wake_mask: WakeMask) -> Self {
        Self {
            buffer,
            mode,
            wake_mask,
            nav: HistoryNav::default(),
        }
    }

    /// Apply one input event to the buffer and the screen.
    pub fn dispatch(
        &mut self,
        event: &InputEvent,
        screen: &mut ScreenSync<'_>,
        context: &mut ReadlineContext,
    ) -> DispatchOutcome {
        tracing::debug!(
            message = "dispatch",
            event = ?event,
            cursor = self.buffer.cursor(),
            len = self.buffer.len(),
            mode = %self.mode
        );

        match event {
            InputEvent::Keyboard(press) => {
                event_handlers::handle_key_press(self, *press, screen, context)
            }
            InputEvent::BracketedPaste(text) => event_handlers::handle_paste(self, text, screen),
            InputEvent::KeyRelease(_) | InputEvent::Resize { .. } => DispatchOutcome::Continue,
        }
    }
}
