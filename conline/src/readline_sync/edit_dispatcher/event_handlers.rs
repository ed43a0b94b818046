// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::core::{DispatchOutcome, EditDispatcher, EditMode};
use crate::{CapacityExceeded, FunctionKey, Key, KeyPress, LINE_TERMINATOR, NavNewer,
            ReadlineContext, ScreenSync, SpecialKey, best_effort, expand_aliases,
            lock_history};

/// Route a key down event to its handler.
pub fn handle_key_press(
    dispatcher: &mut EditDispatcher,
    press: KeyPress,
    screen: &mut ScreenSync<'_>,
    context: &mut ReadlineContext,
) -> DispatchOutcome {
    let ctrl = press.is_ctrl();
    let config = &context.config;

    match press.key() {
        Key::ModifierOnly => DispatchOutcome::Continue,
        Key::SpecialKey(SpecialKey::Left) => {
            handle_left(dispatcher, screen, ctrl.then_some(config.word_break_chars.as_str()))
        }
        Key::SpecialKey(SpecialKey::Right) => {
            handle_right(dispatcher, screen, ctrl.then_some(config.word_break_chars.as_str()))
        }
        Key::SpecialKey(SpecialKey::Home) => handle_home(dispatcher, screen, ctrl),
        Key::SpecialKey(SpecialKey::End) => handle_end(dispatcher, screen, ctrl),
        Key::SpecialKey(SpecialKey::Backspace) => handle_backspace(
            dispatcher,
            screen,
            ctrl.then_some(config.erase_word_break_chars.as_str()),
        ),
        Key::SpecialKey(SpecialKey::Delete) => handle_delete(
            dispatcher,
            screen,
            ctrl.then_some(config.erase_word_break_chars.as_str()),
        ),
        Key::SpecialKey(SpecialKey::Up) => handle_up(dispatcher, screen, context),
        Key::SpecialKey(SpecialKey::Down) => handle_down(dispatcher, screen, context),
        Key::SpecialKey(SpecialKey::Insert) => handle_insert(dispatcher, screen),
        Key::SpecialKey(SpecialKey::Esc) => handle_esc(dispatcher, screen),
        Key::SpecialKey(SpecialKey::Enter) if ctrl => DispatchOutcome::Continue,
        Key::SpecialKey(SpecialKey::Enter) => handle_enter(dispatcher, screen, context),
        Key::FunctionKey(FunctionKey::F7) => {
            handle_history_search(dispatcher, screen, context)
        }
        Key::Character('v' | 'V') if ctrl && !press.mask().is_alt_pressed() => {
            handle_clipboard_paste(dispatcher, screen, context)
        }
        _ => handle_default(dispatcher, press, screen),
    }
}

fn log_rejected(what: &str, error: CapacityExceeded) {
    tracing::warn!(message = "edit rejected", what = what, error = %error);
}

// Cursor movement.

/// `word_break` is [Some] when the word navigation modifier is held.
fn handle_left(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
    word_break: Option<&str>,
) -> DispatchOutcome {
    let buffer = &mut dispatcher.buffer;
    let cursor = buffer.cursor();
    if cursor > 0 {
        let target = match word_break {
            Some(breakset) => buffer.find_prev_boundary(cursor, breakset),
            None => cursor - 1,
        };
        screen.move_cursor(buffer, target);
    }
    DispatchOutcome::Continue
}

fn handle_right(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
    word_break: Option<&str>,
) -> DispatchOutcome {
    let buffer = &mut dispatcher.buffer;
    let cursor = buffer.cursor();
    if cursor < buffer.len() {
        let target = match word_break {
            Some(breakset) => buffer.find_next_boundary(cursor, breakset),
            None => cursor + 1,
        };
        screen.move_cursor(buffer, target);
    }
    DispatchOutcome::Continue
}

/// `Ctrl+Home` erases everything before the cursor.
fn handle_home(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
    ctrl: bool,
) -> DispatchOutcome {
    let buffer = &mut dispatcher.buffer;
    let cursor = buffer.cursor();
    if cursor > 0 {
        if ctrl {
            screen.erase_back(buffer, cursor);
        } else {
            screen.move_cursor(buffer, 0);
        }
    }
    DispatchOutcome::Continue
}

/// `Ctrl+End` erases everything from the cursor on.
fn handle_end(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
    ctrl: bool,
) -> DispatchOutcome {
    let buffer = &mut dispatcher.buffer;
    let (cursor, len) = (buffer.cursor(), buffer.len());
    if cursor < len {
        if ctrl {
            screen.erase_forward(buffer, len - cursor);
        } else {
            screen.move_cursor(buffer, len);
        }
    }
    DispatchOutcome::Continue
}

// Erasing.

fn handle_backspace(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
    word_break: Option<&str>,
) -> DispatchOutcome {
    let buffer = &mut dispatcher.buffer;
    let cursor = buffer.cursor();
    if cursor > 0 {
        let start = match word_break {
            Some(breakset) => buffer.find_prev_boundary(cursor, breakset),
            None => cursor - 1,
        };
        screen.erase_back(buffer, cursor - start);
    }
    DispatchOutcome::Continue
}

fn handle_delete(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
    word_break: Option<&str>,
) -> DispatchOutcome {
    let buffer = &mut dispatcher.buffer;
    let cursor = buffer.cursor();
    if cursor < buffer.len() {
        let end = match word_break {
            Some(breakset) => buffer.find_next_boundary(cursor, breakset),
            None => cursor + 1,
        };
        screen.erase_forward(buffer, end - cursor);
    }
    DispatchOutcome::Continue
}

// History.

fn handle_up(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
    context: &ReadlineContext,
) -> DispatchOutcome {
    let history = lock_history(&context.history);
    if let Some(entry) = dispatcher.nav.older(&history)
        && let Err(error) = screen.replace_line(&mut dispatcher.buffer, entry)
    {
        log_rejected("history entry", error);
    }
    DispatchOutcome::Continue
}

fn handle_down(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
    context: &ReadlineContext,
) -> DispatchOutcome {
    let history = lock_history(&context.history);
    match dispatcher.nav.newer(&history) {
        NavNewer::Entry(entry) => {
            if let Err(error) = screen.replace_line(&mut dispatcher.buffer, entry) {
                log_rejected("history entry", error);
            }
        }
        NavNewer::Present | NavNewer::Unchanged => {}
    }
    DispatchOutcome::Continue
}

fn handle_history_search(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
    context: &mut ReadlineContext,
) -> DispatchOutcome {
    let Some(search) = context.history_search.as_mut() else {
        tracing::debug!(message = "history search is not configured");
        return DispatchOutcome::Continue;
    };

    // Don't hold the lock while the picker runs.
    let entries: Vec<String> = lock_history(&context.history)
        .entries_oldest_first()
        .map(str::to_string)
        .collect();

    if let Some(picked) = search.search(&entries)
        && let Err(error) = screen.replace_line(&mut dispatcher.buffer, &picked)
    {
        log_rejected("history search result", error);
    }
    DispatchOutcome::Continue
}

// Mode and line level keys.

fn handle_insert(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
) -> DispatchOutcome {
    dispatcher.mode = dispatcher.mode.toggled();
    best_effort!(
        "set_caret_style",
        screen.surface().set_caret_style(dispatcher.mode.caret_style())
    );
    DispatchOutcome::Continue
}

fn handle_esc(dispatcher: &mut EditDispatcher, screen: &mut ScreenSync<'_>) -> DispatchOutcome {
    if let Err(error) = screen.replace_line(&mut dispatcher.buffer, "") {
        log_rejected("clear line", error);
    }
    dispatcher.nav.reset();
    DispatchOutcome::Continue
}

/// Submit. History gets the line as typed, the caller gets it alias expanded and
/// terminated.
fn handle_enter(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
    context: &ReadlineContext,
) -> DispatchOutcome {
    let buffer = &mut dispatcher.buffer;
    let len = buffer.len();
    if buffer.cursor() < len {
        screen.move_cursor(buffer, len);
    }

    if !buffer.is_empty() {
        lock_history(&context.history).push_front(&buffer.to_string());
    }

    if let Err(error) =
        expand_aliases(buffer, context.aliases.as_ref(), &context.config.program_name)
    {
        tracing::warn!(message = "alias expansion skipped", error = %error);
    }

    if let Err(error) = screen.write_terminator(buffer, LINE_TERMINATOR) {
        log_rejected("line terminator", error);
    }
    DispatchOutcome::Submitted
}

// Text entry.

/// Pasted text is inserted whatever the edit mode.
pub fn handle_paste(
    dispatcher: &mut EditDispatcher,
    text: &str,
    screen: &mut ScreenSync<'_>,
) -> DispatchOutcome {
    let text: Vec<char> = text.chars().collect();
    if let Err(error) = screen.insert_text(&mut dispatcher.buffer, &text) {
        log_rejected("paste", error);
    }
    DispatchOutcome::Continue
}

fn handle_clipboard_paste(
    dispatcher: &mut EditDispatcher,
    screen: &mut ScreenSync<'_>,
    context: &mut ReadlineContext,
) -> DispatchOutcome {
    match context.clipboard.try_to_get_content_from_clipboard() {
        Ok(text) => handle_paste(dispatcher, &text, screen),
        Err(error) => {
            tracing::warn!(message = "clipboard unavailable", error = %error);
            DispatchOutcome::Continue
        }
    }
}

/// Printable units are typed. Non printable units in the wake mask end the read.
/// Everything else is ignored.
fn handle_default(
    dispatcher: &mut EditDispatcher,
    press: KeyPress,
    screen: &mut ScreenSync<'_>,
) -> DispatchOutcome {
    let Some(unit) = press.unit() else {
        return DispatchOutcome::Continue;
    };

    if !unit.is_control() {
        let buffer = &mut dispatcher.buffer;
        let result = match dispatcher.mode {
            EditMode::Insert => screen.insert_text(buffer, &[unit]),
            EditMode::Overwrite => screen.overwrite_unit(buffer, unit),
        };
        if let Err(error) = result {
            log_rejected("typed unit", error);
        }
        return DispatchOutcome::Continue;
    }

    if dispatcher.wake_mask.contains(unit) {
        return handle_wake(dispatcher, unit);
    }

    DispatchOutcome::Continue
}

/// Append a padding space, then store `unit` at the cursor (which doesn't move). When
/// the cursor was at the end the unit lands on the padding; otherwise it replaces the
/// unit under the cursor and the padding stays at the end. The screen isn't touched.
fn handle_wake(dispatcher: &mut EditDispatcher, unit: char) -> DispatchOutcome {
    let buffer = &mut dispatcher.buffer;
    let result = buffer
        .append(&[' '])
        .and_then(|()| buffer.overwrite(buffer.cursor(), unit));
    if let Err(error) = result {
        log_rejected("wake unit", error);
    }
    tracing::debug!(message = "early return", unit = ?unit, len = buffer.len());
    DispatchOutcome::EarlyReturn
}
