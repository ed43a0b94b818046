// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{ModifierKeysMask, convert_key_modifiers};

/// Shorthand to build a [`KeyPress`].
///
/// ```
/// use conline::{keypress, Key, KeyPress, ModifierKeysMask, SpecialKey};
///
/// let plain = keypress! { @char 'a' };
/// assert_eq!(plain, KeyPress::Plain { key: Key::Character('a') });
///
/// let ctrl_left = keypress! { @special ModifierKeysMask::new().with_ctrl(), SpecialKey::Left };
/// assert!(ctrl_left.is_ctrl());
/// ```
#[macro_export]
macro_rules! keypress {
    // @char
    (@char $arg_char : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::Character($arg_char),
        }
    };

    (@char $arg_modifiers : expr, $arg_char : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::Character($arg_char),
        }
    };

    // @special
    (@special $arg_special : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    (@special $arg_modifiers : expr, $arg_special : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    // @fn
    (@fn $arg_function : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::FunctionKey($arg_function),
        }
    };
}

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum KeyPress {
    Plain { key: Key },
    WithModifiers { key: Key, mask: ModifierKeysMask },
}

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Key {
    Character(char),
    SpecialKey(SpecialKey),
    FunctionKey(FunctionKey),
    /// `Shift`, `Ctrl`, `Alt`, ... pressed on their own.
    ModifierOnly,
}

#[derive(Clone, Debug, Eq, PartialEq, Copy, strum_macros::Display)]
pub enum FunctionKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

#[derive(Clone, Debug, Eq, PartialEq, Copy, strum_macros::Display)]
pub enum SpecialKey {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab, /* Shift + Tab */
    Delete,
    Insert,
    Esc,
}

impl KeyPress {
    #[must_use]
    pub fn key(&self) -> Key {
        match self {
            KeyPress::Plain { key } | KeyPress::WithModifiers { key, .. } => *key,
        }
    }

    #[must_use]
    pub fn mask(&self) -> ModifierKeysMask {
        match self {
            KeyPress::Plain { .. } => ModifierKeysMask::new(),
            KeyPress::WithModifiers { mask, .. } => *mask,
        }
    }

    #[must_use]
    pub fn is_ctrl(&self) -> bool { self.mask().is_ctrl_pressed() }

    /// The character unit this key press produces, if any. Plain (or shifted)
    /// characters produce themselves, `Ctrl` + letter produces the matching control
    /// code (`Ctrl+A` is `0x01`), `Tab` produces `'\t'`.
    #[must_use]
    pub fn unit(&self) -> Option<char> {
        let mask = self.mask();
        match self.key() {
            Key::Character(ch) if mask.is_shift_or_none() => Some(ch),
            Key::Character(ch) if mask.is_ctrl_pressed() && !mask.is_alt_pressed() => {
                control_unit(ch)
            }
            Key::SpecialKey(SpecialKey::Tab) if mask.is_shift_or_none() => Some('\t'),
            _ => None,
        }
    }
}

/// `Ctrl` chord to control code, for the range `@` .. `_` (case insensitive).
fn control_unit(ch: char) -> Option<char> {
    let upper = ch.to_ascii_uppercase();
    if !('@'..='_').contains(&upper) {
        return None;
    }
    u8::try_from(upper).ok().map(|byte| char::from(byte & 0x1f))
}

/// Convert a crossterm [`KeyEvent`] into a [`KeyPress`]. The event kind (press,
/// repeat, release) is handled by the caller. Returns [None] for keys the editor has
/// no use for (media keys, caps lock, ...).
#[must_use]
pub fn convert_key_event(key_event: &KeyEvent) -> Option<KeyPress> {
    match key_event {
        // If character keys, then ignore SHIFT or NONE modifiers.
        KeyEvent {
            code: KeyCode::Char(character),
            modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            ..
        } => Some(keypress! { @char *character }),
        // Non character keys.
        _ => {
            let key = copy_code_from_key_event(key_event)?;
            Some(match convert_key_modifiers(&key_event.modifiers) {
                Some(mask) => KeyPress::WithModifiers { key, mask },
                None => KeyPress::Plain { key },
            })
        }
    }
}

fn match_fn_key(fn_key: u8) -> Option<Key> {
    let it = match fn_key {
        1 => FunctionKey::F1,
        2 => FunctionKey::F2,
        3 => FunctionKey::F3,
        4 => FunctionKey::F4,
        5 => FunctionKey::F5,
        6 => FunctionKey::F6,
        7 => FunctionKey::F7,
        8 => FunctionKey::F8,
        9 => FunctionKey::F9,
        10 => FunctionKey::F10,
        11 => FunctionKey::F11,
        12 => FunctionKey::F12,
        _ => return None,
    };
    Some(Key::FunctionKey(it))
}

fn copy_code_from_key_event(key_event: &KeyEvent) -> Option<Key> {
    // Make the code easier to read below using this alias.
    type KC = KeyCode;
    let special = match key_event.code {
        KC::Backspace => SpecialKey::Backspace,
        KC::Enter => SpecialKey::Enter,
        KC::Left => SpecialKey::Left,
        KC::Right => SpecialKey::Right,
        KC::Up => SpecialKey::Up,
        KC::Down => SpecialKey::Down,
        KC::Home => SpecialKey::Home,
        KC::End => SpecialKey::End,
        KC::PageUp => SpecialKey::PageUp,
        KC::PageDown => SpecialKey::PageDown,
        KC::Tab => SpecialKey::Tab,
        KC::BackTab => SpecialKey::BackTab,
        KC::Delete => SpecialKey::Delete,
        KC::Insert => SpecialKey::Insert,
        KC::Esc => SpecialKey::Esc,
        KC::F(fn_key) => return match_fn_key(fn_key),
        KC::Char(character) => return Some(Key::Character(character)),
        KC::Modifier(_) => return Some(Key::ModifierOnly),
        _ => return None,
    };
    Some(Key::SpecialKey(special))
}
