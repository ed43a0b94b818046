// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::KeyModifiers;

/// Which modifier keys were held when a key event was generated. The editor only cares
/// about `Ctrl` for word navigation, but `Shift` and `Alt` are tracked so that shifted
/// characters can be told apart from `Alt` chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    Pressed,
    #[default]
    NotPressed,
}

impl ModifierKeysMask {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn is_ctrl_pressed(&self) -> bool { self.ctrl_key_state == KeyState::Pressed }

    #[must_use]
    pub fn is_alt_pressed(&self) -> bool { self.alt_key_state == KeyState::Pressed }

    /// True if nothing but `Shift` (or nothing at all) is held.
    #[must_use]
    pub fn is_shift_or_none(&self) -> bool {
        !self.is_ctrl_pressed() && !self.is_alt_pressed()
    }
}

/// Returns [None] if no modifier bits are set.
#[must_use]
pub fn convert_key_modifiers(modifiers: &KeyModifiers) -> Option<ModifierKeysMask> {
    if modifiers.is_empty() {
        None
    } else {
        Some(ModifierKeysMask::from(*modifiers))
    }
}

impl From<KeyModifiers> for ModifierKeysMask {
    /// `intersects` is used (not `contains`) so that extra bits like `SUPER` don't hide
    /// the ones we track.
    fn from(other: KeyModifiers) -> ModifierKeysMask {
        let mut it = ModifierKeysMask::new();

        if other.intersects(KeyModifiers::SHIFT) {
            it.shift_key_state = KeyState::Pressed;
        }
        if other.intersects(KeyModifiers::CONTROL) {
            it.ctrl_key_state = KeyState::Pressed;
        }
        if other.intersects(KeyModifiers::ALT) {
            it.alt_key_state = KeyState::Pressed;
        }

        it
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_empty_mask() {
        let mask = ModifierKeysMask::new();
        assert_eq2!(mask.shift_key_state, KeyState::NotPressed);
        assert_eq2!(mask.ctrl_key_state, KeyState::NotPressed);
        assert_eq2!(mask.alt_key_state, KeyState::NotPressed);
        assert!(mask.is_shift_or_none());
    }

    #[test]
    fn test_ctrl_mask() {
        let mask = ModifierKeysMask::new().with_ctrl();
        assert!(mask.is_ctrl_pressed());
        assert!(!mask.is_alt_pressed());
        assert!(!mask.is_shift_or_none());
    }

    #[test]
    fn test_from_crossterm_modifiers() {
        let mask = ModifierKeysMask::from(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq2!(mask, ModifierKeysMask::new().with_ctrl().with_shift());

        assert_eq2!(convert_key_modifiers(&KeyModifiers::NONE), None);
        assert_eq2!(
            convert_key_modifiers(&KeyModifiers::ALT),
            Some(ModifierKeysMask::new().with_alt())
        );
    }
}
