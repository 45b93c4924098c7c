// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::KeyModifiers;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
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
}

/// Returns `None` when no modifier bit is set, so that the caller can produce a
/// [`crate::KeyPress::Plain`].
#[must_use]
pub fn convert_key_modifiers(modifiers: &KeyModifiers) -> Option<ModifierKeysMask> {
    let mask = ModifierKeysMask::from(*modifiers);
    if mask == ModifierKeysMask::default() {
        None
    } else {
        Some(mask)
    }
}

impl From<KeyModifiers> for ModifierKeysMask {
    /// Difference in meaning between `intersects` and `contains`:
    /// - `intersects` -> means that the given bit shows up in your variable, but it might
    ///   contain other bits.
    /// - `contains` -> means that your variable ONLY contains these bits.
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
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_mask() {
        let mask = ModifierKeysMask::new();
        assert_eq!(mask.shift_key_state, KeyState::NotPressed);
        assert_eq!(mask.ctrl_key_state, KeyState::NotPressed);
        assert_eq!(mask.alt_key_state, KeyState::NotPressed);
        assert_eq!(convert_key_modifiers(&KeyModifiers::NONE), None);
    }

    #[test]
    fn test_ctrl_alt_mask() {
        let mask = ModifierKeysMask::from(KeyModifiers::CONTROL | KeyModifiers::ALT);
        assert_eq!(mask, ModifierKeysMask::new().with_ctrl().with_alt());
    }

    #[test]
    fn test_unsupported_modifiers_collapse_to_none() {
        // SUPER is not tracked by the mask.
        assert_eq!(convert_key_modifiers(&KeyModifiers::SUPER), None);
    }
}
