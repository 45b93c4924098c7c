// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

use super::{ModifierKeysMask, convert_key_modifiers};

/// Examples.
///
/// ```rust
/// use r3bl_prompt::*;
///
/// let a = key_press!(@char 'a');
/// assert_eq!(a, KeyPress::Plain { key: Key::Character('a') });
///
/// let ctrl_c = key_press!(@char ModifierKeysMask::new().with_ctrl(), 'c');
/// assert_eq!(ctrl_c, KeyPress::ctrl('c'));
///
/// let enter = key_press!(@special SpecialKey::Enter);
/// assert_eq!(enter, KeyPress::Plain { key: Key::SpecialKey(SpecialKey::Enter) });
///
/// let f1 = key_press!(@fn FunctionKey::F1);
/// assert_eq!(f1, KeyPress::Plain { key: Key::FunctionKey(FunctionKey::F1) });
/// ```
#[macro_export]
macro_rules! key_press {
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

    (@fn $arg_modifiers : expr, $arg_function : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::FunctionKey($arg_function),
        }
    };
}

/// This is equivalent to [`crossterm::event::KeyEvent`] except that it is cleaned up
/// semantically and impossible states are removed. A prompt never sees a
/// [`crossterm::event::KeyEvent`], only this.
///
/// Please use the [`key_press!`] macro instead of directly constructing this struct.
///
/// It is also the key type of the [`crate::AliasRegistry`], which is why it is `Hash`.
///
/// # Only `KeyEventKind::Press` is converted
///
/// Terminals that support the kitty keyboard protocol also report `Release` and
/// `Repeat`. A prompt only reacts to presses, so the other kinds are dropped in the
/// conversion.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum KeyPress {
    Plain { key: Key },
    WithModifiers { key: Key, mask: ModifierKeysMask },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum Key {
    /// [char] that can be printed to the console.
    Character(char),
    SpecialKey(SpecialKey),
    FunctionKey(FunctionKey),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
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

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
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
    /// `Ctrl` + `character`, eg: `KeyPress::ctrl('c')` is the interrupt key.
    #[must_use]
    pub fn ctrl(character: char) -> Self {
        key_press!(@char ModifierKeysMask::new().with_ctrl(), character)
    }

    /// The printable character produced by this key press, if any. Keys pressed with
    /// `Ctrl` or `Alt` don't produce a character.
    #[must_use]
    pub fn printable_char(&self) -> Option<char> {
        match self {
            KeyPress::Plain {
                key: Key::Character(ch),
            } => Some(*ch),
            _ => None,
        }
    }

    #[must_use]
    pub fn special_key(&self) -> Option<SpecialKey> {
        match self {
            KeyPress::Plain {
                key: Key::SpecialKey(special_key),
            } => Some(*special_key),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_special(&self, special_key: SpecialKey) -> bool {
        self.special_key() == Some(special_key)
    }
}

/// Typecast / convert [`KeyEvent`] to [`KeyPress`].
///
/// There is special handling of displayable characters in this conversion. This occurs if
/// the [`KeyEvent`] is a [`KeyCode::Char`].
///
/// An example is typing "X" by pressing "Shift + X" on the keyboard, which shows up in
/// crossterm as "Shift + X". In this case, the [`KeyModifiers`] `SHIFT` and `NONE` are
/// ignored when converted into a [`KeyPress`]:
///
/// ```text
/// ╔════════════════════╦══════════════════════════════════════════════════════════╗
/// ║ User action        ║ Result                                                   ║
/// ╠════════════════════╬══════════════════════════════════════════════════════════╣
/// ║ Type "x"           ║ key_press! {@char 'x'}                                   ║
/// ╠════════════════════╬══════════════════════════════════════════════════════════╣
/// ║ Type "X"           ║ key_press! {@char 'X'} and not                           ║
/// ║ (Shift+X)          ║ key_press! {@char ModifierKeysMask::SHIFT, 'X'}          ║
/// ╚════════════════════╩══════════════════════════════════════════════════════════╝
/// ```
pub mod convert_key_event {
    use super::{FunctionKey, Key, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
                KeyPress, SpecialKey, convert_key_modifiers};

    impl TryFrom<KeyEvent> for KeyPress {
        type Error = ();

        fn try_from(key_event: KeyEvent) -> Result<Self, Self::Error> {
            if key_event.kind != KeyEventKind::Press {
                return Err(());
            }

            match key_event {
                // If character keys, then ignore SHIFT or NONE modifiers.
                KeyEvent {
                    code: KeyCode::Char(character),
                    modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                    ..
                } => Ok(key_press! { @char character }),
                // Non character keys.
                _ => {
                    let key = copy_code_from_key_event(&key_event).ok_or(())?;
                    match convert_key_modifiers(&key_event.modifiers) {
                        Some(mask) => Ok(KeyPress::WithModifiers { key, mask }),
                        None => Ok(KeyPress::Plain { key }),
                    }
                }
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

    #[must_use]
    pub fn copy_code_from_key_event(key_event: &KeyEvent) -> Option<Key> {
        // Make the code easier to read below using this alias.
        type KC = KeyCode;
        match key_event.code {
            KC::Backspace => Key::SpecialKey(SpecialKey::Backspace).into(),
            KC::Enter => Key::SpecialKey(SpecialKey::Enter).into(),
            KC::Left => Key::SpecialKey(SpecialKey::Left).into(),
            KC::Right => Key::SpecialKey(SpecialKey::Right).into(),
            KC::Up => Key::SpecialKey(SpecialKey::Up).into(),
            KC::Down => Key::SpecialKey(SpecialKey::Down).into(),
            KC::Home => Key::SpecialKey(SpecialKey::Home).into(),
            KC::End => Key::SpecialKey(SpecialKey::End).into(),
            KC::PageUp => Key::SpecialKey(SpecialKey::PageUp).into(),
            KC::PageDown => Key::SpecialKey(SpecialKey::PageDown).into(),
            KC::Tab => Key::SpecialKey(SpecialKey::Tab).into(),
            KC::BackTab => Key::SpecialKey(SpecialKey::BackTab).into(),
            KC::Delete => Key::SpecialKey(SpecialKey::Delete).into(),
            KC::Insert => Key::SpecialKey(SpecialKey::Insert).into(),
            KC::Esc => Key::SpecialKey(SpecialKey::Esc).into(),
            KC::F(fn_key) => match_fn_key(fn_key),
            KC::Char(character) => Key::Character(character).into(),
            // Media, modifier and lock keys only arrive with the kitty keyboard
            // protocol enabled, which prompts never do.
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;

    fn key_event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_shift_is_ignored_for_characters() {
        let it = KeyPress::try_from(key_event(
            KeyCode::Char('X'),
            KeyModifiers::SHIFT,
            KeyEventKind::Press,
        ));
        assert_eq!(it, Ok(key_press!(@char 'X')));
    }

    #[test]
    fn test_ctrl_c() {
        let it = KeyPress::try_from(key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        ));
        assert_eq!(it, Ok(KeyPress::ctrl('c')));
        assert_eq!(KeyPress::ctrl('c').printable_char(), None);
    }

    #[test]
    fn test_release_is_dropped() {
        let it = KeyPress::try_from(key_event(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(it, Err(()));
    }

    #[test]
    fn test_special_and_fn_keys() {
        let enter = KeyPress::try_from(key_event(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Press,
        ));
        assert_eq!(enter, Ok(key_press!(@special SpecialKey::Enter)));
        assert!(key_press!(@special SpecialKey::Enter).is_special(SpecialKey::Enter));

        let f5 = KeyPress::try_from(key_event(
            KeyCode::F(5),
            KeyModifiers::NONE,
            KeyEventKind::Press,
        ));
        assert_eq!(f5, Ok(key_press!(@fn FunctionKey::F5)));

        let f13 = KeyPress::try_from(key_event(
            KeyCode::F(13),
            KeyModifiers::NONE,
            KeyEventKind::Press,
        ));
        assert_eq!(f13, Err(()));
    }
}
