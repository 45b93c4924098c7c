// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::{gen_input_stream, gen_input_stream_then_pending, gen_input_stream_with_delay};
use crate::{CrosstermEventResult, FunctionKey, InlineVec, InputDevice, Key, KeyPress,
            KeyState, SpecialKey};

pub trait InputDeviceExtMock {
    fn new_mock(generator_vec: InlineVec<CrosstermEventResult>) -> InputDevice;

    fn new_mock_with_delay(
        generator_vec: InlineVec<CrosstermEventResult>,
        delay: Duration,
    ) -> InputDevice;

    fn new_mock_then_pending(generator_vec: InlineVec<CrosstermEventResult>)
    -> InputDevice;

    /// Shorthand to feed [`KeyPress`]es instead of crossterm events.
    fn new_mock_key_presses(key_presses: impl IntoIterator<Item = KeyPress>) -> InputDevice {
        Self::new_mock(key_presses.into_iter().map(crossterm_event_from).collect())
    }
}

impl InputDeviceExtMock for InputDevice {
    fn new_mock(generator_vec: InlineVec<CrosstermEventResult>) -> InputDevice {
        InputDevice {
            resource: gen_input_stream(generator_vec),
            is_tty: false,
        }
    }

    fn new_mock_with_delay(
        generator_vec: InlineVec<CrosstermEventResult>,
        delay: Duration,
    ) -> InputDevice {
        InputDevice {
            resource: gen_input_stream_with_delay(generator_vec, delay),
            is_tty: false,
        }
    }

    fn new_mock_then_pending(
        generator_vec: InlineVec<CrosstermEventResult>,
    ) -> InputDevice {
        InputDevice {
            resource: gen_input_stream_then_pending(generator_vec),
            is_tty: false,
        }
    }
}

/// Turn a [`KeyPress`] back into the crossterm event that would have produced it.
#[must_use]
pub fn crossterm_event_from(key_press: KeyPress) -> CrosstermEventResult {
    let (key, modifiers) = match key_press {
        KeyPress::Plain { key } => (key, KeyModifiers::NONE),
        KeyPress::WithModifiers { key, mask } => {
            let mut modifiers = KeyModifiers::NONE;
            if mask.shift_key_state == KeyState::Pressed {
                modifiers |= KeyModifiers::SHIFT;
            }
            if mask.ctrl_key_state == KeyState::Pressed {
                modifiers |= KeyModifiers::CONTROL;
            }
            if mask.alt_key_state == KeyState::Pressed {
                modifiers |= KeyModifiers::ALT;
            }
            (key, modifiers)
        }
    };

    let code = match key {
        Key::Character(ch) => KeyCode::Char(ch),
        Key::FunctionKey(fn_key) => KeyCode::F(function_key_number(fn_key)),
        Key::SpecialKey(special_key) => match special_key {
            SpecialKey::Backspace => KeyCode::Backspace,
            SpecialKey::Enter => KeyCode::Enter,
            SpecialKey::Left => KeyCode::Left,
            SpecialKey::Right => KeyCode::Right,
            SpecialKey::Up => KeyCode::Up,
            SpecialKey::Down => KeyCode::Down,
            SpecialKey::Home => KeyCode::Home,
            SpecialKey::End => KeyCode::End,
            SpecialKey::PageUp => KeyCode::PageUp,
            SpecialKey::PageDown => KeyCode::PageDown,
            SpecialKey::Tab => KeyCode::Tab,
            SpecialKey::BackTab => KeyCode::BackTab,
            SpecialKey::Delete => KeyCode::Delete,
            SpecialKey::Insert => KeyCode::Insert,
            SpecialKey::Esc => KeyCode::Esc,
        },
    };

    Ok(Event::Key(KeyEvent::new(code, modifiers)))
}

fn function_key_number(fn_key: FunctionKey) -> u8 {
    match fn_key {
        FunctionKey::F1 => 1,
        FunctionKey::F2 => 2,
        FunctionKey::F3 => 3,
        FunctionKey::F4 => 4,
        FunctionKey::F5 => 5,
        FunctionKey::F6 => 6,
        FunctionKey::F7 => 7,
        FunctionKey::F8 => 8,
        FunctionKey::F9 => 9,
        FunctionKey::F10 => 10,
        FunctionKey::F11 => 11,
        FunctionKey::F12 => 12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InputEvent, key_press};

    #[tokio::test]
    async fn test_new_mock_key_presses_round_trip() {
        let key_presses = [
            key_press!(@char 'a'),
            KeyPress::ctrl('c'),
            key_press!(@special SpecialKey::Tab),
            key_press!(@fn FunctionKey::F12),
        ];
        let mut device = InputDevice::new_mock_key_presses(key_presses);
        for expected in key_presses {
            pretty_assertions::assert_eq!(
                device.next_input_event().await,
                Some(InputEvent::Keyboard(expected))
            );
        }
        pretty_assertions::assert_eq!(device.next_input_event().await, None);
    }
}
