// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{Event, KeyEvent};

use super::KeyPress;
use crate::Size;

/// The input events a prompt reacts to.
///
/// ```text
/// crossterm::Event (raw events)
///     ├─→ Event::Key(KeyEvent)  → KeyPress → InputEvent::Keyboard
///     ├─→ Event::Resize(w, h)   → Size     → InputEvent::Resize
///     └─→ everything else       → dropped (mouse, focus, paste)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Keyboard(KeyPress),
    Resize(Size),
}

impl InputEvent {
    #[must_use]
    pub fn matches_keypress(&self, other: KeyPress) -> bool {
        matches!(self, InputEvent::Keyboard(this) if *this == other)
    }

    #[must_use]
    pub fn matches_any_of_these_keypresses(&self, others: &[KeyPress]) -> bool {
        others.iter().any(|other| self.matches_keypress(*other))
    }
}

pub(crate) mod converters {
    use super::{Event, InputEvent, KeyEvent, Size};

    impl TryFrom<Event> for InputEvent {
        type Error = ();

        /// Typecast / convert [Event] to [`InputEvent`]. Events that a prompt has no use
        /// for are rejected.
        fn try_from(event: Event) -> Result<Self, Self::Error> {
            match event {
                Event::Key(key_event) => Ok(key_event.try_into()?),
                Event::Resize(columns, rows) => Ok(InputEvent::Resize(Size {
                    col_count: columns,
                    row_count: rows,
                })),
                _ => Err(()),
            }
        }
    }

    impl TryFrom<KeyEvent> for InputEvent {
        type Error = ();

        fn try_from(key_event: KeyEvent) -> Result<Self, Self::Error> {
            Ok(InputEvent::Keyboard(key_event.try_into()?))
        }
    }
}
