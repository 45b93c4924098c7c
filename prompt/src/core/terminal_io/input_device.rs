// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::IsTerminal;

use crossterm::event::EventStream;
use futures_util::{FutureExt, StreamExt};
use miette::IntoDiagnostic;

use crate::{CrosstermEventResult, InputEvent, PinnedInputStream};

/// This struct represents an input device that can be used to read from the terminal.
/// See [`crate::InputDeviceExtMock`] for testing features.
///
/// `is_tty` decides whether [`crate::RawModeGuard`] touches the terminal's raw mode
/// flag. Piped stdin and mocks leave it alone.
#[allow(missing_debug_implementations)]
pub struct InputDevice {
    pub resource: PinnedInputStream<CrosstermEventResult>,
    pub is_tty: bool,
}

impl InputDevice {
    #[must_use]
    pub fn new_event_stream() -> InputDevice {
        InputDevice {
            resource: Box::pin(EventStream::new()),
            is_tty: std::io::stdin().is_terminal(),
        }
    }
}

impl InputDevice {
    /// # Errors
    ///
    /// Returns an error if the stream has ended, or if crossterm failed to read an event.
    pub async fn next(&mut self) -> miette::Result<crossterm::event::Event> {
        match self.resource.next().fuse().await {
            Some(it) => it.into_diagnostic(),
            None => miette::bail!("Failed to get next event from input source."),
        }
    }

    /// Returns the next event a prompt can use, skipping the ones it can't (mouse,
    /// focus, key release). Returns `None` when the stream is exhausted or broken.
    pub async fn next_input_event(&mut self) -> Option<InputEvent> {
        loop {
            let event = match self.next().await {
                Ok(event) => event,
                Err(error) => {
                    tracing::debug!(message = "Input stream ended", ?error);
                    return None;
                }
            };
            if let Ok(input_event) = InputEvent::try_from(event) {
                return Some(input_event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InputDeviceExtMock, SpecialKey, key_press};
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState,
                           KeyModifiers};
    use smallvec::smallvec;

    #[tokio::test]
    async fn test_next_input_event_skips_unsupported_events() {
        let mut device = InputDevice::new_mock(smallvec![
            Ok(Event::FocusGained),
            Ok(Event::Key(KeyEvent {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Release,
                state: KeyEventState::NONE,
            })),
            Ok(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))),
        ]);

        pretty_assertions::assert_eq!(
            device.next_input_event().await,
            Some(InputEvent::Keyboard(key_press!(@special SpecialKey::Enter)))
        );
        pretty_assertions::assert_eq!(device.next_input_event().await, None);
        assert!(!device.is_tty);
    }

    #[tokio::test]
    async fn test_next_input_event_stops_on_io_error() {
        let mut device = InputDevice::new_mock(smallvec![Err(std::io::Error::other(
            "boom"
        ))]);
        pretty_assertions::assert_eq!(device.next_input_event().await, None);
    }
}
