// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{Display, EnumDiscriminants};

use crate::{Action, Emittable};

/// Lifecycle of a single prompt.
///
/// ```text
/// Initial ──first render──→ Active ←──any key── Error
///                             │  └──validation fails──↗
///                             ├──Enter, valid──→ Submit
///                             └──cancel key────→ Cancel
/// ```
///
/// [`PromptState::Submit`] and [`PromptState::Cancel`] are terminal. No keypress is
/// processed after either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PromptState {
    #[default]
    Initial,
    Active,
    Error,
    Submit,
    Cancel,
}

impl PromptState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, PromptState::Submit | PromptState::Cancel)
    }
}

/// Events published by a [`crate::Prompt`]. Subscribe by [`PromptEventKind`].
///
/// | Event      | When                                                         |
/// |------------|--------------------------------------------------------------|
/// | `Value`    | The tracked text buffer changed, or Tab filled the placeholder |
/// | `Cursor`   | A navigation [`Action`] was pressed (alias or direct key)    |
/// | `Key`      | A printable character was pressed (lower cased)              |
/// | `Confirm`  | `y` or `n` was pressed                                       |
/// | `Finalize` | The prompt is about to submit or cancel, last chance to fix up the value |
/// | `Submit`   | Teardown after submit                                        |
/// | `Cancel`   | Teardown after cancel                                        |
#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(PromptEventKind), derive(Hash, Display))]
pub enum PromptEvent {
    Value(String),
    Cursor(Action),
    Key(char),
    Confirm(bool),
    Finalize,
    Submit,
    Cancel,
}

impl Emittable for PromptEvent {
    type Kind = PromptEventKind;

    fn kind(&self) -> PromptEventKind { self.into() }
}

/// What a prompt resolves to. [`PromptResult::Cancel`] is the cancellation marker; it
/// can't be confused with any value the prompt produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult<T> {
    Submit(T),
    Cancel,
}

impl<T> PromptResult<T> {
    #[must_use]
    pub fn is_cancel(&self) -> bool { matches!(self, PromptResult::Cancel) }

    #[must_use]
    pub fn is_submit(&self) -> bool { matches!(self, PromptResult::Submit(_)) }

    pub fn into_option(self) -> Option<T> {
        match self {
            PromptResult::Submit(value) => Some(value),
            PromptResult::Cancel => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PromptResult<U> {
        match self {
            PromptResult::Submit(value) => PromptResult::Submit(f(value)),
            PromptResult::Cancel => PromptResult::Cancel,
        }
    }
}

/// Guard to call before using the result of a prompt.
#[must_use]
pub fn is_cancel<T>(result: &PromptResult<T>) -> bool { result.is_cancel() }

/// Everything a prompt knows at a given moment. The render function gets a shared
/// reference, event handlers get a mutable one.
///
/// - `value` is the committed value. Its type is up to the subtype.
/// - `user_input` is the raw text buffer. Selection prompts leave it empty.
/// - `cursor` is a char offset into `user_input` for text prompts, and an option index
///   for selection prompts.
/// - `error` is the last validation message. It is cleared when the state goes back to
///   [`PromptState::Active`].
/// - `ext` holds whatever else the subtype needs (options, selection, message).
#[derive(Debug, Clone, PartialEq)]
pub struct PromptCore<V, X> {
    pub value: Option<V>,
    pub user_input: String,
    pub cursor: usize,
    pub state: PromptState,
    pub error: String,
    pub ext: X,
}

impl<V, X> PromptCore<V, X> {
    pub fn new(value: Option<V>, user_input: String, ext: X) -> Self {
        let cursor = user_input.chars().count();
        Self {
            value,
            user_input,
            cursor,
            state: PromptState::Initial,
            error: String::new(),
            ext,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_state_names() {
        assert_eq!(PromptState::Initial.to_string(), "initial");
        assert_eq!(PromptState::Cancel.to_string(), "cancel");
        assert!(PromptState::Submit.is_terminal());
        assert!(!PromptState::Error.is_terminal());
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(
            PromptEvent::Value("a".into()).kind(),
            PromptEventKind::Value
        );
        assert_eq!(PromptEvent::Cursor(Action::Up).kind(), PromptEventKind::Cursor);
        assert_eq!(PromptEvent::Finalize.kind(), PromptEventKind::Finalize);
    }

    #[test]
    fn test_prompt_result() {
        let submitted: PromptResult<u8> = PromptResult::Submit(2);
        assert!(!is_cancel(&submitted));
        assert_eq!(submitted.clone().map(|it| it * 2), PromptResult::Submit(4));
        assert_eq!(submitted.into_option(), Some(2));

        let cancelled: PromptResult<Option<u8>> = PromptResult::Cancel;
        assert!(is_cancel(&cancelled));
        assert_eq!(cancelled.into_option(), None);
    }

    #[test]
    fn test_core_cursor_starts_at_end_of_input() {
        let core = PromptCore::<String, ()>::new(None, "héllo".into(), ());
        assert_eq!(core.cursor, 5);
        assert_eq!(core.state, PromptState::Initial);
    }
}
