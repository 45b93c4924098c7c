// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Symbols and colors shared by the prompt subtypes. Every prompt draws the same
//! frame, a gutter bar on the left with the state symbol next to the message:
//!
//! ```text
//! │
//! ◆  What is your name?
//! │  Nadia█
//! └
//! ```

use crossterm::style::{ContentStyle, Stylize};

use crate::PromptState;

pub const S_BAR: &str = "│";
pub const S_BAR_END: &str = "└";
pub const S_STEP_ACTIVE: &str = "◆";
pub const S_STEP_CANCEL: &str = "■";
pub const S_STEP_ERROR: &str = "▲";
pub const S_STEP_SUBMIT: &str = "◇";
pub const S_RADIO_ACTIVE: &str = "●";
pub const S_RADIO_INACTIVE: &str = "○";
pub const S_CHECKBOX_ACTIVE: &str = "◻";
pub const S_CHECKBOX_SELECTED: &str = "◼";
pub const S_CHECKBOX_INACTIVE: &str = "◻";
pub const S_PASSWORD_MASK: char = '▪';

/// Colors for each [`PromptState`], plus the dimmed style for secondary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSheet {
    pub active: ContentStyle,
    pub error: ContentStyle,
    pub submit: ContentStyle,
    pub cancel: ContentStyle,
    pub dim: ContentStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        StyleSheet {
            active: ContentStyle::new().cyan(),
            error: ContentStyle::new().yellow(),
            submit: ContentStyle::new().green(),
            cancel: ContentStyle::new().red(),
            dim: ContentStyle::new().dark_grey(),
        }
    }
}

impl StyleSheet {
    #[must_use]
    pub fn for_state(&self, state: PromptState) -> ContentStyle {
        match state {
            PromptState::Initial | PromptState::Active => self.active,
            PromptState::Error => self.error,
            PromptState::Submit => self.submit,
            PromptState::Cancel => self.cancel,
        }
    }

    #[must_use]
    pub fn symbol(&self, state: PromptState) -> String {
        let symbol = match state {
            PromptState::Initial | PromptState::Active => S_STEP_ACTIVE,
            PromptState::Error => S_STEP_ERROR,
            PromptState::Submit => S_STEP_SUBMIT,
            PromptState::Cancel => S_STEP_CANCEL,
        };
        self.for_state(state).apply(symbol).to_string()
    }

    /// The gutter, colored by state while the prompt is live, dimmed once it is done.
    #[must_use]
    pub fn bar(&self, state: PromptState) -> String {
        let style = if state.is_terminal() {
            self.dim
        } else {
            self.for_state(state)
        };
        style.apply(S_BAR).to_string()
    }

    #[must_use]
    pub fn bar_end(&self, state: PromptState) -> String {
        self.for_state(state).apply(S_BAR_END).to_string()
    }

    /// The first two lines of every frame.
    #[must_use]
    pub fn header(&self, state: PromptState, message: &str) -> String {
        format!(
            "{}\n{}  {message}",
            self.dim.apply(S_BAR),
            self.symbol(state)
        )
    }

    #[must_use]
    pub fn error_line(&self, error: &str) -> String {
        format!(
            "{}  {}",
            self.bar_end(PromptState::Error),
            self.error.apply(error)
        )
    }

    #[must_use]
    pub fn dim(&self, text: &str) -> String { self.dim.apply(text).to_string() }

    /// How a value looks after the prompt was cancelled.
    #[must_use]
    pub fn cancelled(&self, text: &str) -> String {
        self.dim.apply(text).crossed_out().to_string()
    }
}

/// `text` with the char at `cursor` shown in inverse video. A cursor past the end
/// shows as an inverse space.
#[must_use]
pub fn with_cursor_cell(text: &str, cursor: usize) -> String {
    let mut output = String::with_capacity(text.len() + 8);
    let mut has_cursor = false;
    for (index, character) in text.chars().enumerate() {
        if index == cursor {
            output.push_str(&character.to_string().reverse().to_string());
            has_cursor = true;
        } else {
            output.push(character);
        }
    }
    if !has_cursor {
        output.push_str(&" ".reverse().to_string());
    }
    output
}

/// A dim placeholder whose first char carries the cursor.
#[must_use]
pub fn placeholder_with_cursor(placeholder: &str, style: &StyleSheet) -> String {
    let mut chars = placeholder.chars();
    match chars.next() {
        Some(first) => format!(
            "{}{}",
            first.to_string().reverse(),
            style.dim(chars.as_str())
        ),
        None => " ".reverse().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strip(text: &str) -> String { strip_ansi_escapes::strip_str(text) }

    #[test]
    fn test_header() {
        let style = StyleSheet::default();
        assert_eq!(strip(&style.header(PromptState::Active, "Name?")), "│\n◆  Name?");
        assert_eq!(strip(&style.header(PromptState::Cancel, "Name?")), "│\n■  Name?");
    }

    #[test]
    fn test_cursor_cell() {
        assert_eq!(strip(&with_cursor_cell("abc", 1)), "abc");
        assert_eq!(strip(&with_cursor_cell("abc", 3)), "abc ");
        assert!(with_cursor_cell("abc", 1).contains("\x1b[7m"));
        assert_eq!(strip(&with_cursor_cell("", 0)), " ");
    }

    #[test]
    fn test_placeholder_with_cursor() {
        let style = StyleSheet::default();
        assert_eq!(strip(&placeholder_with_cursor("anon", &style)), "anon");
        assert_eq!(strip(&placeholder_with_cursor("", &style)), " ");
    }
}
