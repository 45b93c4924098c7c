// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Prompt, PromptCore, PromptEvent, PromptEventKind, PromptIo, PromptOptions,
            PromptResult, PromptState, S_PASSWORD_MASK, StyleSheet, Validator, render_fn,
            with_cursor_cell};

#[allow(missing_debug_implementations)]
pub struct PasswordOptions {
    pub message: String,
    pub mask: char,
    pub validate: Option<Validator<String>>,
    pub io: PromptIo,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            message: String::new(),
            mask: S_PASSWORD_MASK,
            validate: None,
            io: PromptIo::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordExt {
    pub message: String,
    pub mask: char,
    pub style: StyleSheet,
}

/// Text input that never shows what is typed, one mask char per char typed.
#[derive(Debug)]
pub struct PasswordPrompt {
    prompt: Prompt<String, PasswordExt>,
}

impl PasswordPrompt {
    #[must_use]
    pub fn new(options: PasswordOptions) -> Self {
        let PasswordOptions {
            message,
            mask,
            validate,
            io,
        } = options;

        let ext = PasswordExt {
            message,
            mask,
            style: io.style,
        };

        let mut prompt = Prompt::new(PromptOptions {
            validate,
            track_value: true,
            ..io.into_prompt_options(render_fn(render_password), ext)
        });

        prompt.on(PromptEventKind::Value, |event, core| {
            if let PromptEvent::Value(value) = event {
                core.value = Some(value.clone());
            }
        });

        prompt.on(PromptEventKind::Finalize, |_, core| {
            core.value.get_or_insert_with(String::new);
        });

        Self { prompt }
    }

    #[must_use]
    pub fn inner(&self) -> &Prompt<String, PasswordExt> { &self.prompt }

    pub fn inner_mut(&mut self) -> &mut Prompt<String, PasswordExt> { &mut self.prompt }

    /// # Errors
    ///
    /// See [`Prompt::prompt()`].
    pub async fn prompt(mut self) -> miette::Result<PromptResult<String>> {
        let result = self.prompt.prompt().await?;
        Ok(result.map(Option::unwrap_or_default))
    }
}

pub fn render_password(core: &PromptCore<String, PasswordExt>) -> String {
    let style = &core.ext.style;
    let title = style.header(core.state, &core.ext.message);
    let bar = style.bar(core.state);
    let masked: String = core
        .user_input
        .chars()
        .map(|_| core.ext.mask)
        .collect();

    match core.state {
        PromptState::Submit => format!("{title}\n{bar}  {}", style.dim(&masked)),
        PromptState::Cancel if masked.is_empty() => format!("{title}\n{bar}"),
        PromptState::Cancel => format!("{title}\n{bar}  {}\n{bar}", style.cancelled(&masked)),
        PromptState::Error => format!(
            "{title}\n{bar}  {}\n{}",
            with_cursor_cell(&masked, core.cursor),
            style.error_line(&core.error)
        ),
        PromptState::Initial | PromptState::Active => format!(
            "{title}\n{bar}  {}\n{}",
            with_cursor_cell(&masked, core.cursor),
            style.bar_end(core.state)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AliasRegistry, InputDevice, InputDeviceExtMock, OutputDevice,
                OutputDeviceExt, SpecialKey, key_press};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_secret_is_never_written() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let result = PasswordPrompt::new(PasswordOptions {
            message: "Token?".into(),
            mask: '*',
            io: PromptIo {
                output_device,
                input_device: Some(InputDevice::new_mock_key_presses([
                    key_press!(@char 's'),
                    key_press!(@char 'e'),
                    key_press!(@char 'k'),
                    key_press!(@special SpecialKey::Backspace),
                    key_press!(@char 'c'),
                    key_press!(@special SpecialKey::Enter),
                ])),
                aliases: Some(AliasRegistry::new()),
                ..Default::default()
            },
            ..Default::default()
        })
        .prompt()
        .await
        .unwrap();

        assert_eq!(result, PromptResult::Submit("sec".to_string()));
        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(!output.contains("sec"));
        assert!(output.contains("│  ***"));
    }
}
