// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Prompt, PromptCore, PromptEvent, PromptEventKind, PromptIo, PromptOptions,
            PromptResult, PromptState, StyleSheet, Validator, placeholder_with_cursor,
            render_fn, with_cursor_cell};

#[allow(missing_debug_implementations)]
#[derive(Default)]
pub struct TextOptions {
    pub message: String,
    /// Shown dimmed while the input is empty. Tab accepts it.
    pub placeholder: Option<String>,
    /// Submitted when the input is empty.
    pub default_value: Option<String>,
    pub initial_value: Option<String>,
    pub validate: Option<Validator<String>>,
    pub io: PromptIo,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextExt {
    pub message: String,
    pub placeholder: Option<String>,
    pub default_value: Option<String>,
    pub style: StyleSheet,
}

/// Single line text input.
#[derive(Debug)]
pub struct TextPrompt {
    prompt: Prompt<String, TextExt>,
}

impl TextPrompt {
    #[must_use]
    pub fn new(options: TextOptions) -> Self {
        let TextOptions {
            message,
            placeholder,
            default_value,
            initial_value,
            validate,
            io,
        } = options;

        let ext = TextExt {
            message,
            placeholder: placeholder.clone(),
            default_value,
            style: io.style,
        };

        let mut prompt = Prompt::new(PromptOptions {
            initial_value: initial_value.clone(),
            initial_user_input: initial_value,
            validate,
            placeholder,
            track_value: true,
            ..io.into_prompt_options(render_fn(render_text), ext)
        });

        prompt.on(PromptEventKind::Value, |event, core| {
            if let PromptEvent::Value(value) = event {
                core.value = Some(value.clone());
            }
        });

        prompt.on(PromptEventKind::Finalize, |_, core| {
            if core.value.as_deref().is_none_or(str::is_empty) {
                core.value = Some(core.ext.default_value.clone().unwrap_or_default());
            }
        });

        Self { prompt }
    }

    #[must_use]
    pub fn inner(&self) -> &Prompt<String, TextExt> { &self.prompt }

    pub fn inner_mut(&mut self) -> &mut Prompt<String, TextExt> { &mut self.prompt }

    /// # Errors
    ///
    /// See [`Prompt::prompt()`].
    pub async fn prompt(mut self) -> miette::Result<PromptResult<String>> {
        let result = self.prompt.prompt().await?;
        Ok(result.map(Option::unwrap_or_default))
    }
}

pub fn render_text(core: &PromptCore<String, TextExt>) -> String {
    let style = &core.ext.style;
    let title = style.header(core.state, &core.ext.message);
    let bar = style.bar(core.state);
    let value = core.value.as_deref().unwrap_or_default();

    match core.state {
        PromptState::Submit => format!("{title}\n{bar}  {}", style.dim(value)),
        PromptState::Cancel if value.is_empty() => format!("{title}\n{bar}"),
        PromptState::Cancel => {
            format!("{title}\n{bar}  {}\n{bar}", style.cancelled(value))
        }
        PromptState::Error => format!(
            "{title}\n{bar}  {}\n{}",
            render_input(core),
            style.error_line(&core.error)
        ),
        PromptState::Initial | PromptState::Active => format!(
            "{title}\n{bar}  {}\n{}",
            render_input(core),
            style.bar_end(core.state)
        ),
    }
}

fn render_input(core: &PromptCore<String, TextExt>) -> String {
    match core.ext.placeholder.as_deref() {
        Some(placeholder) if core.user_input.is_empty() => {
            placeholder_with_cursor(placeholder, &core.ext.style)
        }
        _ => with_cursor_cell(&core.user_input, core.cursor),
    }
}
