// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Action, Prompt, PromptCore, PromptEvent, PromptEventKind, PromptIo,
            PromptOptions, PromptResult, PromptState, S_RADIO_ACTIVE, S_RADIO_INACTIVE,
            StyleSheet, render_fn, validator};

/// One choice in a [`SelectPrompt`] or [`crate::MultiSelectPrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<T> {
    pub value: T,
    pub label: String,
    pub hint: Option<String>,
}

impl<T: ToString> From<T> for SelectOption<T> {
    /// The label is the value's `Display` output.
    fn from(value: T) -> Self {
        Self {
            label: value.to_string(),
            value,
            hint: None,
        }
    }
}

impl<T> SelectOption<T> {
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Index after moving one step in the direction of `action`, wrapping around at both
/// ends. `None` for actions that don't move.
#[must_use]
pub fn step_cursor(cursor: usize, len: usize, action: Action) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match action {
        Action::Up | Action::Left => Some((cursor + len - 1) % len),
        Action::Down | Action::Right => Some((cursor + 1) % len),
        Action::Space | Action::Cancel => None,
    }
}

#[allow(missing_debug_implementations)]
pub struct SelectOptions<T> {
    pub message: String,
    pub options: Vec<SelectOption<T>>,
    /// The cursor starts on the first option with this value.
    pub initial_value: Option<T>,
    pub io: PromptIo,
}

impl<T> Default for SelectOptions<T> {
    fn default() -> Self {
        Self {
            message: String::new(),
            options: vec![],
            initial_value: None,
            io: PromptIo::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectExt<T> {
    pub message: String,
    pub options: Vec<SelectOption<T>>,
    pub style: StyleSheet,
}

/// Pick one of a list. Up / Down (or `k` / `j`) move with wrap around, Enter picks the
/// option under the cursor. A select with no options can only be cancelled.
#[derive(Debug)]
pub struct SelectPrompt<T> {
    prompt: Prompt<T, SelectExt<T>>,
}

impl<T: Clone + PartialEq + Send + 'static> SelectPrompt<T> {
    #[must_use]
    pub fn new(options: SelectOptions<T>) -> Self {
        let SelectOptions {
            message,
            options,
            initial_value,
            io,
        } = options;

        let cursor = initial_value
            .as_ref()
            .and_then(|initial| options.iter().position(|it| it.value == *initial))
            .unwrap_or_default();
        let value = options.get(cursor).map(|it| it.value.clone());

        let ext = SelectExt {
            message,
            options,
            style: io.style,
        };

        let mut prompt = Prompt::new(PromptOptions {
            initial_value: value,
            track_value: false,
            validate: Some(validator(|value: Option<&T>| match value {
                Some(_) => Ok(()),
                None => Err("Nothing to select".into()),
            })),
            ..io.into_prompt_options(render_fn(render_select), ext)
        });
        prompt.core_mut().cursor = cursor;

        prompt.on(PromptEventKind::Cursor, |event, core| {
            if let PromptEvent::Cursor(action) = event
                && let Some(cursor) = step_cursor(core.cursor, core.ext.options.len(), *action)
            {
                core.cursor = cursor;
                core.value = Some(core.ext.options[cursor].value.clone());
            }
        });

        Self { prompt }
    }

    #[must_use]
    pub fn inner(&self) -> &Prompt<T, SelectExt<T>> { &self.prompt }

    pub fn inner_mut(&mut self) -> &mut Prompt<T, SelectExt<T>> { &mut self.prompt }

    /// # Errors
    ///
    /// See [`Prompt::prompt()`].
    pub async fn prompt(mut self) -> miette::Result<PromptResult<T>> {
        Ok(match self.prompt.prompt().await? {
            PromptResult::Submit(Some(value)) => PromptResult::Submit(value),
            _ => PromptResult::Cancel,
        })
    }
}

pub fn render_select<T>(core: &PromptCore<T, SelectExt<T>>) -> String {
    let ext = &core.ext;
    let style = &ext.style;
    let title = style.header(core.state, &ext.message);
    let bar = style.bar(core.state);
    let current_label = ext
        .options
        .get(core.cursor)
        .map(|it| it.label.as_str())
        .unwrap_or_default();

    match core.state {
        PromptState::Submit => format!("{title}\n{bar}  {}", style.dim(current_label)),
        PromptState::Cancel => {
            format!("{title}\n{bar}  {}\n{bar}", style.cancelled(current_label))
        }
        _ => {
            let mut lines = vec![title];
            for (index, option) in ext.options.iter().enumerate() {
                let line = if index == core.cursor {
                    let hint = option
                        .hint
                        .as_deref()
                        .map(|hint| style.dim(&format!(" ({hint})")))
                        .unwrap_or_default();
                    format!(
                        "{} {}{hint}",
                        style.for_state(core.state).apply(S_RADIO_ACTIVE),
                        option.label
                    )
                } else {
                    style.dim(&format!("{S_RADIO_INACTIVE} {}", option.label))
                };
                lines.push(format!("{bar}  {line}"));
            }
            if core.state == PromptState::Error {
                lines.push(style.error_line(&core.error));
            } else {
                lines.push(style.bar_end(core.state));
            }
            lines.join("\n")
        }
    }
}
