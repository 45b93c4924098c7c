// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Action, Prompt, PromptCore, PromptEvent, PromptEventKind, PromptIo,
            PromptOptions, PromptResult, PromptState, S_CHECKBOX_ACTIVE,
            S_CHECKBOX_INACTIVE, S_CHECKBOX_SELECTED, SelectOption, StyleSheet,
            render_fn, step_cursor, validator};

pub const MULTI_SELECT_REQUIRED_MESSAGE: &str =
    "Please select at least one option. Press space to select, enter to submit";

#[allow(missing_debug_implementations)]
pub struct MultiSelectOptions<T> {
    pub message: String,
    pub options: Vec<SelectOption<T>>,
    /// Options with these values start out selected.
    pub initial_values: Vec<T>,
    /// The cursor starts on the first option with this value.
    pub cursor_at: Option<T>,
    /// Reject an empty selection.
    pub required: bool,
    pub io: PromptIo,
}

impl<T> Default for MultiSelectOptions<T> {
    fn default() -> Self {
        Self {
            message: String::new(),
            options: vec![],
            initial_values: vec![],
            cursor_at: None,
            required: true,
            io: PromptIo::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelectExt<T> {
    pub message: String,
    pub options: Vec<SelectOption<T>>,
    /// Parallel to `options`.
    pub selected: Vec<bool>,
    pub style: StyleSheet,
}

impl<T: Clone> MultiSelectExt<T> {
    /// Selected values, in option order.
    #[must_use]
    pub fn selected_values(&self) -> Vec<T> {
        self.options
            .iter()
            .zip(&self.selected)
            .filter(|(_, is_selected)| **is_selected)
            .map(|(option, _)| option.value.clone())
            .collect()
    }

    /// Select everything, or nothing if everything is already selected.
    pub fn toggle_all(&mut self) {
        let all_selected = self.selected.iter().all(|it| *it);
        self.selected.iter_mut().for_each(|it| *it = !all_selected);
    }
}

/// Pick any number of a list. Space toggles the option under the cursor, `a` toggles
/// all of them, Enter submits.
#[derive(Debug)]
pub struct MultiSelectPrompt<T> {
    prompt: Prompt<Vec<T>, MultiSelectExt<T>>,
}

impl<T: Clone + PartialEq + Send + 'static> MultiSelectPrompt<T> {
    #[must_use]
    pub fn new(options: MultiSelectOptions<T>) -> Self {
        let MultiSelectOptions {
            message,
            options,
            initial_values,
            cursor_at,
            required,
            io,
        } = options;

        let cursor = cursor_at
            .as_ref()
            .and_then(|cursor_at| options.iter().position(|it| it.value == *cursor_at))
            .unwrap_or_default();
        let selected = options
            .iter()
            .map(|it| initial_values.contains(&it.value))
            .collect();

        let ext = MultiSelectExt {
            message,
            options,
            selected,
            style: io.style,
        };
        let initial_value = ext.selected_values();

        let validate = required.then(|| {
            validator(|value: Option<&Vec<T>>| match value {
                Some(values) if !values.is_empty() => Ok(()),
                _ => Err(MULTI_SELECT_REQUIRED_MESSAGE.into()),
            })
        });

        let mut prompt = Prompt::new(PromptOptions {
            initial_value: Some(initial_value),
            track_value: false,
            validate,
            ..io.into_prompt_options(render_fn(render_multi_select), ext)
        });
        prompt.core_mut().cursor = cursor;

        prompt.on(PromptEventKind::Cursor, |event, core| {
            let PromptEvent::Cursor(action) = event else {
                return;
            };
            if *action == Action::Space {
                if let Some(is_selected) = core.ext.selected.get_mut(core.cursor) {
                    *is_selected = !*is_selected;
                }
                core.value = Some(core.ext.selected_values());
            } else if let Some(cursor) =
                step_cursor(core.cursor, core.ext.options.len(), *action)
            {
                core.cursor = cursor;
            }
        });

        prompt.on(PromptEventKind::Key, |event, core| {
            if let PromptEvent::Key('a') = event {
                core.ext.toggle_all();
                core.value = Some(core.ext.selected_values());
            }
        });

        Self { prompt }
    }

    #[must_use]
    pub fn inner(&self) -> &Prompt<Vec<T>, MultiSelectExt<T>> { &self.prompt }

    pub fn inner_mut(&mut self) -> &mut Prompt<Vec<T>, MultiSelectExt<T>> {
        &mut self.prompt
    }

    /// # Errors
    ///
    /// See [`Prompt::prompt()`].
    pub async fn prompt(mut self) -> miette::Result<PromptResult<Vec<T>>> {
        let result = self.prompt.prompt().await?;
        Ok(result.map(Option::unwrap_or_default))
    }
}

pub fn render_multi_select<T>(core: &PromptCore<Vec<T>, MultiSelectExt<T>>) -> String {
    let ext = &core.ext;
    let style = &ext.style;
    let title = style.header(core.state, &ext.message);
    let bar = style.bar(core.state);
    let selected_labels = ext
        .options
        .iter()
        .zip(&ext.selected)
        .filter(|(_, is_selected)| **is_selected)
        .map(|(option, _)| option.label.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    match core.state {
        PromptState::Submit => format!("{title}\n{bar}  {}", style.dim(&selected_labels)),
        PromptState::Cancel if selected_labels.is_empty() => format!("{title}\n{bar}"),
        PromptState::Cancel => {
            format!("{title}\n{bar}  {}\n{bar}", style.cancelled(&selected_labels))
        }
        _ => {
            let mut lines = vec![title];
            let accent = style.for_state(core.state);
            for (index, (option, is_selected)) in
                ext.options.iter().zip(&ext.selected).enumerate()
            {
                let is_focused = index == core.cursor;
                let checkbox = match (is_focused, *is_selected) {
                    (_, true) => style.submit.apply(S_CHECKBOX_SELECTED).to_string(),
                    (true, false) => accent.apply(S_CHECKBOX_ACTIVE).to_string(),
                    (false, false) => style.dim(S_CHECKBOX_INACTIVE),
                };
                let label = if is_focused {
                    let hint = option
                        .hint
                        .as_deref()
                        .map(|hint| style.dim(&format!(" ({hint})")))
                        .unwrap_or_default();
                    format!("{}{hint}", option.label)
                } else {
                    style.dim(&option.label)
                };
                lines.push(format!("{bar}  {checkbox} {label}"));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AliasRegistry, InputDevice, InputDeviceExtMock, KeyPress, OutputDevice,
                OutputDeviceExt, SpecialKey, StdoutMock, key_press};
    use pretty_assertions::assert_eq;

    fn multi_select(
        required: bool,
        initial_values: Vec<&'static str>,
        keys: impl IntoIterator<Item = KeyPress>,
    ) -> (MultiSelectPrompt<&'static str>, StdoutMock) {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let prompt = MultiSelectPrompt::new(MultiSelectOptions {
            message: "Toppings".into(),
            options: vec!["cheese".into(), "olives".into(), "basil".into()],
            initial_values,
            required,
            io: PromptIo {
                output_device,
                input_device: Some(InputDevice::new_mock_key_presses(keys)),
                aliases: Some(AliasRegistry::new()),
                ..Default::default()
            },
            ..Default::default()
        });
        (prompt, stdout_mock)
    }

    #[tokio::test]
    async fn test_space_toggles_under_cursor() {
        let (prompt, _) = multi_select(
            true,
            vec![],
            [
                key_press!(@char ' '),
                key_press!(@special SpecialKey::Down),
                key_press!(@special SpecialKey::Down),
                key_press!(@char ' '),
                key_press!(@special SpecialKey::Enter),
            ],
        );
        assert_eq!(
            prompt.prompt().await.unwrap(),
            PromptResult::Submit(vec!["cheese", "basil"])
        );
    }

    #[tokio::test]
    async fn test_a_toggles_all() {
        let (prompt, _) = multi_select(
            false,
            vec!["olives"],
            [
                key_press!(@char 'a'),
                key_press!(@special SpecialKey::Enter),
            ],
        );
        assert_eq!(
            prompt.prompt().await.unwrap(),
            PromptResult::Submit(vec!["cheese", "olives", "basil"])
        );
    }

    #[tokio::test]
    async fn test_required_rejects_empty_selection() {
        let (prompt, stdout_mock) = multi_select(
            true,
            vec![],
            [
                key_press!(@special SpecialKey::Enter),
                key_press!(@char 'j'),
                key_press!(@char ' '),
                key_press!(@special SpecialKey::Enter),
            ],
        );
        assert_eq!(
            prompt.prompt().await.unwrap(),
            PromptResult::Submit(vec!["olives"])
        );
        assert!(
            stdout_mock
                .get_copy_of_buffer_as_string_strip_ansi()
                .contains(MULTI_SELECT_REQUIRED_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_optional_allows_empty_selection() {
        let (prompt, _) =
            multi_select(false, vec![], [key_press!(@special SpecialKey::Enter)]);
        assert_eq!(prompt.prompt().await.unwrap(), PromptResult::Submit(vec![]));
    }

    #[test]
    fn test_toggle_all() {
        let mut ext = MultiSelectExt {
            message: String::new(),
            options: vec![SelectOption::from(1), SelectOption::from(2)],
            selected: vec![true, true],
            style: StyleSheet::default(),
        };
        ext.toggle_all();
        assert_eq!(ext.selected, vec![false, false]);
        ext.toggle_all();
        assert_eq!(ext.selected_values(), vec![1, 2]);
    }
}
