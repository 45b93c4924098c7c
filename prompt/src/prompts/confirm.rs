// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Action, Prompt, PromptCore, PromptEvent, PromptEventKind, PromptIo,
            PromptOptions, PromptResult, PromptState, S_RADIO_ACTIVE, S_RADIO_INACTIVE,
            StyleSheet, render_fn};

#[allow(missing_debug_implementations)]
pub struct ConfirmOptions {
    pub message: String,
    pub active: String,
    pub inactive: String,
    pub initial_value: bool,
    pub io: PromptIo,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            message: String::new(),
            active: "Yes".into(),
            inactive: "No".into(),
            initial_value: true,
            io: PromptIo::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmExt {
    pub message: String,
    pub active: String,
    pub inactive: String,
    pub style: StyleSheet,
}

/// Yes / no. Arrows (and `h` `j` `k` `l`) toggle, Enter submits, and `y` or `n`
/// submit right away.
#[derive(Debug)]
pub struct ConfirmPrompt {
    prompt: Prompt<bool, ConfirmExt>,
}

impl ConfirmPrompt {
    #[must_use]
    pub fn new(options: ConfirmOptions) -> Self {
        let ConfirmOptions {
            message,
            active,
            inactive,
            initial_value,
            io,
        } = options;

        let ext = ConfirmExt {
            message,
            active,
            inactive,
            style: io.style,
        };

        let mut prompt = Prompt::new(PromptOptions {
            initial_value: Some(initial_value),
            track_value: false,
            ..io.into_prompt_options(render_fn(render_confirm), ext)
        });

        prompt.on(PromptEventKind::Cursor, |event, core| {
            if let PromptEvent::Cursor(Action::Up | Action::Down | Action::Left | Action::Right) =
                event
            {
                core.value = Some(!core.value.unwrap_or_default());
            }
        });

        prompt.on(PromptEventKind::Confirm, |event, core| {
            if let PromptEvent::Confirm(confirm) = event {
                core.value = Some(*confirm);
                core.state = PromptState::Submit;
            }
        });

        Self { prompt }
    }

    #[must_use]
    pub fn inner(&self) -> &Prompt<bool, ConfirmExt> { &self.prompt }

    pub fn inner_mut(&mut self) -> &mut Prompt<bool, ConfirmExt> { &mut self.prompt }

    /// # Errors
    ///
    /// See [`Prompt::prompt()`].
    pub async fn prompt(mut self) -> miette::Result<PromptResult<bool>> {
        let result = self.prompt.prompt().await?;
        Ok(result.map(Option::unwrap_or_default))
    }
}

pub fn render_confirm(core: &PromptCore<bool, ConfirmExt>) -> String {
    let ext = &core.ext;
    let style = &ext.style;
    let title = style.header(core.state, &ext.message);
    let bar = style.bar(core.state);
    let value = core.value.unwrap_or_default();
    let label = if value { &ext.active } else { &ext.inactive };

    match core.state {
        PromptState::Submit => format!("{title}\n{bar}  {}", style.dim(label)),
        PromptState::Cancel => format!("{title}\n{bar}  {}\n{bar}", style.cancelled(label)),
        _ => {
            let option = |is_selected: bool, text: &str| {
                if is_selected {
                    format!("{} {text}", style.for_state(core.state).apply(S_RADIO_ACTIVE))
                } else {
                    style.dim(&format!("{S_RADIO_INACTIVE} {text}"))
                }
            };
            format!(
                "{title}\n{bar}  {} {} {}\n{}",
                option(value, &ext.active),
                style.dim("/"),
                option(!value, &ext.inactive),
                style.bar_end(core.state)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AliasRegistry, InputDevice, InputDeviceExtMock, KeyPress, OutputDevice,
                OutputDeviceExt, SpecialKey, key_press};
    use pretty_assertions::assert_eq;

    async fn run(keys: impl IntoIterator<Item = KeyPress>) -> PromptResult<bool> {
        let (output_device, _) = OutputDevice::new_mock();
        ConfirmPrompt::new(ConfirmOptions {
            message: "Continue?".into(),
            io: PromptIo {
                output_device,
                input_device: Some(InputDevice::new_mock_key_presses(keys)),
                aliases: Some(AliasRegistry::new()),
                ..Default::default()
            },
            ..Default::default()
        })
        .prompt()
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_enter_submits_initial_value() {
        assert_eq!(
            run([key_press!(@special SpecialKey::Enter)]).await,
            PromptResult::Submit(true)
        );
    }

    #[tokio::test]
    async fn test_arrow_toggles() {
        assert_eq!(
            run([
                key_press!(@special SpecialKey::Right),
                key_press!(@special SpecialKey::Enter)
            ])
            .await,
            PromptResult::Submit(false)
        );
    }

    #[tokio::test]
    async fn test_n_submits_immediately() {
        // Keys after `n` are never read.
        assert_eq!(
            run([key_press!(@char 'N'), key_press!(@special SpecialKey::Right)]).await,
            PromptResult::Submit(false)
        );
    }

    #[tokio::test]
    async fn test_escape_cancels() {
        assert!(run([key_press!(@special SpecialKey::Esc)]).await.is_cancel());
    }
}
