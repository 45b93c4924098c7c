// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{sync::{Arc, PoisonError},
          time::Duration};

use crossterm::{cursor::MoveToColumn,
                style::Print,
                terminal::{Clear, ClearType}};
use tokio::{sync::broadcast, task::JoinHandle, time::interval};

use crate::{GateOptions, InputDevice, InputGate, LINE_SEPARATOR, OutputDevice,
            PromptError, S_BAR, S_STEP_CANCEL, S_STEP_ERROR, S_STEP_SUBMIT, StdMutex,
            StyleSheet, UnicodeWidthStrategy, execute_commands, truncate_to_width};

pub const SPINNER_DELAY: Duration = Duration::from_millis(80);

/// Frames between two steps of the trailing `...` animation, and between two dots in
/// CI mode.
pub const TICKS_PER_DOT: usize = 8;

pub const CIRCLE_FRAMES: [&str; 4] = ["◒", "◐", "◓", "◑"];

/// More info: <https://www.unicode.org/charts/script/chart_Braille.html>
pub const BRAILLE_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const BLOCK_FRAMES: [&str; 8] = ["█", "▓", "▒", "░", "░", "▒", "▓", "█"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpinnerTemplate {
    #[default]
    Circle,
    Braille,
    Block,
}

impl SpinnerTemplate {
    #[must_use]
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            SpinnerTemplate::Circle => &CIRCLE_FRAMES,
            SpinnerTemplate::Braille => &BRAILLE_FRAMES,
            SpinnerTemplate::Block => &BLOCK_FRAMES,
        }
    }

    #[must_use]
    pub fn frame(self, count: usize) -> &'static str {
        let frames = self.frames();
        frames[count % frames.len()]
    }
}

/// How the work the spinner was waiting on ended. Picks the final symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpinnerOutcome {
    #[default]
    Done,
    Cancelled,
    Failed,
}

#[allow(missing_debug_implementations)]
pub struct SpinnerOptions {
    pub template: SpinnerTemplate,
    pub tick_delay: Duration,
    /// Force CI mode on or off. `None` detects it with the `is_ci` crate.
    pub ci: Option<bool>,
    pub output_device: OutputDevice,
    /// When given, an [`InputGate`] holds the terminal while spinning: keystrokes are
    /// swallowed and the cancel key exits the process.
    pub input_device: Option<InputDevice>,
    pub gate_options: GateOptions,
    pub style: StyleSheet,
}

impl Default for SpinnerOptions {
    fn default() -> Self {
        Self {
            template: SpinnerTemplate::default(),
            tick_delay: SPINNER_DELAY,
            ci: None,
            output_device: OutputDevice::default(),
            input_device: None,
            gate_options: GateOptions {
                restore_on_keypress: true,
                ..Default::default()
            },
            style: StyleSheet::default(),
        }
    }
}

/// Progress indicator for long running work. It isn't a prompt, it doesn't read a
/// value, but it shares the look and the [`InputGate`].
///
/// - Interactive: one line is redrawn in place on every tick.
/// - CI (`CI` env var, or [`SpinnerOptions::ci`]): the cursor never moves. The message
///   is printed once and dots are appended to it.
///
/// ```no_run
/// # use r3bl_prompt::{Spinner, SpinnerOptions, SpinnerOutcome};
/// # async fn example() -> miette::Result<()> {
/// let mut spinner = Spinner::new(SpinnerOptions::default());
/// spinner.start("Installing")?;
/// // Some work happens here...
/// spinner.stop("Installed", SpinnerOutcome::Done).await?;
/// # Ok(())
/// # }
/// ```
#[allow(missing_debug_implementations)]
pub struct Spinner {
    template: SpinnerTemplate,
    tick_delay: Duration,
    is_ci: bool,
    style: StyleSheet,
    output_device: OutputDevice,
    input_device: Option<InputDevice>,
    gate_options: GateOptions,
    maybe_gate: Option<InputGate>,
    /// ANSI escape sequences are stripped from this before being assigned.
    message: Arc<StdMutex<String>>,
    shutdown_sender: broadcast::Sender<()>,
    maybe_task_handle: Option<JoinHandle<()>>,
}

impl Spinner {
    #[must_use]
    pub fn new(options: SpinnerOptions) -> Self {
        let SpinnerOptions {
            template,
            tick_delay,
            ci,
            output_device,
            input_device,
            gate_options,
            style,
        } = options;

        // Shutdown broadcast channel.
        let (shutdown_sender, _) = broadcast::channel::<()>(1);

        Self {
            template,
            tick_delay,
            is_ci: ci.unwrap_or_else(is_ci::cached),
            style,
            output_device,
            input_device,
            gate_options,
            maybe_gate: None,
            message: Arc::new(StdMutex::new(String::new())),
            shutdown_sender,
            maybe_task_handle: None,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool { self.maybe_task_handle.is_some() }

    #[must_use]
    pub fn is_ci(&self) -> bool { self.is_ci }

    /// Replace the message shown next to the spinner.
    pub fn set_message(&self, message: impl AsRef<str>) {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner) =
            strip_ansi_escapes::strip_str(message.as_ref());
    }

    /// Print the gutter and start the tick task. Must be called from within a tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// - [`PromptError::SpinnerAlreadyRunning`] if it is already spinning.
    /// - The [`InputGate`] can't be acquired, or the output can't be written.
    pub fn start(&mut self, message: impl AsRef<str>) -> miette::Result<()> {
        if self.is_running() {
            return Err(PromptError::SpinnerAlreadyRunning.into());
        }

        self.set_message(message);

        if let Some(input_device) = self.input_device.take() {
            self.maybe_gate = Some(InputGate::acquire(
                self.gate_options.clone(),
                input_device,
                self.output_device.clone(),
            )?);
        }

        execute_commands!(
            self.output_device,
            Print(format!("{}{LINE_SEPARATOR}", self.style.dim(S_BAR)))
        );

        let ticker = Ticker {
            template: self.template,
            is_ci: self.is_ci,
            style: self.style,
            output_device: self.output_device.clone(),
            message: self.message.clone(),
        };
        let mut shutdown_receiver = self.shutdown_sender.subscribe();
        let tick_delay = self.tick_delay;

        self.maybe_task_handle = Some(tokio::spawn(async move {
            let mut interval = interval(tick_delay);
            let mut last_ci_message: Option<String> = None;

            // Count is used to determine the output.
            let mut count = 0;

            loop {
                tokio::select! {
                    // This branch is cancel safe because recv is cancel safe.
                    _ = shutdown_receiver.recv() => break,

                    // This branch is cancel safe because tick is cancel safe.
                    _ = interval.tick() => {
                        // We don't care about the result of this operation.
                        ticker.tick(count, &mut last_ci_message).ok();
                        count += 1;
                    }
                }
            }
        }));

        tracing::debug!(message = "Spinner started", is_ci = self.is_ci);
        Ok(())
    }

    /// Stop spinning and replace the spinner line with `final_message`, wait for the
    /// tick task to finish, and release the [`InputGate`]. No-op if not running.
    ///
    /// # Errors
    ///
    /// Returns an error if the output can't be written or the gate can't be released.
    pub async fn stop(
        &mut self,
        final_message: impl AsRef<str>,
        outcome: SpinnerOutcome,
    ) -> miette::Result<()> {
        let Some(task_handle) = self.maybe_task_handle.take() else {
            return Ok(());
        };

        // We don't care about the result of this operation.
        self.shutdown_sender.send(()).ok();
        if let Err(error) = task_handle.await {
            tracing::warn!(message = "Spinner task failed", ?error);
        }

        let symbol = match outcome {
            SpinnerOutcome::Done => self.style.submit.apply(S_STEP_SUBMIT),
            SpinnerOutcome::Cancelled => self.style.cancel.apply(S_STEP_CANCEL),
            SpinnerOutcome::Failed => self.style.error.apply(S_STEP_ERROR),
        };
        let final_message = strip_ansi_escapes::strip_str(final_message.as_ref());

        if self.is_ci {
            execute_commands!(
                self.output_device,
                Print(format!(
                    "{LINE_SEPARATOR}{symbol}  {final_message}{LINE_SEPARATOR}"
                ))
            );
        } else {
            execute_commands!(
                self.output_device,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                Print(format!("{symbol}  {final_message}{LINE_SEPARATOR}"))
            );
        }

        if let Some(gate) = self.maybe_gate.take() {
            self.input_device = Some(gate.reclaim().await?);
        }

        tracing::debug!(message = "Spinner stopped", ?outcome);
        Ok(())
    }
}

/// Everything the tick task needs, moved into it.
struct Ticker {
    template: SpinnerTemplate,
    is_ci: bool,
    style: StyleSheet,
    output_device: OutputDevice,
    message: Arc<StdMutex<String>>,
}

impl Ticker {
    fn tick(&self, count: usize, last_ci_message: &mut Option<String>) -> miette::Result<()> {
        let message = self
            .message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let frame = self.style.active.apply(self.template.frame(count));

        if self.is_ci {
            if last_ci_message.as_ref() != Some(&message) {
                let separator = if last_ci_message.is_some() {
                    LINE_SEPARATOR
                } else {
                    ""
                };
                execute_commands!(
                    self.output_device,
                    Print(format!("{separator}{frame}  {message}"))
                );
                *last_ci_message = Some(message);
            } else if count % TICKS_PER_DOT == 0 {
                execute_commands!(self.output_device, Print("."));
            }
            return Ok(());
        }

        let dots = ".".repeat((count / TICKS_PER_DOT) % 4);
        // Frame plus two spaces, then up to three dots.
        let available_width = usize::from(self.output_device.get_size().col_count)
            .saturating_sub(3 + 3);
        let message = truncate_to_width(&message, available_width, &UnicodeWidthStrategy);

        execute_commands!(
            self.output_device,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(format!("{frame}  {message}{dots}"))
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AliasRegistry, InputDeviceExtMock, KeyPress, OutputDeviceExt, SpecialKey,
                key_press};
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    const QUANTUM: Duration = Duration::from_millis(10);

    fn spinner(ci: bool) -> (Spinner, crate::StdoutMock) {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let spinner = Spinner::new(SpinnerOptions {
            tick_delay: QUANTUM,
            ci: Some(ci),
            output_device,
            ..Default::default()
        });
        (spinner, stdout_mock)
    }

    #[test]
    fn test_frames_cycle() {
        assert_eq!(SpinnerTemplate::Circle.frame(0), "◒");
        assert_eq!(SpinnerTemplate::Circle.frame(5), "◐");
        assert_eq!(SpinnerTemplate::Block.frame(8), "█");
    }

    #[tokio::test]
    async fn test_animated_spinner() {
        let (mut spinner, stdout_mock) = spinner(false);
        spinner.start("\x1b[31mLoading\x1b[0m").unwrap();
        assert!(spinner.is_running());
        tokio::time::sleep(QUANTUM * 5).await;
        spinner.stop("Loaded", SpinnerOutcome::Done).await.unwrap();
        assert!(!spinner.is_running());

        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.contains("\x1b[2K"));

        let output = strip_ansi_escapes::strip_str(&output);
        assert!(output.starts_with("│\n"));
        assert!(output.contains("◒  Loading"));
        assert!(output.ends_with("◇  Loaded\n"));
    }

    #[tokio::test]
    async fn test_ci_spinner_never_moves_cursor() {
        let (mut spinner, stdout_mock) = spinner(true);
        spinner.start("Building").unwrap();
        tokio::time::sleep(QUANTUM * 20).await;
        spinner.set_message("Linking");
        tokio::time::sleep(QUANTUM * 5).await;
        spinner.stop("Failed", SpinnerOutcome::Failed).await.unwrap();

        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(!output.contains("\x1b[2K"));
        assert!(!output.contains("\x1b[1G"));

        let output = strip_ansi_escapes::strip_str(&output);
        assert!(output.contains("◒  Building."));
        assert!(output.contains("  Linking"));
        assert!(output.ends_with("▲  Failed\n"));
    }

    #[tokio::test]
    async fn test_start_twice_fails() {
        let (mut spinner, _) = spinner(false);
        spinner.start("one").unwrap();
        assert!(spinner.start("two").is_err());
        spinner.stop("done", SpinnerOutcome::Done).await.unwrap();
        // Stopping again is a no-op.
        spinner.stop("done", SpinnerOutcome::Done).await.unwrap();
    }

    #[tokio::test]
    async fn test_gate_exits_on_cancel_key() {
        let codes = Arc::new(StdMutex::new(vec![]));
        let codes_clone = codes.clone();
        let (output_device, _) = OutputDevice::new_mock();

        let mut spinner = Spinner::new(SpinnerOptions {
            tick_delay: QUANTUM,
            ci: Some(false),
            output_device,
            input_device: Some(InputDevice::new_mock_then_pending(smallvec![
                crate::crossterm_event_from(key_press!(@char 'x')),
                crate::crossterm_event_from(KeyPress::ctrl('c')),
            ])),
            gate_options: GateOptions {
                restore_on_keypress: true,
                input_echoes: false,
                hide_cursor: true,
                aliases: AliasRegistry::new(),
                exit_hook: Arc::new(move |code| codes_clone.lock().unwrap().push(code)),
            },
            ..Default::default()
        });

        spinner.start("Waiting").unwrap();
        tokio::time::sleep(QUANTUM * 5).await;
        spinner.stop("Stopped", SpinnerOutcome::Cancelled).await.unwrap();

        assert_eq!(*codes.lock().unwrap(), vec![0]);
    }

    #[tokio::test]
    async fn test_enter_while_spinning_keeps_output_in_place() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let mut spinner = Spinner::new(SpinnerOptions {
            tick_delay: QUANTUM,
            ci: Some(false),
            output_device,
            input_device: Some(InputDevice::new_mock_then_pending(smallvec![
                crate::crossterm_event_from(key_press!(@special SpecialKey::Enter)),
                crate::crossterm_event_from(key_press!(@char 'x')),
                crate::crossterm_event_from(key_press!(@special SpecialKey::Enter)),
            ])),
            ..Default::default()
        });

        spinner.start("Waiting").unwrap();
        tokio::time::sleep(QUANTUM * 5).await;
        spinner.stop("Done", SpinnerOutcome::Done).await.unwrap();

        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(!output.contains("\x1b[1A"));
        assert!(!output.contains("\x1b[1D"));

        let output = strip_ansi_escapes::strip_str(&output);
        assert!(output.starts_with("│\n"));
        assert!(output.ends_with("◇  Done\n"));
    }
}
