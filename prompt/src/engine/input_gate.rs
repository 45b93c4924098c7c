// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use crossterm::{cursor::{Hide, MoveLeft, MoveUp, Show},
                terminal::{Clear, ClearType, disable_raw_mode}};
use miette::IntoDiagnostic;
use tokio::{runtime::Handle,
            sync::oneshot,
            task::JoinHandle};

use crate::{Action, AliasRegistry, InputDevice, InputEvent, KeyPress, OutputDevice,
            PromptError, RawModeGuard, SpecialKey, execute_commands};

/// What the safety net calls when the cancel key is pressed while the gate is held.
/// The default terminates the process.
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

#[must_use]
pub fn default_exit_hook() -> ExitHook { Arc::new(|code| std::process::exit(code)) }

/// Exit code used by the safety net.
pub const GATE_EXIT_CODE: i32 = 0;

#[derive(Clone)]
pub struct GateOptions {
    /// Erase every keystroke the input echoed, so nothing typed while the gate is held
    /// stays on screen. Only applies when [`Self::input_echoes`] is set.
    pub restore_on_keypress: bool,
    /// The input is in cooked mode and the terminal echoes every keystroke to the
    /// output. Ignored for a TTY input, since the gate puts it in raw mode, which turns
    /// echo off.
    pub input_echoes: bool,
    pub hide_cursor: bool,
    pub aliases: AliasRegistry,
    pub exit_hook: ExitHook,
}

impl Default for GateOptions {
    fn default() -> Self {
        Self {
            restore_on_keypress: false,
            input_echoes: false,
            hide_cursor: true,
            aliases: AliasRegistry::global(),
            exit_hook: default_exit_hook(),
        }
    }
}

impl Debug for GateOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateOptions")
            .field("restore_on_keypress", &self.restore_on_keypress)
            .field("input_echoes", &self.input_echoes)
            .field("hide_cursor", &self.hide_cursor)
            .field("aliases", &self.aliases.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseKeystroke {
    /// `dx = -1`.
    PreviousColumn,
    /// `dy = -1`, for Enter.
    PreviousLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Exit { code: i32 },
    Erase(EraseKeystroke),
    Ignore,
}

/// The gate's policy for a single keypress. The cancel alias always exits, no matter
/// what else is configured. A keystroke is only erased if `is_echoing`, otherwise
/// nothing was written and moving the cursor would damage what is on screen.
#[must_use]
pub fn inspect_keypress(
    key_press: &KeyPress,
    options: &GateOptions,
    is_echoing: bool,
) -> GateDecision {
    if options.aliases.resolve(key_press) == Some(Action::Cancel) {
        return GateDecision::Exit {
            code: GATE_EXIT_CODE,
        };
    }

    if !options.restore_on_keypress || !is_echoing {
        return GateDecision::Ignore;
    }

    if key_press.is_special(SpecialKey::Enter) {
        GateDecision::Erase(EraseKeystroke::PreviousLine)
    } else {
        GateDecision::Erase(EraseKeystroke::PreviousColumn)
    }
}

/// Holds the terminal for UI that isn't a prompt but still must not let keystrokes
/// through, eg: a spinner. While held:
/// - The input is in raw mode (if it is a TTY) and the cursor is optionally hidden.
/// - A tokio task owns the [`InputDevice`] and runs [`inspect_keypress()`] on every
///   keypress. The cancel alias shows the cursor, turns raw mode off, and calls the
///   [`ExitHook`].
///
/// [`Self::release()`] is the disposer. It runs on [`Drop`] too.
///
/// Only one gate (or prompt) should own the terminal at a time.
pub struct InputGate {
    output_device: OutputDevice,
    raw_mode_guard: RawModeGuard,
    is_cursor_hidden: bool,
    shutdown_sender: Option<oneshot::Sender<()>>,
    task_handle: Option<JoinHandle<InputDevice>>,
    is_closed: bool,
}

impl Debug for InputGate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputGate")
            .field("raw_mode_guard", &self.raw_mode_guard)
            .field("is_cursor_hidden", &self.is_cursor_hidden)
            .field("is_closed", &self.is_closed)
            .finish_non_exhaustive()
    }
}

impl InputGate {
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - There is no tokio runtime.
    /// - Raw mode can't be enabled, or the cursor can't be hidden.
    pub fn acquire(
        options: GateOptions,
        input_device: InputDevice,
        output_device: OutputDevice,
    ) -> miette::Result<InputGate> {
        let runtime = Handle::try_current().into_diagnostic()?;
        let is_tty = input_device.is_tty;
        let raw_mode_guard = RawModeGuard::enable(is_tty)?;

        if options.hide_cursor {
            execute_commands!(output_device, Hide);
        }

        let (shutdown_sender, shutdown_receiver) = oneshot::channel::<()>();
        let is_cursor_hidden = options.hide_cursor;

        let task_handle = runtime.spawn(listen(
            input_device,
            shutdown_receiver,
            options,
            output_device.clone(),
        ));

        tracing::debug!(message = "InputGate acquired", is_tty, is_cursor_hidden);

        Ok(InputGate {
            output_device,
            raw_mode_guard,
            is_cursor_hidden,
            shutdown_sender: Some(shutdown_sender),
            task_handle: Some(task_handle),
            is_closed: false,
        })
    }

    #[must_use]
    pub fn is_closed(&self) -> bool { self.is_closed }

    /// Stop listening, show the cursor if it was hidden, and turn raw mode off. Calling
    /// it again is a no-op.
    ///
    /// On Windows raw mode is left as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor can't be shown or raw mode can't be disabled.
    /// Every step is attempted regardless.
    pub fn release(&mut self) -> miette::Result<()> {
        if self.is_closed {
            return Ok(());
        }
        self.is_closed = true;

        if let Some(shutdown_sender) = self.shutdown_sender.take() {
            // The task may have ended already (stream exhausted, or exit hook ran).
            shutdown_sender.send(()).ok();
        }

        let show_cursor_result = if self.is_cursor_hidden {
            show_cursor(&self.output_device)
        } else {
            Ok(())
        };

        if cfg!(windows) {
            self.raw_mode_guard.forget();
        } else {
            self.raw_mode_guard.restore()?;
        }

        tracing::debug!(message = "InputGate released");
        show_cursor_result
    }

    /// [`Self::release()`] and get the input device back, eg: to run a prompt next.
    ///
    /// # Errors
    ///
    /// Returns an error if releasing fails, or if the listener task panicked.
    pub async fn reclaim(mut self) -> miette::Result<InputDevice> {
        self.release()?;
        let task_handle = self.task_handle.take().ok_or(PromptError::NoInputDevice)?;
        let input_device = task_handle.await.map_err(PromptError::GateListenerTask)?;
        Ok(input_device)
    }
}

impl Drop for InputGate {
    fn drop(&mut self) {
        if let Err(error) = self.release() {
            tracing::warn!(message = "Failed to release InputGate on drop", ?error);
        }
    }
}

async fn listen(
    mut input_device: InputDevice,
    mut shutdown_receiver: oneshot::Receiver<()>,
    options: GateOptions,
    output_device: OutputDevice,
) -> InputDevice {
    let is_echoing = options.input_echoes && !input_device.is_tty;

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown_receiver => break,

            maybe_input_event = input_device.next_input_event() => {
                let key_press = match maybe_input_event {
                    Some(InputEvent::Keyboard(key_press)) => key_press,
                    Some(InputEvent::Resize(_)) => continue,
                    None => break,
                };

                match inspect_keypress(&key_press, &options, is_echoing) {
                    GateDecision::Exit { code } => {
                        tracing::debug!(message = "InputGate exit on cancel key", code);
                        if options.hide_cursor
                            && let Err(error) = show_cursor(&output_device)
                        {
                            tracing::warn!(message = "Failed to show cursor", ?error);
                        }
                        if input_device.is_tty
                            && let Err(error) = disable_raw_mode()
                        {
                            tracing::warn!(message = "Failed to disable raw mode", ?error);
                        }
                        (options.exit_hook)(code);
                        break;
                    }
                    GateDecision::Erase(erase) => {
                        if let Err(error) = erase_keystroke(&output_device, erase) {
                            tracing::warn!(message = "Failed to erase keystroke", ?error);
                        }
                    }
                    GateDecision::Ignore => {}
                }
            }
        }
    }

    input_device
}

fn show_cursor(output_device: &OutputDevice) -> miette::Result<()> {
    execute_commands!(output_device, Show);
    Ok(())
}

fn erase_keystroke(output_device: &OutputDevice, erase: EraseKeystroke) -> miette::Result<()> {
    match erase {
        EraseKeystroke::PreviousColumn => {
            execute_commands!(output_device, MoveLeft(1), Clear(ClearType::UntilNewLine));
        }
        EraseKeystroke::PreviousLine => {
            execute_commands!(output_device, MoveUp(1), Clear(ClearType::UntilNewLine));
        }
    }
    Ok(())
}
