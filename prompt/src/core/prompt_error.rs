// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::PromptState;

/// Errors that a prompt can't recover from by itself. Validation failures are not in
/// here, they are a normal part of the lifecycle (see [`crate::ValidationError`]), and
/// neither is cancellation (see [`crate::PromptResult::Cancel`]).
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum PromptError {
    /// Crossterm could not switch the terminal in or out of raw mode.
    #[error("Failed to toggle terminal raw mode")]
    #[diagnostic(
        code(r3bl_prompt::gate::raw_mode),
        help("Is stdin a terminal? Piped input is supported, but it must not claim to be a TTY.")
    )]
    RawMode(#[source] std::io::Error),

    /// [`crate::Prompt::prompt()`] was called on a prompt that already reached a
    /// terminal state.
    #[error("Prompt already finished in state `{state}`")]
    #[diagnostic(
        code(r3bl_prompt::prompt::already_finished),
        help("A prompt instance is single use. Construct a new one to ask again.")
    )]
    AlreadyFinished { state: PromptState },

    /// The prompt has no input device to read from.
    #[error("Prompt has no input device")]
    #[diagnostic(
        code(r3bl_prompt::prompt::no_input_device),
        help("The input device is consumed by the first call to `prompt()`.")
    )]
    NoInputDevice,

    /// The task listening to keypresses on behalf of [`crate::InputGate`] panicked or
    /// was cancelled before it could hand back the input device.
    #[error("Input gate listener task failed")]
    #[diagnostic(code(r3bl_prompt::gate::listener_task))]
    GateListenerTask(#[source] tokio::task::JoinError),

    /// [`crate::Spinner::start()`] was called while the spinner is still spinning.
    #[error("Spinner is already running")]
    #[diagnostic(
        code(r3bl_prompt::spinner::already_running),
        help("Call `stop()` before starting the spinner again.")
    )]
    SpinnerAlreadyRunning,
}
