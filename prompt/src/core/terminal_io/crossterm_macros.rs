// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Queue commands to an already locked writer (see [`crate::lock_output_device_as_mut`]).
/// Holding the lock for the whole span of a frame write keeps the escape sequences of
/// one frame from interleaving with anything else written to the same device.
#[macro_export]
macro_rules! queue_commands_no_lock {
    ($writer:expr $(, $command:expr)* $(,)?) => {{
        use miette::IntoDiagnostic as _;
        $(
            ::crossterm::QueueableCommand::queue(
                &mut *$writer,
                $command
            ).into_diagnostic()?;
        )*
    }}
}

/// Execute commands on the output device immediately. It locks the output device
/// before queuing the commands, and flushes and unlocks it after. This is good for one
/// and done commands, like showing or hiding the cursor.
#[macro_export]
macro_rules! execute_commands {
    ($output_device:expr $(, $command:expr)* $(,)?) => {{
        use miette::IntoDiagnostic as _;
        let mut guard = $output_device.lock();
        let writer: &mut $crate::SendRawTerminal = &mut *guard;
        $(
            ::crossterm::QueueableCommand::queue(
                &mut *writer,
                $command
            ).into_diagnostic()?;
        )*
        ::std::io::Write::flush(writer).into_diagnostic()?;
    }}
}

/// This is similar to [`execute_commands!`], but it does not lock the output device.
#[macro_export]
macro_rules! execute_commands_no_lock {
    ($writer:expr $(, $command:expr)* $(,)?) => {{
        use miette::IntoDiagnostic as _;
        $(
            ::crossterm::QueueableCommand::queue(
                &mut *$writer,
                $command
            ).into_diagnostic()?;
        )*
        ::std::io::Write::flush(&mut *$writer).into_diagnostic()?;
    }}
}
