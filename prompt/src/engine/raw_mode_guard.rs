// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::PromptError;

/// Owns the terminal's raw mode flag for as long as it is alive. Raw mode is only
/// touched when the input is a TTY, so piped stdin and mock devices work unchanged.
///
/// Crossterm's raw mode is process wide, which is why only one prompt (or
/// [`crate::InputGate`]) should own the terminal at a time.
#[derive(Debug)]
pub struct RawModeGuard {
    is_enabled: bool,
}

impl RawModeGuard {
    /// # Errors
    ///
    /// Returns [`PromptError::RawMode`] if crossterm fails to switch the terminal.
    pub fn enable(is_tty: bool) -> miette::Result<Self> {
        if is_tty {
            enable_raw_mode().map_err(PromptError::RawMode)?;
            tracing::debug!(message = "Raw mode enabled");
        }
        Ok(Self { is_enabled: is_tty })
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool { self.is_enabled }

    /// Turn raw mode off. Calling this again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::RawMode`] if crossterm fails to switch the terminal.
    pub fn restore(&mut self) -> miette::Result<()> {
        if !self.is_enabled {
            return Ok(());
        }
        self.is_enabled = false;
        disable_raw_mode().map_err(PromptError::RawMode)?;
        tracing::debug!(message = "Raw mode restored");
        Ok(())
    }

    /// Stop owning raw mode without restoring it.
    pub fn forget(&mut self) { self.is_enabled = false; }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(error) = self.restore() {
            tracing::warn!(message = "Failed to restore raw mode on drop", ?error);
        }
    }
}
