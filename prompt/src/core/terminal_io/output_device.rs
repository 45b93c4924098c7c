// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{Arc, PoisonError};

use crate::{DEFAULT_SIZE, SafeRawTerminal, SendRawTerminal, Size, StdMutex, get_size};

pub type LockedOutputDevice<'a> = &'a mut dyn std::io::Write;

/// Macro to simplify locking and getting a mutable reference to the output device.
/// Don't call this again in the same scope, it will deadlock! A safe approach is to use
/// this macro in a separate block scope.
///
/// Usage example:
/// ```
/// use r3bl_prompt::{lock_output_device_as_mut, OutputDevice, LockedOutputDevice};
/// let device = OutputDevice::new_stdout();
/// { // Start a new block scope to avoid deadlock.
///     let mut_ref: LockedOutputDevice<'_> = lock_output_device_as_mut!(device);
///     let _ = mut_ref.write_all(b"Hello, world!\n");
/// } // The lock is released here.
/// ```
#[macro_export]
macro_rules! lock_output_device_as_mut {
    ($device:expr) => {
        &mut *$device.lock()
    };
}

/// This struct represents an output device that can be used to write to the terminal.
/// - It is safe to clone.
/// - To write to it, see the examples in [`Self::lock()`] or
///   [`lock_output_device_as_mut`] macro.
/// - Its width is what the frame differ wraps at, see [`Self::get_size()`].
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
    pub is_mock: bool,
    pub size_override: Option<Size>,
}

impl Default for OutputDevice {
    fn default() -> Self { Self::new_stdout() }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self {
        Self {
            resource: Arc::new(StdMutex::new(std::io::stdout())),
            is_mock: false,
            size_override: None,
        }
    }

    #[must_use]
    pub fn new_stderr() -> Self {
        Self {
            resource: Arc::new(StdMutex::new(std::io::stderr())),
            is_mock: false,
            size_override: None,
        }
    }
}

impl OutputDevice {
    /// Locks the output device for writing.
    ///
    /// ```
    /// use r3bl_prompt::{OutputDevice, LockedOutputDevice};
    ///
    /// let device = OutputDevice::new_stdout();
    /// let mut_ref: LockedOutputDevice<'_> = &mut *device.lock();
    /// let _ = mut_ref.write_all(b"Hello, world!\n");
    /// ```
    ///
    /// A poisoned lock is recovered from, since the guarded value is just a writer and
    /// a half written frame is repainted by the next render anyway.
    pub fn lock(&self) -> std::sync::MutexGuard<'_, SendRawTerminal> {
        self.resource.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The size to lay frames out in. An explicit override wins, then mocks report
    /// [`DEFAULT_SIZE`], then the real terminal is queried (falling back to
    /// [`DEFAULT_SIZE`] when stdout is not a terminal).
    #[must_use]
    pub fn get_size(&self) -> Size {
        if let Some(size) = self.size_override {
            return size;
        }
        if self.is_mock {
            return DEFAULT_SIZE;
        }
        get_size().unwrap_or(DEFAULT_SIZE)
    }

    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size_override = Some(size);
        self
    }
}
