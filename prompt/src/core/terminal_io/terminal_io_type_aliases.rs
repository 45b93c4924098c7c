// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::Event;
use futures_core::Stream;
use std::{io::Error, pin::Pin, sync::Arc};

/// Disambiguate the type of `StdMutex` from stdlib and tokio to avoid conflicts.
pub type StdMutex<T> = std::sync::Mutex<T>;
/// Disambiguate the type of `StdRwLock` from stdlib and tokio to avoid conflicts.
pub type StdRwLock<T> = std::sync::RwLock<T>;

/// Type alias for a `Send`-able output device (stdout, stderr, [`crate::StdoutMock`]).
pub type SendRawTerminal = dyn std::io::Write + Send;
/// Type alias for a `Send`-able raw terminal wrapped in an `Arc<StdMutex>`.
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

/// Type alias for crossterm streaming (input) event result.
pub type CrosstermEventResult = Result<Event, Error>;

/// Type alias for a pinned stream that is async safe. `T` is usually
/// [`CrosstermEventResult`].
///
/// Unlike a full screen TUI event loop, the input stream here has to be handed off to a
/// spawned task by [`crate::InputGate`], so it must be `Send`.
pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// Stack allocated vector for small collections, like the events fed to a mock
/// [`crate::InputDevice`].
pub type InlineVec<T> = smallvec::SmallVec<[T; INLINE_VEC_SIZE]>;
pub const INLINE_VEC_SIZE: usize = 8;
