// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Opt-in `tracing` setup. The prompts log state transitions and render paths at
//! `debug` level; nothing is recorded unless one of
//! [`try_initialize_logging_global`] or [`try_initialize_logging_thread_local`] is
//! called. A prompt owns the terminal while it runs, so [`WriterConfig::File`] is the
//! sensible choice for interactive apps.

// Attach sources.
pub mod public_api;
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use public_api::*;
pub use tracing_config::*;
pub use tracing_init::*;
