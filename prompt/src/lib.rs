// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_prompt
//!
//! Interactive prompts for CLI apps: text, password, confirm, select, multiselect and
//! spinners. Every prompt is an inline UI (no alternate screen) that is re-painted after
//! each keypress by diffing the new frame against the previous one, so only the lines
//! that actually changed get written to the terminal.
//!
//! # Architecture
//!
//! ```text
//! InputDevice (crossterm EventStream, or a mock)
//!     │ InputEvent::Keyboard(KeyPress) / InputEvent::Resize(Size)
//!     ▼
//! Prompt (engine::prompt)
//!     ├─→ AliasRegistry      k/j/h/l, Ctrl+C, Esc → Action
//!     ├─→ EventEmitter       value, cursor, key, confirm, finalize, submit, cancel
//!     ├─→ validate()         PromptState::Error → PromptState::Active on next key
//!     └─→ render(&PromptCore) → FrameBuffer::render() → OutputDevice
//! ```
//!
//! Subtypes in [`mod@prompts`] compose a [`Prompt`] by attaching event handlers and a
//! render function. They never reach into the engine.
//!
//! # Example
//!
//! ```no_run
//! use r3bl_prompt::*;
//!
//! #[tokio::main]
//! async fn main() -> miette::Result<()> {
//!     let result = TextPrompt::new(TextOptions {
//!         message: "What is your name?".into(),
//!         placeholder: Some("anonymous".into()),
//!         ..Default::default()
//!     })
//!     .prompt()
//!     .await?;
//!
//!     match result {
//!         PromptResult::Submit(name) => println!("Hello {name}"),
//!         PromptResult::Cancel => println!("Cancelled"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! Logging is disabled unless [`try_initialize_logging_global`] is called. Since the
//! prompts own the terminal, log to a file with [`WriterConfig::File`].

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod core;
pub mod engine;
pub mod prompts;

// Re-export.
pub use core::*;
pub use engine::*;
pub use prompts::*;
