// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Turns on the noisier `tracing::debug!` calls in the render and keypress paths.
pub const DEVELOPMENT_MODE: bool = false;

// Attach sources.
pub mod abort_signal;
pub mod alias_registry;
pub mod event_emitter;
pub mod frame_differ;
pub mod input_gate;
pub mod line_editor;
pub mod prompt;
pub mod prompt_types;
pub mod raw_mode_guard;
pub mod validation;
pub mod width_strategy;

// Re-export.
pub use abort_signal::*;
pub use alias_registry::*;
pub use event_emitter::*;
pub use frame_differ::*;
pub use input_gate::*;
pub use line_editor::*;
pub use prompt::*;
pub use prompt_types::*;
pub use raw_mode_guard::*;
pub use validation::*;
pub use width_strategy::*;
