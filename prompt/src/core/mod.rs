// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod log;
pub mod prompt_error;
pub mod term;
pub mod terminal_io;
pub mod test_fixtures;

// Re-export.
pub use log::*;
pub use prompt_error::*;
pub use term::*;
pub use terminal_io::*;
pub use test_fixtures::*;
