// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The prompt subtypes. Each one is a thin layer over [`crate::Prompt`]: an `ext`
//! struct with what only it needs, a few event handlers, and a render function.

// Attach sources.
pub mod confirm;
pub mod multi_select;
pub mod password;
pub mod prompt_io;
pub mod select;
pub mod spinner;
pub mod style;
pub mod text;

// Re-export.
pub use confirm::*;
pub use multi_select::*;
pub use password::*;
pub use prompt_io::*;
pub use select::*;
pub use spinner::*;
pub use style::*;
pub use text::*;
