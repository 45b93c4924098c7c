// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 20;
pub const DEFAULT_SIZE: Size = Size {
    col_count: DEFAULT_WIDTH,
    row_count: DEFAULT_HEIGHT,
};

/// Terminal dimensions in columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub col_count: u16,
    pub row_count: u16,
}

impl Default for Size {
    fn default() -> Self { DEFAULT_SIZE }
}

/// Get the terminal size.
///
/// # Errors
///
/// Returns an error if:
/// - The terminal size cannot be determined
/// - The terminal is not available or not a TTY
pub fn get_size() -> miette::Result<Size> {
    let (columns, rows) = crossterm::terminal::size().into_diagnostic()?;
    Ok(Size {
        col_count: columns,
        row_count: rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size() {
        pretty_assertions::assert_eq!(
            Size::default(),
            Size {
                col_count: 80,
                row_count: 20
            }
        );
    }
}
