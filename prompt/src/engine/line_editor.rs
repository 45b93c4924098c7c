// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyPress, SpecialKey};

/// Outcome of feeding a keypress to [`apply_to_buffer()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEditResult {
    /// The text changed (the cursor may have moved too).
    Changed,
    /// Only the cursor moved.
    CursorMoved,
    /// The key isn't a line editing key, or it had nothing to do (eg: Backspace at
    /// the start of the line).
    Noop,
}

/// Single line editing for prompts that track a text buffer. `cursor` is a char index
/// into `buffer`, and is clamped to the buffer's length first.
///
/// | Key              | Effect                                   |
/// |------------------|------------------------------------------|
/// | printable char   | insert at cursor                         |
/// | Backspace        | remove the char before the cursor        |
/// | Delete           | remove the char under the cursor         |
/// | Left / Right     | move by one char                         |
/// | Home / End       | move to start / end                      |
///
/// Tab and Enter are left for the prompt to handle.
pub fn apply_to_buffer(
    buffer: &mut String,
    cursor: &mut usize,
    key_press: &KeyPress,
) -> LineEditResult {
    let char_count = buffer.chars().count();
    *cursor = (*cursor).min(char_count);

    if let Some(character) = key_press.printable_char() {
        if character.is_control() {
            return LineEditResult::Noop;
        }
        buffer.insert(byte_index(buffer, *cursor), character);
        *cursor += 1;
        return LineEditResult::Changed;
    }

    let Some(special_key) = key_press.special_key() else {
        return LineEditResult::Noop;
    };

    match special_key {
        SpecialKey::Backspace if *cursor > 0 => {
            *cursor -= 1;
            buffer.remove(byte_index(buffer, *cursor));
            LineEditResult::Changed
        }
        SpecialKey::Delete if *cursor < char_count => {
            buffer.remove(byte_index(buffer, *cursor));
            LineEditResult::Changed
        }
        SpecialKey::Left if *cursor > 0 => {
            *cursor -= 1;
            LineEditResult::CursorMoved
        }
        SpecialKey::Right if *cursor < char_count => {
            *cursor += 1;
            LineEditResult::CursorMoved
        }
        SpecialKey::Home if *cursor > 0 => {
            *cursor = 0;
            LineEditResult::CursorMoved
        }
        SpecialKey::End if *cursor < char_count => {
            *cursor = char_count;
            LineEditResult::CursorMoved
        }
        _ => LineEditResult::Noop,
    }
}

fn byte_index(buffer: &str, char_index: usize) -> usize {
    buffer
        .char_indices()
        .nth(char_index)
        .map_or(buffer.len(), |(index, _)| index)
}
