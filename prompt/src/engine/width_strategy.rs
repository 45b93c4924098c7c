// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// How many terminal columns a grapheme cluster occupies. Terminal emulators disagree
/// on emoji and East Asian ambiguous width characters, so this is pluggable via
/// [`crate::PromptOptions::width_strategy`].
pub trait WidthStrategy: Debug + Send + Sync {
    fn grapheme_width(&self, grapheme: &str) -> usize;
}

/// Default. Uses the Unicode East Asian Width tables from the `unicode-width` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWidthStrategy;

impl WidthStrategy for UnicodeWidthStrategy {
    fn grapheme_width(&self, grapheme: &str) -> usize { grapheme.width() }
}

/// Every grapheme cluster is one column wide. Matches terminals that don't render
/// double width glyphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleColumnWidthStrategy;

impl WidthStrategy for SingleColumnWidthStrategy {
    fn grapheme_width(&self, _grapheme: &str) -> usize { 1 }
}

/// A piece of a line of terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A complete ANSI escape sequence (CSI, OSC, or a two byte escape). It takes up no
    /// columns.
    Escape(&'a str),
    Grapheme(&'a str),
}

/// Split `text` into ANSI escape sequences and grapheme clusters, in order.
#[must_use]
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut acc = vec![];
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find('\x1b') {
            Some(0) => {
                let len = escape_sequence_len(rest);
                acc.push(Segment::Escape(&rest[..len]));
                rest = &rest[len..];
            }
            Some(start) => {
                acc.extend(rest[..start].graphemes(true).map(Segment::Grapheme));
                rest = &rest[start..];
            }
            None => {
                acc.extend(rest.graphemes(true).map(Segment::Grapheme));
                rest = "";
            }
        }
    }

    acc
}

/// Byte length of the escape sequence at the start of `text`, which must start with
/// `ESC`. An unterminated sequence runs to the end of `text`.
fn escape_sequence_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    match bytes.get(1) {
        // CSI: parameters and intermediates, then a final byte in `@`..=`~`.
        Some(b'[') => bytes
            .iter()
            .enumerate()
            .skip(2)
            .find(|(_, byte)| (0x40..=0x7e).contains(*byte))
            .map_or(bytes.len(), |(index, _)| index + 1),
        // OSC: terminated by BEL or by ST (`ESC \`).
        Some(b']') => {
            let mut index = 2;
            while index < bytes.len() {
                match bytes[index] {
                    0x07 => return index + 1,
                    0x1b if bytes.get(index + 1) == Some(&b'\\') => return index + 2,
                    _ => index += 1,
                }
            }
            bytes.len()
        }
        // Two character escape, eg `ESC 7`. The second char may be multi byte.
        Some(_) => 1 + text[1..].chars().next().map_or(0, char::len_utf8),
        None => 1,
    }
}

/// Visible width of `text` in columns, ignoring ANSI escape sequences.
#[must_use]
pub fn display_width(text: &str, strategy: &dyn WidthStrategy) -> usize {
    segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Escape(_) => 0,
            Segment::Grapheme(grapheme) => strategy.grapheme_width(grapheme),
        })
        .sum()
}

/// Hard wrap every line of `text` so that no row is wider than `width` columns.
///
/// - Breaks happen between grapheme clusters, not at word boundaries.
/// - Whitespace is preserved as is, nothing is trimmed.
/// - Escape sequences stick to the row they appear in and never cause a break.
/// - A grapheme wider than `width` gets a row of its own.
/// - `width == 0` disables wrapping.
#[must_use]
pub fn wrap_hard(text: &str, width: usize, strategy: &dyn WidthStrategy) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut rows: Vec<String> = vec![];

    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;

        for segment in segments(line) {
            match segment {
                Segment::Escape(escape) => row.push_str(escape),
                Segment::Grapheme(grapheme) => {
                    let grapheme_width = strategy.grapheme_width(grapheme);
                    if row_width > 0 && row_width + grapheme_width > width {
                        rows.push(std::mem::take(&mut row));
                        row_width = 0;
                    }
                    row.push_str(grapheme);
                    row_width += grapheme_width;
                }
            }
        }

        rows.push(row);
    }

    rows.join("\n")
}

/// Cut `text` (which must not contain escape sequences) so that it fits in `width`
/// columns. Single line UI like a spinner uses this, since a wrapped line can't be
/// redrawn in place.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize, strategy: &dyn WidthStrategy) -> String {
    let mut acc = String::new();
    let mut acc_width = 0;
    for grapheme in text.graphemes(true) {
        let grapheme_width = strategy.grapheme_width(grapheme);
        if acc_width + grapheme_width > width {
            break;
        }
        acc.push_str(grapheme);
        acc_width += grapheme_width;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("", 10, ""; "empty stays empty")]
    #[test_case("abcdef", 3, "abc\ndef"; "exact multiple")]
    #[test_case("abcdefg", 3, "abc\ndef\ng"; "remainder")]
    #[test_case("ab\ncdef", 3, "ab\ncde\nf"; "existing newlines kept")]
    #[test_case("a   b", 2, "a \n  \nb"; "whitespace is not trimmed")]
    #[test_case("abcdef", 0, "abcdef"; "zero width disables wrapping")]
    #[test_case("日本語", 4, "日本\n語"; "double width")]
    fn test_wrap_hard(input: &str, width: usize, expected: &str) {
        assert_eq!(wrap_hard(input, width, &UnicodeWidthStrategy), expected);
    }

    #[test]
    fn test_wrap_hard_ignores_escape_sequences() {
        let input = "\x1b[31mabcd\x1b[0m";
        assert_eq!(
            wrap_hard(input, 2, &UnicodeWidthStrategy),
            "\x1b[31mab\ncd\x1b[0m"
        );
    }

    #[test]
    fn test_wrap_hard_with_other_strategy() {
        assert_eq!(wrap_hard("日本語", 2, &SingleColumnWidthStrategy), "日本\n語");
    }

    #[test]
    fn test_segments() {
        assert_eq!(
            segments("\x1b[1ma\u{301}\x1b]8;;http://x\x07b"),
            vec![
                Segment::Escape("\x1b[1m"),
                Segment::Grapheme("a\u{301}"),
                Segment::Escape("\x1b]8;;http://x\x07"),
                Segment::Grapheme("b"),
            ]
        );
    }

    #[test_case("hello", 3, "hel"; "ascii")]
    #[test_case("日本語", 5, "日本"; "wide grapheme not split")]
    #[test_case("hi", 10, "hi"; "fits")]
    fn test_truncate_to_width(input: &str, width: usize, expected: &str) {
        assert_eq!(truncate_to_width(input, width, &UnicodeWidthStrategy), expected);
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("\x1b[2mhi\x1b[22m", &UnicodeWidthStrategy), 2);
        assert_eq!(display_width("日本", &UnicodeWidthStrategy), 4);
        assert_eq!(display_width("\x1b", &UnicodeWidthStrategy), 0);
    }
}
