// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          io::Write,
          sync::Arc};

use crossterm::{Command,
                cursor::{Hide, MoveDown, MoveLeft, MoveUp},
                style::Print,
                terminal::{Clear, ClearType}};
use miette::IntoDiagnostic;

use crate::{DEVELOPMENT_MODE, Size, UnicodeWidthStrategy, WidthStrategy,
            queue_commands_no_lock, wrap_hard};

/// Crossterm's raw mode turns off output post processing, so a bare `\n` moves the
/// cursor down without returning it to the first column.
pub const LINE_SEPARATOR: &str = "\r\n";

/// Far enough left to reach column 0 from anywhere.
const COLUMN_RESET: u16 = 999;

/// `ESC[G`, cursor to the first column of the current line. Crossterm's
/// `MoveToColumn(0)` writes the same move with an explicit argument, `ESC[1G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToLineStart;

impl Command for MoveToLineStart {
    fn write_ansi(&self, f: &mut impl std::fmt::Write) -> std::fmt::Result {
        f.write_str("\x1b[G")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        crossterm::cursor::MoveToColumn(0).execute_winapi()
    }
}

/// Which path [`FrameBuffer::render()`] took to bring the terminal up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The new frame is identical to what is on screen. Nothing was written.
    Unchanged,
    /// Nothing was on screen. The cursor was hidden and the whole frame written.
    FirstPaint,
    /// Exactly one line changed and it was patched in place.
    SingleLine(usize),
    /// Everything from this line down was erased and rewritten.
    FromLine(usize),
    /// The frame got shorter without any surviving line changing. The lines that no
    /// longer exist were erased.
    TrimmedTail,
}

/// Indices of the lines that differ between `prev` and `next`. Lines past the end of the
/// shorter frame count as different. Returns `None` when the frames are equal.
#[must_use]
pub fn diff_lines(prev: &str, next: &str) -> Option<Vec<usize>> {
    if prev == next {
        return None;
    }

    let prev_lines: Vec<&str> = prev.split('\n').collect();
    let next_lines: Vec<&str> = next.split('\n').collect();
    let max_len = prev_lines.len().max(next_lines.len());

    Some(
        (0..max_len)
            .filter(|&index| prev_lines.get(index) != next_lines.get(index))
            .collect(),
    )
}

/// Remembers the last frame that was written to the terminal, so that the next one can
/// be written as a patch. Owned by a single prompt, never shared.
///
/// Between renders the cursor sits on the last line of the previous frame. Every diff
/// starts by moving it to the top left corner of that frame:
///
/// ```text
/// ESC[999D         column 0
/// ESC[{n}A         up by (line count of previous frame - 1)
/// ```
///
/// Relative moves are then computed from there, and zero length moves are never emitted
/// (terminals treat `ESC[0A` like `ESC[1A`).
///
/// The cursor can't move above the top row of the screen. When the previous frame is
/// taller than the terminal, the move up stops at row 0 and the lines that scrolled
/// off are never patched. A change in one of them rewrites the visible part instead.
pub struct FrameBuffer {
    previous_frame: Option<String>,
    width_strategy: Arc<dyn WidthStrategy>,
}

impl Debug for FrameBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("previous_frame", &self.previous_frame)
            .field("width_strategy", &self.width_strategy)
            .finish()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self { Self::new(Arc::new(UnicodeWidthStrategy)) }
}

impl FrameBuffer {
    #[must_use]
    pub fn new(width_strategy: Arc<dyn WidthStrategy>) -> Self {
        Self {
            previous_frame: None,
            width_strategy,
        }
    }

    #[must_use]
    pub fn previous_frame(&self) -> Option<&str> { self.previous_frame.as_deref() }

    /// Forget what is on screen. The next render is a [`RenderOutcome::FirstPaint`].
    pub fn reset(&mut self) { self.previous_frame = None; }

    /// Wrap `new_frame_raw` at `size.col_count` columns and write whatever is needed to
    /// turn the previous frame into it.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails. The previous frame is left as it
    /// was in that case.
    pub fn render(
        &mut self,
        new_frame_raw: &str,
        writer: &mut dyn Write,
        size: Size,
    ) -> miette::Result<RenderOutcome> {
        let width = size.col_count;
        let new_frame = wrap_hard(new_frame_raw, usize::from(width), &*self.width_strategy);

        let outcome = match self.previous_frame.as_deref() {
            Some(previous_frame) if previous_frame == new_frame => {
                return Ok(RenderOutcome::Unchanged);
            }
            None => {
                queue_commands_no_lock!(writer, Hide, Print(join_lines(&new_frame, 0)));
                RenderOutcome::FirstPaint
            }
            Some(previous_frame) => {
                let top_line = self.restore_cursor(previous_frame, writer, size)?;
                let diff = diff_lines(previous_frame, &new_frame).unwrap_or_default();
                let prev_line_count = previous_frame.split('\n').count();
                patch(&diff, prev_line_count, top_line, &new_frame, writer)?
            }
        };

        writer.flush().into_diagnostic()?;

        DEVELOPMENT_MODE.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "FrameBuffer::render", ?outcome, ?size);
        });

        self.previous_frame = Some(new_frame);
        Ok(outcome)
    }

    /// Move to the top left corner of the previous frame. It is re-wrapped at the
    /// current width, since the terminal reflows it when the window gets narrower.
    ///
    /// Returns the index of the line the cursor ends up on. It is 0 unless the frame is
    /// taller than the screen.
    fn restore_cursor(
        &self,
        previous_frame: &str,
        writer: &mut dyn Write,
        size: Size,
    ) -> miette::Result<usize> {
        let rewrapped =
            wrap_hard(previous_frame, usize::from(size.col_count), &*self.width_strategy);
        let last_line = rewrapped.split('\n').count() - 1;
        let lines_above = last_line.min(usize::from(size.row_count.saturating_sub(1)));

        queue_commands_no_lock!(writer, MoveLeft(COLUMN_RESET));
        if let Some(lines_above) = non_zero_u16(lines_above) {
            queue_commands_no_lock!(writer, MoveUp(lines_above));
        }
        Ok(last_line - lines_above)
    }
}

/// The cursor is in column 0 of line `top_line` of the previous frame, the highest line
/// still on screen.
fn patch(
    diff: &[usize],
    prev_line_count: usize,
    top_line: usize,
    new_frame: &str,
    writer: &mut dyn Write,
) -> miette::Result<RenderOutcome> {
    let new_lines: Vec<&str> = new_frame.split('\n').collect();
    let new_line_count = new_lines.len();
    let first = diff.first().copied().unwrap_or_default();
    let last_index = new_line_count - 1;

    // Only lines that went away changed.
    if first >= new_line_count && last_index >= top_line {
        move_down(writer, last_index - top_line)?;
        queue_commands_no_lock!(
            writer,
            Clear(ClearType::FromCursorDown),
            Print(new_lines[last_index])
        );
        return Ok(RenderOutcome::TrimmedTail);
    }

    // Exactly one line changed, and it is already on screen.
    if let [index] = diff
        && *index < prev_line_count
        && *index >= top_line
    {
        move_down(writer, *index - top_line)?;
        queue_commands_no_lock!(
            writer,
            Clear(ClearType::CurrentLine),
            MoveToLineStart,
            Print(new_lines[*index])
        );
        move_down(writer, new_line_count - index - 1)?;
        return Ok(RenderOutcome::SingleLine(*index));
    }

    // Moving down past the last line of the previous frame would not scroll the
    // terminal, so appended lines are written from the last existing line.
    let anchor = first
        .min(prev_line_count - 1)
        .max(top_line)
        .min(last_index);
    move_down(writer, anchor.saturating_sub(top_line))?;
    queue_commands_no_lock!(
        writer,
        Clear(ClearType::FromCursorDown),
        Print(join_lines(new_frame, anchor))
    );
    Ok(RenderOutcome::FromLine(anchor))
}

fn move_down(writer: &mut dyn Write, count: usize) -> miette::Result<()> {
    if let Some(count) = non_zero_u16(count) {
        queue_commands_no_lock!(writer, MoveDown(count));
    }
    Ok(())
}

fn non_zero_u16(count: usize) -> Option<u16> {
    match count {
        0 => None,
        it => Some(u16::try_from(it).unwrap_or(u16::MAX)),
    }
}

/// Lines `skip..` of `frame`, separated by [`LINE_SEPARATOR`].
fn join_lines(frame: &str, skip: usize) -> String {
    frame
        .split('\n')
        .skip(skip)
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}
