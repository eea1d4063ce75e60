use std::ops::Range;

use ropey::Rope;

use crate::markup::{MarkupEdit, StyleKind, StyleSet, active_styles, clamp_offset, toggle_markup};

/// Caret location as a line index and a byte column within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretPosition {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
}

impl CaretPosition {
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Direction for caret movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The text surface of the review composer.
///
/// A rope-backed buffer with a selection (anchor and head as byte offsets
/// into the full text). Toolbar edits go through [`toggle_markup`]; the caret
/// they produce is held as *pending* until the host has drawn the new text
/// and calls [`ComposeBuffer::commit_pending_caret`].
pub struct ComposeBuffer {
    rope: Rope,
    anchor: usize,
    head: usize,
    /// Remembered char column for vertical movement (sticky column).
    col_memory: Option<usize>,
    pending_caret: Option<usize>,
    disabled: bool,
    dirty: bool,
}

impl ComposeBuffer {
    /// Create a new buffer from a string, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            anchor: 0,
            head: 0,
            col_memory: None,
            pending_caret: None,
            disabled: false,
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Builder form of [`Self::set_disabled`].
    #[must_use]
    pub const fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// A disabled buffer ignores every edit and toolbar action.
    pub const fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Byte offset at which a line starts.
    pub fn line_start(&self, line_idx: usize) -> usize {
        self.rope
            .line_to_byte(line_idx.min(self.rope.len_lines().saturating_sub(1)))
    }

    /// The caret (selection head) as a byte offset.
    pub const fn caret(&self) -> usize {
        self.head
    }

    /// The selected byte range, ordered. Empty when there is no selection.
    pub fn selection_range(&self) -> Range<usize> {
        self.anchor.min(self.head)..self.anchor.max(self.head)
    }

    pub const fn has_selection(&self) -> bool {
        self.anchor != self.head
    }

    /// Line and column of the caret.
    pub fn caret_position(&self) -> CaretPosition {
        let line = self.rope.byte_to_line(self.head);
        CaretPosition::at(line, self.head - self.rope.line_to_byte(line))
    }

    /// Select `[start, end)`, with the caret at `end`.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let text = self.text();
        self.anchor = clamp_offset(&text, start);
        self.head = clamp_offset(&text, end);
        self.col_memory = None;
    }

    /// Collapse the selection to a caret at `offset`.
    pub fn set_caret(&mut self, offset: usize) {
        self.set_selection(offset, offset);
    }

    pub fn select_all(&mut self) {
        self.commit_pending_caret();
        self.anchor = 0;
        self.head = self.len();
        self.col_memory = None;
    }

    /// Styles open at the start of the selection.
    pub fn active_styles(&self) -> StyleSet {
        active_styles(&self.text(), self.selection_range().start)
    }

    /// Wrap the selection (or insert an empty marker at the caret) with the
    /// delimiters of `kind`.
    ///
    /// The selection collapses in place and the caret from the edit becomes
    /// pending. Returns `None` if the buffer is disabled.
    pub fn apply_style(&mut self, kind: StyleKind) -> Option<MarkupEdit> {
        if self.disabled {
            return None;
        }
        self.commit_pending_caret();
        let range = self.selection_range();
        let edit = toggle_markup(&self.text(), range.start, range.end, kind);
        self.rope = Rope::from_str(&edit.text);
        let collapsed = clamp_offset(&edit.text, self.head);
        self.anchor = collapsed;
        self.head = collapsed;
        self.col_memory = None;
        self.pending_caret = Some(edit.caret);
        self.dirty = true;
        Some(edit)
    }

    /// Caret waiting to be applied after the host redraws.
    pub const fn pending_caret(&self) -> Option<usize> {
        self.pending_caret
    }

    /// Apply the pending caret, if any. Returns `true` if the caret moved.
    pub fn commit_pending_caret(&mut self) -> bool {
        let Some(caret) = self.pending_caret.take() else {
            return false;
        };
        self.set_caret(caret);
        true
    }

    /// Insert a character at the caret, replacing the selection.
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Insert a string at the caret, replacing the selection.
    pub fn insert_str(&mut self, s: &str) {
        if self.disabled || (s.is_empty() && !self.has_selection()) {
            return;
        }
        self.commit_pending_caret();
        let range = self.selection_range();
        self.remove_bytes(range.clone());
        let char_idx = self.rope.byte_to_char(range.start);
        self.rope.insert(char_idx, s);
        self.place(range.start + s.len(), false);
        self.dirty = true;
    }

    /// Split the current line at the caret (Enter key).
    pub fn split_line(&mut self) {
        self.insert_str("\n");
    }

    /// Delete the selection or the character before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.commit_pending_caret();
        if self.has_selection() {
            return self.delete_selection();
        }
        if self.head == 0 {
            return false;
        }
        let start = self.prev_boundary(self.head);
        self.remove_bytes(start..self.head);
        self.place(start, false);
        self.dirty = true;
        true
    }

    /// Delete the selection or the character at the caret (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.commit_pending_caret();
        if self.has_selection() {
            return self.delete_selection();
        }
        if self.head >= self.len() {
            return false;
        }
        let end = self.next_boundary(self.head);
        self.remove_bytes(self.head..end);
        self.col_memory = None;
        self.dirty = true;
        true
    }

    /// Move the caret in the given direction, optionally extending the
    /// selection.
    pub fn move_cursor(&mut self, direction: Direction, extend: bool) {
        self.commit_pending_caret();
        match direction {
            Direction::Left => {
                let target = if self.has_selection() && !extend {
                    self.selection_range().start
                } else {
                    self.prev_boundary(self.head)
                };
                self.place(target, extend);
            }
            Direction::Right => {
                let target = if self.has_selection() && !extend {
                    self.selection_range().end
                } else {
                    self.next_boundary(self.head)
                };
                self.place(target, extend);
            }
            Direction::Up => self.move_vertical(false, extend),
            Direction::Down => self.move_vertical(true, extend),
        }
    }

    /// Move caret to the beginning of the line (Home).
    pub fn move_home(&mut self, extend: bool) {
        self.commit_pending_caret();
        let line = self.rope.byte_to_line(self.head);
        self.place(self.rope.line_to_byte(line), extend);
    }

    /// Move caret to the end of the line (End).
    pub fn move_end(&mut self, extend: bool) {
        self.commit_pending_caret();
        let line = self.rope.byte_to_line(self.head);
        let end = self.rope.line_to_byte(line) + self.line_at(line).map_or(0, |l| l.len());
        self.place(end, extend);
    }

    /// Move caret to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self, extend: bool) {
        self.commit_pending_caret();
        self.place(0, extend);
    }

    /// Move caret to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self, extend: bool) {
        self.commit_pending_caret();
        self.place(self.len(), extend);
    }

    // --- Private helpers ---

    fn place(&mut self, offset: usize, extend: bool) {
        self.head = offset;
        if !extend {
            self.anchor = offset;
        }
        self.col_memory = None;
    }

    fn delete_selection(&mut self) -> bool {
        let range = self.selection_range();
        self.remove_bytes(range.clone());
        self.place(range.start, false);
        self.dirty = true;
        true
    }

    fn remove_bytes(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let start = self.rope.byte_to_char(range.start);
        let end = self.rope.byte_to_char(range.end);
        self.rope.remove(start..end);
    }

    fn prev_boundary(&self, offset: usize) -> usize {
        let char_idx = self.rope.byte_to_char(offset);
        self.rope.char_to_byte(char_idx.saturating_sub(1))
    }

    fn next_boundary(&self, offset: usize) -> usize {
        let char_idx = self.rope.byte_to_char(offset);
        self.rope
            .char_to_byte((char_idx + 1).min(self.rope.len_chars()))
    }

    fn move_vertical(&mut self, down: bool, extend: bool) {
        let line = self.rope.byte_to_line(self.head);
        let target = if down {
            line + 1
        } else if let Some(prev) = line.checked_sub(1) {
            prev
        } else {
            return;
        };
        if target >= self.rope.len_lines() {
            return;
        }
        let current_col = self.rope.byte_to_char(self.head) - self.rope.line_to_char(line);
        let col = self.col_memory.unwrap_or(current_col);
        let char_idx = self.rope.line_to_char(target) + col.min(self.line_char_len(target));
        self.place(self.rope.char_to_byte(char_idx), extend);
        self.col_memory = Some(col);
    }

    /// Length of a line in chars, without its line break.
    fn line_char_len(&self, line_idx: usize) -> usize {
        let line = self.rope.line(line_idx);
        let mut len = line.len_chars();
        while len > 0 && matches!(line.char(len - 1), '\n' | '\r') {
            len -= 1;
        }
        len
    }
}

impl Default for ComposeBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for ComposeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposeBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("selection", &self.selection_range())
            .field("pending_caret", &self.pending_caret)
            .field("disabled", &self.disabled)
            .field("dirty", &self.dirty)
            .finish()
    }
}
