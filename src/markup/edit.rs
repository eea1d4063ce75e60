//! Toolbar operations: wrapping a selection in delimiters and reporting
//! which styles are open at the caret.
//!
//! Offsets are UTF-8 byte offsets into the full text.

use thiserror::Error;

use super::types::{StyleKind, StyleSet};

/// Result of a toolbar edit: the replacement text and where the caret goes
/// once the host has shown it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MarkupEdit {
    pub text: String,
    pub caret: usize,
}

/// Rejected selection offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("selection start {start} is after end {end}")]
    Reversed { start: usize, end: usize },
    #[error("offset {offset} is past the end of the text ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },
    #[error("offset {offset} is inside a multi-byte character")]
    NotCharBoundary { offset: usize },
}

/// A validated `[start, end)` selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Validate offsets against `text`.
    ///
    /// # Errors
    /// Returns an error if the range is reversed, past the end, or splits a
    /// character.
    pub fn checked(text: &str, start: usize, end: usize) -> Result<Self, SelectionError> {
        if start > end {
            return Err(SelectionError::Reversed { start, end });
        }
        for offset in [start, end] {
            if offset > text.len() {
                return Err(SelectionError::OutOfBounds {
                    offset,
                    len: text.len(),
                });
            }
            if !text.is_char_boundary(offset) {
                return Err(SelectionError::NotCharBoundary { offset });
            }
        }
        Ok(Self { start, end })
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Wrap `text[start..end]` in the delimiters of `style`.
///
/// With a selection the caret lands after the closing delimiter; with a bare
/// caret both delimiters are inserted and the caret lands between them.
/// Offsets are clamped into the text and a reversed range is reordered.
pub fn toggle_markup(text: &str, start: usize, end: usize, style: StyleKind) -> MarkupEdit {
    let (start, end) = (clamp_offset(text, start), clamp_offset(text, end));
    let (start, end) = (start.min(end), start.max(end));
    let delim = style.delimiter();

    let mut out = String::with_capacity(text.len() + delim.len() * 2);
    out.push_str(&text[..start]);
    out.push_str(delim);
    out.push_str(&text[start..end]);
    out.push_str(delim);
    out.push_str(&text[end..]);

    let caret = if start < end {
        end + delim.len() * 2
    } else {
        start + delim.len()
    };
    MarkupEdit { text: out, caret }
}

/// Styles whose delimiter appears an odd number of times before `caret`.
///
/// A cheap heuristic for toolbar highlighting; it is allowed to disagree with
/// the parser on malformed or overlapping markup.
pub fn active_styles(text: &str, caret: usize) -> StyleSet {
    let before = &text[..clamp_offset(text, caret)];
    StyleKind::ALL
        .into_iter()
        .filter(|&kind| {
            let count = match kind {
                StyleKind::Italic => lone_star_count(before),
                _ => before.matches(kind.delimiter()).count(),
            };
            count % 2 == 1
        })
        .collect()
}

/// `*` characters with no `*` on either side.
fn lone_star_count(text: &str) -> usize {
    let bytes = text.as_bytes();
    (0..bytes.len())
        .filter(|&i| {
            bytes[i] == b'*'
                && (i == 0 || bytes[i - 1] != b'*')
                && bytes.get(i + 1) != Some(&b'*')
        })
        .count()
}

/// Clamp `offset` into `text` and move it back onto a character boundary.
pub(crate) fn clamp_offset(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
