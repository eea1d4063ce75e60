//! Inline markup for reviews and comments.
//!
//! This module handles:
//! - Parsing `**bold**`, `*italic*`, `__underline__` and `~~strikethrough~~`
//!   into styled segments, line by line
//! - Toolbar edits that wrap a selection in delimiters
//! - Detecting which styles are open at the caret

mod edit;
mod parser;
mod types;

pub use edit::{MarkupEdit, Selection, SelectionError, active_styles, toggle_markup};
pub(crate) use edit::clamp_offset;
pub use parser::{MarkupLines, parse, parse_line, parse_lines};
pub use types::{FormattedText, MarkupLine, Segment, StyleKind, StyleSet};
