//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: The composer screen (toolbar, editor, preview, status)
//! - [`ansi`]: Escape-sequence output for non-interactive use
//! - [`style`]: Theming and colors

pub mod ansi;
pub mod style;

mod render;
mod status;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::markup::{FormattedText, MarkupLine};

pub use render::{render, split_body_columns};

pub const PREVIEW_WIDTH_PERCENT: u16 = 50;

/// Convert parsed review text into ratatui lines, one per source line.
///
/// Break lines become empty lines.
pub fn markup_lines(doc: &FormattedText, base: Style) -> Vec<Line<'static>> {
    doc.lines()
        .iter()
        .map(|line| match line {
            MarkupLine::Break { .. } => Line::default(),
            MarkupLine::Text { segments } => Line::from(
                segments
                    .iter()
                    .map(|segment| {
                        Span::styled(
                            segment.text().to_string(),
                            style::style_for_inline(base, segment.styles()),
                        )
                    })
                    .collect::<Vec<_>>(),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests;
