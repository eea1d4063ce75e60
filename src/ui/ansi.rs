//! ANSI rendering of review text for plain stdout.

use std::fmt::Write;

use crossterm::style::Stylize;

use crate::markup::{FormattedText, StyleKind};

/// Render a parsed review with terminal escape sequences, one output line
/// per source line.
pub fn render_ansi(doc: &FormattedText) -> String {
    let mut out = String::new();
    for (idx, line) in doc.lines().iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        for segment in line.segments() {
            if segment.is_plain() {
                out.push_str(segment.text());
                continue;
            }
            let mut content = segment.text().stylize();
            for kind in segment.styles().kinds() {
                content = match kind {
                    StyleKind::Bold => content.bold(),
                    StyleKind::Italic => content.italic(),
                    StyleKind::Underline => content.underlined(),
                    StyleKind::Strikethrough => content.crossed_out(),
                };
            }
            let _ = write!(out, "{content}");
        }
    }
    out
}
