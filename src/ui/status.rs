use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model.file_path.file_name().map_or_else(
        || "untitled".to_string(),
        |s| s.to_string_lossy().to_string(),
    );

    let dirty_indicator = if model.is_dirty() { " [modified]" } else { "" };
    let mode_indicator = if model.is_read_only() { " [read-only]" } else { "" };
    let caret = model.buffer.caret_position();
    // Display column, so wide characters count as two cells.
    let column = model
        .buffer
        .line_at(caret.line)
        .and_then(|line| line.get(..caret.col).map(UnicodeWidthStr::width))
        .unwrap_or(caret.col);

    let status = format!(
        " {filename}{dirty_indicator}{mode_indicator}  Ln {}, Col {}  Alt+B/I/U/S:style  Ctrl+P:preview  Ctrl+S:save  Ctrl+Q:quit",
        caret.line + 1,
        column + 1
    );

    let status_bar = Paragraph::new(status).style(
        Style::default()
            .bg(model.theme.status_bg)
            .fg(model.theme.status_fg),
    );

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
