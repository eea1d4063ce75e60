use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::markup::StyleKind;

use super::style::Theme;
use super::{PREVIEW_WIDTH_PERCENT, markup_lines, status};

/// Split the body into editor and preview columns.
pub fn split_body_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100 - PREVIEW_WIDTH_PERCENT),
            Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let toolbar_area = Rect { height: 1.min(area.height), ..area };
    let body_area = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1 + footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    render_toolbar(model, frame, toolbar_area);

    if model.preview_visible {
        let chunks = split_body_columns(body_area);
        render_editor(model, frame, chunks[0]);
        render_preview(model, frame, chunks[1]);
    } else {
        render_editor(model, frame, body_area);
    }

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);
}

fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = &model.theme;
    let disabled = model.is_read_only();
    let active = model.active_styles();

    let mut spans = vec![Span::styled(" ", theme.toolbar)];
    for kind in StyleKind::ALL {
        spans.push(Span::styled(
            format!("[{}]", kind.label()),
            theme.toolbar_button(active.contains(kind), disabled),
        ));
        spans.push(Span::styled(" ", theme.toolbar));
    }

    // Describe the innermost open style, or the bold syntax as a starting point.
    let hint = active
        .kinds()
        .last()
        .map_or(StyleKind::Bold.hint(), StyleKind::hint);
    let used: usize = spans.iter().map(Span::width).sum();
    if used + 1 + hint.width() <= area.width as usize {
        spans.push(Span::styled(format!(" {hint}"), theme.placeholder));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let buf = &model.buffer;
    let theme = &model.theme;

    let content: Vec<Line> = if buf.is_empty() {
        vec![Line::from(vec![
            Span::styled(" ", theme.caret),
            Span::styled(model.placeholder.clone(), theme.placeholder),
        ])]
    } else {
        let caret = buf.caret();
        let selection = buf.selection_range();
        let start = model.editor_scroll_offset;
        let end = (start + area.height as usize).min(buf.line_count());
        (start..end)
            .map(|line_idx| {
                let text = buf.line_at(line_idx).unwrap_or_default();
                editor_line(&text, buf.line_start(line_idx), &selection, caret, theme)
            })
            .collect()
    };

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content).block(Block::default().padding(Padding::left(1))),
        area,
    );
}

/// Build one editor row, highlighting the selection and the caret cell.
///
/// `line_start` is the byte offset of `text` within the whole buffer.
pub(super) fn editor_line(
    text: &str,
    line_start: usize,
    selection: &Range<usize>,
    caret: usize,
    theme: &Theme,
) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = theme.text;

    for (idx, ch) in text.char_indices() {
        let offset = line_start + idx;
        let style = if offset == caret {
            theme.caret
        } else if selection.contains(&offset) {
            theme.text.patch(theme.selection)
        } else {
            theme.text
        };
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    if caret == line_start + text.len() {
        spans.push(Span::styled(" ", theme.caret));
    }
    Line::from(spans)
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = &model.theme;
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(theme.border)
        .title(Span::styled(" Preview ", theme.border))
        .padding(Padding::left(1));

    // Unwrapped, so preview rows stay aligned with editor rows.
    let scroll = u16::try_from(model.preview_scroll()).unwrap_or(u16::MAX);
    let preview = Paragraph::new(markup_lines(&model.preview(), theme.text))
        .block(block)
        .scroll((scroll, 0));

    frame.render_widget(Clear, area);
    frame.render_widget(preview, area);
}
