use super::*;
use crate::app::Model;
use crate::markup::{FormattedText, StyleKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Modifier;
use std::path::PathBuf;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn create_test_model(text: &str) -> Model {
    Model::new(PathBuf::from("review.txt"), text, (80, 24))
}

fn draw(model: &Model) -> Buffer {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol().to_string())
        .collect()
}

fn all_text(buffer: &Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}

#[test]
fn test_empty_editor_shows_placeholder() {
    let buffer = draw(&create_test_model(""));
    assert!(all_text(&buffer).contains("Write your text..."));
}

#[test]
fn test_placeholder_hidden_once_text_exists() {
    let buffer = draw(&create_test_model("hello"));
    let content = all_text(&buffer);
    assert!(content.contains("hello"));
    assert!(!content.contains("Write your text..."));
}

#[test]
fn test_toolbar_lists_buttons_in_order() {
    let buffer = draw(&create_test_model("hello"));
    let toolbar = row_text(&buffer, 0);
    let b = toolbar.find("[B]").unwrap();
    let i = toolbar.find("[I]").unwrap();
    let u = toolbar.find("[U]").unwrap();
    let s = toolbar.find("[S]").unwrap();
    assert!(b < i && i < u && u < s);
}

#[test]
fn test_toolbar_highlights_active_style() {
    let mut model = create_test_model("**bold** x");
    model.buffer.set_caret(4);
    let buffer = draw(&model);

    let toolbar = row_text(&buffer, 0);
    let bold_x = u16::try_from(toolbar.find("[B]").unwrap() + 1).unwrap();
    let italic_x = u16::try_from(toolbar.find("[I]").unwrap() + 1).unwrap();

    assert_eq!(buffer[(bold_x, 0)].bg, model.theme.toolbar_active.bg.unwrap());
    assert_ne!(buffer[(italic_x, 0)].bg, model.theme.toolbar_active.bg.unwrap());
    assert!(toolbar.contains("Bold (**text**)"));
}

#[test]
fn test_toolbar_shows_hint_of_open_style() {
    let mut model = create_test_model("__under");
    model.buffer.set_caret(4);
    let buffer = draw(&model);
    assert!(row_text(&buffer, 0).contains("Underline (__text__)"));
}

#[test]
fn test_read_only_toolbar_uses_disabled_style() {
    let model = create_test_model("text").with_read_only(true);
    let buffer = draw(&model);
    let toolbar = row_text(&buffer, 0);
    let bold_x = u16::try_from(toolbar.find("[B]").unwrap() + 1).unwrap();
    assert!(buffer[(bold_x, 0)].modifier.contains(Modifier::DIM));
}

#[test]
fn test_preview_renders_formatted_segments() {
    let buffer = draw(&create_test_model("a **b**"));
    assert!(all_text(&buffer).contains("Preview"));

    let preview_has_bold_b = (1..buffer.area.height).any(|y| {
        (40..buffer.area.width).any(|x| {
            let cell = &buffer[(x, y)];
            cell.symbol() == "b" && cell.modifier.contains(Modifier::BOLD)
        })
    });
    assert!(preview_has_bold_b, "preview should render b in bold");
}

#[test]
fn test_editor_shows_raw_delimiters() {
    let buffer = draw(&create_test_model("a **b**"));
    assert!(row_text(&buffer, 1).contains("a **b**"));
}

#[test]
fn test_preview_hidden_when_toggled_off() {
    let model = create_test_model("a **b**").with_preview(false);
    let buffer = draw(&model);
    assert!(!all_text(&buffer).contains("Preview"));
}

#[test]
fn test_status_bar_shows_file_and_caret() {
    let mut model = create_test_model("one\ntwo");
    model.buffer.set_caret(5);
    let buffer = draw(&model);
    let status = row_text(&buffer, 23);
    assert!(status.contains("review.txt"));
    assert!(status.contains("Ln 2, Col 2"));
    assert!(!status.contains("[modified]"));
}

#[test]
fn test_status_bar_shows_modified_and_read_only() {
    let mut model = create_test_model("text");
    model.buffer.insert_char('x');
    let status = row_text(&draw(&model), 23);
    assert!(status.contains("[modified]"));

    let model = create_test_model("text").with_read_only(true);
    let status = row_text(&draw(&model), 23);
    assert!(status.contains("[read-only]"));
}

#[test]
fn test_editor_line_marks_caret_at_line_end() {
    let theme = style::Theme::dark();
    let line = render::editor_line("abc", 10, &(13..13), 13, &theme);
    let last = line.spans.last().unwrap();
    assert_eq!(last.content, " ");
    assert_eq!(last.style, theme.caret);
}

#[test]
fn test_editor_line_highlights_selection() {
    let theme = style::Theme::dark();
    let line = render::editor_line("hello", 0, &(1..3), 3, &theme);
    let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
    assert_eq!(texts, vec!["h", "el", "l", "o"]);
    assert_eq!(line.spans[1].style, theme.text.patch(theme.selection));
    assert_eq!(line.spans[2].style, theme.caret);
}

#[test]
fn test_editor_line_handles_multibyte_text() {
    let theme = style::Theme::dark();
    let line = render::editor_line("héllo", 0, &(0..0), 3, &theme);
    let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
    assert_eq!(texts, vec!["hé", "l", "lo"]);
}

#[test]
fn test_markup_lines_maps_breaks_and_styles() {
    let doc = FormattedText::parse("x ~~y~~\n   \nz");
    let lines = markup_lines(&doc, Style::default());
    assert_eq!(lines.len(), 3);
    assert!(lines[1].spans.is_empty());
    let struck = &lines[0].spans[1];
    assert_eq!(struck.content, "y");
    assert!(
        struck
            .style
            .add_modifier
            .contains(style::modifier_for(StyleKind::Strikethrough))
    );
}

#[test]
fn test_render_tiny_terminal_does_not_panic() {
    let model = create_test_model("**a** *b* __c__ ~~d~~");
    let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}

#[test]
fn test_status_column_counts_display_width() {
    let mut model = create_test_model("日本");
    model.buffer.set_caret(3);
    let status = row_text(&draw(&model), 23);
    assert!(status.contains("Col 3"), "{status}");
}

#[test]
fn test_preview_follows_editor_scroll_past_long_line() {
    let text = format!("{}\nsecond\nthird", "x".repeat(200));
    let mut model = create_test_model(&text);
    model.editor_scroll_offset = 1;
    let buffer = draw(&model);

    let right_half = |y: u16| row_text(&buffer, y).chars().skip(40).collect::<String>();
    assert!(row_text(&buffer, 1).contains("second"));
    assert!(right_half(2).contains("second"), "{}", right_half(2));
    assert!((1..23).all(|y| !right_half(y).contains("xxxx")));
}
