use crate::app::Model;
use crate::app::model::ToastLevel;
use crate::editor::Direction;
use crate::markup::StyleKind;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the caret
    Insert(char),
    /// Insert a line break
    InsertNewline,
    /// Delete before the caret
    Backspace,
    /// Delete at the caret
    Delete,

    // Caret
    /// Move the caret; `extend` grows the selection
    Move { direction: Direction, extend: bool },
    /// Start of line
    Home { extend: bool },
    /// End of line
    End { extend: bool },
    /// Start of review
    BufferStart { extend: bool },
    /// End of review
    BufferEnd { extend: bool },
    /// Select the whole review
    SelectAll,

    // Toolbar
    /// Wrap the selection in a style's delimiters
    ApplyStyle(StyleKind),
    /// Show or hide the preview pane
    TogglePreview,

    // File
    /// Write the review to disk (side effect in the event loop)
    Save,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit, asking again if there are unsaved changes
    Quit,
}

/// Pure state transition.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Save preserves the flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    match msg {
        Message::Insert(ch) => model.buffer.insert_char(ch),
        Message::InsertNewline => model.buffer.split_line(),
        Message::Backspace => {
            model.buffer.delete_back();
        }
        Message::Delete => {
            model.buffer.delete_forward();
        }
        Message::Move { direction, extend } => model.buffer.move_cursor(direction, extend),
        Message::Home { extend } => model.buffer.move_home(extend),
        Message::End { extend } => model.buffer.move_end(extend),
        Message::BufferStart { extend } => model.buffer.move_to_start(extend),
        Message::BufferEnd { extend } => model.buffer.move_to_end(extend),
        Message::SelectAll => model.buffer.select_all(),
        Message::ApplyStyle(kind) => {
            if model.buffer.apply_style(kind).is_none() {
                model.show_toast(ToastLevel::Warning, "Read-only: formatting disabled");
            }
        }
        Message::TogglePreview => model.preview_visible = !model.preview_visible,
        Message::Resize(width, height) => model.size = (width, height),
        Message::Save | Message::Redraw => {}
        Message::Quit => {
            if model.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model.ensure_caret_visible();
    model
}
