use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::config::ThemeMode;
use crate::editor::ComposeBuffer;
use crate::markup::{FormattedText, StyleSet};
use crate::ui::style::Theme;

/// Placeholder shown while the review is empty.
pub const DEFAULT_PLACEHOLDER: &str = "Write your text...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// Review text being composed
    pub buffer: ComposeBuffer,
    /// File the review is saved to
    pub file_path: PathBuf,
    /// Whether the formatted preview pane is visible
    pub preview_visible: bool,
    /// Colors
    pub theme: Theme,
    /// Text shown in an empty editor
    pub placeholder: String,
    /// First editor line shown on screen
    pub editor_scroll_offset: usize,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    toast: Option<Toast>,
    /// A first quit with unsaved changes was refused
    pub quit_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    /// Create a model for `text`, as loaded from `file_path`.
    pub fn new(file_path: PathBuf, text: &str, size: (u16, u16)) -> Self {
        Self {
            buffer: ComposeBuffer::from_text(text),
            file_path,
            size,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.buffer.set_disabled(read_only);
        self
    }

    #[must_use]
    pub fn with_theme(mut self, mode: ThemeMode) -> Self {
        self.theme = Theme::for_mode(mode);
        self
    }

    #[must_use]
    pub const fn with_preview(mut self, visible: bool) -> Self {
        self.preview_visible = visible;
        self
    }

    pub const fn is_read_only(&self) -> bool {
        self.buffer.is_disabled()
    }

    pub const fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Parsed form of the current text, for the preview pane.
    pub fn preview(&self) -> FormattedText {
        FormattedText::parse(&self.buffer.text())
    }

    /// Preview line shown at the top of the preview pane.
    ///
    /// The preview has one row per `\n`-separated line, so it follows the
    /// editor's first visible line by counting newlines before it.
    pub fn preview_scroll(&self) -> usize {
        let start = self.buffer.line_start(self.editor_scroll_offset);
        self.buffer.text().as_bytes()[..start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
    }

    /// Styles to highlight in the toolbar.
    pub fn active_styles(&self) -> StyleSet {
        self.buffer.active_styles()
    }

    /// Rows available to the editor pane.
    pub fn editor_height(&self) -> usize {
        // toolbar + status bar, plus the toast row while one is shown
        let chrome = 2 + u16::from(self.toast.is_some());
        self.size.1.saturating_sub(chrome) as usize
    }

    /// Second half of a toolbar edit: apply the caret once the new text has
    /// been drawn. Returns `true` if another frame is needed.
    pub fn after_render(&mut self) -> bool {
        if self.buffer.commit_pending_caret() {
            self.ensure_caret_visible();
            return true;
        }
        false
    }

    /// Scroll the editor so the caret line is on screen.
    pub fn ensure_caret_visible(&mut self) {
        let height = self.editor_height().max(1);
        let line = self.buffer.caret_position().line;
        if line < self.editor_scroll_offset {
            self.editor_scroll_offset = line;
        } else if line >= self.editor_scroll_offset + height {
            self.editor_scroll_offset = line + 1 - height;
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Write the buffer to `file_path` and mark it clean.
    pub(super) fn save_to_disk(&mut self) -> Result<()> {
        std::fs::write(&self.file_path, self.buffer.text())
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        self.buffer.mark_clean();
        Ok(())
    }
}

impl Default for Model {
    fn default() -> Self {
        Self {
            buffer: ComposeBuffer::empty(),
            file_path: PathBuf::new(),
            preview_visible: true,
            theme: Theme::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            editor_scroll_offset: 0,
            size: (80, 24),
            toast: None,
            quit_confirmed: false,
            should_quit: false,
        }
    }
}
