//! Theming and color definitions.
//!
//! This module defines the visual styling for the composer and for rendered
//! review text. Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;
use crate::markup::{StyleKind, StyleSet};

/// Terminal modifier used to display one inline style.
pub const fn modifier_for(kind: StyleKind) -> Modifier {
    match kind {
        StyleKind::Bold => Modifier::BOLD,
        StyleKind::Italic => Modifier::ITALIC,
        StyleKind::Underline => Modifier::UNDERLINED,
        StyleKind::Strikethrough => Modifier::CROSSED_OUT,
    }
}

/// Get the style for a segment, merged with a base style.
pub fn style_for_inline(base: Style, styles: StyleSet) -> Style {
    styles
        .kinds()
        .fold(base, |style, kind| style.add_modifier(modifier_for(kind)))
}

/// Color theme for the composer.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Review text
    pub text: Style,
    /// Placeholder shown in an empty editor
    pub placeholder: Style,
    /// Pane borders and titles
    pub border: Style,
    /// Toolbar row background
    pub toolbar: Style,
    /// Toolbar button when its style is open at the caret
    pub toolbar_active: Style,
    /// Toolbar buttons of a read-only editor
    pub toolbar_disabled: Style,
    /// Selected text in the editor
    pub selection: Style,
    /// Caret cell
    pub caret: Style,
    /// Status bar background
    pub status_bg: Color,
    /// Status bar foreground
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Style::default(),
            placeholder: Style::default()
                .fg(Color::Indexed(244))
                .add_modifier(Modifier::ITALIC),
            border: Style::default().fg(Color::Indexed(240)),
            toolbar: Style::default().fg(Color::Indexed(252)),
            toolbar_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Indexed(250))
                .add_modifier(Modifier::BOLD),
            toolbar_disabled: Style::default()
                .fg(Color::Indexed(240))
                .add_modifier(Modifier::DIM),
            selection: Style::default().bg(Color::Indexed(24)),
            caret: Style::default().bg(Color::White).fg(Color::Black),
            status_bg: Color::Indexed(236), // Dark gray that works on both
            status_fg: Color::Indexed(252), // Light gray
        }
    }
}

impl Theme {
    /// Create a theme optimized for dark terminals.
    pub fn dark() -> Self {
        Self::default()
    }

    /// Create a theme optimized for light terminals.
    pub fn light() -> Self {
        Self {
            text: Style::default(),
            placeholder: Style::default()
                .fg(Color::Indexed(246))
                .add_modifier(Modifier::ITALIC),
            border: Style::default().fg(Color::Indexed(250)),
            toolbar: Style::default().fg(Color::Indexed(238)),
            toolbar_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Indexed(253)) // #e5e7eb-ish
                .add_modifier(Modifier::BOLD),
            toolbar_disabled: Style::default()
                .fg(Color::Indexed(248))
                .add_modifier(Modifier::DIM),
            selection: Style::default().bg(Color::Indexed(153)),
            caret: Style::default().bg(Color::Black).fg(Color::White),
            status_bg: Color::Indexed(252),
            status_fg: Color::Indexed(235),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Style of a toolbar button.
    pub fn toolbar_button(&self, active: bool, disabled: bool) -> Style {
        if disabled {
            self.toolbar_disabled
        } else if active {
            self.toolbar_active
        } else {
            self.toolbar
        }
    }
}
