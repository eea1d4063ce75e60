//! Interactive review composer.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{DEFAULT_PLACEHOLDER, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::ThemeMode;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: PathBuf,
    preview_visible: bool,
    read_only: bool,
    theme: ThemeMode,
}

impl App {
    /// Create a composer for the given review file.
    ///
    /// The file does not need to exist yet; it is created on save.
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            preview_visible: true,
            read_only: false,
            theme: ThemeMode::Dark,
        }
    }

    /// Show or hide the formatted preview pane.
    #[must_use]
    pub const fn with_preview(mut self, visible: bool) -> Self {
        self.preview_visible = visible;
        self
    }

    /// Open the review without allowing edits.
    #[must_use]
    pub const fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    #[must_use]
    pub const fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }
}
