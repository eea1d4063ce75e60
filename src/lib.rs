// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. markup::MarkupLine)
    clippy::module_name_repetitions
)]

//! # Halfnote
//!
//! Lightweight inline formatting for reviews and comments.
//!
//! Halfnote understands four inline styles:
//! - `**bold**`, `*italic*`, `__underline__` and `~~strikethrough~~`
//! - one style per run, no nesting, no escapes
//! - blank lines kept as paragraph breaks
//!
//! ## Architecture
//!
//! The composer uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`markup`]: Parsing, toolbar edits and active-style detection
//! - [`editor`]: The text surface with selection and pending caret
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components and ANSI output
//! - [`config`]: Saved default flags
//! - [`perf`]: Timing and debug event log

pub mod app;
pub mod config;
pub mod editor;
pub mod markup;
pub mod perf;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::ComposeBuffer;
    pub use crate::markup::{FormattedText, MarkupLine, Segment, StyleKind, StyleSet};
}
