//! Review compose buffer.
//!
//! Provides the rope-backed text surface the toolbar edits operate on:
//! selection handling, disabled state and deferred caret restoration.

mod buffer;

pub use buffer::{CaretPosition, ComposeBuffer, Direction};
