//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the membership tabs and overlays using ratatui
//! and maps keyboard events onto store operations.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
