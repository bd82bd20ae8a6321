//! Presentation layer for code-crew
//!
//! This crate contains CLI definitions, the web front end, output
//! formatters and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;
pub mod web;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use web::{AppState, SESSION_HEADER, router, serve};
