//! Display helpers for CLI output formatting.

pub mod table;

pub use table::{entries_table, render_section};
