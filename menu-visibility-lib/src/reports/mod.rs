//! Rendering of command results
//!
//! Each command produces a [`Report`]: the retained items per menu, every item's
//! decision with its reasons, or visibility counts. Two generators render any
//! report:
//! - **Console**: indented text for a terminal, optionally with ANSI colors
//! - **JSON**: machine-readable structured data
//!
//! Both write to a `core::fmt::Write` so callers decide where the text ends up.

mod console;
mod json;
mod report;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
pub use report::{ExplainedMenu, FilteredMenu, Report};
