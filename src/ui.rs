//! Terminal user interface: a single screen showing the merge queue, with
//! modal forms for adding files and choosing the merge destination.
//!
//! The module split keeps the event loop plumbing (`terminal`) apart from the
//! application state machine (`app`) so the latter stays testable without a
//! real terminal.
mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
