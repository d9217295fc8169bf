//! Binary entry point: build an empty merge queue and drive the Ratatui event
//! loop until the user exits.
use pdf_merge::{run_app, App};

/// Launch the interactive merger.
///
/// Returning a `Result` bubbles up fatal terminal setup problems (for example
/// a non-tty stdout) instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let mut app = App::new();
    run_app(&mut app)
}
