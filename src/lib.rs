//! Core library surface for the PDF Merge TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the merge queue, the PDF backend, and the interactive front end.
pub mod error;
pub mod pdf;
pub mod queue;
pub mod ui;

/// The crate-wide error type and its `Result` alias.
pub use error::{Error, Result};

/// PDF operations used by the application and by scripted callers.
pub use pdf::{count_pages, merge_files};

/// The ordered collection of files awaiting a merge.
pub use queue::{display_name, MergeQueue};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
