//! Typed errors for the merge queue and the PDF backend.
//!
//! The taxonomy splits the same way the UI surfaces things: `InvalidFormat`
//! aborts an add action, the lopdf-related variants abort a merge, and
//! `IndexOutOfRange` marks internal misuse of the queue and is never shown as
//! a dialog.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A selected file does not carry the literal `.pdf` suffix.
    #[error("not a PDF file: {}", .0.display())]
    InvalidFormat(PathBuf),

    /// Internal misuse of `remove`/`swap`. Indicates a bug in the caller, so
    /// it propagates out of the event loop instead of becoming a dialog.
    #[error("queue index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// An input document could not be opened or parsed.
    #[error("cannot read {}: {source}", .path.display())]
    UnreadablePdf {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// An input document parsed but contains no pages.
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// The assembled output could not be written to its destination.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Merge was invoked with an empty input list.
    #[error("no input files provided")]
    NoInputs,

    /// The add form was given a malformed glob pattern.
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// A glob pattern in the add form matched nothing.
    #[error("no files found matching pattern: {0}")]
    NoFilesMatched(String),
}
