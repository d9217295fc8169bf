//! PDF backend built on lopdf: page-tree merging and page counting. The UI
//! never touches lopdf types directly; it hands paths in and gets page counts
//! or typed errors back.

mod merge;
mod metadata;

pub use merge::merge_files;
pub use metadata::count_pages;
