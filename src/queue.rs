//! The ordered file collection behind the merge view. The queue is the single
//! source of truth for merge order: the UI derives its rows from it on every
//! frame instead of keeping a second copy of the order, so the two can never
//! drift apart.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Ordered sequence of input paths, merged top to bottom.
///
/// The queue does not validate paths; the dialog layer checks the `.pdf`
/// suffix before anything reaches `push`. Duplicates are allowed.
#[derive(Debug, Default)]
pub struct MergeQueue {
    paths: Vec<PathBuf>,
}

impl MergeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path to the end of the queue.
    pub fn push(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Remove and return the entry at `index`. Later entries shift down by
    /// one.
    pub fn remove(&mut self, index: usize) -> Result<PathBuf> {
        if index >= self.paths.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.paths.len(),
            });
        }
        Ok(self.paths.remove(index))
    }

    /// Exchange two adjacent entries. Drag and keyboard reordering only ever
    /// move an item one step at a time, so non-adjacent indices are a caller
    /// bug and fail rather than silently reordering.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        let len = self.paths.len();
        if i >= len {
            return Err(Error::IndexOutOfRange { index: i, len });
        }
        if j >= len {
            return Err(Error::IndexOutOfRange { index: j, len });
        }
        if i.abs_diff(j) != 1 {
            return Err(Error::IndexOutOfRange { index: j, len });
        }
        self.paths.swap(i, j);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PathBuf> {
        self.paths.get(index)
    }

    /// The full merge order, first input first.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

/// Basename shown for a queue entry: everything after the last path
/// separator, or the whole path when there is none. Display-only; the stored
/// path is never touched.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(names: &[&str]) -> MergeQueue {
        let mut queue = MergeQueue::new();
        for name in names {
            queue.push(PathBuf::from(name));
        }
        queue
    }

    #[test]
    fn push_preserves_order() {
        let queue = queue_of(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.get(0), Some(&PathBuf::from("/a/x.pdf")));
        assert_eq!(queue.get(2), Some(&PathBuf::from("/c/z.pdf")));
    }

    #[test]
    fn remove_shifts_later_entries_down() {
        let mut queue = queue_of(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        let removed = queue.remove(1).unwrap();
        assert_eq!(removed, PathBuf::from("/b/y.pdf"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.get(1), Some(&PathBuf::from("/c/z.pdf")));
    }

    #[test]
    fn remove_out_of_range_fails() {
        let mut queue = queue_of(&["/a/x.pdf"]);
        assert!(matches!(
            queue.remove(1),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn swap_exchanges_adjacent_entries() {
        let mut queue = queue_of(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        queue.swap(0, 1).unwrap();
        assert_eq!(queue.get(0), Some(&PathBuf::from("/b/y.pdf")));
        assert_eq!(queue.get(1), Some(&PathBuf::from("/a/x.pdf")));
    }

    #[test]
    fn swap_rejects_non_adjacent_indices() {
        let mut queue = queue_of(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        assert!(queue.swap(0, 2).is_err());
        assert!(queue.swap(1, 1).is_err());
        assert_eq!(queue.get(0), Some(&PathBuf::from("/a/x.pdf")));
    }

    #[test]
    fn swap_rejects_out_of_range_indices() {
        let mut queue = queue_of(&["/a/x.pdf", "/b/y.pdf"]);
        assert!(queue.swap(1, 2).is_err());
        assert!(queue.swap(5, 6).is_err());
    }

    #[test]
    fn display_name_strips_directories() {
        assert_eq!(display_name(Path::new("/a/b/report.pdf")), "report.pdf");
        assert_eq!(display_name(Path::new("plain.pdf")), "plain.pdf");
    }
}
