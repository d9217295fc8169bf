//! Page counting via the document catalog.

use std::path::Path;

use lopdf::Document;

use crate::error::{Error, Result};

/// Number of pages in the PDF at `path`.
///
/// Reads the Count entry of the root Pages node rather than walking the page
/// tree, which also handles nested trees whose leaves `get_pages` can
/// miscount.
pub fn count_pages(path: &Path) -> Result<usize> {
    let doc = Document::load(path).map_err(|source| Error::UnreadablePdf {
        path: path.to_path_buf(),
        source,
    })?;
    let count = root_page_count(&doc).map_err(|source| Error::UnreadablePdf {
        path: path.to_path_buf(),
        source,
    })?;
    if count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }
    Ok(count)
}

fn root_page_count(doc: &Document) -> std::result::Result<usize, lopdf::Error> {
    let pages_id = doc.catalog()?.get(b"Pages")?.as_reference()?;
    let count = doc.get_object(pages_id)?.as_dict()?.get(b"Count")?.as_i64()?;
    Ok(count.max(0) as usize)
}
