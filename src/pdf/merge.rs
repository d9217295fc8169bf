//! Merging multiple PDFs into one document.
//!
//! lopdf has no page-level append API, so the merge works on the object
//! graph: every input document is renumbered into a shared id space, all
//! objects are collected into one document, and a fresh Pages/Catalog pair is
//! built whose Kids array lists every page in input order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Merge `inputs` in order into a single PDF at `output`, returning the page
/// count of the merged document.
///
/// Pages keep their in-file order, and inputs are concatenated in the order
/// given. The output is assembled fully in memory and written through a
/// staging file that is renamed into place, so a failure at any point leaves
/// nothing at `output`.
pub fn merge_files(inputs: &[PathBuf], output: &Path) -> Result<usize> {
    if inputs.is_empty() {
        return Err(Error::NoInputs);
    }

    let mut documents = Vec::with_capacity(inputs.len());
    for path in inputs {
        let doc = Document::load(path).map_err(|source| Error::UnreadablePdf {
            path: path.clone(),
            source,
        })?;
        if doc.get_pages().is_empty() {
            return Err(Error::EmptyPdf(path.clone()));
        }
        documents.push(doc);
    }

    // Renumber each document into a disjoint id range, then pool the objects.
    let mut next_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        doc.renumber_objects_with(next_id);
        next_id = doc.max_id + 1;

        // get_pages traverses the page tree in display order.
        page_ids.extend(doc.get_pages().into_values());
        objects.extend(doc.objects);
    }

    let mut merged = Document::with_version("1.5");
    merged.objects.extend(objects);
    // new_object_id() allocates above max_id; without this the catalog and
    // pages ids would collide with the pooled objects.
    merged.max_id = next_id - 1;

    let pages_id = merged.new_object_id();
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(page_ids.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));

    let catalog_id = merged.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));

    merged.objects.insert(pages_id, Object::Dictionary(pages_dict));
    merged.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged.trailer.set("Root", Object::Reference(catalog_id));

    // Every page now hangs off the new Pages node.
    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = merged.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    merged.compress();
    write_atomically(&mut merged, output)?;

    Ok(page_ids.len())
}

/// Serialize to memory, write to a `.part` sibling of `output`, then rename.
/// The staging file is removed when the rename fails.
fn write_atomically(doc: &mut Document, output: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|source| Error::WriteFailed {
            path: output.to_path_buf(),
            source: std::io::Error::other(source),
        })?;

    let mut staging_name = output
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    staging_name.push(".part");
    let staging = output.with_file_name(staging_name);

    fs::write(&staging, &buffer).map_err(|source| Error::WriteFailed {
        path: output.to_path_buf(),
        source,
    })?;
    fs::rename(&staging, output).map_err(|source| {
        let _ = fs::remove_file(&staging);
        Error::WriteFailed {
            path: output.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_list_is_rejected() {
        let err = merge_files(&[], Path::new("out.pdf")).unwrap_err();
        assert!(matches!(err, Error::NoInputs));
    }
}
