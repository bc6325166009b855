//! PDF metadata extraction

use std::path::Path;

use lopdf::{Document, Object};

use crate::error::{Error, Result};

/// Read the Count field from the root Pages dictionary
fn page_count_from_catalog(doc: &Document) -> Result<usize> {
    let pages_id = doc.catalog()?.get(b"Pages").and_then(Object::as_reference)?;
    let count = doc.get_dictionary(pages_id)?.get(b"Count").and_then(Object::as_i64)?;

    usize::try_from(count).map_err(|_| Error::General(format!("Invalid page count: {}", count)))
}

/// Count the number of pages in a PDF file
///
/// This is a quick operation that reads the Count field from the Pages dictionary.
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = page_count_from_catalog(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(page_count)
}
