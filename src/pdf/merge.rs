//! PDF merging functionality using lopdf

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on `Parent` hops; malformed files can contain cycles
const MAX_TREE_DEPTH: usize = 64;

/// Options for merging PDFs
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Input PDF file paths in the order their pages should appear
    pub input_paths: Vec<PathBuf>,
    /// Output PDF file path
    pub output_path: PathBuf,
}

impl MergeOptions {
    pub fn new<I, P>(inputs: I, output: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            input_paths: inputs.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
            output_path: output.into(),
        }
    }
}

/// Concatenate the pages of every input into a single PDF.
///
/// Each source document is renumbered past the objects already collected,
/// its old catalog and page tree nodes are dropped, and its pages are hung
/// off one fresh `Pages` root. Returns the page count of the output.
///
/// # Example
///
/// ```no_run
/// use resume_merger::pdf::{merge_documents, MergeOptions};
///
/// let options = MergeOptions::new(["resume.pdf", "cover_letter.pdf"], "Resume.pdf");
/// let pages = merge_documents(&options).expect("Failed to merge");
/// println!("{} pages", pages);
/// ```
pub fn merge_documents(options: &MergeOptions) -> Result<usize> {
    if options.input_paths.is_empty() {
        return Err(Error::General("No input files provided".to_string()));
    }

    let mut next_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for path in &options.input_paths {
        let mut doc = load_document(path)?;
        hoist_inherited_attributes(&mut doc)?;

        doc.renumber_objects_with(next_id);
        next_id = doc.max_id + 1;

        page_ids.extend(doc.get_pages().into_values());
        objects.extend(
            doc.objects
                .into_iter()
                .filter(|(_, object)| !is_page_tree_node(object)),
        );

        tracing::debug!(path = %path.display(), pages = page_ids.len(), "collected pages");
    }

    let mut merged = Document::with_version("1.5");
    merged.objects.extend(objects);
    // new_object_id() must hand out ids above everything collected so far
    merged.max_id = next_id - 1;

    let pages_id = merged.new_object_id();
    let catalog_id = merged.new_object_id();

    for &page_id in &page_ids {
        if let Ok(page) = merged.get_dictionary_mut(page_id) {
            page.set("Parent", Object::Reference(pages_id));
        }
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(page_ids.len() as i64));
    pages.set("Kids", Object::Array(kids));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));

    merged.objects.insert(pages_id, Object::Dictionary(pages));
    merged.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged.trailer.set("Root", Object::Reference(catalog_id));

    merged.compress();
    merged.save(&options.output_path)?;

    Ok(page_ids.len())
}

/// Load a document and make sure it has at least one page
fn load_document(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    if doc.get_pages().is_empty() {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(doc)
}

fn is_page_tree_node(object: &Object) -> bool {
    match object {
        Object::Dictionary(dict) => matches!(
            dict.get(b"Type"),
            Ok(Object::Name(name)) if matches!(name.as_slice(), b"Catalog" | b"Pages")
        ),
        _ => false,
    }
}

/// Copy inherited attributes onto each page.
///
/// The intermediate page tree nodes are discarded during a merge, so
/// anything a page only had through its ancestors would otherwise be lost.
fn hoist_inherited_attributes(doc: &mut Document) -> Result<()> {
    for page_id in doc.get_pages().into_values() {
        let inherited: Vec<(&[u8], Object)> = {
            let page = doc.get_dictionary(page_id)?;
            INHERITABLE_KEYS
                .iter()
                .filter(|key| !page.has(key))
                .filter_map(|key| find_inherited(doc, page, key).map(|value| (*key, value)))
                .collect()
        };

        if inherited.is_empty() {
            continue;
        }

        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key.to_vec(), value);
        }
    }

    Ok(())
}

/// Nearest ancestor value for `key`, walking up through `Parent` links
fn find_inherited(doc: &Document, node: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = node.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_dictionary(parent?).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        parent = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}
