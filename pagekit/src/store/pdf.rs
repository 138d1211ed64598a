//! Document store backed by `lopdf`.
//!
//! Each document is a [`lopdf::Document`]. Pages are addressed through the
//! flattened page tree: whenever the page list changes, every page gets the
//! attributes it used to inherit (`MediaBox`, `CropBox`, `Rotate`,
//! `Resources`) copied onto itself and is re-parented directly under the
//! root `Pages` node.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::BTreeMap;

use crate::error::{PageKitError, Result};
use crate::geometry::{Angle, Rect};
use crate::store::{DocId, DocumentStore};
use crate::utils::{collect_references, remap_references};

/// Page attributes a page may inherit from its ancestors.
const INHERITABLE: [&str; 4] = ["MediaBox", "CropBox", "Rotate", "Resources"];

/// Guard against cyclic `Parent` chains.
const MAX_TREE_DEPTH: usize = 64;

/// A page taken out of a [`LopdfStore`] document.
#[derive(Debug, Clone)]
pub enum PdfPage {
    /// The original page object, still owned by its document.
    Attached {
        /// Owning document.
        doc: DocId,
        /// Page object in that document.
        id: ObjectId,
    },
    /// A self-contained copy of a page and everything it references.
    Detached {
        /// Id of the page dictionary within `objects`.
        root: ObjectId,
        /// The page dictionary and its dependencies, keyed by source id.
        objects: BTreeMap<ObjectId, Object>,
    },
}

#[derive(Debug)]
struct PdfEntry {
    name: Option<String>,
    document: Document,
}

/// Document store holding `lopdf` documents.
#[derive(Debug, Default)]
pub struct LopdfStore {
    documents: BTreeMap<DocId, PdfEntry>,
    next_doc: u32,
}

impl LopdfStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an already loaded document.
    pub fn add_document(&mut self, name: &str, document: Document) -> DocId {
        let doc = DocId(self.next_doc);
        self.next_doc += 1;
        self.documents.insert(
            doc,
            PdfEntry {
                name: Some(name.to_string()),
                document,
            },
        );
        doc
    }

    /// Parse PDF bytes and add the document.
    pub fn load(&mut self, name: &str, bytes: &[u8]) -> Result<DocId> {
        let document = Document::load_mem(bytes)?;
        log::debug!("Loaded '{}' ({} pages)", name, document.get_pages().len());
        Ok(self.add_document(name, document))
    }

    /// Serialise a document.
    ///
    /// Objects no longer reachable from the trailer, such as pages removed
    /// from the page tree, are dropped before writing.
    pub fn to_bytes(&mut self, doc: DocId) -> Result<Vec<u8>> {
        let document = &mut self.entry_mut(doc)?.document;
        let pruned = document.prune_objects();
        if !pruned.is_empty() {
            log::debug!("Pruned {} unreachable object(s) from {doc}", pruned.len());
        }
        document.compress();
        document.renumber_objects();

        let mut buffer = Vec::new();
        document.save_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Borrow a document.
    pub fn document(&self, doc: DocId) -> Result<&Document> {
        Ok(&self.entry(doc)?.document)
    }

    /// Remove a document from the store and hand it back.
    pub fn take_document(&mut self, doc: DocId) -> Result<Document> {
        self.documents
            .remove(&doc)
            .map(|entry| entry.document)
            .ok_or(PageKitError::UnknownDocument { id: doc })
    }

    fn entry(&self, doc: DocId) -> Result<&PdfEntry> {
        self.documents
            .get(&doc)
            .ok_or(PageKitError::UnknownDocument { id: doc })
    }

    fn entry_mut(&mut self, doc: DocId) -> Result<&mut PdfEntry> {
        self.documents
            .get_mut(&doc)
            .ok_or(PageKitError::UnknownDocument { id: doc })
    }

    fn page_id(&self, doc: DocId, index: usize) -> Result<ObjectId> {
        let ids = page_ids(self.document(doc)?);
        ids.get(index)
            .copied()
            .ok_or_else(|| PageKitError::out_of_bounds(index, ids.len()))
    }

    /// Apply `edit` to the page list of `doc` and write it back.
    fn edit_pages<F>(&mut self, doc: DocId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Document, &mut Vec<ObjectId>) -> Result<()>,
    {
        let document = &mut self.entry_mut(doc)?.document;
        let mut ids = page_ids(document);
        edit(document, &mut ids)?;
        write_page_tree(document, &ids)
    }

    /// Turn a page handle into a page object of `doc`.
    ///
    /// A page object may appear only once in the page tree, so an attached
    /// page already listed in `in_use` is re-created as a new object.
    fn adopt(
        document: &mut Document,
        doc: DocId,
        page: PdfPage,
        in_use: &[ObjectId],
    ) -> Result<ObjectId> {
        match page {
            PdfPage::Attached { doc: owner, id } if owner == doc => {
                if in_use.contains(&id) {
                    let copy = document.get_dictionary(id)?.clone();
                    Ok(document.add_object(copy))
                } else {
                    Ok(id)
                }
            }
            PdfPage::Attached { doc: owner, .. } => Err(PageKitError::store(format!(
                "page of document {owner} cannot be inserted into {doc} without duplicating it"
            ))),
            PdfPage::Detached { root, objects } => attach(document, root, objects),
        }
    }
}

impl DocumentStore for LopdfStore {
    type Page = PdfPage;

    fn contains(&self, doc: DocId) -> bool {
        self.documents.contains_key(&doc)
    }

    fn documents(&self) -> Vec<DocId> {
        self.documents.keys().copied().collect()
    }

    fn new_document(&mut self) -> Result<DocId> {
        let doc = DocId(self.next_doc);
        self.next_doc += 1;
        self.documents.insert(
            doc,
            PdfEntry {
                name: None,
                document: empty_document(),
            },
        );
        Ok(doc)
    }

    fn delete_document(&mut self, doc: DocId) -> Result<()> {
        self.take_document(doc).map(|_| ())
    }

    fn document_name(&self, doc: DocId) -> Result<Option<String>> {
        Ok(self.entry(doc)?.name.clone())
    }

    fn set_document_name(&mut self, doc: DocId, name: String) -> Result<()> {
        self.entry_mut(doc)?.name = Some(name);
        Ok(())
    }

    fn page_count(&self, doc: DocId) -> Result<usize> {
        Ok(page_ids(self.document(doc)?).len())
    }

    fn page_bounds(&self, doc: DocId, index: usize) -> Result<Rect> {
        let id = self.page_id(doc, index)?;
        let document = self.document(doc)?;
        inherited(document, id, b"MediaBox")
            .and_then(|obj| rect_from_object(document, obj))
            .ok_or_else(|| PageKitError::store(format!("page {index} has no usable MediaBox")))
    }

    fn page_crop(&self, doc: DocId, index: usize) -> Result<Option<Rect>> {
        let id = self.page_id(doc, index)?;
        let document = self.document(doc)?;
        Ok(inherited(document, id, b"CropBox").and_then(|obj| rect_from_object(document, obj)))
    }

    fn set_page_crop(&mut self, doc: DocId, index: usize, crop: Rect) -> Result<()> {
        let id = self.page_id(doc, index)?;
        let page = self.entry_mut(doc)?.document.get_dictionary_mut(id)?;
        page.set("CropBox", rect_to_object(crop));
        Ok(())
    }

    fn page_rotation(&self, doc: DocId, index: usize) -> Result<Angle> {
        let id = self.page_id(doc, index)?;
        let document = self.document(doc)?;
        match inherited(document, id, b"Rotate") {
            Some(obj) => Angle::from_degrees(resolve(document, obj).as_i64()?),
            None => Ok(Angle::Deg0),
        }
    }

    fn set_page_rotation(&mut self, doc: DocId, index: usize, rotation: Angle) -> Result<()> {
        let id = self.page_id(doc, index)?;
        let page = self.entry_mut(doc)?.document.get_dictionary_mut(id)?;
        page.set("Rotate", Object::Integer(rotation.as_degrees()));
        Ok(())
    }

    fn get_page(&mut self, doc: DocId, index: usize, duplicate: bool) -> Result<PdfPage> {
        let id = self.page_id(doc, index)?;
        if !duplicate {
            return Ok(PdfPage::Attached { doc, id });
        }
        detach(self.document(doc)?, id)
    }

    fn insert_pages(&mut self, doc: DocId, pages: Vec<PdfPage>, at: usize) -> Result<()> {
        self.edit_pages(doc, |document, ids| {
            if at > ids.len() {
                return Err(PageKitError::out_of_bounds(at, ids.len()));
            }
            let mut new_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
            for page in pages {
                let in_use: Vec<ObjectId> = ids.iter().chain(&new_ids).copied().collect();
                new_ids.push(Self::adopt(document, doc, page, &in_use)?);
            }
            ids.splice(at..at, new_ids);
            Ok(())
        })
    }

    fn remove_pages(&mut self, doc: DocId, indices: &[usize]) -> Result<()> {
        self.edit_pages(doc, |_, ids| {
            let mut remaining = ids.len();
            for &index in indices {
                if index >= remaining {
                    return Err(PageKitError::out_of_bounds(index, remaining));
                }
                remaining -= 1;
            }
            for &index in indices {
                ids.remove(index);
            }
            Ok(())
        })
    }

    fn exchange_page(&mut self, doc: DocId, index: usize, page: PdfPage) -> Result<()> {
        self.edit_pages(doc, |document, ids| {
            if index >= ids.len() {
                return Err(PageKitError::out_of_bounds(index, ids.len()));
            }
            let in_use: Vec<ObjectId> = ids
                .iter()
                .enumerate()
                .filter(|&(slot, _)| slot != index)
                .map(|(_, &id)| id)
                .collect();
            ids[index] = Self::adopt(document, doc, page, &in_use)?;
            Ok(())
        })
    }

    fn swap_pages(&mut self, doc: DocId, a: usize, b: usize) -> Result<()> {
        self.edit_pages(doc, |_, ids| {
            for index in [a, b] {
                if index >= ids.len() {
                    return Err(PageKitError::out_of_bounds(index, ids.len()));
                }
            }
            ids.swap(a, b);
            Ok(())
        })
    }
}

/// Page object ids in page order.
fn page_ids(document: &Document) -> Vec<ObjectId> {
    document.get_pages().into_values().collect()
}

/// A document with a catalog and an empty page tree.
fn empty_document() -> Document {
    let mut document = Document::with_version("1.5");
    let pages_id = document.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);
    document
}

/// Follow a reference, if `obj` is one.
fn resolve<'a>(document: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => document.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Look `key` up on a page, falling back to its ancestors.
fn inherited<'a>(document: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = document.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = document.get_dictionary(parent).ok()?;
    }
    None
}

fn rect_from_object(document: &Document, obj: &Object) -> Option<Rect> {
    let items = resolve(document, obj).as_array().ok()?;
    if items.len() != 4 {
        return None;
    }
    let mut corners = [0.0f64; 4];
    for (corner, item) in corners.iter_mut().zip(items) {
        *corner = f64::from(resolve(document, item).as_float().ok()?);
    }
    Some(Rect::from_corners(corners))
}

fn rect_to_object(rect: Rect) -> Object {
    Object::Array(
        rect.corners()
            .iter()
            .map(|&value| Object::Real(value as f32))
            .collect(),
    )
}

/// Copy inherited attributes onto the page itself.
fn materialize(document: &mut Document, page_id: ObjectId) -> Result<()> {
    let missing: Vec<(&str, Object)> = {
        let page = document.get_dictionary(page_id)?;
        INHERITABLE
            .iter()
            .filter(|key| !page.has(key.as_bytes()))
            .filter_map(|key| {
                inherited(document, page_id, key.as_bytes()).map(|value| (*key, value.clone()))
            })
            .collect()
    };
    let page = document.get_dictionary_mut(page_id)?;
    for (key, value) in missing {
        page.set(key, value);
    }
    Ok(())
}

/// Replace the page tree with a single level holding `ids`.
fn write_page_tree(document: &mut Document, ids: &[ObjectId]) -> Result<()> {
    for &id in ids {
        materialize(document, id)?;
    }

    let pages_id = document.catalog()?.get(b"Pages")?.as_reference()?;
    for &id in ids {
        document.get_dictionary_mut(id)?.set("Parent", pages_id);
    }

    let pages = document.get_dictionary_mut(pages_id)?;
    let kids: Vec<Object> = ids.iter().map(|&id| Object::Reference(id)).collect();
    pages.set("Kids", Object::Array(kids));
    pages.set("Count", Object::Integer(ids.len() as i64));
    Ok(())
}

/// Copy a page and everything it references out of `document`.
fn detach(document: &Document, page_id: ObjectId) -> Result<PdfPage> {
    let mut page: Dictionary = document.get_dictionary(page_id)?.clone();
    for key in INHERITABLE {
        if !page.has(key.as_bytes())
            && let Some(value) = inherited(document, page_id, key.as_bytes())
        {
            page.set(key, value.clone());
        }
    }
    page.remove(b"Parent");

    let page = Object::Dictionary(page);
    let mut objects = BTreeMap::new();
    objects.insert(page_id, page.clone());
    collect_references(document, &page, &mut objects);

    Ok(PdfPage::Detached {
        root: page_id,
        objects,
    })
}

/// Renumber a detached page into `document`, returning its new id.
fn attach(
    document: &mut Document,
    root: ObjectId,
    objects: BTreeMap<ObjectId, Object>,
) -> Result<ObjectId> {
    let mapping: BTreeMap<ObjectId, ObjectId> = objects
        .keys()
        .map(|&old| (old, document.new_object_id()))
        .collect();

    for (old, mut obj) in objects {
        remap_references(&mut obj, &mapping);
        if let Some(&new) = mapping.get(&old) {
            document.objects.insert(new, obj);
        }
    }

    mapping
        .get(&root)
        .copied()
        .ok_or_else(|| PageKitError::store("detached page is missing its page dictionary"))
}
