//! In-memory document store.
//!
//! Pages are plain records. A page keeps its [`PageId`] for as long as it
//! lives; duplicating it allocates a fresh id while the label travels with
//! the copy, which makes transplanted content easy to follow in tests.

use std::collections::BTreeMap;

use crate::error::{PageKitError, Result};
use crate::geometry::{Angle, Rect};
use crate::store::{DocId, DocumentStore};

/// US Letter, the media box used when none is given.
pub const LETTER: Rect = Rect::new(0.0, 0.0, 612.0, 792.0);

/// Identity of a page object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(u64);

/// A page held by a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    id: PageId,
    /// Stand-in for the page's content.
    pub label: String,
    /// Full page box.
    pub media_box: Rect,
    /// Visible region, if set.
    pub crop_box: Option<Rect>,
    /// Presentation rotation.
    pub rotation: Angle,
}

impl Page {
    /// Identity of this page object.
    pub fn id(&self) -> PageId {
        self.id
    }
}

#[derive(Debug, Default)]
struct MemoryDocument {
    name: Option<String>,
    pages: Vec<Page>,
}

/// Document store keeping everything in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: BTreeMap<DocId, MemoryDocument>,
    next_doc: u32,
    next_page: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with one Letter-sized page per label.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagekit::store::{DocumentStore, MemoryStore};
    ///
    /// let mut store = MemoryStore::new();
    /// let doc = store.add_document("report", ["a", "b", "c"]);
    /// assert_eq!(store.page_count(doc).unwrap(), 3);
    /// ```
    pub fn add_document<I, L>(&mut self, name: &str, labels: I) -> DocId
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let doc = self.allocate_doc();
        let pages = labels
            .into_iter()
            .map(|label| self.make_page(label.into(), LETTER))
            .collect();
        self.documents.insert(
            doc,
            MemoryDocument {
                name: Some(name.to_string()),
                pages,
            },
        );
        doc
    }

    /// Create a detached page that can be inserted into any document.
    pub fn make_page(&mut self, label: impl Into<String>, media_box: Rect) -> Page {
        Page {
            id: self.allocate_page(),
            label: label.into(),
            media_box,
            crop_box: None,
            rotation: Angle::Deg0,
        }
    }

    /// Borrow a page.
    pub fn page(&self, doc: DocId, index: usize) -> Result<&Page> {
        let pages = &self.document(doc)?.pages;
        pages
            .get(index)
            .ok_or_else(|| PageKitError::out_of_bounds(index, pages.len()))
    }

    /// Labels of every page of `doc`, in order.
    pub fn labels(&self, doc: DocId) -> Result<Vec<String>> {
        Ok(self
            .document(doc)?
            .pages
            .iter()
            .map(|page| page.label.clone())
            .collect())
    }

    fn allocate_doc(&mut self) -> DocId {
        let id = DocId(self.next_doc);
        self.next_doc += 1;
        id
    }

    fn allocate_page(&mut self) -> PageId {
        let id = PageId(self.next_page);
        self.next_page += 1;
        id
    }

    fn document(&self, doc: DocId) -> Result<&MemoryDocument> {
        self.documents
            .get(&doc)
            .ok_or(PageKitError::UnknownDocument { id: doc })
    }

    fn document_mut(&mut self, doc: DocId) -> Result<&mut MemoryDocument> {
        self.documents
            .get_mut(&doc)
            .ok_or(PageKitError::UnknownDocument { id: doc })
    }

    fn page_mut(&mut self, doc: DocId, index: usize) -> Result<&mut Page> {
        let pages = &mut self.document_mut(doc)?.pages;
        let count = pages.len();
        pages
            .get_mut(index)
            .ok_or_else(|| PageKitError::out_of_bounds(index, count))
    }
}

impl DocumentStore for MemoryStore {
    type Page = Page;

    fn contains(&self, doc: DocId) -> bool {
        self.documents.contains_key(&doc)
    }

    fn documents(&self) -> Vec<DocId> {
        self.documents.keys().copied().collect()
    }

    fn new_document(&mut self) -> Result<DocId> {
        let doc = self.allocate_doc();
        self.documents.insert(doc, MemoryDocument::default());
        Ok(doc)
    }

    fn delete_document(&mut self, doc: DocId) -> Result<()> {
        self.documents
            .remove(&doc)
            .map(|_| ())
            .ok_or(PageKitError::UnknownDocument { id: doc })
    }

    fn document_name(&self, doc: DocId) -> Result<Option<String>> {
        Ok(self.document(doc)?.name.clone())
    }

    fn set_document_name(&mut self, doc: DocId, name: String) -> Result<()> {
        self.document_mut(doc)?.name = Some(name);
        Ok(())
    }

    fn page_count(&self, doc: DocId) -> Result<usize> {
        Ok(self.document(doc)?.pages.len())
    }

    fn page_bounds(&self, doc: DocId, index: usize) -> Result<Rect> {
        Ok(self.page(doc, index)?.media_box)
    }

    fn page_crop(&self, doc: DocId, index: usize) -> Result<Option<Rect>> {
        Ok(self.page(doc, index)?.crop_box)
    }

    fn set_page_crop(&mut self, doc: DocId, index: usize, crop: Rect) -> Result<()> {
        self.page_mut(doc, index)?.crop_box = Some(crop);
        Ok(())
    }

    fn page_rotation(&self, doc: DocId, index: usize) -> Result<Angle> {
        Ok(self.page(doc, index)?.rotation)
    }

    fn set_page_rotation(&mut self, doc: DocId, index: usize, rotation: Angle) -> Result<()> {
        self.page_mut(doc, index)?.rotation = rotation;
        Ok(())
    }

    fn get_page(&mut self, doc: DocId, index: usize, duplicate: bool) -> Result<Page> {
        let mut page = self.page(doc, index)?.clone();
        if duplicate {
            page.id = self.allocate_page();
        }
        Ok(page)
    }

    fn insert_pages(&mut self, doc: DocId, pages: Vec<Page>, at: usize) -> Result<()> {
        let document = self.document_mut(doc)?;
        if at > document.pages.len() {
            return Err(PageKitError::out_of_bounds(at, document.pages.len()));
        }
        document.pages.splice(at..at, pages);
        Ok(())
    }

    fn remove_pages(&mut self, doc: DocId, indices: &[usize]) -> Result<()> {
        let document = self.document_mut(doc)?;
        let mut remaining = document.pages.len();
        for &index in indices {
            if index >= remaining {
                return Err(PageKitError::out_of_bounds(index, remaining));
            }
            remaining -= 1;
        }
        for &index in indices {
            document.pages.remove(index);
        }
        Ok(())
    }

    fn exchange_page(&mut self, doc: DocId, index: usize, page: Page) -> Result<()> {
        *self.page_mut(doc, index)? = page;
        Ok(())
    }

    fn swap_pages(&mut self, doc: DocId, a: usize, b: usize) -> Result<()> {
        let pages = &mut self.document_mut(doc)?.pages;
        for index in [a, b] {
            if index >= pages.len() {
                return Err(PageKitError::out_of_bounds(index, pages.len()));
            }
        }
        pages.swap(a, b);
        Ok(())
    }
}
