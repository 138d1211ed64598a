//! Document stores.
//!
//! pagekit never parses or writes PDF bytes itself. Everything it needs from
//! a document is expressed by the [`DocumentStore`] trait: page counts,
//! page boxes and rotation, and the handful of page-list mutations the
//! transform operations are built from.
//!
//! Two stores ship with the crate:
//!
//! - [`MemoryStore`] keeps lightweight page records and is what the engine
//!   is specified and tested against.
//! - [`LopdfStore`] edits real PDF documents through `lopdf`.

pub mod memory;
pub mod pdf;

pub use memory::{MemoryStore, Page, PageId};
pub use pdf::{LopdfStore, PdfPage};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Angle, Rect};
use crate::select::PageInspector;

/// Handle to a document owned by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(pub u32);

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of a page's geometry, as seen by page predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageInfo {
    /// Zero-based index of the page in its document.
    pub index: usize,
    /// Full page box in the storage frame.
    pub media_box: Rect,
    /// Visible region, if one is set.
    pub crop_box: Option<Rect>,
    /// Presentation rotation.
    pub rotation: Angle,
}

/// The document-store capability the transform operations run against.
///
/// Indexes are zero-based positions in a document's current page list.
/// Every method that takes an index fails with
/// [`PageKitError::OutOfBounds`](crate::PageKitError::OutOfBounds) when it
/// is outside that list, and every method that takes a [`DocId`] fails with
/// [`PageKitError::UnknownDocument`](crate::PageKitError::UnknownDocument)
/// for handles the store does not know.
pub trait DocumentStore {
    /// A page taken out of a document, ready to be inserted elsewhere.
    type Page;

    /// True if the store owns `doc`.
    fn contains(&self, doc: DocId) -> bool;

    /// All documents, in creation order.
    fn documents(&self) -> Vec<DocId>;

    /// Create a new document without pages.
    fn new_document(&mut self) -> Result<DocId>;

    /// Drop a document and all of its pages.
    fn delete_document(&mut self, doc: DocId) -> Result<()>;

    /// Display name of a document.
    fn document_name(&self, doc: DocId) -> Result<Option<String>>;

    /// Rename a document.
    fn set_document_name(&mut self, doc: DocId, name: String) -> Result<()>;

    /// Number of pages in `doc`.
    fn page_count(&self, doc: DocId) -> Result<usize>;

    /// Media box of a page, in its unrotated storage frame.
    fn page_bounds(&self, doc: DocId, index: usize) -> Result<Rect>;

    /// Crop box of a page, if it has one.
    fn page_crop(&self, doc: DocId, index: usize) -> Result<Option<Rect>>;

    /// Set the crop box of a page (storage frame).
    fn set_page_crop(&mut self, doc: DocId, index: usize, crop: Rect) -> Result<()>;

    /// Presentation rotation of a page.
    fn page_rotation(&self, doc: DocId, index: usize) -> Result<Angle>;

    /// Set the presentation rotation of a page.
    fn set_page_rotation(&mut self, doc: DocId, index: usize, rotation: Angle) -> Result<()>;

    /// Take a page out of `doc` without removing it.
    ///
    /// With `duplicate` the result is an independent copy that may be
    /// inserted into any document. Without it the handle still refers to the
    /// original page and may only be inserted back into `doc`.
    fn get_page(&mut self, doc: DocId, index: usize, duplicate: bool) -> Result<Self::Page>;

    /// Insert pages at `at`, preserving their order.
    ///
    /// Fails if `at` is greater than the page count.
    fn insert_pages(&mut self, doc: DocId, pages: Vec<Self::Page>, at: usize) -> Result<()>;

    /// Remove pages one at a time, in exactly the order given.
    ///
    /// Each removal shifts later indexes down, so callers pass indexes in
    /// descending order. Fails, without removing anything, if any index is
    /// out of range.
    fn remove_pages(&mut self, doc: DocId, indices: &[usize]) -> Result<()>;

    /// Put `page` at `index`, dropping the page that was there.
    fn exchange_page(&mut self, doc: DocId, index: usize, page: Self::Page) -> Result<()>;

    /// Exchange the positions of two pages of the same document.
    fn swap_pages(&mut self, doc: DocId, a: usize, b: usize) -> Result<()>;

    /// Geometry snapshot of one page.
    fn page_info(&self, doc: DocId, index: usize) -> Result<PageInfo> {
        Ok(PageInfo {
            index,
            media_box: self.page_bounds(doc, index)?,
            crop_box: self.page_crop(doc, index)?,
            rotation: self.page_rotation(doc, index)?,
        })
    }

    /// First document carrying `name`.
    fn document_by_name(&self, name: &str) -> Option<DocId> {
        self.documents().into_iter().find(|&doc| {
            self.document_name(doc)
                .ok()
                .flatten()
                .is_some_and(|n| n == name)
        })
    }
}

/// Read-only view of one document, used to evaluate page predicates.
pub struct DocumentView<'a, S: ?Sized> {
    store: &'a S,
    doc: DocId,
}

impl<'a, S: DocumentStore + ?Sized> DocumentView<'a, S> {
    /// Create a view of `doc`.
    pub fn new(store: &'a S, doc: DocId) -> Self {
        Self { store, doc }
    }
}

impl<S: DocumentStore + ?Sized> PageInspector for DocumentView<'_, S> {
    fn inspect(&self, index: usize) -> Option<PageInfo> {
        self.store.page_info(self.doc, index).ok()
    }
}
