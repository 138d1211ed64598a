//! pagekit - Declarative page-level editing for PDF documents.
//!
//! This library selects, rearranges and reshapes pages across a set of
//! open documents. It supports:
//!
//! - Rule-based page selection with include/exclude composition
//! - Copying, moving and replacing pages between documents
//! - Reversing page order
//! - Splitting a document into new documents
//! - Rotation and rotation-aware cropping
//! - JSON batches of operations
//!
//! Documents live in a [`DocumentStore`](store::DocumentStore). The crate
//! ships an in-memory store and a `lopdf`-backed store for real PDF files.
//!
//! # Examples
//!
//! ## Copying pages
//!
//! ```
//! use pagekit::select::{PageDescriptor, PageFilter};
//! use pagekit::store::MemoryStore;
//! use pagekit::transform::PageEditor;
//!
//! let mut store = MemoryStore::new();
//! let source = store.add_document("source", ["s0", "s1", "s2", "s3", "s4"]);
//! let target = store.add_document("target", ["t0", "t1"]);
//!
//! let evens = PageFilter::include(PageDescriptor::Indexes(vec![2, 4]));
//! PageEditor::new()
//!     .copy_pages(&mut store, source, &evens, target, Some(1))
//!     .unwrap();
//!
//! assert_eq!(store.labels(target).unwrap(), ["t0", "s2", "s4", "t1"]);
//! ```
//!
//! ## Editing a PDF
//!
//! ```no_run
//! use pagekit::geometry::{Angle, RotationSpec};
//! use pagekit::select::{PageDescriptor, PageFilter};
//! use pagekit::store::LopdfStore;
//! use pagekit::transform::Operation;
//! use pagekit::PageEditor;
//!
//! # fn example(bytes: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = LopdfStore::new();
//! let doc = store.load("scan", bytes)?;
//!
//! let op = Operation::Rotate {
//!     doc,
//!     pages: PageFilter::include(PageDescriptor::EvenNumbers),
//!     rotation: RotationSpec::relative(Angle::Deg180),
//! };
//! PageEditor::new().apply(&mut store, &op)?;
//!
//! let output = store.to_bytes(doc)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod select;
pub mod split;
pub mod store;
pub mod transform;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{PageKitError, Result, Side};
pub use transform::{Operation, Outcome, PageEditor};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
