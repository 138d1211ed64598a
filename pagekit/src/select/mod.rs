//! Page selection.
//!
//! [`PageDescriptor`] picks pages by position, [`PageFilter`] combines
//! descriptors into include or exclude sets and reports the result as an
//! [`IndexesDiff`].

pub mod descriptor;
pub mod filter;

pub use descriptor::{PageDescriptor, PageInspector, PagePredicate, Selection};
pub use filter::{IndexesDiff, PageFilter};
