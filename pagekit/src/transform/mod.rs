//! Page transform operations.
//!
//! An [`Operation`] is a declarative description of one edit: which
//! documents it touches, which pages it selects and what it does with
//! them. A [`PageEditor`] applies operations to a
//! [`DocumentStore`](crate::store::DocumentStore), one at a time, and
//! reports each result as an [`Outcome`].
//!
//! Operations are serde types, so a whole batch can be loaded from JSON:
//!
//! ```
//! use pagekit::store::MemoryStore;
//! use pagekit::transform::{PageEditor, parse_batch};
//!
//! let mut store = MemoryStore::new();
//! let doc = store.add_document("scan", ["p1", "p2", "p3", "p4"]);
//!
//! let batch = parse_batch(r#"[
//!     {"op": "reverse", "doc": 0},
//!     {"op": "rotate", "doc": 0, "pages": {"include": ["odd_numbers"]},
//!      "rotation": {"angle": 90}}
//! ]"#).unwrap();
//!
//! let report = PageEditor::new().run(&mut store, &batch).unwrap();
//! assert_eq!(report.changed, 2);
//! assert_eq!(store.labels(doc).unwrap(), ["p4", "p3", "p2", "p1"]);
//! ```

mod editor;
mod report;

pub use editor::PageEditor;
pub use report::{BatchEntry, BatchReport};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{AreaSpec, CropMode, RotationSpec};
use crate::select::PageFilter;
use crate::split::SplitDescriptor;
use crate::store::DocId;

/// Whether transplanted pages stay in their source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Leave the source pages in place.
    #[default]
    Copy,
    /// Remove the source pages afterwards.
    Move,
}

/// One page-level edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Keep only the pages a filter includes.
    Filter {
        /// Document to edit.
        doc: DocId,
        /// Pages to keep.
        #[serde(default)]
        pages: PageFilter,
    },
    /// Copy pages into a document.
    Copy {
        /// Document pages are taken from.
        from: DocId,
        /// Pages to copy.
        #[serde(default)]
        pages: PageFilter,
        /// Document pages are inserted into.
        to: DocId,
        /// Insertion index; defaults to the end of `to`.
        #[serde(default)]
        at: Option<usize>,
    },
    /// Move pages into a document.
    Move {
        /// Document pages are taken from.
        from: DocId,
        /// Pages to move.
        #[serde(default)]
        pages: PageFilter,
        /// Document pages are inserted into.
        to: DocId,
        /// Insertion index; defaults to the end of `to`.
        #[serde(default)]
        at: Option<usize>,
    },
    /// Overwrite pages of one document with pages of another.
    Replace {
        /// Document replacement pages are taken from.
        from: DocId,
        /// Replacement pages.
        #[serde(default)]
        pages: PageFilter,
        /// Document whose pages are replaced.
        to: DocId,
        /// Pages to overwrite, paired in order with `pages`.
        #[serde(default)]
        target_pages: PageFilter,
        /// Whether replacement pages leave `from`.
        #[serde(default)]
        behavior: Behavior,
    },
    /// Reverse the order of the selected pages.
    Reverse {
        /// Document to edit.
        doc: DocId,
        /// Pages whose order is reversed.
        #[serde(default)]
        pages: PageFilter,
    },
    /// Cut a document into new documents.
    Split {
        /// Document to split.
        doc: DocId,
        /// Where to cut.
        split: SplitDescriptor,
        /// Drop pages no range covers instead of keeping them in `doc`.
        #[serde(default)]
        discard_unused: bool,
    },
    /// Set or adjust the presentation rotation.
    Rotate {
        /// Document to edit.
        doc: DocId,
        /// Pages to rotate.
        #[serde(default)]
        pages: PageFilter,
        /// Rotation to apply.
        rotation: RotationSpec,
    },
    /// Set the crop box.
    Crop {
        /// Document to edit.
        doc: DocId,
        /// Pages to crop.
        #[serde(default)]
        pages: PageFilter,
        /// Crop region.
        area: AreaSpec,
        /// Box the region is resolved against.
        #[serde(default)]
        mode: CropMode,
    },
}

impl Operation {
    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Filter { .. } => "filter",
            Self::Copy { .. } => "copy",
            Self::Move { .. } => "move",
            Self::Replace { .. } => "replace",
            Self::Reverse { .. } => "reverse",
            Self::Split { .. } => "split",
            Self::Rotate { .. } => "rotate",
            Self::Crop { .. } => "crop",
        }
    }
}

/// Successful result of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Documents were modified.
    Changed {
        /// What was done.
        summary: String,
        /// Documents the operation created.
        created: Vec<DocId>,
    },
    /// Nothing needed doing.
    NoChange {
        /// Why nothing was done.
        reason: String,
    },
}

impl Outcome {
    pub(crate) fn changed(summary: impl Into<String>) -> Self {
        Self::Changed {
            summary: summary.into(),
            created: Vec::new(),
        }
    }

    pub(crate) fn no_change(reason: impl Into<String>) -> Self {
        Self::NoChange {
            reason: reason.into(),
        }
    }

    /// True if documents were modified.
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// Documents the operation created.
    pub fn created(&self) -> &[DocId] {
        match self {
            Self::Changed { created, .. } => created,
            Self::NoChange { .. } => &[],
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Changed { summary, .. } => f.write_str(summary),
            Self::NoChange { reason } => write!(f, "no change: {reason}"),
        }
    }
}

/// Parse a JSON array of operations.
pub fn parse_batch(json: &str) -> Result<Vec<Operation>> {
    Ok(serde_json::from_str(json)?)
}
