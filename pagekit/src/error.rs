//! Error types for pagekit.
//!
//! Every failure an operation can raise is a variant of [`PageKitError`].
//! Errors are returned before any document is touched, so a failed call
//! leaves the document set exactly as it was.
//!
//! # Error Categories
//!
//! - **Selection errors**: a filter did not find everything it asked for
//! - **Count mismatches**: `replace` with differently sized selections
//! - **Bounds errors**: an index outside a document's current page range
//! - **Construction errors**: invalid angles, splits or areas
//! - **Store errors**: failures reported by the document store itself

use crate::store::DocId;

/// Result type alias for pagekit operations.
pub type Result<T> = std::result::Result<T, PageKitError>;

/// Which side of a two-document operation an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The document pages are taken from.
    Source,
    /// The document pages are written to.
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Main error type for pagekit operations.
#[derive(Debug, thiserror::Error)]
pub enum PageKitError {
    /// A page filter did not fully match in an operation that needs full coverage.
    #[error("Invalid {side} page selection for {operation}: {reason}")]
    Selection {
        /// Operation that rejected the selection.
        operation: &'static str,
        /// Side of the operation the selection belongs to.
        side: Side,
        /// Human readable details.
        reason: String,
    },

    /// `replace` was given selections of different sizes.
    #[error(
        "Page count mismatch: {source_count} source page(s) cannot replace {target_count} target page(s)"
    )]
    CountMismatch {
        /// Number of selected source pages.
        source_count: usize,
        /// Number of selected target pages.
        target_count: usize,
    },

    /// An index is outside the document's current page range.
    #[error("Page index {index} is out of bounds for a document with {count} page(s)")]
    OutOfBounds {
        /// Offending index.
        index: usize,
        /// Page count of the document at the time of the call.
        count: usize,
    },

    /// Angle is not a quarter turn.
    #[error("Invalid rotation: {degrees}. Must be a multiple of 90")]
    InvalidAngle {
        /// Requested angle in degrees.
        degrees: i64,
    },

    /// A split descriptor cannot yield a valid partition.
    #[error("Invalid split: {reason}")]
    InvalidSplit {
        /// Why the split was rejected.
        reason: String,
    },

    /// A crop area resolved to an unusable rectangle.
    #[error("Invalid crop area: {reason}")]
    InvalidArea {
        /// Why the area was rejected.
        reason: String,
    },

    /// The document handle is not known to the store.
    #[error("Unknown document: {id}")]
    UnknownDocument {
        /// Handle that was looked up.
        id: DocId,
    },

    /// Failure reported by the document store.
    #[error("Document store error: {message}")]
    Store {
        /// Message from the store.
        message: String,
    },

    /// Failure reported by lopdf.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// I/O failure while writing a document.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A declarative batch could not be parsed.
    #[error("Invalid batch description: {0}")]
    Json(#[from] serde_json::Error),
}

impl PageKitError {
    /// Create a Selection error.
    pub fn selection(operation: &'static str, side: Side, reason: impl Into<String>) -> Self {
        Self::Selection {
            operation,
            side,
            reason: reason.into(),
        }
    }

    /// Create an OutOfBounds error.
    pub fn out_of_bounds(index: usize, count: usize) -> Self {
        Self::OutOfBounds { index, count }
    }

    /// Create an InvalidSplit error.
    pub fn invalid_split(reason: impl Into<String>) -> Self {
        Self::InvalidSplit {
            reason: reason.into(),
        }
    }

    /// Create an InvalidArea error.
    pub fn invalid_area(reason: impl Into<String>) -> Self {
        Self::InvalidArea {
            reason: reason.into(),
        }
    }

    /// Create a Store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check if this error was raised while constructing an operation's inputs.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAngle { .. } | Self::InvalidSplit { .. } | Self::InvalidArea { .. }
        )
    }

    /// Check if a batch may carry on after this error.
    ///
    /// Store and configuration failures put every later operation in doubt;
    /// the rest only concern the operation that raised them.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::Store { .. }
                | Self::Pdf(_)
                | Self::Io { .. }
                | Self::InvalidConfig { .. }
                | Self::Json(_)
        )
    }
}
