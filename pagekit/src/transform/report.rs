//! Batch results.

use std::time::Duration;

use crate::error::PageKitError;
use crate::store::DocId;
use crate::transform::Outcome;

/// Result of one operation in a batch.
#[derive(Debug)]
pub struct BatchEntry {
    /// Position of the operation in the batch.
    pub index: usize,
    /// Operation name.
    pub operation: &'static str,
    /// What the operation did, or why it failed.
    pub outcome: std::result::Result<Outcome, PageKitError>,
}

/// Statistics about a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per operation that ran.
    pub entries: Vec<BatchEntry>,

    /// Number of operations that changed documents.
    pub changed: usize,

    /// Number of operations that had nothing to do.
    pub unchanged: usize,

    /// Number of operations that failed and were skipped.
    pub failed: usize,

    /// Total time taken.
    pub elapsed: Duration,
}

impl BatchReport {
    pub(crate) fn record(
        &mut self,
        index: usize,
        operation: &'static str,
        outcome: std::result::Result<Outcome, PageKitError>,
    ) {
        match &outcome {
            Ok(Outcome::Changed { .. }) => self.changed += 1,
            Ok(Outcome::NoChange { .. }) => self.unchanged += 1,
            Err(_) => self.failed += 1,
        }
        self.entries.push(BatchEntry {
            index,
            operation,
            outcome,
        });
    }

    /// True if no operation failed.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    /// Every document created during the batch, in creation order.
    pub fn created(&self) -> Vec<DocId> {
        self.entries
            .iter()
            .filter_map(|entry| entry.outcome.as_ref().ok())
            .flat_map(|outcome| outcome.created().iter().copied())
            .collect()
    }
}
