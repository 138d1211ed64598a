//! Split point resolution.
//!
//! A [`SplitDescriptor`] turns a page count into the list of contiguous
//! ranges a split operation copies into new documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{PageKitError, Result};

/// Closed range of page indexes with an optional name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRange {
    /// First index of the range.
    pub first: usize,
    /// Last index of the range, inclusive.
    pub last: usize,
    /// Name for the document created from this range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SplitRange {
    /// Unnamed range `first..=last`.
    pub fn new(first: usize, last: usize) -> Self {
        Self {
            first,
            last,
            label: None,
        }
    }

    /// Named range `first..=last`.
    pub fn labeled(first: usize, last: usize, label: impl Into<String>) -> Self {
        Self {
            first,
            last,
            label: Some(label.into()),
        }
    }

    /// Number of pages in the range.
    ///
    /// A reversed range holds no pages.
    pub fn len(&self) -> usize {
        (self.last + 1).saturating_sub(self.first)
    }

    /// True for a reversed range.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Page indexes in the range, ascending.
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// How to cut a document into pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitDescriptor {
    /// Cut after each listed index.
    At(Vec<usize>),
    /// Chunks of `n` pages; the last chunk may be shorter.
    Every(usize),
    /// Caller-supplied zero-based ranges.
    Ranges(Vec<SplitRange>),
    /// Caller-supplied ranges of one-based page numbers.
    PageRanges(Vec<SplitRange>),
}

/// Which source indexes a set of ranges touches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Coverage {
    /// Indexes inside at least one range, ascending.
    pub used: Vec<usize>,
    /// Indexes inside no range, ascending.
    pub unused: Vec<usize>,
}

impl SplitDescriptor {
    /// Resolve the descriptor against a document of `total` pages.
    ///
    /// An empty result means there is nothing worth splitting.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::InvalidSplit`] when a boundary or range lies
    /// outside the document, a range is reversed, or a page number is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagekit::split::{SplitDescriptor, SplitRange};
    ///
    /// let ranges = SplitDescriptor::Every(2).splits(5).unwrap();
    /// assert_eq!(
    ///     ranges,
    ///     vec![SplitRange::new(0, 1), SplitRange::new(2, 3), SplitRange::new(4, 4)]
    /// );
    /// ```
    pub fn splits(&self, total: usize) -> Result<Vec<SplitRange>> {
        match self {
            Self::At(boundaries) => split_at(boundaries, total),
            Self::Every(n) => Ok(split_every(*n, total)),
            Self::Ranges(ranges) => checked(ranges.clone(), total),
            Self::PageRanges(ranges) => {
                let zero_based = ranges
                    .iter()
                    .map(|range| {
                        if range.first == 0 || range.last == 0 {
                            return Err(PageKitError::invalid_split(
                                "page numbers start at 1",
                            ));
                        }
                        Ok(SplitRange {
                            first: range.first - 1,
                            last: range.last - 1,
                            label: range.label.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                checked(zero_based, total)
            }
        }
    }
}

fn split_at(boundaries: &[usize], total: usize) -> Result<Vec<SplitRange>> {
    let boundaries: BTreeSet<usize> = boundaries.iter().copied().collect();
    if let Some(&last) = boundaries.last()
        && last >= total
    {
        return Err(PageKitError::invalid_split(format!(
            "boundary {last} is outside a document of {total} pages"
        )));
    }

    let mut ranges = Vec::with_capacity(boundaries.len() + 1);
    let mut first = 0;
    for boundary in boundaries {
        ranges.push(SplitRange::new(first, boundary));
        first = boundary + 1;
    }
    if first < total {
        ranges.push(SplitRange::new(first, total - 1));
    }
    Ok(ranges)
}

fn split_every(n: usize, total: usize) -> Vec<SplitRange> {
    let n = n.max(1);
    if n >= total {
        return Vec::new();
    }
    (0..total)
        .step_by(n)
        .map(|first| SplitRange::new(first, (first + n - 1).min(total - 1)))
        .collect()
}

fn checked(ranges: Vec<SplitRange>, total: usize) -> Result<Vec<SplitRange>> {
    for range in &ranges {
        if range.is_empty() {
            return Err(PageKitError::invalid_split(format!(
                "range {}-{} is reversed",
                range.first, range.last
            )));
        }
        if range.last >= total {
            return Err(PageKitError::invalid_split(format!(
                "range {}-{} is outside a document of {total} pages",
                range.first, range.last
            )));
        }
    }
    Ok(ranges)
}

/// Split `0..total` into the indexes `ranges` touch and those they miss.
pub fn coverage(ranges: &[SplitRange], total: usize) -> Coverage {
    let touched: BTreeSet<usize> = ranges
        .iter()
        .flat_map(|range| range.indices())
        .filter(|&index| index < total)
        .collect();
    let unused = (0..total).filter(|index| !touched.contains(index)).collect();
    Coverage {
        used: touched.into_iter().collect(),
        unused,
    }
}
