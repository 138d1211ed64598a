//! Page selection rules.
//!
//! A [`PageDescriptor`] is evaluated against a list of candidate page
//! indexes and picks some of them. Rules work on *positions within the
//! candidate list*, not on document indexes: applied to the candidates
//! `[4, 7, 9]`, `First { count: 2 }` selects `[4, 7]`.
//!
//! Besides the selection, every rule reports whether it found everything it
//! asked for (`is_inclusive`). Asking for the last 5 of 3 candidates selects
//! all 3 but is not inclusive; callers decide whether that matters.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::store::PageInfo;

/// Source of page details for predicate rules.
pub trait PageInspector {
    /// Details of the page at document index `index`, if known.
    fn inspect(&self, index: usize) -> Option<PageInfo>;
}

/// Inspector that knows nothing; predicate rules match no page.
impl PageInspector for () {
    fn inspect(&self, _index: usize) -> Option<PageInfo> {
        None
    }
}

/// A caller-supplied page test with a label.
///
/// The label stands in for the closure wherever a predicate has to be
/// compared, hashed or printed.
#[derive(Clone)]
pub struct PagePredicate {
    label: String,
    test: Arc<dyn Fn(&PageInfo) -> bool + Send + Sync>,
}

impl PagePredicate {
    /// Wrap `test` under `label`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagekit::select::PagePredicate;
    ///
    /// let landscape = PagePredicate::new("landscape", |page| {
    ///     page.media_box.width > page.media_box.height
    /// });
    /// assert_eq!(landscape.label(), "landscape");
    /// ```
    pub fn new<F>(label: impl Into<String>, test: F) -> Self
    where
        F: Fn(&PageInfo) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            test: Arc::new(test),
        }
    }

    /// Label given at construction.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the test against one page.
    pub fn matches(&self, page: &PageInfo) -> bool {
        (self.test)(page)
    }
}

impl std::fmt::Debug for PagePredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PagePredicate").field(&self.label).finish()
    }
}

impl PartialEq for PagePredicate {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for PagePredicate {}

impl Hash for PagePredicate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

/// A single page-selection rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDescriptor {
    /// The 1st, 3rd, 5th, ... candidate.
    OddNumbers,
    /// The 2nd, 4th, 6th, ... candidate.
    EvenNumbers,
    /// Every `n`th candidate; `n <= 0` selects everything.
    ///
    /// With `include_first` the run starts at the first candidate,
    /// otherwise at the second.
    EveryNth {
        /// Step between selected candidates.
        n: i64,
        /// Start the run at the first candidate.
        #[serde(default)]
        include_first: bool,
    },
    /// Candidates at positions `start..=end`.
    Range {
        /// First position.
        start: usize,
        /// Last position, inclusive.
        end: usize,
    },
    /// Candidates from position `start` to the end.
    OpenRange {
        /// First position.
        start: usize,
    },
    /// The first `count` candidates.
    First {
        /// Number of candidates.
        count: usize,
    },
    /// The last `count` candidates.
    Last {
        /// Number of candidates.
        count: usize,
    },
    /// Candidates at the listed positions.
    Indexes(Vec<usize>),
    /// Candidates whose page passes a predicate.
    #[serde(skip)]
    Matching(PagePredicate),
}

/// What a rule picked and whether it found everything it asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// Selected candidate values.
    pub matched: Vec<usize>,
    /// True if the rule was fully satisfied.
    pub is_inclusive: bool,
}

impl PageDescriptor {
    /// Rule matching pages that pass `test`.
    pub fn matching<F>(label: impl Into<String>, test: F) -> Self
    where
        F: Fn(&PageInfo) -> bool + Send + Sync + 'static,
    {
        Self::Matching(PagePredicate::new(label, test))
    }

    /// Apply the rule to `candidates`.
    ///
    /// Predicate rules match nothing here; use [`apply_with`](Self::apply_with)
    /// to give them page details.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagekit::select::PageDescriptor;
    ///
    /// let selection = PageDescriptor::OddNumbers.apply(&[0, 1, 2, 3, 4], true);
    /// assert_eq!(selection.matched, vec![0, 2, 4]);
    /// assert!(selection.is_inclusive);
    /// ```
    pub fn apply(&self, candidates: &[usize], sort: bool) -> Selection {
        self.apply_with(candidates, sort, &())
    }

    /// Apply the rule, looking pages up through `inspector` where needed.
    pub fn apply_with(
        &self,
        candidates: &[usize],
        sort: bool,
        inspector: &dyn PageInspector,
    ) -> Selection {
        let count = candidates.len();
        let positions = 0..count;

        let (picked, is_inclusive): (Vec<usize>, bool) = match self {
            Self::OddNumbers => (positions.step_by(2).collect(), count > 0),
            Self::EvenNumbers => (positions.skip(1).step_by(2).collect(), count > 1),
            Self::EveryNth { n, .. } if *n <= 0 => (positions.collect(), true),
            Self::EveryNth {
                n,
                include_first: true,
            } => {
                let picked: Vec<usize> = positions.filter(|&p| p as i64 % n == 0).collect();
                let found = !picked.is_empty();
                (picked, found)
            }
            Self::EveryNth {
                n,
                include_first: false,
            } => (
                positions.filter(|&p| (p as i64 - 1) % n == 0).collect(),
                count as i64 >= *n,
            ),
            Self::Range { start, end } => (
                positions.filter(|p| (start..=end).contains(&p)).collect(),
                start <= end && *end < count,
            ),
            Self::OpenRange { start } => {
                (positions.filter(|p| p >= start).collect(), *start < count)
            }
            Self::First { count: wanted } => (positions.take(*wanted).collect(), count >= *wanted),
            Self::Last { count: wanted } => (
                positions.skip(count.saturating_sub(*wanted)).collect(),
                count >= *wanted,
            ),
            Self::Indexes(wanted) => {
                let lookup: HashSet<usize> = wanted.iter().copied().collect();
                (
                    positions.filter(|p| lookup.contains(p)).collect(),
                    wanted.iter().all(|&p| p < count),
                )
            }
            Self::Matching(predicate) => {
                let picked: Vec<usize> = positions
                    .filter(|&p| {
                        inspector
                            .inspect(candidates[p])
                            .is_some_and(|page| predicate.matches(&page))
                    })
                    .collect();
                let found = !picked.is_empty();
                (picked, found)
            }
        };

        let mut matched: Vec<usize> = picked.into_iter().map(|p| candidates[p]).collect();
        if sort {
            matched.sort_unstable();
        }

        Selection {
            matched,
            is_inclusive,
        }
    }
}
