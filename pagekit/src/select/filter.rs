//! Include/exclude filters over page descriptors.

use serde::{Deserialize, Serialize};

use super::descriptor::{PageDescriptor, PageInspector};

/// Combination of page descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFilter {
    /// Every candidate.
    #[default]
    All,
    /// Candidates picked by any of the descriptors.
    Include(Vec<PageDescriptor>),
    /// Candidates picked by none of the descriptors.
    Exclude(Vec<PageDescriptor>),
}

/// Outcome of applying a [`PageFilter`].
///
/// `included` and `excluded` partition `original`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexesDiff {
    /// The candidates the filter was applied to.
    pub original: Vec<usize>,
    /// Candidates the filter kept.
    pub included: Vec<usize>,
    /// Candidates the filter dropped, in candidate order.
    pub excluded: Vec<usize>,
    /// True if every descriptor was fully satisfied.
    pub is_inclusive: bool,
}

impl PageFilter {
    /// Filter with a single include rule.
    pub fn include(descriptor: PageDescriptor) -> Self {
        Self::Include(vec![descriptor])
    }

    /// Filter with a single exclude rule.
    pub fn exclude(descriptor: PageDescriptor) -> Self {
        Self::Exclude(vec![descriptor])
    }

    /// Apply the filter to `candidates`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagekit::select::{PageDescriptor, PageFilter};
    ///
    /// let filter = PageFilter::exclude(PageDescriptor::First { count: 1 });
    /// let diff = filter.filtering(&[0, 1, 2], true);
    /// assert_eq!(diff.included, vec![1, 2]);
    /// assert_eq!(diff.excluded, vec![0]);
    /// ```
    pub fn filtering(&self, candidates: &[usize], sort: bool) -> IndexesDiff {
        self.filtering_with(candidates, sort, &())
    }

    /// Apply the filter, looking pages up through `inspector` for
    /// predicate rules.
    pub fn filtering_with(
        &self,
        candidates: &[usize],
        sort: bool,
        inspector: &dyn PageInspector,
    ) -> IndexesDiff {
        let (included, is_inclusive) = match self {
            Self::All => (candidates.to_vec(), true),
            Self::Include(descriptors) => {
                let (union, is_inclusive) = union_of(descriptors, candidates, sort, inspector);
                (union, is_inclusive)
            }
            Self::Exclude(descriptors) => {
                let (union, is_inclusive) = union_of(descriptors, candidates, sort, inspector);
                let kept = candidates
                    .iter()
                    .copied()
                    .filter(|c| !union.contains(c))
                    .collect();
                (kept, is_inclusive)
            }
        };

        let excluded = candidates
            .iter()
            .copied()
            .filter(|c| !included.contains(c))
            .collect();

        IndexesDiff {
            original: candidates.to_vec(),
            included,
            excluded,
            is_inclusive,
        }
    }
}

/// Union of all descriptor selections, ascending when `sort` is set and
/// in order of first appearance otherwise.
fn union_of(
    descriptors: &[PageDescriptor],
    candidates: &[usize],
    sort: bool,
    inspector: &dyn PageInspector,
) -> (Vec<usize>, bool) {
    let mut union = Vec::new();
    let mut is_inclusive = true;
    for descriptor in descriptors {
        let selection = descriptor.apply_with(candidates, sort, inspector);
        log::trace!(
            "{descriptor:?} selected {:?} (inclusive: {})",
            selection.matched,
            selection.is_inclusive
        );
        is_inclusive &= selection.is_inclusive;
        for value in selection.matched {
            if !union.contains(&value) {
                union.push(value);
            }
        }
    }
    if sort {
        union.sort_unstable();
    }
    (union, is_inclusive)
}
