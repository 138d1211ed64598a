//! Operation engine.
//!
//! Every operation follows the same shape: resolve selections, check every
//! precondition, fetch any pages that will be transplanted, and only then
//! touch the store. Multi-page removals always run highest index first.

use std::time::Instant;

use crate::config::Config;
use crate::error::{PageKitError, Result, Side};
use crate::geometry::{AreaSpec, CropMode, RotationSpec};
use crate::select::{IndexesDiff, PageFilter};
use crate::split::{self, SplitDescriptor};
use crate::store::{DocId, DocumentStore, DocumentView};
use crate::transform::report::BatchReport;
use crate::transform::{Behavior, Operation, Outcome};
use crate::utils::descending;

/// Applies [`Operation`]s to a document store.
#[derive(Debug, Clone, Default)]
pub struct PageEditor {
    config: Config,
}

impl PageEditor {
    /// Create an editor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor with `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Apply a single operation.
    ///
    /// On error the store is left as it was before the call.
    pub fn apply<S: DocumentStore>(&self, store: &mut S, operation: &Operation) -> Result<Outcome> {
        let outcome = match operation {
            Operation::Filter { doc, pages } => self.filter_pages(store, *doc, pages),
            Operation::Copy {
                from,
                pages,
                to,
                at,
            } => self.transplant(store, "copy", *from, pages, *to, *at, Behavior::Copy),
            Operation::Move {
                from,
                pages,
                to,
                at,
            } => self.transplant(store, "move", *from, pages, *to, *at, Behavior::Move),
            Operation::Replace {
                from,
                pages,
                to,
                target_pages,
                behavior,
            } => self.replace_pages(store, *from, pages, *to, target_pages, *behavior),
            Operation::Reverse { doc, pages } => self.reverse_pages(store, *doc, pages),
            Operation::Split {
                doc,
                split,
                discard_unused,
            } => self.split(store, *doc, split, *discard_unused),
            Operation::Rotate {
                doc,
                pages,
                rotation,
            } => self.rotate(store, *doc, pages, rotation),
            Operation::Crop {
                doc,
                pages,
                area,
                mode,
            } => self.crop(store, *doc, pages, area, *mode),
        }?;

        match &outcome {
            Outcome::Changed { summary, .. } => log::info!("{}: {summary}", operation.name()),
            Outcome::NoChange { reason } => {
                log::info!("{}: no change ({reason})", operation.name())
            }
        }
        Ok(outcome)
    }

    /// Apply `operations` in order.
    ///
    /// The first failure aborts the batch unless `continue_on_error` is set
    /// and the error only concerns the failing operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagekit::select::{PageDescriptor, PageFilter};
    /// use pagekit::store::MemoryStore;
    /// use pagekit::transform::{Operation, PageEditor};
    ///
    /// let mut store = MemoryStore::new();
    /// let doc = store.add_document("draft", ["a", "b", "c"]);
    ///
    /// let ops = [Operation::Filter {
    ///     doc,
    ///     pages: PageFilter::exclude(PageDescriptor::Last { count: 1 }),
    /// }];
    /// let report = PageEditor::new().run(&mut store, &ops).unwrap();
    ///
    /// assert_eq!(report.changed, 1);
    /// assert_eq!(store.labels(doc).unwrap(), ["a", "b"]);
    /// ```
    pub fn run<S: DocumentStore>(
        &self,
        store: &mut S,
        operations: &[Operation],
    ) -> Result<BatchReport> {
        let start = Instant::now();
        let mut report = BatchReport::default();

        for (index, operation) in operations.iter().enumerate() {
            match self.apply(store, operation) {
                Ok(outcome) => report.record(index, operation.name(), Ok(outcome)),
                Err(e) if self.config.continue_on_error && e.is_recoverable() => {
                    log::warn!(
                        "Skipping operation {} ({}) due to error: {e}",
                        index + 1,
                        operation.name()
                    );
                    report.record(index, operation.name(), Err(e));
                }
                Err(e) => return Err(e),
            }
        }

        report.elapsed = start.elapsed();
        Ok(report)
    }

    /// Keep only the pages `pages` includes.
    pub fn filter_pages<S: DocumentStore>(
        &self,
        store: &mut S,
        doc: DocId,
        pages: &PageFilter,
    ) -> Result<Outcome> {
        let diff = self.resolve(store, doc, pages)?;
        if !diff.is_inclusive {
            log::warn!("filter on {doc} matched only part of the requested pages");
        }
        if diff.excluded.is_empty() {
            return Ok(Outcome::no_change("filter keeps every page"));
        }

        store.remove_pages(doc, &descending(&diff.excluded))?;
        Ok(Outcome::changed(format!(
            "removed {} page(s) from {doc}",
            diff.excluded.len()
        )))
    }

    /// Copy the selected pages of `from` into `to` at `at`.
    pub fn copy_pages<S: DocumentStore>(
        &self,
        store: &mut S,
        from: DocId,
        pages: &PageFilter,
        to: DocId,
        at: Option<usize>,
    ) -> Result<Outcome> {
        self.transplant(store, "copy", from, pages, to, at, Behavior::Copy)
    }

    /// Move the selected pages of `from` into `to` at `at`.
    pub fn move_pages<S: DocumentStore>(
        &self,
        store: &mut S,
        from: DocId,
        pages: &PageFilter,
        to: DocId,
        at: Option<usize>,
    ) -> Result<Outcome> {
        self.transplant(store, "move", from, pages, to, at, Behavior::Move)
    }

    #[allow(clippy::too_many_arguments)]
    fn transplant<S: DocumentStore>(
        &self,
        store: &mut S,
        operation: &'static str,
        from: DocId,
        pages: &PageFilter,
        to: DocId,
        at: Option<usize>,
        behavior: Behavior,
    ) -> Result<Outcome> {
        let diff = self.resolve(store, from, pages)?;
        require_inclusive(&diff, operation, Side::Source)?;

        let target_count = store.page_count(to)?;
        let at = at.unwrap_or(target_count);
        if at > target_count {
            return Err(PageKitError::out_of_bounds(at, target_count));
        }

        let selected = diff.included;
        if selected.is_empty() {
            return Ok(Outcome::no_change("no pages selected"));
        }

        let same_document = from == to;
        let duplicate = !same_document || behavior == Behavior::Copy;
        let fetched = selected
            .iter()
            .map(|&index| store.get_page(from, index, duplicate))
            .collect::<Result<Vec<_>>>()?;

        store.insert_pages(to, fetched, at)?;

        if behavior == Behavior::Move {
            // Inserting into the source document shifts originals at or after `at`.
            let inserted = selected.len();
            let originals: Vec<usize> = selected
                .iter()
                .map(|&index| {
                    if same_document && index >= at {
                        index + inserted
                    } else {
                        index
                    }
                })
                .collect();
            store.remove_pages(from, &descending(&originals))?;
        }

        Ok(Outcome::changed(format!(
            "{operation} {} page(s) from {from} to {to} at {at}",
            selected.len()
        )))
    }

    /// Overwrite the `target_pages` of `to` with the `pages` of `from`.
    ///
    /// # Errors
    ///
    /// Fails if either selection is incomplete or the two selections
    /// differ in size.
    pub fn replace_pages<S: DocumentStore>(
        &self,
        store: &mut S,
        from: DocId,
        pages: &PageFilter,
        to: DocId,
        target_pages: &PageFilter,
        behavior: Behavior,
    ) -> Result<Outcome> {
        let source = self.resolve(store, from, pages)?;
        require_inclusive(&source, "replace", Side::Source)?;
        let target = self.resolve(store, to, target_pages)?;
        require_inclusive(&target, "replace", Side::Target)?;

        if source.included.len() != target.included.len() {
            return Err(PageKitError::CountMismatch {
                source_count: source.included.len(),
                target_count: target.included.len(),
            });
        }
        if source.included.is_empty() {
            return Ok(Outcome::no_change("no pages selected"));
        }

        let pairs = source.included.iter().zip(&target.included);
        if from == to {
            for (&s, &t) in pairs {
                if s != t {
                    store.swap_pages(to, s, t)?;
                }
            }
        } else {
            let fetched = source
                .included
                .iter()
                .map(|&index| store.get_page(from, index, true))
                .collect::<Result<Vec<_>>>()?;
            for (&t, page) in target.included.iter().zip(fetched) {
                store.exchange_page(to, t, page)?;
            }
        }

        if behavior == Behavior::Move {
            store.remove_pages(from, &descending(&source.included))?;
        }

        Ok(Outcome::changed(format!(
            "replaced {} page(s) of {to} with pages of {from}",
            target.included.len()
        )))
    }

    /// Reverse the order of the selected pages in place.
    pub fn reverse_pages<S: DocumentStore>(
        &self,
        store: &mut S,
        doc: DocId,
        pages: &PageFilter,
    ) -> Result<Outcome> {
        let diff = self.resolve(store, doc, pages)?;
        require_inclusive(&diff, "reverse", Side::Source)?;

        let mut selected = diff.included;
        selected.sort_unstable();
        if selected.len() < 2 {
            return Ok(Outcome::no_change("fewer than two pages selected"));
        }

        let last = selected.len() - 1;
        for k in 0..selected.len() / 2 {
            store.swap_pages(doc, selected[k], selected[last - k])?;
        }

        Ok(Outcome::changed(format!(
            "reversed {} page(s) of {doc}",
            selected.len()
        )))
    }

    /// Split `doc` into new documents, one per resolved range.
    ///
    /// Range pages are always duplicated. The source document is then
    /// deleted, unless `discard_unused` is off and some of its pages are in
    /// no range: those pages stay behind and only the used ones are removed.
    pub fn split<S: DocumentStore>(
        &self,
        store: &mut S,
        doc: DocId,
        split: &SplitDescriptor,
        discard_unused: bool,
    ) -> Result<Outcome> {
        let total = store.page_count(doc)?;
        let ranges = split.splits(total)?;
        if ranges.is_empty() {
            return Ok(Outcome::no_change("not enough pages to split"));
        }
        log::debug!(
            "split of {doc} resolved to {:?}",
            ranges.iter().map(|r| (r.first, r.last)).collect::<Vec<_>>()
        );

        let coverage = split::coverage(&ranges, total);
        let base = match &self.config.split_name_prefix {
            Some(prefix) => prefix.clone(),
            None => store
                .document_name(doc)?
                .unwrap_or_else(|| "document".to_string()),
        };

        let mut pieces = Vec::with_capacity(ranges.len());
        for range in &ranges {
            let pages = range
                .indices()
                .map(|index| store.get_page(doc, index, true))
                .collect::<Result<Vec<_>>>()?;
            pieces.push((range, pages));
        }

        let mut created = Vec::with_capacity(pieces.len());
        for (range, pages) in pieces {
            let piece = store.new_document()?;
            store.insert_pages(piece, pages, 0)?;
            let name = range
                .label
                .clone()
                .unwrap_or_else(|| format!("{base}_{}-{}", range.first + 1, range.last + 1));
            log::log!(
                self.config.page_log_level(),
                "split created {piece} \"{name}\" from pages {}-{}",
                range.first + 1,
                range.last + 1
            );
            store.set_document_name(piece, name)?;
            created.push(piece);
        }

        let disposal = if discard_unused || coverage.unused.is_empty() {
            if !coverage.unused.is_empty() {
                log::warn!(
                    "split of {doc} discards {} page(s) outside every range",
                    coverage.unused.len()
                );
            }
            store.delete_document(doc)?;
            "source deleted".to_string()
        } else {
            store.remove_pages(doc, &descending(&coverage.used))?;
            format!("{} unused page(s) left in {doc}", coverage.unused.len())
        };

        Ok(Outcome::Changed {
            summary: format!("split {doc} into {} document(s), {disposal}", created.len()),
            created,
        })
    }

    /// Set or adjust the rotation of the selected pages.
    pub fn rotate<S: DocumentStore>(
        &self,
        store: &mut S,
        doc: DocId,
        pages: &PageFilter,
        rotation: &RotationSpec,
    ) -> Result<Outcome> {
        let diff = self.resolve(store, doc, pages)?;
        if !diff.is_inclusive {
            log::warn!("rotate on {doc} matched only part of the requested pages");
        }

        let mut updates = Vec::with_capacity(diff.included.len());
        for &index in &diff.included {
            let current = store.page_rotation(doc, index)?;
            let target = rotation.resolve(current);
            if target != current {
                updates.push((index, current, target));
            }
        }
        if updates.is_empty() {
            return Ok(Outcome::no_change("selected pages already have that rotation"));
        }

        for &(index, current, target) in &updates {
            log::log!(
                self.config.page_log_level(),
                "page {index} of {doc}: rotation {current} -> {target}"
            );
            store.set_page_rotation(doc, index, target)?;
        }

        Ok(Outcome::changed(format!(
            "rotated {} page(s) of {doc}",
            updates.len()
        )))
    }

    /// Set the crop box of the selected pages.
    pub fn crop<S: DocumentStore>(
        &self,
        store: &mut S,
        doc: DocId,
        pages: &PageFilter,
        area: &AreaSpec,
        mode: CropMode,
    ) -> Result<Outcome> {
        let diff = self.resolve(store, doc, pages)?;
        if !diff.is_inclusive {
            log::warn!("crop on {doc} matched only part of the requested pages");
        }

        let mut updates = Vec::with_capacity(diff.included.len());
        for &index in &diff.included {
            let media = store.page_bounds(doc, index)?;
            let current = store.page_crop(doc, index)?;
            let source = match mode {
                CropMode::Relative => current.unwrap_or(media),
                CropMode::Absolute => media,
            };
            let crop = area.resolve(source, store.page_rotation(doc, index)?)?;
            if current != Some(crop) {
                updates.push((index, crop));
            }
        }
        if updates.is_empty() {
            return Ok(Outcome::no_change("selected pages already have that crop"));
        }

        for &(index, crop) in &updates {
            log::log!(
                self.config.page_log_level(),
                "page {index} of {doc}: crop {:?}",
                crop.corners()
            );
            store.set_page_crop(doc, index, crop)?;
        }

        Ok(Outcome::changed(format!(
            "cropped {} page(s) of {doc}",
            updates.len()
        )))
    }

    /// Resolve `filter` over every page of `doc`.
    fn resolve<S: DocumentStore>(
        &self,
        store: &S,
        doc: DocId,
        filter: &PageFilter,
    ) -> Result<IndexesDiff> {
        let count = store.page_count(doc)?;
        let candidates: Vec<usize> = (0..count).collect();
        let view = DocumentView::new(store, doc);
        let diff = filter.filtering_with(&candidates, self.config.sort_selections, &view);
        log::debug!(
            "{doc}: selected {:?} of {count} page(s), inclusive: {}",
            diff.included,
            diff.is_inclusive
        );
        Ok(diff)
    }
}

fn require_inclusive(diff: &IndexesDiff, operation: &'static str, side: Side) -> Result<()> {
    if diff.is_inclusive {
        return Ok(());
    }
    Err(PageKitError::selection(
        operation,
        side,
        format!(
            "filter asks for pages outside the {} available",
            diff.original.len()
        ),
    ))
}
