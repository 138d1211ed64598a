//! End-to-end editing scenarios against the in-memory store.

use pagekit::geometry::{Angle, AreaSpec, CropMode, Inset, Rect, RotationSpec};
use pagekit::select::{PageDescriptor, PageFilter};
use pagekit::split::{SplitDescriptor, SplitRange};
use pagekit::store::DocumentStore;
use pagekit::transform::Behavior;
use pagekit::{Operation, Outcome, PageEditor};

use crate::common::memory_store;

#[test]
fn test_copy_selected_pages_into_middle_of_document() {
    let (mut store, ids) = memory_store(&[("a", 5), ("b", 2)]);
    let (a, b) = (ids[0], ids[1]);

    let op = Operation::Copy {
        from: a,
        pages: PageFilter::include(PageDescriptor::Indexes(vec![2, 4])),
        to: b,
        at: Some(1),
    };
    let outcome = PageEditor::new().apply(&mut store, &op).unwrap();

    assert!(outcome.is_changed());
    assert_eq!(store.labels(b).unwrap(), ["b0", "a2", "a4", "b1"]);
    assert_eq!(store.labels(a).unwrap(), ["a0", "a1", "a2", "a3", "a4"]);
}

#[test]
fn test_split_every_two_pages() {
    let (mut store, ids) = memory_store(&[("report", 5)]);
    let doc = ids[0];

    let op = Operation::Split {
        doc,
        split: SplitDescriptor::Every(2),
        discard_unused: false,
    };
    let outcome = PageEditor::new().apply(&mut store, &op).unwrap();

    let sizes: Vec<usize> = outcome
        .created()
        .iter()
        .map(|&piece| store.page_count(piece).unwrap())
        .collect();
    assert_eq!(sizes, vec![2, 2, 1]);
    assert!(!store.contains(doc));
    assert_eq!(store.labels(outcome.created()[2]).unwrap(), ["report4"]);
}

#[test]
fn test_replace_with_move_empties_source() {
    let (mut store, ids) = memory_store(&[("a", 2), ("b", 5)]);
    let (a, b) = (ids[0], ids[1]);

    let op = Operation::Replace {
        from: a,
        pages: PageFilter::All,
        to: b,
        target_pages: PageFilter::include(PageDescriptor::Indexes(vec![3, 4])),
        behavior: Behavior::Move,
    };
    PageEditor::new().apply(&mut store, &op).unwrap();

    assert_eq!(store.page_count(a).unwrap(), 0);
    assert_eq!(store.labels(b).unwrap(), ["b0", "b1", "b2", "a0", "a1"]);
}

#[test]
fn test_rotate_absolute_then_relative() {
    let (mut store, ids) = memory_store(&[("a", 4)]);
    let doc = ids[0];
    let page = PageFilter::include(PageDescriptor::Indexes(vec![2]));

    let ops = [
        Operation::Rotate {
            doc,
            pages: page.clone(),
            rotation: RotationSpec::absolute(Angle::Deg180),
        },
        Operation::Rotate {
            doc,
            pages: page,
            rotation: RotationSpec::relative(Angle::Deg90),
        },
    ];
    let report = PageEditor::new().run(&mut store, &ops).unwrap();

    assert_eq!(report.changed, 2);
    assert_eq!(store.page_rotation(doc, 2).unwrap(), Angle::Deg270);
}

#[test]
fn test_filter_on_subset_then_reverse() {
    let (mut store, ids) = memory_store(&[("a", 6)]);
    let doc = ids[0];
    let editor = PageEditor::new();

    editor
        .apply(
            &mut store,
            &Operation::Filter {
                doc,
                pages: PageFilter::Exclude(vec![
                    PageDescriptor::First { count: 1 },
                    PageDescriptor::Last { count: 1 },
                ]),
            },
        )
        .unwrap();
    assert_eq!(store.labels(doc).unwrap(), ["a1", "a2", "a3", "a4"]);

    editor
        .apply(
            &mut store,
            &Operation::Reverse {
                doc,
                pages: PageFilter::All,
            },
        )
        .unwrap();
    assert_eq!(store.labels(doc).unwrap(), ["a4", "a3", "a2", "a1"]);
}

#[test]
fn test_split_named_ranges_keeps_remainder() {
    let (mut store, ids) = memory_store(&[("book", 6)]);
    let doc = ids[0];

    let op = Operation::Split {
        doc,
        split: SplitDescriptor::PageRanges(vec![
            SplitRange::labeled(1, 2, "front"),
            SplitRange::labeled(5, 6, "back"),
        ]),
        discard_unused: false,
    };
    let outcome = PageEditor::new().apply(&mut store, &op).unwrap();

    let front = outcome.created()[0];
    let back = outcome.created()[1];
    assert_eq!(store.document_by_name("front"), Some(front));
    assert_eq!(store.labels(back).unwrap(), ["book4", "book5"]);
    assert_eq!(store.labels(doc).unwrap(), ["book2", "book3"]);
}

#[test]
fn test_crop_rotated_page_with_literal_rect() {
    let (mut store, ids) = memory_store(&[("a", 1)]);
    let doc = ids[0];
    store.set_page_rotation(doc, 0, Angle::Deg90).unwrap();

    let op = Operation::Crop {
        doc,
        pages: PageFilter::All,
        area: AreaSpec::Rect(Rect::new(0.0, 0.0, 792.0, 100.0)),
        mode: CropMode::Absolute,
    };
    PageEditor::new().apply(&mut store, &op).unwrap();

    // A strip along the presented bottom edge of a page turned 90 degrees
    // runs along the storage frame's right edge.
    assert_eq!(
        store.page_crop(doc, 0).unwrap(),
        Some(Rect::new(512.0, 0.0, 100.0, 792.0))
    );
}

#[test]
fn test_crop_scaled_insets() {
    let (mut store, ids) = memory_store(&[("a", 2)]);
    let doc = ids[0];

    let op = Operation::Crop {
        doc,
        pages: PageFilter::include(PageDescriptor::First { count: 1 }),
        area: AreaSpec::Insets {
            top: Inset::Scale(0.5),
            leading: Inset::Passthrough,
            bottom: Inset::Passthrough,
            trailing: Inset::Passthrough,
        },
        mode: CropMode::Relative,
    };
    PageEditor::new().apply(&mut store, &op).unwrap();

    let crop = store.page_crop(doc, 0).unwrap().unwrap();
    assert_eq!(crop.width, 612.0);
    assert_eq!(crop.height, 396.0);
    assert_eq!(store.page_crop(doc, 1).unwrap(), None);
}

#[test]
fn test_predicate_selection() {
    let (mut store, ids) = memory_store(&[("a", 4)]);
    let doc = ids[0];
    store.set_page_rotation(doc, 1, Angle::Deg90).unwrap();
    store.set_page_rotation(doc, 3, Angle::Deg270).unwrap();

    let sideways = PageDescriptor::matching("sideways", |page| page.rotation.is_sideways());
    let op = Operation::Rotate {
        doc,
        pages: PageFilter::include(sideways),
        rotation: RotationSpec::absolute(Angle::Deg0),
    };
    PageEditor::new().apply(&mut store, &op).unwrap();

    for index in 0..4 {
        assert_eq!(store.page_rotation(doc, index).unwrap(), Angle::Deg0);
    }
}

#[test]
fn test_no_change_outcomes() {
    let (mut store, ids) = memory_store(&[("a", 1)]);
    let doc = ids[0];
    let editor = PageEditor::new();

    let outcome = editor
        .apply(
            &mut store,
            &Operation::Reverse {
                doc,
                pages: PageFilter::All,
            },
        )
        .unwrap();
    assert!(matches!(outcome, Outcome::NoChange { .. }));

    let outcome = editor
        .apply(
            &mut store,
            &Operation::Split {
                doc,
                split: SplitDescriptor::Every(3),
                discard_unused: false,
            },
        )
        .unwrap();
    assert!(matches!(outcome, Outcome::NoChange { .. }));
    assert!(store.contains(doc));
}
