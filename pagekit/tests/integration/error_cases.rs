//! Integration tests for error handling and edge cases.

use pagekit::geometry::{Angle, AreaSpec, CropMode, Inset};
use pagekit::select::{PageDescriptor, PageFilter};
use pagekit::split::{SplitDescriptor, SplitRange};
use pagekit::store::{DocumentStore, LopdfStore, MemoryStore};
use pagekit::transform::Behavior;
use pagekit::{Operation, PageEditor, PageKitError, Side};

use crate::common::memory_store;

/// Labels of every document in the store, in creation order.
fn snapshot(store: &MemoryStore) -> Vec<Vec<String>> {
    store
        .documents()
        .into_iter()
        .map(|doc| store.labels(doc).unwrap())
        .collect()
}

#[test]
fn test_error_incomplete_move_selection() {
    let (mut store, ids) = memory_store(&[("a", 2), ("b", 2)]);
    let before = snapshot(&store);

    let op = Operation::Move {
        from: ids[0],
        pages: PageFilter::include(PageDescriptor::Last { count: 3 }),
        to: ids[1],
        at: None,
    };
    let err = PageEditor::new().apply(&mut store, &op).unwrap_err();

    assert!(matches!(
        err,
        PageKitError::Selection {
            operation: "move",
            side: Side::Source,
            ..
        }
    ));
    assert_eq!(snapshot(&store), before);
}

#[test]
fn test_error_replace_count_mismatch_names_both_counts() {
    let (mut store, ids) = memory_store(&[("a", 3), ("b", 2)]);
    let before = snapshot(&store);

    let op = Operation::Replace {
        from: ids[0],
        pages: PageFilter::All,
        to: ids[1],
        target_pages: PageFilter::All,
        behavior: Behavior::Move,
    };
    let err = PageEditor::new().apply(&mut store, &op).unwrap_err();

    let message = err.to_string();
    assert!(message.contains('3'));
    assert!(message.contains('2'));
    assert_eq!(snapshot(&store), before);
}

#[test]
fn test_error_split_outside_document() {
    let (mut store, ids) = memory_store(&[("a", 3)]);
    let before = snapshot(&store);

    let op = Operation::Split {
        doc: ids[0],
        split: SplitDescriptor::Ranges(vec![SplitRange::new(0, 0), SplitRange::new(1, 5)]),
        discard_unused: true,
    };
    let err = PageEditor::new().apply(&mut store, &op).unwrap_err();

    assert!(err.is_construction_error());
    assert_eq!(snapshot(&store), before);
    assert_eq!(store.documents().len(), 1);
}

#[test]
fn test_error_crop_with_no_area_on_later_page() {
    let (mut store, ids) = memory_store(&[("a", 3)]);
    let doc = ids[0];
    let small = store.make_page("small", pagekit::geometry::Rect::new(0.0, 0.0, 100.0, 100.0));
    store.insert_pages(doc, vec![small], 3).unwrap();

    let op = Operation::Crop {
        doc,
        pages: PageFilter::All,
        area: AreaSpec::uniform(Inset::Points(60.0)),
        mode: CropMode::Absolute,
    };
    let err = PageEditor::new().apply(&mut store, &op).unwrap_err();

    assert!(matches!(err, PageKitError::InvalidArea { .. }));
    for index in 0..4 {
        assert_eq!(store.page_crop(doc, index).unwrap(), None);
    }
}

#[test]
fn test_error_invalid_angle() {
    let err = Angle::from_degrees(45).unwrap_err();
    assert!(matches!(err, PageKitError::InvalidAngle { degrees: 45 }));
    assert!(err.is_construction_error());
}

#[test]
fn test_error_copy_past_end() {
    let (mut store, ids) = memory_store(&[("a", 2), ("b", 2)]);
    let op = Operation::Copy {
        from: ids[0],
        pages: PageFilter::All,
        to: ids[1],
        at: Some(3),
    };
    let err = PageEditor::new().apply(&mut store, &op).unwrap_err();
    assert!(matches!(err, PageKitError::OutOfBounds { index: 3, count: 2 }));
}

#[test]
fn test_error_invalid_pdf_bytes() {
    let mut store = LopdfStore::new();
    let err = store.load("broken", b"not a pdf").unwrap_err();
    assert!(matches!(err, PageKitError::Pdf(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn test_empty_document_edge_cases() {
    let (mut store, ids) = memory_store(&[("empty", 0)]);
    let doc = ids[0];
    let editor = PageEditor::new();

    let filter = editor
        .apply(
            &mut store,
            &Operation::Filter {
                doc,
                pages: PageFilter::include(PageDescriptor::OddNumbers),
            },
        )
        .unwrap();
    assert!(!filter.is_changed());

    let split = editor
        .apply(
            &mut store,
            &Operation::Split {
                doc,
                split: SplitDescriptor::At(vec![]),
                discard_unused: false,
            },
        )
        .unwrap();
    assert!(!split.is_changed());
    assert!(store.contains(doc));

    let copy = editor
        .apply(
            &mut store,
            &Operation::Copy {
                from: doc,
                pages: PageFilter::All,
                to: doc,
                at: None,
            },
        )
        .unwrap();
    assert!(!copy.is_changed());
}
